// Pitch descriptor and its six fixed presets. Grounded on engine/dna.py's
// `PitchDNA`/`PITCHES`; exact numbers recovered in SPEC_FULL.md 3.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchPreset {
    GreenSeamer,
    DustBowl,
    FlatDeck,
    BouncyTrack,
    SlowTurner,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchDna {
    pub preset: PitchPreset,
    pub pace_assist: i32,
    pub spin_assist: i32,
    pub bounce: i32,
    pub carry: i32,
    pub deterioration: i32,
}

impl PitchPreset {
    pub fn dna(self) -> PitchDna {
        let (pace_assist, spin_assist, bounce, carry, deterioration) = match self {
            PitchPreset::GreenSeamer => (80, 15, 70, 85, 25),
            PitchPreset::DustBowl => (20, 85, 35, 45, 80),
            PitchPreset::FlatDeck => (40, 35, 55, 60, 20),
            PitchPreset::BouncyTrack => (75, 20, 90, 85, 20),
            PitchPreset::SlowTurner => (30, 60, 40, 50, 55),
            PitchPreset::Balanced => (55, 45, 60, 65, 35),
        };
        PitchDna {
            preset: self,
            pace_assist,
            spin_assist,
            bounce,
            carry,
            deterioration,
        }
    }
}

impl Default for PitchDna {
    fn default() -> Self {
        PitchPreset::Balanced.dna()
    }
}

impl PitchDna {
    /// Second-innings spin assist boost: pitch wears and takes more turn.
    pub fn spin_assist_for_innings(&self, is_second_innings: bool) -> f64 {
        let base = self.spin_assist as f64;
        if is_second_innings {
            base * (1.0 + self.deterioration as f64 / 150.0)
        } else {
            base
        }
    }
}
