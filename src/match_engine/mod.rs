pub mod deliveries;
pub mod dna;
pub mod engine;
pub mod innings;

pub use deliveries::{Delivery, DismissalKind};
pub use dna::{PitchDna, PitchPreset};
pub use engine::{determine_winner, MatchEngine, MatchResult};
pub use innings::{Aggression, Approach, BallOutcome, BattingEntry, BowlingEntry, InningsState, Phase};
