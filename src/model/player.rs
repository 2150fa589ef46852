// Player entity: identity, coarse attributes, and the fine-grained DNA
// consumed by the match engine.

use serde::{Deserialize, Serialize};

pub type PlayerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattingStyle {
    RightHanded,
    LeftHanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BowlingType {
    Pace,
    Medium,
    OffSpin,
    LegSpin,
    LeftArmSpin,
    None,
}

impl BowlingType {
    pub fn is_pace_family(self) -> bool {
        matches!(self, BowlingType::Pace | BowlingType::Medium)
    }

    pub fn is_spin_family(self) -> bool {
        matches!(
            self,
            BowlingType::OffSpin | BowlingType::LegSpin | BowlingType::LeftArmSpin
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattingIntent {
    Anchor,
    Accumulator,
    Aggressive,
    PowerHitter,
}

/// A behavioural modifier. Effects are applied by the match engine at the
/// points noted on each variant; see SPEC_FULL.md 3 for the exact numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerTrait {
    /// +10 effective skill when striker's runs < 20 or required run rate > 10.
    Clutch,
    /// -15 effective skill under the same pressure condition as Clutch.
    Choker,
    /// +20 catching success chance.
    BucketHands,
    /// +10 bowling rating once the current partnership exceeds 50 runs.
    PartnershipBreaker,
    /// +15 batting rating in the last 5 overs of an innings.
    Finisher,
}

/// Seven integer 0-100 stats defending against each delivery family, plus
/// forced weaknesses that the generator reduces by 15-25 points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterDNA {
    pub vs_pace: i32,
    pub vs_bounce: i32,
    pub vs_spin: i32,
    pub vs_deception: i32,
    pub off_side: i32,
    pub leg_side: i32,
    pub power: i32,
    pub weaknesses: Vec<String>,
}

impl BatterDNA {
    /// Average of the six directional stats (power excluded), used as a
    /// fallback quality signal by the tail-ender floor rule.
    pub fn avg(&self) -> f64 {
        let sum = self.vs_pace
            + self.vs_bounce
            + self.vs_spin
            + self.vs_deception
            + self.off_side
            + self.leg_side;
        sum as f64 / 6.0
    }

    pub fn stat(&self, name: &str) -> Option<i32> {
        match name {
            "vs_pace" => Some(self.vs_pace),
            "vs_bounce" => Some(self.vs_bounce),
            "vs_spin" => Some(self.vs_spin),
            "vs_deception" => Some(self.vs_deception),
            "off_side" => Some(self.off_side),
            "leg_side" => Some(self.leg_side),
            "power" => Some(self.power),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacerDNA {
    /// kph, clamped to [120, 155].
    pub speed: i32,
    pub swing: i32,
    pub bounce: i32,
    pub control: i32,
}

impl PacerDNA {
    /// Maps raw speed onto a 0-100 pace factor used by the attack rating.
    pub fn speed_factor(&self) -> f64 {
        (((self.speed - 115) as f64) * 2.5).clamp(0.0, 100.0)
    }

    pub fn stat(&self, name: &str) -> Option<f64> {
        match name {
            "speed_factor" => Some(self.speed_factor()),
            "swing" => Some(self.swing as f64),
            "bounce" => Some(self.bounce as f64),
            "control" => Some(self.control as f64),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinnerDNA {
    pub turn: i32,
    pub flight: i32,
    pub variation: i32,
    pub control: i32,
}

impl SpinnerDNA {
    pub fn stat(&self, name: &str) -> Option<f64> {
        match name {
            "turn" => Some(self.turn as f64),
            "flight" => Some(self.flight as f64),
            "variation" => Some(self.variation as f64),
            "control" => Some(self.control as f64),
            _ => None,
        }
    }
}

/// Tagged union of bowler DNA. Players with `BowlingType::None` carry no
/// variant. Serialized with an explicit `type` discriminant so a persisted
/// value round-trips without ambiguity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BowlerDNA {
    Pacer(PacerDNA),
    Spinner(SpinnerDNA),
}

impl BowlerDNA {
    pub fn control(&self) -> i32 {
        match self {
            BowlerDNA::Pacer(p) => p.control,
            BowlerDNA::Spinner(s) => s.control,
        }
    }

    pub fn stat(&self, name: &str) -> Option<f64> {
        match self {
            BowlerDNA::Pacer(p) => p.stat(name),
            BowlerDNA::Spinner(s) => s.stat(name),
        }
    }

    pub fn average(&self) -> f64 {
        match self {
            BowlerDNA::Pacer(p) => {
                (p.speed_factor() + p.swing as f64 + p.bounce as f64 + p.control as f64) / 4.0
            }
            BowlerDNA::Spinner(s) => {
                (s.turn as f64 + s.flight as f64 + s.variation as f64 + s.control as f64) / 4.0
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub age: i32,
    pub nationality: String,
    pub is_overseas: bool,

    pub role: PlayerRole,
    pub batting_style: BattingStyle,
    pub bowling_type: BowlingType,

    pub batting: i32,
    pub bowling: i32,
    pub fielding: i32,
    pub fitness: i32,
    pub power: i32,
    pub technique: i32,
    pub running: i32,
    pub pace_or_spin: i32,
    pub accuracy: i32,
    pub variation: i32,
    pub temperament: i32,
    pub consistency: i32,

    /// Form multiplier, nominal lifetime range 0.7-1.3; the generator draws
    /// a narrow 0.9-1.1 starting value (see SPEC_FULL.md 4.1).
    pub form: f64,

    pub traits: Vec<PlayerTrait>,
    pub batting_intent: BattingIntent,

    pub batter_dna: BatterDNA,
    pub bowler_dna: Option<BowlerDNA>,

    pub base_price: i64,
    pub sold_price: Option<i64>,

    pub team_id: Option<super::team::TeamId>,
}

impl Player {
    /// Derived overall rating, truncated (not rounded) to an integer, per
    /// the exact per-role formula recovered from the original source.
    pub fn overall_rating(&self) -> i32 {
        let batting = self.batting as f64;
        let bowling = self.bowling as f64;
        let fielding = self.fielding as f64;
        let fitness = self.fitness as f64;

        let raw = match self.role {
            PlayerRole::Batsman => batting * 0.7 + fielding * 0.2 + fitness * 0.1,
            PlayerRole::Bowler => bowling * 0.7 + fielding * 0.2 + fitness * 0.1,
            PlayerRole::AllRounder => {
                batting * 0.4 + bowling * 0.4 + fielding * 0.1 + fitness * 0.1
            }
            PlayerRole::WicketKeeper => batting * 0.5 + fielding * 0.4 + fitness * 0.1,
        };
        raw as i32
    }

    pub fn can_bowl(&self) -> bool {
        self.bowler_dna.is_some()
    }

    pub fn has_trait(&self, t: PlayerTrait) -> bool {
        self.traits.contains(&t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_player(role: PlayerRole) -> Player {
        Player {
            id: 1,
            name: "Test Player".into(),
            age: 25,
            nationality: "India".into(),
            is_overseas: false,
            role,
            batting_style: BattingStyle::RightHanded,
            bowling_type: BowlingType::None,
            batting: 80,
            bowling: 40,
            fielding: 60,
            fitness: 70,
            power: 50,
            technique: 50,
            running: 50,
            pace_or_spin: 0,
            accuracy: 0,
            variation: 0,
            temperament: 50,
            consistency: 50,
            form: 1.0,
            traits: vec![],
            batting_intent: BattingIntent::Accumulator,
            batter_dna: BatterDNA {
                vs_pace: 50,
                vs_bounce: 50,
                vs_spin: 50,
                vs_deception: 50,
                off_side: 50,
                leg_side: 50,
                power: 50,
                weaknesses: vec![],
            },
            bowler_dna: None,
            base_price: 2_000_000,
            sold_price: None,
            team_id: None,
        }
    }

    #[test]
    fn overall_rating_batsman_formula() {
        let p = base_player(PlayerRole::Batsman);
        // 80*0.7 + 60*0.2 + 70*0.1 = 56 + 12 + 7 = 75
        assert_eq!(p.overall_rating(), 75);
    }

    #[test]
    fn overall_rating_all_rounder_formula() {
        let p = base_player(PlayerRole::AllRounder);
        // 80*0.4 + 40*0.4 + 60*0.1 + 70*0.1 = 32 + 16 + 6 + 7 = 61
        assert_eq!(p.overall_rating(), 61);
    }

    #[test]
    fn bowler_dna_round_trips_through_json() {
        let dna = BowlerDNA::Pacer(PacerDNA {
            speed: 140,
            swing: 55,
            bounce: 60,
            control: 65,
        });
        let json = serde_json::to_string(&dna).unwrap();
        let back: BowlerDNA = serde_json::from_str(&json).unwrap();
        assert_eq!(dna, back);

        let dna2 = BowlerDNA::Spinner(SpinnerDNA {
            turn: 70,
            flight: 50,
            variation: 40,
            control: 60,
        });
        let json2 = serde_json::to_string(&dna2).unwrap();
        let back2: BowlerDNA = serde_json::from_str(&json2).unwrap();
        assert_eq!(dna2, back2);
    }

    #[test]
    fn pacer_speed_factor_clamped() {
        let slow = PacerDNA { speed: 120, swing: 0, bounce: 0, control: 0 };
        assert_eq!(slow.speed_factor(), 12.5);
        let fast = PacerDNA { speed: 155, swing: 0, bounce: 0, control: 0 };
        assert_eq!(fast.speed_factor(), 100.0);
    }
}
