// Delivery catalogue: seven pacer deliveries and five spinner deliveries,
// each with a bowler-weight map, a batter-weight map, an execution
// difficulty, and a dismissal-type distribution. Grounded on
// engine/deliveries.py; weight tables recovered in SPEC_FULL.md 4.3.

use crate::model::player::BowlerDNA;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissalKind {
    Bowled,
    Lbw,
    Caught,
    CaughtBehind,
    Stumped,
    HitWicket,
    /// Resolves as a `Caught` dismissal once applied; kept distinct only
    /// for commentary flavor (SPEC_FULL.md 4.3).
    TopEdge,
}

impl DismissalKind {
    pub fn resolved(self) -> DismissalKind {
        match self {
            DismissalKind::TopEdge => DismissalKind::Caught,
            other => other,
        }
    }
}

pub struct Delivery {
    pub name: &'static str,
    pub bowler_weights: &'static [(&'static str, f64)],
    pub batter_weights: &'static [(&'static str, f64)],
    pub exec_difficulty: i32,
    pub dismissal_weights: &'static [(DismissalKind, f64)],
    pub targets_stat: &'static str,
}

pub const PACER_DELIVERIES: &[Delivery] = &[
    Delivery {
        name: "good_length",
        bowler_weights: &[("control", 0.4), ("swing", 0.3), ("speed_factor", 0.3)],
        batter_weights: &[("vs_pace", 0.7), ("off_side", 0.3)],
        exec_difficulty: 30,
        dismissal_weights: &[
            (DismissalKind::Bowled, 0.25),
            (DismissalKind::Lbw, 0.20),
            (DismissalKind::Caught, 0.35),
            (DismissalKind::CaughtBehind, 0.20),
        ],
        targets_stat: "vs_pace",
    },
    Delivery {
        name: "outswinger",
        bowler_weights: &[("swing", 0.6), ("control", 0.4)],
        batter_weights: &[("vs_pace", 0.6), ("off_side", 0.4)],
        exec_difficulty: 42,
        dismissal_weights: &[
            (DismissalKind::CaughtBehind, 0.40),
            (DismissalKind::Caught, 0.30),
            (DismissalKind::Bowled, 0.20),
            (DismissalKind::Lbw, 0.10),
        ],
        targets_stat: "vs_pace",
    },
    Delivery {
        name: "inswinger",
        bowler_weights: &[("swing", 0.6), ("control", 0.4)],
        batter_weights: &[("vs_pace", 0.5), ("leg_side", 0.5)],
        exec_difficulty: 45,
        dismissal_weights: &[
            (DismissalKind::Lbw, 0.40),
            (DismissalKind::Bowled, 0.40),
            (DismissalKind::Caught, 0.15),
            (DismissalKind::CaughtBehind, 0.05),
        ],
        targets_stat: "vs_pace",
    },
    Delivery {
        name: "bouncer",
        bowler_weights: &[("bounce", 0.5), ("speed_factor", 0.5)],
        batter_weights: &[("vs_bounce", 0.6), ("leg_side", 0.4)],
        exec_difficulty: 38,
        dismissal_weights: &[
            (DismissalKind::Caught, 0.55),
            (DismissalKind::TopEdge, 0.25),
            (DismissalKind::Bowled, 0.10),
            (DismissalKind::HitWicket, 0.10),
        ],
        targets_stat: "vs_bounce",
    },
    Delivery {
        name: "yorker",
        bowler_weights: &[("control", 0.7), ("speed_factor", 0.3)],
        batter_weights: &[("vs_pace", 0.3), ("power", 0.3), ("leg_side", 0.4)],
        exec_difficulty: 58,
        dismissal_weights: &[
            (DismissalKind::Bowled, 0.50),
            (DismissalKind::Lbw, 0.35),
            (DismissalKind::Caught, 0.15),
        ],
        targets_stat: "vs_pace",
    },
    Delivery {
        name: "slower_ball",
        bowler_weights: &[("control", 0.5), ("speed_factor", 0.5)],
        batter_weights: &[("vs_deception", 0.7), ("power", 0.3)],
        exec_difficulty: 48,
        dismissal_weights: &[
            (DismissalKind::Caught, 0.55),
            (DismissalKind::Bowled, 0.25),
            (DismissalKind::Lbw, 0.20),
        ],
        targets_stat: "vs_deception",
    },
    Delivery {
        name: "wide_yorker",
        bowler_weights: &[("control", 0.7), ("speed_factor", 0.3)],
        batter_weights: &[("vs_pace", 0.3), ("off_side", 0.7)],
        exec_difficulty: 55,
        dismissal_weights: &[
            (DismissalKind::Bowled, 0.40),
            (DismissalKind::CaughtBehind, 0.35),
            (DismissalKind::Caught, 0.25),
        ],
        targets_stat: "off_side",
    },
];

pub const SPINNER_DELIVERIES: &[Delivery] = &[
    Delivery {
        name: "stock_ball",
        bowler_weights: &[("turn", 0.5), ("control", 0.5)],
        batter_weights: &[("vs_spin", 0.7), ("off_side", 0.3)],
        exec_difficulty: 28,
        dismissal_weights: &[
            (DismissalKind::Bowled, 0.25),
            (DismissalKind::Stumped, 0.25),
            (DismissalKind::Caught, 0.25),
            (DismissalKind::Lbw, 0.15),
            (DismissalKind::CaughtBehind, 0.10),
        ],
        targets_stat: "vs_spin",
    },
    Delivery {
        name: "flighted",
        bowler_weights: &[("flight", 0.6), ("turn", 0.4)],
        batter_weights: &[("vs_spin", 0.4), ("vs_deception", 0.3), ("power", 0.3)],
        exec_difficulty: 40,
        dismissal_weights: &[
            (DismissalKind::Stumped, 0.35),
            (DismissalKind::Caught, 0.35),
            (DismissalKind::Bowled, 0.15),
            (DismissalKind::Lbw, 0.15),
        ],
        targets_stat: "vs_deception",
    },
    Delivery {
        name: "arm_ball",
        bowler_weights: &[("variation", 0.7), ("control", 0.3)],
        batter_weights: &[("vs_deception", 0.8), ("vs_spin", 0.2)],
        exec_difficulty: 52,
        dismissal_weights: &[
            (DismissalKind::Bowled, 0.40),
            (DismissalKind::Lbw, 0.30),
            (DismissalKind::Stumped, 0.15),
            (DismissalKind::Caught, 0.15),
        ],
        targets_stat: "vs_deception",
    },
    Delivery {
        name: "flat_quick",
        bowler_weights: &[("control", 0.7), ("turn", 0.3)],
        batter_weights: &[("power", 0.5), ("vs_spin", 0.5)],
        exec_difficulty: 32,
        dismissal_weights: &[
            (DismissalKind::Caught, 0.40),
            (DismissalKind::Bowled, 0.30),
            (DismissalKind::Lbw, 0.20),
            (DismissalKind::Stumped, 0.10),
        ],
        targets_stat: "vs_spin",
    },
    Delivery {
        name: "wide_of_off",
        bowler_weights: &[("control", 0.6), ("turn", 0.4)],
        batter_weights: &[("off_side", 0.6), ("vs_spin", 0.4)],
        exec_difficulty: 38,
        dismissal_weights: &[
            (DismissalKind::Caught, 0.35),
            (DismissalKind::Stumped, 0.30),
            (DismissalKind::CaughtBehind, 0.25),
            (DismissalKind::Bowled, 0.10),
        ],
        targets_stat: "off_side",
    },
];

/// Filters a bowler's type catalogue down to deliveries its DNA thresholds
/// unlock. `good_length`/`slower_ball` (pacer) and `stock_ball`/`flat_quick`
/// (spinner) are always available.
pub fn repertoire(dna: &BowlerDNA) -> Vec<&'static Delivery> {
    match dna {
        BowlerDNA::Pacer(p) => PACER_DELIVERIES
            .iter()
            .filter(|d| match d.name {
                "outswinger" | "inswinger" => p.swing >= 40,
                "bouncer" => p.bounce >= 45,
                "yorker" | "wide_yorker" => p.control >= 50,
                _ => true,
            })
            .collect(),
        BowlerDNA::Spinner(s) => SPINNER_DELIVERIES
            .iter()
            .filter(|d| match d.name {
                "flighted" => s.flight >= 45,
                "arm_ball" => s.variation >= 45,
                "wide_of_off" => s.control >= 45,
                _ => true,
            })
            .collect(),
    }
}

pub fn find(name: &str) -> Option<&'static Delivery> {
    PACER_DELIVERIES
        .iter()
        .chain(SPINNER_DELIVERIES.iter())
        .find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::player::{PacerDNA, SpinnerDNA};

    #[test]
    fn weak_swing_pacer_has_no_outswinger() {
        let dna = BowlerDNA::Pacer(PacerDNA { speed: 135, swing: 20, bounce: 30, control: 60 });
        let rep = repertoire(&dna);
        assert!(rep.iter().any(|d| d.name == "good_length"));
        assert!(!rep.iter().any(|d| d.name == "outswinger"));
    }

    #[test]
    fn strong_variation_spinner_has_arm_ball() {
        let dna = BowlerDNA::Spinner(SpinnerDNA { turn: 50, flight: 50, variation: 60, control: 60 });
        let rep = repertoire(&dna);
        assert!(rep.iter().any(|d| d.name == "arm_ball"));
    }

    #[test]
    fn top_edge_resolves_to_caught() {
        assert_eq!(DismissalKind::TopEdge.resolved(), DismissalKind::Caught);
        assert_eq!(DismissalKind::Bowled.resolved(), DismissalKind::Bowled);
    }
}
