// Player pool generation: tiers, nationality splits, role/trait weighting,
// and DNA synthesis. Grounded on generators/player_generator.py; name pools
// replace that source's Faker locales with small static lists since this
// crate carries no name-generation dependency.

use rand::Rng;

use crate::model::player::{
    BatterDNA, BattingIntent, BattingStyle, BowlerDNA, BowlingType, PacerDNA, Player, PlayerRole,
    PlayerTrait, SpinnerDNA,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Elite,
    Star,
    Good,
    Solid,
}

impl Tier {
    fn label(self) -> &'static str {
        match self {
            Tier::Elite => "elite",
            Tier::Star => "star",
            Tier::Good => "good",
            Tier::Solid => "solid",
        }
    }
}

struct Nationality {
    name: &'static str,
    is_overseas: bool,
    weight: u32,
}

const NATIONALITIES: [Nationality; 7] = [
    Nationality { name: "India", is_overseas: false, weight: 60 },
    Nationality { name: "Australia", is_overseas: true, weight: 10 },
    Nationality { name: "England", is_overseas: true, weight: 8 },
    Nationality { name: "South Africa", is_overseas: true, weight: 7 },
    Nationality { name: "New Zealand", is_overseas: true, weight: 5 },
    Nationality { name: "West Indies", is_overseas: true, weight: 5 },
    Nationality { name: "Other", is_overseas: true, weight: 5 },
];

const ROLE_WEIGHTS: [(PlayerRole, u32); 4] = [
    (PlayerRole::Batsman, 30),
    (PlayerRole::Bowler, 35),
    (PlayerRole::AllRounder, 20),
    (PlayerRole::WicketKeeper, 15),
];

const BOWLER_BOWLING_TYPES: [(BowlingType, u32); 5] = [
    (BowlingType::Pace, 40),
    (BowlingType::Medium, 15),
    (BowlingType::OffSpin, 20),
    (BowlingType::LegSpin, 15),
    (BowlingType::LeftArmSpin, 10),
];

const ALL_ROUNDER_BOWLING_TYPES: [(BowlingType, u32); 5] = [
    (BowlingType::Pace, 30),
    (BowlingType::Medium, 25),
    (BowlingType::OffSpin, 25),
    (BowlingType::LegSpin, 10),
    (BowlingType::LeftArmSpin, 10),
];

const BATTING_INTENT_WEIGHTS: [(BattingIntent, u32); 4] = [
    (BattingIntent::Accumulator, 50),
    (BattingIntent::Anchor, 25),
    (BattingIntent::Aggressive, 18),
    (BattingIntent::PowerHitter, 7),
];

fn trait_count_weights(tier: Tier) -> [u32; 3] {
    match tier {
        Tier::Elite => [35, 50, 15],
        Tier::Star => [50, 40, 10],
        Tier::Good => [60, 33, 7],
        Tier::Solid => [70, 27, 3],
    }
}

fn choker_reduction(tier: Tier) -> f64 {
    match tier {
        Tier::Elite => 0.10,
        Tier::Star => 0.35,
        Tier::Good => 0.65,
        Tier::Solid => 1.0,
    }
}

fn role_trait_weights(role: PlayerRole) -> Vec<(PlayerTrait, u32)> {
    match role {
        PlayerRole::Batsman => vec![
            (PlayerTrait::Clutch, 8),
            (PlayerTrait::Finisher, 10),
            (PlayerTrait::Choker, 35),
        ],
        PlayerRole::Bowler => vec![
            (PlayerTrait::Clutch, 8),
            (PlayerTrait::PartnershipBreaker, 15),
            (PlayerTrait::Choker, 35),
        ],
        PlayerRole::AllRounder => vec![
            (PlayerTrait::Clutch, 8),
            (PlayerTrait::Finisher, 10),
            (PlayerTrait::PartnershipBreaker, 12),
            (PlayerTrait::Choker, 30),
        ],
        PlayerRole::WicketKeeper => vec![
            (PlayerTrait::Clutch, 8),
            (PlayerTrait::BucketHands, 28),
            (PlayerTrait::Choker, 30),
        ],
    }
}

const FIRST_NAMES: &[&str] = &[
    "Arjun", "Rohan", "Vikram", "Aditya", "Karan", "Suresh", "Rahul", "Sanjay", "Nikhil", "Varun",
    "James", "Oliver", "Jack", "Harry", "George", "Liam", "Noah", "Ethan", "Lucas", "Mason",
    "Riley", "Cooper", "Blake", "Hayden", "Connor", "Kyle", "Shane", "Dean", "Brett", "Scott",
];

const LAST_NAMES: &[&str] = &[
    "Sharma", "Kumar", "Patel", "Singh", "Rao", "Iyer", "Gupta", "Nair", "Reddy", "Mehta",
    "Smith", "Taylor", "Brown", "Wilson", "Anderson", "Clarke", "Walker", "Hughes", "Robinson",
    "Bennett", "Morgan", "Phillips", "Campbell", "Mitchell", "Edwards", "Cook", "Gray", "Foster",
];

/// Draws a single item from a weighted `(item, weight)` list.
fn weighted_choice<T: Copy>(rng: &mut impl Rng, choices: &[(T, u32)]) -> T {
    let total: u32 = choices.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (item, weight) in choices {
        if roll < *weight {
            return *item;
        }
        roll -= weight;
    }
    choices[0].0
}

fn generate_attribute(rng: &mut impl Rng, base: i32, variance: i32, minimum: i32) -> i32 {
    let value = base + rng.gen_range(-variance..=variance);
    value.clamp(minimum, 100)
}

pub struct PlayerGenerator;

impl PlayerGenerator {
    fn random_overseas_nationality(rng: &mut impl Rng) -> &'static Nationality {
        let overseas: Vec<&Nationality> = NATIONALITIES.iter().filter(|n| n.is_overseas).collect();
        let total: u32 = overseas.iter().map(|n| n.weight).sum();
        let mut roll = rng.gen_range(0..total);
        for n in &overseas {
            if roll < n.weight {
                return n;
            }
            roll -= n.weight;
        }
        overseas[0]
    }

    fn determine_batting_intent(rng: &mut impl Rng, power: i32, technique: i32, role: PlayerRole) -> BattingIntent {
        if role == PlayerRole::Bowler {
            return BattingIntent::Accumulator;
        }
        let selected = weighted_choice(rng, &BATTING_INTENT_WEIGHTS);
        match selected {
            BattingIntent::PowerHitter if power < 55 => BattingIntent::Aggressive,
            BattingIntent::Anchor if technique < 45 => BattingIntent::Accumulator,
            other => other,
        }
    }

    fn assign_traits(rng: &mut impl Rng, role: PlayerRole, tier: Tier) -> Vec<PlayerTrait> {
        let count_weights = trait_count_weights(tier);
        let num_traits = weighted_choice(rng, &[(0u8, count_weights[0]), (1, count_weights[1]), (2, count_weights[2])]);
        if num_traits == 0 {
            return vec![];
        }

        let mult = choker_reduction(tier);
        let mut pool: Vec<(PlayerTrait, u32)> = role_trait_weights(role)
            .into_iter()
            .map(|(t, w)| {
                if t == PlayerTrait::Choker {
                    (t, ((w as f64) * mult) as u32)
                } else {
                    (t, w)
                }
            })
            .filter(|(_, w)| *w > 0)
            .collect();

        let mut traits = Vec::new();
        for _ in 0..num_traits {
            if pool.is_empty() {
                break;
            }
            let picked = weighted_choice(rng, &pool);
            traits.push(picked);
            pool.retain(|(t, _)| *t != picked);
        }
        traits
    }

    fn generate_name(rng: &mut impl Rng) -> String {
        let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
        format!("{first} {last}")
    }

    /// Generates a forced 1-2 weaknesses list: random stat names reduced by
    /// 15-25 points, matching the distilled spec's DNA generation rule.
    fn generate_batter_dna(rng: &mut impl Rng, base: i32) -> BatterDNA {
        let mut stats = [
            ("vs_pace", generate_attribute(rng, base, 15, 10)),
            ("vs_bounce", generate_attribute(rng, base, 15, 10)),
            ("vs_spin", generate_attribute(rng, base, 15, 10)),
            ("vs_deception", generate_attribute(rng, base, 15, 10)),
            ("off_side", generate_attribute(rng, base, 15, 10)),
            ("leg_side", generate_attribute(rng, base, 15, 10)),
        ];

        let num_weaknesses = rng.gen_range(1..=2);
        let mut indices: Vec<usize> = (0..stats.len()).collect();
        let mut weaknesses = Vec::new();
        for _ in 0..num_weaknesses {
            if indices.is_empty() {
                break;
            }
            let pick = rng.gen_range(0..indices.len());
            let idx = indices.remove(pick);
            let reduction = rng.gen_range(15..=25);
            stats[idx].1 = (stats[idx].1 - reduction).max(1);
            weaknesses.push(stats[idx].0.to_string());
        }

        BatterDNA {
            vs_pace: stats[0].1,
            vs_bounce: stats[1].1,
            vs_spin: stats[2].1,
            vs_deception: stats[3].1,
            off_side: stats[4].1,
            leg_side: stats[5].1,
            power: generate_attribute(rng, base, 15, 10),
            weaknesses,
        }
    }

    fn generate_bowler_dna(rng: &mut impl Rng, bowling_type: BowlingType, base: i32) -> Option<BowlerDNA> {
        if bowling_type.is_pace_family() {
            let speed = generate_attribute(rng, 130 + (base - 60).max(0) / 3, 10, 120).clamp(120, 155);
            Some(BowlerDNA::Pacer(PacerDNA {
                speed,
                swing: generate_attribute(rng, base, 15, 10),
                bounce: generate_attribute(rng, base, 15, 10),
                control: generate_attribute(rng, base, 12, 10),
            }))
        } else if bowling_type.is_spin_family() {
            Some(BowlerDNA::Spinner(SpinnerDNA {
                turn: generate_attribute(rng, base, 15, 10),
                flight: generate_attribute(rng, base, 15, 10),
                variation: generate_attribute(rng, base, 15, 10),
                control: generate_attribute(rng, base, 12, 10),
            }))
        } else {
            None
        }
    }

    fn ensure_minimum_ovr(player: &mut Player, min_ovr: i32) {
        // A bounded retry loop: each boost strictly increases the relevant
        // attribute or the attribute is already at the 100 ceiling, so this
        // always terminates.
        while player.overall_rating() < min_ovr {
            let diff = min_ovr - player.overall_rating() + 2;
            match player.role {
                PlayerRole::Batsman => player.batting = (player.batting + diff).min(100),
                PlayerRole::Bowler => player.bowling = (player.bowling + diff).min(100),
                PlayerRole::AllRounder => {
                    let boost = diff / 2 + 1;
                    player.batting = (player.batting + boost).min(100);
                    player.bowling = (player.bowling + boost).min(100);
                }
                PlayerRole::WicketKeeper => {
                    let boost_bat = (diff * 5) / 9 + 1;
                    let boost_field = (diff * 4) / 9 + 1;
                    player.batting = (player.batting + boost_bat).min(100);
                    player.fielding = (player.fielding + boost_field).min(100);
                }
            }
            if player.batting >= 100 && player.bowling >= 100 && player.fielding >= 100 {
                break;
            }
        }
    }

    pub fn generate_player(rng: &mut impl Rng, tier: Tier, nationality: Option<&'static str>) -> Player {
        let nat = match nationality {
            Some(name) => NATIONALITIES.iter().find(|n| n.name == name).unwrap_or(&NATIONALITIES[0]),
            None => weighted_choice(rng, &NATIONALITIES.iter().map(|n| (n, n.weight)).collect::<Vec<_>>()),
        };

        let role = weighted_choice(rng, &ROLE_WEIGHTS);
        let batting_style = if rng.gen_range(0..100) < 70 {
            BattingStyle::RightHanded
        } else {
            BattingStyle::LeftHanded
        };

        let bowling_type = match role {
            PlayerRole::Bowler => weighted_choice(rng, &BOWLER_BOWLING_TYPES),
            PlayerRole::AllRounder => weighted_choice(rng, &ALL_ROUNDER_BOWLING_TYPES),
            _ => {
                const PART_TIME: [BowlingType; 4] = [
                    BowlingType::Medium,
                    BowlingType::OffSpin,
                    BowlingType::LegSpin,
                    BowlingType::LeftArmSpin,
                ];
                PART_TIME[rng.gen_range(0..PART_TIME.len())]
            }
        };

        let base = match tier {
            Tier::Elite => rng.gen_range(80..=90),
            Tier::Star => rng.gen_range(70..=80),
            Tier::Good => rng.gen_range(62..=72),
            Tier::Solid => rng.gen_range(58..=65),
        };

        let (batting, bowling, power, technique) = match role {
            PlayerRole::Batsman => (
                generate_attribute(rng, base + 10, 10, 1),
                generate_attribute(rng, 20, 10, 1),
                generate_attribute(rng, base, 15, 1),
                generate_attribute(rng, base, 15, 1),
            ),
            PlayerRole::Bowler => (
                generate_attribute(rng, 30, 15, 1),
                generate_attribute(rng, base + 10, 10, 1),
                generate_attribute(rng, 30, 10, 1),
                generate_attribute(rng, 30, 10, 1),
            ),
            PlayerRole::AllRounder => (
                generate_attribute(rng, base, 12, 1),
                generate_attribute(rng, base, 12, 1),
                generate_attribute(rng, base - 5, 15, 1),
                generate_attribute(rng, base - 5, 15, 1),
            ),
            PlayerRole::WicketKeeper => (
                generate_attribute(rng, base, 12, 1),
                generate_attribute(rng, 15, 10, 1),
                generate_attribute(rng, base - 10, 15, 1),
                generate_attribute(rng, base + 5, 10, 1),
            ),
        };

        let fielding_base = if role == PlayerRole::WicketKeeper { base + 15 } else { base };
        let fielding = generate_attribute(rng, fielding_base, 15, 1);
        let fitness = generate_attribute(rng, base, 15, 1);
        let running = generate_attribute(rng, base, 15, 1);
        let temperament = generate_attribute(rng, base, 20, 1);
        let consistency = generate_attribute(rng, base, 15, 1);

        let (pace_or_spin, accuracy, variation) = if matches!(role, PlayerRole::Bowler | PlayerRole::AllRounder) {
            (
                generate_attribute(rng, base + 5, 15, 1),
                generate_attribute(rng, base, 15, 1),
                generate_attribute(rng, base - 5, 15, 1),
            )
        } else {
            (
                generate_attribute(rng, 20, 10, 1),
                generate_attribute(rng, 20, 10, 1),
                generate_attribute(rng, 15, 10, 1),
            )
        };

        let age = match tier {
            Tier::Elite => rng.gen_range(27..=34),
            Tier::Star => rng.gen_range(25..=33),
            Tier::Good => rng.gen_range(23..=31),
            Tier::Solid => rng.gen_range(21..=29),
        };

        let traits = Self::assign_traits(rng, role, tier);
        let batting_intent = Self::determine_batting_intent(rng, power, technique, role);

        let base_price = match tier {
            Tier::Elite => rng.gen_range(15_000_000..=25_000_000),
            Tier::Star => rng.gen_range(10_000_000..=15_000_000),
            Tier::Good => rng.gen_range(5_000_000..=10_000_000),
            Tier::Solid => rng.gen_range(2_000_000..=5_000_000),
        };

        let batter_dna = Self::generate_batter_dna(rng, base);
        let bowler_dna = Self::generate_bowler_dna(rng, bowling_type, base);

        // Narrow starting form: uniform(0.9, 1.1), two decimal places.
        let form = (rng.gen_range(900..=1100) as f64) / 1000.0;

        let mut player = Player {
            id: 0,
            name: Self::generate_name(rng),
            age,
            nationality: nat.name.to_string(),
            is_overseas: nat.is_overseas,
            role,
            batting_style,
            bowling_type,
            batting,
            bowling,
            fielding,
            fitness,
            power,
            technique,
            running,
            pace_or_spin,
            accuracy,
            variation,
            temperament,
            consistency,
            form,
            traits,
            batting_intent,
            batter_dna,
            bowler_dna,
            base_price,
            sold_price: None,
            team_id: None,
        };

        Self::ensure_minimum_ovr(&mut player, 55);
        player
    }

    /// Generates the fixed 230-player pool: 20 elite (8/12), 40 star
    /// (18/22), 80 good (50/30), 90 solid (74/16), split Indian/overseas.
    /// The `count` parameter from the original generator is intentionally
    /// ignored; this pool is always exactly 230 players.
    pub fn generate_player_pool(rng: &mut impl Rng) -> Vec<Player> {
        let plan: [(Tier, u32, u32); 4] = [
            (Tier::Elite, 8, 12),
            (Tier::Star, 18, 22),
            (Tier::Good, 50, 30),
            (Tier::Solid, 74, 16),
        ];

        let mut players = Vec::with_capacity(230);
        for (tier, indian, overseas) in plan {
            for _ in 0..indian {
                players.push(Self::generate_player(rng, tier, Some("India")));
            }
            for _ in 0..overseas {
                let nat = Self::random_overseas_nationality(rng);
                players.push(Self::generate_player(rng, tier, Some(nat.name)));
            }
        }
        players
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn generated_pool_has_230_players_with_minimum_ovr() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let players = PlayerGenerator::generate_player_pool(&mut rng);
        assert_eq!(players.len(), 230);
        for p in &players {
            assert!(p.overall_rating() >= 55, "player {} has OVR {}", p.name, p.overall_rating());
        }
    }

    #[test]
    fn pool_nationality_split_matches_plan() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let players = PlayerGenerator::generate_player_pool(&mut rng);
        let indian = players.iter().filter(|p| p.nationality == "India").count();
        let overseas = players.iter().filter(|p| p.is_overseas).count();
        assert_eq!(indian, 150);
        assert_eq!(overseas, 80);
    }

    #[test]
    fn batter_dna_carries_one_or_two_weaknesses() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let dna = PlayerGenerator::generate_batter_dna(&mut rng, 70);
            assert!(dna.weaknesses.len() == 1 || dna.weaknesses.len() == 2);
        }
    }

    #[test]
    fn pacer_speed_stays_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            if let Some(BowlerDNA::Pacer(p)) =
                PlayerGenerator::generate_bowler_dna(&mut rng, BowlingType::Pace, 70)
            {
                assert!((120..=155).contains(&p.speed));
            }
        }
    }
}
