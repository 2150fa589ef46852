pub mod engine;

pub use engine::{LeagueStanding, MatchResultSummary, SeasonEngine};
