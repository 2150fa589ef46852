// Career/Season/Fixture and per-season stat rows.

use serde::{Deserialize, Serialize};

use super::team::TeamId;

pub type CareerId = u64;
pub type SeasonId = u64;
pub type FixtureId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareerStatus {
    Setup,
    PreAuction,
    Auction,
    PreSeason,
    InSeason,
    Playoffs,
    PostSeason,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Career {
    pub id: CareerId,
    pub name: String,
    pub status: CareerStatus,
    pub current_season_number: i32,
    pub user_team_id: Option<TeamId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonPhase {
    NotStarted,
    Auction,
    LeagueStage,
    Playoffs,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub career_id: CareerId,
    pub season_number: i32,
    pub phase: SeasonPhase,
    pub auction_completed: bool,
    pub current_match_number: i32,
    pub total_league_matches: i32,
    pub champion_team_id: Option<TeamId>,
    pub runner_up_team_id: Option<TeamId>,
}

impl Season {
    pub fn new(id: SeasonId, career_id: CareerId, season_number: i32) -> Self {
        Season {
            id,
            career_id,
            season_number,
            phase: SeasonPhase::NotStarted,
            auction_completed: false,
            current_match_number: 0,
            total_league_matches: 56,
            champion_team_id: None,
            runner_up_team_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixtureType {
    League,
    Qualifier1,
    Eliminator,
    Qualifier2,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixtureStatus {
    Scheduled,
    InProgress,
    Completed,
    Abandoned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub season_id: SeasonId,
    pub match_number: i32,
    pub fixture_type: FixtureType,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub venue: String,
    pub status: FixtureStatus,
    pub match_id: Option<u64>,
    pub winner_id: Option<TeamId>,
    pub result_summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamSeasonStats {
    pub season_id: SeasonId,
    pub team_id: TeamId,
    pub matches_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub no_results: i32,
    pub points: i32,
    pub runs_scored: i64,
    pub overs_faced: f64,
    pub runs_conceded: i64,
    pub overs_bowled: f64,
}

impl TeamSeasonStats {
    pub fn new(season_id: SeasonId, team_id: TeamId) -> Self {
        TeamSeasonStats {
            season_id,
            team_id,
            ..Default::default()
        }
    }

    /// (runs scored / overs faced) - (runs conceded / overs bowled).
    pub fn net_run_rate(&self) -> f64 {
        if self.overs_faced == 0.0 || self.overs_bowled == 0.0 {
            return 0.0;
        }
        let scoring_rate = self.runs_scored as f64 / self.overs_faced;
        let conceding_rate = self.runs_conceded as f64 / self.overs_bowled;
        ((scoring_rate - conceding_rate) * 1000.0).round() / 1000.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerSeasonStats {
    pub season_id: SeasonId,
    pub player_id: super::player::PlayerId,
    pub team_id: TeamId,

    pub matches_batted: i32,
    pub runs: i64,
    pub balls_faced: i64,
    pub fours: i32,
    pub sixes: i32,
    pub highest_score: i32,
    pub not_outs: i32,

    pub matches_bowled: i32,
    pub wickets: i32,
    pub overs_bowled: f64,
    pub runs_conceded: i64,
    pub best_bowling_wickets: i32,
    pub best_bowling_runs: i32,

    pub catches: i32,
    pub stumpings: i32,
    pub run_outs: i32,
}

impl PlayerSeasonStats {
    pub fn batting_average(&self) -> f64 {
        let dismissals = self.matches_batted - self.not_outs;
        if dismissals <= 0 {
            return if self.runs > 0 { self.runs as f64 } else { 0.0 };
        }
        (self.runs as f64 / dismissals as f64 * 100.0).round() / 100.0
    }

    pub fn strike_rate(&self) -> f64 {
        if self.balls_faced == 0 {
            return 0.0;
        }
        ((self.runs as f64 / self.balls_faced as f64) * 100.0 * 100.0).round() / 100.0
    }

    pub fn bowling_average(&self) -> f64 {
        if self.wickets == 0 {
            return 0.0;
        }
        (self.runs_conceded as f64 / self.wickets as f64 * 100.0).round() / 100.0
    }

    pub fn economy_rate(&self) -> f64 {
        if self.overs_bowled == 0.0 {
            return 0.0;
        }
        (self.runs_conceded as f64 / self.overs_bowled * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_run_rate_zero_when_no_overs() {
        let stats = TeamSeasonStats::new(1, 1);
        assert_eq!(stats.net_run_rate(), 0.0);
    }

    #[test]
    fn net_run_rate_matches_formula() {
        let mut stats = TeamSeasonStats::new(1, 1);
        stats.runs_scored = 180;
        stats.overs_faced = 20.0;
        stats.runs_conceded = 150;
        stats.overs_bowled = 20.0;
        assert_eq!(stats.net_run_rate(), 1.5);
    }
}
