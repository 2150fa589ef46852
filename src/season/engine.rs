// Fixture scheduling, league standings, and the four-stage playoff bracket.
// Grounded on original_source's season_engine.py; fixture generation keeps
// its shuffle-then-greedy-gap-balance approach, standings its (points, nrr)
// sort, and the bracket its Q1/Eliminator/Q2/Final shape.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::career::{
    Fixture, FixtureId, FixtureStatus, FixtureType, Season, SeasonPhase, TeamSeasonStats,
};
use crate::model::player::{Player, PlayerRole};
use crate::model::team::{Team, TeamId};

#[derive(Debug, Clone)]
pub struct LeagueStanding {
    pub position: i32,
    pub team_id: TeamId,
    pub played: i32,
    pub won: i32,
    pub lost: i32,
    pub no_result: i32,
    pub points: i32,
    pub nrr: f64,
}

#[derive(Debug, Clone)]
pub struct MatchResultSummary {
    pub fixture_id: FixtureId,
    pub winner_team_id: Option<TeamId>,
    pub margin: String,
}

pub struct SeasonEngine {
    season: Season,
    teams: HashMap<TeamId, Team>,
    fixtures: Vec<Fixture>,
    stats: HashMap<TeamId, TeamSeasonStats>,
    next_fixture_id: FixtureId,
}

impl SeasonEngine {
    pub fn new(season: Season, teams: Vec<Team>) -> Self {
        let stats = teams
            .iter()
            .map(|t| (t.id, TeamSeasonStats::new(season.id, t.id)))
            .collect();
        let teams = teams.into_iter().map(|t| (t.id, t)).collect();
        SeasonEngine {
            season,
            teams,
            fixtures: Vec::new(),
            stats,
            next_fixture_id: 1,
        }
    }

    pub fn season(&self) -> &Season {
        &self.season
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Every unordered pair plays twice (home and away): 8 teams -> 56
    /// matches. Matchups are shuffled, then repeatedly the pair with the
    /// largest combined gap-since-last-played is scheduled next, so no team
    /// is forced into too many consecutive fixtures.
    pub fn generate_league_fixtures(&mut self, rng: &mut impl Rng) {
        let team_ids: Vec<TeamId> = self.teams.keys().copied().collect();
        let mut matchups: Vec<(TeamId, TeamId)> = Vec::new();
        for (i, &t1) in team_ids.iter().enumerate() {
            for &t2 in &team_ids[i + 1..] {
                matchups.push((t1, t2));
                matchups.push((t2, t1));
            }
        }
        matchups.shuffle(rng);

        let mut last_played: HashMap<TeamId, i32> = team_ids.iter().map(|&id| (id, -3)).collect();
        let mut match_number = 1;
        let mut remaining = matchups;

        while !remaining.is_empty() {
            let mut best_idx = 0;
            let mut best_score = -1;
            for (idx, &(t1, t2)) in remaining.iter().enumerate() {
                let gap1 = match_number - last_played[&t1];
                let gap2 = match_number - last_played[&t2];
                let min_gap = gap1.min(gap2);
                if min_gap > best_score {
                    best_score = min_gap;
                    best_idx = idx;
                }
            }

            let (team1_id, team2_id) = remaining.remove(best_idx);
            let venue = self
                .teams
                .get(&team1_id)
                .map(|t| t.home_ground.clone())
                .unwrap_or_default();

            self.fixtures.push(Fixture {
                id: self.next_fixture_id,
                season_id: self.season.id,
                match_number,
                fixture_type: FixtureType::League,
                team1_id,
                team2_id,
                venue,
                status: FixtureStatus::Scheduled,
                match_id: None,
                winner_id: None,
                result_summary: None,
            });
            self.next_fixture_id += 1;

            last_played.insert(team1_id, match_number);
            last_played.insert(team2_id, match_number);
            match_number += 1;
        }

        self.season.total_league_matches = self.fixtures.len() as i32;
        self.season.phase = SeasonPhase::LeagueStage;
    }

    pub fn standings(&self) -> Vec<LeagueStanding> {
        let mut rows: Vec<&TeamSeasonStats> = self.stats.values().collect();
        rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(b.net_run_rate().partial_cmp(&a.net_run_rate()).unwrap())
        });
        rows.into_iter()
            .enumerate()
            .map(|(i, s)| LeagueStanding {
                position: i as i32 + 1,
                team_id: s.team_id,
                played: s.matches_played,
                won: s.wins,
                lost: s.losses,
                no_result: s.no_results,
                points: s.points,
                nrr: s.net_run_rate(),
            })
            .collect()
    }

    pub fn next_fixture(&self) -> Option<&Fixture> {
        self.fixtures
            .iter()
            .filter(|f| f.status == FixtureStatus::Scheduled)
            .min_by_key(|f| f.match_number)
    }

    /// Selects up to 11 from a squad: 1 WK, up to 5 batsmen, up to 3
    /// all-rounders, up to 5 bowlers (each group sorted by overall rating),
    /// filling any remaining slots with the best of what's left, capped at
    /// 4 overseas players.
    pub fn select_playing_xi(players: &[Player]) -> Vec<Player> {
        let mut wks: Vec<&Player> = players.iter().filter(|p| p.role == PlayerRole::WicketKeeper).collect();
        let mut bats: Vec<&Player> = players.iter().filter(|p| p.role == PlayerRole::Batsman).collect();
        let mut bowls: Vec<&Player> = players.iter().filter(|p| p.role == PlayerRole::Bowler).collect();
        let mut ars: Vec<&Player> = players.iter().filter(|p| p.role == PlayerRole::AllRounder).collect();
        for group in [&mut wks, &mut bats, &mut bowls, &mut ars] {
            group.sort_by_key(|p| std::cmp::Reverse(p.overall_rating()));
        }

        let mut xi: Vec<&Player> = Vec::with_capacity(11);
        let mut overseas_count = 0;
        let can_add = |p: &Player, overseas_count: &mut i32| -> bool {
            if p.is_overseas {
                if *overseas_count >= 4 {
                    return false;
                }
                *overseas_count += 1;
            }
            true
        };

        if let Some(&wk) = wks.first() {
            if can_add(wk, &mut overseas_count) {
                xi.push(wk);
            }
        }
        for &bat in bats.iter().take(5) {
            if xi.len() < 6 && can_add(bat, &mut overseas_count) {
                xi.push(bat);
            }
        }
        for &ar in ars.iter().take(3) {
            if xi.len() < 9 && can_add(ar, &mut overseas_count) {
                xi.push(ar);
            }
        }
        for &bowl in bowls.iter().take(5) {
            if xi.len() < 11 && can_add(bowl, &mut overseas_count) {
                xi.push(bowl);
            }
        }

        if xi.len() < 11 {
            let chosen_ids: Vec<_> = xi.iter().map(|p| p.id).collect();
            let mut rest: Vec<&Player> = players.iter().filter(|p| !chosen_ids.contains(&p.id)).collect();
            rest.sort_by_key(|p| std::cmp::Reverse(p.overall_rating()));
            for p in rest {
                if xi.len() >= 11 {
                    break;
                }
                if can_add(p, &mut overseas_count) {
                    xi.push(p);
                }
            }
        }

        xi.into_iter().take(11).cloned().collect()
    }

    /// Applies one match's result: points, win/loss tallies, and the NRR
    /// component totals (runs/overs for and against). `batting_first_id` and
    /// `batting_second_id` must be the fixture's two teams in bat order.
    #[allow(clippy::too_many_arguments)]
    pub fn record_match_result(
        &mut self,
        fixture_id: FixtureId,
        winner_team_id: Option<TeamId>,
        margin: String,
        batting_first_id: TeamId,
        batting_second_id: TeamId,
        innings1_runs: i32,
        innings1_overs: f64,
        innings2_runs: i32,
        innings2_overs: f64,
    ) -> Option<MatchResultSummary> {
        let fixture = self.fixtures.iter_mut().find(|f| f.id == fixture_id)?;
        fixture.status = FixtureStatus::Completed;
        fixture.winner_id = winner_team_id;
        fixture.result_summary = Some(margin.clone());
        let (team1_id, team2_id) = (fixture.team1_id, fixture.team2_id);

        for &id in &[team1_id, team2_id] {
            if let Some(s) = self.stats.get_mut(&id) {
                s.matches_played += 1;
            }
        }

        match winner_team_id {
            Some(winner) if winner == team1_id => {
                self.bump(team1_id, |s| {
                    s.wins += 1;
                    s.points += 2;
                });
                self.bump(team2_id, |s| s.losses += 1);
            }
            Some(winner) if winner == team2_id => {
                self.bump(team2_id, |s| {
                    s.wins += 1;
                    s.points += 2;
                });
                self.bump(team1_id, |s| s.losses += 1);
            }
            _ => {
                self.bump(team1_id, |s| {
                    s.no_results += 1;
                    s.points += 1;
                });
                self.bump(team2_id, |s| {
                    s.no_results += 1;
                    s.points += 1;
                });
            }
        }

        self.bump(batting_first_id, |s| {
            s.runs_scored += innings1_runs as i64;
            s.overs_faced += innings1_overs;
            s.runs_conceded += innings2_runs as i64;
            s.overs_bowled += innings2_overs;
        });
        self.bump(batting_second_id, |s| {
            s.runs_scored += innings2_runs as i64;
            s.overs_faced += innings2_overs;
            s.runs_conceded += innings1_runs as i64;
            s.overs_bowled += innings1_overs;
        });

        let match_number = self.fixtures.iter().find(|f| f.id == fixture_id).map(|f| f.match_number);
        if let Some(n) = match_number {
            self.season.current_match_number = n;
        }

        Some(MatchResultSummary { fixture_id, winner_team_id, margin })
    }

    fn bump(&mut self, team_id: TeamId, f: impl FnOnce(&mut TeamSeasonStats)) {
        if let Some(s) = self.stats.get_mut(&team_id) {
            f(s);
        }
    }

    pub fn is_league_complete(&self) -> bool {
        self.fixtures
            .iter()
            .filter(|f| f.fixture_type == FixtureType::League)
            .all(|f| f.status != FixtureStatus::Scheduled)
    }

    fn next_match_number(&self) -> i32 {
        self.fixtures.iter().map(|f| f.match_number).max().unwrap_or(0) + 1
    }

    fn push_fixture(&mut self, fixture_type: FixtureType, team1_id: TeamId, team2_id: TeamId, venue: String) -> FixtureId {
        let id = self.next_fixture_id;
        self.next_fixture_id += 1;
        self.fixtures.push(Fixture {
            id,
            season_id: self.season.id,
            match_number: self.next_match_number(),
            fixture_type,
            team1_id,
            team2_id,
            venue,
            status: FixtureStatus::Scheduled,
            match_id: None,
            winner_id: None,
            result_summary: None,
        });
        id
    }

    /// Qualifier 1 (1st v 2nd) and Eliminator (3rd v 4th) from the final
    /// league standings. Q2 and the Final are generated once those two
    /// results are known.
    pub fn generate_playoffs(&mut self) -> (FixtureId, FixtureId) {
        let top4 = self.standings();
        self.season.phase = SeasonPhase::Playoffs;

        let q1_venue = self.teams.get(&top4[0].team_id).map(|t| t.home_ground.clone()).unwrap_or_default();
        let q1 = self.push_fixture(FixtureType::Qualifier1, top4[0].team_id, top4[1].team_id, q1_venue);

        let elim_venue = self.teams.get(&top4[2].team_id).map(|t| t.home_ground.clone()).unwrap_or_default();
        let eliminator = self.push_fixture(FixtureType::Eliminator, top4[2].team_id, top4[3].team_id, elim_venue);

        (q1, eliminator)
    }

    /// Q1's loser faces the Eliminator's winner, at the Q1 loser's ground.
    pub fn generate_qualifier2(&mut self, q1_loser: TeamId, eliminator_winner: TeamId) -> FixtureId {
        let venue = self.teams.get(&q1_loser).map(|t| t.home_ground.clone()).unwrap_or_default();
        self.push_fixture(FixtureType::Qualifier2, q1_loser, eliminator_winner, venue)
    }

    /// Q1's winner faces Q2's winner, on a neutral ground.
    pub fn generate_final(&mut self, q1_winner: TeamId, q2_winner: TeamId) -> FixtureId {
        self.push_fixture(FixtureType::Final, q1_winner, q2_winner, "Narendra Modi Stadium".to_string())
    }

    pub fn complete_season(&mut self, champion_id: TeamId, runner_up_id: TeamId) {
        self.season.phase = SeasonPhase::Completed;
        self.season.champion_team_id = Some(champion_id);
        self.season.runner_up_team_id = Some(runner_up_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::player::{BatterDNA, BattingIntent, BattingStyle, BowlingType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn team(id: TeamId, name: &str) -> Team {
        Team {
            id,
            career_id: Some(1),
            name: name.to_string(),
            short_name: name.chars().take(2).collect(),
            city: "City".into(),
            home_ground: format!("{name} Ground"),
            primary_color: "#000000".into(),
            secondary_color: "#ffffff".into(),
            budget: 900_000_000,
            remaining_budget: 900_000_000,
            matches_played: 0,
            wins: 0,
            losses: 0,
            no_results: 0,
            points: 0,
            net_run_rate: 0.0,
            is_user_team: false,
        }
    }

    fn engine_with_8_teams() -> SeasonEngine {
        let teams: Vec<Team> = (1..=8).map(|i| team(i, &format!("Team{i}"))).collect();
        let season = Season::new(1, 1, 1);
        SeasonEngine::new(season, teams)
    }

    #[test]
    fn generate_league_fixtures_produces_56_matches_each_team_plays_14() {
        let mut engine = engine_with_8_teams();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        engine.generate_league_fixtures(&mut rng);

        assert_eq!(engine.fixtures().len(), 56);
        let mut appearances: HashMap<TeamId, i32> = HashMap::new();
        for f in engine.fixtures() {
            *appearances.entry(f.team1_id).or_insert(0) += 1;
            *appearances.entry(f.team2_id).or_insert(0) += 1;
        }
        for count in appearances.values() {
            assert_eq!(*count, 14);
        }
    }

    #[test]
    fn standings_sort_by_points_then_nrr() {
        let mut engine = engine_with_8_teams();
        engine.bump(1, |s| {
            s.wins = 2;
            s.points = 4;
            s.runs_scored = 360;
            s.overs_faced = 40.0;
            s.runs_conceded = 300;
            s.overs_bowled = 40.0;
        });
        engine.bump(2, |s| {
            s.wins = 2;
            s.points = 4;
            s.runs_scored = 320;
            s.overs_faced = 40.0;
            s.runs_conceded = 340;
            s.overs_bowled = 40.0;
        });
        let standings = engine.standings();
        assert_eq!(standings[0].team_id, 1);
        assert_eq!(standings[1].team_id, 2);
    }

    #[test]
    fn record_match_result_updates_points_and_nrr_components() {
        let mut engine = engine_with_8_teams();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        engine.generate_league_fixtures(&mut rng);
        let fixture_id = engine.next_fixture().unwrap().id;
        let fixture = engine.fixtures().iter().find(|f| f.id == fixture_id).unwrap().clone();

        let summary = engine
            .record_match_result(
                fixture_id,
                Some(fixture.team1_id),
                "won by 20 runs".into(),
                fixture.team1_id,
                fixture.team2_id,
                180,
                20.0,
                160,
                20.0,
            )
            .unwrap();

        assert_eq!(summary.winner_team_id, Some(fixture.team1_id));
        let standings = engine.standings();
        let winner_row = standings.iter().find(|s| s.team_id == fixture.team1_id).unwrap();
        assert_eq!(winner_row.points, 2);
        assert!(winner_row.nrr > 0.0);
    }

    #[test]
    fn is_league_complete_false_until_all_played() {
        let mut engine = engine_with_8_teams();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        engine.generate_league_fixtures(&mut rng);
        assert!(!engine.is_league_complete());
    }

    #[test]
    fn playoff_bracket_follows_q1_eliminator_q2_final_shape() {
        let mut engine = engine_with_8_teams();
        for (i, team_id) in (1..=8).enumerate() {
            engine.bump(team_id, |s| s.points = (8 - i) as i32 * 2);
        }
        let (q1, eliminator) = engine.generate_playoffs();
        let q1_fixture = engine.fixtures().iter().find(|f| f.id == q1).unwrap().clone();
        let elim_fixture = engine.fixtures().iter().find(|f| f.id == eliminator).unwrap().clone();
        assert_eq!(q1_fixture.team1_id, 1);
        assert_eq!(q1_fixture.team2_id, 2);
        assert_eq!(elim_fixture.team1_id, 3);
        assert_eq!(elim_fixture.team2_id, 4);

        let q2 = engine.generate_qualifier2(q1_fixture.team2_id, elim_fixture.team1_id);
        let final_id = engine.generate_final(q1_fixture.team1_id, elim_fixture.team1_id);
        assert!(engine.fixtures().iter().any(|f| f.id == q2 && f.fixture_type == FixtureType::Qualifier2));
        assert!(engine.fixtures().iter().any(|f| f.id == final_id && f.fixture_type == FixtureType::Final));
    }

    #[test]
    fn select_playing_xi_respects_overseas_cap() {
        let mut players = Vec::new();
        for i in 0..15 {
            let p = crate::model::player::Player {
                id: i,
                name: format!("P{i}"),
                age: 25,
                nationality: "India".into(),
                is_overseas: i < 6,
                role: if i % 4 == 0 {
                    PlayerRole::WicketKeeper
                } else if i % 4 == 1 {
                    PlayerRole::Batsman
                } else if i % 4 == 2 {
                    PlayerRole::Bowler
                } else {
                    PlayerRole::AllRounder
                },
                batting_style: BattingStyle::RightHanded,
                bowling_type: BowlingType::None,
                batting: 60,
                bowling: 50,
                fielding: 55,
                fitness: 60,
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
                team_id: Some(1),
            };
            players.push(p);
        }

        let xi = SeasonEngine::select_playing_xi(&players);
        assert_eq!(xi.len(), 11);
        let overseas = xi.iter().filter(|p| p.is_overseas).count();
        assert!(overseas <= 4);
    }
}
