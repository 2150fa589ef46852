// Process-wide match session cache: fixture-keyed live engine instances,
// a pending-toss map, and a short-lived completed-results map. Grounded on
// SPEC_FULL.md 4.5; the `Mutex`-guarded map style follows db.rs's own
// `Mutex<Connection>` convention rather than introducing a new locking idiom.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::match_engine::{determine_winner, Aggression, BallOutcome, InningsState, MatchEngine, MatchResult, PitchDna};
use crate::model::career::FixtureId;
use crate::model::player::{Player, PlayerId};
use crate::model::team::TeamId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TossDecision {
    Bat,
    Bowl,
}

#[derive(Debug, Clone, Copy)]
pub struct TossResult {
    pub fixture_id: FixtureId,
    pub toss_winner_team_id: TeamId,
}

pub struct MatchSession {
    pub fixture_id: FixtureId,
    pub batting_first_team_id: TeamId,
    pub fielding_first_team_id: TeamId,
    pub user_team_id: Option<TeamId>,
    engine: MatchEngine<ChaCha8Rng>,
    second_innings_batting_xi: Vec<Player>,
    second_innings_bowling_xi: Vec<Player>,
    pitch: PitchDna,
    pub innings1: InningsState,
    pub innings2: Option<InningsState>,
}

impl MatchSession {
    /// Whichever team is fielding the innings currently in progress.
    pub fn fielding_team_id(&self) -> TeamId {
        if self.innings1.complete {
            self.batting_first_team_id
        } else {
            self.fielding_first_team_id
        }
    }

    pub fn is_match_complete(&self) -> bool {
        self.innings2.as_ref().map(|i| i.complete).unwrap_or(false)
    }
}

pub struct CompletedMatch {
    pub fixture_id: FixtureId,
    pub winner_team_id: Option<TeamId>,
    pub margin_runs: Option<i32>,
    pub margin_wickets: Option<i32>,
    pub man_of_the_match: Option<PlayerId>,
    pub innings1: InningsState,
    pub innings2: InningsState,
}

#[derive(Default)]
pub struct MatchSessionCache {
    pending_toss: Mutex<HashMap<FixtureId, TossResult>>,
    active: Mutex<HashMap<FixtureId, MatchSession>>,
    completed: Mutex<HashMap<FixtureId, CompletedMatch>>,
}

impl MatchSessionCache {
    pub fn new() -> Self {
        MatchSessionCache::default()
    }

    pub fn do_toss(&self, fixture_id: FixtureId, team1_id: TeamId, team2_id: TeamId, rng: &mut impl Rng) -> TeamId {
        let winner = if rng.gen_bool(0.5) { team1_id } else { team2_id };
        self.pending_toss
            .lock()
            .expect("session cache mutex poisoned")
            .insert(fixture_id, TossResult { fixture_id, toss_winner_team_id: winner });
        winner
    }

    /// Builds the engine, runs `setup_innings` for the first innings, and
    /// selects (or leaves open, per the bowler-selection gate) the first
    /// bowler. Clears the pending-toss entry. Returns `false` if a session
    /// for this fixture is already active.
    #[allow(clippy::too_many_arguments)]
    pub fn start_match(
        &self,
        fixture_id: FixtureId,
        team1_id: TeamId,
        team2_id: TeamId,
        team1_xi: Vec<Player>,
        team2_xi: Vec<Player>,
        toss_winner_team_id: TeamId,
        decision: TossDecision,
        user_team_id: Option<TeamId>,
        pitch: PitchDna,
        seed: u64,
    ) -> bool {
        let mut active = self.active.lock().expect("session cache mutex poisoned");
        if active.contains_key(&fixture_id) {
            return false;
        }

        let batting_first_team_id = match decision {
            TossDecision::Bat => toss_winner_team_id,
            TossDecision::Bowl => {
                if toss_winner_team_id == team1_id {
                    team2_id
                } else {
                    team1_id
                }
            }
        };
        let fielding_first_team_id = if batting_first_team_id == team1_id { team2_id } else { team1_id };

        let (batting_first_xi, bowling_first_xi) = if batting_first_team_id == team1_id {
            (team1_xi, team2_xi)
        } else {
            (team2_xi, team1_xi)
        };

        let mut engine = MatchEngine::new(ChaCha8Rng::seed_from_u64(seed));
        let second_innings_batting_xi = bowling_first_xi.clone();
        let second_innings_bowling_xi = batting_first_xi.clone();
        let mut innings1 = engine.setup_innings(batting_first_xi, bowling_first_xi, None, Some(pitch), false);

        if Some(fielding_first_team_id) != user_team_id {
            innings1.current_bowler = engine.select_bowler(&innings1);
        }

        active.insert(
            fixture_id,
            MatchSession {
                fixture_id,
                batting_first_team_id,
                fielding_first_team_id,
                user_team_id,
                engine,
                second_innings_batting_xi,
                second_innings_bowling_xi,
                pitch,
                innings1,
                innings2: None,
            },
        );

        self.pending_toss.lock().expect("session cache mutex poisoned").remove(&fixture_id);
        true
    }

    /// Plays one ball of the active innings. Returns `None` if there is no
    /// active session, the match is already complete, or the bowler-
    /// selection gate is blocking (user team fielding, no bowler chosen).
    pub fn play_ball(&self, fixture_id: FixtureId, aggression: Aggression) -> Option<BallOutcome> {
        let mut active = self.active.lock().expect("session cache mutex poisoned");
        let session = active.get_mut(&fixture_id)?;

        let fielding_team_id = session.fielding_team_id();
        let user_team_id = session.user_team_id;

        let innings: &mut InningsState = if session.innings1.complete {
            session.innings2.as_mut()?
        } else {
            &mut session.innings1
        };

        if innings.current_bowler.is_none() {
            if Some(fielding_team_id) == user_team_id {
                return None;
            }
            innings.current_bowler = session.engine.select_bowler(innings);
        }

        let outcome = session.engine.play_ball(innings, aggression)?;

        if innings.current_bowler.is_none() && Some(fielding_team_id) != user_team_id {
            innings.current_bowler = session.engine.select_bowler(innings);
        }

        Self::advance_if_complete(session);
        Some(outcome)
    }

    /// Runs up to six legal balls of the current over, stopping early if
    /// the innings (or match) completes.
    pub fn simulate_over(&self, fixture_id: FixtureId, bowler_id: PlayerId, aggression: Aggression) {
        let mut active = self.active.lock().expect("session cache mutex poisoned");
        let Some(session) = active.get_mut(&fixture_id) else { return };

        let innings: &mut InningsState = if session.innings1.complete {
            match session.innings2.as_mut() {
                Some(i) => i,
                None => return,
            }
        } else {
            &mut session.innings1
        };
        session.engine.simulate_over(innings, bowler_id, aggression);
        Self::advance_if_complete(session);
    }

    /// Simulates balls until the active innings completes (AI-driven
    /// bowler selection throughout); used for offline full-match runs.
    pub fn simulate_innings(&self, fixture_id: FixtureId, aggression: Aggression) {
        let mut active = self.active.lock().expect("session cache mutex poisoned");
        let Some(session) = active.get_mut(&fixture_id) else { return };

        loop {
            Self::advance_if_complete(session);
            if session.is_match_complete() {
                break;
            }

            let bowler_id = {
                let innings_ref: &InningsState =
                    if session.innings1.complete { session.innings2.as_ref().unwrap() } else { &session.innings1 };
                match session.engine.select_bowler(innings_ref) {
                    Some(id) => id,
                    None => break,
                }
            };

            let innings_mut: &mut InningsState =
                if session.innings1.complete { session.innings2.as_mut().unwrap() } else { &mut session.innings1 };
            session.engine.simulate_over(innings_mut, bowler_id, aggression);
        }
        Self::advance_if_complete(session);
    }

    /// Explicitly assigns the bowler for the upcoming over; required once
    /// per over when the user's team is fielding.
    pub fn select_bowler(&self, fixture_id: FixtureId, bowler_id: PlayerId) -> bool {
        let mut active = self.active.lock().expect("session cache mutex poisoned");
        match active.get_mut(&fixture_id) {
            Some(session) => {
                let innings: &mut InningsState = if session.innings1.complete {
                    match session.innings2.as_mut() {
                        Some(i) => i,
                        None => return false,
                    }
                } else {
                    &mut session.innings1
                };
                innings.current_bowler = Some(bowler_id);
                true
            }
            None => false,
        }
    }

    fn advance_if_complete(session: &mut MatchSession) {
        if session.innings1.complete && session.innings2.is_none() {
            let target = Some(session.innings1.total_runs + 1);
            let batting_xi = session.second_innings_batting_xi.clone();
            let bowling_xi = session.second_innings_bowling_xi.clone();
            let mut innings2 = session.engine.setup_innings(batting_xi, bowling_xi, target, Some(session.pitch), true);

            if Some(session.batting_first_team_id) != session.user_team_id {
                innings2.current_bowler = session.engine.select_bowler(&innings2);
            }
            session.innings2 = Some(innings2);
        }
    }

    /// Once the second innings is complete, removes the session from the
    /// active map and files the result for single-read retrieval.
    pub fn finalize_if_complete(&self, fixture_id: FixtureId) -> Option<()> {
        let mut active = self.active.lock().expect("session cache mutex poisoned");
        let complete = active.get(&fixture_id).map(|s| s.is_match_complete()).unwrap_or(false);
        if !complete {
            return None;
        }
        let session = active.remove(&fixture_id)?;

        let innings1 = session.innings1;
        let innings2 = session.innings2.expect("is_match_complete implies innings2 is set");
        let target = innings1.total_runs + 1;
        let result = determine_winner(innings1.total_runs, innings2.total_runs, innings2.wickets, target);

        let (winner_team_id, margin_runs, margin_wickets) = match result {
            MatchResult::Win { winner_is_second_batting, margin_runs, margin_wickets } => {
                let winner = if winner_is_second_batting {
                    session.fielding_first_team_id
                } else {
                    session.batting_first_team_id
                };
                (Some(winner), margin_runs, margin_wickets)
            }
            MatchResult::Tie => (None, None, None),
        };

        let winning_xi: &[PlayerId] =
            if winner_team_id == Some(session.batting_first_team_id) { &innings1.batting_xi } else { &innings1.bowling_xi };
        let man_of_the_match = MatchEngine::<ChaCha8Rng>::man_of_the_match(winning_xi, &innings1, &innings2);

        self.completed.lock().expect("session cache mutex poisoned").insert(
            fixture_id,
            CompletedMatch { fixture_id, winner_team_id, margin_runs, margin_wickets, man_of_the_match, innings1, innings2 },
        );
        Some(())
    }

    /// Single-read consumption of a completed match's result.
    pub fn take_completed(&self, fixture_id: FixtureId) -> Option<CompletedMatch> {
        self.completed.lock().expect("session cache mutex poisoned").remove(&fixture_id)
    }

    pub fn has_active_session(&self, fixture_id: FixtureId) -> bool {
        self.active.lock().expect("session cache mutex poisoned").contains_key(&fixture_id)
    }

    /// Recovery rule: a fixture left `InProgress` with no active session
    /// (e.g. after a process restart) has nothing to resume from and
    /// should be reset to `Scheduled` by the caller before retrying.
    pub fn needs_recovery(&self, fixture_id: FixtureId) -> bool {
        !self.has_active_session(fixture_id) && !self.has_completed_result(fixture_id)
    }

    fn has_completed_result(&self, fixture_id: FixtureId) -> bool {
        self.completed.lock().expect("session cache mutex poisoned").contains_key(&fixture_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::player::{BatterDNA, BattingIntent, BattingStyle, BowlerDNA, BowlingType, PacerDNA, PlayerRole};

    fn batter(id: PlayerId) -> Player {
        Player {
            id,
            name: format!("Batter {id}"),
            age: 25,
            nationality: "India".into(),
            is_overseas: false,
            role: PlayerRole::Batsman,
            batting_style: BattingStyle::RightHanded,
            bowling_type: BowlingType::None,
            batting: 70,
            bowling: 20,
            fielding: 60,
            fitness: 70,
            power: 60,
            technique: 65,
            running: 60,
            pace_or_spin: 0,
            accuracy: 0,
            variation: 0,
            temperament: 60,
            consistency: 60,
            form: 1.0,
            traits: vec![],
            batting_intent: BattingIntent::Accumulator,
            batter_dna: BatterDNA {
                vs_pace: 65,
                vs_bounce: 60,
                vs_spin: 55,
                vs_deception: 55,
                off_side: 60,
                leg_side: 55,
                power: 60,
                weaknesses: vec![],
            },
            bowler_dna: None,
            base_price: 5_000_000,
            sold_price: None,
            team_id: Some(1),
        }
    }

    fn bowler(id: PlayerId) -> Player {
        Player {
            id,
            name: format!("Bowler {id}"),
            age: 27,
            nationality: "India".into(),
            is_overseas: false,
            role: PlayerRole::Bowler,
            batting_style: BattingStyle::RightHanded,
            bowling_type: BowlingType::Pace,
            batting: 20,
            bowling: 70,
            fielding: 55,
            fitness: 70,
            power: 30,
            technique: 30,
            running: 50,
            pace_or_spin: 0,
            accuracy: 65,
            variation: 50,
            temperament: 55,
            consistency: 60,
            form: 1.0,
            traits: vec![],
            batting_intent: BattingIntent::Accumulator,
            batter_dna: BatterDNA {
                vs_pace: 30,
                vs_bounce: 30,
                vs_spin: 30,
                vs_deception: 30,
                off_side: 30,
                leg_side: 30,
                power: 30,
                weaknesses: vec![],
            },
            bowler_dna: Some(BowlerDNA::Pacer(PacerDNA { speed: 138, swing: 55, bounce: 50, control: 65 })),
            base_price: 4_000_000,
            sold_price: None,
            team_id: Some(2),
        }
    }

    fn make_xi(start_id: PlayerId, make: impl Fn(PlayerId) -> Player) -> Vec<Player> {
        (0..11).map(|i| make(start_id + i)).collect()
    }

    #[test]
    fn start_match_twice_for_same_fixture_fails() {
        let cache = MatchSessionCache::new();
        let ok = cache.start_match(
            1,
            10,
            20,
            make_xi(1, batter),
            make_xi(100, bowler),
            10,
            TossDecision::Bat,
            None,
            PitchDna::default(),
            42,
        );
        assert!(ok);
        assert!(cache.has_active_session(1));

        let second = cache.start_match(
            1,
            10,
            20,
            make_xi(1, batter),
            make_xi(100, bowler),
            10,
            TossDecision::Bat,
            None,
            PitchDna::default(),
            42,
        );
        assert!(!second);
    }

    #[test]
    fn user_fielding_gate_blocks_play_ball_without_a_selected_bowler() {
        let cache = MatchSessionCache::new();
        // Team 10 wins the toss and chooses to bowl, so team 10 fields
        // first; make team 10 the user's team to exercise the gate.
        cache.start_match(
            2,
            10,
            20,
            make_xi(1, batter),
            make_xi(100, bowler),
            10,
            TossDecision::Bowl,
            Some(10),
            PitchDna::default(),
            7,
        );
        assert!(cache.play_ball(2, Aggression::Balanced).is_none());

        assert!(cache.select_bowler(2, 100));
        assert!(cache.play_ball(2, Aggression::Balanced).is_some());
    }

    #[test]
    fn simulate_innings_runs_to_completion_and_starts_second_innings() {
        let cache = MatchSessionCache::new();
        cache.start_match(
            3,
            10,
            20,
            make_xi(1, batter),
            make_xi(100, bowler),
            10,
            TossDecision::Bat,
            None,
            PitchDna::default(),
            99,
        );
        cache.simulate_innings(3, Aggression::Balanced);

        let active = cache.active.lock().unwrap();
        let session = active.get(&3).unwrap();
        assert!(session.innings1.complete);
        assert!(session.innings2.is_some());
    }

    #[test]
    fn do_toss_picks_one_of_the_two_teams() {
        let cache = MatchSessionCache::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let winner = cache.do_toss(9, 10, 20, &mut rng);
        assert!(winner == 10 || winner == 20);
    }
}
