// Ball-by-ball DNA-based T20 simulator: the nine-step per-ball pipeline,
// over/bowler management, innings transition, and match resolution.
// Grounded on SPEC_FULL.md 4.3 (the original source's match_engine_v2.py
// is a docstring-only stub; numeric thresholds come from the distilled
// spec's recovered constants, the surrounding stochastic-sampling idiom
// from yellowhama-footballgame's execution_error.rs).

use std::collections::HashMap;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::match_engine::deliveries::{self, Delivery, DismissalKind};
use crate::match_engine::dna::PitchDna;
use crate::match_engine::innings::{Aggression, Approach, BallOutcome, DismissalInfo, InningsState, Phase};
use crate::model::player::{Player, PlayerId, PlayerRole, PlayerTrait};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contact {
    Perfect,
    Good,
    Decent,
    Defended,
    Beaten,
    Edge,
    CleanBeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Win { winner_is_second_batting: bool, margin_runs: Option<i32>, margin_wickets: Option<i32> },
    Tie,
}

pub struct MatchEngine<R: Rng> {
    rng: R,
    players: HashMap<PlayerId, Player>,
}

fn gaussian(rng: &mut impl Rng, mean: f64, sigma: f64) -> f64 {
    let z: f64 = StandardNormal.sample(rng);
    mean + z * sigma
}

fn weighted_pick<T: Copy>(rng: &mut impl Rng, choices: &[(T, f64)]) -> T {
    let total: f64 = choices.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return choices[0].0;
    }
    let mut roll = rng.gen_range(0.0..total);
    for (val, w) in choices {
        if roll < *w {
            return *val;
        }
        roll -= *w;
    }
    choices.last().unwrap().0
}

fn ball_age_modifier(stat_name: &str, over: i32) -> f64 {
    match stat_name {
        "swing" => {
            if over >= 12 {
                0.6
            } else if over >= 6 {
                0.8
            } else {
                1.0
            }
        }
        "turn" | "variation" | "flight" => {
            if over >= 12 {
                1.3
            } else if over >= 6 {
                1.15
            } else {
                1.0
            }
        }
        _ => 1.0,
    }
}

impl<R: Rng> MatchEngine<R> {
    pub fn new(rng: R) -> Self {
        MatchEngine { rng, players: HashMap::new() }
    }

    /// Registers both XIs and returns a fresh `InningsState`. Openers
    /// (indices 0, 1) of `batting_xi` are marked striker/non-striker.
    pub fn setup_innings(
        &mut self,
        batting_xi: Vec<Player>,
        bowling_xi: Vec<Player>,
        target: Option<i32>,
        pitch: Option<PitchDna>,
        is_second_innings: bool,
    ) -> InningsState {
        let batting_ids: Vec<PlayerId> = batting_xi.iter().map(|p| p.id).collect();
        let bowling_ids: Vec<PlayerId> = bowling_xi.iter().map(|p| p.id).collect();
        for p in batting_xi {
            self.players.insert(p.id, p);
        }
        for p in bowling_xi {
            self.players.insert(p.id, p);
        }
        InningsState::new(batting_ids, bowling_ids, target, pitch.unwrap_or_default(), is_second_innings)
    }

    /// Candidates = bowlers/all-rounders who can bowl, minus the bowler of
    /// the over just gone, minus anyone with 4 overs already completed.
    /// Relaxes those constraints in order if no candidate survives.
    pub fn select_bowler(&mut self, innings: &InningsState) -> Option<PlayerId> {
        let eligible = |id: &PlayerId| -> bool {
            self.players
                .get(id)
                .map(|p| matches!(p.role, PlayerRole::Bowler | PlayerRole::AllRounder) && p.can_bowl())
                .unwrap_or(false)
        };

        let base: Vec<PlayerId> = innings.bowling_xi.iter().copied().filter(eligible).collect();

        let fresh_under_cap: Vec<PlayerId> = base
            .iter()
            .copied()
            .filter(|id| Some(*id) != innings.last_over_bowler)
            .filter(|id| innings.bowling.get(id).map(|b| b.overs_completed() < 4).unwrap_or(true))
            .collect();

        let candidates = if !fresh_under_cap.is_empty() {
            fresh_under_cap
        } else {
            let under_cap: Vec<PlayerId> = base
                .iter()
                .copied()
                .filter(|id| innings.bowling.get(id).map(|b| b.overs_completed() < 4).unwrap_or(true))
                .collect();
            if !under_cap.is_empty() {
                under_cap
            } else {
                base
            }
        };

        if candidates.is_empty() {
            return None;
        }

        let weighted: Vec<(PlayerId, f64)> = candidates
            .iter()
            .map(|id| {
                let avg = self
                    .players
                    .get(id)
                    .and_then(|p| p.bowler_dna.as_ref())
                    .map(|d| d.average())
                    .unwrap_or(40.0);
                (*id, avg.max(1.0))
            })
            .collect();

        Some(weighted_pick(&mut self.rng, &weighted))
    }

    fn repertoire_for(&self, bowler_id: PlayerId) -> Vec<&'static Delivery> {
        match self.players.get(&bowler_id).and_then(|p| p.bowler_dna.as_ref()) {
            Some(dna) => deliveries::repertoire(dna),
            None => deliveries::repertoire(&crate::model::player::BowlerDNA::Pacer(
                crate::model::player::PacerDNA { speed: 130, swing: 30, bounce: 30, control: 50 },
            )),
        }
    }

    /// Smart pick 55% of the time (top-3 by exploiting the striker's
    /// weakest relevant stat, weight-picked [3,2,1]); otherwise random.
    fn select_delivery(&mut self, bowler_id: PlayerId, striker_id: PlayerId) -> &'static Delivery {
        let repertoire = self.repertoire_for(bowler_id);
        if self.rng.gen_bool(0.55) {
            let striker = self.players.get(&striker_id);
            let mut scored: Vec<(&'static Delivery, f64)> = repertoire
                .iter()
                .map(|d| {
                    let stat = striker
                        .map(|p| p.batter_dna.stat(d.targets_stat).unwrap_or(50))
                        .unwrap_or(50);
                    (*d, 50.0 - stat as f64)
                })
                .collect();
            scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
            let top3: Vec<&'static Delivery> = scored.into_iter().take(3).map(|(d, _)| d).collect();
            let weights = [3.0, 2.0, 1.0];
            let choices: Vec<(&'static Delivery, f64)> = top3
                .iter()
                .enumerate()
                .map(|(i, d)| (*d, *weights.get(i).unwrap_or(&1.0)))
                .collect();
            if !choices.is_empty() {
                return weighted_pick(&mut self.rng, &choices);
            }
        }
        let idx = self.rng.gen_range(0..repertoire.len());
        repertoire[idx]
    }

    pub fn aggression_to_approach(&mut self, innings: &InningsState, aggression: Aggression) -> Approach {
        let death_overs = innings.overs >= 18;
        let required_rate = innings.required_run_rate();
        match aggression {
            Aggression::Defend => Approach::Survive,
            Aggression::Balanced => Approach::Rotate,
            Aggression::Attack => {
                if death_overs || required_rate > 12.0 {
                    Approach::AllOut
                } else if self.rng.gen_bool(0.20) {
                    Approach::AllOut
                } else {
                    Approach::Push
                }
            }
        }
    }

    /// Plays one legal-or-extra delivery. Caller must have set
    /// `innings.current_bowler`; the bowler-selection gate for a
    /// user-fielding team is enforced by the session layer, not here.
    pub fn play_ball(&mut self, innings: &mut InningsState, aggression: Aggression) -> Option<BallOutcome> {
        if innings.complete {
            return None;
        }
        let bowler_id = innings.current_bowler?;
        let approach = self.aggression_to_approach(innings, aggression);

        let control = self
            .players
            .get(&bowler_id)
            .and_then(|p| p.bowler_dna.as_ref())
            .map(|d| d.control())
            .unwrap_or(50) as f64;

        let wide_chance = (0.06 - control * 0.0004).max(0.015);
        if self.rng.gen_bool(wide_chance) {
            innings.total_runs += 1;
            innings.partnership_runs += 1;
            innings.extras += 1;
            if let Some(e) = innings.bowling.get_mut(&bowler_id) {
                e.wides += 1;
                e.runs_conceded += 1;
            }
            return Some(BallOutcome { runs: 1, is_wicket: false, is_wide: true, is_no_ball: false });
        }

        if self.rng.gen_bool(0.008) {
            let bonus_runs = weighted_pick(&mut self.rng, &[(0, 0.35), (1, 0.30), (2, 0.10), (4, 0.15), (6, 0.10)]);
            innings.total_runs += bonus_runs + 1;
            innings.partnership_runs += bonus_runs + 1;
            innings.extras += 1;
            if let Some(e) = innings.bowling.get_mut(&bowler_id) {
                e.no_balls += 1;
                e.runs_conceded += bonus_runs + 1;
            }
            self.credit_striker_runs(innings, bonus_runs);
            return Some(BallOutcome { runs: bonus_runs + 1, is_wicket: false, is_wide: false, is_no_ball: true });
        }

        let striker_before = innings.striker;
        let delivery = self.select_delivery(bowler_id, striker_before);
        let (outcome, dismissal) = self.resolve_delivery(innings, bowler_id, delivery, approach);

        if let Some(e) = innings.batting.get_mut(&striker_before) {
            e.balls_faced += 1;
        }

        innings.balls_this_over += 1;
        if let Some(e) = innings.bowling.get_mut(&bowler_id) {
            e.legal_balls += 1;
            e.runs_conceded += outcome.runs;
            if outcome.is_wicket {
                e.wickets += 1;
            }
        }
        innings.total_runs += outcome.runs;
        self.credit_striker_runs(innings, outcome.runs);

        if outcome.is_wicket && innings.wickets_this_over < 3 {
            innings.wickets_this_over += 1;
            innings.wickets += 1;
            innings.partnership_runs = 0;
            if let Some(e) = innings.batting.get_mut(&striker_before) {
                e.is_out = true;
                e.dismissal = dismissal.map(|kind| DismissalInfo { kind, bowler_id: Some(bowler_id) });
            }
            if let Some(next) = innings.next_batter() {
                innings.striker = next;
            }
        } else {
            innings.partnership_runs += outcome.runs;
            if outcome.runs % 2 == 1 {
                innings.swap_strike();
            }
        }

        if innings.balls_this_over >= 6 {
            self.end_over(innings, bowler_id);
        }

        if innings.all_out() || innings.overs_done() || innings.chased_down() {
            innings.complete = true;
        }

        Some(outcome)
    }

    fn credit_striker_runs(&mut self, innings: &mut InningsState, runs: i32) {
        if let Some(e) = innings.batting.get_mut(&innings.striker) {
            e.runs += runs;
            if runs == 4 {
                e.fours += 1;
            } else if runs == 6 {
                e.sixes += 1;
            }
        }
    }

    fn end_over(&mut self, innings: &mut InningsState, bowler_id: PlayerId) {
        innings.overs += 1;
        innings.balls_this_over = 0;
        innings.wickets_this_over = 0;
        innings.last_over_bowler = Some(bowler_id);
        if let Some(e) = innings.bowling.get_mut(&bowler_id) {
            e.consecutive_overs += 1;
            if e.consecutive_overs > 4 {
                e.tired = true;
            }
        }
        innings.current_bowler = None;
        innings.swap_strike();
    }

    /// The nine-step per-ball pipeline for a non-extra delivery. Returns the
    /// ball outcome and, on a wicket, the dismissal kind to record.
    fn resolve_delivery(
        &mut self,
        innings: &InningsState,
        bowler_id: PlayerId,
        delivery: &'static Delivery,
        approach: Approach,
    ) -> (BallOutcome, Option<DismissalKind>) {
        let striker_id = innings.striker;
        let phase = innings.phase();
        let batting_entry = innings.batting.get(&striker_id);
        let balls_faced = batting_entry.map(|e| e.balls_faced).unwrap_or(0);

        // 1. Jaffa check.
        let jaffa_rate = 0.005 + (balls_faced - 20).max(0) as f64 * 0.0028;
        if self.rng.gen_bool(jaffa_rate.min(0.5)) {
            let kind = weighted_pick(&mut self.rng, delivery.dismissal_weights).resolved();
            return (BallOutcome { runs: 0, is_wicket: true, is_wide: false, is_no_ball: false }, Some(kind));
        }

        let bowler = self.players.get(&bowler_id);
        let bowler_dna = bowler.and_then(|p| p.bowler_dna.as_ref());
        let is_pacer = matches!(bowler_dna, Some(crate::model::player::BowlerDNA::Pacer(_)));
        let tired = innings.bowling.get(&bowler_id).map(|b| b.tired).unwrap_or(false);
        let fatigue = if tired { 0.9 } else { 1.0 };
        let control = bowler_dna.map(|d| d.control() as f64).unwrap_or(50.0);

        // 2. Execution check.
        let mut difficulty = delivery.exec_difficulty as f64;
        if phase == Phase::Powerplay && delivery.bowler_weights.iter().any(|(s, _)| *s == "swing") {
            difficulty -= 5.0;
        }
        if phase == Phase::Death && matches!(delivery.name, "yorker" | "wide_yorker" | "slower_ball") {
            difficulty -= 5.0;
        }
        let exec_roll = gaussian(&mut self.rng, control * fatigue, 8.0);
        let exec_bonus = if exec_roll >= difficulty {
            0.0
        } else if exec_roll >= difficulty - 15.0 {
            self.rng.gen_range(4.0..=10.0)
        } else {
            self.rng.gen_range(12.0..=18.0)
        };

        // 3. Bowler attack rating.
        let pitch_assist = if is_pacer {
            innings.pitch.pace_assist as f64
        } else {
            innings.pitch.spin_assist_for_innings(innings.is_second_innings)
        };
        let mut attack = 0.0;
        for &(stat_name, weight) in delivery.bowler_weights {
            let base_stat = if stat_name == "speed_factor" {
                bowler_dna.and_then(|d| d.stat("speed_factor")).unwrap_or(50.0)
            } else {
                bowler_dna.and_then(|d| d.stat(stat_name)).unwrap_or(50.0)
            };
            let effective = base_stat * (0.5 + pitch_assist * 0.01) * ball_age_modifier(stat_name, innings.overs) * fatigue;
            attack += effective * weight;
        }
        if innings.partnership_runs > 50 && bowler.map(|p| p.has_trait(PlayerTrait::PartnershipBreaker)).unwrap_or(false) {
            attack += 10.0;
        }
        attack = attack.min(120.0);

        // 4. Batter skill rating.
        let batter = self.players.get(&striker_id);
        let striker_runs = batting_entry.map(|e| e.runs).unwrap_or(0);
        let mut skill = 0.0;
        for &(stat_name, weight) in delivery.batter_weights {
            let stat = batter.map(|p| p.batter_dna.stat(stat_name).unwrap_or(50)).unwrap_or(50) as f64;
            skill += stat * weight;
        }
        skill += exec_bonus;
        skill += match balls_faced {
            0..=5 => -3.0,
            6..=15 => 0.0,
            16..=40 => 2.0,
            _ => -1.0,
        };
        if innings.wickets >= 5 && innings.overs < 6 {
            skill += 15.0;
        }
        if innings.run_rate() < 4.0 && innings.wickets < 8 {
            skill += 12.0;
        }
        if innings.run_rate() > 13.0 {
            skill -= 10.0;
        }
        if striker_runs < 20 || innings.required_run_rate() > 10.0 {
            if batter.map(|p| p.has_trait(PlayerTrait::Clutch)).unwrap_or(false) {
                skill += 10.0;
            }
            if batter.map(|p| p.has_trait(PlayerTrait::Choker)).unwrap_or(false) {
                skill -= 15.0;
            }
        }
        if innings.overs >= 15 && batter.map(|p| p.has_trait(PlayerTrait::Finisher)).unwrap_or(false) {
            skill += 15.0;
        }
        let dna_avg = batter.map(|p| p.batter_dna.avg()).unwrap_or(50.0);
        if dna_avg < 40.0 {
            skill = skill.max(63.0);
        }

        // 5. Compression.
        let skill_compressed = 28.0 + skill * 0.45;
        let attack_compressed = 28.0 + attack * 0.45;

        // 6. Tactical bonus.
        let primary_stat = batter.map(|p| p.batter_dna.stat(delivery.targets_stat).unwrap_or(50)).unwrap_or(50) as f64;
        let tactical_bonus = (0.10 * (50.0 - primary_stat)).clamp(-3.0, 3.0);

        // 7. Gaussian margin.
        let base_sigma = match phase {
            Phase::Powerplay => 12.0,
            Phase::Middle => 11.0,
            Phase::Death => 14.0,
        };
        let (sigma_mult, mean_shift) = approach.sigma_mult_and_shift();
        let sample = gaussian(&mut self.rng, skill_compressed + mean_shift, base_sigma * sigma_mult);
        let margin = sample - (attack_compressed + tactical_bonus);

        // 8. Contact class.
        let contact = if margin >= 25.0 {
            Contact::Perfect
        } else if margin >= 15.0 {
            Contact::Good
        } else if margin >= 5.0 {
            Contact::Decent
        } else if margin >= -5.0 {
            Contact::Defended
        } else if margin >= -12.0 {
            Contact::Beaten
        } else if margin >= -18.0 {
            Contact::Edge
        } else {
            Contact::CleanBeat
        };

        let power = batter.map(|p| p.power).unwrap_or(50);

        // 9. Resolution.
        match contact {
            Contact::Perfect | Contact::Good | Contact::Decent | Contact::Defended => {
                let runs = self.runs_for_contact(contact, approach, power);
                (BallOutcome { runs, is_wicket: false, is_wide: false, is_no_ball: false }, None)
            }
            Contact::Beaten => (BallOutcome { runs: 0, is_wicket: false, is_wide: false, is_no_ball: false }, None),
            Contact::Edge => {
                let carry = innings.pitch.carry as f64;
                let catch_mod = if innings
                    .bowling_xi
                    .iter()
                    .any(|id| self.players.get(id).map(|p| p.has_trait(PlayerTrait::BucketHands)).unwrap_or(false))
                {
                    0.20
                } else {
                    0.0
                };
                let catch_chance = (0.25 * carry / 100.0 + catch_mod).clamp(0.05, 0.50);
                if self.rng.gen_bool(catch_chance) {
                    let kind = weighted_pick(&mut self.rng, &[(DismissalKind::CaughtBehind, 0.55), (DismissalKind::Caught, 0.45)]);
                    (BallOutcome { runs: 0, is_wicket: true, is_wide: false, is_no_ball: false }, Some(kind))
                } else {
                    let runs = self.rng.gen_range(0..=1);
                    (BallOutcome { runs, is_wicket: false, is_wide: false, is_no_ball: false }, None)
                }
            }
            Contact::CleanBeat => {
                let wicket_chance = (0.55 + (margin.abs() - 18.0) * 0.025).min(0.95);
                if self.rng.gen_bool(wicket_chance.max(0.0)) {
                    let kind = weighted_pick(&mut self.rng, delivery.dismissal_weights).resolved();
                    (BallOutcome { runs: 0, is_wicket: true, is_wide: false, is_no_ball: false }, Some(kind))
                } else {
                    (BallOutcome { runs: 0, is_wicket: false, is_wide: false, is_no_ball: false }, None)
                }
            }
        }
    }

    fn runs_for_contact(&mut self, contact: Contact, approach: Approach, power: i32) -> i32 {
        let (four_base, six_scale) = match contact {
            Contact::Perfect => (0.30, 1.0),
            Contact::Good => (0.25, 0.6),
            Contact::Decent => (0.15, 0.25),
            Contact::Defended => (0.05, 0.05),
            _ => (0.0, 0.0),
        };
        let approach_bias = match approach {
            Approach::AllOut => 1.3,
            Approach::Push => 1.1,
            Approach::Rotate => 0.9,
            Approach::Survive => 0.6,
        };
        let six_chance = ((power as f64 / 160.0) * six_scale * approach_bias).min(0.5);
        let four_chance = (four_base * approach_bias).min(0.5);
        let remaining = (1.0 - six_chance - four_chance).max(0.0);
        let dot = 0.35 * remaining;
        let one = 0.35 * remaining;
        let two = 0.20 * remaining;
        let three = 0.10 * remaining;
        weighted_pick(
            &mut self.rng,
            &[(6, six_chance), (4, four_chance), (0, dot), (1, one), (2, two), (3, three)],
        )
    }

    /// Runs a full over: up to 6 legal balls, enforcing the max-3-wicket
    /// cap (a 4th wicket this over is demoted to a dot ball).
    pub fn simulate_over(&mut self, innings: &mut InningsState, bowler_id: PlayerId, aggression: Aggression) {
        innings.current_bowler = Some(bowler_id);
        while innings.balls_this_over < 6 && !innings.complete {
            if self.play_ball(innings, aggression).is_none() {
                break;
            }
            if innings.current_bowler.is_none() && innings.balls_this_over == 0 {
                break;
            }
        }
    }

    pub fn man_of_the_match(winning_team_player_ids: &[PlayerId], innings1: &InningsState, innings2: &InningsState) -> Option<PlayerId> {
        let mut best: Option<(PlayerId, f64)> = None;
        for &id in winning_team_player_ids {
            let mut impact = 0.0;
            for innings in [innings1, innings2] {
                if let Some(bat) = innings.batting.get(&id) {
                    let sr = bat.strike_rate();
                    impact += bat.runs as f64 * (1.0 + (sr - 100.0) / 200.0);
                }
                if let Some(bowl) = innings.bowling.get(&id) {
                    let economy = bowl.economy();
                    impact += bowl.wickets as f64 * 25.0 * (1.0 + (6.0 - economy) / 6.0);
                }
            }
            if best.as_ref().map(|(_, b)| impact > *b).unwrap_or(true) {
                best = Some((id, impact));
            }
        }
        best.map(|(id, _)| id)
    }
}

/// Winner determination once the second innings has completed.
/// `target` is `innings1.total_runs + 1`, as set at second-innings setup.
pub fn determine_winner(innings1_runs: i32, innings2_runs: i32, innings2_wickets: i32, target: i32) -> MatchResult {
    if innings2_runs >= target {
        MatchResult::Win { winner_is_second_batting: true, margin_runs: None, margin_wickets: Some(10 - innings2_wickets) }
    } else if innings2_runs < target - 1 {
        MatchResult::Win { winner_is_second_batting: false, margin_runs: Some((target - 1) - innings2_runs), margin_wickets: None }
    } else {
        MatchResult::Tie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::player::{BatterDNA, BattingIntent, BattingStyle, BowlerDNA, BowlingType, PacerDNA};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

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
    fn simulate_over_advances_over_count_and_caps_wickets() {
        let rng = ChaCha8Rng::seed_from_u64(7);
        let mut engine = MatchEngine::new(rng);
        let batting = make_xi(1, batter);
        let bowling = make_xi(100, bowler);
        let bowler_id = bowling[0].id;
        let mut innings = engine.setup_innings(batting, bowling, None, None, false);

        engine.simulate_over(&mut innings, bowler_id, Aggression::Balanced);
        assert_eq!(innings.overs, 1);
        assert_eq!(innings.balls_this_over, 0);
        assert!(innings.wickets <= 3);
    }

    #[test]
    fn full_innings_completes_within_20_overs_or_all_out() {
        let rng = ChaCha8Rng::seed_from_u64(2024);
        let mut engine = MatchEngine::new(rng);
        let batting = make_xi(1, batter);
        let bowling = make_xi(100, bowler);
        let mut innings = engine.setup_innings(batting, bowling, None, None, false);

        let mut safety = 0;
        while !innings.complete && safety < 200 {
            let bowler_id = engine.select_bowler(&innings).expect("a bowler is always available");
            engine.simulate_over(&mut innings, bowler_id, Aggression::Balanced);
            safety += 1;
        }

        assert!(innings.complete);
        assert!(innings.overs <= 20);
        assert!(innings.wickets <= 10);
    }

    #[test]
    fn determine_winner_matches_scenarios() {
        let chase_won = determine_winner(150, 151, 4, 151);
        assert!(matches!(chase_won, MatchResult::Win { winner_is_second_batting: true, margin_wickets: Some(6), .. }));

        let defended = determine_winner(150, 120, 8, 151);
        assert!(matches!(defended, MatchResult::Win { winner_is_second_batting: false, margin_runs: Some(30), .. }));

        let tie = determine_winner(150, 150, 9, 151);
        assert_eq!(tie, MatchResult::Tie);
    }

    #[test]
    fn partnership_runs_resets_on_wicket_and_tracks_total_between_wickets() {
        let rng = ChaCha8Rng::seed_from_u64(55);
        let mut engine = MatchEngine::new(rng);
        let batting = make_xi(1, batter);
        let bowling = make_xi(100, bowler);
        let mut innings = engine.setup_innings(batting, bowling, None, None, false);
        innings.current_bowler = Some(100);

        let mut runs_since_last_wicket = 0;
        for _ in 0..120 {
            if innings.complete {
                break;
            }
            let wickets_before = innings.wickets;
            let runs_before = innings.total_runs;
            if let Some(outcome) = engine.play_ball(&mut innings, Aggression::Balanced) {
                if innings.wickets > wickets_before {
                    assert_eq!(innings.partnership_runs, 0, "a wicket must reset the partnership");
                    runs_since_last_wicket = 0;
                } else {
                    runs_since_last_wicket += innings.total_runs - runs_before;
                    assert_eq!(innings.partnership_runs, runs_since_last_wicket);
                }
            }
            if innings.current_bowler.is_none() {
                if let Some(bowler_id) = engine.select_bowler(&innings) {
                    innings.current_bowler = Some(bowler_id);
                } else {
                    break;
                }
            }
        }
    }

    #[test]
    fn bucket_hands_fielder_raises_catch_chance_on_edges() {
        let mut bucket_hands_bowler = bowler(100);
        bucket_hands_bowler.traits = vec![crate::model::player::PlayerTrait::BucketHands];

        let rng = ChaCha8Rng::seed_from_u64(9);
        let mut engine = MatchEngine::new(rng);
        let batting = make_xi(1, batter);
        let mut bowling = make_xi(100, bowler);
        bowling[0] = bucket_hands_bowler;
        let mut innings = engine.setup_innings(batting, bowling, None, None, false);
        innings.pitch.carry = 40;
        innings.current_bowler = Some(100);

        assert!(engine
            .players
            .get(&100)
            .expect("bowler registered")
            .has_trait(crate::model::player::PlayerTrait::BucketHands));

        let mut safety = 0;
        while !innings.complete && safety < 200 {
            engine.play_ball(&mut innings, Aggression::Balanced);
            if innings.current_bowler.is_none() {
                innings.current_bowler = engine.select_bowler(&innings);
            }
            safety += 1;
        }
        assert!(innings.wickets <= 10);
    }
}
