// Per-innings scoreboard state: batting/bowling ledgers, strike rotation,
// over bookkeeping. Grounded on SPEC_FULL.md 4.3's setup/over-management
// description (the original source's match_engine_v2.py is a stub; this
// crate's state shape is original to the extent the source left it silent).

use std::collections::HashMap;

use crate::model::player::PlayerId;
use crate::match_engine::dna::PitchDna;
use crate::match_engine::deliveries::DismissalKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Powerplay,
    Middle,
    Death,
}

impl Phase {
    pub fn for_over(over: i32) -> Phase {
        if over < 6 {
            Phase::Powerplay
        } else if over < 16 {
            Phase::Middle
        } else {
            Phase::Death
        }
    }
}

/// API-facing aggression; mapped to an internal `Approach` per ball
/// (SPEC_FULL.md 4.3's "Approach mapping").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggression {
    Defend,
    Balanced,
    Attack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    Survive,
    Rotate,
    Push,
    AllOut,
}

impl Approach {
    /// (sigma_multiplier, mean_shift)
    pub fn sigma_mult_and_shift(self) -> (f64, f64) {
        match self {
            Approach::Survive => (0.70, 3.0),
            Approach::Rotate => (0.90, 1.5),
            Approach::Push => (1.08, 0.0),
            Approach::AllOut => (1.25, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissalInfo {
    pub kind: DismissalKind,
    pub bowler_id: Option<PlayerId>,
}

#[derive(Debug, Clone)]
pub struct BattingEntry {
    pub player_id: PlayerId,
    pub runs: i32,
    pub balls_faced: i32,
    pub fours: i32,
    pub sixes: i32,
    pub is_out: bool,
    pub dismissal: Option<DismissalInfo>,
    pub has_batted: bool,
}

impl BattingEntry {
    pub fn new(player_id: PlayerId) -> Self {
        BattingEntry {
            player_id,
            runs: 0,
            balls_faced: 0,
            fours: 0,
            sixes: 0,
            is_out: false,
            dismissal: None,
            has_batted: false,
        }
    }

    pub fn strike_rate(&self) -> f64 {
        if self.balls_faced == 0 {
            0.0
        } else {
            self.runs as f64 / self.balls_faced as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone)]
pub struct BowlingEntry {
    pub player_id: PlayerId,
    pub legal_balls: i32,
    pub runs_conceded: i32,
    pub wickets: i32,
    pub wides: i32,
    pub no_balls: i32,
    pub consecutive_overs: i32,
    pub tired: bool,
    pub last_over_bowled: Option<i32>,
}

impl BowlingEntry {
    pub fn new(player_id: PlayerId) -> Self {
        BowlingEntry {
            player_id,
            legal_balls: 0,
            runs_conceded: 0,
            wickets: 0,
            wides: 0,
            no_balls: 0,
            consecutive_overs: 0,
            tired: false,
            last_over_bowled: None,
        }
    }

    pub fn overs_completed(&self) -> i32 {
        self.legal_balls / 6
    }

    pub fn economy(&self) -> f64 {
        let overs = self.legal_balls as f64 / 6.0;
        if overs == 0.0 {
            0.0
        } else {
            self.runs_conceded as f64 / overs
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallOutcome {
    pub runs: i32,
    pub is_wicket: bool,
    pub is_wide: bool,
    pub is_no_ball: bool,
}

#[derive(Debug, Clone)]
pub struct InningsState {
    pub batting_xi: Vec<PlayerId>,
    pub bowling_xi: Vec<PlayerId>,
    pub batting: HashMap<PlayerId, BattingEntry>,
    pub bowling: HashMap<PlayerId, BowlingEntry>,

    pub next_batter_index: usize,
    pub striker: PlayerId,
    pub non_striker: PlayerId,
    pub current_bowler: Option<PlayerId>,
    /// Whoever bowled the over just completed; `select_bowler` excludes them.
    pub last_over_bowler: Option<PlayerId>,

    pub overs: i32,
    pub balls_this_over: i32,
    pub wickets_this_over: i32,
    pub wickets: i32,
    pub total_runs: i32,
    pub extras: i32,
    /// Runs added since the last wicket fell; reset to 0 on each dismissal.
    pub partnership_runs: i32,

    pub target: Option<i32>,
    pub is_second_innings: bool,
    pub pitch: PitchDna,
    pub complete: bool,
}

impl InningsState {
    pub fn new(
        batting_xi: Vec<PlayerId>,
        bowling_xi: Vec<PlayerId>,
        target: Option<i32>,
        pitch: PitchDna,
        is_second_innings: bool,
    ) -> Self {
        let mut batting = HashMap::new();
        for &id in &batting_xi {
            batting.insert(id, BattingEntry::new(id));
        }
        let mut bowling = HashMap::new();
        for &id in &bowling_xi {
            bowling.insert(id, BowlingEntry::new(id));
        }

        let striker = batting_xi[0];
        let non_striker = batting_xi[1];
        if let Some(e) = batting.get_mut(&striker) {
            e.has_batted = true;
        }
        if let Some(e) = batting.get_mut(&non_striker) {
            e.has_batted = true;
        }

        InningsState {
            batting_xi,
            bowling_xi,
            batting,
            bowling,
            next_batter_index: 2,
            striker,
            non_striker,
            current_bowler: None,
            last_over_bowler: None,
            overs: 0,
            balls_this_over: 0,
            wickets_this_over: 0,
            wickets: 0,
            total_runs: 0,
            extras: 0,
            partnership_runs: 0,
            target,
            is_second_innings,
            pitch,
            complete: false,
        }
    }

    pub fn phase(&self) -> Phase {
        Phase::for_over(self.overs)
    }

    pub fn overs_faced(&self) -> f64 {
        self.overs as f64 + self.balls_this_over as f64 / 6.0
    }

    pub fn run_rate(&self) -> f64 {
        let overs = self.overs_faced();
        if overs == 0.0 {
            0.0
        } else {
            self.total_runs as f64 / overs
        }
    }

    pub fn required_run_rate(&self) -> f64 {
        match self.target {
            Some(target) => {
                let remaining_runs = (target - self.total_runs).max(0);
                let balls_left = (20 * 6 - (self.overs * 6 + self.balls_this_over)).max(1);
                remaining_runs as f64 / (balls_left as f64 / 6.0)
            }
            None => 0.0,
        }
    }

    pub fn swap_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    pub fn next_batter(&mut self) -> Option<PlayerId> {
        if self.next_batter_index >= self.batting_xi.len() {
            return None;
        }
        let id = self.batting_xi[self.next_batter_index];
        self.next_batter_index += 1;
        if let Some(e) = self.batting.get_mut(&id) {
            e.has_batted = true;
        }
        Some(id)
    }

    pub fn all_out(&self) -> bool {
        self.wickets >= 10 || self.next_batter_index >= self.batting_xi.len() && self.batting_remaining() < 2
    }

    fn batting_remaining(&self) -> usize {
        self.batting.values().filter(|e| !e.is_out).count()
    }

    pub fn overs_done(&self) -> bool {
        self.overs >= 20
    }

    pub fn chased_down(&self) -> bool {
        matches!(self.target, Some(t) if self.total_runs >= t)
    }
}
