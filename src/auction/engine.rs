// Sealed-ascending auction engine: AI valuation heuristics, bid increments,
// category ordering, and the competitive/auto-bid round loops. Grounded on
// engine/auction_engine.py. The engine owns the in-memory player and team
// maps for the lifetime of one auction; the service layer wrapping it is
// responsible for persisting checkpoints (see SPEC_FULL.md 10.2).

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::auction::{
    Auction, AuctionBid, AuctionCategory, AuctionPlayerEntry, AuctionPlayerStatus, AuctionStatus,
    TeamAuctionState,
};
use crate::model::player::{Player, PlayerId, PlayerRole};
use crate::model::team::{Team, TeamId};

const BID_INCREMENTS: [(i64, i64); 5] = [
    (0, 500_000),
    (10_000_000, 1_000_000),
    (50_000_000, 2_500_000),
    (100_000_000, 5_000_000),
    (150_000_000, 10_000_000),
];

#[derive(Debug, Clone)]
pub struct BidResult {
    pub player_id: PlayerId,
    pub winning_team_id: Option<TeamId>,
    pub winning_bid: i64,
    pub is_sold: bool,
    pub bid_history: Vec<AuctionBid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoBidStatus {
    Won,
    Lost,
    CapExceeded,
    BudgetLimit,
}

#[derive(Debug, Clone)]
pub struct AutoBidResult {
    pub status: AutoBidStatus,
    pub final_result: Option<BidResult>,
    pub current_bid: i64,
    pub current_bidder_team_id: Option<TeamId>,
    pub next_bid_needed: i64,
}

#[derive(Debug, Clone, Copy)]
struct TeamNeeds {
    needs_batsmen: i32,
    needs_bowlers: i32,
    needs_all_rounders: i32,
    needs_wicket_keeper: i32,
    needs_overseas_star: bool,
    urgency: f64,
}

/// Whether a team's unmet need for this role crosses the threshold that
/// earns a bidding-probability boost (SPEC_FULL.md 4.2).
fn role_need_is_pressing(role: PlayerRole, needs: &TeamNeeds) -> bool {
    match role {
        PlayerRole::Batsman => needs.needs_batsmen > 2,
        PlayerRole::Bowler => needs.needs_bowlers > 2,
        PlayerRole::AllRounder => needs.needs_all_rounders > 1,
        PlayerRole::WicketKeeper => needs.needs_wicket_keeper > 0,
    }
}

pub struct AuctionEngine<R: Rng> {
    rng: R,
    auction: Auction,
    team_states: HashMap<TeamId, TeamAuctionState>,
    teams: HashMap<TeamId, Team>,
    players: HashMap<PlayerId, Player>,
    entries: Vec<AuctionPlayerEntry>,
    bids: Vec<AuctionBid>,
    sequence: u64,
}

impl<R: Rng> AuctionEngine<R> {
    pub fn new(auction: Auction, rng: R) -> Self {
        AuctionEngine {
            rng,
            auction,
            team_states: HashMap::new(),
            teams: HashMap::new(),
            players: HashMap::new(),
            entries: Vec::new(),
            bids: Vec::new(),
            sequence: 0,
        }
    }

    pub fn auction(&self) -> &Auction {
        &self.auction
    }

    pub fn team_state(&self, team_id: TeamId) -> Option<&TeamAuctionState> {
        self.team_states.get(&team_id)
    }

    pub fn entries(&self) -> &[AuctionPlayerEntry] {
        &self.entries
    }

    fn category_for(player: &Player) -> AuctionCategory {
        if player.overall_rating() >= 80 {
            return AuctionCategory::Marquee;
        }
        match player.role {
            PlayerRole::Batsman => AuctionCategory::Batsmen,
            PlayerRole::Bowler => AuctionCategory::Bowlers,
            PlayerRole::AllRounder => AuctionCategory::AllRounders,
            PlayerRole::WicketKeeper => AuctionCategory::WicketKeepers,
        }
    }

    /// Populates team auction states, categorises and orders the player
    /// queue (category asc, then base_price desc, then rating desc), and
    /// flips the auction to `InProgress`.
    pub fn initialize_auction(&mut self, teams: Vec<Team>, players: Vec<Player>) {
        for team in teams {
            let state = TeamAuctionState::new(self.auction.id, team.id, team.budget);
            self.team_states.insert(team.id, state);
            self.teams.insert(team.id, team);
        }

        let mut ordered: Vec<(PlayerId, AuctionCategory, i64, i32)> = players
            .iter()
            .map(|p| (p.id, Self::category_for(p), p.base_price, p.overall_rating()))
            .collect();
        ordered.sort_by(|a, b| {
            a.1.order()
                .cmp(&b.1.order())
                .then(b.2.cmp(&a.2))
                .then(b.3.cmp(&a.3))
        });

        for (order, (player_id, category, ..)) in ordered.iter().enumerate() {
            self.entries.push(AuctionPlayerEntry {
                auction_id: self.auction.id,
                player_id: *player_id,
                auction_order: (order + 1) as i32,
                status: AuctionPlayerStatus::Available,
                category: *category,
                sold_to_team_id: None,
                sold_price: None,
                auction_set: 1,
            });
        }

        for player in players {
            self.players.insert(player.id, player);
        }

        self.auction.total_players = self.entries.len() as i32;
        self.auction.status = AuctionStatus::InProgress;
        if let Some(first) = ordered.first() {
            self.auction.current_category = Some(first.1);
        }
    }

    pub fn get_next_bid_amount(&self, current_bid: i64) -> i64 {
        let mut increment = BID_INCREMENTS[0].1;
        for (threshold, inc) in BID_INCREMENTS {
            if current_bid >= threshold {
                increment = inc;
            }
        }
        current_bid + increment
    }

    pub fn get_next_player(&self) -> Option<&AuctionPlayerEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == AuctionPlayerStatus::Available)
            .min_by_key(|e| e.auction_order)
    }

    pub fn start_bidding(&mut self, player_id: PlayerId) {
        let base_price = self.players.get(&player_id).map(|p| p.base_price).unwrap_or(0);
        let category = self
            .entries
            .iter()
            .find(|e| e.player_id == player_id)
            .map(|e| e.category);

        if let Some(entry) = self.entries.iter_mut().find(|e| e.player_id == player_id) {
            entry.status = AuctionPlayerStatus::InBidding;
        }
        self.auction.current_player_id = Some(player_id);
        self.auction.current_bid = base_price;
        self.auction.current_bidder_team_id = None;
        self.auction.current_category = category;
    }

    fn analyze_team_needs(&self, team_id: TeamId) -> TeamNeeds {
        let state = &self.team_states[&team_id];
        const IDEAL_BATSMEN: i32 = 5;
        const IDEAL_BOWLERS: i32 = 5;
        const IDEAL_AR: i32 = 3;
        const IDEAL_WK: i32 = 2;

        let min_needed = state.min_players_needed();
        TeamNeeds {
            needs_batsmen: (IDEAL_BATSMEN - state.batsmen).max(0),
            needs_bowlers: (IDEAL_BOWLERS - state.bowlers).max(0),
            needs_all_rounders: (IDEAL_AR - state.all_rounders).max(0),
            needs_wicket_keeper: (IDEAL_WK - state.wicket_keepers).max(0),
            needs_overseas_star: state.overseas_players < 4 && state.total_players < 10,
            urgency: if min_needed > 0 {
                (min_needed as f64 / 10.0).min(1.0)
            } else {
                0.3
            },
        }
    }

    fn calculate_player_value(&mut self, player_id: PlayerId, team_id: TeamId) -> i64 {
        let player = &self.players[&player_id];
        let rating = player.overall_rating();
        let base_value = player.base_price;
        let role = player.role;
        let is_overseas = player.is_overseas;

        let needs = self.analyze_team_needs(team_id);
        let state = &self.team_states[&team_id];

        let quality_multiplier = if rating >= 85 {
            3.0
        } else if rating >= 75 {
            2.0
        } else if rating >= 65 {
            1.5
        } else if rating >= 55 {
            1.2
        } else {
            0.8
        };

        let mut need_multiplier = match role {
            PlayerRole::Batsman if needs.needs_batsmen > 2 => 1.5,
            PlayerRole::Bowler if needs.needs_bowlers > 2 => 1.5,
            PlayerRole::AllRounder if needs.needs_all_rounders > 1 => 1.8,
            PlayerRole::WicketKeeper if needs.needs_wicket_keeper > 0 => 1.6,
            _ => 1.0,
        };

        if is_overseas && needs.needs_overseas_star && rating >= 75 {
            need_multiplier *= 1.3;
        }

        let urgency_multiplier = 1.0 + needs.urgency * 0.5;

        let raw_value = base_value as f64 * quality_multiplier * need_multiplier * urgency_multiplier;
        let max_affordable = state.max_bid_possible();
        let capped = raw_value.min(max_affordable as f64);

        let variance = self.rng.gen_range(0.85..=1.15);
        let value = (capped * variance) as i64;

        value.max(base_value)
    }

    fn should_team_bid(&mut self, team_id: TeamId, player_id: PlayerId, current_bid: i64) -> bool {
        let is_overseas = self.players[&player_id].is_overseas;
        let role = self.players[&player_id].role;
        {
            let state = &self.team_states[&team_id];
            if state.total_players >= 25 {
                return false;
            }
            if is_overseas && state.overseas_players >= 8 {
                return false;
            }
        }

        let next_bid = self.get_next_bid_amount(current_bid);
        if next_bid > self.team_states[&team_id].max_bid_possible() {
            return false;
        }

        let max_value = self.calculate_player_value(player_id, team_id);
        if next_bid > max_value {
            return false;
        }

        let price_ratio = next_bid as f64 / max_value as f64;
        let mut bid_probability = (1.0 - price_ratio * 0.8).max(0.1);

        let needs = self.analyze_team_needs(team_id);
        let needs_this_role = role_need_is_pressing(role, &needs);

        if needs_this_role {
            bid_probability = (bid_probability + 0.3).min(1.0);
        }

        self.rng.gen_range(0.0..1.0) < bid_probability
    }

    /// Returns interested AI team ids (shuffled). Skips `current_bidder`
    /// and, unless `include_user_team`, any team flagged `is_user_team`.
    fn get_ai_bids(
        &mut self,
        player_id: PlayerId,
        current_bid: i64,
        current_bidder: Option<TeamId>,
        include_user_team: bool,
    ) -> Vec<TeamId> {
        let candidate_ids: Vec<TeamId> = self
            .team_states
            .keys()
            .copied()
            .filter(|id| Some(*id) != current_bidder)
            .filter(|id| include_user_team || !self.teams.get(id).map(|t| t.is_user_team).unwrap_or(false))
            .collect();

        let mut interested = Vec::new();
        for team_id in candidate_ids {
            if self.should_team_bid(team_id, player_id, current_bid) {
                interested.push(team_id);
            }
        }
        interested.shuffle(&mut self.rng);
        interested
    }

    pub fn place_bid(&mut self, team_id: TeamId, player_id: PlayerId, amount: i64) -> bool {
        let max_possible = match self.team_states.get(&team_id) {
            Some(state) => state.max_bid_possible(),
            None => return false,
        };
        if amount > max_possible || amount <= self.auction.current_bid {
            return false;
        }

        self.sequence += 1;
        self.bids.push(AuctionBid {
            auction_id: self.auction.id,
            player_id,
            team_id,
            bid_amount: amount,
            sequence: self.sequence,
            is_winning_bid: false,
        });

        self.auction.current_bid = amount;
        self.auction.current_bidder_team_id = Some(team_id);
        true
    }

    /// Sells the player to the current highest bidder, or marks it unsold.
    /// Mutates the winning team's budget/composition counters and clears
    /// the auction's current-bidding scratch fields.
    pub fn finalize_player(&mut self, player_id: PlayerId) -> BidResult {
        let winning_team_id = self.auction.current_bidder_team_id;
        let winning_bid = self.auction.current_bid;
        let mut is_sold = false;

        if let Some(team_id) = winning_team_id {
            is_sold = true;

            if let Some(entry) = self.entries.iter_mut().find(|e| e.player_id == player_id) {
                entry.status = AuctionPlayerStatus::Sold;
                entry.sold_to_team_id = Some(team_id);
                entry.sold_price = Some(winning_bid);
            }

            let (is_overseas, role) = {
                let player = self.players.get_mut(&player_id).expect("finalized player must exist");
                player.team_id = Some(team_id);
                player.sold_price = Some(winning_bid);
                (player.is_overseas, player.role)
            };

            if let Some(state) = self.team_states.get_mut(&team_id) {
                state.remaining_budget -= winning_bid;
                state.total_players += 1;
                if is_overseas {
                    state.overseas_players += 1;
                }
                match role {
                    PlayerRole::Batsman => state.batsmen += 1,
                    PlayerRole::Bowler => state.bowlers += 1,
                    PlayerRole::AllRounder => state.all_rounders += 1,
                    PlayerRole::WicketKeeper => state.wicket_keepers += 1,
                }
            }
            if let Some(team) = self.teams.get_mut(&team_id) {
                team.remaining_budget -= winning_bid;
            }

            for bid in self.bids.iter_mut().rev() {
                if bid.auction_id == self.auction.id
                    && bid.player_id == player_id
                    && bid.team_id == team_id
                    && bid.bid_amount == winning_bid
                {
                    bid.is_winning_bid = true;
                    break;
                }
            }

            self.auction.players_sold += 1;
        } else if let Some(entry) = self.entries.iter_mut().find(|e| e.player_id == player_id) {
            entry.status = AuctionPlayerStatus::Unsold;
            self.auction.players_unsold += 1;
        }

        self.auction.current_player_id = None;
        self.auction.current_bid = 0;
        self.auction.current_bidder_team_id = None;

        let bid_history: Vec<AuctionBid> = self
            .bids
            .iter()
            .filter(|b| b.auction_id == self.auction.id && b.player_id == player_id)
            .cloned()
            .collect();

        BidResult {
            player_id,
            winning_team_id: if is_sold { winning_team_id } else { None },
            winning_bid: if is_sold { winning_bid } else { 0 },
            is_sold,
            bid_history,
        }
    }

    /// One round: collect interested AI bidders (plus the user if they opt
    /// in) and let the first one in shuffled order place the next bid.
    /// Returns `(new_bid, bidding_team_id)`, or `(current_bid, None)` if
    /// nobody stepped in.
    pub fn run_bidding_round(
        &mut self,
        player_id: PlayerId,
        user_team_id: TeamId,
        user_bids: bool,
        auto_mode: bool,
    ) -> (i64, Option<TeamId>) {
        let current_bid = self.auction.current_bid;
        let current_bidder = self.auction.current_bidder_team_id;

        let mut all_bidders = self.get_ai_bids(player_id, current_bid, current_bidder, auto_mode);

        if user_bids && Some(user_team_id) != current_bidder {
            let next_bid = self.get_next_bid_amount(current_bid);
            let is_overseas = self.players[&player_id].is_overseas;
            if let Some(state) = self.team_states.get(&user_team_id) {
                if next_bid <= state.max_bid_possible() && (!is_overseas || state.overseas_players < 8) {
                    all_bidders.push(user_team_id);
                    all_bidders.shuffle(&mut self.rng);
                }
            }
        }

        let Some(&bidder_id) = all_bidders.first() else {
            return (current_bid, None);
        };

        let next_bid = self.get_next_bid_amount(current_bid);
        if self.place_bid(bidder_id, player_id, next_bid) {
            (next_bid, Some(bidder_id))
        } else {
            (current_bid, None)
        }
    }

    /// All AI teams compete for a player with no user participation. Caps
    /// at 100 rounds; two consecutive passes ends the contest.
    pub fn run_competitive_ai_bidding(&mut self, player_id: PlayerId, exclude_team_id: Option<TeamId>) {
        let team_ids: Vec<TeamId> = self
            .team_states
            .keys()
            .copied()
            .filter(|id| Some(*id) != exclude_team_id)
            .collect();

        let mut consecutive_passes = 0;

        for _ in 0..100 {
            if consecutive_passes >= 2 {
                break;
            }
            let current_bid = self.auction.current_bid;
            let next_bid = self.get_next_bid_amount(current_bid);
            let current_bidder = self.auction.current_bidder_team_id;

            let mut willing = Vec::new();
            for &team_id in &team_ids {
                if Some(team_id) == current_bidder {
                    continue;
                }
                if self.should_team_bid(team_id, player_id, current_bid) {
                    willing.push(team_id);
                }
            }

            if willing.is_empty() {
                consecutive_passes += 1;
                continue;
            }

            let bidder = *willing.choose(&mut self.rng).expect("willing is non-empty");
            if self.place_bid(bidder, player_id, next_bid) {
                consecutive_passes = 0;
            } else {
                consecutive_passes += 1;
            }
        }
    }

    /// Starts bidding, runs AI-only competition, and finalises — used when
    /// the user passes on or auto-completes a whole category.
    pub fn quick_pass_player(&mut self, player_id: PlayerId, exclude_team_id: Option<TeamId>) -> BidResult {
        self.run_competitive_ai_bidding(player_id, exclude_team_id);
        self.finalize_player(player_id)
    }

    pub fn auction_category_ai_only(&mut self, category: AuctionCategory, exclude_team_id: Option<TeamId>) -> Vec<BidResult> {
        let player_ids: Vec<PlayerId> = self
            .entries
            .iter()
            .filter(|e| e.status == AuctionPlayerStatus::Available && e.category == category)
            .map(|e| e.player_id)
            .collect();

        let mut results = Vec::with_capacity(player_ids.len());
        for player_id in player_ids {
            self.start_bidding(player_id);
            self.run_competitive_ai_bidding(player_id, exclude_team_id);
            results.push(self.finalize_player(player_id));
        }
        results
    }

    /// Bidding with the user participating up to `user_max_bid`. Returns
    /// early with `CapExceeded`/`BudgetLimit` so a caller can offer the
    /// user a chance to raise their cap; otherwise runs to completion and
    /// reports `Won`/`Lost`.
    pub fn run_auto_bid_competition(
        &mut self,
        player_id: PlayerId,
        user_team_id: TeamId,
        user_max_bid: i64,
    ) -> AutoBidResult {
        let other_team_ids: Vec<TeamId> = self
            .team_states
            .keys()
            .copied()
            .filter(|id| *id != user_team_id)
            .collect();

        let is_overseas = self.players[&player_id].is_overseas;
        let mut consecutive_passes = 0;

        for _ in 0..200 {
            if consecutive_passes >= 2 {
                break;
            }
            let current_bid = self.auction.current_bid;
            let next_bid = self.get_next_bid_amount(current_bid);
            let current_bidder = self.auction.current_bidder_team_id;
            let user_is_highest = current_bidder == Some(user_team_id);
            let user_max_possible = self.team_states[&user_team_id].max_bid_possible();

            if !user_is_highest {
                if next_bid > user_max_bid {
                    return AutoBidResult {
                        status: AutoBidStatus::CapExceeded,
                        final_result: None,
                        current_bid,
                        current_bidder_team_id: current_bidder,
                        next_bid_needed: next_bid,
                    };
                }
                if next_bid > user_max_possible {
                    return AutoBidResult {
                        status: AutoBidStatus::BudgetLimit,
                        final_result: None,
                        current_bid,
                        current_bidder_team_id: current_bidder,
                        next_bid_needed: next_bid,
                    };
                }
            }

            let user_total_players = self.team_states[&user_team_id].total_players;
            let user_overseas_players = self.team_states[&user_team_id].overseas_players;

            let mut willing = Vec::new();
            if !user_is_highest
                && next_bid <= user_max_bid
                && next_bid <= user_max_possible
                && user_total_players < 25
                && (!is_overseas || user_overseas_players < 8)
            {
                willing.push(user_team_id);
            }

            for &team_id in &other_team_ids {
                if Some(team_id) == current_bidder {
                    continue;
                }
                if self.should_team_bid(team_id, player_id, current_bid) {
                    willing.push(team_id);
                }
            }

            if willing.is_empty() {
                consecutive_passes += 1;
                continue;
            }
            let bidder = *willing.choose(&mut self.rng).expect("willing is non-empty");
            if self.place_bid(bidder, player_id, next_bid) {
                consecutive_passes = 0;
            } else {
                consecutive_passes += 1;
            }
        }

        let result = self.finalize_player(player_id);
        let status = if result.winning_team_id == Some(user_team_id) {
            AutoBidStatus::Won
        } else {
            AutoBidStatus::Lost
        };

        AutoBidResult {
            current_bid: result.winning_bid,
            current_bidder_team_id: result.winning_team_id,
            status,
            final_result: Some(result),
            next_bid_needed: 0,
        }
    }

    pub fn is_auction_complete(&self) -> bool {
        self.entries.iter().all(|e| e.status != AuctionPlayerStatus::Available)
    }

    pub fn complete_auction(&mut self) {
        self.auction.status = AuctionStatus::Completed;
    }

    pub fn remaining_players_by_category(&self) -> HashMap<AuctionCategory, Vec<PlayerId>> {
        let mut out: HashMap<AuctionCategory, Vec<PlayerId>> = HashMap::new();
        for entry in self.entries.iter().filter(|e| e.status == AuctionPlayerStatus::Available) {
            out.entry(entry.category).or_default().push(entry.player_id);
        }
        out
    }
}
