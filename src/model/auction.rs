// Auction entities: the event, the per-player queue entry, individual bids,
// and each team's running auction-state counters.

use serde::{Deserialize, Serialize};

use super::career::SeasonId;
use super::player::PlayerId;
use super::team::TeamId;

pub type AuctionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionStatus {
    NotStarted,
    InProgress,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionPlayerStatus {
    Available,
    InBidding,
    Sold,
    Unsold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionCategory {
    Marquee,
    Batsmen,
    Bowlers,
    AllRounders,
    WicketKeepers,
}

impl AuctionCategory {
    /// Stable sort key for category ordering: marquee first, then by role.
    pub fn order(self) -> u8 {
        match self {
            AuctionCategory::Marquee => 0,
            AuctionCategory::Batsmen => 1,
            AuctionCategory::Bowlers => 2,
            AuctionCategory::AllRounders => 3,
            AuctionCategory::WicketKeepers => 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    pub id: AuctionId,
    pub season_id: SeasonId,
    pub status: AuctionStatus,

    pub current_player_id: Option<PlayerId>,
    pub current_bid: i64,
    pub current_bidder_team_id: Option<TeamId>,

    pub salary_cap: i64,
    pub min_squad_size: i32,
    pub max_squad_size: i32,
    pub max_overseas: i32,

    pub players_sold: i32,
    pub players_unsold: i32,
    pub total_players: i32,

    pub current_category: Option<AuctionCategory>,
}

impl Auction {
    pub fn new(id: AuctionId, season_id: SeasonId, salary_cap: i64, total_players: i32) -> Self {
        Auction {
            id,
            season_id,
            status: AuctionStatus::NotStarted,
            current_player_id: None,
            current_bid: 0,
            current_bidder_team_id: None,
            salary_cap,
            min_squad_size: 18,
            max_squad_size: 25,
            max_overseas: 8,
            players_sold: 0,
            players_unsold: 0,
            total_players,
            current_category: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionPlayerEntry {
    pub auction_id: AuctionId,
    pub player_id: PlayerId,
    pub auction_order: i32,
    pub status: AuctionPlayerStatus,
    pub category: AuctionCategory,
    pub sold_to_team_id: Option<TeamId>,
    pub sold_price: Option<i64>,
    pub auction_set: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionBid {
    pub auction_id: AuctionId,
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub bid_amount: i64,
    /// Monotonic sequence number standing in for a wall-clock timestamp;
    /// the engine owns no notion of real time (see SPEC_FULL.md 5).
    pub sequence: u64,
    pub is_winning_bid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamAuctionState {
    pub auction_id: AuctionId,
    pub team_id: TeamId,

    pub remaining_budget: i64,

    pub total_players: i32,
    pub overseas_players: i32,
    pub batsmen: i32,
    pub bowlers: i32,
    pub all_rounders: i32,
    pub wicket_keepers: i32,
}

impl TeamAuctionState {
    pub fn new(auction_id: AuctionId, team_id: TeamId, budget: i64) -> Self {
        TeamAuctionState {
            auction_id,
            team_id,
            remaining_budget: budget,
            total_players: 0,
            overseas_players: 0,
            batsmen: 0,
            bowlers: 0,
            all_rounders: 0,
            wicket_keepers: 0,
        }
    }

    pub fn slots_remaining(&self) -> i32 {
        25 - self.total_players
    }

    pub fn overseas_slots_remaining(&self) -> i32 {
        8 - self.overseas_players
    }

    pub fn min_players_needed(&self) -> i32 {
        (18 - self.total_players).max(0)
    }

    /// remaining_budget - (min_players_needed - 1) * 2,000,000, floored at 0.
    pub fn max_bid_possible(&self) -> i64 {
        let slots_to_fill = (self.min_players_needed() - 1).max(0) as i64;
        let reserved = slots_to_fill * 2_000_000;
        (self.remaining_budget - reserved).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_bid_possible_matches_scenario_2() {
        // Player base price 2,000,000, team remaining budget 3,000,000,
        // min-players-needed 2. max-bid-possible = 3,000,000 - 1*2,000,000
        // = 1,000,000 (SPEC_FULL.md 8, scenario 2).
        let mut state = TeamAuctionState::new(1, 1, 3_000_000);
        state.total_players = 16; // min_players_needed = 18 - 16 = 2
        assert_eq!(state.min_players_needed(), 2);
        assert_eq!(state.max_bid_possible(), 1_000_000);
    }

    #[test]
    fn max_bid_possible_never_negative() {
        let mut state = TeamAuctionState::new(1, 1, 1_000_000);
        state.total_players = 0; // min_players_needed = 18
        assert_eq!(state.max_bid_possible(), 0);
    }
}
