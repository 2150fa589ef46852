pub mod engine;

pub use engine::{AuctionEngine, AutoBidResult, AutoBidStatus, BidResult};
