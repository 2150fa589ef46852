// Client-oriented error kinds for the core's operation surface
// (SPEC_FULL.md 7). Engine internals never raise these directly; they
// return structured accept/reject results, and only the service layer
// wrapping an engine call translates a rejection into a `CoreError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("operation invalid in current state: {reason}")]
    InvalidState { reason: String },

    #[error("validation failed for {field}: {message}")]
    ValidationFailure { field: String, message: String },

    #[error("capacity exceeded: {reason}")]
    CapacityExceeded { reason: String },

    #[error("bid {bid} exceeds max bid possible {max_bid_possible}")]
    AffordabilityFailure { bid: i64, max_bid_possible: i64 },

    #[error("transient failure, retry the request: {reason}")]
    TransientRetryable { reason: String },

    #[error("internal invariant violation: {0}")]
    Internal(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
