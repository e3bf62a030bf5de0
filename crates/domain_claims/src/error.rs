//! Claims domain errors

use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Invalid status transition attempted
    #[error("Invalid claim status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Claimed amount must be positive
    #[error("Claimed amount must be positive, got {0}")]
    NonPositiveAmount(String),

    /// Claimed amount exceeds the policy cover
    #[error("Claimed amount {claimed} exceeds policy cover {cover}")]
    ExceedsCover { claimed: String, cover: String },

    /// Claims are only accepted against in-force policies
    #[error("Policy is not active; claims require an in-force policy")]
    PolicyNotActive,

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}
