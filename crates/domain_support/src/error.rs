//! Customer service domain errors

use thiserror::Error;

/// Errors that can occur in the customer service domain
#[derive(Debug, Error)]
pub enum SupportError {
    /// Invalid status transition attempted
    #[error("Invalid report status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}
