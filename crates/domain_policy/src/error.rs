//! Policy domain errors

use thiserror::Error;

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Invalid state transition attempted
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    /// Premium calculation received input outside the plan's limits
    #[error("Invalid premium input: {0}")]
    InvalidInput(String),

    /// Unknown plan code
    #[error("Unknown plan code: {0}")]
    UnknownPlan(String),

    /// Cancellation requested after the no-fee window closed
    #[error("Cancellation window of {window_hours}h closed {hours_since_activation}h after activation; a penalty applies")]
    PenaltyRequired {
        window_hours: i64,
        hours_since_activation: i64,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Financial calculation error
    #[error("Financial error: {0}")]
    Financial(String),
}

impl PolicyError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PolicyError::Validation(message.into())
    }

    /// Creates an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        PolicyError::InvalidInput(message.into())
    }
}
