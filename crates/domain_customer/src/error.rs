//! Customer domain errors

use thiserror::Error;

use crate::verification::VerificationError;

/// Errors that can occur in the customer domain
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Profile validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// PAN does not match the required format
    #[error("Invalid PAN number format: {0}")]
    InvalidPan(String),

    /// Applicant age outside the 18..=100 registration window
    #[error("Age {age} is outside the accepted range (18-100)")]
    AgeOutOfRange { age: i32 },

    /// Presented digital token does not match the one on file
    #[error("Digital token does not match")]
    TokenMismatch,

    /// Credential hashing failed
    #[error("Credential error: {0}")]
    Credential(String),

    /// Verification provider failure
    #[error("Verification error: {0}")]
    Verification(#[from] VerificationError),
}
