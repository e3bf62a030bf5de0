//! Biometric/OCR verification port
//!
//! The platform never runs computer-vision inference itself; it consumes a
//! structured pass/fail result from an external provider. The
//! `VerificationProvider` trait is that boundary, and `SimulatedVerifier`
//! is the shipped implementation which approves every check, mirroring
//! the simulated flow of the original product.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors from a verification provider
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Unreadable capture: {0}")]
    UnreadableCapture(String),
}

/// Structured result of a verification or OCR call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Whether the check passed
    pub passed: bool,
    /// Fields extracted from the capture (e.g. OCR of an identity document)
    pub extracted_fields: HashMap<String, String>,
}

impl VerificationOutcome {
    /// A passing outcome with no extracted fields
    pub fn passed() -> Self {
        Self {
            passed: true,
            extracted_fields: HashMap::new(),
        }
    }

    /// A failing outcome with no extracted fields
    pub fn failed() -> Self {
        Self {
            passed: false,
            extracted_fields: HashMap::new(),
        }
    }

    /// Adds an extracted field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extracted_fields.insert(key.into(), value.into());
        self
    }
}

/// Port for external biometric and document verification services
#[async_trait]
pub trait VerificationProvider: Send + Sync {
    /// Verifies a face capture
    async fn verify_face(&self, capture: &[u8]) -> Result<VerificationOutcome, VerificationError>;

    /// Verifies a retina capture
    async fn verify_retina(&self, capture: &[u8])
        -> Result<VerificationOutcome, VerificationError>;

    /// Extracts fields from an identity document capture
    async fn extract_document_fields(
        &self,
        capture: &[u8],
    ) -> Result<VerificationOutcome, VerificationError>;
}

/// Verification provider that approves every check
#[derive(Debug, Clone, Default)]
pub struct SimulatedVerifier;

#[async_trait]
impl VerificationProvider for SimulatedVerifier {
    async fn verify_face(&self, capture: &[u8]) -> Result<VerificationOutcome, VerificationError> {
        debug!(bytes = capture.len(), "simulated face verification");
        Ok(VerificationOutcome::passed())
    }

    async fn verify_retina(
        &self,
        capture: &[u8],
    ) -> Result<VerificationOutcome, VerificationError> {
        debug!(bytes = capture.len(), "simulated retina verification");
        Ok(VerificationOutcome::passed())
    }

    async fn extract_document_fields(
        &self,
        capture: &[u8],
    ) -> Result<VerificationOutcome, VerificationError> {
        debug!(bytes = capture.len(), "simulated document OCR");
        Ok(VerificationOutcome::passed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_verifier_passes_everything() {
        let verifier = SimulatedVerifier;
        assert!(verifier.verify_face(b"capture").await.unwrap().passed);
        assert!(verifier.verify_retina(b"capture").await.unwrap().passed);
        assert!(
            verifier
                .extract_document_fields(b"capture")
                .await
                .unwrap()
                .passed
        );
    }

    #[test]
    fn test_outcome_fields() {
        let outcome = VerificationOutcome::passed().with_field("pan", "ABCDE1234F");
        assert_eq!(
            outcome.extracted_fields.get("pan").map(String::as_str),
            Some("ABCDE1234F")
        );
    }
}
