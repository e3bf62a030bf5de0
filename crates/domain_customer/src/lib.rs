//! Customer domain
//!
//! This crate owns everything about the people the platform serves:
//! registration with profile validation, credential hashing, the PAN
//! tax-identity key, and the port through which biometric/OCR
//! verification results enter the system.

pub mod customer;
pub mod credentials;
pub mod validation;
pub mod verification;
pub mod error;

pub use customer::{AccountStatus, Customer, Gender, Pan, RegistrationDetails, VerificationFlags};
pub use credentials::{hash_password, verify_password};
pub use error::CustomerError;
pub use validation::{CustomerValidator, ValidationResult};
pub use verification::{SimulatedVerifier, VerificationOutcome, VerificationProvider};
