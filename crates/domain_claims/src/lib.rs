//! Claims domain
//!
//! Claim intake against an active policy, supporting document references,
//! and the adjudication state machine.

pub mod claim;
pub mod error;

pub use claim::{Claim, ClaimDocument, ClaimStatus, ClaimType};
pub use error::ClaimError;
