//! Core Kernel - Foundational types for the SecureBank insurance platform
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Digital tokens and reference-number generation

pub mod money;
pub mod identifiers;
pub mod token;

pub use money::{Money, Currency, MoneyError, Rate};
pub use identifiers::{CustomerId, PolicyId, NomineeId, ClaimId, ReportId};
pub use token::{DigitalToken, policy_number, claim_number};
