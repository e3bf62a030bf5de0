//! Test Utilities Crate
//!
//! Shared test infrastructure for the platform test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `database`: In-memory database helpers

pub mod builders;
pub mod database;
pub mod fixtures;

pub use builders::*;
pub use database::*;
pub use fixtures::*;
