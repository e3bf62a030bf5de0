//! SQLite persistence layer
//!
//! The crate follows the repository pattern: each aggregate gets a
//! repository that maps between flat SQLite rows and the domain types.
//! Monetary amounts are stored as integer minor units (paise) and
//! identifiers as their prefixed string form.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use migrations::run_migrations;
pub use pool::{create_pool, DatabaseConfig, DatabasePool};
pub use repositories::{
    ClaimRepository, CustomerRepository, PolicyRepository, ReportRepository,
};
