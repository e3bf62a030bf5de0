//! Customer service domain
//!
//! Incident reports filed by customers (unauthorized transactions,
//! complaints, feedback) and their resolution workflow.

pub mod error;
pub mod report;

pub use error::SupportError;
pub use report::{ReportCategory, ReportStatus, SupportReport};
