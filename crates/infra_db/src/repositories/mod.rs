//! Repository implementations for each aggregate

pub mod claims;
pub mod customers;
pub mod policies;
pub mod reports;

pub use claims::ClaimRepository;
pub use customers::CustomerRepository;
pub use policies::PolicyRepository;
pub use reports::ReportRepository;
