//! Policy administration domain
//!
//! This crate covers the product side of the platform:
//! - The static catalog of offered insurance plans
//! - The pure premium calculator over age-band rate tables
//! - The policy lifecycle aggregate with its 24-hour no-fee
//!   cancellation window

pub mod catalog;
pub mod premium;
pub mod policy;
pub mod events;
pub mod error;

pub use catalog::{Catalog, PlanCategory, RateBand, Scheme};
pub use error::PolicyError;
pub use events::PolicyEvent;
pub use policy::{LapseReason, Nominee, Policy, PolicyState, GRACE_WINDOW_HOURS};
pub use premium::{calculate_premium, PremiumQuote};
