//! Request handlers for each domain

pub mod auth;
pub mod claims;
pub mod customers;
pub mod health;
pub mod policies;
pub mod schemes;
pub mod support;

use core_kernel::CustomerId;

use crate::auth::Claims;
use crate::error::ApiError;

/// Resolves the acting customer from the JWT subject
pub(crate) fn current_customer_id(claims: &Claims) -> Result<CustomerId, ApiError> {
    claims.sub.parse().map_err(|_| ApiError::Unauthorized)
}
