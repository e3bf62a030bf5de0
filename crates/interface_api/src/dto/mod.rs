//! Request/response data transfer objects

pub mod auth;
pub mod claims;
pub mod customer;
pub mod policy;
pub mod support;
