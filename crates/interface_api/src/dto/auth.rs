//! Authentication DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::customer::CustomerResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 128))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 10, max = 15))]
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    #[validate(length(min = 1, max = 256))]
    pub address: String,
    pub pan: String,
    /// Simulated face capture payload
    pub face_capture: Option<String>,
    /// Simulated retina capture payload
    pub retina_capture: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub customer: CustomerResponse,
    /// Second-factor token, shown once at registration
    pub digital_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// The digital token issued at registration
    pub digital_token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}
