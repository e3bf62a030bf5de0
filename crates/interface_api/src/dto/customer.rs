//! Customer DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use domain_customer::Customer;

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub age: u8,
    pub gender: String,
    pub address: String,
    pub pan: String,
    pub face_verified: bool,
    pub retina_verified: bool,
    pub profile_photo: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&Customer> for CustomerResponse {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            username: customer.username().to_string(),
            full_name: customer.full_name().to_string(),
            email: customer.email().to_string(),
            phone: customer.phone().to_string(),
            date_of_birth: customer.date_of_birth(),
            age: customer.age(),
            gender: customer.gender().to_string(),
            address: customer.address().to_string(),
            pan: customer.pan().as_str().to_string(),
            face_verified: customer.verification().face_verified,
            retina_verified: customer.verification().retina_verified,
            profile_photo: customer.profile_photo().map(str::to_string),
            status: customer.status().name().to_string(),
            created_at: customer.created_at(),
            last_login: customer.last_login(),
        }
    }
}
