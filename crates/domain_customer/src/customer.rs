//! Customer aggregate
//!
//! A customer is created through registration and carries the digital
//! token used as a second factor for policy and claim operations.
//!
//! # Invariants
//!
//! - PAN, username, email, and digital token are unique across customers
//!   (enforced by the persistence layer; the aggregate validates formats)
//! - Registration requires an age between 18 and 100 inclusive

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CustomerId, DigitalToken};

use crate::error::CustomerError;
use crate::validation::CustomerValidator;
use crate::verification::VerificationOutcome;

/// Permanent Account Number - the tax-identity uniqueness key
///
/// Format: five uppercase letters, four digits, one uppercase letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pan(String);

impl Pan {
    /// Returns the PAN as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Pan {
    type Err = CustomerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let bytes = normalized.as_bytes();
        let valid = bytes.len() == 10
            && bytes[..5].iter().all(|b| b.is_ascii_uppercase())
            && bytes[5..9].iter().all(|b| b.is_ascii_digit())
            && bytes[9].is_ascii_uppercase();

        if valid {
            Ok(Self(normalized))
        } else {
            Err(CustomerError::InvalidPan(s.to_string()))
        }
    }
}

impl TryFrom<String> for Pan {
    type Error = CustomerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pan> for String {
    fn from(pan: Pan) -> String {
        pan.0
    }
}

impl fmt::Display for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer gender as captured at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = CustomerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(CustomerError::Validation(format!(
                "Unknown gender: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Suspended,
    Closed,
}

impl AccountStatus {
    /// Short status name for diagnostics and persistence
    pub fn name(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Suspended => "suspended",
            AccountStatus::Closed => "closed",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = CustomerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AccountStatus::Active),
            "suspended" => Ok(AccountStatus::Suspended),
            "closed" => Ok(AccountStatus::Closed),
            other => Err(CustomerError::Validation(format!(
                "Unknown account status: {}",
                other
            ))),
        }
    }
}

/// Details captured on the registration form
#[derive(Debug, Clone)]
pub struct RegistrationDetails {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub address: String,
    pub pan: Pan,
}

/// Biometric verification flags recorded on the profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationFlags {
    pub face_verified: bool,
    pub retina_verified: bool,
}

impl VerificationFlags {
    /// True when every required check has passed
    pub fn is_fully_verified(&self) -> bool {
        self.face_verified && self.retina_verified
    }
}

/// The customer aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    digital_token: DigitalToken,
    username: String,
    password_hash: String,
    full_name: String,
    email: String,
    phone: String,
    date_of_birth: NaiveDate,
    age: u8,
    gender: Gender,
    address: String,
    pan: Pan,
    verification: VerificationFlags,
    profile_photo: Option<String>,
    status: AccountStatus,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl Customer {
    /// Registers a new customer
    ///
    /// Validates the profile, derives the age from date of birth, and
    /// issues a fresh digital token. The password must already be hashed
    /// by the credentials module.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::Validation` when the profile fails
    /// validation or `CustomerError::AgeOutOfRange` for applicants
    /// younger than 18 or older than 100.
    pub fn register(
        details: RegistrationDetails,
        password_hash: String,
    ) -> Result<Self, CustomerError> {
        let result = CustomerValidator::validate(&details);
        if !result.is_valid {
            return Err(CustomerError::Validation(result.errors.join("; ")));
        }

        let now = Utc::now();
        let age = age_on(details.date_of_birth, now.date_naive());
        if !(18..=100).contains(&age) {
            return Err(CustomerError::AgeOutOfRange { age });
        }

        Ok(Self {
            id: CustomerId::new_v7(),
            digital_token: DigitalToken::generate(),
            username: details.username.trim().to_string(),
            password_hash,
            full_name: details.full_name.trim().to_string(),
            email: details.email.trim().to_lowercase(),
            phone: details.phone.trim().to_string(),
            date_of_birth: details.date_of_birth,
            age: age as u8,
            gender: details.gender,
            address: details.address.trim().to_string(),
            pan: details.pan,
            verification: VerificationFlags::default(),
            profile_photo: None,
            status: AccountStatus::Active,
            created_at: now,
            last_login: None,
        })
    }

    /// Rehydrates a customer from stored state
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: CustomerId,
        digital_token: DigitalToken,
        username: String,
        password_hash: String,
        full_name: String,
        email: String,
        phone: String,
        date_of_birth: NaiveDate,
        age: u8,
        gender: Gender,
        address: String,
        pan: Pan,
        verification: VerificationFlags,
        profile_photo: Option<String>,
        status: AccountStatus,
        created_at: DateTime<Utc>,
        last_login: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            digital_token,
            username,
            password_hash,
            full_name,
            email,
            phone,
            date_of_birth,
            age,
            gender,
            address,
            pan,
            verification,
            profile_photo,
            status,
            created_at,
            last_login,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn digital_token(&self) -> &DigitalToken {
        &self.digital_token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn pan(&self) -> &Pan {
        &self.pan
    }

    pub fn verification(&self) -> VerificationFlags {
        self.verification
    }

    pub fn profile_photo(&self) -> Option<&str> {
        self.profile_photo.as_deref()
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    /// Presents the caller's digital token for a sensitive operation
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::TokenMismatch` when the presented token
    /// does not match the one on file.
    pub fn verify_token(&self, presented: &DigitalToken) -> Result<(), CustomerError> {
        if &self.digital_token == presented {
            Ok(())
        } else {
            Err(CustomerError::TokenMismatch)
        }
    }

    /// Records a successful login
    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login = Some(at);
    }

    /// Applies the outcome of a face verification check
    pub fn apply_face_verification(&mut self, outcome: &VerificationOutcome) {
        self.verification.face_verified = outcome.passed;
    }

    /// Applies the outcome of a retina verification check
    pub fn apply_retina_verification(&mut self, outcome: &VerificationOutcome) {
        self.verification.retina_verified = outcome.passed;
    }

    /// Attaches a profile photo reference
    pub fn attach_photo(&mut self, path: impl Into<String>) {
        self.profile_photo = Some(path.into());
    }
}

/// Calculates completed years between `dob` and `today`
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> RegistrationDetails {
        RegistrationDetails {
            username: "asha.verma".to_string(),
            full_name: "Asha Verma".to_string(),
            email: "Asha.Verma@Example.com".to_string(),
            phone: "9876543210".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 20).unwrap(),
            gender: Gender::Female,
            address: "14 MG Road, Pune".to_string(),
            pan: "ABCDE1234F".parse().unwrap(),
        }
    }

    #[test]
    fn test_pan_format() {
        assert!("ABCDE1234F".parse::<Pan>().is_ok());
        assert!("abcde1234f".parse::<Pan>().is_ok(), "lowercase is normalized");
        assert!("ABCD1234F".parse::<Pan>().is_err(), "too short");
        assert!("ABCDE12345".parse::<Pan>().is_err(), "missing final letter");
    }

    #[test]
    fn test_register_normalizes_email() {
        let customer = Customer::register(details(), "hash".to_string()).unwrap();
        assert_eq!(customer.email(), "asha.verma@example.com");
        assert_eq!(customer.status(), AccountStatus::Active);
        assert!(!customer.verification().is_fully_verified());
    }

    #[test]
    fn test_register_rejects_minors() {
        let mut d = details();
        d.date_of_birth = Utc::now().date_naive() - chrono::Duration::days(365 * 10);
        let err = Customer::register(d, "hash".to_string()).unwrap_err();
        assert!(matches!(err, CustomerError::AgeOutOfRange { .. }));
    }

    #[test]
    fn test_token_verification() {
        let customer = Customer::register(details(), "hash".to_string()).unwrap();
        let token = customer.digital_token().clone();
        assert!(customer.verify_token(&token).is_ok());

        let other = DigitalToken::generate();
        assert!(matches!(
            customer.verify_token(&other),
            Err(CustomerError::TokenMismatch)
        ));
    }

    #[test]
    fn test_age_on_handles_birthday_boundary() {
        let dob = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        let day_before = NaiveDate::from_ymd_opt(2020, 6, 14).unwrap();
        let birthday = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
        assert_eq!(age_on(dob, day_before), 29);
        assert_eq!(age_on(dob, birthday), 30);
    }
}
