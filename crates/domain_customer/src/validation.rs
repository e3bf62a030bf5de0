//! Registration validation rules
//!
//! # Validation Rules
//!
//! - Username, full name, phone, and address must be non-empty
//! - Email must look like an address (local part, `@`, domain with a dot)
//! - Date of birth must be in the past
//! - Phone must be 10-15 digits (optionally prefixed with `+`)

use chrono::Utc;

use crate::customer::RegistrationDetails;

/// Result of customer validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the details are valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for registration details
///
/// PAN format is enforced by the `Pan` type itself; this validator covers
/// the remaining profile fields.
pub struct CustomerValidator;

impl CustomerValidator {
    /// Validates registration details
    pub fn validate(details: &RegistrationDetails) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if details.username.trim().is_empty() {
            result.add_error("Username is required");
        }
        if details.full_name.trim().is_empty() {
            result.add_error("Full name is required");
        }
        if details.address.trim().is_empty() {
            result.add_error("Address is required");
        }

        Self::validate_email(&details.email, &mut result);
        Self::validate_phone(&details.phone, &mut result);

        if details.date_of_birth >= Utc::now().date_naive() {
            result.add_error("Date of birth must be in the past");
        }

        result
    }

    fn validate_email(email: &str, result: &mut ValidationResult) {
        let email = email.trim();
        let parts: Vec<&str> = email.splitn(2, '@').collect();
        let valid = parts.len() == 2
            && !parts[0].is_empty()
            && parts[1].contains('.')
            && !parts[1].starts_with('.')
            && !parts[1].ends_with('.');
        if !valid {
            result.add_error(format!("Invalid email format: {}", email));
        }
    }

    fn validate_phone(phone: &str, result: &mut ValidationResult) {
        let digits = phone.trim().strip_prefix('+').unwrap_or(phone.trim());
        if digits.is_empty() {
            result.add_error("Phone number is required");
            return;
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            result.add_error("Phone number must contain only digits");
        } else if !(10..=15).contains(&digits.len()) {
            result.add_warning("Phone number length is unusual");
        }
    }
}
