//! Digital tokens and human-readable reference numbers
//!
//! Every registered customer is issued an 8-character uppercase digital
//! token which acts as a second factor at login. Policy and claim
//! numbers combine a timestamp with a short
//! random suffix so they sort roughly by creation time while staying
//! unguessable.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Length of a digital token in characters
pub const TOKEN_LEN: usize = 8;

/// Errors from parsing a digital token
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Digital token must be exactly {TOKEN_LEN} characters")]
    WrongLength,

    #[error("Digital token must be uppercase alphanumeric")]
    InvalidCharacter,
}

/// An 8-character uppercase customer verification token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DigitalToken(String);

impl DigitalToken {
    /// Generates a fresh random token
    pub fn generate() -> Self {
        let raw = Uuid::new_v4().simple().to_string().to_uppercase();
        Self(raw[..TOKEN_LEN].to_string())
    }

    /// Returns the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DigitalToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != TOKEN_LEN {
            return Err(TokenError::WrongLength);
        }
        if !s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
            return Err(TokenError::InvalidCharacter);
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for DigitalToken {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DigitalToken> for String {
    fn from(token: DigitalToken) -> String {
        token.0
    }
}

impl fmt::Display for DigitalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates a human-readable policy number, e.g. `POL202608261430A1B2C3`
pub fn policy_number() -> String {
    reference_number("POL")
}

/// Generates a human-readable claim number, e.g. `CLM202608261430A1B2C3`
pub fn claim_number() -> String {
    reference_number("CLM")
}

fn reference_number(prefix: &str) -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M");
    let suffix = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{}{}{}", prefix, stamp, &suffix[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_token_shape() {
        let token = DigitalToken::generate();
        assert_eq!(token.as_str().len(), TOKEN_LEN);
        assert!(token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_token_parse_rejects_bad_input() {
        assert_eq!("SHORT".parse::<DigitalToken>(), Err(TokenError::WrongLength));
        assert_eq!(
            "abcd1234".parse::<DigitalToken>(),
            Err(TokenError::InvalidCharacter)
        );
        assert!("AB12CD34".parse::<DigitalToken>().is_ok());
    }

    #[test]
    fn test_reference_numbers() {
        let pol = policy_number();
        let clm = claim_number();
        assert!(pol.starts_with("POL"));
        assert!(clm.starts_with("CLM"));
        assert_eq!(pol.len(), 3 + 12 + 6);
    }
}
