//! Pre-built test fixtures
//!
//! Ready-to-use test data, consistent and predictable for unit tests.
//! Values that must be unique across a test database (usernames, PANs)
//! come from a process-wide counter.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use rust_decimal_macros::dec;

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

fn next_seq() -> u32 {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A small premium-sized amount
    pub fn premium() -> Money {
        Money::new(dec!(1500.00), Currency::INR)
    }

    /// A mid-range cover amount
    pub fn cover() -> Money {
        Money::rupees(1_500_000)
    }

    /// The smallest cover the shelf accepts
    pub fn minimum_cover() -> Money {
        Money::rupees(500_000)
    }

    /// A zero amount
    pub fn zero() -> Money {
        Money::zero(Currency::INR)
    }
}

/// Fixture for identity-document test data
pub struct IdentityFixtures;

impl IdentityFixtures {
    /// Generates a structurally valid PAN, unique within the process
    pub fn pan() -> String {
        let mut n = next_seq();
        let mut letters = [b'A'; 5];
        for slot in letters.iter_mut() {
            *slot = b'A' + (n % 26) as u8;
            n /= 26;
        }
        format!(
            "{}{:04}Z",
            std::str::from_utf8(&letters).expect("ascii letters"),
            next_seq() % 10_000
        )
    }

    /// Generates a username unique within the process
    pub fn username() -> String {
        format!("customer{:05}", next_seq())
    }

    /// A ten-digit phone number
    pub fn phone() -> String {
        format!("98{:08}", next_seq())
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Date of birth for a customer in their mid-thirties
    pub fn adult_dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 6, 15).expect("valid date")
    }

    /// Date of birth for a senior applicant
    pub fn senior_dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1960, 2, 1).expect("valid date")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pans_are_unique_and_well_formed() {
        let a = IdentityFixtures::pan();
        let b = IdentityFixtures::pan();
        assert_ne!(a, b);
        for pan in [a, b] {
            assert_eq!(pan.len(), 10);
            assert!(pan[..5].chars().all(|c| c.is_ascii_uppercase()));
            assert!(pan[5..9].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
