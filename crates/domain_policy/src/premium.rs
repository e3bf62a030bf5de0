//! Pure premium calculation
//!
//! Premiums are quoted from the scheme's age-band rate table:
//!
//! ```text
//! annual  = rate_per_mille * (cover / 1000) * tier_factor
//! monthly = annual / 12
//! ```
//!
//! Both figures are rounded to whole rupees with banker's rounding. The
//! tier factor rewards larger covers with a small volume discount. The
//! calculation has no side effects and reads no clocks; callers supply
//! the entry age.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::catalog::Scheme;
use crate::error::PolicyError;

/// A quoted premium for a scheme, cover, and entry age
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumQuote {
    /// Annual premium, whole rupees
    pub annual: Money,
    /// Monthly premium, whole rupees
    pub monthly: Money,
}

/// Volume discount factor for the cover size
fn tier_factor(cover: &Money) -> Decimal {
    let amount = cover.amount();
    if amount < dec!(1_000_000) {
        dec!(1.0)
    } else if amount < dec!(5_000_000) {
        dec!(0.95)
    } else {
        dec!(0.90)
    }
}

/// Quotes the premium for a scheme at a given entry age and cover
///
/// Fails with `InvalidInput` when the cover is not positive, lies
/// outside the scheme's limits, or the age falls outside the scheme's
/// entry window.
pub fn calculate_premium(
    scheme: &Scheme,
    age: u8,
    cover: Money,
) -> Result<PremiumQuote, PolicyError> {
    if !cover.is_positive() {
        return Err(PolicyError::invalid_input(format!(
            "cover must be positive, got {cover}"
        )));
    }
    if cover.amount() < scheme.min_cover.amount() || cover.amount() > scheme.max_cover.amount() {
        return Err(PolicyError::invalid_input(format!(
            "cover {} outside limits {} to {} for plan {}",
            cover, scheme.min_cover, scheme.max_cover, scheme.code
        )));
    }
    let band = scheme.rate_for_age(age).ok_or_else(|| {
        PolicyError::invalid_input(format!(
            "age {} outside entry window {}-{} for plan {}",
            age, scheme.min_entry_age, scheme.max_entry_age, scheme.code
        ))
    })?;

    let per_mille = cover
        .divide(dec!(1000))
        .map_err(|e| PolicyError::Financial(e.to_string()))?;
    let annual = per_mille
        .multiply(band.rate_per_mille)
        .multiply(tier_factor(&cover))
        .round_bankers(0);
    let monthly = annual
        .divide(dec!(12))
        .map_err(|e| PolicyError::Financial(e.to_string()))?
        .round_bankers(0);

    Ok(PremiumQuote { annual, monthly })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_term_quote_at_thirty() {
        let catalog = Catalog::standard();
        let scheme = catalog.require("TERM-10").unwrap();
        let quote = calculate_premium(scheme, 30, Money::rupees(5_000_000)).unwrap();
        // 1.4 * 5000 * 0.90 = 6300
        assert_eq!(quote.annual, Money::rupees(6300));
        assert_eq!(quote.monthly, Money::rupees(525));
    }

    #[test]
    fn test_rejects_cover_below_plan_minimum() {
        let catalog = Catalog::standard();
        let scheme = catalog.require("TERM-10").unwrap();
        let err = calculate_premium(scheme, 30, Money::rupees(100)).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_age_outside_window() {
        let catalog = Catalog::standard();
        let scheme = catalog.require("TERM-10").unwrap();
        let err = calculate_premium(scheme, 70, Money::rupees(1_000_000)).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidInput(_)));
    }
}
