//! Static catalog of offered insurance plans
//!
//! The product shelf is fixed at build time. Each scheme carries its own
//! entry-age window, coverage limits, and the age-band rate table the
//! premium calculator reads from.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::error::PolicyError;

/// Broad product family a scheme belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanCategory {
    Term,
    WholeLife,
    Endowment,
    Child,
    Ulip,
    MoneyBack,
    Group,
    Pension,
}

/// A mortality rate band: rupees of annual premium per thousand of cover,
/// applicable to entry ages in `min_age..=max_age`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    pub min_age: u8,
    pub max_age: u8,
    pub rate_per_mille: Decimal,
}

impl RateBand {
    const fn new(min_age: u8, max_age: u8, rate_per_mille: Decimal) -> Self {
        Self {
            min_age,
            max_age,
            rate_per_mille,
        }
    }

    /// Whether this band covers the given entry age
    pub fn covers(&self, age: u8) -> bool {
        (self.min_age..=self.max_age).contains(&age)
    }
}

/// A single insurance plan on the shelf
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheme {
    /// Stable plan code, e.g. "TERM-10"
    pub code: String,
    pub name: String,
    pub category: PlanCategory,
    pub description: String,
    pub min_entry_age: u8,
    pub max_entry_age: u8,
    pub min_cover: Money,
    pub max_cover: Money,
    /// Policy term in years; `None` for whole-of-life products
    pub term_years: Option<u8>,
    pub rate_bands: Vec<RateBand>,
}

impl Scheme {
    /// Looks up the rate band for an entry age
    pub fn rate_for_age(&self, age: u8) -> Option<&RateBand> {
        self.rate_bands.iter().find(|band| band.covers(age))
    }
}

/// The fixed product shelf
#[derive(Debug, Clone)]
pub struct Catalog {
    schemes: Vec<Scheme>,
}

/// Standard adult rate table scaled by a per-product loading
fn standard_bands(loading: Decimal) -> Vec<RateBand> {
    [
        RateBand::new(18, 25, dec!(1.1)),
        RateBand::new(26, 35, dec!(1.4)),
        RateBand::new(36, 45, dec!(2.1)),
        RateBand::new(46, 55, dec!(3.6)),
        RateBand::new(56, 65, dec!(6.0)),
    ]
    .into_iter()
    .map(|band| RateBand {
        rate_per_mille: (band.rate_per_mille * loading).round_dp(4),
        ..band
    })
    .collect()
}

fn senior_bands() -> Vec<RateBand> {
    vec![
        RateBand::new(50, 60, dec!(9.5)),
        RateBand::new(61, 70, dec!(14.0)),
        RateBand::new(71, 80, dec!(22.0)),
    ]
}

impl Catalog {
    /// Builds the standard ten-plan shelf
    pub fn standard() -> Self {
        let schemes = vec![
            Scheme {
                code: "TERM-10".to_string(),
                name: "Secure Term Shield".to_string(),
                category: PlanCategory::Term,
                description: "Pure protection term cover for a 10-year horizon".to_string(),
                min_entry_age: 18,
                max_entry_age: 65,
                min_cover: Money::rupees(500_000),
                max_cover: Money::rupees(10_000_000),
                term_years: Some(10),
                rate_bands: standard_bands(dec!(1.0)),
            },
            Scheme {
                code: "WHOLE-LIFE".to_string(),
                name: "Lifetime Assurance".to_string(),
                category: PlanCategory::WholeLife,
                description: "Whole-of-life cover with guaranteed sum assured".to_string(),
                min_entry_age: 18,
                max_entry_age: 65,
                min_cover: Money::rupees(1_000_000),
                max_cover: Money::rupees(10_000_000),
                term_years: None,
                rate_bands: standard_bands(dec!(2.4)),
            },
            Scheme {
                code: "ENDOW-20".to_string(),
                name: "Golden Endowment".to_string(),
                category: PlanCategory::Endowment,
                description: "20-year endowment combining protection with maturity benefit"
                    .to_string(),
                min_entry_age: 18,
                max_entry_age: 60,
                min_cover: Money::rupees(800_000),
                max_cover: Money::rupees(5_000_000),
                term_years: Some(20),
                rate_bands: standard_bands(dec!(3.2)),
            },
            Scheme {
                code: "CHILD-18".to_string(),
                name: "Bright Future Child Plan".to_string(),
                category: PlanCategory::Child,
                description: "Savings plan maturing when the nominated child turns 18".to_string(),
                min_entry_age: 21,
                max_entry_age: 55,
                min_cover: Money::rupees(800_000),
                max_cover: Money::rupees(4_000_000),
                term_years: Some(18),
                rate_bands: standard_bands(dec!(2.0)),
            },
            Scheme {
                code: "ULIP-15".to_string(),
                name: "Wealth Builder ULIP".to_string(),
                category: PlanCategory::Ulip,
                description: "Unit-linked plan with a 15-year investment horizon".to_string(),
                min_entry_age: 18,
                max_entry_age: 60,
                min_cover: Money::rupees(1_000_000),
                max_cover: Money::rupees(10_000_000),
                term_years: Some(15),
                rate_bands: standard_bands(dec!(2.8)),
            },
            Scheme {
                code: "MONEYBACK-20".to_string(),
                name: "Periodic Money Back".to_string(),
                category: PlanCategory::MoneyBack,
                description: "20-year plan returning survival benefits every 5 years".to_string(),
                min_entry_age: 18,
                max_entry_age: 55,
                min_cover: Money::rupees(800_000),
                max_cover: Money::rupees(5_000_000),
                term_years: Some(20),
                rate_bands: standard_bands(dec!(3.0)),
            },
            Scheme {
                code: "GROUP-LIFE".to_string(),
                name: "Group Life Cover".to_string(),
                category: PlanCategory::Group,
                description: "Employer-sponsored group life cover".to_string(),
                min_entry_age: 18,
                max_entry_age: 65,
                min_cover: Money::rupees(800_000),
                max_cover: Money::rupees(5_000_000),
                term_years: Some(1),
                rate_bands: standard_bands(dec!(0.8)),
            },
            Scheme {
                code: "PENSION-60".to_string(),
                name: "Retire Assure Pension".to_string(),
                category: PlanCategory::Pension,
                description: "Deferred annuity plan vesting at age 60".to_string(),
                min_entry_age: 25,
                max_entry_age: 55,
                min_cover: Money::rupees(1_000_000),
                max_cover: Money::rupees(8_000_000),
                term_years: None,
                rate_bands: standard_bands(dec!(2.6)),
            },
            Scheme {
                code: "WOMEN-TERM".to_string(),
                name: "Suraksha Women's Term".to_string(),
                category: PlanCategory::Term,
                description: "Term cover at preferential women's rates".to_string(),
                min_entry_age: 18,
                max_entry_age: 65,
                min_cover: Money::rupees(800_000),
                max_cover: Money::rupees(10_000_000),
                term_years: Some(15),
                rate_bands: standard_bands(dec!(0.9)),
            },
            Scheme {
                code: "SENIOR-50".to_string(),
                name: "Senior Citizen Shield".to_string(),
                category: PlanCategory::WholeLife,
                description: "Guaranteed-issue cover for applicants aged 50 to 80".to_string(),
                min_entry_age: 50,
                max_entry_age: 80,
                min_cover: Money::rupees(800_000),
                max_cover: Money::rupees(2_000_000),
                term_years: None,
                rate_bands: senior_bands(),
            },
        ];
        Self { schemes }
    }

    /// All schemes, in shelf order
    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    /// Looks up a scheme by code (case-insensitive)
    pub fn find(&self, code: &str) -> Option<&Scheme> {
        self.schemes
            .iter()
            .find(|scheme| scheme.code.eq_ignore_ascii_case(code))
    }

    /// Looks up a scheme by code, failing with `UnknownPlan`
    pub fn require(&self, code: &str) -> Result<&Scheme, PolicyError> {
        self.find(code)
            .ok_or_else(|| PolicyError::UnknownPlan(code.to_string()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_ten_schemes() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.schemes().len(), 10);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = Catalog::standard();
        assert!(catalog.find("term-10").is_some());
        assert!(catalog.find("TERM-10").is_some());
        assert!(catalog.find("TERM-99").is_none());
    }

    #[test]
    fn test_senior_scheme_entry_window() {
        let catalog = Catalog::standard();
        let senior = catalog.require("SENIOR-50").unwrap();
        assert_eq!(senior.min_entry_age, 50);
        assert_eq!(senior.max_entry_age, 80);
        assert!(senior.rate_for_age(49).is_none());
        assert!(senior.rate_for_age(80).is_some());
    }

    #[test]
    fn test_rate_bands_cover_entry_window() {
        let catalog = Catalog::standard();
        for scheme in catalog.schemes() {
            for age in scheme.min_entry_age..=scheme.max_entry_age {
                assert!(
                    scheme.rate_for_age(age).is_some(),
                    "{} has no band for age {}",
                    scheme.code,
                    age
                );
            }
        }
    }
}
