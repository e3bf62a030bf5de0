//! Policy and catalog DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_policy::{Policy, PolicyState, PremiumQuote, Scheme};

#[derive(Debug, Serialize)]
pub struct SchemeResponse {
    pub code: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub min_entry_age: u8,
    pub max_entry_age: u8,
    pub min_cover: Decimal,
    pub max_cover: Decimal,
    pub term_years: Option<u8>,
}

impl From<&Scheme> for SchemeResponse {
    fn from(scheme: &Scheme) -> Self {
        Self {
            code: scheme.code.clone(),
            name: scheme.name.clone(),
            category: format!("{:?}", scheme.category).to_lowercase(),
            description: scheme.description.clone(),
            min_entry_age: scheme.min_entry_age,
            max_entry_age: scheme.max_entry_age,
            min_cover: scheme.min_cover.amount(),
            max_cover: scheme.max_cover.amount(),
            term_years: scheme.term_years,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct QuoteParams {
    pub age: u8,
    /// Cover in whole rupees
    #[validate(range(min = 1))]
    pub cover: i64,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub plan_code: String,
    pub age: u8,
    pub cover: Decimal,
    pub annual_premium: Decimal,
    pub monthly_premium: Decimal,
    pub currency: String,
}

impl QuoteResponse {
    pub fn new(plan_code: &str, age: u8, cover: core_kernel::Money, quote: &PremiumQuote) -> Self {
        Self {
            plan_code: plan_code.to_string(),
            age,
            cover: cover.amount(),
            annual_premium: quote.annual.amount(),
            monthly_premium: quote.monthly.amount(),
            currency: quote.annual.currency().code().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NomineeRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub relationship: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePolicyRequest {
    #[validate(length(min = 1))]
    pub plan_code: String,
    /// Cover in whole rupees
    #[validate(range(min = 1))]
    pub cover: i64,
    #[validate(nested)]
    pub nominee: Option<NomineeRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CancelPolicyRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NomineeResponse {
    pub name: String,
    pub relationship: String,
}

#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub id: String,
    pub policy_number: String,
    pub plan_code: String,
    pub cover: Decimal,
    pub annual_premium: Decimal,
    pub monthly_premium: Decimal,
    pub currency: String,
    pub status: String,
    pub nominee: Option<NomineeResponse>,
    pub activated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Policy> for PolicyResponse {
    fn from(policy: &Policy) -> Self {
        let activated_at = match policy.state() {
            PolicyState::Active { activated_at } => Some(*activated_at),
            _ => None,
        };
        Self {
            id: policy.id().to_string(),
            policy_number: policy.policy_number().to_string(),
            plan_code: policy.plan_code().to_string(),
            cover: policy.cover().amount(),
            annual_premium: policy.annual_premium().amount(),
            monthly_premium: policy.monthly_premium().amount(),
            currency: policy.cover().currency().code().to_string(),
            status: policy.state().name().to_string(),
            nominee: policy.nominee().map(|n| NomineeResponse {
                name: n.name.clone(),
                relationship: n.relationship.clone(),
            }),
            activated_at,
            created_at: policy.created_at(),
            updated_at: policy.updated_at(),
        }
    }
}
