//! Test data builders
//!
//! Builder patterns for constructing domain aggregates with sensible
//! defaults, so tests specify only the fields they care about.

use chrono::{NaiveDate, Utc};
use fake::faker::name::en::Name;
use fake::Fake;
use once_cell::sync::Lazy;

use core_kernel::{CustomerId, Money};
use domain_customer::{Customer, Gender, RegistrationDetails};
use domain_policy::{calculate_premium, Catalog, Nominee, Policy};

use crate::fixtures::{IdentityFixtures, MoneyFixtures, TemporalFixtures};

// The shelf is immutable, so every builder shares one copy.
static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::standard);

/// Builder for registered customers
pub struct TestCustomerBuilder {
    username: String,
    full_name: String,
    date_of_birth: NaiveDate,
    gender: Gender,
    pan: String,
    password_hash: String,
}

impl Default for TestCustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCustomerBuilder {
    pub fn new() -> Self {
        Self {
            username: IdentityFixtures::username(),
            full_name: Name().fake(),
            date_of_birth: TemporalFixtures::adult_dob(),
            gender: Gender::Female,
            pan: IdentityFixtures::pan(),
            password_hash: "test-password-hash".to_string(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_date_of_birth(mut self, dob: NaiveDate) -> Self {
        self.date_of_birth = dob;
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_pan(mut self, pan: impl Into<String>) -> Self {
        self.pan = pan.into();
        self
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = hash.into();
        self
    }

    pub fn build(self) -> Customer {
        let details = RegistrationDetails {
            email: format!("{}@example.com", self.username),
            username: self.username,
            full_name: self.full_name,
            phone: IdentityFixtures::phone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            address: "7 Residency Road, Bengaluru".to_string(),
            pan: self.pan.parse().expect("builder PAN should be valid"),
        };
        Customer::register(details, self.password_hash).expect("builder data should be valid")
    }
}

/// Builder for policies
pub struct TestPolicyBuilder {
    customer_id: CustomerId,
    plan_code: String,
    cover: Money,
    entry_age: u8,
    nominee: Option<Nominee>,
    activated: bool,
}

impl Default for TestPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPolicyBuilder {
    pub fn new() -> Self {
        Self {
            customer_id: CustomerId::new(),
            plan_code: "TERM-10".to_string(),
            cover: MoneyFixtures::cover(),
            entry_age: 35,
            nominee: None,
            activated: true,
        }
    }

    pub fn for_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = customer_id;
        self
    }

    pub fn with_plan(mut self, plan_code: impl Into<String>) -> Self {
        self.plan_code = plan_code.into();
        self
    }

    pub fn with_cover(mut self, cover: Money) -> Self {
        self.cover = cover;
        self
    }

    pub fn with_entry_age(mut self, age: u8) -> Self {
        self.entry_age = age;
        self
    }

    pub fn with_nominee(mut self, name: impl Into<String>, relationship: impl Into<String>) -> Self {
        self.nominee = Some(Nominee::new(name, relationship));
        self
    }

    /// Leaves the policy as a pending application
    pub fn applied_only(mut self) -> Self {
        self.activated = false;
        self
    }

    pub fn build(self) -> Policy {
        let scheme = CATALOG
            .require(&self.plan_code)
            .expect("builder plan code should exist");
        let quote = calculate_premium(scheme, self.entry_age, self.cover)
            .expect("builder inputs should quote");

        let now = Utc::now();
        let mut policy = Policy::apply(
            self.customer_id,
            self.plan_code,
            self.cover,
            quote,
            self.nominee,
            now,
        );
        if self.activated {
            policy
                .activate(now)
                .expect("fresh application should activate");
        }
        policy.take_events();
        policy
    }
}
