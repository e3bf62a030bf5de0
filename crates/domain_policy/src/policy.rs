//! Policy aggregate root
//!
//! The Policy aggregate is the consistency boundary for the policy
//! lifecycle.
//!
//! # Invariants
//!
//! - State transitions must follow Applied -> Active -> {Cancelled, Lapsed}
//! - An active policy can be cancelled without penalty only inside the
//!   24-hour window anchored on the activation timestamp
//! - Cover and premiums are fixed at application time

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{policy_number, CustomerId, Money, NomineeId, PolicyId};

use crate::error::PolicyError;
use crate::events::PolicyEvent;
use crate::premium::PremiumQuote;

/// Hours after activation during which cancellation carries no fee
pub const GRACE_WINDOW_HOURS: i64 = 24;

/// Policy lifecycle states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyState {
    /// Application submitted, not yet in force
    Applied {
        /// When the application was submitted
        applied_at: DateTime<Utc>,
    },

    /// Policy is in force
    Active {
        /// When the policy came into force; anchors the no-fee window
        activated_at: DateTime<Utc>,
    },

    /// Policy was cancelled
    Cancelled {
        /// When the cancellation took effect
        cancelled_at: DateTime<Utc>,
        /// Reason given by the customer
        reason: String,
    },

    /// Policy lapsed
    Lapsed {
        /// When the lapse took effect
        lapsed_at: DateTime<Utc>,
        reason: LapseReason,
    },
}

/// Reasons for policy lapse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LapseReason {
    /// Non-payment of premium
    NonPayment,
    /// Other reason
    Other(String),
}

impl std::fmt::Display for LapseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LapseReason::NonPayment => write!(f, "non-payment"),
            LapseReason::Other(reason) => write!(f, "{reason}"),
        }
    }
}

impl PolicyState {
    /// Short state name for diagnostics and persistence
    pub fn name(&self) -> &'static str {
        match self {
            PolicyState::Applied { .. } => "applied",
            PolicyState::Active { .. } => "active",
            PolicyState::Cancelled { .. } => "cancelled",
            PolicyState::Lapsed { .. } => "lapsed",
        }
    }

    /// Whether a transition to the target state is allowed
    pub fn can_transition_to(&self, target: &PolicyState) -> bool {
        matches!(
            (self, target),
            (PolicyState::Applied { .. }, PolicyState::Active { .. })
                | (PolicyState::Applied { .. }, PolicyState::Cancelled { .. })
                | (PolicyState::Active { .. }, PolicyState::Cancelled { .. })
                | (PolicyState::Active { .. }, PolicyState::Lapsed { .. })
        )
    }
}

/// Person nominated to receive the policy benefit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nominee {
    pub id: NomineeId,
    pub name: String,
    pub relationship: String,
}

impl Nominee {
    pub fn new(name: impl Into<String>, relationship: impl Into<String>) -> Self {
        Self {
            id: NomineeId::new(),
            name: name.into(),
            relationship: relationship.into(),
        }
    }
}

/// The policy aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    id: PolicyId,
    policy_number: String,
    customer_id: CustomerId,
    plan_code: String,
    cover: Money,
    annual_premium: Money,
    monthly_premium: Money,
    nominee: Option<Nominee>,
    state: PolicyState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<PolicyEvent>,
}

impl Policy {
    /// Submits a new application
    ///
    /// The quote is pinned on the aggregate so later catalog changes never
    /// reprice an existing policy.
    pub fn apply(
        customer_id: CustomerId,
        plan_code: impl Into<String>,
        cover: Money,
        quote: PremiumQuote,
        nominee: Option<Nominee>,
        now: DateTime<Utc>,
    ) -> Self {
        let id = PolicyId::new_v7();
        let plan_code = plan_code.into();
        let mut policy = Self {
            id,
            policy_number: policy_number(),
            customer_id,
            plan_code: plan_code.clone(),
            cover,
            annual_premium: quote.annual,
            monthly_premium: quote.monthly,
            nominee,
            state: PolicyState::Applied { applied_at: now },
            created_at: now,
            updated_at: now,
            events: Vec::new(),
        };
        policy.events.push(PolicyEvent::PolicyApplied {
            policy_id: id,
            customer_id,
            plan_code,
            coverage: cover,
            timestamp: now,
        });
        policy
    }

    /// Rehydrates a policy from stored fields without emitting events
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: PolicyId,
        policy_number: String,
        customer_id: CustomerId,
        plan_code: String,
        cover: Money,
        annual_premium: Money,
        monthly_premium: Money,
        nominee: Option<Nominee>,
        state: PolicyState,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            policy_number,
            customer_id,
            plan_code,
            cover,
            annual_premium,
            monthly_premium,
            nominee,
            state,
            created_at,
            updated_at,
            events: Vec::new(),
        }
    }

    /// Brings the policy into force
    pub fn activate(&mut self, at: DateTime<Utc>) -> Result<(), PolicyError> {
        let target = PolicyState::Active { activated_at: at };
        if !self.state.can_transition_to(&target) {
            return Err(PolicyError::InvalidStateTransition {
                from: self.state.name().to_string(),
                to: target.name().to_string(),
            });
        }
        self.state = target;
        self.updated_at = at;
        self.events.push(PolicyEvent::PolicyActivated {
            policy_id: self.id,
            timestamp: at,
        });
        Ok(())
    }

    /// Cancels the policy
    ///
    /// An application still in `Applied` can always be withdrawn. An
    /// active policy can only be cancelled inside the no-fee window;
    /// afterwards the request fails with `PenaltyRequired` and must go
    /// through a servicing channel.
    pub fn cancel(&mut self, at: DateTime<Utc>, reason: impl Into<String>) -> Result<(), PolicyError> {
        let reason = reason.into();
        let target = PolicyState::Cancelled {
            cancelled_at: at,
            reason: reason.clone(),
        };
        if !self.state.can_transition_to(&target) {
            return Err(PolicyError::InvalidStateTransition {
                from: self.state.name().to_string(),
                to: target.name().to_string(),
            });
        }
        if let PolicyState::Active { activated_at } = self.state {
            let elapsed = at - activated_at;
            if elapsed > Duration::hours(GRACE_WINDOW_HOURS) {
                return Err(PolicyError::PenaltyRequired {
                    window_hours: GRACE_WINDOW_HOURS,
                    hours_since_activation: elapsed.num_hours(),
                });
            }
        }
        self.state = target;
        self.updated_at = at;
        self.events.push(PolicyEvent::PolicyCancelled {
            policy_id: self.id,
            reason,
            timestamp: at,
        });
        Ok(())
    }

    /// Lapses an active policy
    pub fn lapse(&mut self, at: DateTime<Utc>, reason: LapseReason) -> Result<(), PolicyError> {
        let target = PolicyState::Lapsed {
            lapsed_at: at,
            reason: reason.clone(),
        };
        if !self.state.can_transition_to(&target) {
            return Err(PolicyError::InvalidStateTransition {
                from: self.state.name().to_string(),
                to: target.name().to_string(),
            });
        }
        self.state = target;
        self.updated_at = at;
        self.events.push(PolicyEvent::PolicyLapsed {
            policy_id: self.id,
            reason: reason.to_string(),
            timestamp: at,
        });
        Ok(())
    }

    /// Drains the pending domain events
    pub fn take_events(&mut self) -> Vec<PolicyEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn id(&self) -> PolicyId {
        self.id
    }

    pub fn policy_number(&self) -> &str {
        &self.policy_number
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn plan_code(&self) -> &str {
        &self.plan_code
    }

    pub fn cover(&self) -> Money {
        self.cover
    }

    pub fn annual_premium(&self) -> Money {
        self.annual_premium
    }

    pub fn monthly_premium(&self) -> Money {
        self.monthly_premium
    }

    pub fn nominee(&self) -> Option<&Nominee> {
        self.nominee.as_ref()
    }

    pub fn state(&self) -> &PolicyState {
        &self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the policy is currently in force
    pub fn is_active(&self) -> bool {
        matches!(self.state, PolicyState::Active { .. })
    }
}
