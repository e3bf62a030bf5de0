//! Domain events for the policy aggregate
//!
//! Events capture significant state changes in a policy's lifecycle and
//! feed the audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, Money, PolicyId};

/// Domain events emitted by the Policy aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PolicyEvent {
    /// An application has been submitted for a plan
    PolicyApplied {
        policy_id: PolicyId,
        customer_id: CustomerId,
        plan_code: String,
        coverage: Money,
        timestamp: DateTime<Utc>,
    },

    /// The application was approved and the policy is in force
    PolicyActivated {
        policy_id: PolicyId,
        timestamp: DateTime<Utc>,
    },

    /// The policy was cancelled inside the no-fee window
    PolicyCancelled {
        policy_id: PolicyId,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// The policy lapsed
    PolicyLapsed {
        policy_id: PolicyId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl PolicyEvent {
    /// Returns the policy this event concerns
    pub fn policy_id(&self) -> PolicyId {
        match self {
            PolicyEvent::PolicyApplied { policy_id, .. }
            | PolicyEvent::PolicyActivated { policy_id, .. }
            | PolicyEvent::PolicyCancelled { policy_id, .. }
            | PolicyEvent::PolicyLapsed { policy_id, .. } => *policy_id,
        }
    }
}
