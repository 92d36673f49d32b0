//! The outcome of evaluating a [`crate::DecisionRequest`] against a snapshot.

use crate::policy::PolicyId;
use serde::{Deserialize, Serialize};

/// `(allowed, audited, policy_id)` — the evaluator's pure output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    pub audited: bool,
    /// 0 when no policy matched.
    pub policy_id: PolicyId,
}

impl Decision {
    pub const fn allow(policy_id: PolicyId, audited: bool) -> Self {
        Self {
            allowed: true,
            audited,
            policy_id,
        }
    }

    pub const fn deny(policy_id: PolicyId) -> Self {
        Self {
            allowed: false,
            audited: false,
            policy_id,
        }
    }

    /// The admin short-circuit decision: allow, audited, no specific policy.
    pub const fn admin() -> Self {
        Self::allow(0, true)
    }
}
