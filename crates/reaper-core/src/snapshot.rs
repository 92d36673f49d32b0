//! The immutable, timestamped view of one service's policies that the
//! evaluator walks.

use crate::policy::{Policy, PolicyId};
use std::time::SystemTime;

/// A snapshot is never mutated after publication — the snapshot store swaps
/// whole snapshots, readers hold a reference valid for one evaluation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub service_name: String,
    pub service_def_id: Option<PolicyId>,
    pub policies: Vec<Policy>,
    pub loaded_at: SystemTime,
}

impl Snapshot {
    pub fn empty(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_def_id: None,
            policies: Vec::new(),
            loaded_at: SystemTime::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
