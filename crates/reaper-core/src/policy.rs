//! Policy domain types — the closed, immutable record the evaluator walks.
//!
//! These are distinct from the permissive wire types in `ranger-client`'s
//! `raw` module: a [`Policy`] here has already been normalized out of
//! whatever shape the policy source happened to return it in.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub type PolicyId = i64;

/// One access grant inside a [`PolicyItem`]: a coarse access type plus
/// whether this policy allows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    #[serde(rename = "type")]
    pub access_type: String,
    pub allowed: bool,
}

/// A `(subjects, accesses)` grant inside a policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyItem {
    pub users: BTreeSet<String>,
    pub groups: BTreeSet<String>,
    pub accesses: Vec<Access>,
    pub delegate_admin: bool,
}

/// Describes how to match one resource kind (`bucket` or `object`) against
/// a request value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub values: Vec<String>,
    #[serde(default)]
    pub excludes: bool,
    pub recursive: bool,
}

/// One policy as held in a `Snapshot`. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub name: String,
    pub enabled: bool,
    pub audit_enabled: bool,
    /// Keyed by resource kind: `"bucket"` / `"object"`.
    pub resources: BTreeMap<String, ResourceSpec>,
    pub items: Vec<PolicyItem>,
}

impl Policy {
    pub fn bucket_spec(&self) -> Option<&ResourceSpec> {
        self.resources.get("bucket")
    }

    pub fn object_spec(&self) -> Option<&ResourceSpec> {
        self.resources.get("object")
    }
}
