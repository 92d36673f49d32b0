//! The request tuple handed to the evaluator, and the coarse access types
//! it is checked against.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One of the five coarse access types a policy item can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    Read,
    Write,
    Delete,
    List,
    Admin,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::Read => "read",
            AccessType::Write => "write",
            AccessType::Delete => "delete",
            AccessType::List => "list",
            AccessType::Admin => "admin",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The role name that grants unconditional admin access regardless of
/// policy content.
pub const ROLE_SYS_ADMIN: &str = "ROLE_SYS_ADMIN";

/// `(subject, action, resource)` tuple the evaluator matches against a
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    pub user: String,
    pub groups: BTreeSet<String>,
    pub roles: BTreeSet<String>,
    pub bucket: String,
    pub object: Option<String>,
    pub access_type: AccessType,
}

impl DecisionRequest {
    pub fn is_admin_subject(&self) -> bool {
        self.access_type == AccessType::Admin || self.roles.contains(ROLE_SYS_ADMIN)
    }

    /// `/bucket` or `/bucket/object`, used as the audit record's `resource` field.
    pub fn resource_path(&self) -> String {
        match &self.object {
            Some(object) if !object.is_empty() => format!("/{}/{}", self.bucket, object),
            _ => format!("/{}", self.bucket),
        }
    }
}
