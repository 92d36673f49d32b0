//! Permissive wire types mirroring the policy source's own field names.
//!
//! Nothing here is `deny_unknown_fields`: the policy source is free to add
//! fields this service doesn't need, and ignoring them keeps a later Ranger
//! upgrade from breaking deserialization.

use reaper_core::{Access, Policy, PolicyId, PolicyItem, ResourceSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawAccess {
    #[serde(rename = "type")]
    pub access_type: String,
    #[serde(rename = "isAllowed", default)]
    pub is_allowed: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RawPolicyItem {
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub accesses: Vec<RawAccess>,
    #[serde(rename = "delegateAdmin", default)]
    pub delegate_admin: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawResourceSpec {
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(rename = "isExcludes", default)]
    pub is_excludes: bool,
    /// `None` when the policy source omits `isRecursive` — the default
    /// then depends on the resource kind (bucket vs. object), so it's
    /// resolved in `From<RawPolicy>` rather than here.
    #[serde(rename = "isRecursive", default)]
    pub is_recursive: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPolicy {
    #[serde(default)]
    pub id: PolicyId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "isEnabled", default = "default_true")]
    pub is_enabled: bool,
    #[serde(rename = "isAuditEnabled", default = "default_true")]
    pub is_audit_enabled: bool,
    #[serde(default)]
    pub resources: BTreeMap<String, RawResourceSpec>,
    #[serde(rename = "policyItems", default)]
    pub policy_items: Vec<RawPolicyItem>,
}

fn default_true() -> bool {
    true
}

impl From<RawPolicy> for Policy {
    fn from(raw: RawPolicy) -> Self {
        let resources = raw
            .resources
            .into_iter()
            .map(|(kind, spec)| {
                // Mirrors `policy_parser.py`: `isRecursive` defaults to
                // `true` for object resources, `false` for bucket (and any
                // other) resources.
                let recursive = spec.is_recursive.unwrap_or(kind == "object");
                (
                    kind,
                    ResourceSpec {
                        values: spec.values,
                        excludes: spec.is_excludes,
                        recursive,
                    },
                )
            })
            .collect();

        let items = raw
            .policy_items
            .into_iter()
            .map(|item| PolicyItem {
                users: item.users.into_iter().collect(),
                groups: item.groups.into_iter().collect(),
                accesses: item
                    .accesses
                    .into_iter()
                    .map(|a| Access {
                        access_type: a.access_type,
                        allowed: a.is_allowed,
                    })
                    .collect(),
                delegate_admin: item.delegate_admin,
            })
            .collect();

        Policy {
            id: raw.id,
            name: raw.name,
            enabled: raw.is_enabled,
            audit_enabled: raw.is_audit_enabled,
            resources,
            items,
        }
    }
}

/// Mirrors Ranger's `/service/xusers/users/userName/{username}` payload.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RawUser {
    #[serde(rename = "groupNameList", default)]
    pub group_name_list: Vec<serde_json::Value>,
    #[serde(rename = "userRoleList", default)]
    pub user_role_list: Vec<serde_json::Value>,
}

impl RawUser {
    /// Extract `(groups, roles)`, dropping any non-string list entries.
    pub fn groups_and_roles(&self) -> (Vec<String>, Vec<String>) {
        let strings = |values: &[serde_json::Value]| -> Vec<String> {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        };
        (strings(&self.group_name_list), strings(&self.user_role_list))
    }
}

/// One of the several shapes a "get policies" response can arrive in.
///
/// Not `#[serde(untagged)]`: `RawPolicy` and `WrappedPolicies` are both
/// all-optional-ish structs, so an untagged enum would match a bare
/// `{"policyItems": [...]}` object against `Wrapped` first (every field
/// defaults to `None`) and silently drop the policy. `policyItems`
/// presence is checked explicitly instead, matching `ranger_client.py`'s
/// `[result] if "policyItems" in result else []`.
#[derive(Debug, Clone)]
pub enum PoliciesResponse {
    List(Vec<RawPolicy>),
    Wrapped(WrappedPolicies),
    Single(RawPolicy),
}

impl<'de> Deserialize<'de> for PoliciesResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        if value.is_array() {
            let list = serde_json::from_value(value).map_err(serde::de::Error::custom)?;
            return Ok(PoliciesResponse::List(list));
        }

        if value.get("policyItems").is_some() {
            let policy = serde_json::from_value(value).map_err(serde::de::Error::custom)?;
            return Ok(PoliciesResponse::Single(policy));
        }

        let wrapped = serde_json::from_value(value).map_err(serde::de::Error::custom)?;
        Ok(PoliciesResponse::Wrapped(wrapped))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WrappedPolicies {
    #[serde(default)]
    pub policies: Option<Vec<RawPolicy>>,
    #[serde(rename = "vXPolicies", default)]
    pub vx_policies: Option<Vec<RawPolicy>>,
    pub data: Option<Vec<RawPolicy>>,
}

impl PoliciesResponse {
    pub fn into_policies(self) -> Vec<RawPolicy> {
        match self {
            PoliciesResponse::List(list) => list,
            PoliciesResponse::Wrapped(w) => w
                .policies
                .or(w.vx_policies)
                .or(w.data)
                .unwrap_or_default(),
            PoliciesResponse::Single(policy) => vec![policy],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDefResponse {
    pub id: Option<PolicyId>,
}
