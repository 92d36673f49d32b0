//! The pure policy walk: `evaluate(snapshot, request) -> Decision`.
//!
//! No I/O, no locking, no caching — this module only ever sees a
//! [`Snapshot`] that the caller already holds a reference to. It is
//! deliberately free of `async` so it can be fuzzed and benchmarked in
//! isolation.

use reaper_core::{AccessType, Decision, DecisionRequest, Policy, PolicyId, ResourceSpec, Snapshot};
use regex::Regex;

/// Walk `snapshot.policies` in order and return the first matching grant.
///
/// Mirrors the reference walk: bucket match is mandatory, object match is
/// only required when the policy defines an object resource, subject match
/// checks users first then groups, and `delegate_admin` or an
/// already-admin subject short-circuits to an audited allow without
/// consulting the access list.
pub fn evaluate(snapshot: &Snapshot, request: &DecisionRequest) -> Decision {
    let mut last_policy_id: PolicyId = 0;

    for policy in &snapshot.policies {
        last_policy_id = policy.id;

        if !policy.enabled {
            continue;
        }

        if !resource_matches(policy, request) {
            continue;
        }

        for item in &policy.items {
            let user_match = item.users.contains(&request.user);
            let group_match = request.groups.iter().any(|g| item.groups.contains(g));
            if !(user_match || group_match) {
                continue;
            }

            if item.delegate_admin || request.roles.contains(reaper_core::ROLE_SYS_ADMIN) {
                return Decision::allow(policy.id, policy.audit_enabled);
            }

            let access_type = request.access_type.as_str();
            let granted = item
                .accesses
                .iter()
                .any(|a| a.access_type == access_type && a.allowed);
            if granted {
                return Decision::allow(policy.id, policy.audit_enabled);
            }
        }
    }

    Decision::deny(last_policy_id)
}

/// Mandatory bucket match, then conditional object match per whether the
/// policy defines an object resource and whether the request is bucket- or
/// object-scoped.
fn resource_matches(policy: &Policy, request: &DecisionRequest) -> bool {
    match policy.bucket_spec() {
        Some(bucket_spec) => {
            if !match_resource(&request.bucket, bucket_spec, None) {
                return false;
            }
        }
        None => {
            // No bucket resource at all: only still considerable if the
            // policy at least restricts by object.
            if policy.object_spec().is_none() {
                return false;
            }
        }
    }

    match (&request.object, policy.object_spec()) {
        (_, None) => true,
        (Some(object), Some(object_spec)) => {
            match_resource(object, object_spec, Some(request.bucket.as_str()))
        }
        (None, Some(_)) => false,
    }
}

/// Resource value matching with wildcard, exclude, and recursive-prefix
/// support. `bucket_name` is used to strip a `bucket/object` style policy
/// value down to just the object half when the bucket half matches this
/// request's bucket.
fn match_resource(resource_value: &str, spec: &ResourceSpec, bucket_name: Option<&str>) -> bool {
    if spec.values.is_empty() {
        return false;
    }

    for raw_policy_value in &spec.values {
        let policy_value: &str = match (bucket_name, raw_policy_value.split_once('/')) {
            (Some(bucket_name), Some((policy_bucket, policy_object))) if policy_bucket == bucket_name => {
                policy_object
            }
            (Some(_), Some(_)) => continue,
            _ => raw_policy_value.as_str(),
        };

        let mut matched = if spec.recursive {
            resource_value.starts_with(policy_value) || resource_value == policy_value
        } else {
            resource_value == policy_value
        };

        if !matched && policy_value.contains('*') {
            if let Some(re) = wildcard_regex(policy_value) {
                matched = re.is_match(resource_value);
            }
        }

        if matched {
            return !spec.excludes;
        }
    }

    spec.excludes
}

fn wildcard_regex(pattern: &str) -> Option<Regex> {
    let escaped = regex::escape(pattern).replace("\\*", ".*");
    Regex::new(&format!("^{escaped}$")).ok()
}

/// Coarse admin short-circuit: a request already carrying
/// [`AccessType::Admin`] or the sys-admin role never needs a policy walk.
pub fn is_admin_request(request: &DecisionRequest) -> bool {
    request.is_admin_subject()
}
