//! Audit record construction (C8). Pure and synchronous — building a
//! record never talks to the network.

use reaper_core::{AccessType, PolicyId};
use serde::Serialize;
use uuid::Uuid;

pub const SENTINEL_NO_POLICY: &str = "no-policy";

/// A Ranger-shaped audit document, built per decision and enqueued for
/// emission without blocking the caller.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub id: String,
    #[serde(rename = "evtTime")]
    pub evt_time: String,
    /// Either the matched policy id, or [`SENTINEL_NO_POLICY`] when the
    /// admin short-circuit or an empty snapshot produced this record.
    pub policy: String,
    #[serde(rename = "policyVersion")]
    pub policy_version: u32,
    pub access: String,
    pub enforcer: String,
    pub repo: String,
    #[serde(rename = "repoType")]
    pub repo_type: PolicyId,
    pub sess: String,
    #[serde(rename = "reqUser")]
    pub req_user: String,
    pub resource: String,
    #[serde(rename = "cliIP")]
    pub cli_ip: String,
    pub result: u8,
    #[serde(rename = "agentHost")]
    pub agent_host: String,
    #[serde(rename = "logType")]
    pub log_type: String,
    #[serde(rename = "resType")]
    pub res_type: String,
    pub reason: String,
    pub action: String,
    pub seq_num: u32,
    pub event_count: u32,
    pub event_dur_ms: u32,
    pub tags: Vec<String>,
    #[serde(rename = "cliType")]
    pub cli_type: String,
    pub cluster: String,
    pub zone: String,
}

/// Everything `build` needs beyond the request tuple itself.
pub struct BuildParams<'a> {
    pub allowed: bool,
    pub user: &'a str,
    pub resource: &'a str,
    pub bucket: &'a str,
    pub access_type: AccessType,
    pub policy_id: Option<PolicyId>,
    pub repo_type: PolicyId,
    pub sess: &'a str,
    pub cli_ip: &'a str,
    pub agent_host: &'a str,
    pub reason: &'a str,
    pub now: chrono::DateTime<chrono::Utc>,
}

pub fn build(params: BuildParams<'_>) -> AuditRecord {
    AuditRecord {
        id: Uuid::new_v4().to_string(),
        evt_time: format_evt_time(params.now),
        policy: params
            .policy_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| SENTINEL_NO_POLICY.to_string()),
        policy_version: 1,
        access: params.access_type.as_str().to_string(),
        enforcer: "ranger-acl".to_string(),
        repo: params.bucket.to_string(),
        repo_type: params.repo_type,
        sess: params.sess.to_string(),
        req_user: params.user.to_string(),
        resource: params.resource.to_string(),
        cli_ip: params.cli_ip.to_string(),
        result: if params.allowed { 1 } else { 0 },
        agent_host: params.agent_host.to_string(),
        log_type: "RangerAudit".to_string(),
        res_type: "path".to_string(),
        reason: params.reason.to_string(),
        action: params.access_type.as_str().to_string(),
        seq_num: 1,
        event_count: 1,
        event_dur_ms: 0,
        tags: Vec::new(),
        cli_type: String::new(),
        cluster: String::new(),
        zone: String::new(),
    }
}

fn format_evt_time(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("{}Z", now.format("%Y-%m-%dT%H:%M:%S%.3f"))
}

/// First non-empty entry of a comma-separated `X-Forwarded-For` header,
/// falling back to the transport peer address, falling back to `0.0.0.0`.
pub fn derive_cli_ip(forwarded_for: Option<&str>, peer_addr: Option<&str>) -> String {
    if let Some(header) = forwarded_for {
        if let Some(first) = header.split(',').map(str::trim).find(|s| !s.is_empty()) {
            return first.to_string();
        }
    }
    peer_addr.unwrap_or("0.0.0.0").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_time() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc.with_ymd_and_hms(2026, 7, 28, 12, 0, 0).unwrap()
    }

    #[test]
    fn build_sets_policy_id_when_present() {
        let record = build(BuildParams {
            allowed: true,
            user: "alice",
            resource: "/reports",
            bucket: "reports",
            access_type: AccessType::Read,
            policy_id: Some(7),
            repo_type: 1,
            sess: "sess-1",
            cli_ip: "10.0.0.1",
            agent_host: "agent-1",
            reason: "",
            now: sample_time(),
        });
        assert_eq!(record.policy, "7");
        assert_eq!(record.result, 1);
        assert_eq!(record.log_type, "RangerAudit");
    }

    #[test]
    fn build_uses_sentinel_when_no_policy() {
        let record = build(BuildParams {
            allowed: true,
            user: "alice",
            resource: "/reports",
            bucket: "reports",
            access_type: AccessType::Admin,
            policy_id: None,
            repo_type: 1,
            sess: "",
            cli_ip: "10.0.0.1",
            agent_host: "agent-1",
            reason: "",
            now: sample_time(),
        });
        assert_eq!(record.policy, SENTINEL_NO_POLICY);
    }

    #[test]
    fn build_denied_record_has_result_zero() {
        let record = build(BuildParams {
            allowed: false,
            user: "bob",
            resource: "/reports",
            bucket: "reports",
            access_type: AccessType::Write,
            policy_id: Some(0),
            repo_type: 1,
            sess: "",
            cli_ip: "10.0.0.2",
            agent_host: "agent-1",
            reason: "no matching policy",
            now: sample_time(),
        });
        assert_eq!(record.result, 0);
        assert_eq!(record.reason, "no matching policy");
    }

    #[test]
    fn evt_time_has_millisecond_precision_and_z_suffix() {
        let record = build(BuildParams {
            allowed: true,
            user: "alice",
            resource: "/x",
            bucket: "x",
            access_type: AccessType::Read,
            policy_id: Some(1),
            repo_type: 1,
            sess: "",
            cli_ip: "",
            agent_host: "",
            reason: "",
            now: sample_time(),
        });
        assert!(record.evt_time.ends_with('Z'));
        assert_eq!(record.evt_time, "2026-07-28T12:00:00.000Z");
    }

    #[test]
    fn derive_cli_ip_prefers_forwarded_for() {
        assert_eq!(derive_cli_ip(Some("10.1.1.1, 10.2.2.2"), Some("10.3.3.3")), "10.1.1.1");
    }

    #[test]
    fn derive_cli_ip_skips_empty_forwarded_entries() {
        assert_eq!(derive_cli_ip(Some(" , 10.2.2.2"), None), "10.2.2.2");
    }

    #[test]
    fn derive_cli_ip_falls_back_to_peer_then_default() {
        assert_eq!(derive_cli_ip(None, Some("10.3.3.3")), "10.3.3.3");
        assert_eq!(derive_cli_ip(None, None), "0.0.0.0");
    }
}
