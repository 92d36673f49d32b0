//! BDD tests for the shared domain types: decision requests, decisions,
//! snapshots, and error messages.

use cucumber::{given, then, World};
use reaper_core::{AccessType, Decision, DecisionRequest, ReaperError, Snapshot};
use std::collections::BTreeSet;

#[derive(Debug, Default, World)]
struct ReaperWorld {
    request: Option<DecisionRequest>,
    decision: Option<Decision>,
    snapshot: Option<Snapshot>,
    error: Option<ReaperError>,
}

fn parse_access_type(s: &str) -> AccessType {
    match s {
        "read" => AccessType::Read,
        "write" => AccessType::Write,
        "delete" => AccessType::Delete,
        "list" => AccessType::List,
        "admin" => AccessType::Admin,
        other => panic!("unknown access type {other}"),
    }
}

#[given(regex = r#"^a decision request with access type "([^"]+)" and no roles$"#)]
async fn given_request_no_roles(world: &mut ReaperWorld, access_type: String) {
    world.request = Some(DecisionRequest {
        user: "alice".to_string(),
        groups: BTreeSet::new(),
        roles: BTreeSet::new(),
        bucket: "reports".to_string(),
        object: None,
        access_type: parse_access_type(&access_type),
    });
}

#[given(regex = r#"^a decision request with access type "([^"]+)" and role "([^"]+)"$"#)]
async fn given_request_with_role(world: &mut ReaperWorld, access_type: String, role: String) {
    let mut roles = BTreeSet::new();
    roles.insert(role);
    world.request = Some(DecisionRequest {
        user: "alice".to_string(),
        groups: BTreeSet::new(),
        roles,
        bucket: "reports".to_string(),
        object: None,
        access_type: parse_access_type(&access_type),
    });
}

#[given(regex = r#"^a decision request for bucket "([^"]+)" and object "([^"]+)"$"#)]
async fn given_request_with_object(world: &mut ReaperWorld, bucket: String, object: String) {
    world.request = Some(DecisionRequest {
        user: "alice".to_string(),
        groups: BTreeSet::new(),
        roles: BTreeSet::new(),
        bucket,
        object: Some(object),
        access_type: AccessType::Read,
    });
}

#[given(regex = r#"^a decision request for bucket "([^"]+)" and no object$"#)]
async fn given_request_without_object(world: &mut ReaperWorld, bucket: String) {
    world.request = Some(DecisionRequest {
        user: "alice".to_string(),
        groups: BTreeSet::new(),
        roles: BTreeSet::new(),
        bucket,
        object: None,
        access_type: AccessType::Read,
    });
}

#[given(regex = r#"^an empty snapshot for service "([^"]+)"$"#)]
async fn given_empty_snapshot(world: &mut ReaperWorld, service: String) {
    world.snapshot = Some(Snapshot::empty(service));
}

#[given("the admin decision")]
async fn given_admin_decision(world: &mut ReaperWorld) {
    world.decision = Some(Decision::admin());
}

#[given(regex = r#"^a deny decision for policy id (\d+)$"#)]
async fn given_deny_decision(world: &mut ReaperWorld, policy_id: i64) {
    world.decision = Some(Decision::deny(policy_id));
}

#[given(regex = r#"^a bad request error with reason "([^"]+)"$"#)]
async fn given_bad_request_error(world: &mut ReaperWorld, reason: String) {
    world.error = Some(ReaperError::BadRequest { reason });
}

#[then("the request is an admin subject")]
async fn then_is_admin_subject(world: &mut ReaperWorld) {
    assert!(world.request.as_ref().unwrap().is_admin_subject());
}

#[then("the request is not an admin subject")]
async fn then_is_not_admin_subject(world: &mut ReaperWorld) {
    assert!(!world.request.as_ref().unwrap().is_admin_subject());
}

#[then(regex = r#"^the resource path is "([^"]+)"$"#)]
async fn then_resource_path(world: &mut ReaperWorld, expected: String) {
    assert_eq!(world.request.as_ref().unwrap().resource_path(), expected);
}

#[then("the snapshot is empty")]
async fn then_snapshot_is_empty(world: &mut ReaperWorld) {
    assert!(world.snapshot.as_ref().unwrap().is_empty());
}

#[then("the decision is allowed")]
async fn then_decision_allowed(world: &mut ReaperWorld) {
    assert!(world.decision.as_ref().unwrap().allowed);
}

#[then("the decision is not allowed")]
async fn then_decision_not_allowed(world: &mut ReaperWorld) {
    assert!(!world.decision.as_ref().unwrap().allowed);
}

#[then("the decision is audited")]
async fn then_decision_audited(world: &mut ReaperWorld) {
    assert!(world.decision.as_ref().unwrap().audited);
}

#[then("the decision is not audited")]
async fn then_decision_not_audited(world: &mut ReaperWorld) {
    assert!(!world.decision.as_ref().unwrap().audited);
}

#[then(regex = r#"^the decision policy id is (\d+)$"#)]
async fn then_decision_policy_id(world: &mut ReaperWorld, expected: i64) {
    assert_eq!(world.decision.as_ref().unwrap().policy_id, expected);
}

#[then(regex = r#"^the error message contains "([^"]+)"$"#)]
async fn then_error_message_contains(world: &mut ReaperWorld, expected: String) {
    let message = world.error.as_ref().unwrap().to_string();
    assert!(message.contains(&expected), "got: {message}");
}

#[tokio::main]
async fn main() {
    ReaperWorld::run("tests/features").await;
}
