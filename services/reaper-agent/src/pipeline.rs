//! The decision request pipeline (C9): the one thing this service exists to
//! do. Turns a normalized ingress record into an allow/deny, consulting the
//! subject resolver, decision cache, and evaluator in that order, and always
//! enqueues an audit record without letting audit emission affect the
//! response.

use crate::state::AppState;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use message_queue::BuildParams;
use policy_engine::{cache_key, evaluate, is_admin_request, map_action};
use reaper_core::{first_non_empty, Decision, DecisionRequest, PolicyId};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub input: CheckInput,
}

#[derive(Debug, Deserialize)]
pub struct CheckInput {
    pub bucket: String,
    #[serde(default)]
    pub object: Option<String>,
    pub action: String,
    #[serde(default)]
    pub conditions: CheckConditions,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckConditions {
    #[serde(default)]
    pub username: Vec<String>,
}

#[derive(Debug)]
pub enum PipelineError {
    BadRequest(String),
    Denied {
        user: String,
        resource: String,
        action: String,
        policy_id: PolicyId,
    },
    Internal(String),
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        match self {
            PipelineError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": reason }))).into_response()
            }
            PipelineError::Denied {
                user,
                resource,
                action,
                policy_id,
            } => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "Access denied",
                    "user": user,
                    "resource": resource,
                    "action": action,
                    "policy_id": policy_id,
                })),
            )
                .into_response(),
            PipelineError::Internal(reason) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": reason }))).into_response()
            }
        }
    }
}

#[instrument(skip(state, headers, payload), fields(bucket = %payload.input.bucket, action = %payload.input.action))]
pub async fn check(
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<Value>, PipelineError> {
    let started = Instant::now();
    let input = payload.input;

    let user = first_non_empty(&input.conditions.username)
        .map(str::to_string)
        .ok_or_else(|| PipelineError::BadRequest("missing username".to_string()))?;

    let access_type = map_action(&input.action);
    let bucket = input.bucket;
    let object = input.object.filter(|o| !o.is_empty());

    let sess = headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let forwarded_for = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok());
    let cli_ip = message_queue::derive_cli_ip(forwarded_for, Some(&addr.ip().to_string()));

    let attrs = state.subject_resolver.resolve(&user).await.unwrap_or_default();

    let request = DecisionRequest {
        user: user.clone(),
        groups: attrs.groups,
        roles: attrs.roles,
        bucket: bucket.clone(),
        object: object.clone(),
        access_type,
    };
    let resource = request.resource_path();
    let repo_type = state
        .snapshot_store
        .get(&state.service_name)
        .and_then(|s| s.service_def_id)
        .unwrap_or(1);

    if is_admin_request(&request) {
        emit_audit(
            &state,
            Decision::admin(),
            &request,
            &resource,
            repo_type,
            &sess,
            &cli_ip,
            "",
        )
        .await;
        metrics::record_decision(true, access_type.as_str(), started.elapsed());
        return Ok(Json(json!({ "result": true })));
    }

    let key = cache_key(&state.service_name, &user, &bucket, object.as_deref(), access_type);

    let decision = match state.decision_cache.get(&key).await {
        Some(decision) => {
            metrics::record_decision_cache_hit();
            decision
        }
        None => {
            metrics::record_decision_cache_miss();
            let decision = match state.snapshot_store.get(&state.service_name) {
                Some(snapshot) if !snapshot.is_empty() => evaluate(&snapshot, &request),
                _ => {
                    tracing::warn!(service = %state.service_name, "no policies loaded, denying by default");
                    Decision::deny(0)
                }
            };
            state.decision_cache.insert(key, decision).await;
            decision
        }
    };

    metrics::record_decision(decision.allowed, access_type.as_str(), started.elapsed());

    if decision.allowed {
        if decision.audited {
            emit_audit(&state, decision, &request, &resource, repo_type, &sess, &cli_ip, "").await;
        }
        Ok(Json(json!({ "result": true })))
    } else {
        emit_audit(
            &state,
            decision,
            &request,
            &resource,
            repo_type,
            &sess,
            &cli_ip,
            "no matching policy grants this access",
        )
        .await;
        Err(PipelineError::Denied {
            user,
            resource,
            action: access_type.as_str().to_string(),
            policy_id: decision.policy_id,
        })
    }
}

#[allow(clippy::too_many_arguments)]
async fn emit_audit(
    state: &AppState,
    decision: Decision,
    request: &DecisionRequest,
    resource: &str,
    repo_type: PolicyId,
    sess: &str,
    cli_ip: &str,
    reason: &str,
) {
    let record = message_queue::build(BuildParams {
        allowed: decision.allowed,
        user: &request.user,
        resource,
        bucket: &request.bucket,
        access_type: request.access_type,
        policy_id: if decision.policy_id == 0 { None } else { Some(decision.policy_id) },
        repo_type,
        sess,
        cli_ip,
        agent_host: &state.agent_host,
        reason,
        now: chrono::Utc::now(),
    });
    state.audit_emitter.enqueue(record).await;
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn metrics_endpoint() -> Response {
    match metrics::render_metrics() {
        Some(body) => (StatusCode::OK, body).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics not initialized").into_response(),
    }
}
