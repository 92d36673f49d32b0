//! Decision-path metrics: Prometheus counters, gauges, and histograms for
//! the request pipeline, caches, and policy refresher.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub mod names {
    pub const DECISIONS_TOTAL: &str = "reaper_decisions_total";
    pub const DECISION_DURATION_SECONDS: &str = "reaper_decision_duration_seconds";
    pub const DECISION_CACHE_HITS_TOTAL: &str = "reaper_decision_cache_hits_total";
    pub const DECISION_CACHE_MISSES_TOTAL: &str = "reaper_decision_cache_misses_total";
    pub const SUBJECT_CACHE_HITS_TOTAL: &str = "reaper_subject_cache_hits_total";
    pub const SUBJECT_CACHE_MISSES_TOTAL: &str = "reaper_subject_cache_misses_total";
    pub const SNAPSHOT_REFRESH_TOTAL: &str = "reaper_snapshot_refresh_total";
    pub const SNAPSHOT_POLICY_COUNT: &str = "reaper_snapshot_policy_count";
    pub const AUDIT_EMIT_FAILURES_TOTAL: &str = "reaper_audit_emit_failures_total";
}

/// Installs the process-wide Prometheus recorder. Idempotent — returns
/// `false` if already installed.
pub fn init_metrics() -> bool {
    if PROMETHEUS_HANDLE.get().is_some() {
        tracing::debug!("metrics already initialized");
        return false;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROMETHEUS_HANDLE.set(handle).is_err() {
                tracing::warn!("failed to store prometheus handle (already set)");
                return false;
            }
            tracing::info!("prometheus metrics initialized");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to install prometheus recorder");
            false
        }
    }
}

/// Render all metrics in Prometheus text exposition format, for the
/// operator-facing `/metrics` endpoint. `None` if not yet initialized.
pub fn render_metrics() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|handle| handle.render())
}

/// Record one decision outcome.
pub fn record_decision(allowed: bool, access_type: &str, duration: Duration) {
    let outcome = if allowed { "allow" } else { "deny" };
    metrics::counter!(
        names::DECISIONS_TOTAL,
        "outcome" => outcome.to_string(),
        "access_type" => access_type.to_string()
    )
    .increment(1);

    metrics::histogram!(
        names::DECISION_DURATION_SECONDS,
        "access_type" => access_type.to_string()
    )
    .record(duration.as_secs_f64());
}

pub fn record_decision_cache_hit() {
    metrics::counter!(names::DECISION_CACHE_HITS_TOTAL).increment(1);
}

pub fn record_decision_cache_miss() {
    metrics::counter!(names::DECISION_CACHE_MISSES_TOTAL).increment(1);
}

pub fn record_subject_cache_hit() {
    metrics::counter!(names::SUBJECT_CACHE_HITS_TOTAL).increment(1);
}

pub fn record_subject_cache_miss() {
    metrics::counter!(names::SUBJECT_CACHE_MISSES_TOTAL).increment(1);
}

/// Record the outcome of one refresher cycle. `policy_count` is only
/// meaningful when `success` is true.
pub fn record_snapshot_refresh(service: &str, success: bool, policy_count: usize) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!(
        names::SNAPSHOT_REFRESH_TOTAL,
        "service" => service.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    if success {
        metrics::gauge!(names::SNAPSHOT_POLICY_COUNT, "service" => service.to_string())
            .set(policy_count as f64);
    }
}

pub fn record_audit_emit_failure() {
    metrics::counter!(names::AUDIT_EMIT_FAILURES_TOTAL).increment(1);
}
