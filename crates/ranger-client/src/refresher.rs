//! Policy refresher (C3): a single long-lived task that keeps
//! `policy-engine`'s snapshot store current.
//!
//! On start it performs one synchronous load so the decision path never
//! serves an empty snapshot on first request, then loops on a fixed
//! interval. A failed refresh is logged and the previously published
//! snapshot is left in place.

use crate::client::RangerClient;
use reaper_core::Snapshot;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Sink the refresher publishes into — implemented by
/// `policy_engine::SnapshotStore` in the running service, and by a simple
/// in-memory stub in tests.
pub trait SnapshotSink: Send + Sync {
    fn publish(&self, service_name: &str, snapshot: Snapshot);
}

pub struct Refresher<S: SnapshotSink> {
    client: RangerClient,
    sink: Arc<S>,
    service_name: String,
    servicedef_name: String,
    interval: Duration,
}

impl<S: SnapshotSink> Refresher<S> {
    pub fn new(
        client: RangerClient,
        sink: Arc<S>,
        service_name: impl Into<String>,
        servicedef_name: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            client,
            sink,
            service_name: service_name.into(),
            servicedef_name: servicedef_name.into(),
            interval,
        }
    }

    /// One fetch-and-publish cycle. Never returns an error: a failed fetch
    /// is logged and simply leaves the store untouched.
    pub async fn refresh_once(&self) {
        let policies = match self.client.fetch_policies(&self.service_name).await {
            Ok(policies) => policies,
            Err(e) => {
                error!(service = %self.service_name, error = %e, "policy refresh failed, keeping previous snapshot");
                return;
            }
        };

        let service_def_id = match self.client.fetch_service_def_id(&self.servicedef_name).await {
            Ok(id) => id,
            Err(e) => {
                error!(servicedef = %self.servicedef_name, error = %e, "servicedef lookup failed");
                None
            }
        };

        let snapshot = Snapshot {
            service_name: self.service_name.clone(),
            service_def_id,
            policies: policies.into_iter().map(Into::into).collect(),
            loaded_at: SystemTime::now(),
        };

        info!(
            service = %self.service_name,
            policy_count = snapshot.policies.len(),
            "publishing refreshed snapshot"
        );
        self.sink.publish(&self.service_name, snapshot);
    }

    /// Runs until `token` is cancelled: an initial synchronous load, then a
    /// sleep/refresh loop. The sleep is raced against cancellation so a stop
    /// signal is observed promptly even mid-interval.
    pub async fn run(self, token: CancellationToken) {
        self.refresh_once().await;

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!(service = %self.service_name, "policy refresher stopping");
                    return;
                }
                _ = tokio::time::sleep(self.interval) => {
                    self.refresh_once().await;
                }
            }
        }
    }
}
