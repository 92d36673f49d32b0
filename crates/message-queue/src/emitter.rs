//! Non-blocking audit emission: a bounded channel plus a dedicated drain
//! worker task, so a slow or unreachable audit sink never holds up a
//! decision response.

use crate::audit::AuditRecord;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, warn};

const TIMEOUT: Duration = Duration::from_secs(10);

/// Handle held by the request pipeline. Cloning is cheap — it's just a
/// sender handle into the bounded channel the drain worker reads from.
#[derive(Clone)]
pub struct AuditEmitter {
    sender: mpsc::Sender<AuditRecord>,
}

impl AuditEmitter {
    /// Spawns the drain worker and returns a handle plus its join handle.
    /// `capacity` bounds how many records may be queued before `enqueue`
    /// backpressures.
    pub fn spawn(audit_base_url: String, capacity: usize) -> (Self, tokio::task::JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let http = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .expect("reqwest client builds with static config");

        let worker = tokio::spawn(drain_loop(receiver, http, audit_base_url));
        (Self { sender }, worker)
    }

    /// Enqueue a record for emission. Never blocks the caller on the
    /// network call itself; only backpressures if the channel is full.
    pub async fn enqueue(&self, record: AuditRecord) {
        if let Err(e) = self.sender.send(record).await {
            error!(error = %e, "audit channel closed, dropping record");
        }
    }
}

async fn drain_loop(mut receiver: mpsc::Receiver<AuditRecord>, http: reqwest::Client, audit_base_url: String) {
    let url = format!("{}/update?commit=true", audit_base_url.trim_end_matches('/'));

    while let Some(record) = receiver.recv().await {
        let body = [&record];
        match http.post(&url).json(&body).send().await {
            Ok(response) if !response.status().is_success() => {
                warn!(status = %response.status(), %url, "audit sink returned non-success status");
            }
            Err(e) => {
                warn!(error = %e, %url, "failed to emit audit record");
            }
            Ok(_) => {}
        }
    }
}
