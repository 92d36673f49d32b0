//! Process-wide shared state: everything the `/check` pipeline reads or
//! writes on the hot path, plus the glue that lets the background refresher
//! publish into the snapshot store without a circular crate dependency.

use policy_engine::{DecisionCache, SnapshotStore};
use ranger_client::SubjectResolver;
use reaper_core::Snapshot;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub snapshot_store: Arc<SnapshotStore>,
    pub decision_cache: DecisionCache,
    pub subject_resolver: SubjectResolver,
    pub audit_emitter: message_queue::AuditEmitter,
    pub service_name: String,
    pub agent_host: String,
}

/// Local newtype over `policy_engine::SnapshotStore` so the
/// `ranger_client::SnapshotSink` impl below doesn't violate the orphan
/// rule — neither the trait nor `SnapshotStore` live in this crate.
pub struct SnapshotStoreSink(pub Arc<SnapshotStore>);

impl ranger_client::SnapshotSink for SnapshotStoreSink {
    fn publish(&self, service_name: &str, snapshot: Snapshot) {
        self.0.publish(service_name, snapshot);
    }
}
