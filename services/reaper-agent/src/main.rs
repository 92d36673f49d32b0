//! # Reaper Agent
//!
//! The out-of-band S3 access decision point: serves `/check` and the health
//! endpoint, keeps its policy snapshot current via a background refresher,
//! and emits audit records for every decision without blocking on them.

use policy_engine::{DecisionCache, SnapshotStore};
use ranger_client::{RangerClient, Refresher, SubjectResolver};
use reaper_agent::state::{AppState, SnapshotStoreSink};
use reaper_core::{Config, BUILD_INFO};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("starting {}", BUILD_INFO);
    metrics::init_metrics();

    let config = Config::from_env();

    let ranger_client = RangerClient::new(
        config.ranger_host.clone(),
        config.ranger_user.clone(),
        config.ranger_password.clone(),
    );
    let snapshot_store = Arc::new(SnapshotStore::new());
    let subject_resolver = SubjectResolver::new(ranger_client.clone(), config.subject_cache_size, config.ranger_cache_ttl);
    let decision_cache = DecisionCache::new(config.decision_cache_size, config.ranger_cache_ttl);
    let (audit_emitter, audit_worker) = message_queue::AuditEmitter::spawn(config.solr_audit_url.clone(), 1024);

    let refresher = Refresher::new(
        ranger_client,
        Arc::new(SnapshotStoreSink(snapshot_store.clone())),
        config.ranger_service_name.clone(),
        config.ranger_servicedef_name.clone(),
        config.ranger_cache_ttl,
    );
    let refresh_token = CancellationToken::new();
    let refresher_handle = tokio::spawn(refresher.run(refresh_token.clone()));

    let state = AppState {
        snapshot_store,
        decision_cache,
        subject_resolver,
        audit_emitter,
        service_name: config.ranger_service_name.clone(),
        agent_host: config.api_host.clone(),
    };

    let app = reaper_agent::router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "reaper-agent listening");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresh_token.cancel();
    let _ = refresher_handle.await;
    let _ = audit_worker.await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received");
}
