//! Library surface for `reaper-agent`: the router builder and its pipeline,
//! factored out of `main.rs` so integration tests can drive the service
//! without going through a real TCP listener.

pub mod pipeline;
pub mod state;

use reaper_core::endpoints;
use state::AppState;

pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route(endpoints::HEALTH, axum::routing::get(pipeline::health_check))
        .route(endpoints::CHECK, axum::routing::post(pipeline::check))
        .route(endpoints::METRICS, axum::routing::get(pipeline::metrics_endpoint))
        .with_state(state)
}
