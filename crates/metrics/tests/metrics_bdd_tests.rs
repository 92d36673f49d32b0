use cucumber::{given, then, when, World};
use std::time::Duration;

#[derive(Debug, Default, World)]
struct MetricsWorld {}

#[given("metrics are initialized")]
async fn given_metrics_initialized(_world: &mut MetricsWorld) {
    metrics::init_metrics();
}

#[when(regex = r#"^I record an allowed "([^"]+)" decision$"#)]
async fn when_record_allowed_decision(_world: &mut MetricsWorld, access_type: String) {
    metrics::record_decision(true, &access_type, Duration::from_micros(10));
}

#[when("I record a decision cache hit")]
async fn when_record_cache_hit(_world: &mut MetricsWorld) {
    metrics::record_decision_cache_hit();
}

#[then(regex = r#"^the rendered metrics should mention "([^"]+)"$"#)]
async fn then_rendered_metrics_mentions(_world: &mut MetricsWorld, needle: String) {
    let rendered = metrics::render_metrics().expect("metrics must be initialized before rendering");
    assert!(rendered.contains(&needle), "expected rendered metrics to contain '{needle}'");
}

#[tokio::main]
async fn main() {
    MetricsWorld::run("tests/features").await;
}
