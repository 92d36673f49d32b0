//! Library surface for the `reaper` operator CLI, factored out of `main.rs`
//! so its HTTP calls and request shaping can be exercised in tests without
//! spawning the binary.

use reqwest::Client;
use serde_json::{json, Value};

pub fn build_check_body(user: &str, bucket: &str, object: Option<&str>, action: &str) -> Value {
    json!({
        "input": {
            "bucket": bucket,
            "object": object,
            "action": action,
            "conditions": { "username": [user] }
        }
    })
}

pub async fn fetch_health(client: &Client, host: &str) -> anyhow::Result<Value> {
    let url = format!("{}{}", host.trim_end_matches('/'), reaper_core::endpoints::HEALTH);
    Ok(client.get(&url).send().await?.json().await?)
}

pub async fn fetch_metrics(client: &Client, host: &str) -> anyhow::Result<String> {
    let url = format!("{}{}", host.trim_end_matches('/'), reaper_core::endpoints::METRICS);
    Ok(client.get(&url).send().await?.text().await?)
}

/// Returns the HTTP status code and the parsed JSON body.
pub async fn send_check(
    client: &Client,
    host: &str,
    user: &str,
    bucket: &str,
    object: Option<&str>,
    action: &str,
) -> anyhow::Result<(u16, Value)> {
    let url = format!("{}{}", host.trim_end_matches('/'), reaper_core::endpoints::CHECK);
    let body = build_check_body(user, bucket, object, action);
    let response = client.post(&url).json(&body).send().await?;
    let status = response.status().as_u16();
    let parsed = response.json().await.unwrap_or(Value::Null);
    Ok((status, parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_check_body_nests_username_under_conditions() {
        let body = build_check_body("alice", "reports", Some("q3.csv"), "s3:GetObject");
        assert_eq!(body["input"]["bucket"], "reports");
        assert_eq!(body["input"]["conditions"]["username"][0], "alice");
        assert_eq!(body["input"]["object"], "q3.csv");
    }

    #[test]
    fn build_check_body_allows_missing_object() {
        let body = build_check_body("alice", "reports", None, "s3:ListBucket");
        assert!(body["input"]["object"].is_null());
    }
}
