//! Basic-auth HTTP client for the policy source (C2).

use crate::raw::{PoliciesResponse, RawPolicy, RawUser, ServiceDefResponse};
use reaper_core::{PolicyId, ReaperError, Result};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct RangerClient {
    base_url: String,
    username: String,
    password: String,
    http: reqwest::Client,
}

impl RangerClient {
    pub fn new(base_url: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .expect("reqwest client builds with static config");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            http,
        }
    }

    #[instrument(skip(self), fields(service_name))]
    pub async fn fetch_policies(&self, service_name: &str) -> Result<Vec<RawPolicy>> {
        let url = format!(
            "{}/service/public/v2/api/service/{service_name}/policy",
            self.base_url
        );

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| ReaperError::TransportError {
                reason: format!("fetching policies from {url}: {e}"),
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), %url, "policy source returned non-success status");
            return Ok(Vec::new());
        }

        let parsed: PoliciesResponse = response
            .json()
            .await
            .map_err(|e| ReaperError::TransportError {
                reason: format!("parsing policies response from {url}: {e}"),
            })?;

        let policies = parsed.into_policies();
        debug!(count = policies.len(), "fetched policies");
        Ok(policies)
    }

    #[instrument(skip(self))]
    pub async fn fetch_service_def_id(&self, servicedef_name: &str) -> Result<Option<PolicyId>> {
        let url = format!(
            "{}/service/public/v2/api/servicedef/name/{servicedef_name}",
            self.base_url
        );

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| ReaperError::TransportError {
                reason: format!("fetching service def from {url}: {e}"),
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            warn!(%url, "service definition not found");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ReaperError::TransportError {
                reason: format!("unexpected status {} from {url}", response.status()),
            });
        }

        let parsed: ServiceDefResponse = response
            .json()
            .await
            .map_err(|e| ReaperError::TransportError {
                reason: format!("parsing servicedef response from {url}: {e}"),
            })?;

        Ok(parsed.id)
    }

    #[instrument(skip(self))]
    pub async fn fetch_user(&self, username: &str) -> Result<Option<RawUser>> {
        let url = format!("{}/service/xusers/users/userName/{username}", self.base_url);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| ReaperError::TransportError {
                reason: format!("fetching user from {url}: {e}"),
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            warn!(%username, "user not found at policy source");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ReaperError::TransportError {
                reason: format!("unexpected status {} from {url}", response.status()),
            });
        }

        let parsed: RawUser = response
            .json()
            .await
            .map_err(|e| ReaperError::TransportError {
                reason: format!("parsing user response from {url}: {e}"),
            })?;

        Ok(Some(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{basic_auth, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_policies_parses_list_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/public/v2/api/service/s3-reaper/policy"))
            .and(basic_auth("admin", "admin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "p", "resources": {}, "policyItems": []}
            ])))
            .mount(&server)
            .await;

        let client = RangerClient::new(server.uri(), "admin", "admin");
        let policies = client.fetch_policies("s3-reaper").await.unwrap();
        assert_eq!(policies.len(), 1);
    }

    #[tokio::test]
    async fn fetch_policies_returns_empty_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/public/v2/api/service/s3-reaper/policy"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = RangerClient::new(server.uri(), "admin", "admin");
        let policies = client.fetch_policies("s3-reaper").await.unwrap();
        assert!(policies.is_empty());
    }

    #[tokio::test]
    async fn fetch_service_def_id_returns_none_on_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/public/v2/api/servicedef/name/minio-service-def"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = RangerClient::new(server.uri(), "admin", "admin");
        let id = client.fetch_service_def_id("minio-service-def").await.unwrap();
        assert!(id.is_none());
    }

    #[tokio::test]
    async fn fetch_user_returns_groups_and_roles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/xusers/users/userName/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "groupNameList": ["analysts"],
                "userRoleList": ["ROLE_USER"]
            })))
            .mount(&server)
            .await;

        let client = RangerClient::new(server.uri(), "admin", "admin");
        let user = client.fetch_user("alice").await.unwrap().unwrap();
        let (groups, roles) = user.groups_and_roles();
        assert_eq!(groups, vec!["analysts".to_string()]);
        assert_eq!(roles, vec!["ROLE_USER".to_string()]);
    }

    #[tokio::test]
    async fn fetch_user_returns_none_on_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/xusers/users/userName/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = RangerClient::new(server.uri(), "admin", "admin");
        assert!(client.fetch_user("ghost").await.unwrap().is_none());
    }
}
