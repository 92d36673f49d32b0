//! Subject attributes resolver (C4): `resolve(username) -> (groups, roles)`
//! backed by a size- and TTL-bounded cache. Missing users are cached as
//! empty attributes for the same TTL so a repeated lookup for a nonexistent
//! user doesn't keep hitting the policy source.

use crate::client::RangerClient;
use moka::future::Cache;
use reaper_core::{Result, SubjectAttributes};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_CAPACITY: u64 = 10_000;
pub const DEFAULT_TTL_SECS: u64 = 300;

#[derive(Clone)]
pub struct SubjectResolver {
    client: RangerClient,
    cache: Cache<String, SubjectAttributes>,
}

impl SubjectResolver {
    pub fn new(client: RangerClient, capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { client, cache }
    }

    pub async fn resolve(&self, username: &str) -> Result<SubjectAttributes> {
        if let Some(attrs) = self.cache.get(username).await {
            debug!(username, "subject cache hit");
            return Ok(attrs);
        }

        let attrs = match self.client.fetch_user(username).await {
            Ok(Some(raw_user)) => {
                let (groups, roles) = raw_user.groups_and_roles();
                SubjectAttributes::new(groups.into_iter().collect(), roles.into_iter().collect())
            }
            Ok(None) => {
                warn!(username, "user not found at policy source, caching empty attributes");
                SubjectAttributes::empty()
            }
            Err(e) => {
                // A transport failure resolves to empty attributes for this
                // lookup (still cached briefly) rather than failing the
                // whole decision request.
                warn!(username, error = %e, "subject lookup failed, treating as no attributes");
                SubjectAttributes::empty()
            }
        };

        self.cache.insert(username.to_string(), attrs.clone()).await;
        Ok(attrs)
    }
}
