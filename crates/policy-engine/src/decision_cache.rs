//! Optimization-only cache for repeat decision lookups.
//!
//! Purpose: avoid re-walking a snapshot for a `(service, user, bucket,
//! object, access_type)` tuple seen recently. Never authoritative — a miss
//! always falls back to [`crate::evaluator::evaluate`], and the cache is
//! never consulted for the admin short-circuit.

use moka::future::Cache;
use reaper_core::{AccessType, Decision};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

pub const DEFAULT_CAPACITY: u64 = 10_000;
pub const DEFAULT_TTL_SECS: u64 = 300;

#[derive(Serialize)]
struct CacheKeyFields<'a> {
    access_type: &'a str,
    bucket: &'a str,
    object: Option<&'a str>,
    service: &'a str,
    user: &'a str,
}

/// Stable hash of the canonicalized decision tuple. `serde_json` emits map
/// keys in struct-field order, which we keep alphabetical so the key is
/// independent of call-site field ordering.
pub fn cache_key(service: &str, user: &str, bucket: &str, object: Option<&str>, access_type: AccessType) -> String {
    let fields = CacheKeyFields {
        access_type: access_type.as_str(),
        bucket,
        object,
        service,
        user,
    };
    let canonical = serde_json::to_vec(&fields).expect("cache key fields always serialize");
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    hex::encode(hasher.finalize())
}

#[derive(Clone)]
pub struct DecisionCache {
    inner: Cache<String, Decision>,
}

impl DecisionCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    pub async fn get(&self, key: &str) -> Option<Decision> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: String, decision: Decision) {
        self.inner.insert(key, decision).await;
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for DecisionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, Duration::from_secs(DEFAULT_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_stable_for_same_tuple() {
        let a = cache_key("s3-reaper", "alice", "data", Some("a.csv"), AccessType::Read);
        let b = cache_key("s3-reaper", "alice", "data", Some("a.csv"), AccessType::Read);
        assert_eq!(a, b);
    }

    #[test]
    fn cache_key_differs_by_access_type() {
        let read = cache_key("s3-reaper", "alice", "data", None, AccessType::Read);
        let write = cache_key("s3-reaper", "alice", "data", None, AccessType::Write);
        assert_ne!(read, write);
    }

    #[test]
    fn cache_key_distinguishes_missing_object() {
        let bucket_level = cache_key("s3-reaper", "alice", "data", None, AccessType::List);
        let object_level = cache_key("s3-reaper", "alice", "data", Some(""), AccessType::List);
        assert_ne!(bucket_level, object_level);
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let cache = DecisionCache::new(10, Duration::from_secs(60));
        let key = cache_key("s3-reaper", "alice", "data", None, AccessType::Read);
        assert!(cache.get(&key).await.is_none());

        cache.insert(key.clone(), Decision::allow(7, true)).await;
        let hit = cache.get(&key).await.unwrap();
        assert_eq!(hit.policy_id, 7);
        assert!(hit.allowed);
    }
}
