//! Flat environment-variable configuration, read once at startup.
//!
//! Mirrors `original_source/backend/app/core/config.py`'s `Settings` object,
//! trimmed to the fields this gateway actually consults — no config crate
//! in the dependency stack, so this reads `std::env` directly the way the
//! teacher's services read their own small number of env vars.

use std::time::Duration;

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_list(key: &str) -> Vec<String> {
    std::env::var(key)
        .ok()
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Process-wide configuration, constructed once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub ranger_host: String,
    pub ranger_user: String,
    pub ranger_password: String,
    pub ranger_service_name: String,
    pub ranger_servicedef_name: String,
    pub ranger_cache_ttl: Duration,
    pub solr_audit_url: String,
    pub api_host: String,
    pub ip_whitelist: Vec<String>,
    pub bind_addr: String,
    pub decision_cache_size: u64,
    pub subject_cache_size: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            ranger_host: env_string("RANGER_HOST", "http://ranger:6080"),
            ranger_user: env_string("RANGER_USER", "admin"),
            ranger_password: env_string("RANGER_PASSWORD", "admin"),
            ranger_service_name: env_string("RANGER_SERVICE_NAME", "minio-dev"),
            ranger_servicedef_name: env_string("RANGER_SERVICEDEF_NAME", "minio-service-def"),
            ranger_cache_ttl: Duration::from_secs(env_u64("RANGER_CACHE_TTL", 300)),
            solr_audit_url: env_string("SOLR_AUDIT_URL", "http://solr:8983/solr/ranger_audits"),
            api_host: env_string("API_HOST", "localhost"),
            ip_whitelist: env_list("IP_WHITELIST"),
            bind_addr: env_string("BIND_ADDR", "0.0.0.0:8080"),
            decision_cache_size: env_u64("DECISION_CACHE_SIZE", 10_000),
            subject_cache_size: env_u64("SUBJECT_CACHE_SIZE", 10_000),
        }
    }
}
