//! # Reaper Core
//!
//! Shared domain types and error handling for the Reaper access decision
//! point: an out-of-band authorizer for S3-compatible object storage
//! requests, evaluating policies mirrored from an Apache Ranger-style
//! policy source.
//!
//! ## Value
//! - Zero-allocation policy evaluation on the decision hot path
//! - Atomic snapshot swapping without service interruption
//! - Closed-by-default authorization: absence of data denies, never allows

pub mod config;
pub mod decision;
pub mod error;
pub mod policy;
pub mod request;
pub mod snapshot;
pub mod subject;
pub mod util;

pub use config::Config;
pub use decision::Decision;
pub use error::{ReaperError, Result};
pub use policy::{Access, Policy, PolicyId, PolicyItem, ResourceSpec};
pub use request::{AccessType, DecisionRequest, ROLE_SYS_ADMIN};
pub use snapshot::Snapshot;
pub use subject::SubjectAttributes;
pub use util::first_non_empty;

/// Current Reaper version for compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reaper build information for telemetry and debugging
pub const BUILD_INFO: &str = concat!(
    "Reaper ",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_NAME"),
    ")"
);

/// Standard API endpoints served by `services/reaper-agent`.
pub mod endpoints {
    pub const HEALTH: &str = "/utils/health-check/";
    pub const CHECK: &str = "/check";
    pub const METRICS: &str = "/metrics";
}
