//! Reliable async audit emission: build a Ranger-shaped audit record per
//! decision and hand it to a bounded channel drained by a dedicated worker,
//! so emission never blocks a decision response.

pub mod audit;
pub mod emitter;

pub use audit::{build, derive_cli_ip, AuditRecord, BuildParams, SENTINEL_NO_POLICY};
pub use emitter::AuditEmitter;
