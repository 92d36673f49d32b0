//! Snapshot storage, decision caching, and the policy evaluator itself —
//! everything needed to turn a loaded snapshot plus a decision request
//! into an authoritative allow/deny.

pub mod action_mapper;
pub mod decision_cache;
pub mod evaluator;
pub mod snapshot_store;

pub use action_mapper::map_action;
pub use decision_cache::{cache_key, DecisionCache};
pub use evaluator::{evaluate, is_admin_request};
pub use snapshot_store::SnapshotStore;

pub use reaper_core;
pub use reaper_core::{Decision, DecisionRequest, Policy, PolicyId, ReaperError, Result, Snapshot};
