//! HTTP client, background refresher, and subject attributes resolver for
//! the policy source (Apache Ranger-shaped REST API).

pub mod client;
pub mod raw;
pub mod refresher;
pub mod subject;

pub use client::RangerClient;
pub use raw::{PoliciesResponse, RawAccess, RawPolicy, RawPolicyItem, RawResourceSpec, RawUser};
pub use refresher::{Refresher, SnapshotSink};
pub use subject::SubjectResolver;
