//! Subject attributes — the groups and roles a policy source reports for a
//! username.

use std::collections::BTreeSet;

/// `(groups, roles)` for one username, as resolved by the subject
/// attributes resolver. Missing users resolve to `SubjectAttributes::empty()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectAttributes {
    pub groups: BTreeSet<String>,
    pub roles: BTreeSet<String>,
}

impl SubjectAttributes {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(groups: BTreeSet<String>, roles: BTreeSet<String>) -> Self {
        Self { groups, roles }
    }
}
