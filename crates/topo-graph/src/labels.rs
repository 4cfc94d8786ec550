//! Inverse branch mapping: the names attached to each branch tip.

use std::collections::BTreeMap;

use topo_hash::CommitId;
use topo_refs::Branches;

/// Branch names attached to each branch tip.
///
/// When several branches point at the same commit, all of their names are
/// kept in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchLabels {
    by_commit: BTreeMap<CommitId, Vec<String>>,
}

impl BranchLabels {
    pub fn from_branches(branches: &Branches) -> Self {
        let mut by_commit: BTreeMap<CommitId, Vec<String>> = BTreeMap::new();
        for (name, head) in branches {
            by_commit.entry(head.clone()).or_default().push(name.clone());
        }
        Self { by_commit }
    }

    /// Names of the branches whose tip is `id`; empty for other commits.
    pub fn labels(&self, id: &CommitId) -> &[String] {
        self.by_commit.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
