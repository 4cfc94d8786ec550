//! In-memory history shared by the topo-graph integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use topo_graph::{CommitSource, GraphError, HistorySource};
use topo_hash::CommitId;
use topo_refs::Branches;

/// A repository that lives entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryHistory {
    pub parents: HashMap<CommitId, Vec<CommitId>>,
    pub branches: Branches,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit with the given parents.
    pub fn commit(mut self, id: &str, parents: &[&str]) -> Self {
        self.parents
            .insert(cid(id), parents.iter().map(|p| cid(p)).collect());
        self
    }

    /// Point branch `name` at `head`.
    pub fn branch(mut self, name: &str, head: &str) -> Self {
        self.branches.insert(name, cid(head));
        self
    }
}

impl CommitSource for MemoryHistory {
    fn parents(&self, id: &CommitId) -> Result<Option<Vec<CommitId>>, GraphError> {
        Ok(self.parents.get(id).cloned())
    }
}

impl HistorySource for MemoryHistory {
    fn resolve_root(&self) -> Result<PathBuf, GraphError> {
        Ok(PathBuf::from("/memory"))
    }

    fn read_branches(&self) -> Result<Branches, GraphError> {
        Ok(self.branches.clone())
    }
}

pub fn cid(s: &str) -> CommitId {
    CommitId::new(s).unwrap()
}

/// Render lines to the exact text the binary would print.
pub fn to_text(lines: &[topo_graph::Line]) -> String {
    let mut out = Vec::new();
    topo_graph::write_lines(&mut out, lines).unwrap();
    String::from_utf8(out).unwrap()
}
