//! Commit nodes and the graph that owns them.

use std::collections::{btree_map, BTreeMap, BTreeSet};

use topo_hash::CommitId;

use crate::GraphError;

/// A commit and its direct neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    id: CommitId,
    parents: BTreeSet<CommitId>,
    children: BTreeSet<CommitId>,
}

impl CommitNode {
    fn new(id: CommitId, parents: BTreeSet<CommitId>) -> Self {
        Self {
            id,
            parents,
            children: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &CommitId {
        &self.id
    }

    /// Commits this one directly descends from.
    pub fn parents(&self) -> &BTreeSet<CommitId> {
        &self.parents
    }

    /// Commits that directly descend from this one.
    pub fn children(&self) -> &BTreeSet<CommitId> {
        &self.children
    }

    /// True if `id` is a direct parent of this commit.
    pub fn has_parent(&self, id: &CommitId) -> bool {
        self.parents.contains(id)
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Ancestry graph keyed by commit id.
///
/// Every parent edge has a matching child edge: the graph only exposes
/// constructors that run the link pass, and it is never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitGraph {
    nodes: BTreeMap<CommitId, CommitNode>,
    roots: BTreeSet<CommitId>,
}

impl CommitGraph {
    /// Build a graph from `(commit, parents)` pairs.
    ///
    /// Repeated commits keep their first entry. Every parent must appear as a
    /// commit of its own, otherwise [`GraphError::MissingAncestor`] is
    /// returned.
    pub fn from_parents<I, P>(entries: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (CommitId, P)>,
        P: IntoIterator<Item = CommitId>,
    {
        let mut graph = Self::default();
        for (id, parents) in entries {
            graph.insert(id, parents);
        }
        graph.link_children()?;
        Ok(graph)
    }

    /// Record a commit and its parents. Returns false if the commit was
    /// already present, in which case nothing changes.
    pub(crate) fn insert(
        &mut self,
        id: CommitId,
        parents: impl IntoIterator<Item = CommitId>,
    ) -> bool {
        let btree_map::Entry::Vacant(slot) = self.nodes.entry(id) else {
            return false;
        };
        let parents: BTreeSet<CommitId> = parents.into_iter().collect();
        if parents.is_empty() {
            self.roots.insert(slot.key().clone());
        }
        let node = CommitNode::new(slot.key().clone(), parents);
        slot.insert(node);
        true
    }

    /// Populate every node's `children` as the inverse of `parents`.
    pub(crate) fn link_children(&mut self) -> Result<(), GraphError> {
        let edges: Vec<(CommitId, CommitId)> = self
            .nodes
            .values()
            .flat_map(|node| {
                node.parents
                    .iter()
                    .map(move |parent| (parent.clone(), node.id.clone()))
            })
            .collect();

        for (parent, child) in edges {
            let parent_node =
                self.nodes
                    .get_mut(&parent)
                    .ok_or_else(|| GraphError::MissingAncestor {
                        missing: parent.clone(),
                        referenced_by: child.clone(),
                    })?;
            parent_node.children.insert(child);
        }
        Ok(())
    }

    /// Look up a node.
    pub fn get(&self, id: &CommitId) -> Option<&CommitNode> {
        self.nodes.get(id)
    }

    /// Look up a node, failing with [`GraphError::UnknownCommit`].
    pub fn node(&self, id: &CommitId) -> Result<&CommitNode, GraphError> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::UnknownCommit(id.clone()))
    }

    pub fn contains(&self, id: &CommitId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Commits without parents, in id order.
    pub fn roots(&self) -> &BTreeSet<CommitId> {
        &self.roots
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &CommitNode> {
        self.nodes.values()
    }

    /// Number of parent→child edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.parents.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
