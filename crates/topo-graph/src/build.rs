//! Depth-first construction of the commit graph from branch heads.

use std::collections::BTreeSet;

use topo_hash::CommitId;
use topo_refs::Branches;

use crate::graph::CommitGraph;
use crate::source::CommitSource;
use crate::GraphError;

/// Discover every commit reachable from `branches` and link them.
///
/// Each head is expanded depth-first with an explicit work list. A commit is
/// inspected once, no matter how many branches reach it. A branch head the
/// source does not know is [`GraphError::UnknownCommit`]; a missing parent
/// surfaces from the link pass as [`GraphError::MissingAncestor`].
pub fn build_graph<S>(source: &S, branches: &Branches) -> Result<CommitGraph, GraphError>
where
    S: CommitSource + ?Sized,
{
    let mut graph = CommitGraph::default();
    let mut absent: BTreeSet<CommitId> = BTreeSet::new();

    for (name, head) in branches {
        let mut stack = vec![head.clone()];
        while let Some(id) = stack.pop() {
            if graph.contains(&id) || absent.contains(&id) {
                continue;
            }
            match source.parents(&id)? {
                Some(parents) => {
                    tracing::trace!(commit = %id, parents = parents.len(), "discovered");
                    stack.extend(parents.iter().filter(|p| !graph.contains(p)).cloned());
                    graph.insert(id, parents);
                }
                None => {
                    tracing::warn!(commit = %id, "commit object not found");
                    absent.insert(id);
                }
            }
        }

        if !graph.contains(head) {
            tracing::debug!(branch = %name, "branch head is missing");
            return Err(GraphError::UnknownCommit(head.clone()));
        }
    }

    graph.link_children()?;
    tracing::debug!(
        commits = graph.len(),
        edges = graph.edge_count(),
        roots = graph.roots().len(),
        "built commit graph"
    );
    Ok(graph)
}
