//! Error type for graph construction, ordering and formatting.

use topo_hash::CommitId;

/// Errors produced while building, ordering or formatting a commit graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("commit {missing} referenced by {referenced_by} is not in the graph")]
    MissingAncestor {
        missing: CommitId,
        referenced_by: CommitId,
    },

    #[error("commit not found: {0}")]
    UnknownCommit(CommitId),

    #[error("commit graph contains a cycle: {remaining} commits could not be ordered")]
    Cycle { remaining: usize },

    #[error("cannot inspect commit {id}: {reason}")]
    Inspect { id: CommitId, reason: String },

    #[error(transparent)]
    Ref(#[from] topo_refs::RefError),

    #[error(transparent)]
    Util(#[from] topo_utils::UtilError),
}
