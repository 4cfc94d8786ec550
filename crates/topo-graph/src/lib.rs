//! Commit graph construction, topological ordering and sticky-marker output.
//!
//! The pipeline is: read branches from a [`HistorySource`], expand them into
//! a [`CommitGraph`] with [`build_graph`], order it tip-first with
//! [`sequence`], then render it with an [`OrderFormatter`]. [`topo_order`]
//! runs all of it.

mod build;
mod error;
pub mod format;
mod graph;
mod labels;
mod sequence;
pub mod source;

pub use build::build_graph;
pub use error::GraphError;
pub use format::{write_lines, Line, OrderFormatter};
pub use graph::{CommitGraph, CommitNode};
pub use labels::BranchLabels;
pub use sequence::sequence;
pub use source::{CommitSource, GitRepository, HistorySource};

/// Build, order and render the history of `source`.
pub fn topo_order<S>(source: &S) -> Result<Vec<Line>, GraphError>
where
    S: HistorySource + ?Sized,
{
    let root = source.resolve_root()?;
    tracing::debug!(root = %root.display(), "ordering commits");

    let branches = source.read_branches()?;
    let graph = build_graph(source, &branches)?;
    let order = sequence(&graph)?;
    let labels = BranchLabels::from_branches(&branches);
    OrderFormatter::new(&graph, &labels).lines(&order)
}
