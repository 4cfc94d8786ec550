//! Rendering of a commit order with sticky markers.
//!
//! A flat listing loses the graph's branching structure, so whenever two
//! adjacent commits are not directly linked the listing is broken with a
//! marker block:
//!
//! ```text
//! <parents of the last commit of the chain> =
//!
//! =<children of the first commit of the next chain>
//! ```
//!
//! The final commit is always printed on its own, without a reopening line.

use std::fmt;
use std::io::{self, Write};

use topo_hash::CommitId;

use crate::graph::CommitGraph;
use crate::labels::BranchLabels;
use crate::GraphError;

/// One line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A commit, with the names of the branches whose tip it is.
    Commit { id: CommitId, labels: Vec<String> },
    /// Closes a chain: the parents of the commit printed just before.
    StickyEnd { parents: Vec<CommitId> },
    /// Separates two chains.
    Blank,
    /// Reopens a chain: the children of the commit printed just after.
    StickyStart { children: Vec<CommitId> },
}

impl Line {
    /// True for the lines that make up a marker block.
    pub fn is_marker(&self) -> bool {
        !matches!(self, Line::Commit { .. })
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Commit { id, labels } => {
                write!(f, "{id}")?;
                for label in labels {
                    write!(f, " {label}")?;
                }
                Ok(())
            }
            Line::StickyEnd { parents } => {
                for parent in parents {
                    write!(f, "{parent} ")?;
                }
                f.write_str("=")
            }
            Line::Blank => Ok(()),
            Line::StickyStart { children } => {
                f.write_str("=")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{child}")?;
                }
                Ok(())
            }
        }
    }
}

/// Turns an order into output lines.
pub struct OrderFormatter<'a> {
    graph: &'a CommitGraph,
    labels: &'a BranchLabels,
}

impl<'a> OrderFormatter<'a> {
    pub fn new(graph: &'a CommitGraph, labels: &'a BranchLabels) -> Self {
        Self { graph, labels }
    }

    /// Render `order`, inserting a marker block between every pair of
    /// adjacent commits where the second is not a parent of the first.
    ///
    /// The last commit never reopens a chain.
    pub fn lines(&self, order: &[CommitId]) -> Result<Vec<Line>, GraphError> {
        let mut lines = Vec::with_capacity(order.len());
        let mut chain_closed = false;
        let last = order.len().saturating_sub(1);

        for (i, id) in order.iter().enumerate() {
            let node = self.graph.node(id)?;

            if chain_closed && i < last {
                lines.push(Line::StickyStart {
                    children: node.children().iter().cloned().collect(),
                });
                chain_closed = false;
            }

            lines.push(Line::Commit {
                id: id.clone(),
                labels: self.labels.labels(id).to_vec(),
            });

            let Some(next) = order.get(i + 1) else {
                break;
            };
            if !node.has_parent(next) {
                lines.push(Line::StickyEnd {
                    parents: node.parents().iter().cloned().collect(),
                });
                lines.push(Line::Blank);
                chain_closed = true;
            }
        }

        Ok(lines)
    }
}

/// Write `lines` to `out`, one per text line.
pub fn write_lines<W: Write>(out: &mut W, lines: &[Line]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
