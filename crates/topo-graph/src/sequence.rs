//! Tip-first topological ordering by peeling commits from the roots.

use std::collections::{HashMap, VecDeque};

use topo_hash::CommitId;

use crate::graph::CommitGraph;
use crate::GraphError;

/// Order every commit so that each one precedes all of its parents.
///
/// Commits are peeled breadth-first from the roots, tracking how many
/// parents of each commit are still unemitted; a commit becomes ready once
/// that count drops to zero. The root-first result is reversed before it is
/// returned, so branch tips come first. Ready commits are taken in ascending
/// id order, which makes the output reproducible.
///
/// The graph itself is left untouched.
pub fn sequence(graph: &CommitGraph) -> Result<Vec<CommitId>, GraphError> {
    let mut pending: HashMap<&CommitId, usize> = graph
        .nodes()
        .map(|node| (node.id(), node.parents().len()))
        .collect();
    let mut ready: VecDeque<&CommitId> = graph.roots().iter().collect();
    let mut order = Vec::with_capacity(graph.len());

    while let Some(id) = ready.pop_front() {
        order.push(id.clone());
        for child in graph.node(id)?.children() {
            let remaining = pending
                .get_mut(child)
                .ok_or_else(|| GraphError::MissingAncestor {
                    missing: child.clone(),
                    referenced_by: id.clone(),
                })?;
            *remaining -= 1;
            if *remaining == 0 {
                ready.push_back(child);
            }
        }
    }

    if order.len() < graph.len() {
        return Err(GraphError::Cycle {
            remaining: graph.len() - order.len(),
        });
    }

    order.reverse();
    tracing::debug!(commits = order.len(), "sequenced commits");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CommitId {
        CommitId::new(s).unwrap()
    }

    fn graph(entries: &[(&str, &[&str])]) -> CommitGraph {
        CommitGraph::from_parents(
            entries
                .iter()
                .map(|(c, ps)| (id(c), ps.iter().map(|p| id(p)).collect::<Vec<_>>())),
        )
        .unwrap()
    }

    fn names(order: &[CommitId]) -> Vec<&str> {
        order.iter().map(CommitId::as_str).collect()
    }

    fn position(order: &[CommitId], c: &str) -> usize {
        order.iter().position(|x| x.as_str() == c).unwrap()
    }

    #[test]
    fn linear_history_is_tip_first() {
        let g = graph(&[("C3", &["C2"]), ("C2", &["C1"]), ("C1", &[])]);
        assert_eq!(names(&sequence(&g).unwrap()), ["C3", "C2", "C1"]);
    }

    #[test]
    fn merge_precedes_both_parents() {
        let g = graph(&[
            ("C4", &["C2", "C3"]),
            ("C3", &["C1"]),
            ("C2", &["C1"]),
            ("C1", &[]),
        ]);
        let order = sequence(&g).unwrap();

        assert_eq!(order.len(), 4);
        assert!(position(&order, "C4") < position(&order, "C2"));
        assert!(position(&order, "C4") < position(&order, "C3"));
        assert!(position(&order, "C2") < position(&order, "C1"));
        assert!(position(&order, "C3") < position(&order, "C1"));
        // Ascending tie-break from the roots, reversed.
        assert_eq!(names(&order), ["C4", "C3", "C2", "C1"]);
    }

    #[test]
    fn merge_waits_for_every_parent() {
        // The long side of the merge must be fully emitted before the merge.
        let g = graph(&[
            ("m", &["a2", "b1"]),
            ("a2", &["a1"]),
            ("a1", &["r"]),
            ("b1", &["r"]),
            ("r", &[]),
        ]);
        let order = sequence(&g).unwrap();
        assert_eq!(position(&order, "m"), 0);
        assert!(position(&order, "a2") < position(&order, "a1"));
    }

    #[test]
    fn disjoint_roots_are_all_emitted() {
        let g = graph(&[("R1", &[]), ("R2", &[])]);
        assert_eq!(names(&sequence(&g).unwrap()), ["R2", "R1"]);
    }

    #[test]
    fn graph_is_not_mutated() {
        let g = graph(&[("b", &["a"]), ("a", &[])]);
        let before = g.clone();
        sequence(&g).unwrap();
        assert_eq!(g, before);
        assert!(g.get(&id("b")).unwrap().has_parent(&id("a")));
    }

    #[test]
    fn empty_graph() {
        assert!(sequence(&CommitGraph::default()).unwrap().is_empty());
    }

    #[test]
    fn cycle_is_reported() {
        let g = graph(&[("a", &["b"]), ("b", &["a"]), ("r", &[])]);
        match sequence(&g) {
            Err(GraphError::Cycle { remaining }) => assert_eq!(remaining, 2),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
