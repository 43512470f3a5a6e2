//! Reference-cycle detection over discovered types.
//!
//! Breadth-first discovery with a seen set terminates on cyclic schemas, but
//! would silently accept them. Cyclic composite references are unsupported,
//! so the reference edges are checked separately once discovery finishes.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

/// Finds one reference cycle among `node_count` nodes connected by `edges`.
///
/// Returns the node indices on the cycle sorted ascending (that is, in
/// discovery order), choosing the cycle whose earliest member was discovered
/// first. A node referencing itself is a cycle of one.
pub fn find_cycle(node_count: usize, edges: &[(usize, usize)]) -> Option<Vec<usize>> {
    let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(node_count, edges.len());
    for _ in 0..node_count {
        graph.add_node(());
    }
    for &(from, to) in edges {
        graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
    }

    tarjan_scc(&graph)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => graph.contains_edge(*single, *single),
            _ => true,
        })
        .map(|component| {
            let mut members: Vec<usize> = component.into_iter().map(|n| n.index()).collect();
            members.sort_unstable();
            members
        })
        .min_by_key(|members| members[0])
}
