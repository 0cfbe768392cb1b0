//! Read-only adjacency snapshot of the input graph.
//!
//! Every algorithm in this crate runs against an [`AdjacencyView`] rather than
//! the `petgraph` structure directly. The snapshot strips self-loops, so
//! neighbor-list sizes, link counts, and the edge total all agree on the same
//! loop-free graph.

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

/// Plain adjacency lists plus the edge count, frozen at construction.
pub(crate) struct AdjacencyView {
    neighbors: Vec<Vec<usize>>,
    edge_count: usize,
}

impl AdjacencyView {
    /// Snapshot a `petgraph` undirected graph. Self-loops are dropped.
    pub(crate) fn from_graph<N, E>(graph: &UnGraph<N, E>) -> Self {
        let n = graph.node_count();
        let mut neighbors = vec![Vec::new(); n];
        let mut edge_count = 0;

        for edge in graph.edge_references() {
            let u = edge.source().index();
            let v = edge.target().index();
            if u == v {
                continue;
            }
            neighbors[u].push(v);
            neighbors[v].push(u);
            edge_count += 1;
        }

        Self {
            neighbors,
            edge_count,
        }
    }

    pub(crate) fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    pub(crate) fn neighbors(&self, v: usize) -> &[usize] {
        &self.neighbors[v]
    }

    pub(crate) fn degree(&self, v: usize) -> usize {
        self.neighbors[v].len()
    }

    /// Number of undirected edges, self-loops excluded.
    pub(crate) fn edge_count(&self) -> usize {
        self.edge_count
    }
}
