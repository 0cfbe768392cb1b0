//! Clustering trait.

use petgraph::graph::UnGraph;

use crate::error::Result;
use crate::partition::Partition;

/// Trait for graph clustering algorithms.
pub trait GraphClustering {
    /// Partition the graph's vertices into disjoint clusters.
    fn cluster<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Partition>;
}
