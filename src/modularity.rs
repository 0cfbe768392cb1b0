//! Newman modularity of a partition.
//!
//! Q = Σ_c (e_cc − a_c²), where e_cc is the fraction of edge endpoints lying
//! inside cluster c and a_c is the fraction of endpoints incident to c.
//! Edges carry uniform weight 1; self-loops are ignored.

use std::collections::BTreeMap;

use petgraph::graph::UnGraph;

use crate::error::{Error, Result};
use crate::graph::AdjacencyView;
use crate::partition::Partition;

/// Modularity of `partition` on `graph`.
///
/// Validates that the partition covers every vertex exactly once. A graph
/// without edges scores 0 for any partition.
///
/// # Example
///
/// ```
/// use petgraph::graph::UnGraph;
/// use coregroups::{modularity, Partition};
///
/// let mut graph = UnGraph::<(), ()>::new_undirected();
/// let nodes: Vec<_> = (0..6).map(|_| graph.add_node(())).collect();
/// for (u, v) in [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)] {
///     graph.add_edge(nodes[u], nodes[v], ());
/// }
///
/// let mut partition = Partition::new();
/// partition.push(vec![0, 1, 2]);
/// partition.push(vec![3, 4, 5]);
/// let q = modularity(&graph, &partition).unwrap();
/// assert!((q - 0.5).abs() < 1e-9);
/// ```
pub fn modularity<N, E>(graph: &UnGraph<N, E>, partition: &Partition) -> Result<f64> {
    let vertex_count = graph.node_count();
    validate_partition(partition, vertex_count)?;
    let view = AdjacencyView::from_graph(graph);
    Ok(modularity_of(&view, partition))
}

/// Check that `partition` is a partition of `0..vertex_count`.
pub(crate) fn validate_partition(partition: &Partition, vertex_count: usize) -> Result<()> {
    let mut seen = vec![false; vertex_count];
    let mut covered = 0;
    for cluster in partition.clusters() {
        for &vertex in cluster {
            if vertex >= vertex_count {
                return Err(Error::VertexOutOfRange {
                    vertex,
                    vertex_count,
                });
            }
            if seen[vertex] {
                return Err(Error::DuplicateVertex { vertex });
            }
            seen[vertex] = true;
            covered += 1;
        }
    }
    if covered != vertex_count {
        return Err(Error::PartitionMismatch {
            expected: vertex_count,
            found: covered,
        });
    }
    Ok(())
}

/// Closed-form Q; trusts that `partition` is valid for `view`.
pub(crate) fn modularity_of(view: &AdjacencyView, partition: &Partition) -> f64 {
    let membership = partition.membership();
    let cluster_count = partition.len();

    // Directed endpoint counts per cluster pair; the running total ends at 2m.
    let mut endpoint_rows: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); cluster_count];
    let mut endpoint_total = 0.0;
    for u in 0..view.vertex_count() {
        let from = membership[u];
        for &v in view.neighbors(u) {
            *endpoint_rows[from].entry(membership[v]).or_insert(0.0) += 1.0;
            endpoint_total += 1.0;
        }
    }

    if endpoint_total == 0.0 {
        return 0.0;
    }

    let mut q = 0.0;
    for (cluster, row) in endpoint_rows.iter().enumerate() {
        let mut incident = 0.0;
        for value in row.values() {
            incident += value / endpoint_total;
        }
        let internal = row.get(&cluster).copied().unwrap_or(0.0) / endpoint_total;
        q += internal - incident * incident;
    }
    q
}
