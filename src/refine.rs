//! Vertex-move refinement.
//!
//! Greedy local search over single-vertex relocations: each pass walks the
//! vertices in id order, scores moving a vertex into each cluster it touches,
//! and executes the best strictly improving move. Passes repeat until one
//! completes without a move, at which point no single-vertex relocation can
//! raise modularity.

use std::collections::BTreeMap;

use petgraph::graph::UnGraph;

use crate::error::Result;
use crate::graph::AdjacencyView;
use crate::modularity::validate_partition;
use crate::partition::Partition;

/// Refine `partition` by single-vertex moves until no move improves Q.
///
/// The input partition is not modified; the result preserves the relative
/// order of the clusters that survive.
pub fn refine_partition<N, E>(graph: &UnGraph<N, E>, partition: &Partition) -> Result<Partition> {
    validate_partition(partition, graph.node_count())?;
    let view = AdjacencyView::from_graph(graph);
    Ok(refine(&view, partition))
}

pub(crate) fn refine(view: &AdjacencyView, partition: &Partition) -> Partition {
    let vertex_count = view.vertex_count();
    let edge_count = view.edge_count();
    if edge_count == 0 {
        return partition.clone();
    }
    let m = edge_count as f64;

    let cluster_count = partition.len();
    let mut cluster_of = partition.membership();

    // Summed neighbor-list sizes per cluster; self-loops were stripped at
    // load, so these agree with the degrees in the Q formula.
    let mut cluster_degree = vec![0usize; cluster_count];
    for (vertex, &cluster) in cluster_of.iter().enumerate() {
        cluster_degree[cluster] += view.degree(vertex);
    }

    // links[v][c] = number of edges from v into cluster c. Counts may decay
    // to zero after moves; the zero entries stay and simply never win.
    let mut links: Vec<BTreeMap<usize, usize>> = vec![BTreeMap::new(); vertex_count];
    for vertex in 0..vertex_count {
        for &neighbor in view.neighbors(vertex) {
            *links[vertex].entry(cluster_of[neighbor]).or_insert(0) += 1;
        }
    }

    let mut improved = true;
    while improved {
        improved = false;
        for vertex in 0..vertex_count {
            let current = cluster_of[vertex];
            let degree = view.degree(vertex) as f64;
            let links_to_current = links[vertex].get(&current).copied().unwrap_or(0);

            let mut best_cluster = None;
            let mut best_delta = 0.0;
            for (&candidate, &links_to_candidate) in &links[vertex] {
                if candidate == current {
                    continue;
                }
                let term1 = (links_to_candidate as f64 - links_to_current as f64) / m;
                let term2 = (cluster_degree[candidate] as f64 - cluster_degree[current] as f64
                    + degree)
                    * degree
                    / (2.0 * m * m);
                let delta = term1 - term2;
                if delta > best_delta {
                    best_delta = delta;
                    best_cluster = Some(candidate);
                }
            }

            if let Some(target) = best_cluster {
                let degree = view.degree(vertex);
                cluster_degree[current] -= degree;
                cluster_degree[target] += degree;
                for &neighbor in view.neighbors(vertex) {
                    let neighbor_links = &mut links[neighbor];
                    if let Some(count) = neighbor_links.get_mut(&current) {
                        *count -= 1;
                    }
                    *neighbor_links.entry(target).or_insert(0) += 1;
                }
                cluster_of[vertex] = target;
                improved = true;
            }
        }
    }

    Partition::from_membership(&cluster_of, cluster_count)
}
