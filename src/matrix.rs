//! Sparse cluster-interaction matrix.
//!
//! Symmetric matrix over live cluster ids. An off-diagonal entry `M[i][j]`
//! holds the fraction of edges running between clusters i and j, scaled by
//! 1/(2m); the diagonal holds twice the intra-cluster edge fraction, so a row
//! sum equals the summed degree of the cluster's members over 2m. Merging two
//! clusters is a row/column fold whose cost is proportional to the sizes of
//! the two rows.
//!
//! Rows are ordered maps so that candidate enumeration (and with it the
//! greedy driver's tie handling) is reproducible for a fixed seed.

use std::collections::BTreeMap;

use crate::graph::AdjacencyView;
use crate::partition::Partition;

pub(crate) struct ClusterMatrix {
    rows: Vec<BTreeMap<usize, f64>>,
    row_sums: Vec<f64>,
}

impl ClusterMatrix {
    /// Each vertex its own cluster: `M[u][v] = 1/(2m)` per edge (u, v).
    ///
    /// Requires a graph with at least one edge.
    pub(crate) fn from_singletons(view: &AdjacencyView) -> Self {
        let n = view.vertex_count();
        let scale = 1.0 / (2.0 * view.edge_count() as f64);
        let mut rows: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n];

        for u in 0..n {
            for &v in view.neighbors(u) {
                *rows[u].entry(v).or_insert(0.0) += scale;
            }
        }

        Self::with_rows(rows)
    }

    /// Collapse the graph onto `partition`. Rows are keyed by each cluster's
    /// anchor (first vertex id); intra-cluster edges land on the diagonal,
    /// contributing `1/(2m)` per direction.
    pub(crate) fn from_partition(view: &AdjacencyView, partition: &Partition) -> Self {
        let n = view.vertex_count();
        let scale = 1.0 / (2.0 * view.edge_count() as f64);
        let mut anchor_of = vec![0; n];
        for cluster in partition.clusters() {
            let anchor = cluster[0];
            for &vertex in cluster {
                anchor_of[vertex] = anchor;
            }
        }

        let mut rows: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n];
        for u in 0..n {
            for &v in view.neighbors(u) {
                *rows[anchor_of[u]].entry(anchor_of[v]).or_insert(0.0) += scale;
            }
        }

        Self::with_rows(rows)
    }

    fn with_rows(rows: Vec<BTreeMap<usize, f64>>) -> Self {
        let row_sums = rows.iter().map(|row| row.values().sum()).collect();
        Self { rows, row_sums }
    }

    /// Row sum `a[i]`; 0 for retired or isolated rows.
    pub(crate) fn row_sum(&self, i: usize) -> f64 {
        self.row_sums[i]
    }

    /// Number of stored entries in row `i` (density tie-break heuristic).
    pub(crate) fn row_len(&self, i: usize) -> usize {
        self.rows[i].len()
    }

    /// Entries of row `i` as (column, value) pairs in column order.
    pub(crate) fn row(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.rows[i].iter().map(|(&column, &value)| (column, value))
    }

    /// Fold cluster `merged` into cluster `keep`.
    ///
    /// Off-diagonal mass of the merged row is added to the kept row (and
    /// mirrored in the neighbors' rows, where the merged column is deleted);
    /// the diagonal gains the merged diagonal plus twice the cross entry; row
    /// `merged` is retired.
    pub(crate) fn merge(&mut self, keep: usize, merged: usize) {
        debug_assert_ne!(keep, merged);
        let merged_row = std::mem::take(&mut self.rows[merged]);
        let cross = merged_row.get(&keep).copied().unwrap_or(0.0);
        let merged_diagonal = merged_row.get(&merged).copied().unwrap_or(0.0);

        for (&column, &value) in &merged_row {
            if column == keep || column == merged {
                continue;
            }
            let entry = self.rows[keep].entry(column).or_insert(0.0);
            *entry += value;
            let updated = *entry;
            let neighbor_row = &mut self.rows[column];
            neighbor_row.remove(&merged);
            neighbor_row.insert(keep, updated);
        }

        self.rows[keep].remove(&merged);
        *self.rows[keep].entry(keep).or_insert(0.0) += merged_diagonal + 2.0 * cross;

        self.row_sums[keep] += self.row_sums[merged];
        self.row_sums[merged] = 0.0;
    }
}
