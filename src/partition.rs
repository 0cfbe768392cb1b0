//! Disjoint vertex clusters with tombstoned slots.
//!
//! A [`Partition`] is an ordered sequence of slots. A slot either holds a
//! cluster (an ordered list of distinct vertex ids) or a tombstone left behind
//! when a cluster was merged away. Compaction drops tombstones and empty
//! clusters while preserving the relative order of the survivors; all
//! constructors return compacted partitions.
//!
//! The intersection operation produces the "core groups" of two partitions:
//! the coarsest partition in which two vertices share a cluster only if they
//! share one in both inputs.

/// A partition of the vertex set into disjoint clusters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    slots: Vec<Option<Vec<usize>>>,
}

impl Partition {
    /// Create an empty partition.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// One singleton cluster per vertex, in vertex-id order.
    pub fn singletons(vertex_count: usize) -> Self {
        Self {
            slots: (0..vertex_count).map(|v| Some(vec![v])).collect(),
        }
    }

    /// Build a partition from a vertex-to-cluster mapping.
    ///
    /// Vertices are grouped by `membership[v]` into `cluster_count` slots and
    /// appear in vertex-id order within each cluster; clusters that received
    /// no vertex are dropped.
    pub fn from_membership(membership: &[usize], cluster_count: usize) -> Self {
        let mut slots: Vec<Option<Vec<usize>>> = (0..cluster_count).map(|_| Some(Vec::new())).collect();
        for (vertex, &cluster) in membership.iter().enumerate() {
            if let Some(slot) = slots[cluster].as_mut() {
                slot.push(vertex);
            }
        }
        Self::from_slots(slots)
    }

    pub(crate) fn from_slots(slots: Vec<Option<Vec<usize>>>) -> Self {
        let mut partition = Self { slots };
        partition.compact();
        partition
    }

    /// Append a cluster.
    pub fn push(&mut self, cluster: Vec<usize>) {
        self.slots.push(Some(cluster));
    }

    /// Number of live clusters.
    pub fn len(&self) -> usize {
        self.clusters().count()
    }

    /// True if the partition has no live clusters.
    pub fn is_empty(&self) -> bool {
        self.clusters().next().is_none()
    }

    /// Total number of vertices covered.
    pub fn vertex_count(&self) -> usize {
        self.clusters().map(<[usize]>::len).sum()
    }

    /// Iterate over the live clusters in order.
    pub fn clusters(&self) -> impl Iterator<Item = &[usize]> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_deref())
            .filter(|cluster| !cluster.is_empty())
    }

    /// Drop tombstones and empty clusters, preserving relative order.
    pub fn compact(&mut self) {
        self.slots
            .retain(|slot| slot.as_ref().is_some_and(|cluster| !cluster.is_empty()));
    }

    /// Map each vertex to the index of its live cluster.
    ///
    /// Assumes the partition covers vertex ids `0..vertex_count()` exactly
    /// once, which holds for every partition this crate produces.
    pub fn membership(&self) -> Vec<usize> {
        let mut membership = vec![0; self.vertex_count()];
        for (index, cluster) in self.clusters().enumerate() {
            for &vertex in cluster {
                membership[vertex] = index;
            }
        }
        membership
    }

    /// Intersect with another partition over the same vertex set.
    ///
    /// Two vertices share a cluster in the result iff they share a cluster in
    /// `self` and in `other`. Result clusters are emitted in `self`-driven
    /// order: each cluster of `self` is swept front to back, and every still
    /// unassigned vertex seeds a new cluster that absorbs the unassigned
    /// remainder of the sweep lying in the same `other`-cluster.
    pub fn intersect(&self, other: &Partition) -> Partition {
        let other_membership = other.membership();
        let mut assigned = vec![false; self.vertex_count()];
        let mut result = Partition::new();

        for cluster in self.clusters() {
            for (position, &vertex) in cluster.iter().enumerate() {
                if assigned[vertex] {
                    continue;
                }
                assigned[vertex] = true;
                let mut group = vec![vertex];
                for &other_vertex in &cluster[position + 1..] {
                    if !assigned[other_vertex]
                        && other_membership[other_vertex] == other_membership[vertex]
                    {
                        assigned[other_vertex] = true;
                        group.push(other_vertex);
                    }
                }
                result.push(group);
            }
        }

        result
    }

    /// Consume the partition and return the clusters as plain vectors.
    pub fn into_clusters(mut self) -> Vec<Vec<usize>> {
        self.compact();
        self.slots.into_iter().flatten().collect()
    }
}
