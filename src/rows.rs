//! Live cluster ids with O(1) removal and uniform sampling.

use rand::Rng;

use crate::partition::Partition;

/// Swap-with-last element vector paired with a reverse position index.
///
/// The element order is stable between removals, which is what makes
/// positional [`get`](ActiveRows::get) usable as exhaustive iteration when the
/// sample budget covers the whole set.
pub(crate) struct ActiveRows {
    elements: Vec<usize>,
    position: Vec<usize>,
}

const ABSENT: usize = usize::MAX;

impl ActiveRows {
    /// All ids in `0..count` live, in id order.
    pub(crate) fn full(count: usize) -> Self {
        Self {
            elements: (0..count).collect(),
            position: (0..count).collect(),
        }
    }

    /// One live id per cluster of `partition`: its anchor (first vertex),
    /// in partition order. `vertex_count` bounds the id space.
    pub(crate) fn from_partition(partition: &Partition, vertex_count: usize) -> Self {
        let mut elements = Vec::with_capacity(partition.len());
        let mut position = vec![ABSENT; vertex_count];
        for cluster in partition.clusters() {
            let anchor = cluster[0];
            position[anchor] = elements.len();
            elements.push(anchor);
        }
        Self { elements, position }
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    /// The `index`-th live id in the current order.
    pub(crate) fn get(&self, index: usize) -> usize {
        self.elements[index]
    }

    /// A uniformly random live id. One integer draw.
    pub(crate) fn sample(&self, rng: &mut impl Rng) -> usize {
        self.elements[rng.random_range(0..self.elements.len())]
    }

    /// Remove `id` by swapping the last element into its place.
    pub(crate) fn remove(&mut self, id: usize) {
        let index = self.position[id];
        debug_assert_ne!(index, ABSENT, "id {id} already removed");
        let last = self.elements.pop().expect("remove from empty row set");
        if index < self.elements.len() {
            self.elements[index] = last;
            self.position[last] = index;
        }
        self.position[id] = ABSENT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_full_then_remove() {
        let mut rows = ActiveRows::full(4);
        assert_eq!(rows.len(), 4);
        rows.remove(1);
        assert_eq!(rows.len(), 3);
        // 3 was swapped into position 1.
        assert_eq!(rows.get(0), 0);
        assert_eq!(rows.get(1), 3);
        assert_eq!(rows.get(2), 2);
        rows.remove(3);
        rows.remove(0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.get(0), 2);
    }

    #[test]
    fn test_from_partition_uses_anchors() {
        let mut partition = Partition::new();
        partition.push(vec![4, 1]);
        partition.push(vec![0, 2, 3]);
        let rows = ActiveRows::from_partition(&partition, 5);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.get(0), 4);
        assert_eq!(rows.get(1), 0);
    }

    #[test]
    fn test_sample_returns_live_ids() {
        let mut rows = ActiveRows::full(10);
        for id in [2, 4, 6, 8] {
            rows.remove(id);
        }
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let id = rows.sample(&mut rng);
            assert!(id % 2 == 1 || id == 0, "sampled removed id {id}");
        }
    }
}
