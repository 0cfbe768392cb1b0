//! # coregroups
//!
//! Modularity clustering for undirected graphs: randomized greedy
//! agglomeration, core-groups ensembles (CGGC), and vertex-move refinement.
//!
//! ## The Modularity Objective
//!
//! All algorithms here optimize Newman modularity
//!
//! ```text
//! Q = Σ_c (e_cc − a_c²)
//! ```
//!
//! where e_cc is the fraction of edge endpoints inside cluster c and a_c is
//! the fraction of endpoints incident to c. Q compares the edges a partition
//! captures against a degree-preserving random graph; Q > 0 means more
//! internal structure than chance.
//!
//! ## Algorithms
//!
//! ### Randomized Greedy
//!
//! Agglomerative merging, but each step only inspects a small random sample
//! of clusters and takes the best merge the sample offers. Runs are fast and
//! intentionally diverse; the merge sequence is replayed up to the point
//! where Q peaked.
//!
//! ### Core Groups (recommended)
//!
//! Several randomized-greedy runs vote: their partitions are intersected
//! into "core groups", the vertex sets every run agrees belong together, and
//! a final greedy run re-clusters from that consensus instead of from
//! singletons. Optionally the agree-and-restart cycle repeats until Q stops
//! improving. Both entry points finish with a single-vertex refinement pass.
//!
//! ## Usage
//!
//! ```rust
//! use petgraph::graph::UnGraph;
//! use coregroups::{CoreGroups, GraphClustering, modularity};
//!
//! // Two triangles bridged by one edge.
//! let mut graph = UnGraph::<(), ()>::new_undirected();
//! let nodes: Vec<_> = (0..6).map(|_| graph.add_node(())).collect();
//! for (u, v) in [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)] {
//!     graph.add_edge(nodes[u], nodes[v], ());
//! }
//!
//! let partition = CoreGroups::new().with_seed(42).cluster(&graph).unwrap();
//! assert_eq!(partition.len(), 2);
//! assert!(modularity(&graph, &partition).unwrap() > 0.3);
//! ```
//!
//! ## References
//!
//! - Ovelgönne & Geyer-Schulz (2012). "An Ensemble Learning Strategy for
//!   Graph Clustering." Graph Partitioning and Graph Clustering, AMS
//!   Contemporary Mathematics 588.
//! - Newman & Girvan (2004). "Finding and evaluating community structure in
//!   networks." Physical Review E 69, 026113.

pub mod error;

mod ensemble;
mod graph;
mod greedy;
mod joins;
mod matrix;
mod modularity;
mod partition;
mod refine;
mod rows;
mod traits;

pub use ensemble::CoreGroups;
pub use error::{Error, Result};
pub use greedy::RandomizedGreedy;
pub use modularity::modularity;
pub use partition::Partition;
pub use refine::refine_partition;
pub use traits::GraphClustering;
