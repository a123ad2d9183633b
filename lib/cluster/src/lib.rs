//! # genrematch Cluster
//!
//! Hierarchical clustering of users from their similarity matrix.
//!
//! Similarities become distances (`1 - s`, zero diagonal), the condensed
//! distances feed Ward's minimum-variance linkage, and the dendrogram is cut
//! at a distance threshold into flat clusters.
//!
//! ## Example
//!
//! ```rust
//! use genrematch_cluster::ClusteringEngine;
//! use genrematch_similarity::SimilarityMatrix;
//!
//! let users = vec!["alice".to_string(), "bob".to_string(), "carol".to_string()];
//! let matrix = SimilarityMatrix::from_rows(
//!     users,
//!     vec![vec![1.0, 1.0, 0.0], vec![1.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]],
//! )
//! .unwrap();
//!
//! let clustering = ClusteringEngine::default().cluster(&matrix).unwrap();
//! assert_eq!(clustering.assignment.labels(), &[1, 1, 2]);
//! ```

pub mod assignment;
pub mod distance;
pub mod engine;
pub mod linkage;

pub use assignment::ClusterAssignment;
pub use distance::{condensed_index, DistanceMatrix};
pub use engine::{Clustering, ClusteringConfig, ClusteringEngine, DEFAULT_DISTANCE_THRESHOLD};
pub use linkage::{Linkage, MergeStep};
