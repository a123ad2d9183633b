//! # genrematch Similarity
//!
//! Ontology-aware similarity between user preference sets.
//!
//! The score of two category sets blends plain set overlap (Jaccard) with a
//! semantic score averaged over every category pair, where each pair earns
//! credit for being identical, directly related in the ontology, listed under
//! a common category, or sharing a stem.
//!
//! ## Example
//!
//! ```rust
//! use genrematch_core::{CategorySet, OntologyStore, TextNormalizer};
//! use genrematch_similarity::{jaccard, SimilarityConfig, SimilarityEngine};
//!
//! let ontology = OntologyStore::builtin();
//! let normalizer = TextNormalizer::spanish();
//! let engine = SimilarityEngine::new(&ontology, &normalizer, SimilarityConfig::default());
//!
//! let a: CategorySet = ["terror".to_string()].into_iter().collect();
//! let b: CategorySet = ["gore".to_string()].into_iter().collect();
//!
//! assert_eq!(jaccard(&a, &b), 0.0);
//! // 0.6 * 0.0 + 0.4 * 0.8
//! assert!((engine.enhanced_similarity(&a, &b) - 0.32).abs() < 1e-9);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Preferences │────>│   Engine     │────>│   Matrix     │
//! │  (sets)     │     │ (pair score) │     │  (N x N)     │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!                            │                    │
//!                     ┌──────────────┐     ┌──────────────┐
//!                     │  Breakdown   │     │    Stats     │
//!                     │  (explain)   │     │ (summary)    │
//!                     └──────────────┘     └──────────────┘
//! ```

pub mod config;
pub mod matrix;
pub mod metric;
pub mod stats;

// Re-export main types for convenience
pub use config::{BlendWeights, Preset, RelationScores, SimilarityConfig, WeightError};
pub use matrix::{CategoryMatrix, SimilarityMatrix};
pub use metric::{jaccard, Relation, RelationCounts, SimilarityBreakdown, SimilarityEngine};
pub use stats::{pairs_above, top_pairs, MatrixStats, PairScore};
