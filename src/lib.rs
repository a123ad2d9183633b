//! # genrematch
//!
//! Ontology-aware preference similarity, hierarchical clustering and
//! nearest-neighbor recommendations.
//!
//! Users list free-text genre labels. genrematch normalizes the labels to
//! canonical categories, scores every pair of users with a blend of set
//! overlap and ontology relatedness, groups users with Ward linkage, and
//! ranks each user's nearest neighbours.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! genrematch --write-sample users.csv
//! genrematch --input users.csv --user usuario1 --output report.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use genrematch::prelude::*;
//!
//! let analysis = Analysis::new(AppConfig::default()).unwrap();
//! let csv = "alice,comedia,drama\nbob,comedia,drama\ncarol,terror\n";
//! let report = analysis.run_reader(csv.as_bytes(), &["alice".to_string()]).unwrap();
//!
//! assert_eq!(report.matrix[0][1], 1.0);
//! assert_eq!(report.recommendations[0].ranked[0].user, "bob");
//! ```
//!
//! ## Crate Structure
//!
//! - [`genrematch-core`](genrematch_core) - Normalization, ontology, preference loading
//! - [`genrematch-similarity`](genrematch_similarity) - Similarity metric and matrix
//! - [`genrematch-cluster`](genrematch_cluster) - Ward linkage and flat clusters
//! - [`genrematch-recommend`](genrematch_recommend) - Neighbour queries and suggestions

pub mod config;
pub mod pipeline;
pub mod sample;

pub use config::{AppConfig, ReportConfig};
pub use pipeline::{Analysis, AnalysisReport, ClusterReport, UserEntry};

// Re-export core types
pub use genrematch_core::{
    Category, CategorySet, Error, LoadOptions, LoadReport, OntologySource, OntologyStore,
    Result, TextNormalizer, UserPreferences,
};

// Re-export engines
pub use genrematch_cluster::{
    ClusterAssignment, Clustering, ClusteringConfig, ClusteringEngine, Linkage,
};
pub use genrematch_recommend::{RecommendConfig, Recommendation, Recommender, Suggestion};
pub use genrematch_similarity::{
    jaccard, pairs_above, CategoryMatrix, MatrixStats, PairScore, Preset, SimilarityConfig,
    SimilarityEngine, SimilarityMatrix,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Analysis, AnalysisReport, AppConfig,
        CategorySet, Error, Result,
        OntologyStore, TextNormalizer, UserPreferences, LoadOptions,
        SimilarityConfig, SimilarityEngine, SimilarityMatrix, Preset,
        ClusteringEngine, ClusterAssignment,
        Recommender, Recommendation,
    };
}
