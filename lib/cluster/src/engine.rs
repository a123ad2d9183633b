//! Clustering entry point

use crate::assignment::ClusterAssignment;
use crate::distance::DistanceMatrix;
use crate::linkage::Linkage;
use genrematch_core::{Error, Result};
use genrematch_similarity::SimilarityMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default cut height for flat clusters
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Users merging at or below this Ward height share a cluster
    pub distance_threshold: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
        }
    }
}

impl ClusteringConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "distance_threshold must be a non-negative number, got {}",
                self.distance_threshold
            )));
        }
        Ok(())
    }
}

/// Output of one clustering run
#[derive(Debug, Clone, Serialize)]
pub struct Clustering {
    pub linkage: Linkage,
    pub assignment: ClusterAssignment,
}

/// Ward clustering over a similarity matrix
#[derive(Debug, Clone, Default)]
pub struct ClusteringEngine {
    config: ClusteringConfig,
}

impl ClusteringEngine {
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    pub fn with_threshold(distance_threshold: f64) -> Self {
        Self::new(ClusteringConfig { distance_threshold })
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Build the linkage for `matrix` and cut it at the configured threshold
    ///
    /// Fails with [`Error::InsufficientData`] for fewer than 2 users.
    pub fn cluster(&self, matrix: &SimilarityMatrix) -> Result<Clustering> {
        self.config.validate()?;
        let n = matrix.size();
        if n < 2 {
            return Err(Error::InsufficientData { users: n });
        }

        let distances = DistanceMatrix::from_similarity(matrix);
        let condensed = distances.condensed();
        debug!(users = n, pairs = condensed.len(), "clustering");

        let linkage = Linkage::ward(&condensed, n)?;
        let assignment = ClusterAssignment::cut(&linkage, self.config.distance_threshold);

        info!(
            "Formed {} clusters from {} users at threshold {}",
            assignment.num_clusters(),
            n,
            self.config.distance_threshold
        );

        Ok(Clustering {
            linkage,
            assignment,
        })
    }
}
