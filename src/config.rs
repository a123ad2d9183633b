//! Application configuration
//!
//! Everything tunable about one analysis run, read from an optional JSON file
//! and then overridden by command-line flags. Built once at startup and passed
//! by reference into the pipeline.

use genrematch_cluster::ClusteringConfig;
use genrematch_core::{Error, LoadOptions, Result};
use genrematch_recommend::RecommendConfig;
use genrematch_similarity::{Preset, SimilarityConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub similarity: SimilarityConfig,
    pub clustering: ClusteringConfig,
    pub recommend: RecommendConfig,
    pub load: LoadOptions,
    pub report: ReportConfig,
    /// External ontology definition; the built-in table is used when unset
    /// or unreadable
    pub ontology_path: Option<PathBuf>,
}

/// What the report lists beyond the raw matrix
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Minimum similarity for a user pair to become a graph edge
    pub graph_threshold: f64,
    /// Number of most similar pairs listed
    pub top_pairs: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            graph_threshold: 0.3,
            top_pairs: 10,
        }
    }
}

impl AppConfig {
    /// Read a JSON config file; absent fields keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&data)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Replace the similarity weights with a preset
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.similarity = preset.config();
        self
    }

    /// Check every section, normalizing blend weights in place
    pub fn validate(&mut self) -> Result<()> {
        self.similarity
            .validate()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        self.clustering.validate()?;

        let rec = &self.recommend;
        if !rec.min_suggestion_similarity.is_finite() {
            return Err(Error::InvalidConfig(
                "min_suggestion_similarity must be a finite number".to_string(),
            ));
        }
        if rec.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be at least 1".to_string()));
        }
        if !self.report.graph_threshold.is_finite() {
            return Err(Error::InvalidConfig(
                "graph_threshold must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.similarity, SimilarityConfig::desktop());
        assert_eq!(config.clustering.distance_threshold, 0.7);
        assert_eq!(config.recommend.top_k, 5);
        assert_eq!(config.recommend.cluster_display_limit, 10);
        assert!(config.load.split_cells);
        assert!(config.ontology_path.is_none());
        assert_eq!(config.report.graph_threshold, 0.3);
        assert_eq!(config.report.top_pairs, 10);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"clustering": {{"distance_threshold": 0.5}}, "recommend": {{"top_k": 3}}}}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.clustering.distance_threshold, 0.5);
        assert_eq!(config.recommend.top_k, 3);
        assert_eq!(config.recommend.suggestion_limit, 5);
        assert_eq!(config.similarity, SimilarityConfig::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default().with_preset(Preset::Compact);
        config.similarity.weights.basic = 7.0;
        config.similarity.weights.semantic = 3.0;
        config.validate().unwrap();
        assert!((config.similarity.weights.basic - 0.7).abs() < 1e-12);

        let mut bad = AppConfig::default();
        bad.clustering.distance_threshold = -0.1;
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));

        let mut zero = AppConfig::default();
        zero.similarity.weights.basic = 0.0;
        zero.similarity.weights.semantic = 0.0;
        assert!(matches!(zero.validate(), Err(Error::InvalidConfig(_))));

        let mut graph = AppConfig::default();
        graph.report.graph_threshold = f64::NAN;
        assert!(matches!(graph.validate(), Err(Error::InvalidConfig(_))));
    }
}
