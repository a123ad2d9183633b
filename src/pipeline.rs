//! End-to-end analysis run
//!
//! load → similarity matrix → clustering → recommendations, producing one
//! serializable report. Every run starts from scratch; nothing is cached
//! between runs.

use crate::config::AppConfig;
use genrematch_cluster::{Clustering, ClusteringEngine, MergeStep};
use genrematch_core::{
    Category, CategorySet, Error, LoadReport, OntologySource, OntologyStore, Result,
    TextNormalizer, UserPreferences,
};
use genrematch_recommend::{Recommendation, Recommender, Suggestion};
use genrematch_similarity::{
    pairs_above, top_pairs, CategoryMatrix, MatrixStats, PairScore, SimilarityEngine,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// A user and their normalized categories
#[derive(Debug, Clone, Serialize)]
pub struct UserEntry {
    pub user: String,
    pub categories: CategorySet,
}

/// Flat clusters plus the tree they were cut from
#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    pub threshold: f64,
    /// Cluster id per user, aligned with `users`
    pub labels: Vec<usize>,
    pub sizes: BTreeMap<usize, usize>,
    pub steps: Vec<MergeStep>,
    /// User indices in dendrogram order
    pub leaf_order: Vec<usize>,
}

impl ClusterReport {
    fn new(clustering: &Clustering, threshold: f64) -> Self {
        Self {
            threshold,
            labels: clustering.assignment.labels().to_vec(),
            sizes: clustering.assignment.cluster_sizes(),
            steps: clustering.linkage.steps().to_vec(),
            leaf_order: clustering.linkage.leaf_order(),
        }
    }
}

/// Everything one run produces, in presentation-ready form
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub ontology: OntologySource,
    pub load: LoadReport,
    pub users: Vec<UserEntry>,
    /// Dense similarity rows, indexed like `users`
    pub matrix: Vec<Vec<f64>>,
    pub stats: MatrixStats,
    pub top_pairs: Vec<PairScore>,
    /// Relation scores between every category any user listed
    pub category_matrix: CategoryMatrix,
    /// Minimum similarity of a `similarity_graph` edge
    pub graph_threshold: f64,
    /// User pairs at or above `graph_threshold`, in user order
    pub similarity_graph: Vec<PairScore>,
    /// `None` when there were too few users to cluster
    pub clusters: Option<ClusterReport>,
    pub popularity: Vec<(Category, usize)>,
    pub recommendations: Vec<Recommendation>,
    pub suggestions: Vec<Suggestion>,
}

impl AnalysisReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One configured analysis
///
/// Owns the ontology and normalizer; every run borrows them immutably.
pub struct Analysis {
    config: AppConfig,
    ontology: OntologyStore,
    normalizer: TextNormalizer,
}

impl Analysis {
    /// Validate `config` and load the ontology it names
    ///
    /// An unreadable ontology file falls back to the built-in table.
    pub fn new(mut config: AppConfig) -> Result<Self> {
        config.validate()?;
        let ontology = match &config.ontology_path {
            Some(path) => OntologyStore::load_or_builtin(path),
            None => OntologyStore::builtin(),
        };
        Ok(Self {
            config,
            ontology,
            normalizer: TextNormalizer::spanish(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn ontology(&self) -> &OntologyStore {
        &self.ontology
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Analyze a CSV file
    pub fn run_path<P: AsRef<Path>>(&self, input: P, targets: &[String]) -> Result<AnalysisReport> {
        let (prefs, load) = UserPreferences::load_csv(input, &self.normalizer, &self.config.load)?;
        self.run(&prefs, load, targets)
    }

    /// Analyze CSV from any reader
    pub fn run_reader<R: io::Read>(&self, reader: R, targets: &[String]) -> Result<AnalysisReport> {
        let (prefs, load) =
            UserPreferences::from_reader(reader, &self.normalizer, &self.config.load)?;
        self.run(&prefs, load, targets)
    }

    /// Analyze loaded preferences
    ///
    /// Recommendations are built for `targets`, or for every user when
    /// `targets` is empty. An unknown target fails the run.
    pub fn run(
        &self,
        prefs: &UserPreferences,
        load: LoadReport,
        targets: &[String],
    ) -> Result<AnalysisReport> {
        let engine =
            SimilarityEngine::new(&self.ontology, &self.normalizer, self.config.similarity);
        let matrix = engine.build_matrix(prefs);
        let categories = prefs.all_categories();
        let stats = MatrixStats::compute(&matrix, categories.len());
        let category_matrix = engine.category_matrix(&categories);
        let graph_threshold = self.config.report.graph_threshold;
        let similarity_graph = pairs_above(&matrix, graph_threshold);

        let threshold = self.config.clustering.distance_threshold;
        let clustering = match ClusteringEngine::new(self.config.clustering).cluster(&matrix) {
            Ok(clustering) => Some(clustering),
            Err(Error::InsufficientData { users }) => {
                warn!("Skipping clustering: {} user(s) loaded, at least 2 needed", users);
                None
            }
            Err(e) => return Err(e),
        };
        let assignment = clustering.as_ref().map(|c| &c.assignment);

        let recommender = Recommender::new(self.config.recommend);
        let targets: Vec<&str> = if targets.is_empty() {
            prefs.users().iter().map(String::as_str).collect()
        } else {
            targets.iter().map(String::as_str).collect()
        };
        let recommendations = targets
            .into_iter()
            .map(|user| recommender.recommend(&matrix, prefs, assignment, user))
            .collect::<Result<Vec<_>>>()?;
        let suggestions = recommender.suggest_all(&matrix, prefs)?;

        info!(
            "Analysis complete: {} users, {} graph edges, {} recommendations, {} suggestions",
            prefs.len(),
            similarity_graph.len(),
            recommendations.len(),
            suggestions.len()
        );

        Ok(AnalysisReport {
            ontology: self.ontology.source().clone(),
            load,
            users: prefs
                .iter()
                .map(|(user, categories)| UserEntry {
                    user: user.to_string(),
                    categories: categories.clone(),
                })
                .collect(),
            stats,
            top_pairs: top_pairs(&matrix, self.config.report.top_pairs),
            category_matrix,
            graph_threshold,
            similarity_graph,
            matrix: matrix.to_rows(),
            clusters: clustering.as_ref().map(|c| ClusterReport::new(c, threshold)),
            popularity: prefs.category_popularity(),
            recommendations,
            suggestions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genrematch_core::LoadOptions;

    fn prefs(analysis: &Analysis, rows: Vec<Vec<&str>>) -> (UserPreferences, LoadReport) {
        UserPreferences::from_rows(rows, analysis.normalizer(), &LoadOptions::default())
    }

    #[test]
    fn test_run_alice_bob_carol() {
        let analysis = Analysis::new(AppConfig::default()).unwrap();
        let (p, load) = prefs(
            &analysis,
            vec![
                vec!["alice", "comedia", "drama"],
                vec!["bob", "comedia", "drama"],
                vec!["carol", "terror"],
            ],
        );
        let report = analysis.run(&p, load, &["alice".to_string()]).unwrap();

        assert_eq!(report.matrix[0][1], 1.0);
        assert_eq!(report.matrix[0][2], 0.0);
        let clusters = report.clusters.unwrap();
        assert_eq!(clusters.labels[0], clusters.labels[1]);
        assert_ne!(clusters.labels[0], clusters.labels[2]);

        assert_eq!(report.recommendations.len(), 1);
        let rec = &report.recommendations[0];
        assert_eq!(rec.ranked[0].user, "bob");
        assert_eq!(rec.cluster.as_ref().unwrap().members, vec!["bob".to_string()]);
        assert_eq!(report.ontology, OntologySource::BuiltIn);

        assert_eq!(report.category_matrix.categories, vec!["comedia", "drama", "terror"]);
        assert_eq!(report.category_matrix.get(0, 0), 1.0);
        assert_eq!(report.graph_threshold, 0.3);
        assert_eq!(report.similarity_graph.len(), 1);
        assert_eq!(report.similarity_graph[0].a, "alice");
        assert_eq!(report.similarity_graph[0].b, "bob");
    }

    #[test]
    fn test_graph_threshold_from_config() {
        let mut config = AppConfig::default();
        config.report.graph_threshold = 0.0;
        let analysis = Analysis::new(config).unwrap();
        let (p, load) = prefs(
            &analysis,
            vec![vec!["a", "drama"], vec!["b", "terror"], vec!["c", "gore"]],
        );
        let report = analysis.run(&p, load, &[]).unwrap();

        // every pair qualifies, unrelated ones included
        assert_eq!(report.similarity_graph.len(), 3);
        let gore = report.category_matrix.index_of("gore").unwrap();
        let terror = report.category_matrix.index_of("terror").unwrap();
        assert_eq!(report.category_matrix.get(gore, terror), 0.8);
    }

    #[test]
    fn test_single_user_has_no_clusters() {
        let analysis = Analysis::new(AppConfig::default()).unwrap();
        let (p, load) = prefs(&analysis, vec![vec!["solo", "drama"]]);
        let report = analysis.run(&p, load, &[]).unwrap();

        assert!(report.clusters.is_none());
        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].ranked.is_empty());
        assert!(report.recommendations[0].cluster.is_none());
        assert_eq!(report.stats.pairs, 0);
    }

    #[test]
    fn test_unknown_target_fails() {
        let analysis = Analysis::new(AppConfig::default()).unwrap();
        let (p, load) = prefs(&analysis, vec![vec!["a", "drama"], vec!["b", "terror"]]);
        assert!(matches!(
            analysis.run(&p, load, &["zed".to_string()]),
            Err(Error::UnknownUser(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AppConfig::default();
        config.recommend.top_k = 0;
        assert!(matches!(Analysis::new(config), Err(Error::InvalidConfig(_))));
    }
}
