//! Pairwise user similarity matrix
//!
//! Dense N x N, symmetric, diagonal 1.0. Built fresh from a preference
//! snapshot and read-only afterwards. Construction is O(N² · k²) for k
//! categories per user, which is fine up to a few thousand users.

use crate::metric::{Profile, SimilarityEngine};
use genrematch_core::{Category, CategorySet, Error, Result, UserPreferences};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Similarity between every pair of users, indexed like the user list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    users: Vec<String>,
    // row-major, users.len()² entries
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build from explicit rows
    ///
    /// Rows must form a symmetric square matrix matching the user list, with
    /// finite values in [0, 1].
    pub fn from_rows(users: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = users.len();
        if rows.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                actual: rows.len(),
            });
        }

        let mut values = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    actual: row.len(),
                });
            }
            if let Some(v) = row.iter().find(|v| !v.is_finite() || **v < 0.0 || **v > 1.0) {
                return Err(Error::InvalidConfig(format!(
                    "similarity {v} is outside [0, 1]"
                )));
            }
            values.extend(row);
        }

        let matrix = Self { users, values };
        if !matrix.is_symmetric(SYMMETRY_TOLERANCE) {
            return Err(Error::InvalidConfig("similarity matrix is not symmetric".to_string()));
        }
        Ok(matrix)
    }

    /// Number of users (rows and columns)
    pub fn size(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// User identifiers in index order
    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn index_of(&self, user: &str) -> Option<usize> {
        self.users.iter().position(|u| u == user)
    }

    /// Similarity between users `i` and `j`
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size() + j]
    }

    /// Row of user `i`
    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.size();
        &self.values[i * n..(i + 1) * n]
    }

    /// Dense row-major copy, for presentation layers
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.size()).map(|i| self.row(i).to_vec()).collect()
    }

    /// True if `m[i][j] == m[j][i]` within `tolerance` everywhere
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.size();
        (0..n).all(|i| (i + 1..n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance))
    }
}

/// Pairwise relation scores between individual categories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMatrix {
    /// Row and column labels, sorted
    pub categories: Vec<Category>,
    pub values: Vec<Vec<f64>>,
}

impl CategoryMatrix {
    pub fn size(&self) -> usize {
        self.categories.len()
    }

    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.binary_search_by(|c| c.as_str().cmp(category)).ok()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

impl<'a> SimilarityEngine<'a> {
    /// Relation score of every pair of categories in `categories`
    ///
    /// The diagonal carries the identical score; unrelated pairs are 0.0.
    pub fn category_matrix(&self, categories: &CategorySet) -> CategoryMatrix {
        let labels: Vec<Category> = categories.iter().cloned().collect();
        let stems: Vec<String> = labels.iter().map(|c| self.normalizer().stem(c)).collect();
        let n = labels.len();

        let mut values = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i..n {
                let relation = self.classify(&labels[i], &stems[i], &labels[j], &stems[j]);
                let score = self.relation_score(relation);
                values[i][j] = score;
                values[j][i] = score;
            }
        }

        debug!(categories = n, "category matrix built");

        CategoryMatrix {
            categories: labels,
            values,
        }
    }

    /// Similarity of every user pair in the population
    ///
    /// Only the upper triangle is computed; the metric is symmetric so the
    /// lower triangle is mirrored and the diagonal is set to 1.0.
    pub fn build_matrix(&self, prefs: &UserPreferences) -> SimilarityMatrix {
        let started = Instant::now();
        let n = prefs.len();
        let normalizer = self.normalizer();

        let profiles: Vec<Profile<'_>> = prefs
            .sets()
            .iter()
            .map(|set| Profile::new(set, normalizer))
            .collect();

        let mut values = vec![0.0; n * n];
        for i in 0..n {
            values[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let score = self.compare(&profiles[i], &profiles[j]).score;
                values[i * n + j] = score;
                values[j * n + i] = score;
            }
        }

        debug!(
            users = n,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "similarity matrix built"
        );
        info!("Built {}x{} similarity matrix", n, n);

        SimilarityMatrix {
            users: prefs.users().to_vec(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimilarityConfig;
    use genrematch_core::{LoadOptions, OntologyStore, TextNormalizer};

    fn sample_prefs(normalizer: &TextNormalizer) -> UserPreferences {
        let (prefs, _) = UserPreferences::from_rows(
            vec![
                vec!["alice", "comedia", "drama"],
                vec!["bob", "comedia", "drama"],
                vec!["carol", "terror"],
                vec!["dave", "gore", "slasher", "drama"],
                vec!["erin"],
            ],
            normalizer,
            &LoadOptions::default(),
        );
        prefs
    }

    #[test]
    fn test_build_matrix_shape_and_diagonal() {
        let ontology = OntologyStore::builtin();
        let normalizer = TextNormalizer::spanish();
        let engine = SimilarityEngine::new(&ontology, &normalizer, SimilarityConfig::default());
        let prefs = sample_prefs(&normalizer);

        let matrix = engine.build_matrix(&prefs);
        assert_eq!(matrix.size(), 5);
        assert_eq!(matrix.users(), prefs.users());
        for i in 0..matrix.size() {
            assert_eq!(matrix.get(i, i), 1.0);
        }
        assert!(matrix.is_symmetric(0.0));
    }

    #[test]
    fn test_build_matrix_values() {
        let ontology = OntologyStore::builtin();
        let normalizer = TextNormalizer::spanish();
        let engine = SimilarityEngine::new(&ontology, &normalizer, SimilarityConfig::default());
        let prefs = sample_prefs(&normalizer);

        let matrix = engine.build_matrix(&prefs);
        assert_eq!(matrix.get(0, 1), 1.0);
        assert_eq!(matrix.get(0, 2), 0.0);
        assert_eq!(matrix.get(1, 2), 0.0);
        // erin has no categories: 0 to everyone else
        assert!(matrix.row(4)[..4].iter().all(|v| *v == 0.0));
        // dave relates to carol through terror's ontology entries
        assert!(matrix.get(2, 3) > 0.0);
        assert_eq!(
            matrix.get(0, 3),
            engine.enhanced_similarity(prefs.categories_at(0), prefs.categories_at(3))
        );
    }

    #[test]
    fn test_from_rows_validation() {
        let users = vec!["a".to_string(), "b".to_string()];
        let rows = vec![vec![1.0, 0.5], vec![0.5, 1.0]];
        assert!(SimilarityMatrix::from_rows(users.clone(), rows).is_ok());
        assert!(matches!(
            SimilarityMatrix::from_rows(users.clone(), vec![vec![1.0, 0.5]]),
            Err(Error::DimensionMismatch { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            SimilarityMatrix::from_rows(users, vec![vec![1.0, 1.5], vec![0.5, 1.0]]),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_rows_rejects_asymmetric() {
        let users = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let rows = vec![
            vec![1.0, 0.9, 0.2],
            vec![0.1, 1.0, 0.5],
            vec![0.2, 0.5, 1.0],
        ];
        assert!(matches!(
            SimilarityMatrix::from_rows(users.clone(), rows),
            Err(Error::InvalidConfig(_))
        ));

        // rounding noise within tolerance is accepted
        let rows = vec![
            vec![1.0, 0.3, 0.2],
            vec![0.3 + 1e-12, 1.0, 0.5],
            vec![0.2, 0.5, 1.0],
        ];
        assert!(SimilarityMatrix::from_rows(users, rows).is_ok());
    }

    #[test]
    fn test_category_matrix() {
        let ontology = OntologyStore::builtin();
        let normalizer = TextNormalizer::spanish();
        let engine = SimilarityEngine::new(&ontology, &normalizer, SimilarityConfig::default());
        let categories: CategorySet = ["terror", "gore", "comedia", "drama"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let matrix = engine.category_matrix(&categories);
        assert_eq!(matrix.size(), 4);
        assert_eq!(matrix.categories, vec!["comedia", "drama", "gore", "terror"]);
        for i in 0..matrix.size() {
            assert_eq!(matrix.get(i, i), 1.0);
            for j in 0..matrix.size() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }

        let gore = matrix.index_of("gore").unwrap();
        let terror = matrix.index_of("terror").unwrap();
        let comedia = matrix.index_of("comedia").unwrap();
        assert_eq!(matrix.get(gore, terror), 0.8);
        assert_eq!(matrix.get(comedia, terror), 0.0);
        assert_eq!(matrix.index_of("western"), None);

        assert_eq!(engine.category_matrix(&CategorySet::new()).size(), 0);
    }

    #[test]
    fn test_to_rows() {
        let users = vec!["a".to_string(), "b".to_string()];
        let rows = vec![vec![1.0, 0.25], vec![0.25, 1.0]];
        let matrix = SimilarityMatrix::from_rows(users, rows.clone()).unwrap();
        assert_eq!(matrix.to_rows(), rows);
        assert_eq!(matrix.index_of("b"), Some(1));
        assert_eq!(matrix.index_of("z"), None);
    }
}
