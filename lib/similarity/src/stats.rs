//! Summary statistics over a similarity matrix

use crate::matrix::SimilarityMatrix;
use serde::Serialize;

/// Distribution of off-diagonal similarities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixStats {
    /// Number of users
    pub users: usize,
    /// Number of distinct categories across all users
    pub categories: usize,
    /// Number of unordered user pairs
    pub pairs: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// One unordered user pair and its similarity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairScore {
    pub a: String,
    pub b: String,
    pub score: f64,
}

impl MatrixStats {
    /// Compute stats over the upper triangle of the matrix
    pub fn compute(matrix: &SimilarityMatrix, categories: usize) -> Self {
        let n = matrix.size();
        let mut scores: Vec<f64> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| matrix.get(i, j))
            .collect();

        if scores.is_empty() {
            return Self {
                users: n,
                categories,
                pairs: 0,
                mean: 0.0,
                median: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let len = scores.len();
        let mean = scores.iter().sum::<f64>() / len as f64;
        let median = if len % 2 == 0 {
            (scores[len / 2 - 1] + scores[len / 2]) / 2.0
        } else {
            scores[len / 2]
        };

        Self {
            users: n,
            categories,
            pairs: len,
            mean,
            median,
            min: scores[0],
            max: scores[len - 1],
        }
    }
}

/// The `limit` most similar user pairs, best first, ties in index order
pub fn top_pairs(matrix: &SimilarityMatrix, limit: usize) -> Vec<PairScore> {
    let n = matrix.size();
    let mut pairs: Vec<(usize, usize, f64)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .map(|(i, j)| (i, j, matrix.get(i, j)))
        .collect();

    pairs.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
    pairs.truncate(limit);

    let users = matrix.users();
    pairs
        .into_iter()
        .map(|(i, j, score)| PairScore {
            a: users[i].clone(),
            b: users[j].clone(),
            score,
        })
        .collect()
}

/// Every user pair whose similarity is at least `min`, in index order
///
/// The edge list of the similarity graph.
pub fn pairs_above(matrix: &SimilarityMatrix, min: f64) -> Vec<PairScore> {
    let n = matrix.size();
    let users = matrix.users();
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .filter(|&(i, j)| matrix.get(i, j) >= min)
        .map(|(i, j)| PairScore {
            a: users[i].clone(),
            b: users[j].clone(),
            score: matrix.get(i, j),
        })
        .collect()
}
