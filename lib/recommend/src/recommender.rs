//! Nearest-neighbour queries over a similarity matrix

use crate::result::{ClusterPeers, Neighbor, RankedUser, Recommendation, Suggestion};
use genrematch_cluster::ClusterAssignment;
use genrematch_core::{CategorySet, Error, Result, UserPreferences};
use genrematch_similarity::SimilarityMatrix;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecommendConfig {
    /// Neighbours reported with category detail
    pub top_k: usize,
    /// Cluster peers listed before the rest are counted as overflow
    pub cluster_display_limit: usize,
    /// A best match must score strictly above this to produce a suggestion
    pub min_suggestion_similarity: f64,
    /// Categories per suggestion
    pub suggestion_limit: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            cluster_display_limit: 10,
            min_suggestion_similarity: 0.1,
            suggestion_limit: 5,
        }
    }
}

/// Answers per-user queries against one analysis run
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    config: RecommendConfig,
}

impl Recommender {
    pub fn new(config: RecommendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// Rank every other user by similarity to `target`
    ///
    /// Ties keep population order. `clusters`, when given, must be aligned
    /// with the matrix.
    pub fn recommend(
        &self,
        matrix: &SimilarityMatrix,
        prefs: &UserPreferences,
        clusters: Option<&ClusterAssignment>,
        target: &str,
    ) -> Result<Recommendation> {
        check_population(matrix, prefs, clusters)?;
        let index = matrix
            .index_of(target)
            .ok_or_else(|| Error::UnknownUser(target.to_string()))?;
        let categories = categories_of(prefs, target)?;

        let ranked: Vec<RankedUser> = rank(matrix, index)
            .into_iter()
            .map(|(j, score)| RankedUser {
                user: matrix.users()[j].clone(),
                score,
            })
            .collect();

        let neighbors = ranked
            .iter()
            .take(self.config.top_k)
            .map(|r| -> Result<Neighbor> {
                let theirs = categories_of(prefs, &r.user)?;
                Ok(Neighbor {
                    user: r.user.clone(),
                    score: r.score,
                    shared: categories.intersection(theirs).cloned().collect(),
                    might_like: theirs.difference(categories).cloned().collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let cluster = clusters.and_then(|assignment| self.cluster_peers(matrix, assignment, index));

        debug!(
            user = target,
            neighbors = neighbors.len(),
            peers = cluster.as_ref().map_or(0, ClusterPeers::total),
            "recommendation ready"
        );

        Ok(Recommendation {
            user: target.to_string(),
            categories: categories.clone(),
            ranked,
            neighbors,
            cluster,
        })
    }

    fn cluster_peers(
        &self,
        matrix: &SimilarityMatrix,
        assignment: &ClusterAssignment,
        index: usize,
    ) -> Option<ClusterPeers> {
        let cluster_id = assignment.cluster_of(index)?;
        let peers: Vec<usize> = assignment
            .members(cluster_id)
            .into_iter()
            .filter(|&i| i != index)
            .collect();
        let shown = peers.len().min(self.config.cluster_display_limit);

        Some(ClusterPeers {
            cluster_id,
            members: peers[..shown]
                .iter()
                .map(|&i| matrix.users()[i].clone())
                .collect(),
            overflow: peers.len() - shown,
        })
    }

    /// One suggestion per user from their best match
    ///
    /// The best match is the most similar other user, the earliest on ties.
    /// Users whose best match is not similar enough, or who already like
    /// everything it likes, get no entry.
    pub fn suggest_all(
        &self,
        matrix: &SimilarityMatrix,
        prefs: &UserPreferences,
    ) -> Result<Vec<Suggestion>> {
        check_population(matrix, prefs, None)?;
        let users = matrix.users();
        let mut suggestions = Vec::new();

        for (i, user) in users.iter().enumerate() {
            let mut best: Option<(usize, f64)> = None;
            for (j, &score) in matrix.row(i).iter().enumerate() {
                if j != i && best.map_or(true, |(_, s)| score > s) {
                    best = Some((j, score));
                }
            }
            let Some((j, score)) = best else {
                continue;
            };
            if score <= self.config.min_suggestion_similarity {
                continue;
            }

            let mine = categories_of(prefs, user)?;
            let categories: Vec<_> = categories_of(prefs, &users[j])?
                .difference(mine)
                .take(self.config.suggestion_limit)
                .cloned()
                .collect();
            if categories.is_empty() {
                continue;
            }

            suggestions.push(Suggestion {
                user: user.clone(),
                matched_user: users[j].clone(),
                score,
                categories,
            });
        }

        info!("Generated {} suggestions for {} users", suggestions.len(), users.len());
        Ok(suggestions)
    }
}

/// Other users by descending similarity to `index`, stable on ties
fn rank(matrix: &SimilarityMatrix, index: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = matrix
        .row(index)
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(j, s)| (j, *s))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
}

fn categories_of<'p>(prefs: &'p UserPreferences, user: &str) -> Result<&'p CategorySet> {
    prefs
        .get(user)
        .ok_or_else(|| Error::UnknownUser(user.to_string()))
}

fn check_population(
    matrix: &SimilarityMatrix,
    prefs: &UserPreferences,
    clusters: Option<&ClusterAssignment>,
) -> Result<()> {
    if prefs.len() != matrix.size() {
        return Err(Error::DimensionMismatch {
            expected: matrix.size(),
            actual: prefs.len(),
        });
    }
    if let Some(assignment) = clusters {
        if assignment.len() != matrix.size() {
            return Err(Error::DimensionMismatch {
                expected: matrix.size(),
                actual: assignment.len(),
            });
        }
    }
    Ok(())
}
