//! Flat clusters cut from a linkage

use crate::linkage::Linkage;
use serde::Serialize;
use std::collections::BTreeMap;

/// Cluster id per point, aligned with the user order of the matrix
///
/// Ids start at 1 and are numbered by first appearance in point order.
/// They carry no meaning beyond grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClusterAssignment {
    labels: Vec<usize>,
}

impl ClusterAssignment {
    /// Wrap precomputed labels
    pub fn from_labels(labels: Vec<usize>) -> Self {
        Self { labels }
    }

    /// Cut the tree at `threshold`
    ///
    /// Two points share a cluster iff they are joined by merges whose
    /// heights are all `<= threshold`.
    pub fn cut(linkage: &Linkage, threshold: f64) -> Self {
        let n = linkage.leaves();
        let mut parent: Vec<Option<usize>> = vec![None; n + linkage.steps().len()];
        for (k, step) in linkage.steps().iter().enumerate() {
            if step.height <= threshold {
                parent[step.left] = Some(n + k);
                parent[step.right] = Some(n + k);
            }
        }

        let mut ids: BTreeMap<usize, usize> = BTreeMap::new();
        let labels = (0..n)
            .map(|leaf| {
                let mut node = leaf;
                while let Some(up) = parent[node] {
                    node = up;
                }
                let next = ids.len() + 1;
                *ids.entry(node).or_insert(next)
            })
            .collect();

        Self { labels }
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn cluster_of(&self, index: usize) -> Option<usize> {
        self.labels.get(index).copied()
    }

    /// Indices of the points in cluster `id`, ascending
    pub fn members(&self, id: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| **label == id)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of points per cluster id
    pub fn cluster_sizes(&self) -> BTreeMap<usize, usize> {
        let mut sizes = BTreeMap::new();
        for label in &self.labels {
            *sizes.entry(*label).or_insert(0) += 1;
        }
        sizes
    }

    pub fn num_clusters(&self) -> usize {
        self.cluster_sizes().len()
    }
}
