//! Ward agglomerative linkage
//!
//! Uses the nearest-neighbour chain algorithm over a condensed distance
//! matrix. Ward's criterion is reducible, so merging reciprocal nearest
//! neighbours as the chain finds them yields the same hierarchy as always
//! merging the globally closest pair, in O(n²) time.
//!
//! Node numbering follows the usual dendrogram convention: leaves are
//! `0..n`, and the cluster created by step `k` (in height order) is `n + k`.

use crate::distance::condensed_index;
use genrematch_core::{Error, Result};
use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::{debug, trace};

/// One merge of two clusters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MergeStep {
    /// Smaller node id of the pair
    pub left: usize,
    /// Larger node id of the pair
    pub right: usize,
    /// Ward distance at which the pair merged
    pub height: f64,
    /// Number of leaves under the new node
    pub size: usize,
}

/// Full merge history, `n - 1` steps ordered by height
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Linkage {
    leaves: usize,
    steps: Vec<MergeStep>,
}

impl Linkage {
    /// Run Ward linkage on a condensed matrix of `n` points
    pub fn ward(condensed: &[f64], n: usize) -> Result<Self> {
        if n < 2 {
            return Err(Error::InsufficientData { users: n });
        }
        let expected = n * (n - 1) / 2;
        if condensed.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: condensed.len(),
            });
        }

        let mut dist = condensed.to_vec();
        let mut size = vec![1usize; n];
        let mut active = vec![true; n];
        let mut chain: Vec<usize> = Vec::with_capacity(n);
        let mut merges: Vec<(usize, usize, f64)> = Vec::with_capacity(n - 1);

        for _ in 0..n - 1 {
            if chain.is_empty() {
                // there are at least two active slots left
                let Some(first) = active.iter().position(|a| *a) else {
                    break;
                };
                chain.push(first);
            }

            // Grow the chain until its tail is a reciprocal nearest pair
            let (x, y, height) = loop {
                let x = chain[chain.len() - 1];
                let prev = chain.len().checked_sub(2).map(|k| chain[k]);

                // Prefer the previous element on ties so the chain terminates
                let (mut nearest, mut best) = match prev {
                    Some(p) => (p, dist[condensed_index(n, x, p)]),
                    None => (usize::MAX, f64::INFINITY),
                };
                for i in (0..n).filter(|&i| active[i] && i != x) {
                    let d = dist[condensed_index(n, x, i)];
                    if d < best {
                        best = d;
                        nearest = i;
                    }
                }

                if Some(nearest) == prev {
                    chain.truncate(chain.len() - 2);
                    break (x, nearest, best);
                }
                chain.push(nearest);
            };

            let (x, y) = if x < y { (x, y) } else { (y, x) };
            trace!(x, y, height, "ward merge");
            merges.push((x, y, height));

            // The merged cluster lives on in slot y
            let (nx, ny) = (size[x] as f64, size[y] as f64);
            let dxy = dist[condensed_index(n, x, y)];
            active[x] = false;
            size[y] += size[x];
            for i in (0..n).filter(|&i| active[i] && i != y) {
                let ni = size[i] as f64;
                let dix = dist[condensed_index(n, i, x)];
                let diy = dist[condensed_index(n, i, y)];
                let merged = ((ni + nx) * dix * dix + (ni + ny) * diy * diy - ni * dxy * dxy)
                    / (ni + nx + ny);
                dist[condensed_index(n, i, y)] = merged.max(0.0).sqrt();
            }
        }

        merges.sort_by_key(|m| OrderedFloat(m.2));
        let steps = relabel(&merges, n);
        debug!(leaves = n, steps = steps.len(), "ward linkage complete");

        Ok(Self { leaves: n, steps })
    }

    /// Number of original points
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    pub fn steps(&self) -> &[MergeStep] {
        &self.steps
    }

    /// Node id of the root
    pub fn root(&self) -> usize {
        self.leaves + self.steps.len() - 1
    }

    /// Leaves in dendrogram order, left subtree first
    pub fn leaf_order(&self) -> Vec<usize> {
        let n = self.leaves;
        let mut order = Vec::with_capacity(n);
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if node < n {
                order.push(node);
            } else {
                let step = &self.steps[node - n];
                stack.push(step.right);
                stack.push(step.left);
            }
        }
        order
    }
}

/// Union-find over node ids; every union creates a fresh parent node
struct LinkageUnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    next: usize,
}

impl LinkageUnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..2 * n - 1).collect(),
            size: (0..2 * n - 1).map(|i| if i < n { 1 } else { 0 }).collect(),
            next: n,
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[x] != root {
            let up = self.parent[x];
            self.parent[x] = root;
            x = up;
        }
        root
    }

    fn merge(&mut self, x: usize, y: usize) -> usize {
        let node = self.next;
        self.parent[x] = node;
        self.parent[y] = node;
        self.size[node] = self.size[x] + self.size[y];
        self.next += 1;
        self.size[node]
    }
}

/// Turn slot-based merges into node ids
fn relabel(merges: &[(usize, usize, f64)], n: usize) -> Vec<MergeStep> {
    let mut uf = LinkageUnionFind::new(n);
    merges
        .iter()
        .map(|&(x, y, height)| {
            let (rx, ry) = (uf.find(x), uf.find(y));
            let (left, right) = if rx < ry { (rx, ry) } else { (ry, rx) };
            let size = uf.merge(rx, ry);
            MergeStep {
                left,
                right,
                height,
                size,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // points on a line at 0, 1, 3 and 6
    fn line() -> Vec<f64> {
        vec![1.0, 3.0, 6.0, 2.0, 5.0, 3.0]
    }

    #[test]
    fn test_ward_steps() {
        let linkage = Linkage::ward(&line(), 4).unwrap();
        let steps = linkage.steps();
        assert_eq!(steps.len(), 3);

        assert_eq!((steps[0].left, steps[0].right, steps[0].size), (0, 1, 2));
        assert!((steps[0].height - 1.0).abs() < 1e-12);

        assert_eq!((steps[1].left, steps[1].right, steps[1].size), (2, 4, 3));
        assert!((steps[1].height - (25.0f64 / 3.0).sqrt()).abs() < 1e-12);

        assert_eq!((steps[2].left, steps[2].right, steps[2].size), (3, 5, 4));
        assert!((steps[2].height - (98.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_heights_monotonic() {
        let n = 6;
        let mut condensed = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                condensed.push(((i * 7 + j * 3) % 5) as f64 / 5.0 + 0.1);
            }
        }
        let linkage = Linkage::ward(&condensed, n).unwrap();
        assert_eq!(linkage.steps().len(), n - 1);
        assert!(linkage.steps().windows(2).all(|w| w[0].height <= w[1].height));
        assert_eq!(linkage.steps().last().unwrap().size, n);
    }

    #[test]
    fn test_leaf_order() {
        let linkage = Linkage::ward(&line(), 4).unwrap();
        assert_eq!(linkage.root(), 6);
        assert_eq!(linkage.leaf_order(), vec![3, 2, 0, 1]);
    }

    #[test]
    fn test_two_points() {
        let linkage = Linkage::ward(&[0.4], 2).unwrap();
        assert_eq!(linkage.steps().len(), 1);
        assert_eq!(linkage.steps()[0].height, 0.4);
        assert_eq!(linkage.leaf_order(), vec![0, 1]);
    }

    #[test]
    fn test_insufficient_points() {
        assert!(matches!(
            Linkage::ward(&[], 1),
            Err(Error::InsufficientData { users: 1 })
        ));
        assert!(matches!(
            Linkage::ward(&[], 0),
            Err(Error::InsufficientData { users: 0 })
        ));
    }

    #[test]
    fn test_condensed_length_checked() {
        assert!(matches!(
            Linkage::ward(&[1.0, 2.0], 3),
            Err(Error::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }
}
