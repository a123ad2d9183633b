//! Distance matrices derived from similarity

use genrematch_similarity::SimilarityMatrix;
use serde::Serialize;

/// Position of pair `(i, j)`, `i != j`, in the condensed upper triangle of an
/// `n x n` matrix
///
/// Rows are laid out one after another, each holding the entries right of the
/// diagonal: `(0,1), (0,2), .., (0,n-1), (1,2), ..`.
#[inline]
pub fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i != j && i < n && j < n);
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    n * i - i * (i + 1) / 2 + (j - i - 1)
}

/// Dense `1 - similarity` matrix with an exact zero diagonal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Derive distances from similarities
    ///
    /// The diagonal is forced to 0.0 and every other entry is clamped at
    /// 0.0, so rounding in the similarity never yields a negative distance.
    pub fn from_similarity(similarity: &SimilarityMatrix) -> Self {
        let n = similarity.size();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    values[i * n + j] = (1.0 - similarity.get(i, j)).max(0.0);
                }
            }
        }
        Self { size: n, values }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    /// Upper triangle without the diagonal, row-major
    ///
    /// Holds `n * (n - 1) / 2` entries, indexed by [`condensed_index`].
    pub fn condensed(&self) -> Vec<f64> {
        let n = self.size;
        let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            out.extend_from_slice(&self.values[i * n + i + 1..(i + 1) * n]);
        }
        out
    }
}
