//! Recommendation output types
//!
//! Plain data for presentation layers; every type serializes to JSON.

use genrematch_core::{Category, CategorySet};
use serde::Serialize;

/// Another user and their similarity to the target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedUser {
    pub user: String,
    pub score: f64,
}

/// A top-ranked neighbour with the categories behind the match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub user: String,
    pub score: f64,
    /// Categories both users like
    pub shared: CategorySet,
    /// Categories the neighbour likes and the target does not list
    pub might_like: CategorySet,
}

/// Other members of the target's cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterPeers {
    pub cluster_id: usize,
    /// Displayed members, in population order
    pub members: Vec<String>,
    /// Members left out of `members` by the display limit
    pub overflow: usize,
}

impl ClusterPeers {
    /// All peers, shown and hidden
    pub fn total(&self) -> usize {
        self.members.len() + self.overflow
    }
}

/// Everything known about one user's neighbourhood
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub user: String,
    pub categories: CategorySet,
    /// Every other user, most similar first
    pub ranked: Vec<RankedUser>,
    /// Top-K slice of `ranked` with category detail
    pub neighbors: Vec<Neighbor>,
    /// `None` when no clustering is available
    pub cluster: Option<ClusterPeers>,
}

/// Categories to try, taken from a user's single best match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub user: String,
    pub matched_user: String,
    pub score: f64,
    pub categories: Vec<Category>,
}
