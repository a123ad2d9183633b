//! # genrematch Recommend
//!
//! Nearest-neighbour recommendations from a user similarity matrix.
//!
//! - [`Recommender::recommend`] - ranked neighbours for one user, with shared
//!   and "might like" categories and the user's cluster peers
//! - [`Recommender::suggest_all`] - one suggestion per user from their best match

pub mod recommender;
pub mod result;

pub use recommender::{RecommendConfig, Recommender};
pub use result::{ClusterPeers, Neighbor, RankedUser, Recommendation, Suggestion};
