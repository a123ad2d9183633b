//! # genrematch Core
//!
//! Core library for genrematch.
//!
//! This crate provides the data model shared by the similarity, clustering and
//! recommendation crates:
//!
//! - [`TextNormalizer`] - Canonicalizes free-text genre labels
//! - [`OntologyStore`] - Direct and sibling relations between categories
//! - [`UserPreferences`] - Per-user normalized category sets, loaded from CSV
//!
//! ## Example
//!
//! ```rust
//! use genrematch_core::{LoadOptions, TextNormalizer, UserPreferences};
//!
//! let normalizer = TextNormalizer::spanish();
//! assert_eq!(normalizer.normalize("Ciencia Ficción"), "ciencia_ficcion");
//!
//! let (prefs, report) = UserPreferences::from_rows(
//!     vec![vec!["alice", "comedia", "drama"], vec!["bob", "Horror"]],
//!     &normalizer,
//!     &LoadOptions::default(),
//! );
//! assert_eq!(report.users_loaded, 2);
//! assert!(prefs.get("bob").unwrap().contains("terror"));
//! ```

use std::collections::BTreeSet;

pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod ontology;
pub mod preferences;

/// A canonical category token: lower-case, accent-free, whitespace-collapsed
pub type Category = String;

/// A user's categories; ordered so derived outputs are deterministic
pub type CategorySet = BTreeSet<Category>;

pub use error::{Error, Result};
pub use normalize::{clean, Resolution, TextNormalizer};
pub use ontology::{OntologySource, OntologyStore};
pub use preferences::{LoadOptions, LoadReport, SkippedRow, UserPreferences};
