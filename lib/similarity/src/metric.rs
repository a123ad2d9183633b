//! Set-overlap and ontology-aware similarity between category sets
//!
//! All scores are in [0.0, 1.0] where 1.0 means identical preferences.

use crate::config::{RelationScores, SimilarityConfig};
use genrematch_core::{CategorySet, OntologyStore, TextNormalizer};
use serde::Serialize;

/// Jaccard index `|A ∩ B| / |A ∪ B|`
///
/// Two empty sets have similarity 0.0, not 1.0.
pub fn jaccard(a: &CategorySet, b: &CategorySet) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Strongest relation found between two categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Identical,
    Direct,
    Sibling,
    Stem,
    Unrelated,
}

/// Number of category pairs per relation kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelationCounts {
    pub identical: usize,
    pub direct: usize,
    pub sibling: usize,
    pub stem: usize,
    pub unrelated: usize,
}

impl RelationCounts {
    fn record(&mut self, relation: Relation) {
        match relation {
            Relation::Identical => self.identical += 1,
            Relation::Direct => self.direct += 1,
            Relation::Sibling => self.sibling += 1,
            Relation::Stem => self.stem += 1,
            Relation::Unrelated => self.unrelated += 1,
        }
    }

    /// Total pairs compared
    pub fn total(&self) -> usize {
        self.identical + self.direct + self.sibling + self.stem + self.unrelated
    }

    /// Accumulated semantic score
    ///
    /// Summed per kind in a fixed order, so the result does not depend on
    /// which set was iterated first.
    pub fn weighted_sum(&self, scores: &RelationScores) -> f64 {
        self.identical as f64 * scores.identical
            + self.direct as f64 * scores.direct
            + self.sibling as f64 * scores.sibling
            + self.stem as f64 * scores.stem
    }
}

/// How a similarity score was put together
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityBreakdown {
    pub jaccard: f64,
    pub semantic: f64,
    pub score: f64,
    pub relations: RelationCounts,
}

/// A category set with the stem of each member precomputed
pub(crate) struct Profile<'s> {
    categories: &'s CategorySet,
    stems: Vec<String>,
}

impl<'s> Profile<'s> {
    pub(crate) fn new(categories: &'s CategorySet, normalizer: &TextNormalizer) -> Self {
        let stems = categories.iter().map(|c| normalizer.stem(c)).collect();
        Self { categories, stems }
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.stems.iter().map(String::as_str))
    }
}

/// Ontology-weighted similarity between category sets
///
/// Borrows the ontology and normalizer for the duration of a run; the
/// configuration is copied in and never changes.
#[derive(Debug, Clone)]
pub struct SimilarityEngine<'a> {
    ontology: &'a OntologyStore,
    normalizer: &'a TextNormalizer,
    config: SimilarityConfig,
}

impl<'a> SimilarityEngine<'a> {
    pub fn new(
        ontology: &'a OntologyStore,
        normalizer: &'a TextNormalizer,
        config: SimilarityConfig,
    ) -> Self {
        Self {
            ontology,
            normalizer,
            config,
        }
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    pub fn ontology(&self) -> &OntologyStore {
        self.ontology
    }

    pub(crate) fn normalizer(&self) -> &'a TextNormalizer {
        self.normalizer
    }

    /// Relation between two single categories
    pub fn relation(&self, a: &str, b: &str) -> Relation {
        let stem_a = self.normalizer.stem(a);
        let stem_b = self.normalizer.stem(b);
        self.classify(a, &stem_a, b, &stem_b)
    }

    /// Score a single relation earns under the current configuration
    pub fn relation_score(&self, relation: Relation) -> f64 {
        let scores = &self.config.scores;
        match relation {
            Relation::Identical => scores.identical,
            Relation::Direct => scores.direct,
            Relation::Sibling => scores.sibling,
            Relation::Stem => scores.stem,
            Relation::Unrelated => 0.0,
        }
    }

    pub(crate) fn classify(&self, a: &str, stem_a: &str, b: &str, stem_b: &str) -> Relation {
        if a == b {
            Relation::Identical
        } else if self.ontology.are_related(a, b) {
            Relation::Direct
        } else if self.ontology.share_group(a, b) {
            Relation::Sibling
        } else if stem_a == stem_b {
            Relation::Stem
        } else {
            Relation::Unrelated
        }
    }

    /// Average relation score over the full cross product of `a` and `b`
    ///
    /// 0.0 when either set is empty.
    pub fn semantic_similarity(&self, a: &CategorySet, b: &CategorySet) -> f64 {
        self.explain(a, b).semantic
    }

    /// Blend of Jaccard overlap and semantic similarity
    pub fn enhanced_similarity(&self, a: &CategorySet, b: &CategorySet) -> f64 {
        self.explain(a, b).score
    }

    /// Compute the similarity along with its components
    pub fn explain(&self, a: &CategorySet, b: &CategorySet) -> SimilarityBreakdown {
        let profile_a = Profile::new(a, self.normalizer);
        let profile_b = Profile::new(b, self.normalizer);
        self.compare(&profile_a, &profile_b)
    }

    pub(crate) fn compare(&self, a: &Profile<'_>, b: &Profile<'_>) -> SimilarityBreakdown {
        let mut relations = RelationCounts::default();
        for (cat_a, stem_a) in a.iter() {
            for (cat_b, stem_b) in b.iter() {
                relations.record(self.classify(cat_a, stem_a, cat_b, stem_b));
            }
        }

        let jaccard = jaccard(a.categories, b.categories);

        let total = relations.total();
        let semantic = if total == 0 {
            0.0
        } else {
            relations.weighted_sum(&self.config.scores) / total as f64
        };

        // Identical non-empty sets are a perfect match regardless of how
        // their members relate to each other; the components stay as counted.
        let score = if !a.categories.is_empty() && a.categories == b.categories {
            1.0
        } else {
            let weights = &self.config.weights;
            (weights.basic * jaccard + weights.semantic * semantic).clamp(0.0, 1.0)
        };

        SimilarityBreakdown {
            jaccard,
            semantic,
            score,
            relations,
        }
    }
}
