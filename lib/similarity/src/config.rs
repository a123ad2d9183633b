//! Similarity weights
//!
//! The blend between set overlap and ontology relatedness, and the score each
//! kind of category relation contributes. Both are plain data, validated once
//! and passed into the engine by value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Blend of basic (Jaccard) and semantic similarity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlendWeights {
    /// Weight of the plain Jaccard overlap
    pub basic: f64,
    /// Weight of the ontology-based semantic score
    pub semantic: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            basic: 0.6,
            semantic: 0.4,
        }
    }
}

impl BlendWeights {
    pub fn new(basic: f64, semantic: f64) -> Self {
        Self { basic, semantic }
    }

    /// Validate the weights
    /// - Rejects negative and non-finite weights
    /// - Normalizes weights to sum to 1.0 if they don't
    pub fn validate_and_normalize(&mut self) -> Result<(), WeightError> {
        for (name, weight) in [("basic", self.basic), ("semantic", self.semantic)] {
            if !weight.is_finite() {
                return Err(WeightError::NonFinite(name));
            }
            if weight < 0.0 {
                return Err(WeightError::NegativeWeight(name));
            }
        }

        let sum = self.basic + self.semantic;
        if sum <= 0.0 {
            return Err(WeightError::ZeroTotalWeight);
        }

        if (sum - 1.0).abs() > 1e-9 {
            self.basic /= sum;
            self.semantic /= sum;
        }

        Ok(())
    }
}

/// Score contributed by each kind of category pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RelationScores {
    /// Same category
    pub identical: f64,
    /// One lists the other in the ontology
    pub direct: f64,
    /// Both listed under a common category
    pub sibling: f64,
    /// Same Snowball stem
    pub stem: f64,
}

impl Default for RelationScores {
    fn default() -> Self {
        Self {
            identical: 1.0,
            direct: 0.8,
            sibling: 0.6,
            stem: 0.4,
        }
    }
}

impl RelationScores {
    /// Every score must lie in [0, 1]
    pub fn validate(&self) -> Result<(), WeightError> {
        let scores = [
            ("identical", self.identical),
            ("direct", self.direct),
            ("sibling", self.sibling),
            ("stem", self.stem),
        ];
        for (name, value) in scores {
            if !value.is_finite() {
                return Err(WeightError::NonFinite(name));
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(WeightError::ScoreOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Full similarity configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SimilarityConfig {
    pub weights: BlendWeights,
    pub scores: RelationScores,
}

impl SimilarityConfig {
    /// 60/40 blend with 0.8 / 0.6 / 0.4 relation scores
    pub fn desktop() -> Self {
        Self::default()
    }

    /// 70/30 blend with 0.7 / 0.5 relation scores and no stem credit
    pub fn compact() -> Self {
        Self {
            weights: BlendWeights::new(0.7, 0.3),
            scores: RelationScores {
                identical: 1.0,
                direct: 0.7,
                sibling: 0.5,
                stem: 0.0,
            },
        }
    }

    /// Validate scores and normalize the blend
    pub fn validate(&mut self) -> Result<(), WeightError> {
        self.weights.validate_and_normalize()?;
        self.scores.validate()
    }
}

/// Named weight presets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Desktop,
    Compact,
}

impl Preset {
    pub fn config(self) -> SimilarityConfig {
        match self {
            Preset::Desktop => SimilarityConfig::desktop(),
            Preset::Compact => SimilarityConfig::compact(),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Preset::Desktop),
            "compact" => Ok(Preset::Compact),
            other => Err(format!("unknown preset '{other}' (expected desktop or compact)")),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Desktop => write!(f, "desktop"),
            Preset::Compact => write!(f, "compact"),
        }
    }
}

/// Errors that can occur during weight validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("Weight '{0}' is negative")]
    NegativeWeight(&'static str),

    #[error("Weight '{0}' is not a finite number")]
    NonFinite(&'static str),

    #[error("Total blend weight cannot be zero")]
    ZeroTotalWeight,

    #[error("Relation score '{name}' must be in [0, 1], got {value}")]
    ScoreOutOfRange { name: &'static str, value: f64 },
}
