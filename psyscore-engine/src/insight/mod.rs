//! Insight Tracking
//!
//! Per-answer bookkeeping of how each response moved each Big Five trait,
//! and the confidence that can be placed in the resulting scores.
//!
//! # Components
//! - **tracker** - [`InsightTracker`], the session-scoped recorder
//! - **confidence** - Per-trait reliability and global confidence factors

pub mod confidence;
pub mod tracker;

pub use confidence::{ConfidenceBreakdown, ConfidenceFactor, TraitReliability};
pub use tracker::{InsightDerivation, InsightTracker};

use psyscore_common::Trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One answer's effect on one trait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitContribution {
    pub question_id: String,
    /// Raw answer value, when one was given
    pub answer: Option<f64>,
    #[serde(rename = "trait")]
    pub trait_kind: Trait,
    /// Signed score movement (-100..100)
    pub impact: f64,
    pub weight: f64,
    /// Confidence in this answer (0.3-1.0)
    pub confidence: f64,
    pub reasoning: String,
    pub response_time: Option<u64>,
}

/// Running totals for one trait
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitImpactAggregate {
    /// Σ impact × weight
    pub total_impact: f64,
    /// Contributions in recording order
    pub contributions: Vec<TraitContribution>,
    pub average_confidence: f64,
}

impl TraitImpactAggregate {
    pub(crate) fn push(&mut self, contribution: TraitContribution) {
        self.total_impact += contribution.impact * contribution.weight;
        self.contributions.push(contribution);
        self.average_confidence = self.contributions.iter().map(|c| c.confidence).sum::<f64>()
            / self.contributions.len() as f64;
    }

    /// Impacts in recording order
    pub fn impacts(&self) -> Vec<f64> {
        self.contributions.iter().map(|c| c.impact).collect()
    }
}

/// Modifiers applied to an answer's confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerContext {
    /// Time taken to answer, ms
    pub response_time: Option<u64>,
    /// Consistency with related answers (0.0-1.0)
    pub consistency_score: Option<f64>,
    /// Careless-pattern flag raised for this answer
    pub pattern_flag: Option<String>,
    /// Contribution weight (default: 1.0)
    pub weight: f64,
}

impl Default for AnswerContext {
    fn default() -> Self {
        Self {
            response_time: None,
            consistency_score: None,
            pattern_flag: None,
            weight: 1.0,
        }
    }
}

impl AnswerContext {
    pub fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time = Some(ms);
        self
    }

    pub fn with_consistency(mut self, score: f64) -> Self {
        self.consistency_score = Some(score);
        self
    }

    pub fn with_pattern_flag(mut self, flag: impl Into<String>) -> Self {
        self.pattern_flag = Some(flag.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// How strongly a trait shapes the archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InfluenceLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl InfluenceLevel {
    /// Level for a deviation from the neutral score of 50
    pub fn from_deviation(deviation: f64) -> Self {
        let d = deviation.abs();
        if d > 30.0 {
            InfluenceLevel::VeryHigh
        } else if d > 20.0 {
            InfluenceLevel::High
        } else if d > 10.0 {
            InfluenceLevel::Moderate
        } else {
            InfluenceLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InfluenceLevel::Low => "Low",
            InfluenceLevel::Moderate => "Moderate",
            InfluenceLevel::High => "High",
            InfluenceLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for InfluenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trait's influence on the archetype assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeInfluence {
    #[serde(rename = "trait")]
    pub trait_kind: Trait,
    pub score: f64,
    /// score − 50
    pub deviation: f64,
    pub influence: InfluenceLevel,
}
