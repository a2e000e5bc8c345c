//! Consistency Validator
//!
//! Checks that a respondent's Likert answers hang together.
//!
//! # Consistency Checks
//! 1. **Within-trait variance**: answers to one trait's items with variance
//!    above 1.5 cost ×0.9 per trait
//! 2. **Within-trait extremes**: a trait answered with both 1 and 5 costs
//!    ×0.85 per trait
//! 3. **Cross-trait expectations**: three fixed trait pairs with a known
//!    population correlation; each violated expectation costs ×0.9
//!
//! Cross-trait checks compare each trait's mean deviation from neutral
//! (mean − 3). A positive expectation is violated when the two deviations
//! point in opposite directions and are further apart than the tolerance; a
//! negative expectation is violated when they point the same way and their
//! combined magnitude exceeds the tolerance.

use super::likert_by_trait;
use crate::models::QualityParameters;
use crate::types::{mean, population_variance, ResponseRecord, NEUTRAL_LIKERT};
use psyscore_common::Trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Expected direction of a cross-trait relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expectation {
    Positive,
    Negative,
}

/// One expected cross-trait relationship
struct CorrelationCheck {
    a: Trait,
    b: Trait,
    expectation: Expectation,
    tolerance: f64,
    label: &'static str,
}

const CORRELATION_CHECKS: [CorrelationCheck; 3] = [
    CorrelationCheck {
        a: Trait::Extraversion,
        b: Trait::Agreeableness,
        expectation: Expectation::Positive,
        tolerance: 2.0,
        label: "extraversion-agreeableness",
    },
    CorrelationCheck {
        a: Trait::Conscientiousness,
        b: Trait::Neuroticism,
        expectation: Expectation::Negative,
        tolerance: 2.0,
        label: "conscientiousness-neuroticism",
    },
    // Only a slight positive relationship, so tolerate a wider gap
    CorrelationCheck {
        a: Trait::Openness,
        b: Trait::Extraversion,
        expectation: Expectation::Positive,
        tolerance: 3.0,
        label: "openness-extraversion",
    },
];

impl CorrelationCheck {
    fn is_violated(&self, dev_a: f64, dev_b: f64) -> bool {
        match self.expectation {
            Expectation::Positive => dev_a * dev_b < 0.0 && (dev_a - dev_b).abs() > self.tolerance,
            Expectation::Negative => dev_a * dev_b > 0.0 && (dev_a + dev_b).abs() > self.tolerance,
        }
    }
}

/// Consistency analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyAnalysis {
    /// Consistency score (0.0-1.0)
    pub score: f64,
    /// Traits whose answers varied more than the variance limit
    pub high_variance_traits: Vec<Trait>,
    /// Traits answered with both scale extremes
    pub extreme_traits: Vec<Trait>,
    /// Cross-trait expectations that were violated
    pub violated_correlations: Vec<String>,
}

/// Consistency Validator
pub struct ConsistencyValidator {
    max_variance: f64,
}

impl ConsistencyValidator {
    /// Create validator with the reference variance limit (1.5)
    pub fn new() -> Self {
        Self::from_parameters(&QualityParameters::default())
    }

    pub fn from_parameters(params: &QualityParameters) -> Self {
        Self {
            max_variance: params.max_trait_variance,
        }
    }

    /// Analyze answer consistency
    ///
    /// Returns `None` when no trait has Likert data.
    pub fn analyze(&self, responses: &[ResponseRecord]) -> Option<ConsistencyAnalysis> {
        let grouped = likert_by_trait(responses);
        if grouped.iter().all(|(_, values)| values.is_empty()) {
            return None;
        }

        let mut score = 1.0_f64;
        let mut high_variance_traits = Vec::new();
        let mut extreme_traits = Vec::new();

        for (t, values) in grouped.iter() {
            if values.len() >= 2 && population_variance(values) > self.max_variance {
                score *= 0.9;
                high_variance_traits.push(t);
            }

            let has_low = values.iter().any(|v| v.round() <= 1.0);
            let has_high = values.iter().any(|v| v.round() >= 5.0);
            if has_low && has_high {
                score *= 0.85;
                extreme_traits.push(t);
            }
        }

        let mut violated_correlations = Vec::new();
        for check in &CORRELATION_CHECKS {
            let (values_a, values_b) = (&grouped[check.a], &grouped[check.b]);
            if values_a.is_empty() || values_b.is_empty() {
                continue;
            }

            let dev_a = mean(values_a) - NEUTRAL_LIKERT;
            let dev_b = mean(values_b) - NEUTRAL_LIKERT;
            if check.is_violated(dev_a, dev_b) {
                score *= 0.9;
                violated_correlations.push(check.label.to_string());
            }
        }

        debug!(
            score = score,
            high_variance = high_variance_traits.len(),
            extremes = extreme_traits.len(),
            violations = violated_correlations.len(),
            "Consistency analysis complete"
        );

        Some(ConsistencyAnalysis {
            score,
            high_variance_traits,
            extreme_traits,
            violated_correlations,
        })
    }
}

impl Default for ConsistencyValidator {
    fn default() -> Self {
        Self::new()
    }
}
