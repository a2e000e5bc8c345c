//! Confidence Breakdown
//!
//! # Per-trait reliability
//! From the population variance of a trait's contribution impacts:
//! - variance < 10: 0.9
//! - variance < 20: 0.7
//! - otherwise: 0.5
//!
//! # Global factors
//! - **responseQuality** = time distribution × answer diversity, where time
//!   distribution is the share of timed answers between the fast and slow
//!   limits (1.0 when no answer is timed) and answer diversity is
//!   distinct rounded answers / min(n, 5)
//! - **answerConsistency** = 0.9 per trait whose impact variance is ≥ 20
//!
//! # Overall
//! `0.7 × mean(trait confidence × reliability) + 0.3 × mean(factor scores)`,
//! or 0.0 when nothing was recorded.

use super::{TraitContribution, TraitImpactAggregate};
use crate::models::InsightParameters;
use crate::types::{mean, population_variance};
use psyscore_common::{Trait, TraitMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const HIGH_VARIANCE: f64 = 20.0;

/// Reliability of one trait's score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitReliability {
    #[serde(rename = "trait")]
    pub trait_kind: Trait,
    /// Average answer confidence for the trait
    pub confidence: f64,
    pub reliability: f64,
    pub impact_variance: f64,
    pub contribution_count: usize,
}

/// A global confidence factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceFactor {
    pub name: String,
    pub score: f64,
    pub description: String,
}

/// Full confidence derivation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceBreakdown {
    /// Traits with at least one contribution, in canonical order
    pub traits: Vec<TraitReliability>,
    pub factors: Vec<ConfidenceFactor>,
    pub overall: f64,
}

impl ConfidenceBreakdown {
    pub fn for_trait(&self, t: Trait) -> Option<&TraitReliability> {
        self.traits.iter().find(|r| r.trait_kind == t)
    }

    pub fn factor(&self, name: &str) -> Option<&ConfidenceFactor> {
        self.factors.iter().find(|f| f.name == name)
    }
}

/// Reliability tier for a contribution-impact variance
pub fn reliability_from_variance(variance: f64) -> f64 {
    if variance < 10.0 {
        0.9
    } else if variance < HIGH_VARIANCE {
        0.7
    } else {
        0.5
    }
}

pub(crate) fn compute_breakdown(
    aggregates: &TraitMap<TraitImpactAggregate>,
    contributions: &[TraitContribution],
    params: &InsightParameters,
) -> ConfidenceBreakdown {
    if contributions.is_empty() {
        return ConfidenceBreakdown::default();
    }

    let traits: Vec<TraitReliability> = aggregates
        .iter()
        .filter(|(_, agg)| !agg.contributions.is_empty())
        .map(|(t, agg)| {
            let impact_variance = population_variance(&agg.impacts());
            TraitReliability {
                trait_kind: t,
                confidence: agg.average_confidence,
                reliability: reliability_from_variance(impact_variance),
                impact_variance,
                contribution_count: agg.contributions.len(),
            }
        })
        .collect();

    let time_distribution = time_distribution(contributions, params);
    let diversity = answer_diversity(contributions);
    let high_variance = traits
        .iter()
        .filter(|r| r.impact_variance >= HIGH_VARIANCE)
        .count();

    let factors = vec![
        ConfidenceFactor {
            name: "responseQuality".to_string(),
            score: time_distribution * diversity,
            description: format!(
                "{:.0}% of answers given at a considered pace; answer diversity {:.2}",
                time_distribution * 100.0,
                diversity
            ),
        },
        ConfidenceFactor {
            name: "answerConsistency".to_string(),
            score: 0.9_f64.powi(high_variance as i32),
            description: if high_variance == 0 {
                "Answers within each trait point the same way".to_string()
            } else {
                format!("{} trait(s) received mixed signals", high_variance)
            },
        },
    ];

    let trait_term = mean(
        &traits
            .iter()
            .map(|r| r.confidence * r.reliability)
            .collect::<Vec<_>>(),
    );
    let factor_term = mean(&factors.iter().map(|f| f.score).collect::<Vec<_>>());

    ConfidenceBreakdown {
        traits,
        factors,
        overall: (0.7 * trait_term + 0.3 * factor_term).clamp(0.0, 1.0),
    }
}

fn time_distribution(contributions: &[TraitContribution], params: &InsightParameters) -> f64 {
    let timed: Vec<u64> = contributions.iter().filter_map(|c| c.response_time).collect();
    if timed.is_empty() {
        return 1.0;
    }
    let considered = timed
        .iter()
        .filter(|&&ms| (params.fast_response_ms..=params.slow_response_ms).contains(&ms))
        .count();
    considered as f64 / timed.len() as f64
}

fn answer_diversity(contributions: &[TraitContribution]) -> f64 {
    let answers: Vec<f64> = contributions
        .iter()
        .filter_map(|c| c.answer)
        .filter(|v| v.is_finite())
        .collect();
    if answers.is_empty() {
        return 1.0;
    }
    let distinct: BTreeSet<i64> = answers.iter().map(|v| v.round() as i64).collect();
    (distinct.len() as f64 / answers.len().min(5) as f64).min(1.0)
}
