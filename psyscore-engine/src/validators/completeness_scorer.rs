//! Completeness Scorer
//!
//! Measures how much of the questionnaire was answered and how engaged the
//! respondent appeared while answering.
//!
//! # Completeness
//! `answered / expected`, where `expected` is the questionnaire length when
//! known and the number of delivered records otherwise. Capped at 1.0.
//!
//! # Engagement
//! - Base: 0.8
//! - Response-time variance above 3000 ms²: ×1.1 (pace varies with item difficulty)
//! - Balanced answer distribution: ×1.05 (3+ distinct values, none above 50%)
//! - Capped at 1.0

use super::likert_series;
use super::timing_scorer::TimingAnalysis;
use crate::models::QualityParameters;
use crate::types::ResponseRecord;
use std::collections::BTreeMap;
use tracing::debug;

/// Completeness Scorer
pub struct CompletenessScorer {
    base_engagement: f64,
    engaged_time_variance: f64,
}

impl CompletenessScorer {
    /// Create scorer with reference settings
    pub fn new() -> Self {
        Self::from_parameters(&QualityParameters::default())
    }

    pub fn from_parameters(params: &QualityParameters) -> Self {
        Self {
            base_engagement: params.base_engagement,
            engaged_time_variance: params.engaged_time_variance,
        }
    }

    /// Fraction of expected questions that were answered
    pub fn completeness(&self, responses: &[ResponseRecord], expected_total: usize) -> f64 {
        let answered = responses.iter().filter(|r| r.is_answered()).count();
        let total = if expected_total > 0 {
            expected_total
        } else {
            responses.len()
        };

        if total == 0 {
            return 0.0;
        }

        (answered as f64 / total as f64).min(1.0)
    }

    /// Engagement estimate from timing spread and answer distribution
    pub fn engagement(&self, responses: &[ResponseRecord], timing: Option<&TimingAnalysis>) -> f64 {
        let mut engagement = self.base_engagement;

        let varied_pace = timing.is_some_and(|t| t.variance > self.engaged_time_variance);
        if varied_pace {
            engagement *= 1.1;
        }

        let balanced = is_balanced(&likert_series(responses));
        if balanced {
            engagement *= 1.05;
        }

        debug!(
            engagement = engagement,
            varied_pace = varied_pace,
            balanced = balanced,
            "Engagement scored"
        );

        engagement.min(1.0)
    }
}

impl Default for CompletenessScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_balanced(series: &[f64]) -> bool {
    if series.is_empty() {
        return false;
    }

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for v in series {
        *counts.entry(*v as i64).or_insert(0) += 1;
    }

    let max_share = counts.values().copied().max().unwrap_or(0) as f64 / series.len() as f64;
    counts.len() >= 3 && max_share <= 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyscore_common::Trait;

    fn likert(values: &[f64]) -> Vec<ResponseRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ResponseRecord::likert(format!("q{}", i), Trait::Openness, v))
            .collect()
    }

    fn timing(variance: f64) -> TimingAnalysis {
        TimingAnalysis {
            score: 1.0,
            average_ms: 4000.0,
            variance,
            timed_count: 10,
        }
    }

    #[test]
    fn test_completeness_against_expected_total() {
        let mut responses = likert(&[3.0, 4.0, 2.0]);
        responses[2].value = None;

        let scorer = CompletenessScorer::new();
        assert!((scorer.completeness(&responses, 4) - 0.5).abs() < 1e-12);
        assert!((scorer.completeness(&responses, 0) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_completeness_capped() {
        let responses = likert(&[3.0, 4.0, 2.0]);
        assert_eq!(CompletenessScorer::new().completeness(&responses, 2), 1.0);
        assert_eq!(CompletenessScorer::new().completeness(&[], 0), 0.0);
    }

    #[test]
    fn test_engagement_base() {
        let responses = likert(&[3.0, 3.0, 3.0]);
        assert!((CompletenessScorer::new().engagement(&responses, None) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_engagement_boosts_multiply() {
        let responses = likert(&[2.0, 3.0, 4.0, 5.0, 3.0, 4.0]);
        let engagement = CompletenessScorer::new().engagement(&responses, Some(&timing(90000.0)));
        assert!((engagement - 0.8 * 1.1 * 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_low_time_variance_gets_no_boost() {
        let responses = likert(&[3.0, 3.0]);
        let engagement = CompletenessScorer::new().engagement(&responses, Some(&timing(100.0)));
        assert!((engagement - 0.8).abs() < 1e-12);
    }
}
