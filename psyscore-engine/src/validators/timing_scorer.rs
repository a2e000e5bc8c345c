//! Timing Scorer
//!
//! Scores how plausible the respondent's answer speed is.
//!
//! # Scoring Algorithm
//! - Start with 1.0
//! - Average below 1000 ms: 0.3 (too fast to have read the item)
//! - Average below 2000 ms: 0.7
//! - Average above 20000 ms: 0.8 (distracted)
//! - Variance below 500 ms² across 2+ timed answers: further ×0.8
//!   (suspiciously uniform, typical of scripted input)

use crate::models::QualityParameters;
use crate::types::{mean, population_variance, ResponseRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Timing analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingAnalysis {
    /// Timing quality score (0.0-1.0)
    pub score: f64,
    /// Mean response time, ms
    pub average_ms: f64,
    /// Population variance of response times, ms²
    pub variance: f64,
    /// Number of responses carrying a response time
    pub timed_count: usize,
}

/// Timing Scorer
pub struct TimingScorer {
    too_fast_ms: f64,
    fast_ms: f64,
    slow_ms: f64,
    min_variance: f64,
}

impl TimingScorer {
    /// Create scorer with reference cutoffs
    pub fn new() -> Self {
        Self::from_parameters(&QualityParameters::default())
    }

    /// Create scorer from quality parameters
    pub fn from_parameters(params: &QualityParameters) -> Self {
        Self {
            too_fast_ms: params.too_fast_ms,
            fast_ms: params.hurried_ms,
            slow_ms: params.distracted_ms,
            min_variance: params.uniform_time_variance,
        }
    }

    /// Analyze response timing
    ///
    /// Returns `None` when no response carries a time, so the metric can be
    /// excluded from the weighted overall score.
    pub fn analyze(&self, responses: &[ResponseRecord]) -> Option<TimingAnalysis> {
        let times: Vec<f64> = responses
            .iter()
            .filter_map(|r| r.response_time)
            .map(|ms| ms as f64)
            .collect();

        if times.is_empty() {
            return None;
        }

        let average_ms = mean(&times);
        let variance = population_variance(&times);

        let mut score = if average_ms < self.too_fast_ms {
            0.3
        } else if average_ms < self.fast_ms {
            0.7
        } else if average_ms > self.slow_ms {
            0.8
        } else {
            1.0
        };

        if times.len() >= 2 && variance < self.min_variance {
            score *= 0.8;
        }

        debug!(
            average_ms = average_ms,
            variance = variance,
            timed = times.len(),
            score = score,
            "Timing analysis complete"
        );

        Some(TimingAnalysis {
            score,
            average_ms,
            variance,
            timed_count: times.len(),
        })
    }
}

impl Default for TimingScorer {
    fn default() -> Self {
        Self::new()
    }
}
