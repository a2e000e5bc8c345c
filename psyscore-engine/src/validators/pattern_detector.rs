//! Pattern Detector
//!
//! Detects careless answering styles in the ordered Likert series.
//!
//! # Patterns
//! | Pattern | Ratio | Trigger | Penalty |
//! |---|---|---|---|
//! | Straight-lining | modal answer share | ≥ 0.8 | ×0.5 |
//! | Zig-zagging | adjacent jumps of 3+ points | ≥ 0.8 | ×0.7 |
//! | Middle bias | neutral (3) share | > 0.6 | ×0.85 |
//! | Acquiescence | agree (4-5) share | > 0.8 | ×0.8 |
//!
//! Detection needs a minimum number of answers (default 5); below that the
//! metric is reported as unavailable.

use super::likert_series;
use crate::models::QualityParameters;
use crate::types::ResponseRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Careless answering pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternKind {
    StraightLining,
    ZigZagging,
    MiddleBias,
    Acquiescence,
}

impl PatternKind {
    /// camelCase identifier used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::StraightLining => "straightLining",
            PatternKind::ZigZagging => "zigZagging",
            PatternKind::MiddleBias => "middleBias",
            PatternKind::Acquiescence => "acquiescence",
        }
    }
}

/// Observed pattern ratios (0.0-1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRatios {
    pub straight_lining: f64,
    pub zig_zag: f64,
    pub middle_bias: f64,
    pub acquiescence: f64,
}

/// Pattern detection result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    /// Pattern metric score (None when too few answers to judge)
    pub score: Option<f64>,
    /// Patterns detected, in check order
    pub detected: Vec<PatternKind>,
    /// Ratios behind the detections
    pub ratios: Option<PatternRatios>,
}

impl PatternReport {
    /// Whether a given pattern was detected
    pub fn contains(&self, kind: PatternKind) -> bool {
        self.detected.contains(&kind)
    }
}

/// Pattern Detector
pub struct PatternDetector {
    min_responses: usize,
    straight_lining_ratio: f64,
    zig_zag_ratio: f64,
    middle_bias_ratio: f64,
    acquiescence_ratio: f64,
    straight_lining_penalty: f64,
}

impl PatternDetector {
    /// Create detector with reference thresholds
    pub fn new() -> Self {
        Self::from_parameters(&QualityParameters::default())
    }

    /// Create detector from quality parameters
    pub fn from_parameters(params: &QualityParameters) -> Self {
        Self {
            min_responses: params.min_pattern_responses,
            straight_lining_ratio: params.straight_lining_ratio,
            zig_zag_ratio: params.zig_zag_ratio,
            middle_bias_ratio: params.middle_bias_ratio,
            acquiescence_ratio: params.acquiescence_ratio,
            straight_lining_penalty: params.straight_lining_penalty,
        }
    }

    /// Detect careless answering patterns
    pub fn detect(&self, responses: &[ResponseRecord]) -> PatternReport {
        let series = likert_series(responses);
        if series.len() < self.min_responses.max(1) {
            debug!(answers = series.len(), "Too few Likert answers for pattern detection");
            return PatternReport::default();
        }

        let ratios = compute_ratios(&series);
        let mut score = 1.0_f64;
        let mut detected = Vec::new();

        if ratios.straight_lining >= self.straight_lining_ratio {
            score *= self.straight_lining_penalty;
            detected.push(PatternKind::StraightLining);
        }
        if ratios.zig_zag >= self.zig_zag_ratio {
            score *= 0.7;
            detected.push(PatternKind::ZigZagging);
        }
        if ratios.middle_bias > self.middle_bias_ratio {
            score *= 0.85;
            detected.push(PatternKind::MiddleBias);
        }
        if ratios.acquiescence > self.acquiescence_ratio {
            score *= 0.8;
            detected.push(PatternKind::Acquiescence);
        }

        debug!(
            score = score,
            straight_lining = ratios.straight_lining,
            zig_zag = ratios.zig_zag,
            middle_bias = ratios.middle_bias,
            acquiescence = ratios.acquiescence,
            "Pattern detection complete"
        );

        PatternReport {
            score: Some(score),
            detected,
            ratios: Some(ratios),
        }
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn compute_ratios(series: &[f64]) -> PatternRatios {
    let n = series.len() as f64;

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for v in series {
        *counts.entry(*v as i64).or_insert(0) += 1;
    }
    let modal = counts.values().copied().max().unwrap_or(0);

    let jumps = series
        .windows(2)
        .filter(|pair| (pair[1] - pair[0]).abs() >= 3.0)
        .count();
    let zig_zag = if series.len() > 1 {
        jumps as f64 / (series.len() - 1) as f64
    } else {
        0.0
    };

    let neutral = counts.get(&3).copied().unwrap_or(0);
    let agree = counts.get(&4).copied().unwrap_or(0) + counts.get(&5).copied().unwrap_or(0);

    PatternRatios {
        straight_lining: modal as f64 / n,
        zig_zag,
        middle_bias: neutral as f64 / n,
        acquiescence: agree as f64 / n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyscore_common::Trait;

    fn series(values: &[f64]) -> Vec<ResponseRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ResponseRecord::likert(format!("q{}", i), Trait::ALL[i % 5], v))
            .collect()
    }

    #[test]
    fn test_too_few_answers_unavailable() {
        let report = PatternDetector::new().detect(&series(&[3.0, 3.0, 3.0]));
        assert!(report.score.is_none());
        assert!(report.detected.is_empty());
    }

    #[test]
    fn test_straight_lining_detected_at_ninety_percent() {
        let mut values = vec![3.0; 18];
        values.push(4.0);
        values.push(2.0);

        let report = PatternDetector::new().detect(&series(&values));
        let ratios = report.ratios.clone().unwrap();
        assert!((ratios.straight_lining - 0.9).abs() < 1e-12);
        assert!(report.contains(PatternKind::StraightLining));
        // 18 of 20 neutral is also middle bias
        assert!(report.contains(PatternKind::MiddleBias));
        assert!((report.score.unwrap() - 0.5 * 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_zig_zag_detected() {
        let report = PatternDetector::new().detect(&series(&[1.0, 5.0, 1.0, 5.0, 1.0, 4.0]));
        assert!(report.contains(PatternKind::ZigZagging));
        assert!(!report.contains(PatternKind::StraightLining));
        assert!((report.score.unwrap() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_acquiescence_detected() {
        let report = PatternDetector::new().detect(&series(&[4.0, 5.0, 4.0, 5.0, 4.0, 5.0, 2.0, 4.0, 5.0, 5.0]));
        assert!(report.contains(PatternKind::Acquiescence));
        assert_eq!(report.detected.len(), 1);
    }

    #[test]
    fn test_varied_answers_clean() {
        let report = PatternDetector::new().detect(&series(&[2.0, 4.0, 3.0, 4.0, 2.0, 5.0, 3.0, 4.0]));
        assert_eq!(report.score, Some(1.0));
        assert!(report.detected.is_empty());
    }

    #[test]
    fn test_pattern_kind_serializes_camel_case() {
        let json = serde_json::to_string(&PatternKind::StraightLining).unwrap();
        assert_eq!(json, "\"straightLining\"");
    }
}
