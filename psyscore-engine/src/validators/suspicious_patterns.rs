//! Suspicious Pattern Detector
//!
//! Flags response sets that look produced by something other than a careful,
//! candid respondent. Unlike the careless-pattern metric, each detection here
//! carries an impact level and a confidence, and a high-impact detection held
//! with high confidence invalidates the whole response set.
//!
//! # Detections
//! - **speedRunning**: mean response time below 1500 ms (high impact)
//! - **randomClicking**: Shannon entropy of Likert answers above 2.2 bits over
//!   at least 10 answers (high impact; 5 options max out at ~2.32 bits)
//! - **socialDesirability**: agreeableness and conscientiousness both
//!   averaging above 4.3, or neuroticism averaging below 1.7 (medium impact)

use super::timing_scorer::TimingAnalysis;
use super::{likert_by_trait, likert_series};
use crate::models::QualityParameters;
use crate::types::{mean, ResponseRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Suspicious pattern kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuspiciousKind {
    SpeedRunning,
    RandomClicking,
    SocialDesirability,
}

impl SuspiciousKind {
    /// camelCase identifier used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            SuspiciousKind::SpeedRunning => "speedRunning",
            SuspiciousKind::RandomClicking => "randomClicking",
            SuspiciousKind::SocialDesirability => "socialDesirability",
        }
    }
}

/// How much a detection undermines the results
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// A detected suspicious pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspiciousPattern {
    pub kind: SuspiciousKind,
    pub impact: Impact,
    /// Detection confidence (0.0-1.0)
    pub confidence: f64,
    pub description: String,
}

/// Suspicious Pattern Detector
pub struct SuspiciousPatternDetector {
    speed_running_ms: f64,
    too_fast_ms: f64,
    random_clicking_entropy: f64,
    min_entropy_responses: usize,
}

impl SuspiciousPatternDetector {
    /// Create detector with reference thresholds
    pub fn new() -> Self {
        Self::from_parameters(&QualityParameters::default())
    }

    /// Create detector from quality parameters
    pub fn from_parameters(params: &QualityParameters) -> Self {
        Self {
            speed_running_ms: params.speed_running_ms,
            too_fast_ms: params.too_fast_ms,
            random_clicking_entropy: params.random_clicking_entropy,
            min_entropy_responses: params.min_entropy_responses,
        }
    }

    /// Detect suspicious patterns
    pub fn detect(
        &self,
        responses: &[ResponseRecord],
        timing: Option<&TimingAnalysis>,
    ) -> Vec<SuspiciousPattern> {
        let mut detected = Vec::new();

        if let Some(timing) = timing {
            if timing.average_ms < self.speed_running_ms {
                detected.push(SuspiciousPattern {
                    kind: SuspiciousKind::SpeedRunning,
                    impact: Impact::High,
                    confidence: if timing.average_ms < self.too_fast_ms { 0.9 } else { 0.75 },
                    description: format!(
                        "Average response time of {:.0} ms is too fast for careful reading",
                        timing.average_ms
                    ),
                });
            }
        }

        let series = likert_series(responses);
        if series.len() >= self.min_entropy_responses {
            let entropy = answer_entropy(&series);
            if entropy > self.random_clicking_entropy {
                let confidence = (0.5 + 2.5 * (entropy - self.random_clicking_entropy)).clamp(0.5, 1.0);
                detected.push(SuspiciousPattern {
                    kind: SuspiciousKind::RandomClicking,
                    impact: Impact::High,
                    confidence,
                    description: format!(
                        "Answer distribution entropy of {:.2} bits is close to uniform random choice",
                        entropy
                    ),
                });
            }
        }

        let grouped = likert_by_trait(responses);
        let avg = |values: &Vec<f64>| (!values.is_empty()).then(|| mean(values));
        let agreeable_and_diligent = matches!(
            (avg(&grouped.agreeableness), avg(&grouped.conscientiousness)),
            (Some(a), Some(c)) if a > 4.3 && c > 4.3
        );
        let implausibly_calm = avg(&grouped.neuroticism).is_some_and(|n| n < 1.7);

        if agreeable_and_diligent || implausibly_calm {
            detected.push(SuspiciousPattern {
                kind: SuspiciousKind::SocialDesirability,
                impact: Impact::Medium,
                confidence: 0.7,
                description: "Answers consistently present an idealised self-image".to_string(),
            });
        }

        debug!(count = detected.len(), "Suspicious pattern detection complete");
        detected
    }
}

impl Default for SuspiciousPatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Shannon entropy (bits) of the answer value distribution
pub fn answer_entropy(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for v in series {
        *counts.entry(v.round() as i64).or_insert(0) += 1;
    }

    let n = series.len() as f64;
    counts
        .values()
        .map(|&c| {
            let p = c as f64 / n;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyscore_common::Trait;

    fn timing(average_ms: f64) -> TimingAnalysis {
        TimingAnalysis {
            score: 1.0,
            average_ms,
            variance: 10000.0,
            timed_count: 5,
        }
    }

    #[test]
    fn test_entropy_bounds() {
        assert_eq!(answer_entropy(&[3.0, 3.0, 3.0]), 0.0);
        let uniform = answer_entropy(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((uniform - 5f64.log2()).abs() < 1e-12);
    }

    #[test]
    fn test_speed_running_confidence_tiers() {
        let detector = SuspiciousPatternDetector::new();

        let very_fast = detector.detect(&[], Some(&timing(800.0)));
        assert_eq!(very_fast[0].kind, SuspiciousKind::SpeedRunning);
        assert_eq!(very_fast[0].confidence, 0.9);

        let fast = detector.detect(&[], Some(&timing(1200.0)));
        assert_eq!(fast[0].confidence, 0.75);

        assert!(detector.detect(&[], Some(&timing(3000.0))).is_empty());
    }

    #[test]
    fn test_random_clicking_needs_enough_answers() {
        let few: Vec<ResponseRecord> = (0..5)
            .map(|i| ResponseRecord::likert(format!("q{}", i), Trait::Openness, (i % 5 + 1) as f64))
            .collect();
        assert!(SuspiciousPatternDetector::new().detect(&few, None).is_empty());

        let many: Vec<ResponseRecord> = (0..10)
            .map(|i| ResponseRecord::likert(format!("q{}", i), Trait::Openness, (i % 5 + 1) as f64))
            .collect();
        let detected = SuspiciousPatternDetector::new().detect(&many, None);
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].kind, SuspiciousKind::RandomClicking);
        assert_eq!(detected[0].impact, Impact::High);
        assert!(detected[0].confidence > 0.7);
    }

    #[test]
    fn test_social_desirability_from_low_neuroticism() {
        let responses = vec![
            ResponseRecord::likert("n1", Trait::Neuroticism, 1.0),
            ResponseRecord::likert("n2", Trait::Neuroticism, 2.0),
            ResponseRecord::likert("n3", Trait::Neuroticism, 1.0),
        ];
        let detected = SuspiciousPatternDetector::new().detect(&responses, None);
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].kind, SuspiciousKind::SocialDesirability);
        assert_eq!(detected[0].impact, Impact::Medium);
    }

    #[test]
    fn test_social_desirability_requires_both_traits() {
        let responses = vec![
            ResponseRecord::likert("a1", Trait::Agreeableness, 5.0),
            ResponseRecord::likert("a2", Trait::Agreeableness, 5.0),
        ];
        assert!(SuspiciousPatternDetector::new().detect(&responses, None).is_empty());

        let mut both = responses.clone();
        both.push(ResponseRecord::likert("c1", Trait::Conscientiousness, 5.0));
        both.push(ResponseRecord::likert("c2", Trait::Conscientiousness, 4.0));
        assert_eq!(SuspiciousPatternDetector::new().detect(&both, None).len(), 1);
    }
}
