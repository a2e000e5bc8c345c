//! Response Quality Assessor
//!
//! Blends the individual quality scorers into one verdict on whether a
//! response set can be trusted.
//!
//! # Scoring Algorithm
//! Weighted mean over the metrics that could be computed, with weights
//! renormalised over the available ones:
//! - **Response time** (weight: 0.20)
//! - **Consistency** (weight: 0.30)
//! - **Pattern detection** (weight: 0.20)
//! - **Completeness** (weight: 0.15)
//! - **Engagement** (weight: 0.15)
//!
//! # Straight-lining
//! Identical answers make the consistency checks pass trivially, so once
//! straight-lining is detected the consistency metric is capped at the
//! pattern score and the overall score takes the straight-lining penalty
//! (×0.5) on top of the weighted mean.
//!
//! # Validity
//! The response set is invalid when any of these hold:
//! - overall score below 0.4
//! - a high-impact suspicious pattern detected with confidence ≥ 0.7
//! - more than two high-severity warnings
//!
//! # Reliability
//! Overall score ×0.7 per high-impact pattern, ×0.85 per medium-impact
//! pattern, ×1.1 when engagement exceeds 0.9; clamped to 0.3-1.0.
//!
//! # Example
//! ```rust,ignore
//! use psyscore_engine::validators::ResponseQualityAssessor;
//!
//! let assessor = ResponseQualityAssessor::new();
//! let assessment = assessor.assess(&responses, 40);
//!
//! if !assessment.validity {
//!     println!("Results unreliable: {:?}", assessment.invalid_reasons);
//! }
//! ```

use super::completeness_scorer::CompletenessScorer;
use super::consistency_validator::{ConsistencyAnalysis, ConsistencyValidator};
use super::pattern_detector::{PatternDetector, PatternKind, PatternReport};
use super::suspicious_patterns::{Impact, SuspiciousPattern, SuspiciousPatternDetector};
use super::timing_scorer::{TimingAnalysis, TimingScorer};
use crate::models::QualityParameters;
use crate::types::ResponseRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Per-metric sub-scores (None when a metric could not be computed)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub response_time: Option<f64>,
    pub consistency: Option<f64>,
    pub pattern_detection: Option<f64>,
    pub completeness: f64,
    pub engagement: f64,
}

/// Warning severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    Low,
    Medium,
    High,
}

impl From<Impact> for WarningSeverity {
    fn from(impact: Impact) -> Self {
        match impact {
            Impact::Low => WarningSeverity::Low,
            Impact::Medium => WarningSeverity::Medium,
            Impact::High => WarningSeverity::High,
        }
    }
}

/// A quality warning raised for the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityWarning {
    /// Stable machine-readable code
    pub code: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl QualityWarning {
    fn new(code: &str, severity: WarningSeverity, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity,
        }
    }
}

/// Response quality verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    /// Weighted overall score (0.0-1.0)
    pub overall_score: f64,
    /// Per-metric sub-scores
    pub metrics: QualityMetrics,
    /// Careless answering patterns
    pub patterns: PatternReport,
    /// Suspicious patterns with impact and confidence
    pub suspicious_patterns: Vec<SuspiciousPattern>,
    pub warnings: Vec<QualityWarning>,
    pub recommendations: Vec<String>,
    /// Reliability after pattern penalties (0.3-1.0)
    pub reliability: f64,
    /// Whether the results may be reported
    pub validity: bool,
    /// Why `validity` is false (empty when valid)
    pub invalid_reasons: Vec<String>,
    /// Number of records assessed
    pub response_count: usize,
}

impl QualityAssessment {
    /// Placeholder verdict for an empty response set
    pub fn empty() -> Self {
        Self {
            overall_score: 0.0,
            metrics: QualityMetrics::default(),
            patterns: PatternReport::default(),
            suspicious_patterns: Vec::new(),
            warnings: vec![QualityWarning::new(
                "noResponses",
                WarningSeverity::High,
                "No responses were supplied",
            )],
            recommendations: vec![recommendation_for("noResponses").to_string()],
            reliability: 0.3,
            validity: false,
            invalid_reasons: vec!["No responses were supplied".to_string()],
            response_count: 0,
        }
    }

    /// Count of warnings at high severity
    pub fn high_severity_warnings(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::High)
            .count()
    }
}

/// Response Quality Assessor
pub struct ResponseQualityAssessor {
    params: QualityParameters,
    timing: TimingScorer,
    consistency: ConsistencyValidator,
    patterns: PatternDetector,
    completeness: CompletenessScorer,
    suspicious: SuspiciousPatternDetector,
}

impl ResponseQualityAssessor {
    /// Create assessor with reference parameters
    pub fn new() -> Self {
        Self::with_parameters(QualityParameters::default())
    }

    /// Create assessor with custom parameters
    pub fn with_parameters(params: QualityParameters) -> Self {
        Self {
            timing: TimingScorer::from_parameters(&params),
            consistency: ConsistencyValidator::from_parameters(&params),
            patterns: PatternDetector::from_parameters(&params),
            completeness: CompletenessScorer::from_parameters(&params),
            suspicious: SuspiciousPatternDetector::from_parameters(&params),
            params,
        }
    }

    /// Assess a completed response set
    ///
    /// `expected_total` is the questionnaire length; pass 0 when unknown to
    /// measure completeness against the delivered records.
    pub fn assess(&self, responses: &[ResponseRecord], expected_total: usize) -> QualityAssessment {
        if responses.is_empty() {
            warn!("Quality assessment requested for empty response set");
            return QualityAssessment::empty();
        }

        let timing = self.timing.analyze(responses);
        let consistency = self.consistency.analyze(responses);
        let patterns = self.patterns.detect(responses);
        let completeness = self.completeness.completeness(responses, expected_total);
        let engagement = self.completeness.engagement(responses, timing.as_ref());
        let suspicious = self.suspicious.detect(responses, timing.as_ref());

        let straight_lined = patterns.contains(PatternKind::StraightLining);
        let pattern_score = patterns.score.unwrap_or(1.0);
        let metrics = QualityMetrics {
            response_time: timing.as_ref().map(|t| t.score),
            consistency: consistency.as_ref().map(|c| {
                if straight_lined {
                    c.score.min(pattern_score)
                } else {
                    c.score
                }
            }),
            pattern_detection: patterns.score,
            completeness,
            engagement,
        };

        let mut overall_score = self.weighted_overall(&metrics);
        if straight_lined {
            overall_score *= self.params.straight_lining_penalty;
        }
        let warnings = self.collect_warnings(&metrics, timing.as_ref(), consistency.as_ref(), &patterns, &suspicious);
        let recommendations = collect_recommendations(&warnings);
        let reliability = self.reliability(overall_score, engagement, &suspicious);
        let invalid_reasons = self.invalid_reasons(overall_score, &suspicious, &warnings);
        let validity = invalid_reasons.is_empty();

        debug!(
            overall = overall_score,
            reliability = reliability,
            warnings = warnings.len(),
            suspicious = suspicious.len(),
            "Quality assessment complete"
        );
        if !validity {
            warn!(
                overall = overall_score,
                reasons = invalid_reasons.len(),
                "Response set failed validity gate"
            );
        }

        QualityAssessment {
            overall_score,
            metrics,
            patterns,
            suspicious_patterns: suspicious,
            warnings,
            recommendations,
            reliability,
            validity,
            invalid_reasons,
            response_count: responses.len(),
        }
    }

    /// Weighted mean renormalised over available metrics
    fn weighted_overall(&self, metrics: &QualityMetrics) -> f64 {
        let w = &self.params.weights;
        let weighted = [
            (metrics.response_time, w.response_time),
            (metrics.consistency, w.consistency),
            (metrics.pattern_detection, w.pattern_detection),
            (Some(metrics.completeness), w.completeness),
            (Some(metrics.engagement), w.engagement),
        ];

        let (sum, weight_sum) = weighted
            .iter()
            .filter_map(|(score, weight)| score.map(|s| (s * weight, *weight)))
            .fold((0.0, 0.0), |(s, ws), (v, w)| (s + v, ws + w));

        if weight_sum > 0.0 {
            (sum / weight_sum).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn collect_warnings(
        &self,
        metrics: &QualityMetrics,
        timing: Option<&TimingAnalysis>,
        consistency: Option<&ConsistencyAnalysis>,
        patterns: &PatternReport,
        suspicious: &[SuspiciousPattern],
    ) -> Vec<QualityWarning> {
        let mut warnings = Vec::new();

        if let Some(timing) = timing {
            if timing.score < 0.5 {
                warnings.push(QualityWarning::new(
                    "fastResponses",
                    WarningSeverity::High,
                    format!("Responses averaged {:.0} ms, too fast to reflect careful reading", timing.average_ms),
                ));
            }
        }

        for kind in &patterns.detected {
            let (severity, message) = match kind {
                PatternKind::StraightLining => (WarningSeverity::High, "The same answer was given to most questions"),
                PatternKind::ZigZagging => (WarningSeverity::Medium, "Answers alternate between scale extremes"),
                PatternKind::MiddleBias => (WarningSeverity::Low, "Most answers were the neutral midpoint"),
                PatternKind::Acquiescence => (WarningSeverity::Low, "Nearly every statement was agreed with"),
            };
            warnings.push(QualityWarning::new(kind.as_str(), severity, message));
        }

        if let Some(consistency) = consistency {
            if consistency.score < 0.6 {
                warnings.push(QualityWarning::new(
                    "inconsistentAnswers",
                    WarningSeverity::Medium,
                    format!(
                        "Answers to related questions disagree (consistency {:.0}%)",
                        consistency.score * 100.0
                    ),
                ));
            }
        }

        if metrics.completeness < 0.5 {
            warnings.push(QualityWarning::new(
                "incomplete",
                WarningSeverity::High,
                format!("Only {:.0}% of questions were answered", metrics.completeness * 100.0),
            ));
        } else if metrics.completeness < 0.8 {
            warnings.push(QualityWarning::new(
                "partiallyComplete",
                WarningSeverity::Medium,
                format!("{:.0}% of questions were answered", metrics.completeness * 100.0),
            ));
        }

        for pattern in suspicious {
            warnings.push(QualityWarning::new(
                pattern.kind.as_str(),
                pattern.impact.into(),
                pattern.description.clone(),
            ));
        }

        warnings
    }

    fn reliability(&self, overall: f64, engagement: f64, suspicious: &[SuspiciousPattern]) -> f64 {
        let p = &self.params;
        let mut reliability = overall;
        for pattern in suspicious {
            match pattern.impact {
                Impact::High => reliability *= p.high_impact_reliability,
                Impact::Medium => reliability *= p.medium_impact_reliability,
                Impact::Low => {}
            }
        }
        if engagement > p.engaged_reliability_threshold {
            reliability *= p.engaged_reliability_boost;
        }
        reliability.clamp(p.min_reliability.min(1.0), 1.0)
    }

    fn invalid_reasons(
        &self,
        overall: f64,
        suspicious: &[SuspiciousPattern],
        warnings: &[QualityWarning],
    ) -> Vec<String> {
        let mut reasons = Vec::new();

        if overall < self.params.validity_threshold {
            reasons.push(format!(
                "Overall quality {:.2} is below the validity threshold {:.2}",
                overall, self.params.validity_threshold
            ));
        }

        for pattern in suspicious {
            if pattern.impact == Impact::High && pattern.confidence >= self.params.high_confidence_threshold {
                reasons.push(format!(
                    "High-impact pattern '{}' detected with {:.0}% confidence",
                    pattern.kind.as_str(),
                    pattern.confidence * 100.0
                ));
            }
        }

        let high = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::High)
            .count();
        if high > self.params.max_high_severity_warnings {
            reasons.push(format!("{} high-severity warnings raised", high));
        }

        reasons
    }
}

impl Default for ResponseQualityAssessor {
    fn default() -> Self {
        Self::new()
    }
}

fn recommendation_for(code: &str) -> &'static str {
    match code {
        "noResponses" => "Collect responses before requesting an assessment.",
        "fastResponses" | "speedRunning" => {
            "Encourage the respondent to read each question fully before answering."
        }
        "straightLining" => {
            "Review the repeated answers and consider re-administering the affected sections."
        }
        "zigZagging" | "randomClicking" => {
            "Answers look arbitrary; confirm the respondent understood the answer scale."
        }
        "middleBias" => "Invite the respondent to take a clearer position where they can.",
        "acquiescence" => "Include reverse-keyed items to offset agreement bias.",
        "inconsistentAnswers" => "Follow up on contradictory answers before interpreting results.",
        "incomplete" | "partiallyComplete" => {
            "Ask the respondent to complete the remaining questions for a reliable profile."
        }
        "socialDesirability" => "Remind the respondent there are no right or wrong answers.",
        _ => "Review the flagged responses before relying on the results.",
    }
}

fn collect_recommendations(warnings: &[QualityWarning]) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();
    for warning in warnings {
        let text = recommendation_for(&warning.code);
        if !recommendations.iter().any(|r| r == text) {
            recommendations.push(text.to_string());
        }
    }
    recommendations
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use psyscore_common::Trait;

    /// Twenty varied, plausibly paced answers across all five traits
    fn create_valid_responses() -> Vec<ResponseRecord> {
        let plan: [(Trait, [f64; 4]); 5] = [
            (Trait::Openness, [4.0, 4.0, 3.0, 4.0]),
            (Trait::Conscientiousness, [4.0, 3.0, 4.0, 4.0]),
            (Trait::Extraversion, [3.0, 2.0, 3.0, 3.0]),
            (Trait::Agreeableness, [4.0, 3.0, 3.0, 4.0]),
            (Trait::Neuroticism, [2.0, 3.0, 2.0, 2.0]),
        ];
        let mut responses = Vec::new();
        for (t, values) in plan {
            for (i, v) in values.iter().enumerate() {
                let ms = 2500 + (responses.len() as u64 * 937) % 6000;
                responses.push(
                    ResponseRecord::likert(format!("{}_{}", t.as_str(), i), t, *v).with_response_time(ms),
                );
            }
        }
        responses
    }

    #[test]
    fn test_empty_set_yields_placeholder() {
        let assessment = ResponseQualityAssessor::new().assess(&[], 10);
        assert!(!assessment.validity);
        assert_eq!(assessment.overall_score, 0.0);
        assert_eq!(assessment.response_count, 0);
        assert_eq!(assessment.warnings[0].code, "noResponses");
    }

    #[test]
    fn test_valid_set_passes() {
        let responses = create_valid_responses();
        let assessment = ResponseQualityAssessor::new().assess(&responses, responses.len());

        assert!(assessment.validity, "reasons: {:?}", assessment.invalid_reasons);
        assert!(assessment.overall_score > 0.8);
        assert!(assessment.suspicious_patterns.is_empty());
        assert!(assessment.patterns.detected.is_empty());
        assert_eq!(assessment.metrics.completeness, 1.0);
    }

    #[test]
    fn test_weights_renormalised_without_timing() {
        let responses: Vec<ResponseRecord> = create_valid_responses()
            .into_iter()
            .map(|mut r| {
                r.response_time = None;
                r
            })
            .collect();
        let assessment = ResponseQualityAssessor::new().assess(&responses, responses.len());

        let m = &assessment.metrics;
        assert!(m.response_time.is_none());
        let expected = (m.consistency.unwrap() * 0.30
            + m.pattern_detection.unwrap() * 0.20
            + m.completeness * 0.15
            + m.engagement * 0.15)
            / 0.80;
        assert!((assessment.overall_score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_straight_lining_scenario() {
        // 20 answers, 18 identical neutral values
        let mut responses: Vec<ResponseRecord> = (0..20)
            .map(|i| ResponseRecord::likert(format!("q{}", i), Trait::ALL[i % 5], 3.0).with_response_time(3000 + i as u64 * 400))
            .collect();
        responses[4].value = Some(4.0);
        responses[9].value = Some(2.0);

        let assessment = ResponseQualityAssessor::new().assess(&responses, 20);
        assert!(assessment.patterns.contains(PatternKind::StraightLining));
        assert!((assessment.patterns.ratios.as_ref().unwrap().straight_lining - 0.9).abs() < 1e-12);
        assert!(assessment.warnings.iter().any(|w| w.code == "straightLining"));
        if assessment.overall_score < 0.4 {
            assert!(!assessment.validity);
        }
    }

    #[test]
    fn test_straight_lining_never_raises_overall() {
        // Extreme but varied answers, then the tail overwritten with one value
        let clean: Vec<ResponseRecord> = (0..20)
            .map(|i| {
                let t = Trait::ALL[i / 4];
                let value = [1.0, 2.0, 4.0, 5.0][i % 4];
                ResponseRecord::likert(format!("{}_{}", t.as_str(), i), t, value)
                    .with_response_time(2500 + (i as u64 * 937) % 6000)
            })
            .collect();
        let mut injected = clean.clone();
        for r in injected.iter_mut().skip(2) {
            r.value = Some(4.0);
        }

        let assessor = ResponseQualityAssessor::new();
        let before = assessor.assess(&clean, 20);
        let after = assessor.assess(&injected, 20);

        assert!(after.patterns.contains(PatternKind::StraightLining));
        assert!(
            after.overall_score < before.overall_score,
            "{} >= {}",
            after.overall_score,
            before.overall_score
        );
        assert!(after.metrics.consistency.unwrap() <= after.metrics.pattern_detection.unwrap());
    }

    #[test]
    fn test_timing_parameters_change_verdict() {
        let responses = create_valid_responses();
        let reference = ResponseQualityAssessor::new().assess(&responses, responses.len());
        assert_eq!(reference.metrics.response_time, Some(1.0));

        let strict = ResponseQualityAssessor::with_parameters(QualityParameters {
            hurried_ms: 10_000.0,
            ..QualityParameters::default()
        })
        .assess(&responses, responses.len());
        assert_eq!(strict.metrics.response_time, Some(0.7));
        assert!(strict.overall_score < reference.overall_score);
    }

    #[test]
    fn test_reliability_floor_follows_parameters() {
        let assessor = ResponseQualityAssessor::with_parameters(QualityParameters {
            min_reliability: 0.1,
            ..QualityParameters::default()
        });
        assert!((assessor.reliability(0.2, 0.5, &[]) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_speed_running_invalidates() {
        let responses: Vec<ResponseRecord> = create_valid_responses()
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.with_response_time(500 + (i as u64 % 4) * 150))
            .collect();
        let assessment = ResponseQualityAssessor::new().assess(&responses, responses.len());

        assert!(!assessment.validity);
        assert!(assessment
            .invalid_reasons
            .iter()
            .any(|r| r.contains("speedRunning")));
        assert!(assessment.reliability < assessment.overall_score);
    }

    #[test]
    fn test_too_many_high_warnings_invalidates() {
        // Fast, straight-lined and mostly unanswered
        let mut responses: Vec<ResponseRecord> = (0..10)
            .map(|i| ResponseRecord::likert(format!("q{}", i), Trait::Openness, 4.0).with_response_time(700))
            .collect();
        responses.push(ResponseRecord::likert("q10", Trait::Openness, 5.0).with_response_time(900));

        let assessment = ResponseQualityAssessor::new().assess(&responses, 40);
        assert!(assessment.high_severity_warnings() > 2);
        assert!(!assessment.validity);
        assert!(assessment.invalid_reasons.iter().any(|r| r.contains("high-severity warnings")));
    }

    #[test]
    fn test_reliability_clamped() {
        let assessor = ResponseQualityAssessor::new();
        let high = SuspiciousPattern {
            kind: crate::validators::SuspiciousKind::SpeedRunning,
            impact: Impact::High,
            confidence: 0.9,
            description: String::new(),
        };
        assert_eq!(assessor.reliability(0.2, 0.5, &[high.clone(), high]), 0.3);
        assert_eq!(assessor.reliability(0.95, 0.95, &[]), 1.0);
    }

    #[test]
    fn test_recommendations_deduplicated() {
        let warnings = vec![
            QualityWarning::new("fastResponses", WarningSeverity::High, ""),
            QualityWarning::new("speedRunning", WarningSeverity::High, ""),
        ];
        assert_eq!(collect_recommendations(&warnings).len(), 1);
    }

    #[test]
    fn test_assessment_is_deterministic() {
        let responses = create_valid_responses();
        let assessor = ResponseQualityAssessor::new();
        assert_eq!(assessor.assess(&responses, 25), assessor.assess(&responses, 25));
    }
}
