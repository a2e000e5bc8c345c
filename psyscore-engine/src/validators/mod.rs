//! Response Quality Validation Layer
//!
//! Decides whether a completed response set is trustworthy enough to report.
//! Each scorer assesses one facet of response behaviour; the
//! [`ResponseQualityAssessor`] blends them into a single verdict.
//!
//! # Scorers
//! 1. **timing_scorer** - Answer speed and uniformity
//! 2. **consistency_validator** - Within-trait and cross-trait coherence
//! 3. **pattern_detector** - Straight-lining, zig-zagging, middle bias, acquiescence
//! 4. **completeness_scorer** - Completeness and engagement
//! 5. **suspicious_patterns** - Speed running, random clicking, social desirability
//! 6. **quality_assessor** - Weighted overall score, warnings, validity, reliability

pub mod completeness_scorer;
pub mod consistency_validator;
pub mod pattern_detector;
pub mod quality_assessor;
pub mod suspicious_patterns;
pub mod timing_scorer;

pub use completeness_scorer::CompletenessScorer;
pub use consistency_validator::{ConsistencyAnalysis, ConsistencyValidator};
pub use pattern_detector::{PatternDetector, PatternKind, PatternRatios, PatternReport};
pub use quality_assessor::{
    QualityAssessment, QualityMetrics, QualityWarning, ResponseQualityAssessor, WarningSeverity,
};
pub use suspicious_patterns::{Impact, SuspiciousKind, SuspiciousPattern, SuspiciousPatternDetector};
pub use timing_scorer::{TimingAnalysis, TimingScorer};

use crate::types::ResponseRecord;
use psyscore_common::TraitMap;

/// Answered Likert values in presentation order, rounded to whole points
pub(crate) fn likert_series(responses: &[ResponseRecord]) -> Vec<f64> {
    responses
        .iter()
        .filter_map(|r| r.likert_value())
        .map(|v| v.round())
        .collect()
}

/// Answered Likert values grouped by the trait they score
pub(crate) fn likert_by_trait(responses: &[ResponseRecord]) -> TraitMap<Vec<f64>> {
    let mut grouped: TraitMap<Vec<f64>> = TraitMap::default();
    for response in responses {
        if let (Some(t), Some(v)) = (response.trait_kind(), response.likert_value()) {
            grouped[t].push(v);
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskType;
    use psyscore_common::Trait;

    #[test]
    fn test_likert_series_skips_non_likert_and_unanswered() {
        let mut skipped = ResponseRecord::likert("q2", Trait::Openness, 4.0);
        skipped.value = None;
        let responses = vec![
            ResponseRecord::likert("q1", Trait::Openness, 4.4),
            skipped,
            ResponseRecord::instrument("gad7_1", 2.0),
            ResponseRecord::likert("q3", Trait::Neuroticism, 2.0).with_task_type(TaskType::Gamified),
            ResponseRecord::likert("q4", Trait::Neuroticism, 1.0),
        ];

        assert_eq!(likert_series(&responses), vec![4.0, 1.0]);
    }

    #[test]
    fn test_likert_by_trait_groups_values() {
        let responses = vec![
            ResponseRecord::likert("q1", Trait::Openness, 4.0),
            ResponseRecord::likert("q2", Trait::Openness, 5.0),
            ResponseRecord::likert("q3", Trait::Agreeableness, 2.0),
        ];

        let grouped = likert_by_trait(&responses);
        assert_eq!(grouped.openness, vec![4.0, 5.0]);
        assert_eq!(grouped.agreeableness, vec![2.0]);
        assert!(grouped.neuroticism.is_empty());
    }
}
