//! Anxiety instrument
//!
//! GAD-7 (`gad7_1..7`, 0-3 points each, 5 answers required) with three
//! subsidiary 1-5 subscales:
//! - Social anxiety (`anx_social_1..4`, 3 required)
//! - Panic (`anx_panic_1..4`, 3 required); `anx_panic_4` asks about
//!   avoiding places for fear of an attack
//! - Health anxiety (`anx_health_1..3`, 2 required)
//!
//! | GAD-7 total | Severity |
//! |---|---|
//! | 0-4 | Minimal |
//! | 5-9 | Mild |
//! | 10-14 | Moderate |
//! | 15-21 | Severe |

use super::{
    AlertLevel, CriticalItem, Cutoff, InstrumentDefinition, ItemScoring, Severity, Subscale, SubscaleDefinition,
    Trigger,
};

pub static ANXIETY: InstrumentDefinition = InstrumentDefinition {
    id: "anxiety",
    name: "Anxiety",
    primary: SubscaleDefinition {
        id: Subscale::Gad7,
        name: "GAD-7",
        item_count: 7,
        min_answered: 5,
        scoring: ItemScoring::Frequency { max_points: 3.0 },
        recommendation: "",
    },
    cutoffs: &[
        Cutoff { max: 4.0, severity: Severity::Minimal },
        Cutoff { max: 9.0, severity: Severity::Mild },
        Cutoff { max: 14.0, severity: Severity::Moderate },
        Cutoff { max: 21.0, severity: Severity::Severe },
    ],
    subscales: &[
        SubscaleDefinition {
            id: Subscale::AnxSocial,
            name: "Social Anxiety",
            item_count: 4,
            min_answered: 3,
            scoring: ItemScoring::Likert,
            recommendation: "Graded exposure to social situations can reduce social anxiety.",
        },
        SubscaleDefinition {
            id: Subscale::AnxPanic,
            name: "Panic",
            item_count: 4,
            min_answered: 3,
            scoring: ItemScoring::Likert,
            recommendation: "Panic symptoms respond well to CBT with interoceptive exposure.",
        },
        SubscaleDefinition {
            id: Subscale::AnxHealth,
            name: "Health Anxiety",
            item_count: 3,
            min_answered: 2,
            scoring: ItemScoring::Likert,
            recommendation: "Limit symptom checking and reassurance seeking; discuss health worries with a GP.",
        },
    ],
    critical_items: &[CriticalItem {
        scale: Subscale::AnxPanic,
        item: 4,
        trigger: Trigger::AtLeast(4.0),
        alert_type: "PANIC_WITH_AVOIDANCE",
        level: AlertLevel::Moderate,
        message: "Panic attacks are leading to avoidance of everyday places",
    }],
    severity_recommendations: &[
        (Severity::Minimal, "No anxiety intervention indicated; rescreen if circumstances change."),
        (Severity::Mild, "Monitor anxiety and consider guided self-help or relaxation training."),
        (Severity::Moderate, "Consider referral for cognitive behavioural therapy."),
        (Severity::Severe, "Refer for clinical assessment; combined therapy and medication may be indicated."),
    ],
};

#[cfg(test)]
mod tests {
    use crate::instruments::{AlertLevel, InstrumentScorer, Severity};
    use crate::types::ResponseRecord;

    fn gad7(values: &[f64]) -> Vec<ResponseRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ResponseRecord::instrument(format!("gad7_{}", i + 1), v))
            .collect()
    }

    #[test]
    fn test_sum_sixteen_is_severe_with_high_alert() {
        let responses = gad7(&[3.0, 3.0, 2.0, 2.0, 2.0, 2.0, 2.0]);
        let report = InstrumentScorer::anxiety().report(&responses);

        assert_eq!(report.scores.composite, Some(16.0));
        assert_eq!(report.scores.severity, Severity::Severe);
        assert!(report
            .alerts
            .iter()
            .any(|a| a.alert_type == "SEVERE_ANXIETY" && a.severity == AlertLevel::High));
    }

    #[test]
    fn test_boundaries_map_to_higher_tier() {
        let scorer = InstrumentScorer::anxiety();
        let tier = |values: &[f64]| scorer.score(&gad7(values)).severity;

        assert_eq!(tier(&[1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]), Severity::Minimal);
        assert_eq!(tier(&[1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0]), Severity::Mild);
        assert_eq!(tier(&[2.0, 2.0, 2.0, 2.0, 2.0, 0.0, 0.0]), Severity::Moderate);
        assert_eq!(tier(&[3.0, 3.0, 3.0, 3.0, 3.0, 0.0, 0.0]), Severity::Severe);
    }

    #[test]
    fn test_four_answers_is_unknown() {
        let score = InstrumentScorer::anxiety().score(&gad7(&[3.0, 3.0, 3.0, 3.0]));
        assert_eq!(score.severity, Severity::Unknown);
        assert!(score.alerts.is_empty());
    }

    #[test]
    fn test_panic_with_avoidance_alert_independent_of_severity() {
        let mut responses = gad7(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        responses.push(ResponseRecord::instrument("anx_panic_4", 4.0));
        let report = InstrumentScorer::anxiety().report(&responses);

        assert_eq!(report.scores.severity, Severity::Minimal);
        let alert = report
            .alerts
            .iter()
            .find(|a| a.alert_type == "PANIC_WITH_AVOIDANCE")
            .unwrap();
        assert_eq!(alert.severity, AlertLevel::Moderate);
        assert_eq!(alert.item.as_deref(), Some("anx_panic_4"));
    }

    #[test]
    fn test_elevated_subscale_adds_recommendation() {
        let mut responses = gad7(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
        for i in 1..=4 {
            responses.push(ResponseRecord::instrument(format!("anx_social_{}", i), 4.0));
        }
        let report = InstrumentScorer::anxiety().report(&responses);

        assert_eq!(report.recommendations.len(), 2);
        assert!(report.recommendations[1].contains("social"));
        assert_eq!(report.scores.primary_type.as_deref(), Some("Social Anxiety"));
        assert!(report.summary.starts_with("Anxiety: GAD-7 total 6/21, Mild severity"));
    }
}
