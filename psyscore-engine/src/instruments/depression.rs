//! Depression instrument
//!
//! PHQ-9 (`phq9_1..9`, 0-3 points each, 7 answers required) with cognitive,
//! somatic and social-withdrawal subscales. Any non-zero answer to `phq9_9`
//! (thoughts of self-harm) raises a CRITICAL alert whatever the total.
//!
//! | PHQ-9 total | Severity |
//! |---|---|
//! | 0-4 | None |
//! | 5-9 | Mild |
//! | 10-14 | Moderate |
//! | 15-19 | Moderately Severe |
//! | 20-27 | Severe |

use super::{
    AlertLevel, CriticalItem, Cutoff, InstrumentDefinition, ItemScoring, Severity, Subscale, SubscaleDefinition,
    Trigger,
};

pub static DEPRESSION: InstrumentDefinition = InstrumentDefinition {
    id: "depression",
    name: "Depression",
    primary: SubscaleDefinition {
        id: Subscale::Phq9,
        name: "PHQ-9",
        item_count: 9,
        min_answered: 7,
        scoring: ItemScoring::Frequency { max_points: 3.0 },
        recommendation: "",
    },
    cutoffs: &[
        Cutoff { max: 4.0, severity: Severity::None },
        Cutoff { max: 9.0, severity: Severity::Mild },
        Cutoff { max: 14.0, severity: Severity::Moderate },
        Cutoff { max: 19.0, severity: Severity::ModeratelySevere },
        Cutoff { max: 27.0, severity: Severity::Severe },
    ],
    subscales: &[
        SubscaleDefinition {
            id: Subscale::DepCognitive,
            name: "Cognitive",
            item_count: 4,
            min_answered: 3,
            scoring: ItemScoring::Likert,
            recommendation: "Work on negative thinking patterns with cognitive restructuring.",
        },
        SubscaleDefinition {
            id: Subscale::DepSomatic,
            name: "Somatic",
            item_count: 4,
            min_answered: 3,
            scoring: ItemScoring::Likert,
            recommendation: "Address sleep, appetite and energy with a regular daily routine and physical activity.",
        },
        SubscaleDefinition {
            id: Subscale::DepWithdrawal,
            name: "Social Withdrawal",
            item_count: 3,
            min_answered: 2,
            scoring: ItemScoring::Likert,
            recommendation: "Schedule small, regular social contacts through behavioural activation.",
        },
    ],
    critical_items: &[CriticalItem {
        scale: Subscale::Phq9,
        item: 9,
        trigger: Trigger::Above(0.0),
        alert_type: "SUICIDAL_IDEATION",
        level: AlertLevel::Critical,
        message: "Thoughts of self-harm reported; immediate safety assessment required",
    }],
    severity_recommendations: &[
        (Severity::None, "No depression intervention indicated."),
        (Severity::Mild, "Watchful waiting; repeat screening at follow-up."),
        (Severity::Moderate, "Consider counselling, psychotherapy or pharmacotherapy."),
        (
            Severity::ModeratelySevere,
            "Active treatment with pharmacotherapy and/or psychotherapy is recommended.",
        ),
        (
            Severity::Severe,
            "Immediate treatment and referral to a mental health specialist is recommended.",
        ),
    ],
};

#[cfg(test)]
mod tests {
    use crate::instruments::{AlertLevel, InstrumentScorer, Severity};
    use crate::types::ResponseRecord;

    fn phq9(values: &[f64]) -> Vec<ResponseRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ResponseRecord::instrument(format!("phq9_{}", i + 1), v))
            .collect()
    }

    #[test]
    fn test_item_nine_raises_critical_alert() {
        let responses = phq9(&[0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]);
        let report = InstrumentScorer::depression().report(&responses);

        assert_eq!(report.scores.severity, Severity::None);
        let alert = report
            .alerts
            .iter()
            .find(|a| a.alert_type == "SUICIDAL_IDEATION")
            .unwrap();
        assert_eq!(alert.severity, AlertLevel::Critical);
        assert!(report.has_critical_alert());
    }

    #[test]
    fn test_item_nine_zero_no_alert() {
        let responses = phq9(&[2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 0.0]);
        let report = InstrumentScorer::depression().report(&responses);
        assert_eq!(report.scores.severity, Severity::ModeratelySevere);
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn test_twenty_is_severe() {
        let responses = phq9(&[3.0, 3.0, 3.0, 3.0, 3.0, 2.0, 2.0, 1.0, 0.0]);
        let score = InstrumentScorer::depression().score(&responses);
        assert_eq!(score.composite, Some(20.0));
        assert_eq!(score.severity, Severity::Severe);
        assert!(score.alerts.iter().any(|a| a.alert_type == "SEVERE_DEPRESSION"));
    }

    #[test]
    fn test_four_of_nine_excluded_from_composite() {
        let responses = phq9(&[3.0, 3.0, 3.0, 3.0]);
        let score = InstrumentScorer::depression().score(&responses);

        assert_eq!(score.primary.answered, 4);
        assert_eq!(score.primary.severity, Severity::Unknown);
        assert_eq!(score.composite, None);
        assert_eq!(score.severity, Severity::Unknown);
    }

    #[test]
    fn test_total_bounded() {
        let responses = phq9(&[9.0; 9]);
        let score = InstrumentScorer::depression().score(&responses);
        assert_eq!(score.composite, Some(27.0));
    }
}
