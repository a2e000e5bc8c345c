//! ADHD instrument
//!
//! ASRS-6 screener (`asrs_1..6`, 0-4 points each, 5 answers required) with
//! inattention, hyperactivity and impulsivity subscales.

use super::{
    AlertLevel, CriticalItem, Cutoff, InstrumentDefinition, ItemScoring, Severity, Subscale, SubscaleDefinition,
    Trigger,
};

pub static ADHD: InstrumentDefinition = InstrumentDefinition {
    id: "adhd",
    name: "ADHD",
    primary: SubscaleDefinition {
        id: Subscale::Asrs,
        name: "ASRS-6",
        item_count: 6,
        min_answered: 5,
        scoring: ItemScoring::Frequency { max_points: 4.0 },
        recommendation: "",
    },
    cutoffs: &[
        Cutoff { max: 9.0, severity: Severity::Minimal },
        Cutoff { max: 13.0, severity: Severity::Mild },
        Cutoff { max: 17.0, severity: Severity::Moderate },
        Cutoff { max: 24.0, severity: Severity::Severe },
    ],
    subscales: &[
        SubscaleDefinition {
            id: Subscale::AdhdInattention,
            name: "Inattention",
            item_count: 4,
            min_answered: 3,
            scoring: ItemScoring::Likert,
            recommendation: "External structure helps with inattention: reminders, checklists, shorter work blocks.",
        },
        SubscaleDefinition {
            id: Subscale::AdhdHyperactivity,
            name: "Hyperactivity",
            item_count: 4,
            min_answered: 3,
            scoring: ItemScoring::Likert,
            recommendation: "Build movement breaks into the day to channel restlessness.",
        },
        SubscaleDefinition {
            id: Subscale::AdhdImpulsivity,
            name: "Impulsivity",
            item_count: 3,
            min_answered: 2,
            scoring: ItemScoring::Likert,
            recommendation: "Practise pause-before-acting strategies for impulsive decisions.",
        },
    ],
    critical_items: &[CriticalItem {
        scale: Subscale::AdhdImpulsivity,
        item: 3,
        trigger: Trigger::AtLeast(4.0),
        alert_type: "IMPULSIVE_RISK_TAKING",
        level: AlertLevel::Moderate,
        message: "Frequent impulsive risk-taking reported",
    }],
    severity_recommendations: &[
        (Severity::Minimal, "Symptoms are not consistent with ADHD at screening level."),
        (Severity::Mild, "Some ADHD symptoms present; monitor their effect on work and relationships."),
        (Severity::Moderate, "A full diagnostic ADHD assessment is recommended."),
        (Severity::Severe, "Refer for specialist ADHD assessment and discuss treatment options."),
    ],
};
