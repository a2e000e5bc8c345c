//! Autism instrument
//!
//! AQ-10 (`aq10_1..10`, 8 answers required). Answers use a 0-3 agreement
//! scale (0 definitely agree .. 3 definitely disagree); each item scores one
//! point when the answer falls on its keyed side. Items 1, 7, 8 and 10 are
//! keyed on agreement, the rest on disagreement.

use super::{
    AlertLevel, CriticalItem, Cutoff, InstrumentDefinition, ItemScoring, Severity, Subscale, SubscaleDefinition,
    Trigger,
};

pub static AUTISM: InstrumentDefinition = InstrumentDefinition {
    id: "autism",
    name: "Autism",
    primary: SubscaleDefinition {
        id: Subscale::Aq10,
        name: "AQ-10",
        item_count: 10,
        min_answered: 8,
        scoring: ItemScoring::Keyed { agree_keyed: &[1, 7, 8, 10] },
        recommendation: "",
    },
    cutoffs: &[
        Cutoff { max: 3.0, severity: Severity::Minimal },
        Cutoff { max: 5.0, severity: Severity::Mild },
        Cutoff { max: 7.0, severity: Severity::Moderate },
        Cutoff { max: 10.0, severity: Severity::Severe },
    ],
    subscales: &[
        SubscaleDefinition {
            id: Subscale::AsdSocial,
            name: "Social Communication",
            item_count: 4,
            min_answered: 3,
            scoring: ItemScoring::Likert,
            recommendation: "Social communication support or skills groups may help.",
        },
        SubscaleDefinition {
            id: Subscale::AsdSensory,
            name: "Sensory Sensitivity",
            item_count: 4,
            min_answered: 3,
            scoring: ItemScoring::Likert,
            recommendation: "Adjust lighting, noise and crowding where possible; an occupational therapist can advise.",
        },
        SubscaleDefinition {
            id: Subscale::AsdRoutine,
            name: "Routine Preference",
            item_count: 3,
            min_answered: 2,
            scoring: ItemScoring::Likert,
            recommendation: "Give advance notice of changes to routine where possible.",
        },
    ],
    critical_items: &[CriticalItem {
        scale: Subscale::AsdSensory,
        item: 4,
        trigger: Trigger::AtLeast(4.0),
        alert_type: "SENSORY_OVERLOAD",
        level: AlertLevel::Moderate,
        message: "Frequent distress from sensory overload reported",
    }],
    severity_recommendations: &[
        (Severity::Minimal, "Autistic traits are below the screening threshold."),
        (Severity::Mild, "Some autistic traits present; no referral needed unless they cause difficulty."),
        (Severity::Moderate, "Consider a specialist autism assessment."),
        (Severity::Severe, "Referral for a specialist diagnostic autism assessment is recommended."),
    ],
};
