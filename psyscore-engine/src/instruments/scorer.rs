//! Instrument Scorer
//!
//! Scores any [`InstrumentDefinition`] against a response set.
//!
//! # Scoring Algorithm
//! 1. Collect answered item values by question id (last answer wins)
//! 2. Score each scale whose answered count meets its minimum:
//!    - total = Σ item points, average = total / answered
//!    - primary severity from the cutoff table, subscale severity from the
//!      item average
//! 3. Composite = primary total when covered; otherwise the best-covered
//!    subscale (highest answered fraction, first declared on ties) with
//!    `round((average − 1) / 4 × max total)`
//! 4. Primary type = covered scale with the highest item average, the
//!    primary's average first mapped onto 1-5
//! 5. Alerts: top-tier severity raises `SEVERE_<INSTRUMENT>` (HIGH); each
//!    answered critical item raises its own alert regardless of overall
//!    severity, even when the instrument itself is Unknown

use super::{
    adhd, anxiety, autism, depression, Alert, AlertLevel, ClinicalReport, InstrumentDefinition,
    InstrumentScore, Severity, Subscale, SubscaleDefinition, SubscaleScore,
};
use crate::types::ResponseRecord;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Instrument Scorer
#[derive(Debug, Clone, Copy)]
pub struct InstrumentScorer {
    definition: &'static InstrumentDefinition,
}

impl InstrumentScorer {
    pub fn new(definition: &'static InstrumentDefinition) -> Self {
        Self { definition }
    }

    /// GAD-7 anxiety scorer
    pub fn anxiety() -> Self {
        Self::new(&anxiety::ANXIETY)
    }

    /// PHQ-9 depression scorer
    pub fn depression() -> Self {
        Self::new(&depression::DEPRESSION)
    }

    /// ASRS-6 ADHD scorer
    pub fn adhd() -> Self {
        Self::new(&adhd::ADHD)
    }

    /// AQ-10 autism scorer
    pub fn autism() -> Self {
        Self::new(&autism::AUTISM)
    }

    /// Every built-in instrument
    pub fn all() -> [Self; 4] {
        [Self::anxiety(), Self::depression(), Self::adhd(), Self::autism()]
    }

    pub fn definition(&self) -> &'static InstrumentDefinition {
        self.definition
    }

    /// Whether any item of this instrument appears among the responses
    pub fn has_any_item(&self, responses: &[ResponseRecord]) -> bool {
        let answers = collect_answers(responses);
        self.definition
            .all_scales()
            .any(|scale| scale.item_ids().any(|id| answers.contains_key(id.as_str())))
    }

    /// Score the instrument
    pub fn score(&self, responses: &[ResponseRecord]) -> InstrumentScore {
        let def = self.definition;
        let answers = collect_answers(responses);

        let primary = score_scale(&def.primary, &answers, |total, _| def.severity_for(total));
        let subscales: Vec<SubscaleScore> = def
            .subscales
            .iter()
            .map(|scale| score_scale(scale, &answers, |_, avg| Severity::from_subscale_average(avg)))
            .collect();

        let (composite, composite_source) = self.composite(&primary, &subscales);
        let severity = composite.map_or(Severity::Unknown, |c| def.severity_for(c));
        let primary_type = self.primary_type(&primary, &subscales);

        let alerts = self.alerts(severity, &answers);

        debug!(
            instrument = def.id,
            composite = ?composite,
            severity = %severity,
            alerts = alerts.len(),
            "Instrument scored"
        );

        InstrumentScore {
            instrument: def.id.to_string(),
            primary,
            subscales,
            composite,
            composite_source,
            max_total: def.max_total(),
            severity,
            primary_type,
            alerts,
        }
    }

    /// Score the instrument and render the clinical report
    pub fn report(&self, responses: &[ResponseRecord]) -> ClinicalReport {
        let scores = self.score(responses);
        let summary = self.summary(&scores);
        let recommendations = self.recommendations(&scores);

        for alert in scores.alerts.iter().filter(|a| a.severity == AlertLevel::Critical) {
            warn!(instrument = self.definition.id, alert = %alert.alert_type, "Critical clinical alert");
        }

        ClinicalReport {
            instrument: self.definition.id.to_string(),
            alerts: scores.alerts.clone(),
            scores,
            summary,
            recommendations,
        }
    }

    fn composite(&self, primary: &SubscaleScore, subscales: &[SubscaleScore]) -> (Option<f64>, Option<Subscale>) {
        if let Some(total) = primary.total {
            return (Some(total), Some(primary.id));
        }

        // max_by would keep the last of equal candidates
        let mut best: Option<&SubscaleScore> = None;
        for scale in subscales.iter().filter(|s| s.is_covered()) {
            if best.map_or(true, |b| scale.answered_fraction() > b.answered_fraction()) {
                best = Some(scale);
            }
        }

        match best.and_then(|b| b.average.map(|avg| (b, avg))) {
            Some((scale, average)) => {
                let composite = ((average - 1.0) / 4.0 * self.definition.max_total()).round();
                (Some(composite), Some(scale.id))
            }
            None => (None, None),
        }
    }

    fn primary_type(&self, primary: &SubscaleScore, subscales: &[SubscaleScore]) -> Option<String> {
        let scoring = self.definition.primary.scoring;
        let mut best: Option<(&SubscaleScore, f64)> = None;

        let candidates = std::iter::once((primary, primary.average.map(|a| scoring.to_likert_range(a))))
            .chain(subscales.iter().map(|s| (s, s.average)));
        for (scale, average) in candidates {
            let Some(average) = average else {
                continue;
            };
            if best.map_or(true, |(_, b)| average > b) {
                best = Some((scale, average));
            }
        }

        best.map(|(scale, _)| scale.name.clone())
    }

    fn alerts(&self, severity: Severity, answers: &BTreeMap<&str, f64>) -> Vec<Alert> {
        let def = self.definition;
        let mut alerts = Vec::new();

        if severity.is_known() && severity == def.top_severity() {
            alerts.push(Alert {
                alert_type: def.severe_alert_code(),
                severity: AlertLevel::High,
                message: format!("{} symptoms are in the {} range", def.name, severity),
                item: None,
            });
        }

        for critical in def.critical_items {
            let item_id = critical.item_id();
            if let Some(&value) = answers.get(item_id.as_str()) {
                if critical.trigger.fires(value) {
                    alerts.push(Alert {
                        alert_type: critical.alert_type.to_string(),
                        severity: critical.level,
                        message: critical.message.to_string(),
                        item: Some(item_id),
                    });
                }
            }
        }

        alerts
    }

    fn summary(&self, scores: &InstrumentScore) -> String {
        let def = self.definition;
        let Some(composite) = scores.composite else {
            return format!(
                "{}: insufficient data to score ({} of {} {} items answered, {} required)",
                def.name,
                scores.primary.answered,
                def.primary.item_count,
                def.primary.name,
                def.primary.min_answered
            );
        };

        let basis = if scores.primary.is_covered() {
            format!("{} total {:.0}/{:.0}", def.primary.name, composite, def.max_total())
        } else {
            let source = scores
                .subscales
                .iter()
                .find(|s| Some(s.id) == scores.composite_source)
                .map_or("subscales", |s| s.name.as_str());
            format!("estimated {:.0}/{:.0} from {}", composite, def.max_total(), source)
        };

        match &scores.primary_type {
            Some(kind) => format!(
                "{}: {}, {} severity; most prominent: {}",
                def.name, basis, scores.severity, kind
            ),
            None => format!("{}: {}, {} severity", def.name, basis, scores.severity),
        }
    }

    fn recommendations(&self, scores: &InstrumentScore) -> Vec<String> {
        if !scores.severity.is_known() {
            return Vec::new();
        }

        let mut recommendations: Vec<String> = self
            .definition
            .recommendation_for(scores.severity)
            .map(str::to_string)
            .into_iter()
            .collect();

        for (definition, score) in self.definition.subscales.iter().zip(&scores.subscales) {
            if score.severity.is_elevated() {
                recommendations.push(definition.recommendation.to_string());
            }
        }

        recommendations
    }
}

/// Answered values keyed by question id
fn collect_answers(responses: &[ResponseRecord]) -> BTreeMap<&str, f64> {
    responses
        .iter()
        .filter_map(|r| {
            r.value
                .filter(|v| v.is_finite())
                .map(|v| (r.question_id.as_str(), v))
        })
        .collect()
}

fn score_scale(
    scale: &SubscaleDefinition,
    answers: &BTreeMap<&str, f64>,
    severity: impl Fn(f64, f64) -> Severity,
) -> SubscaleScore {
    let points: Vec<f64> = (1..=scale.item_count)
        .filter_map(|n| {
            answers
                .get(scale.item_id(n).as_str())
                .map(|&v| scale.scoring.points(n, v))
        })
        .collect();

    let answered = points.len();
    let (total, average, severity) = if answered >= scale.min_answered && answered > 0 {
        let total: f64 = points.iter().sum();
        let average = total / answered as f64;
        (Some(total), Some(average), severity(total, average))
    } else {
        (None, None, Severity::Unknown)
    };

    SubscaleScore {
        id: scale.id,
        name: scale.name.to_string(),
        answered,
        item_count: scale.item_count,
        total,
        average,
        severity,
    }
}
