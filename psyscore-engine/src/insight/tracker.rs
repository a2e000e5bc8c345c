//! Insight Tracker
//!
//! Session-scoped recorder of trait contributions. One tracker belongs to one
//! assessment; it is filled while responses are processed and then read once
//! through [`InsightTracker::derivation`].
//!
//! # Answer Confidence
//! - Start with 1.0
//! - Response faster than 1000 ms: ×0.7
//! - Response slower than 30000 ms: ×0.8
//! - × supplied consistency score
//! - Pattern flag attached: ×0.6
//! - Clamp to 0.3-1.0

use super::confidence::{compute_breakdown, ConfidenceBreakdown};
use super::{AnswerContext, ArchetypeInfluence, InfluenceLevel, TraitContribution, TraitImpactAggregate};
use crate::models::InsightParameters;
use crate::types::{ResponseRecord, NEUTRAL_LIKERT};
use psyscore_common::{Trait, TraitMap};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, trace};

const MAX_IMPACT: f64 = 100.0;

/// Serialisable snapshot of everything the tracker recorded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightDerivation {
    /// All contributions in recording order
    pub contributions: Vec<TraitContribution>,
    pub aggregates: TraitMap<TraitImpactAggregate>,
    /// Contributions whose |impact| exceeded the critical threshold
    pub critical_answers: Vec<TraitContribution>,
    /// Top traits shaping the archetype
    pub archetype_influence: Vec<ArchetypeInfluence>,
    pub confidence: ConfidenceBreakdown,
}

impl InsightDerivation {
    /// Critical answers ordered by |impact|, strongest first
    pub fn top_critical_answers(&self, n: usize) -> Vec<&TraitContribution> {
        let mut ranked: Vec<&TraitContribution> = self.critical_answers.iter().collect();
        ranked.sort_by(|a, b| b.impact.abs().partial_cmp(&a.impact.abs()).unwrap_or(Ordering::Equal));
        ranked.truncate(n);
        ranked
    }
}

/// Insight Tracker
#[derive(Debug, Clone)]
pub struct InsightTracker {
    params: InsightParameters,
    contributions: Vec<TraitContribution>,
    aggregates: TraitMap<TraitImpactAggregate>,
    critical_answers: Vec<TraitContribution>,
    archetype_influence: Vec<ArchetypeInfluence>,
}

impl InsightTracker {
    pub fn new() -> Self {
        Self::with_parameters(InsightParameters::default())
    }

    pub fn with_parameters(params: InsightParameters) -> Self {
        Self {
            params,
            contributions: Vec::new(),
            aggregates: TraitMap::default(),
            critical_answers: Vec::new(),
            archetype_influence: Vec::new(),
        }
    }

    /// Record one answer's impact on a trait
    ///
    /// Impact is clamped to -100..100. Returns the answer confidence.
    pub fn record_answer_impact(
        &mut self,
        question_id: &str,
        answer: Option<f64>,
        trait_kind: Trait,
        impact: f64,
        reasoning: impl Into<String>,
        context: &AnswerContext,
    ) -> f64 {
        let impact = if impact.is_finite() {
            impact.clamp(-MAX_IMPACT, MAX_IMPACT)
        } else {
            0.0
        };
        let confidence = self.answer_confidence(context);

        let contribution = TraitContribution {
            question_id: question_id.to_string(),
            answer,
            trait_kind,
            impact,
            weight: context.weight,
            confidence,
            reasoning: reasoning.into(),
            response_time: context.response_time,
        };

        if impact.abs() > self.params.critical_impact_threshold {
            trace!(question_id, impact, "Critical answer recorded");
            self.critical_answers.push(contribution.clone());
        }

        self.aggregates[trait_kind].push(contribution.clone());
        self.contributions.push(contribution);
        confidence
    }

    /// Record every Likert response with impact (value − 3) × 10
    pub fn record_likert_responses(&mut self, responses: &[ResponseRecord]) -> usize {
        let mut recorded = 0;
        for response in responses.iter().filter(|r| r.is_likert()) {
            let Some(trait_kind) = response.trait_kind() else {
                continue;
            };
            let value = response.likert_value_or_neutral();
            let impact = (value - NEUTRAL_LIKERT) * 10.0;
            let context = AnswerContext {
                response_time: response.response_time,
                ..AnswerContext::default()
            };
            self.record_answer_impact(
                &response.question_id,
                response.likert_value(),
                trait_kind,
                impact,
                likert_reasoning(trait_kind, value, impact),
                &context,
            );
            recorded += 1;
        }

        debug!(recorded, total = responses.len(), "Likert responses recorded");
        recorded
    }

    /// Store the three traits deviating furthest from neutral
    pub fn record_archetype_influence(&mut self, traits: &TraitMap<f64>) -> &[ArchetypeInfluence] {
        let mut influence: Vec<ArchetypeInfluence> = traits
            .iter()
            .map(|(t, &score)| ArchetypeInfluence {
                trait_kind: t,
                score,
                deviation: score - 50.0,
                influence: InfluenceLevel::from_deviation(score - 50.0),
            })
            .collect();

        // Stable sort keeps canonical trait order among equal deviations
        influence.sort_by(|a, b| {
            b.deviation
                .abs()
                .partial_cmp(&a.deviation.abs())
                .unwrap_or(Ordering::Equal)
        });
        influence.truncate(3);

        self.archetype_influence = influence;
        &self.archetype_influence
    }

    pub fn generate_confidence_breakdown(&self) -> ConfidenceBreakdown {
        compute_breakdown(&self.aggregates, &self.contributions, &self.params)
    }

    pub fn contributions(&self) -> &[TraitContribution] {
        &self.contributions
    }

    pub fn aggregate(&self, trait_kind: Trait) -> &TraitImpactAggregate {
        &self.aggregates[trait_kind]
    }

    pub fn critical_answers(&self) -> &[TraitContribution] {
        &self.critical_answers
    }

    /// Snapshot for the explanation engine
    pub fn derivation(&self) -> InsightDerivation {
        InsightDerivation {
            contributions: self.contributions.clone(),
            aggregates: self.aggregates.clone(),
            critical_answers: self.critical_answers.clone(),
            archetype_influence: self.archetype_influence.clone(),
            confidence: self.generate_confidence_breakdown(),
        }
    }

    fn answer_confidence(&self, context: &AnswerContext) -> f64 {
        let mut confidence = 1.0_f64;

        if let Some(ms) = context.response_time {
            if ms < self.params.fast_response_ms {
                confidence *= 0.7;
            } else if ms > self.params.slow_response_ms {
                confidence *= 0.8;
            }
        }
        if let Some(consistency) = context.consistency_score.filter(|c| c.is_finite()) {
            confidence *= consistency.clamp(0.0, 1.0);
        }
        if context.pattern_flag.is_some() {
            confidence *= self.params.pattern_flag_penalty;
        }

        confidence.clamp(0.3, 1.0)
    }
}

impl Default for InsightTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn likert_reasoning(trait_kind: Trait, value: f64, impact: f64) -> String {
    let stance = match value.round() as i64 {
        5 => "Strong agreement",
        4 => "Agreement",
        3 => "A neutral answer",
        2 => "Disagreement",
        _ => "Strong disagreement",
    };
    if impact > 0.0 {
        format!("{} ({:.0}/5) raised {} by {:.0} points", stance, value, trait_kind.label(), impact)
    } else if impact < 0.0 {
        format!("{} ({:.0}/5) lowered {} by {:.0} points", stance, value, trait_kind.label(), -impact)
    } else {
        format!("{} ({:.0}/5) left {} unchanged", stance, value, trait_kind.label())
    }
}
