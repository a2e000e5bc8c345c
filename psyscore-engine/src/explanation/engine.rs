//! Explanation Engine
//!
//! Renders the reasoning behind a profile from the insight derivation, the
//! final trait scores and the chosen archetype. Purely derivative: it never
//! rescores anything.
//!
//! # Chain
//! 1. **Summary** from the three strongest critical answers
//! 2. **Trait reasoning**: (trait × level) template plus an answer-pattern
//!    descriptor (consistent_high, consistent_low, moderate, nuanced)
//! 3. **Archetype reasoning**: primary factors and trait-interaction synergies
//! 4. **Alternatives**: other archetypes matching above 0.7, best two
//! 5. **Key takeaways**: strongest trait, most distinctive trait, archetype
//!    fit, balance
//!
//! # Alternative Match Score
//! Mean over an archetype's predicates of: 1.0 when satisfied, otherwise
//! `max(0, 1 − distance / 25)` with distance the score gap to the band.

use super::templates::{render, trait_template, NarrativeLevel};
use crate::insight::{InfluenceLevel, InsightDerivation, TraitImpactAggregate};
use crate::models::ProfileParameters;
use crate::profile::{ArchetypeMatch, TraitLevel, ARCHETYPES};
use crate::types::{mean, population_variance};
use psyscore_common::{Trait, TraitMap};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

const ALTERNATIVE_THRESHOLD: f64 = 0.7;
const MAX_ALTERNATIVES: usize = 2;
const PREDICATE_FALLOFF: f64 = 25.0;

/// Shape of a trait's answer impacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternDescriptor {
    ConsistentHigh,
    ConsistentLow,
    Moderate,
    Nuanced,
    None,
}

impl PatternDescriptor {
    /// Classify contribution impacts
    pub fn classify(impacts: &[f64]) -> Self {
        if impacts.is_empty() {
            PatternDescriptor::None
        } else if impacts.iter().all(|&i| i > 0.0) {
            PatternDescriptor::ConsistentHigh
        } else if impacts.iter().all(|&i| i < 0.0) {
            PatternDescriptor::ConsistentLow
        } else if population_variance(impacts) < 20.0 {
            PatternDescriptor::Moderate
        } else {
            PatternDescriptor::Nuanced
        }
    }

    fn sentence(&self) -> Option<&'static str> {
        match self {
            PatternDescriptor::ConsistentHigh => Some("Every related answer pushed this score upward."),
            PatternDescriptor::ConsistentLow => Some("Every related answer pushed this score downward."),
            PatternDescriptor::Moderate => Some("Your related answers stayed close to the middle of the scale."),
            PatternDescriptor::Nuanced => {
                Some("Your related answers pulled in different directions, suggesting this trait depends on context.")
            }
            PatternDescriptor::None => None,
        }
    }
}

/// Reasoning for one trait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitExplanation {
    #[serde(rename = "trait")]
    pub trait_kind: Trait,
    pub score: f64,
    pub level: NarrativeLevel,
    pub pattern: PatternDescriptor,
    pub contribution_count: usize,
    pub reasoning: String,
}

/// A synergy between two trait levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitInteraction {
    /// e.g. `high_openness+high_conscientiousness`
    pub combination: String,
    pub description: String,
}

/// Why the archetype was chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeReasoning {
    pub archetype: String,
    pub match_score: f64,
    pub primary_factors: Vec<String>,
    pub interactions: Vec<TraitInteraction>,
    pub narrative: String,
}

/// An unmet predicate of an alternative archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingFactor {
    #[serde(rename = "trait")]
    pub trait_kind: Trait,
    pub required: TraitLevel,
    pub score: f64,
    /// Signed score change needed to meet the predicate
    pub delta: f64,
}

/// A close runner-up archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeArchetype {
    pub name: String,
    pub match_score: f64,
    pub missing_factors: Vec<MissingFactor>,
}

/// Complete explanation chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationChain {
    pub summary: String,
    pub trait_explanations: Vec<TraitExplanation>,
    pub archetype_reasoning: ArchetypeReasoning,
    pub alternatives: Vec<AlternativeArchetype>,
    pub key_takeaways: Vec<String>,
}

#[derive(Clone, Copy)]
enum Side {
    High,
    Low,
}

struct Interaction {
    first: (Side, Trait),
    second: (Side, Trait),
    description: &'static str,
}

const INTERACTIONS: [Interaction; 8] = [
    Interaction {
        first: (Side::High, Trait::Openness),
        second: (Side::High, Trait::Conscientiousness),
        description: "Imagination paired with discipline lets you turn ideas into finished work.",
    },
    Interaction {
        first: (Side::High, Trait::Openness),
        second: (Side::High, Trait::Extraversion),
        description: "Curiosity and sociability make you a natural at sharing and spreading new ideas.",
    },
    Interaction {
        first: (Side::High, Trait::Extraversion),
        second: (Side::High, Trait::Agreeableness),
        description: "Warmth combined with social energy draws people to you and builds strong networks.",
    },
    Interaction {
        first: (Side::High, Trait::Conscientiousness),
        second: (Side::Low, Trait::Neuroticism),
        description: "Organisation backed by emotional steadiness keeps you dependable under pressure.",
    },
    Interaction {
        first: (Side::High, Trait::Openness),
        second: (Side::Low, Trait::Conscientiousness),
        description: "Free-ranging curiosity without rigid structure favours exploration over routine.",
    },
    Interaction {
        first: (Side::Low, Trait::Extraversion),
        second: (Side::High, Trait::Openness),
        description: "A rich inner world lets you explore ideas deeply and independently.",
    },
    Interaction {
        first: (Side::High, Trait::Neuroticism),
        second: (Side::High, Trait::Conscientiousness),
        description: "Worry channelled into diligence can drive thorough, careful work, at some cost to ease.",
    },
    Interaction {
        first: (Side::High, Trait::Agreeableness),
        second: (Side::Low, Trait::Neuroticism),
        description: "Kindness paired with calm makes you a steadying presence for others.",
    },
];

impl Side {
    fn holds(&self, score: f64) -> bool {
        match self {
            Side::High => NarrativeLevel::of(score) == NarrativeLevel::High,
            Side::Low => NarrativeLevel::of(score) == NarrativeLevel::Low,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Side::High => "high",
            Side::Low => "low",
        }
    }
}

impl Interaction {
    fn applies(&self, traits: &TraitMap<f64>) -> bool {
        let (side_a, a) = self.first;
        let (side_b, b) = self.second;
        side_a.holds(traits[a]) && side_b.holds(traits[b])
    }

    fn combination(&self) -> String {
        let (side_a, a) = self.first;
        let (side_b, b) = self.second;
        format!("{}_{}+{}_{}", side_a.prefix(), a.as_str(), side_b.prefix(), b.as_str())
    }
}

/// Explanation Engine
#[derive(Debug, Clone, Default)]
pub struct ExplanationEngine {
    params: ProfileParameters,
}

impl ExplanationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(params: ProfileParameters) -> Self {
        Self { params }
    }

    /// Build the full explanation chain
    pub fn generate_complete_explanation(
        &self,
        insights: &InsightDerivation,
        traits: &TraitMap<f64>,
        archetype: &ArchetypeMatch,
    ) -> ExplanationChain {
        let chain = ExplanationChain {
            summary: self.summary(insights, archetype),
            trait_explanations: Trait::ALL
                .iter()
                .map(|&t| self.explain_trait(t, traits[t], &insights.aggregates[t]))
                .collect(),
            archetype_reasoning: self.archetype_reasoning(insights, traits, archetype),
            alternatives: self.alternatives(traits, archetype),
            key_takeaways: self.key_takeaways(traits, archetype),
        };

        debug!(
            archetype = %archetype.name,
            alternatives = chain.alternatives.len(),
            takeaways = chain.key_takeaways.len(),
            "Explanation generated"
        );
        chain
    }

    fn summary(&self, insights: &InsightDerivation, archetype: &ArchetypeMatch) -> String {
        let top = insights.top_critical_answers(3);
        if top.is_empty() {
            return format!(
                "Your {} profile reflects a broad, even pattern of answers with no single decisive response.",
                archetype.name
            );
        }

        let reasons: Vec<&str> = top.iter().map(|c| c.reasoning.as_str()).collect();
        format!(
            "Your {} profile is shaped most by these answers: {}.",
            archetype.name,
            reasons.join("; ")
        )
    }

    /// Reasoning for one trait
    pub fn explain_trait(&self, t: Trait, score: f64, aggregate: &TraitImpactAggregate) -> TraitExplanation {
        let level = NarrativeLevel::of(score);
        let pattern = PatternDescriptor::classify(&aggregate.impacts());
        let score_text = format!("{:.0}", score);
        let count_text = aggregate.contributions.len().to_string();

        let mut reasoning = render(
            trait_template(t, level),
            &[("trait", t.label()), ("score", score_text.as_str()), ("count", count_text.as_str())],
        );
        if let Some(sentence) = pattern.sentence() {
            reasoning.push(' ');
            reasoning.push_str(sentence);
        }

        TraitExplanation {
            trait_kind: t,
            score,
            level,
            pattern,
            contribution_count: aggregate.contributions.len(),
            reasoning,
        }
    }

    fn archetype_reasoning(
        &self,
        insights: &InsightDerivation,
        traits: &TraitMap<f64>,
        archetype: &ArchetypeMatch,
    ) -> ArchetypeReasoning {
        let primary_factors: Vec<String> = if insights.archetype_influence.is_empty() {
            top_deviations(traits)
                .into_iter()
                .map(|(t, score)| factor_label(t, score))
                .collect()
        } else {
            insights
                .archetype_influence
                .iter()
                .map(|i| factor_label(i.trait_kind, i.score))
                .collect()
        };

        let interactions: Vec<TraitInteraction> = INTERACTIONS
            .iter()
            .filter(|i| i.applies(traits))
            .map(|i| TraitInteraction {
                combination: i.combination(),
                description: i.description.to_string(),
            })
            .collect();

        let mut narrative = format!(
            "You were matched to {} ({:.0}% of its defining traits) mainly through {}.",
            archetype.name,
            archetype.match_score * 100.0,
            primary_factors.join(", ")
        );
        if let Some(first) = interactions.first() {
            narrative.push(' ');
            narrative.push_str(&first.description);
        }

        ArchetypeReasoning {
            archetype: archetype.name.clone(),
            match_score: archetype.match_score,
            primary_factors,
            interactions,
            narrative,
        }
    }

    /// Other canonical archetypes matching above the threshold, best first
    pub fn alternatives(&self, traits: &TraitMap<f64>, chosen: &ArchetypeMatch) -> Vec<AlternativeArchetype> {
        let mut alternatives: Vec<AlternativeArchetype> = ARCHETYPES
            .iter()
            .filter(|a| a.name != chosen.name)
            .filter_map(|archetype| {
                let mut credit = 0.0;
                let mut missing_factors = Vec::new();

                for predicate in archetype.predicates {
                    let score = traits[predicate.trait_kind];
                    if predicate.is_satisfied(traits, &self.params) {
                        credit += 1.0;
                    } else {
                        let gap = predicate.gap(score, &self.params);
                        credit += (1.0 - gap / PREDICATE_FALLOFF).max(0.0);
                        missing_factors.push(MissingFactor {
                            trait_kind: predicate.trait_kind,
                            required: predicate.level,
                            score,
                            delta: predicate.delta(score, &self.params),
                        });
                    }
                }

                let match_score = credit / archetype.predicates.len().max(1) as f64;
                (match_score > ALTERNATIVE_THRESHOLD).then(|| AlternativeArchetype {
                    name: archetype.name.to_string(),
                    match_score,
                    missing_factors,
                })
            })
            .collect();

        alternatives.sort_by(|a, b| b.match_score.partial_cmp(&a.match_score).unwrap_or(Ordering::Equal));
        alternatives.truncate(MAX_ALTERNATIVES);
        alternatives
    }

    fn key_takeaways(&self, traits: &TraitMap<f64>, archetype: &ArchetypeMatch) -> Vec<String> {
        let mut takeaways = Vec::new();

        if let Some((t, score)) = strongest(traits) {
            takeaways.push(format!("Your strongest trait is {} ({:.0}).", t.label(), score));
        }

        let distinctive = traits
            .iter()
            .filter(|(_, &s)| s > 70.0 || s < 30.0)
            .fold(None::<(Trait, f64)>, |best, (t, &s)| match best {
                Some((_, b)) if (b - 50.0).abs() >= (s - 50.0).abs() => best,
                _ => Some((t, s)),
            });
        if let Some((t, score)) = distinctive {
            let direction = if score > 50.0 { "higher" } else { "lower" };
            takeaways.push(format!(
                "Your most distinctive trait is {}: at {:.0} it is markedly {} than typical.",
                t.label(),
                score,
                direction
            ));
        }

        let pct = archetype.match_score * 100.0;
        takeaways.push(if archetype.match_score >= 1.0 {
            format!("You match every defining trait of the {} archetype.", archetype.name)
        } else if archetype.match_score >= 0.5 {
            format!("You share most defining traits of the {} archetype ({:.0}% match).", archetype.name, pct)
        } else {
            format!("Your profile only loosely resembles the {} archetype ({:.0}% match).", archetype.name, pct)
        });

        let scores: Vec<f64> = traits.iter().map(|(_, &s)| s).collect();
        let variance = population_variance(&scores);
        if variance < 15.0 {
            takeaways.push("Your traits are closely balanced, with no single dimension dominating.".to_string());
        } else if variance > 25.0 {
            takeaways.push(format!(
                "Your profile shows clear contrasts between dimensions around an average of {:.0}.",
                mean(&scores)
            ));
        }

        takeaways
    }
}

fn factor_label(t: Trait, score: f64) -> String {
    format!("{} {} ({:.0})", InfluenceLevel::from_deviation(score - 50.0), t.label(), score)
}

/// Three traits furthest from neutral, canonical order on ties
fn top_deviations(traits: &TraitMap<f64>) -> Vec<(Trait, f64)> {
    let mut ranked: Vec<(Trait, f64)> = traits.iter().map(|(t, &s)| (t, s)).collect();
    ranked.sort_by(|a, b| {
        (b.1 - 50.0)
            .abs()
            .partial_cmp(&(a.1 - 50.0).abs())
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(3);
    ranked
}

/// Highest-scoring trait, first in canonical order on ties
fn strongest(traits: &TraitMap<f64>) -> Option<(Trait, f64)> {
    traits.iter().fold(None, |best, (t, &s)| match best {
        Some((_, b)) if b >= s => best,
        _ => Some((t, s)),
    })
}
