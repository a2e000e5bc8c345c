//! Archetypes
//!
//! Six fixed personality archetypes, each declaring two or three trait-level
//! predicates. Levels come from mapping a 0-100 score back onto the 1-5 raw
//! scale (`score / 25 + 1`): High at 3.5 or above, Low at 2.5 or below.
//!
//! The archetype satisfying the most predicates wins; ties go to the earlier
//! declaration. `matchScore = satisfied / total`.

use crate::models::ProfileParameters;
use psyscore_common::{Trait, TraitMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Trait level on the raw 1-5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitLevel {
    Low,
    Medium,
    High,
}

impl TraitLevel {
    /// Level of a 0-100 score
    pub fn classify(score: f64, params: &ProfileParameters) -> Self {
        let raw = score / 25.0 + 1.0;
        if raw >= params.high_level_cutoff {
            TraitLevel::High
        } else if raw <= params.low_level_cutoff {
            TraitLevel::Low
        } else {
            TraitLevel::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TraitLevel::Low => "Low",
            TraitLevel::Medium => "Medium",
            TraitLevel::High => "High",
        }
    }
}

impl fmt::Display for TraitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required level for one trait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitPredicate {
    pub trait_kind: Trait,
    pub level: TraitLevel,
}

impl TraitPredicate {
    const fn new(trait_kind: Trait, level: TraitLevel) -> Self {
        Self { trait_kind, level }
    }

    pub fn is_satisfied(&self, traits: &TraitMap<f64>, params: &ProfileParameters) -> bool {
        self.is_satisfied_by(traits[self.trait_kind], params)
    }

    /// Score-point gap to the predicate's band edge (0 when met)
    pub fn gap(&self, score: f64, params: &ProfileParameters) -> f64 {
        let (low_edge, high_edge) = band_edges(params);

        match self.level {
            TraitLevel::High => (high_edge - score).max(0.0),
            TraitLevel::Low => (score - low_edge).max(0.0),
            TraitLevel::Medium if score <= low_edge => low_edge - score,
            TraitLevel::Medium if score >= high_edge => score - high_edge,
            TraitLevel::Medium => 0.0,
        }
    }

    /// Signed score change that lands inside the predicate's band (0 when met)
    ///
    /// High and Low bands include their edge, so the target is the edge.
    /// The Medium band excludes both edges; its target is the band midpoint.
    pub fn delta(&self, score: f64, params: &ProfileParameters) -> f64 {
        if self.is_satisfied_by(score, params) {
            return 0.0;
        }
        let (low_edge, high_edge) = band_edges(params);

        match self.level {
            TraitLevel::High => high_edge - score,
            TraitLevel::Low => low_edge - score,
            TraitLevel::Medium => (low_edge + high_edge) / 2.0 - score,
        }
    }

    fn is_satisfied_by(&self, score: f64, params: &ProfileParameters) -> bool {
        TraitLevel::classify(score, params) == self.level
    }
}

/// Low and High cutoffs on the 0-100 scale
fn band_edges(params: &ProfileParameters) -> (f64, f64) {
    (
        (params.low_level_cutoff - 1.0) * 25.0,
        (params.high_level_cutoff - 1.0) * 25.0,
    )
}

impl fmt::Display for TraitPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level, self.trait_kind.label())
    }
}

/// One canonical archetype
#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub predicates: &'static [TraitPredicate],
}

impl ArchetypeDefinition {
    pub fn satisfied_count(&self, traits: &TraitMap<f64>, params: &ProfileParameters) -> usize {
        self.predicates
            .iter()
            .filter(|p| p.is_satisfied(traits, params))
            .count()
    }

    pub fn match_score(&self, traits: &TraitMap<f64>, params: &ProfileParameters) -> f64 {
        if self.predicates.is_empty() {
            return 0.0;
        }
        self.satisfied_count(traits, params) as f64 / self.predicates.len() as f64
    }
}

use TraitLevel::{High, Low, Medium};

/// Canonical archetypes in declaration order
pub static ARCHETYPES: [ArchetypeDefinition; 6] = [
    ArchetypeDefinition {
        name: "Strategic Innovator",
        description: "Combines inventive thinking with the discipline to see ideas through.",
        predicates: &[
            TraitPredicate::new(Trait::Openness, High),
            TraitPredicate::new(Trait::Conscientiousness, High),
        ],
    },
    ArchetypeDefinition {
        name: "Empathetic Connector",
        description: "Draws energy from people and builds warm, trusting relationships.",
        predicates: &[
            TraitPredicate::new(Trait::Extraversion, High),
            TraitPredicate::new(Trait::Agreeableness, High),
        ],
    },
    ArchetypeDefinition {
        name: "Creative Explorer",
        description: "Chases novelty and experience, preferring spontaneity to plans.",
        predicates: &[
            TraitPredicate::new(Trait::Openness, High),
            TraitPredicate::new(Trait::Conscientiousness, Low),
            TraitPredicate::new(Trait::Extraversion, High),
        ],
    },
    ArchetypeDefinition {
        name: "Steady Guardian",
        description: "Reliable, calm and considerate; the person others lean on.",
        predicates: &[
            TraitPredicate::new(Trait::Conscientiousness, High),
            TraitPredicate::new(Trait::Neuroticism, Low),
            TraitPredicate::new(Trait::Agreeableness, High),
        ],
    },
    ArchetypeDefinition {
        name: "Dynamic Leader",
        description: "Confident and organised, comfortable taking charge under pressure.",
        predicates: &[
            TraitPredicate::new(Trait::Extraversion, High),
            TraitPredicate::new(Trait::Conscientiousness, High),
            TraitPredicate::new(Trait::Neuroticism, Low),
        ],
    },
    ArchetypeDefinition {
        name: "Reflective Thinker",
        description: "Curious and inward-looking, processing ideas deeply before sharing them.",
        predicates: &[
            TraitPredicate::new(Trait::Openness, High),
            TraitPredicate::new(Trait::Extraversion, Low),
            TraitPredicate::new(Trait::Neuroticism, Medium),
        ],
    },
];

/// Selected archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeMatch {
    pub name: String,
    pub description: String,
    /// Satisfied predicates / total predicates
    pub match_score: f64,
}

/// Find a canonical archetype by name
pub fn archetype_by_name(name: &str) -> Option<&'static ArchetypeDefinition> {
    ARCHETYPES.iter().find(|a| a.name == name)
}

/// Pick the archetype satisfying the most predicates
pub fn determine_archetype(traits: &TraitMap<f64>, params: &ProfileParameters) -> ArchetypeMatch {
    let mut best = &ARCHETYPES[0];
    let mut best_count = best.satisfied_count(traits, params);

    for archetype in ARCHETYPES.iter().skip(1) {
        let count = archetype.satisfied_count(traits, params);
        if count > best_count {
            best = archetype;
            best_count = count;
        }
    }

    let match_score = best.match_score(traits, params);
    debug!(archetype = best.name, match_score, "Archetype determined");

    ArchetypeMatch {
        name: best.name.to_string(),
        description: best.description.to_string(),
        match_score,
    }
}
