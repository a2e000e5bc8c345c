//! Composite Profile Builder
//!
//! Synthesizes the final Big Five profile from the Likert, gamified and
//! behavioral channels.
//!
//! # Pipeline
//! 1. Likert trait scores (neutral 50 for unseen traits)
//! 2. Channel blend for openness, conscientiousness and neuroticism
//! 3. Confidence from coverage and channel breadth
//! 4. Archetype by predicate count
//! 5. Rarity heuristic
//!
//! # Example
//! ```rust,ignore
//! use psyscore_engine::profile::CompositeProfileBuilder;
//!
//! let profile = CompositeProfileBuilder::new()
//!     .with_gamified(metrics)
//!     .build(&responses, 40);
//! println!("{} ({:.0}% match)", profile.archetype.name, profile.archetype.match_score * 100.0);
//! ```

use super::archetype::{determine_archetype, ArchetypeMatch, TraitLevel};
use super::traits::{calculate_confidence, calculate_rarity, calculate_traits, integrate_assessment_data};
use crate::models::{BehavioralTelemetry, GamifiedMetrics, ProfileParameters};
use crate::types::ResponseRecord;
use psyscore_common::TraitMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Final blended profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeProfile {
    /// Blended trait scores (0-100)
    pub traits: TraitMap<f64>,
    /// Likert-only trait scores before blending
    pub likert_traits: TraitMap<f64>,
    pub levels: TraitMap<TraitLevel>,
    /// Profile confidence (0.0-1.0)
    pub confidence: f64,
    pub archetype: ArchetypeMatch,
    /// Rarity percentage (1-100, heuristic)
    pub rarity: f64,
}

/// Composite Profile Builder
#[derive(Debug, Clone, Default)]
pub struct CompositeProfileBuilder {
    params: ProfileParameters,
    gamified: Option<GamifiedMetrics>,
    behavioral: Option<BehavioralTelemetry>,
}

impl CompositeProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(mut self, params: ProfileParameters) -> Self {
        self.params = params;
        self
    }

    pub fn with_gamified(mut self, metrics: GamifiedMetrics) -> Self {
        self.gamified = Some(metrics);
        self
    }

    pub fn with_behavioral(mut self, telemetry: BehavioralTelemetry) -> Self {
        self.behavioral = Some(telemetry);
        self
    }

    pub fn parameters(&self) -> &ProfileParameters {
        &self.params
    }

    /// Build the profile from a response set
    pub fn build(&self, responses: &[ResponseRecord], expected_total: usize) -> CompositeProfile {
        let likert_traits = calculate_traits(responses);
        let traits = integrate_assessment_data(
            &likert_traits,
            self.gamified.as_ref(),
            self.behavioral.as_ref(),
            &self.params.channel_weights,
        );
        self.finish(
            traits,
            likert_traits,
            calculate_confidence(responses, expected_total, self.gamified.as_ref(), self.behavioral.as_ref()),
        )
    }

    /// Build a profile from already computed trait scores
    pub fn from_traits(&self, traits: TraitMap<f64>, confidence: f64) -> CompositeProfile {
        let traits = traits.map(|_, &v| if v.is_finite() { v.clamp(0.0, 100.0) } else { 50.0 });
        self.finish(traits, traits, confidence.clamp(0.0, 1.0))
    }

    fn finish(&self, traits: TraitMap<f64>, likert_traits: TraitMap<f64>, confidence: f64) -> CompositeProfile {
        let archetype = determine_archetype(&traits, &self.params);
        let rarity = calculate_rarity(&traits, self.params.rarity_floor);
        let levels = traits.map(|_, &v| TraitLevel::classify(v, &self.params));

        debug!(
            archetype = %archetype.name,
            confidence,
            rarity,
            "Composite profile built"
        );

        CompositeProfile {
            traits,
            likert_traits,
            levels,
            confidence,
            archetype,
            rarity,
        }
    }
}
