//! Trait scoring and channel blending
//!
//! # Likert channel
//! Each Likert answer is normalised to `((raw − 1) / 4) × 100`; a trait's
//! score is the running average of its normalised answers. Traits with no
//! answers stay at the neutral prior of 50.
//!
//! # Channel blend
//! | Trait | Likert (0.40) | Gamified (0.35) | Behavioral (0.25) |
//! |---|---|---|---|
//! | Openness | score | learning rate | engagement |
//! | Conscientiousness | score | consistency | precision |
//! | Neuroticism | score | 1 − consistency | anxiety |
//!
//! Extraversion and agreeableness keep their Likert score. Absent channels
//! drop out and the remaining weights are renormalised.

use crate::models::{BehavioralTelemetry, ChannelWeights, GamifiedMetrics, PatternScore};
use crate::types::{ResponseRecord, TaskType, NEUTRAL_LIKERT};
use psyscore_common::{Trait, TraitMap};
use tracing::debug;

/// Neutral prior for traits without data
pub const NEUTRAL_TRAIT_SCORE: f64 = 50.0;

/// Normalise a 1-5 Likert value onto 0-100
pub fn normalize_likert(raw: f64) -> f64 {
    ((raw - 1.0) / 4.0 * 100.0).clamp(0.0, 100.0)
}

/// Likert-only trait scores
pub fn calculate_traits(responses: &[ResponseRecord]) -> TraitMap<f64> {
    let mut sums: TraitMap<(f64, usize)> = TraitMap::default();

    for response in responses.iter().filter(|r| r.is_likert()) {
        if let Some(t) = response.trait_kind() {
            let value = response.likert_value().unwrap_or(NEUTRAL_LIKERT);
            let (sum, count) = &mut sums[t];
            *sum += normalize_likert(value);
            *count += 1;
        }
    }

    sums.map(|_, &(sum, count)| {
        if count == 0 {
            NEUTRAL_TRAIT_SCORE
        } else {
            (sum / count as f64).clamp(0.0, 100.0)
        }
    })
}

/// Blend Likert scores with gamified and behavioral proxies
pub fn integrate_assessment_data(
    traits: &TraitMap<f64>,
    gamified: Option<&GamifiedMetrics>,
    behavioral: Option<&BehavioralTelemetry>,
    weights: &ChannelWeights,
) -> TraitMap<f64> {
    let unit = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
    let pattern = |select: fn(&BehavioralTelemetry) -> Option<PatternScore>| {
        behavioral.and_then(select).map(|p| p.clamped() * 100.0)
    };

    traits.map(|t, &likert| {
        let (game, behavior) = match t {
            Trait::Openness => (
                gamified.map(|g| unit(g.learning_rate) * 100.0),
                pattern(|b| b.patterns.engagement),
            ),
            Trait::Conscientiousness => (
                gamified.map(|g| unit(g.consistency) * 100.0),
                pattern(|b| b.patterns.precision),
            ),
            Trait::Neuroticism => (
                gamified.map(|g| (1.0 - unit(g.consistency)) * 100.0),
                pattern(|b| b.patterns.anxiety),
            ),
            Trait::Extraversion | Trait::Agreeableness => return likert,
        };

        let blended = blend(likert, game, behavior, weights);
        if blended != likert {
            debug!(trait_name = t.as_str(), likert, blended, "Trait blended across channels");
        }
        blended
    })
}

fn blend(likert: f64, gamified: Option<f64>, behavioral: Option<f64>, weights: &ChannelWeights) -> f64 {
    if gamified.is_none() && behavioral.is_none() {
        return likert;
    }

    let mut sum = likert * weights.traditional;
    let mut weight_sum = weights.traditional;
    for (score, weight) in [(gamified, weights.gamified), (behavioral, weights.behavioral)] {
        if let Some(score) = score {
            sum += score * weight;
            weight_sum += weight;
        }
    }

    if weight_sum > 0.0 {
        (sum / weight_sum).clamp(0.0, 100.0)
    } else {
        likert
    }
}

/// Profile confidence from coverage and channel breadth
///
/// `(answered / expected) × 0.5`, +0.25 when any gamified or behavioral input
/// is present, +0.25 when behavioral telemetry recorded any duration.
pub fn calculate_confidence(
    responses: &[ResponseRecord],
    expected_total: usize,
    gamified: Option<&GamifiedMetrics>,
    behavioral: Option<&BehavioralTelemetry>,
) -> f64 {
    let answered = responses.iter().filter(|r| r.is_answered()).count();
    let total = if expected_total > 0 {
        expected_total
    } else {
        responses.len()
    };

    let mut confidence = if total > 0 {
        (answered as f64 / total as f64).min(1.0) * 0.5
    } else {
        0.0
    };

    let non_likert = gamified.is_some()
        || responses
            .iter()
            .any(|r| matches!(r.task_type, TaskType::Gamified | TaskType::Behavioral));
    if non_likert {
        confidence += 0.25;
    }
    if behavioral.is_some_and(|b| b.has_duration()) {
        confidence += 0.25;
    }

    confidence.clamp(0.0, 1.0)
}

/// Rarity of a trait combination, as a bounded percentage
///
/// Starts at 100; each trait above 80 or below 20 multiplies by 0.7, each
/// other trait above 70 or below 30 by 0.85. Floored at `floor`.
pub fn calculate_rarity(traits: &TraitMap<f64>, floor: f64) -> f64 {
    let rarity = traits.iter().fold(100.0_f64, |rarity, (_, &score)| {
        if score > 80.0 || score < 20.0 {
            rarity * 0.7
        } else if score > 70.0 || score < 30.0 {
            rarity * 0.85
        } else {
            rarity
        }
    });
    rarity.max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BehavioralPatterns, TelemetryMetrics};

    fn behavioral(engagement: f64, precision: f64, anxiety: f64) -> BehavioralTelemetry {
        BehavioralTelemetry {
            metrics: TelemetryMetrics {
                total_duration: 60000.0,
                ..Default::default()
            },
            patterns: BehavioralPatterns {
                engagement: Some(PatternScore { score: engagement }),
                precision: Some(PatternScore { score: precision }),
                anxiety: Some(PatternScore { score: anxiety }),
                ..Default::default()
            },
        }
    }

    fn gamified(learning_rate: f64, consistency: f64) -> GamifiedMetrics {
        GamifiedMetrics {
            learning_rate,
            consistency,
            accuracy: None,
            tasks_completed: 4,
        }
    }

    #[test]
    fn test_likert_running_average() {
        let mut missing = ResponseRecord::likert("c2", Trait::Conscientiousness, 1.0);
        missing.value = None;
        let responses = vec![
            ResponseRecord::likert("o1", Trait::Openness, 5.0),
            ResponseRecord::likert("o2", Trait::Openness, 4.0),
            ResponseRecord::likert("c1", Trait::Conscientiousness, 1.0),
            missing,
        ];

        let traits = calculate_traits(&responses);
        assert_eq!(traits.openness, 87.5);
        assert_eq!(traits.conscientiousness, 25.0);
        assert_eq!(traits.extraversion, NEUTRAL_TRAIT_SCORE);
    }

    #[test]
    fn test_blend_all_channels() {
        let traits = TraitMap::splat(50.0);
        let blended = integrate_assessment_data(
            &traits,
            Some(&gamified(0.8, 0.6)),
            Some(&behavioral(0.9, 0.4, 0.2)),
            &ChannelWeights::default(),
        );

        assert!((blended.openness - (0.40 * 50.0 + 0.35 * 80.0 + 0.25 * 90.0)).abs() < 1e-9);
        assert!((blended.conscientiousness - (0.40 * 50.0 + 0.35 * 60.0 + 0.25 * 40.0)).abs() < 1e-9);
        assert!((blended.neuroticism - (0.40 * 50.0 + 0.35 * 40.0 + 0.25 * 20.0)).abs() < 1e-9);
        assert_eq!(blended.extraversion, 50.0);
        assert_eq!(blended.agreeableness, 50.0);
    }

    #[test]
    fn test_blend_renormalises_missing_channel() {
        let traits = TraitMap::splat(40.0);
        let blended = integrate_assessment_data(&traits, Some(&gamified(1.0, 1.0)), None, &ChannelWeights::default());
        assert!((blended.openness - (0.40 * 40.0 + 0.35 * 100.0) / 0.75).abs() < 1e-9);
        assert!((blended.neuroticism - (0.40 * 40.0) / 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_no_channels_is_identity() {
        let traits = TraitMap::splat(63.0);
        assert_eq!(integrate_assessment_data(&traits, None, None, &ChannelWeights::default()), traits);
    }

    #[test]
    fn test_extraversion_and_agreeableness_pass_through_with_channels() {
        let mut traits = TraitMap::splat(63.0);
        traits.agreeableness = 41.3;
        let gamified = GamifiedMetrics {
            learning_rate: 0.9,
            consistency: 0.2,
            accuracy: None,
            tasks_completed: 4,
        };
        let telemetry = behavioral(0.8, 0.1, 0.7);
        let blended = integrate_assessment_data(&traits, Some(&gamified), Some(&telemetry), &ChannelWeights::default());

        assert_eq!(blended.extraversion, 63.0);
        assert_eq!(blended.agreeableness, 41.3);
        assert_ne!(blended.openness, 63.0);
    }

    #[test]
    fn test_confidence_components() {
        let responses = vec![
            ResponseRecord::likert("o1", Trait::Openness, 4.0),
            ResponseRecord::likert("g1", Trait::Openness, 4.0).with_task_type(TaskType::Gamified),
        ];
        assert!((calculate_confidence(&responses, 4, None, None) - 0.5).abs() < 1e-12);
        let telemetry = behavioral(0.5, 0.5, 0.5);
        assert_eq!(calculate_confidence(&responses, 2, None, Some(&telemetry)), 1.0);
        assert_eq!(calculate_confidence(&[], 0, None, None), 0.0);
    }

    #[test]
    fn test_rarity_tiers_and_floor() {
        assert_eq!(calculate_rarity(&TraitMap::splat(50.0), 1.0), 100.0);

        let mut traits = TraitMap::splat(50.0);
        traits.openness = 85.0;
        traits.neuroticism = 25.0;
        assert!((calculate_rarity(&traits, 1.0) - 100.0 * 0.7 * 0.85).abs() < 1e-9);

        assert!((calculate_rarity(&TraitMap::splat(95.0), 1.0) - 100.0 * 0.7_f64.powi(5)).abs() < 1e-9);
        assert_eq!(calculate_rarity(&TraitMap::splat(95.0), 20.0), 20.0);
    }

    #[test]
    fn test_rarity_decreases_with_extremity() {
        let mut traits = TraitMap::splat(50.0);
        let mut previous = calculate_rarity(&traits, 1.0);
        for score in [72.0, 78.0, 85.0, 99.0] {
            traits.extraversion = score;
            let rarity = calculate_rarity(&traits, 1.0);
            assert!(rarity <= previous);
            previous = rarity;
        }
    }
}
