//! Scoring parameters
//!
//! Every tunable threshold of the scoring pipeline. Defaults reproduce the
//! reference behaviour exactly; a `[scoring]` TOML table may override any
//! subset of fields.

use crate::error::EngineResult;
use psyscore_common::config::TomlConfig;
use serde::{Deserialize, Serialize};

/// All scoring parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringParameters {
    /// Response quality / validity gate parameters
    #[serde(default)]
    pub quality: QualityParameters,

    /// Insight tracker parameters
    #[serde(default)]
    pub insight: InsightParameters,

    /// Composite profile parameters
    #[serde(default)]
    pub profile: ProfileParameters,
}

impl ScoringParameters {
    /// Read parameters from the `[scoring]` table of a loaded config
    pub fn from_config(config: &TomlConfig) -> EngineResult<Self> {
        Ok(config.scoring_as()?)
    }
}

/// Weights of the five quality metrics (renormalised over available metrics)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricWeights {
    pub response_time: f64,
    pub consistency: f64,
    pub pattern_detection: f64,
    pub completeness: f64,
    pub engagement: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            response_time: 0.20,
            consistency: 0.30,
            pattern_detection: 0.20,
            completeness: 0.15,
            engagement: 0.15,
        }
    }
}

/// Response quality parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityParameters {
    /// Metric weights
    #[serde(default)]
    pub weights: MetricWeights,

    /// Overall score below which the response set is invalid (default: 0.4)
    #[serde(default = "default_validity_threshold")]
    pub validity_threshold: f64,

    /// Suspicious-pattern confidence counted as "high" (default: 0.7)
    #[serde(default = "default_high_confidence")]
    pub high_confidence_threshold: f64,

    /// High-severity warnings tolerated before invalidating (default: 2)
    #[serde(default = "default_max_high_warnings")]
    pub max_high_severity_warnings: usize,

    /// Likert answers required before pattern analysis runs (default: 5)
    #[serde(default = "default_min_pattern_responses")]
    pub min_pattern_responses: usize,

    /// Straight-lining share of the modal answer (default: 0.8)
    #[serde(default = "default_straight_lining_ratio")]
    pub straight_lining_ratio: f64,

    /// Zig-zag share of large adjacent jumps (default: 0.8)
    #[serde(default = "default_zig_zag_ratio")]
    pub zig_zag_ratio: f64,

    /// Middle-bias share of neutral answers (default: 0.6)
    #[serde(default = "default_middle_bias_ratio")]
    pub middle_bias_ratio: f64,

    /// Acquiescence share of agree answers (default: 0.8)
    #[serde(default = "default_acquiescence_ratio")]
    pub acquiescence_ratio: f64,

    /// Average response time flagged as speed running, ms (default: 1500)
    #[serde(default = "default_speed_running_ms")]
    pub speed_running_ms: f64,

    /// Answer entropy flagged as random clicking, bits (default: 2.2)
    #[serde(default = "default_random_clicking_entropy")]
    pub random_clicking_entropy: f64,

    /// Likert answers required before entropy is trusted (default: 10)
    #[serde(default = "default_min_entropy_responses")]
    pub min_entropy_responses: usize,

    /// Average response time too fast to have read the item, ms (default: 1000)
    #[serde(default = "default_too_fast_ms")]
    pub too_fast_ms: f64,

    /// Average response time counted as hurried, ms (default: 2000)
    #[serde(default = "default_hurried_ms")]
    pub hurried_ms: f64,

    /// Average response time counted as distracted, ms (default: 20000)
    #[serde(default = "default_distracted_ms")]
    pub distracted_ms: f64,

    /// Response-time variance below which timing looks scripted, ms² (default: 500)
    #[serde(default = "default_uniform_time_variance")]
    pub uniform_time_variance: f64,

    /// Within-trait answer variance tolerated before a penalty (default: 1.5)
    #[serde(default = "default_max_trait_variance")]
    pub max_trait_variance: f64,

    /// Engagement before timing and distribution adjustments (default: 0.8)
    #[serde(default = "default_base_engagement")]
    pub base_engagement: f64,

    /// Response-time variance read as engaged pacing, ms² (default: 3000)
    #[serde(default = "default_engaged_time_variance")]
    pub engaged_time_variance: f64,

    /// Multiplier on the pattern score and, once detected, on the overall
    /// score for straight-lining (default: 0.5)
    #[serde(default = "default_straight_lining_penalty")]
    pub straight_lining_penalty: f64,

    /// Reliability multiplier per high-impact suspicious pattern (default: 0.7)
    #[serde(default = "default_high_impact_reliability")]
    pub high_impact_reliability: f64,

    /// Reliability multiplier per medium-impact suspicious pattern (default: 0.85)
    #[serde(default = "default_medium_impact_reliability")]
    pub medium_impact_reliability: f64,

    /// Engagement above which reliability is boosted (default: 0.9)
    #[serde(default = "default_engaged_reliability_threshold")]
    pub engaged_reliability_threshold: f64,

    /// Reliability boost for engaged respondents (default: 1.1)
    #[serde(default = "default_engaged_reliability_boost")]
    pub engaged_reliability_boost: f64,

    /// Lowest reported reliability (default: 0.3)
    #[serde(default = "default_min_reliability")]
    pub min_reliability: f64,
}

fn default_validity_threshold() -> f64 {
    0.4
}

fn default_high_confidence() -> f64 {
    0.7
}

fn default_max_high_warnings() -> usize {
    2
}

fn default_min_pattern_responses() -> usize {
    5
}

fn default_straight_lining_ratio() -> f64 {
    0.8
}

fn default_zig_zag_ratio() -> f64 {
    0.8
}

fn default_middle_bias_ratio() -> f64 {
    0.6
}

fn default_acquiescence_ratio() -> f64 {
    0.8
}

fn default_speed_running_ms() -> f64 {
    1500.0
}

fn default_random_clicking_entropy() -> f64 {
    2.2
}

fn default_min_entropy_responses() -> usize {
    10
}

fn default_too_fast_ms() -> f64 {
    1000.0
}

fn default_hurried_ms() -> f64 {
    2000.0
}

fn default_distracted_ms() -> f64 {
    20000.0
}

fn default_uniform_time_variance() -> f64 {
    500.0
}

fn default_max_trait_variance() -> f64 {
    1.5
}

fn default_base_engagement() -> f64 {
    0.8
}

fn default_engaged_time_variance() -> f64 {
    3000.0
}

fn default_straight_lining_penalty() -> f64 {
    0.5
}

fn default_high_impact_reliability() -> f64 {
    0.7
}

fn default_medium_impact_reliability() -> f64 {
    0.85
}

fn default_engaged_reliability_threshold() -> f64 {
    0.9
}

fn default_engaged_reliability_boost() -> f64 {
    1.1
}

fn default_min_reliability() -> f64 {
    0.3
}

impl Default for QualityParameters {
    fn default() -> Self {
        Self {
            weights: MetricWeights::default(),
            validity_threshold: default_validity_threshold(),
            high_confidence_threshold: default_high_confidence(),
            max_high_severity_warnings: default_max_high_warnings(),
            min_pattern_responses: default_min_pattern_responses(),
            straight_lining_ratio: default_straight_lining_ratio(),
            zig_zag_ratio: default_zig_zag_ratio(),
            middle_bias_ratio: default_middle_bias_ratio(),
            acquiescence_ratio: default_acquiescence_ratio(),
            speed_running_ms: default_speed_running_ms(),
            random_clicking_entropy: default_random_clicking_entropy(),
            min_entropy_responses: default_min_entropy_responses(),
            too_fast_ms: default_too_fast_ms(),
            hurried_ms: default_hurried_ms(),
            distracted_ms: default_distracted_ms(),
            uniform_time_variance: default_uniform_time_variance(),
            max_trait_variance: default_max_trait_variance(),
            base_engagement: default_base_engagement(),
            engaged_time_variance: default_engaged_time_variance(),
            straight_lining_penalty: default_straight_lining_penalty(),
            high_impact_reliability: default_high_impact_reliability(),
            medium_impact_reliability: default_medium_impact_reliability(),
            engaged_reliability_threshold: default_engaged_reliability_threshold(),
            engaged_reliability_boost: default_engaged_reliability_boost(),
            min_reliability: default_min_reliability(),
        }
    }
}

/// Insight tracker parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightParameters {
    /// |impact| above which an answer is critical (default: 15)
    pub critical_impact_threshold: f64,
    /// Answers faster than this lose confidence, ms (default: 1000)
    pub fast_response_ms: u64,
    /// Answers slower than this lose confidence, ms (default: 30000)
    pub slow_response_ms: u64,
    /// Confidence multiplier when a pattern flag is attached (default: 0.6)
    pub pattern_flag_penalty: f64,
}

impl Default for InsightParameters {
    fn default() -> Self {
        Self {
            critical_impact_threshold: 15.0,
            fast_response_ms: 1000,
            slow_response_ms: 30000,
            pattern_flag_penalty: 0.6,
        }
    }
}

/// Channel weights for the composite trait blend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelWeights {
    pub traditional: f64,
    pub gamified: f64,
    pub behavioral: f64,
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self {
            traditional: 0.40,
            gamified: 0.35,
            behavioral: 0.25,
        }
    }
}

/// Composite profile parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileParameters {
    /// Channel blend weights
    pub channel_weights: ChannelWeights,
    /// Raw 1-5 level at or above which a trait is High (default: 3.5)
    pub high_level_cutoff: f64,
    /// Raw 1-5 level at or below which a trait is Low (default: 2.5)
    pub low_level_cutoff: f64,
    /// Minimum rarity percentage (default: 1.0)
    pub rarity_floor: f64,
}

impl Default for ProfileParameters {
    fn default() -> Self {
        Self {
            channel_weights: ChannelWeights::default(),
            high_level_cutoff: 3.5,
            low_level_cutoff: 2.5,
            rarity_floor: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = MetricWeights::default();
        let sum = w.response_time + w.consistency + w.pattern_detection + w.completeness + w.engagement;
        assert!((sum - 1.0).abs() < 1e-9);

        let c = ChannelWeights::default();
        assert!((c.traditional + c.gamified + c.behavioral - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_override_from_config() {
        let config = TomlConfig::from_toml_str(
            r#"
            [scoring.quality]
            validity_threshold = 0.5

            [scoring.insight]
            critical_impact_threshold = 20.0
            "#,
        )
        .unwrap();

        let params = ScoringParameters::from_config(&config).unwrap();
        assert_eq!(params.quality.validity_threshold, 0.5);
        assert_eq!(params.quality.straight_lining_ratio, 0.8);
        assert_eq!(params.insight.critical_impact_threshold, 20.0);
        assert_eq!(params.insight.fast_response_ms, 1000);
        assert_eq!(params.profile, ProfileParameters::default());
    }

    #[test]
    fn test_timing_and_engagement_overrides() {
        let config = TomlConfig::from_toml_str(
            r#"
            [scoring.quality]
            too_fast_ms = 4000.0
            base_engagement = 0.6
            max_trait_variance = 3.0
            "#,
        )
        .unwrap();

        let quality = ScoringParameters::from_config(&config).unwrap().quality;
        assert_eq!(quality.too_fast_ms, 4000.0);
        assert_eq!(quality.base_engagement, 0.6);
        assert_eq!(quality.max_trait_variance, 3.0);
        assert_eq!(quality.hurried_ms, 2000.0);
        assert_eq!(quality.min_reliability, 0.3);
    }

    #[test]
    fn test_empty_config_gives_defaults() {
        let params = ScoringParameters::from_config(&TomlConfig::default()).unwrap();
        assert_eq!(params, ScoringParameters::default());
    }

    #[test]
    fn test_wrong_type_is_error() {
        let config = TomlConfig::from_toml_str("[scoring.quality]\nvalidity_threshold = \"high\"").unwrap();
        assert!(ScoringParameters::from_config(&config).is_err());
    }
}
