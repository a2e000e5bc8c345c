//! Input models and tunable parameters

pub mod parameters;
pub mod telemetry;

pub use parameters::{
    ChannelWeights, InsightParameters, MetricWeights, ProfileParameters, QualityParameters,
    ScoringParameters,
};
pub use telemetry::{BehavioralPatterns, BehavioralTelemetry, GamifiedMetrics, PatternScore, TelemetryMetrics};
