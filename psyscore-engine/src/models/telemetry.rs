//! Non-Likert input channels
//!
//! Aggregated outputs of the gamified task runner and the passive behavioral
//! telemetry collector. Capture happens outside this crate; these structs
//! only describe the summaries handed to the profile builder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary metrics from gamified tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamifiedMetrics {
    /// Improvement rate across repeated trials (0.0-1.0)
    pub learning_rate: f64,
    /// Trial-to-trial performance stability (0.0-1.0)
    pub consistency: f64,
    /// Mean task accuracy, when reported (0.0-1.0)
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Number of tasks completed
    #[serde(default)]
    pub tasks_completed: u32,
}

/// Behavioral telemetry summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralTelemetry {
    /// Raw session metrics
    #[serde(default)]
    pub metrics: TelemetryMetrics,
    /// Derived behavioral pattern scores
    #[serde(default)]
    pub patterns: BehavioralPatterns,
}

impl BehavioralTelemetry {
    /// Whether any telemetry was actually captured
    pub fn has_duration(&self) -> bool {
        self.metrics.total_duration > 0.0
    }
}

/// Raw session metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryMetrics {
    /// Total observed interaction time, ms
    #[serde(default)]
    pub total_duration: f64,
    /// Any further collector-specific metrics, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Derived behavioral patterns, each scored 0.0-1.0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehavioralPatterns {
    #[serde(default)]
    pub impulsivity: Option<PatternScore>,
    #[serde(default)]
    pub precision: Option<PatternScore>,
    #[serde(default)]
    pub consistency: Option<PatternScore>,
    #[serde(default)]
    pub engagement: Option<PatternScore>,
    #[serde(default)]
    pub anxiety: Option<PatternScore>,
}

/// A single behavioral pattern score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternScore {
    pub score: f64,
}

impl PatternScore {
    /// Score clamped to 0.0-1.0
    pub fn clamped(&self) -> f64 {
        if self.score.is_finite() {
            self.score.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
