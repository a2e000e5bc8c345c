//! Core response types
//!
//! A [`ResponseRecord`] is one answered (or skipped) question as delivered by
//! the presentation layer. Records are immutable once created; every scorer
//! reads them through a shared slice.
//!
//! Malformed records are tolerated rather than rejected: a record without a
//! parseable trait simply does not contribute to trait scoring, and a Likert
//! record without a value counts as neutral where a value is required.
//! A missing `timestamp` decodes as `None`. A missing `taskType` is inferred:
//! Likert when the category names a trait, [`TaskType::Other`] otherwise, so
//! untyped instrument items never reach Likert pattern analysis.

use crate::error::EngineResult;
use chrono::{DateTime, Utc};
use psyscore_common::Trait;
use serde::{Deserialize, Serialize};

/// Neutral Likert answer used when a value is missing
pub const NEUTRAL_LIKERT: f64 = 3.0;

/// Kind of task that produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TaskType {
    /// 1-5 agreement item scored onto a Big Five trait
    Likert,
    /// Game-like task (reaction, memory, pattern learning)
    Gamified,
    /// Passive behavioral telemetry sample
    Behavioral,
    /// Item from a standardized clinical instrument
    Instrument,
    /// Anything else the presentation layer emits
    Other,
}

impl From<String> for TaskType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "likert" | "traditional" => TaskType::Likert,
            "gamified" | "game" => TaskType::Gamified,
            "behavioral" | "behavioural" => TaskType::Behavioral,
            "instrument" | "clinical" => TaskType::Instrument,
            _ => TaskType::Other,
        }
    }
}

/// One questionnaire response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireRecord")]
pub struct ResponseRecord {
    /// Question identifier (instrument item ids are matched against this)
    pub question_id: String,

    /// Trait or category name (`"openness"`, `"O"`, an instrument category...)
    #[serde(default, alias = "trait")]
    pub category: Option<String>,

    /// Raw answer value (Likert 1-5 or instrument-specific)
    #[serde(default)]
    pub value: Option<f64>,

    /// Time taken to answer, in milliseconds
    #[serde(default)]
    pub response_time: Option<u64>,

    /// When the answer was given
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Producing task type
    pub task_type: TaskType,
}

/// Record as decoded, before the task type is inferred
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    question_id: String,
    #[serde(default, alias = "trait")]
    category: Option<String>,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    response_time: Option<u64>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    task_type: Option<TaskType>,
}

impl From<WireRecord> for ResponseRecord {
    fn from(wire: WireRecord) -> Self {
        let mut record = Self {
            question_id: wire.question_id,
            category: wire.category,
            value: wire.value,
            response_time: wire.response_time,
            timestamp: wire.timestamp,
            task_type: TaskType::Other,
        };
        record.task_type = match wire.task_type {
            Some(task_type) => task_type,
            None if record.trait_kind().is_some() => TaskType::Likert,
            None => TaskType::Other,
        };
        record
    }
}

impl ResponseRecord {
    /// Likert response scored onto a trait
    pub fn likert(question_id: impl Into<String>, trait_kind: Trait, value: f64) -> Self {
        Self {
            question_id: question_id.into(),
            category: Some(trait_kind.as_str().to_string()),
            value: Some(value),
            response_time: None,
            timestamp: None,
            task_type: TaskType::Likert,
        }
    }

    /// Clinical instrument item response
    pub fn instrument(question_id: impl Into<String>, value: f64) -> Self {
        Self {
            question_id: question_id.into(),
            category: None,
            value: Some(value),
            response_time: None,
            timestamp: None,
            task_type: TaskType::Instrument,
        }
    }

    /// Set the response time in milliseconds
    pub fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time = Some(ms);
        self
    }

    /// Set the answer timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Override the task type
    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    /// Trait this response scores onto, if its category names one
    pub fn trait_kind(&self) -> Option<Trait> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }

    /// Whether a value was supplied
    pub fn is_answered(&self) -> bool {
        self.value.is_some_and(|v| v.is_finite())
    }

    /// Whether this is a Likert trait item
    pub fn is_likert(&self) -> bool {
        self.task_type == TaskType::Likert
    }

    /// Likert value clamped to 1-5, if this is an answered Likert item
    pub fn likert_value(&self) -> Option<f64> {
        if !self.is_likert() {
            return None;
        }
        self.value
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(1.0, 5.0))
    }

    /// Likert value with the neutral default applied to missing answers
    pub fn likert_value_or_neutral(&self) -> f64 {
        self.likert_value().unwrap_or(NEUTRAL_LIKERT)
    }

    /// Decode a JSON array of response records
    pub fn from_json_array(json: &str) -> EngineResult<Vec<ResponseRecord>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Population mean of a slice (0.0 when empty)
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance of a slice (0.0 when empty)
pub(crate) fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}
