//! Error types for psyscore-engine
//!
//! Data-quality problems never surface here: scoring reports them as
//! warnings, alerts and `Unknown` severities. These errors cover only
//! malformed configuration, instrument definitions and inbound JSON.

use thiserror::Error;

/// Engine error type
#[derive(Debug, Error)]
pub enum EngineError {
    /// Instrument definition violates a structural rule
    #[error("Invalid instrument definition: {0}")]
    InvalidDefinition(String),

    /// Inbound JSON could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// psyscore-common error (configuration, TOML)
    #[error("Common error: {0}")]
    Common(#[from] psyscore_common::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
