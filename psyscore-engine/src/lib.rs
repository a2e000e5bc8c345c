//! psyscore-engine - questionnaire scoring core
//!
//! Turns a completed stream of questionnaire responses into:
//! - a response-quality verdict (`validators`)
//! - per-answer trait bookkeeping and confidence (`insight`)
//! - clinical severity reports for standardized instruments (`instruments`)
//! - a blended Big Five profile with archetype and rarity (`profile`)
//! - a human-readable explanation chain (`explanation`)
//!
//! Everything is synchronous and pure: an [`AssessmentSession`] owns one
//! user's responses and produces an [`AssessmentReport`]. Hosts serving many
//! users construct one session per user; nothing is shared between sessions.

pub mod error;
pub mod explanation;
pub mod insight;
pub mod instruments;
pub mod models;
pub mod profile;
pub mod session;
pub mod types;
pub mod validators;

pub use crate::error::{EngineError, EngineResult};
pub use crate::session::{AssessmentReport, AssessmentSession};
pub use crate::types::{ResponseRecord, TaskType};
pub use psyscore_common::{Trait, TraitMap};
