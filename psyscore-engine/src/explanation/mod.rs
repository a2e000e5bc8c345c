//! Explanation Layer
//!
//! Human-readable reasoning linking individual answers to score movements
//! and to the archetype assignment.

pub mod engine;
pub mod templates;

pub use engine::{
    AlternativeArchetype, ArchetypeReasoning, ExplanationChain, ExplanationEngine, MissingFactor, PatternDescriptor,
    TraitExplanation, TraitInteraction,
};
pub use templates::{render, trait_template, NarrativeLevel};
