//! Composite Profile
//!
//! Big Five scores blended across response channels, with an archetype
//! assignment and a rarity estimate.

pub mod archetype;
pub mod builder;
pub mod traits;

pub use archetype::{
    archetype_by_name, determine_archetype, ArchetypeDefinition, ArchetypeMatch, TraitLevel, TraitPredicate,
    ARCHETYPES,
};
pub use builder::{CompositeProfile, CompositeProfileBuilder};
pub use traits::{
    calculate_confidence, calculate_rarity, calculate_traits, integrate_assessment_data, NEUTRAL_TRAIT_SCORE,
};
