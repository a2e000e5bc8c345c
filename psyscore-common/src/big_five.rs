//! Big Five (OCEAN) trait dimensions
//!
//! Provides the closed set of five canonical personality traits and a
//! fixed-shape container indexed by them. Using a struct with one field per
//! trait (rather than a string-keyed map) means every consumer handles all
//! five dimensions, and a missing trait is a compile error instead of a
//! runtime lookup miss.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::Error;

/// Canonical Big Five personality trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    /// Curiosity, imagination, appetite for novelty
    Openness,
    /// Organisation, diligence, self-discipline
    Conscientiousness,
    /// Sociability, assertiveness, positive affect
    Extraversion,
    /// Warmth, cooperation, trust
    Agreeableness,
    /// Tendency towards negative affect and stress reactivity
    Neuroticism,
}

impl Trait {
    /// All traits in canonical OCEAN order
    pub const ALL: [Trait; 5] = [
        Trait::Openness,
        Trait::Conscientiousness,
        Trait::Extraversion,
        Trait::Agreeableness,
        Trait::Neuroticism,
    ];

    /// Lowercase machine identifier ("openness")
    pub fn as_str(&self) -> &'static str {
        match self {
            Trait::Openness => "openness",
            Trait::Conscientiousness => "conscientiousness",
            Trait::Extraversion => "extraversion",
            Trait::Agreeableness => "agreeableness",
            Trait::Neuroticism => "neuroticism",
        }
    }

    /// Human-readable label ("Openness")
    pub fn label(&self) -> &'static str {
        match self {
            Trait::Openness => "Openness",
            Trait::Conscientiousness => "Conscientiousness",
            Trait::Extraversion => "Extraversion",
            Trait::Agreeableness => "Agreeableness",
            Trait::Neuroticism => "Neuroticism",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Trait {
    type Err = Error;

    /// Accepts full names or single OCEAN letters, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openness" | "o" => Ok(Trait::Openness),
            "conscientiousness" | "c" => Ok(Trait::Conscientiousness),
            "extraversion" | "extroversion" | "e" => Ok(Trait::Extraversion),
            "agreeableness" | "a" => Ok(Trait::Agreeableness),
            "neuroticism" | "n" => Ok(Trait::Neuroticism),
            other => Err(Error::InvalidInput(format!("Unknown trait: {}", other))),
        }
    }
}

/// One value per Big Five trait
///
/// Serialises as a JSON object keyed by lowercase trait name.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TraitMap<T> {
    pub openness: T,
    pub conscientiousness: T,
    pub extraversion: T,
    pub agreeableness: T,
    pub neuroticism: T,
}

impl<T> TraitMap<T> {
    /// Build a map by evaluating `f` once per trait in canonical order
    pub fn from_fn(mut f: impl FnMut(Trait) -> T) -> Self {
        Self {
            openness: f(Trait::Openness),
            conscientiousness: f(Trait::Conscientiousness),
            extraversion: f(Trait::Extraversion),
            agreeableness: f(Trait::Agreeableness),
            neuroticism: f(Trait::Neuroticism),
        }
    }

    /// Iterate `(trait, &value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Trait, &T)> + '_ {
        Trait::ALL.into_iter().map(move |t| (t, &self[t]))
    }

    /// Transform every value, keeping the trait association
    pub fn map<U>(&self, mut f: impl FnMut(Trait, &T) -> U) -> TraitMap<U> {
        TraitMap::from_fn(|t| f(t, &self[t]))
    }
}

impl<T: Clone> TraitMap<T> {
    /// Map with the same value for every trait
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T> Index<Trait> for TraitMap<T> {
    type Output = T;

    fn index(&self, t: Trait) -> &T {
        match t {
            Trait::Openness => &self.openness,
            Trait::Conscientiousness => &self.conscientiousness,
            Trait::Extraversion => &self.extraversion,
            Trait::Agreeableness => &self.agreeableness,
            Trait::Neuroticism => &self.neuroticism,
        }
    }
}

impl<T> IndexMut<Trait> for TraitMap<T> {
    fn index_mut(&mut self, t: Trait) -> &mut T {
        match t {
            Trait::Openness => &mut self.openness,
            Trait::Conscientiousness => &mut self.conscientiousness,
            Trait::Extraversion => &mut self.extraversion,
            Trait::Agreeableness => &mut self.agreeableness,
            Trait::Neuroticism => &mut self.neuroticism,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_parsing_accepts_names_and_letters() {
        assert_eq!("Openness".parse::<Trait>().unwrap(), Trait::Openness);
        assert_eq!(" n ".parse::<Trait>().unwrap(), Trait::Neuroticism);
        assert_eq!("extroversion".parse::<Trait>().unwrap(), Trait::Extraversion);
        assert!("honesty".parse::<Trait>().is_err());
    }

    #[test]
    fn test_trait_map_index_and_iter() {
        let mut map = TraitMap::splat(50.0);
        map[Trait::Agreeableness] = 80.0;

        assert_eq!(map.agreeableness, 80.0);
        let collected: Vec<(Trait, f64)> = map.iter().map(|(t, v)| (t, *v)).collect();
        assert_eq!(collected.len(), 5);
        assert_eq!(collected[3], (Trait::Agreeableness, 80.0));
    }

    #[test]
    fn test_trait_map_serializes_as_object() {
        let map = TraitMap::from_fn(|t| t.as_str().len() as u32);
        let json = serde_json::to_value(map).unwrap();
        assert_eq!(json["openness"], 8);
        assert_eq!(json["neuroticism"], 11);
    }

    #[test]
    fn test_trait_serializes_lowercase() {
        let json = serde_json::to_string(&Trait::Conscientiousness).unwrap();
        assert_eq!(json, "\"conscientiousness\"");
    }
}
