//! Phrase bank
//!
//! Narrative text is pure data: a table keyed by (trait, level) holding
//! template strings with `{name}` placeholders, rendered by [`render`].

use psyscore_common::Trait;
use serde::{Deserialize, Serialize};

/// Score band used to pick narrative text (high ≥ 60, low ≤ 40)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeLevel {
    Low,
    Moderate,
    High,
}

impl NarrativeLevel {
    pub fn of(score: f64) -> Self {
        if score >= 60.0 {
            NarrativeLevel::High
        } else if score <= 40.0 {
            NarrativeLevel::Low
        } else {
            NarrativeLevel::Moderate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NarrativeLevel::Low => "low",
            NarrativeLevel::Moderate => "moderate",
            NarrativeLevel::High => "high",
        }
    }
}

struct TraitTemplate {
    trait_kind: Trait,
    level: NarrativeLevel,
    text: &'static str,
}

const fn entry(trait_kind: Trait, level: NarrativeLevel, text: &'static str) -> TraitTemplate {
    TraitTemplate { trait_kind, level, text }
}

use NarrativeLevel::{High, Low, Moderate};

static TRAIT_TEMPLATES: [TraitTemplate; 15] = [
    entry(
        Trait::Openness,
        High,
        "Your {trait} score of {score} comes from {count} answers showing strong curiosity and an appetite for new ideas and experiences.",
    ),
    entry(
        Trait::Openness,
        Moderate,
        "Your {trait} score of {score} comes from {count} answers balancing interest in new ideas with a liking for the familiar.",
    ),
    entry(
        Trait::Openness,
        Low,
        "Your {trait} score of {score} comes from {count} answers favouring the practical and proven over the abstract or novel.",
    ),
    entry(
        Trait::Conscientiousness,
        High,
        "Your {trait} score of {score} comes from {count} answers describing careful planning, reliability and follow-through.",
    ),
    entry(
        Trait::Conscientiousness,
        Moderate,
        "Your {trait} score of {score} comes from {count} answers mixing organisation with a tolerance for flexibility.",
    ),
    entry(
        Trait::Conscientiousness,
        Low,
        "Your {trait} score of {score} comes from {count} answers preferring spontaneity to schedules and detailed plans.",
    ),
    entry(
        Trait::Extraversion,
        High,
        "Your {trait} score of {score} comes from {count} answers showing you gain energy from people and lively settings.",
    ),
    entry(
        Trait::Extraversion,
        Moderate,
        "Your {trait} score of {score} comes from {count} answers that enjoy company but also value time alone.",
    ),
    entry(
        Trait::Extraversion,
        Low,
        "Your {trait} score of {score} comes from {count} answers preferring quiet settings and a small circle of close contacts.",
    ),
    entry(
        Trait::Agreeableness,
        High,
        "Your {trait} score of {score} comes from {count} answers that put cooperation, trust and other people's needs first.",
    ),
    entry(
        Trait::Agreeableness,
        Moderate,
        "Your {trait} score of {score} comes from {count} answers weighing warmth towards others against standing your ground.",
    ),
    entry(
        Trait::Agreeableness,
        Low,
        "Your {trait} score of {score} comes from {count} answers that favour directness and scepticism over accommodation.",
    ),
    entry(
        Trait::Neuroticism,
        High,
        "Your {trait} score of {score} comes from {count} answers reporting that stress and worry affect you strongly.",
    ),
    entry(
        Trait::Neuroticism,
        Moderate,
        "Your {trait} score of {score} comes from {count} answers describing ordinary ups and downs under pressure.",
    ),
    entry(
        Trait::Neuroticism,
        Low,
        "Your {trait} score of {score} comes from {count} answers describing a calm, even temperament under pressure.",
    ),
];

/// Template for a trait at a narrative level
pub fn trait_template(trait_kind: Trait, level: NarrativeLevel) -> &'static str {
    TRAIT_TEMPLATES
        .iter()
        .find(|t| t.trait_kind == trait_kind && t.level == level)
        .map_or("Your {trait} score is {score}.", |t| t.text)
}

/// Substitute `{name}` placeholders; unknown placeholders are left as written
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match vars.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_trait_and_level_has_template() {
        for t in Trait::ALL {
            for level in [High, Moderate, Low] {
                let text = trait_template(t, level);
                assert!(text.contains("{trait}"), "{:?} {:?}", t, level);
            }
        }
    }

    #[test]
    fn test_narrative_levels() {
        assert_eq!(NarrativeLevel::of(60.0), NarrativeLevel::High);
        assert_eq!(NarrativeLevel::of(59.9), NarrativeLevel::Moderate);
        assert_eq!(NarrativeLevel::of(40.0), NarrativeLevel::Low);
    }

    #[test]
    fn test_render_placeholders() {
        let text = render("{trait} is {score} ({missing})", &[("trait", "Openness"), ("score", "85")]);
        assert_eq!(text, "Openness is 85 ({missing})");
    }

    #[test]
    fn test_render_unclosed_brace() {
        assert_eq!(render("score {score", &[("score", "1")]), "score {score");
    }
}
