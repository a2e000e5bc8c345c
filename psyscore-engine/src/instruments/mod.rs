//! Clinical Instrument Scorers
//!
//! Standardized screening instruments scored from fixed item lists into
//! severity tiers and alerts. Every instrument has the same shape: a primary
//! scale with a published cutoff table plus subsidiary Likert subscales.
//!
//! # Instruments
//! - **anxiety** - GAD-7 with social, panic and health-anxiety subscales
//! - **depression** - PHQ-9 with cognitive, somatic and withdrawal subscales
//! - **adhd** - ASRS-6 with inattention, hyperactivity and impulsivity subscales
//! - **autism** - AQ-10 with social communication, sensory and routine subscales
//!
//! # Missing Data
//! A scale is scored only when its minimum number of items was answered.
//! Scales below the minimum report [`Severity::Unknown`] and are excluded
//! from the composite and from severity alerts; they never fall back to a
//! numeric default. Critical items are checked whenever the item itself was
//! answered, whatever the coverage of its scale.

pub mod adhd;
pub mod anxiety;
pub mod autism;
pub mod depression;
pub mod scorer;

pub use scorer::InstrumentScorer;

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    None,
    Minimal,
    Mild,
    Moderate,
    #[serde(rename = "Moderately Severe")]
    ModeratelySevere,
    Severe,
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Minimal => "Minimal",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::ModeratelySevere => "Moderately Severe",
            Severity::Severe => "Severe",
            Severity::Unknown => "Unknown",
        }
    }

    /// Whether a numeric score stands behind this tier
    pub fn is_known(&self) -> bool {
        *self != Severity::Unknown
    }

    /// Known and above the lowest tier
    pub fn is_elevated(&self) -> bool {
        !matches!(self, Severity::None | Severity::Minimal | Severity::Unknown)
    }

    /// Tier for a 1-5 subscale item average
    pub fn from_subscale_average(average: f64) -> Self {
        if average < 2.0 {
            Severity::Minimal
        } else if average < 3.0 {
            Severity::Mild
        } else if average < 4.0 {
            Severity::Moderate
        } else {
            Severity::Severe
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Critical,
    High,
    Moderate,
}

/// Clinical alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(rename = "type")]
    pub alert_type: String,
    pub severity: AlertLevel,
    pub message: String,
    /// Item that triggered the alert, for item-level alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

/// How raw answers become item points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemScoring {
    /// Frequency items worth 0..=max points
    Frequency { max_points: f64 },
    /// 1-5 agreement items
    Likert,
    /// 0-3 agreement scale (0 = definitely agree); one point when the answer
    /// matches the item key. Items listed in `agree_keyed` score on agreement
    /// (value ≤ 1), all others on disagreement (value ≥ 2).
    Keyed { agree_keyed: &'static [usize] },
}

impl ItemScoring {
    /// Points for item `number` (1-based)
    pub fn points(&self, number: usize, value: f64) -> f64 {
        match self {
            ItemScoring::Frequency { max_points } => value.clamp(0.0, *max_points),
            ItemScoring::Likert => value.clamp(1.0, 5.0),
            ItemScoring::Keyed { agree_keyed } => {
                let hit = if agree_keyed.contains(&number) {
                    value <= 1.0
                } else {
                    value >= 2.0
                };
                if hit {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn min_points(&self) -> f64 {
        match self {
            ItemScoring::Likert => 1.0,
            _ => 0.0,
        }
    }

    pub fn max_points(&self) -> f64 {
        match self {
            ItemScoring::Frequency { max_points } => *max_points,
            ItemScoring::Likert => 5.0,
            ItemScoring::Keyed { .. } => 1.0,
        }
    }

    /// Map an item average onto the 1-5 Likert range
    pub fn to_likert_range(&self, average: f64) -> f64 {
        let span = self.max_points() - self.min_points();
        if span <= 0.0 {
            return 1.0;
        }
        1.0 + (average - self.min_points()) / span * 4.0
    }
}

/// Every scale of every instrument
///
/// The snake_case name doubles as the item id prefix: items of
/// [`Subscale::AnxPanic`] are `anx_panic_1`, `anx_panic_2`...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subscale {
    Gad7,
    AnxSocial,
    AnxPanic,
    AnxHealth,
    Phq9,
    DepCognitive,
    DepSomatic,
    DepWithdrawal,
    Asrs,
    AdhdInattention,
    AdhdHyperactivity,
    AdhdImpulsivity,
    Aq10,
    AsdSocial,
    AsdSensory,
    AsdRoutine,
}

impl Subscale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subscale::Gad7 => "gad7",
            Subscale::AnxSocial => "anx_social",
            Subscale::AnxPanic => "anx_panic",
            Subscale::AnxHealth => "anx_health",
            Subscale::Phq9 => "phq9",
            Subscale::DepCognitive => "dep_cognitive",
            Subscale::DepSomatic => "dep_somatic",
            Subscale::DepWithdrawal => "dep_withdrawal",
            Subscale::Asrs => "asrs",
            Subscale::AdhdInattention => "adhd_inattention",
            Subscale::AdhdHyperactivity => "adhd_hyperactivity",
            Subscale::AdhdImpulsivity => "adhd_impulsivity",
            Subscale::Aq10 => "aq10",
            Subscale::AsdSocial => "asd_social",
            Subscale::AsdSensory => "asd_sensory",
            Subscale::AsdRoutine => "asd_routine",
        }
    }

    /// Response id of item `number` (1-based)
    pub fn item_id(&self, number: usize) -> String {
        format!("{}_{}", self.as_str(), number)
    }
}

impl fmt::Display for Subscale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed group of items
#[derive(Debug, Clone, PartialEq)]
pub struct SubscaleDefinition {
    pub id: Subscale,
    pub name: &'static str,
    pub item_count: usize,
    pub min_answered: usize,
    pub scoring: ItemScoring,
    /// Added to the report when this subscale is elevated
    pub recommendation: &'static str,
}

impl SubscaleDefinition {
    pub fn item_id(&self, number: usize) -> String {
        self.id.item_id(number)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.item_count).map(move |n| self.item_id(n))
    }

    pub fn max_total(&self) -> f64 {
        self.item_count as f64 * self.scoring.max_points()
    }
}

/// Inclusive upper bound of a severity band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutoff {
    pub max: f64,
    pub severity: Severity,
}

/// Condition on a single item answer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    Above(f64),
    AtLeast(f64),
}

impl Trigger {
    pub fn fires(&self, value: f64) -> bool {
        match self {
            Trigger::Above(limit) => value > *limit,
            Trigger::AtLeast(limit) => value >= *limit,
        }
    }
}

/// Item whose answer alone raises an alert
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalItem {
    pub scale: Subscale,
    /// 1-based item number within `scale`
    pub item: usize,
    pub trigger: Trigger,
    pub alert_type: &'static str,
    pub level: AlertLevel,
    pub message: &'static str,
}

impl CriticalItem {
    pub fn item_id(&self) -> String {
        self.scale.item_id(self.item)
    }
}

/// Complete definition of one instrument
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentDefinition {
    /// Lowercase identifier, also used to build the severe-tier alert code
    pub id: &'static str,
    pub name: &'static str,
    pub primary: SubscaleDefinition,
    /// Ascending, contiguous cutoffs covering 0..=primary max total
    pub cutoffs: &'static [Cutoff],
    pub subscales: &'static [SubscaleDefinition],
    pub critical_items: &'static [CriticalItem],
    /// Recommendation per overall severity tier
    pub severity_recommendations: &'static [(Severity, &'static str)],
}

impl InstrumentDefinition {
    pub fn max_total(&self) -> f64 {
        self.primary.max_total()
    }

    /// Tier for a primary total; the boundary value belongs to the higher tier
    pub fn severity_for(&self, total: f64) -> Severity {
        self.cutoffs
            .iter()
            .find(|c| total <= c.max)
            .or(self.cutoffs.last())
            .map(|c| c.severity)
            .unwrap_or(Severity::Unknown)
    }

    pub fn top_severity(&self) -> Severity {
        self.cutoffs.last().map(|c| c.severity).unwrap_or(Severity::Unknown)
    }

    pub fn severe_alert_code(&self) -> String {
        format!("SEVERE_{}", self.id.to_uppercase())
    }

    /// Primary scale followed by subscales, in declaration order
    pub fn all_scales(&self) -> impl Iterator<Item = &SubscaleDefinition> {
        std::iter::once(&self.primary).chain(self.subscales.iter())
    }

    pub fn recommendation_for(&self, severity: Severity) -> Option<&'static str> {
        self.severity_recommendations
            .iter()
            .find(|(s, _)| *s == severity)
            .map(|(_, text)| *text)
    }

    /// Check the definition's internal consistency
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |msg: String| Err(EngineError::InvalidDefinition(format!("{}: {}", self.id, msg)));

        for scale in self.all_scales() {
            if scale.item_count == 0 || scale.min_answered == 0 || scale.min_answered > scale.item_count {
                return invalid(format!(
                    "scale '{}' needs 1..={} answered items, has minimum {}",
                    scale.id, scale.item_count, scale.min_answered
                ));
            }
        }

        if self.cutoffs.is_empty() {
            return invalid("no cutoffs".to_string());
        }
        let mut previous = -1.0;
        for cutoff in self.cutoffs {
            if cutoff.max <= previous {
                return invalid(format!("cutoff {} is not ascending", cutoff.max));
            }
            if cutoff.max.fract() != 0.0 {
                return invalid(format!("cutoff {} is not a whole score", cutoff.max));
            }
            previous = cutoff.max;
        }
        if (previous - self.max_total()).abs() > f64::EPSILON {
            return invalid(format!(
                "cutoffs end at {} but the maximum total is {}",
                previous,
                self.max_total()
            ));
        }

        for item in self.critical_items {
            let known = self
                .all_scales()
                .any(|scale| scale.id == item.scale && (1..=scale.item_count).contains(&item.item));
            if !known {
                return invalid(format!("critical item '{}' is not part of the instrument", item.item_id()));
            }
        }

        for cutoff in self.cutoffs {
            if self.recommendation_for(cutoff.severity).is_none() {
                return invalid(format!("no recommendation for {}", cutoff.severity));
            }
        }

        Ok(())
    }
}

/// Score of one scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscaleScore {
    pub id: Subscale,
    pub name: String,
    pub answered: usize,
    pub item_count: usize,
    /// Sum of item points (None below the answered minimum)
    pub total: Option<f64>,
    /// Mean item points (None below the answered minimum)
    pub average: Option<f64>,
    pub severity: Severity,
}

impl SubscaleScore {
    pub fn is_covered(&self) -> bool {
        self.total.is_some()
    }

    pub fn answered_fraction(&self) -> f64 {
        if self.item_count == 0 {
            0.0
        } else {
            self.answered as f64 / self.item_count as f64
        }
    }
}

/// Scored instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentScore {
    pub instrument: String,
    pub primary: SubscaleScore,
    pub subscales: Vec<SubscaleScore>,
    /// Primary total, or a subscale estimate rescaled onto the primary range
    pub composite: Option<f64>,
    /// Scale the composite was taken from
    pub composite_source: Option<Subscale>,
    pub max_total: f64,
    pub severity: Severity,
    /// Name of the covered scale with the highest item average
    pub primary_type: Option<String>,
    pub alerts: Vec<Alert>,
}

/// Clinical report for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalReport {
    pub instrument: String,
    pub scores: InstrumentScore,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub alerts: Vec<Alert>,
}

impl ClinicalReport {
    pub fn has_critical_alert(&self) -> bool {
        self.alerts.iter().any(|a| a.severity == AlertLevel::Critical)
    }
}
