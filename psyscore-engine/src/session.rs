//! Assessment Session
//!
//! One user's completed assessment, run through the whole scoring chain in
//! a single pass. A session owns its responses and builds fresh, private
//! instances of every scorer, so any number of sessions can run side by side
//! without sharing state.
//!
//! # Pipeline
//! 1. Quality gate over all responses
//! 2. Insight bookkeeping from the Likert responses
//! 3. Clinical instruments (only those with at least one item present)
//! 4. Composite profile (when any trait data exists)
//! 5. Archetype influence and explanation chain
//!
//! # Example
//! ```rust,ignore
//! use psyscore_engine::{AssessmentSession, ResponseRecord};
//!
//! let responses = ResponseRecord::from_json_array(&body)?;
//! let report = AssessmentSession::new(responses).with_expected_total(60).run();
//!
//! if !report.quality.validity {
//!     // Surface report.quality.invalid_reasons to the caller
//! }
//! ```

use crate::error::EngineResult;
use crate::explanation::{ExplanationChain, ExplanationEngine};
use crate::insight::{InsightDerivation, InsightTracker};
use crate::instruments::{ClinicalReport, InstrumentScorer};
use crate::models::{BehavioralTelemetry, GamifiedMetrics, ScoringParameters};
use crate::profile::{CompositeProfile, CompositeProfileBuilder};
use crate::types::ResponseRecord;
use crate::validators::{QualityAssessment, ResponseQualityAssessor};
use psyscore_common::config::TomlConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// Everything produced for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub session_id: Uuid,
    pub response_count: usize,
    pub quality: QualityAssessment,
    pub clinical: Vec<ClinicalReport>,
    pub profile: Option<CompositeProfile>,
    pub insights: InsightDerivation,
    pub explanation: Option<ExplanationChain>,
}

impl AssessmentReport {
    /// Explicit empty-state report for a session without responses
    pub fn placeholder(session_id: Uuid) -> Self {
        Self {
            session_id,
            response_count: 0,
            quality: QualityAssessment::empty(),
            clinical: Vec::new(),
            profile: None,
            insights: InsightDerivation::default(),
            explanation: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.response_count == 0
    }

    /// Clinical report for an instrument id (`"anxiety"`, `"depression"`...)
    pub fn clinical_report(&self, instrument: &str) -> Option<&ClinicalReport> {
        self.clinical.iter().find(|r| r.instrument == instrument)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One user's assessment
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    session_id: Uuid,
    responses: Vec<ResponseRecord>,
    gamified: Option<GamifiedMetrics>,
    behavioral: Option<BehavioralTelemetry>,
    expected_total: usize,
    params: ScoringParameters,
}

impl AssessmentSession {
    /// New session with a fresh id and default parameters
    pub fn new(responses: Vec<ResponseRecord>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            responses,
            gamified: None,
            behavioral: None,
            expected_total: 0,
            params: ScoringParameters::default(),
        }
    }

    pub fn with_session_id(mut self, session_id: Uuid) -> Self {
        self.session_id = session_id;
        self
    }

    /// Questionnaire length used for completeness (0 = delivered records)
    pub fn with_expected_total(mut self, expected_total: usize) -> Self {
        self.expected_total = expected_total;
        self
    }

    pub fn with_gamified(mut self, metrics: GamifiedMetrics) -> Self {
        self.gamified = Some(metrics);
        self
    }

    pub fn with_behavioral(mut self, telemetry: BehavioralTelemetry) -> Self {
        self.behavioral = Some(telemetry);
        self
    }

    pub fn with_parameters(mut self, params: ScoringParameters) -> Self {
        self.params = params;
        self
    }

    /// Apply the `[scoring]` table of a loaded config
    pub fn with_config(self, config: &TomlConfig) -> EngineResult<Self> {
        let params = ScoringParameters::from_config(config)?;
        Ok(self.with_parameters(params))
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    /// Run the full scoring chain
    pub fn run(&self) -> AssessmentReport {
        if self.responses.is_empty() {
            warn!(session_id = %self.session_id, "Assessment run with no responses");
            return AssessmentReport::placeholder(self.session_id);
        }

        let quality = ResponseQualityAssessor::with_parameters(self.params.quality.clone())
            .assess(&self.responses, self.expected_total);

        let mut tracker = InsightTracker::with_parameters(self.params.insight.clone());
        tracker.record_likert_responses(&self.responses);

        let clinical: Vec<ClinicalReport> = InstrumentScorer::all()
            .iter()
            .filter(|scorer| scorer.has_any_item(&self.responses))
            .map(|scorer| scorer.report(&self.responses))
            .collect();

        let profile = self.has_trait_data().then(|| self.build_profile());
        if let Some(profile) = &profile {
            tracker.record_archetype_influence(&profile.traits);
        }

        let insights = tracker.derivation();
        let explanation = profile.as_ref().map(|p| {
            ExplanationEngine::with_parameters(self.params.profile.clone()).generate_complete_explanation(
                &insights,
                &p.traits,
                &p.archetype,
            )
        });

        info!(
            session_id = %self.session_id,
            responses = self.responses.len(),
            valid = quality.validity,
            overall = quality.overall_score,
            instruments = clinical.len(),
            archetype = profile.as_ref().map(|p| p.archetype.name.as_str()).unwrap_or("none"),
            "Assessment complete"
        );

        AssessmentReport {
            session_id: self.session_id,
            response_count: self.responses.len(),
            quality,
            clinical,
            profile,
            insights,
            explanation,
        }
    }

    fn has_trait_data(&self) -> bool {
        self.gamified.is_some()
            || self.behavioral.is_some()
            || self.responses.iter().any(|r| r.trait_kind().is_some())
    }

    fn build_profile(&self) -> CompositeProfile {
        let mut builder = CompositeProfileBuilder::new().with_parameters(self.params.profile.clone());
        if let Some(metrics) = &self.gamified {
            builder = builder.with_gamified(metrics.clone());
        }
        if let Some(telemetry) = &self.behavioral {
            builder = builder.with_behavioral(telemetry.clone());
        }
        builder.build(&self.responses, self.expected_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyscore_common::Trait;

    #[test]
    fn test_empty_session_yields_placeholder() {
        let id = Uuid::new_v4();
        let report = AssessmentSession::new(Vec::new()).with_session_id(id).run();

        assert!(report.is_placeholder());
        assert_eq!(report.session_id, id);
        assert!(!report.quality.validity);
        assert!(report.clinical.is_empty());
        assert!(report.profile.is_none());
        assert!(report.explanation.is_none());
    }

    #[test]
    fn test_instrument_only_session_has_no_profile() {
        let responses = (1..=7)
            .map(|i| ResponseRecord::instrument(format!("gad7_{}", i), 1.0))
            .collect();
        let report = AssessmentSession::new(responses).run();

        assert_eq!(report.clinical.len(), 1);
        assert!(report.clinical_report("anxiety").is_some());
        assert!(report.profile.is_none());
        assert!(report.explanation.is_none());
    }

    #[test]
    fn test_trait_session_builds_profile_and_explanation() {
        let responses = vec![
            ResponseRecord::likert("o1", Trait::Openness, 5.0).with_response_time(3200),
            ResponseRecord::likert("c1", Trait::Conscientiousness, 5.0).with_response_time(4100),
        ];
        let report = AssessmentSession::new(responses).run();

        let profile = report.profile.as_ref().unwrap();
        assert_eq!(profile.archetype.name, "Strategic Innovator");
        assert_eq!(report.insights.archetype_influence.len(), 3);
        assert!(report.explanation.is_some());
        assert!(report.to_json().unwrap().contains("\"sessionId\""));
    }

    #[test]
    fn test_config_overrides_parameters() {
        let config = TomlConfig::from_toml_str("[scoring.quality]\nvalidity_threshold = 0.99").unwrap();
        let responses = vec![ResponseRecord::likert("o1", Trait::Openness, 4.0)];
        let report = AssessmentSession::new(responses).with_config(&config).unwrap().run();
        assert!(!report.quality.validity);
    }
}
