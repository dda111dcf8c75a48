//! Cost-allocation synthesis: gathers both parties' conduct and delay
//! metrics, evaluates sealed offers against a proposed award, and renders
//! the allocation narrative through one of two strategies.

mod generative;
mod narrative;

pub use generative::{ChatCompletionsGenerator, NarrativeError, NarrativeGenerator};

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use super::super::domain::{CaseId, Party};
use super::super::store::CaseRecord;
use super::conduct::{self, ConductScore};
use super::delay::{self, DelayAssessment};
use super::domain::CostSettings;
use super::offers::{self, ReversalTrigger};

/// Conduct and delay metrics for one party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyAssessment {
    pub party: Party,
    pub conduct: ConductScore,
    pub delay: DelayAssessment,
}

/// The structured metrics every narrative strategy is seeded with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostAllocationAssessment {
    pub settings: CostSettings,
    pub claimant: PartyAssessment,
    pub respondent: PartyAssessment,
}

impl CostAllocationAssessment {
    /// Assess a case record as of `today`. Pure over its inputs; the
    /// settings travel with the record's meta section.
    pub fn from_record(record: &CaseRecord, today: NaiveDate) -> Self {
        let settings = record.meta.cost_settings;

        let assess = |party: Party| PartyAssessment {
            party,
            conduct: conduct::score(
                record.doc_prod.filed_by(party),
                settings.doc_prod_threshold,
            ),
            delay: delay::penalties(
                &record.timeline,
                party,
                settings.delay_penalty_rate,
                today,
            ),
        };

        Self {
            settings,
            claimant: assess(Party::Claimant),
            respondent: assess(Party::Respondent),
        }
    }

    pub fn parties(&self) -> [&PartyAssessment; 2] {
        [&self.claimant, &self.respondent]
    }

    pub fn no_delay_deductions(&self) -> bool {
        self.claimant.delay.total_percent == 0.0 && self.respondent.delay.total_percent == 0.0
    }
}

/// Which strategy produced the narrative text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    Generative,
    Template,
}

/// The narrative handed to the document-rendering consumer. When the
/// generative strategy degraded, `fallback_note` carries the reason as an
/// informational detail alongside the deterministic text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeOutcome {
    pub text: String,
    pub source: NarrativeSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_note: Option<String>,
}

/// Narrative producer with a guaranteed deterministic path.
///
/// The generator is a capability: absent, the template renders directly and
/// no network call is ever attempted. Present, any failure, timeout, or
/// empty response downgrades to the template. The template is rendered
/// before the service call, so the fallback never depends on the call
/// completing.
pub struct Synthesizer {
    generator: Option<Arc<dyn NarrativeGenerator>>,
}

impl Synthesizer {
    pub fn template_only() -> Self {
        Self { generator: None }
    }

    pub fn with_generator(generator: Arc<dyn NarrativeGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub async fn synthesize(&self, assessment: &CostAllocationAssessment) -> NarrativeOutcome {
        let template = narrative::render_template(assessment);

        let Some(generator) = &self.generator else {
            return NarrativeOutcome {
                text: template,
                source: NarrativeSource::Template,
                fallback_note: None,
            };
        };

        let prompt = narrative::build_prompt(assessment);
        match generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => NarrativeOutcome {
                text,
                source: NarrativeSource::Generative,
                fallback_note: None,
            },
            Ok(_) => {
                warn!("generative drafting service returned empty text; using template");
                NarrativeOutcome {
                    text: template,
                    source: NarrativeSource::Template,
                    fallback_note: Some(
                        "generative drafting service returned empty text".to_string(),
                    ),
                }
            }
            Err(error) => {
                warn!(%error, "generative drafting service failed; using template");
                NarrativeOutcome {
                    text: template,
                    source: NarrativeSource::Template,
                    fallback_note: Some(error.to_string()),
                }
            }
        }
    }
}

/// Full allocation output for one case.
#[derive(Debug, Clone, Serialize)]
pub struct CostAllocationReport {
    pub case_id: CaseId,
    pub assessed_on: NaiveDate,
    pub claimant: PartyAssessment,
    pub respondent: PartyAssessment,
    /// Present only when a proposed final award figure was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_award: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reversal_triggers: Vec<ReversalTrigger>,
    pub narrative: NarrativeOutcome,
}

impl CostAllocationReport {
    pub async fn build(
        case_id: CaseId,
        record: &CaseRecord,
        final_award: Option<f64>,
        today: NaiveDate,
        synthesizer: &Synthesizer,
    ) -> Self {
        let assessment = CostAllocationAssessment::from_record(record, today);
        let narrative = synthesizer.synthesize(&assessment).await;
        let reversal_triggers = match final_award {
            Some(award) => offers::evaluate(&record.costs.sealed_offers, award),
            None => Vec::new(),
        };

        Self {
            case_id,
            assessed_on: today,
            claimant: assessment.claimant,
            respondent: assessment.respondent,
            final_award,
            reversal_triggers,
            narrative,
        }
    }
}
