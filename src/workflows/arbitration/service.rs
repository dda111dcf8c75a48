use std::io::Read;
use std::sync::Arc;

use chrono::NaiveDate;

use super::costs::allocation::{CostAllocationReport, Synthesizer};
use super::costs::domain::{CostError, CostLogEntry, CostParty, OfferStatus, SealedOffer};
use super::domain::{CaseId, Party, ResponsibleParty};
use super::notify::{Notification, NotificationPublisher, NotifyError};
use super::redfern::domain::{DocumentRequest, Ruling};
use super::redfern::schedule::{self, RedfernError, RedfernScheduleView};
use super::store::{CaseRecord, CaseStore, StoreError};
use super::timetable::domain::{
    ComplianceStatus, ExtensionDecision, ExtensionRequest, TimetableEvent,
};
use super::timetable::extensions::{self, TimetableError};
use super::timetable::import::{TimetableImportError, TimetableImporter};

/// Service composing the case store, notification hook, and narrative
/// synthesizer. Every mutation reads the whole case record, applies the
/// change in memory, and writes the record back; concurrent editors race at
/// record granularity, last write wins.
pub struct ArbitrationCaseService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    synthesizer: Synthesizer,
}

/// Error raised by the case service.
#[derive(Debug, thiserror::Error)]
pub enum CaseServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Redfern(#[from] RedfernError),
    #[error(transparent)]
    Timetable(#[from] TimetableError),
    #[error(transparent)]
    Cost(#[from] CostError),
    #[error(transparent)]
    Import(#[from] TimetableImportError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

impl<S, N> ArbitrationCaseService<S, N>
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, synthesizer: Synthesizer) -> Self {
        Self {
            store,
            notifier,
            synthesizer,
        }
    }

    /// Open a fresh case record. Conflicts when the identifier is taken.
    pub fn open_case(&self, case_id: &CaseId) -> Result<CaseRecord, CaseServiceError> {
        let record = CaseRecord::default();
        self.store.create(case_id, record.clone())?;
        Ok(record)
    }

    fn with_record<T>(
        &self,
        case_id: &CaseId,
        mutate: impl FnOnce(&mut CaseRecord) -> Result<T, CaseServiceError>,
    ) -> Result<T, CaseServiceError> {
        let mut record = self.store.load(case_id)?;
        let value = mutate(&mut record)?;
        self.store.save(case_id, &record)?;
        Ok(value)
    }

    // --- Redfern schedule -------------------------------------------------

    pub fn file_document_request(
        &self,
        case_id: &CaseId,
        party: Party,
        description: String,
        relevance: String,
    ) -> Result<DocumentRequest, CaseServiceError> {
        self.with_record(case_id, |record| {
            Ok(schedule::file_request(
                &mut record.doc_prod,
                party,
                description,
                relevance,
            ))
        })
    }

    pub fn object_to_request(
        &self,
        case_id: &CaseId,
        request_id: &str,
        text: String,
    ) -> Result<DocumentRequest, CaseServiceError> {
        self.with_record(case_id, |record| {
            Ok(schedule::object(&mut record.doc_prod, request_id, text)?)
        })
    }

    pub fn reply_to_objection(
        &self,
        case_id: &CaseId,
        request_id: &str,
        text: String,
    ) -> Result<DocumentRequest, CaseServiceError> {
        self.with_record(case_id, |record| {
            Ok(schedule::reply(&mut record.doc_prod, request_id, text)?)
        })
    }

    pub fn rule_on_request(
        &self,
        case_id: &CaseId,
        request_id: &str,
        ruling: Ruling,
        text: String,
    ) -> Result<DocumentRequest, CaseServiceError> {
        self.with_record(case_id, |record| {
            Ok(schedule::rule(&mut record.doc_prod, request_id, ruling, text)?)
        })
    }

    pub fn schedule(&self, case_id: &CaseId) -> Result<RedfernScheduleView, CaseServiceError> {
        let record = self.store.load(case_id)?;
        Ok(RedfernScheduleView::from_schedule(&record.doc_prod))
    }

    // --- Timetable --------------------------------------------------------

    pub fn add_timetable_event(
        &self,
        case_id: &CaseId,
        milestone: String,
        deadline: String,
        responsible: ResponsibleParty,
    ) -> Result<TimetableEvent, CaseServiceError> {
        let event = self.with_record(case_id, |record| {
            Ok(extensions::add_event(
                &mut record.timeline,
                milestone,
                deadline,
                responsible,
            ))
        })?;

        self.notifier.publish(Notification {
            recipients: all_parties(),
            subject: format!("Timetable updated: {}", event.milestone),
            body: format!(
                "\"{}\" added to the procedural timetable, due {} ({}).",
                event.milestone,
                event.deadline,
                event.responsible.label()
            ),
        })?;

        Ok(event)
    }

    pub fn set_compliance_status(
        &self,
        case_id: &CaseId,
        event_id: &str,
        status: ComplianceStatus,
    ) -> Result<TimetableEvent, CaseServiceError> {
        let event = self.with_record(case_id, |record| {
            Ok(extensions::set_status(&mut record.timeline, event_id, status)?)
        })?;

        self.notifier.publish(Notification {
            recipients: all_parties(),
            subject: format!("Timetable updated: {}", event.milestone),
            body: format!(
                "\"{}\" is now {}.",
                event.milestone,
                event.status.label()
            ),
        })?;

        Ok(event)
    }

    /// Replace the timeline with a procedural-order spreadsheet export.
    pub fn import_timetable<R: Read>(
        &self,
        case_id: &CaseId,
        reader: R,
    ) -> Result<Vec<TimetableEvent>, CaseServiceError> {
        let timeline = TimetableImporter::from_reader(reader)?;
        self.with_record(case_id, |record| {
            record.timeline = timeline.clone();
            Ok(())
        })?;
        Ok(timeline)
    }

    // --- Extensions of time ----------------------------------------------

    pub fn request_extension(
        &self,
        case_id: &CaseId,
        event_id: &str,
        party: Party,
        reason: String,
        proposed_date: String,
        consensual: bool,
        filed_on: NaiveDate,
    ) -> Result<ExtensionRequest, CaseServiceError> {
        let (request, notification) = self.with_record(case_id, |record| {
            Ok(extensions::file_extension(
                &record.timeline,
                &mut record.delays,
                event_id,
                party,
                reason,
                proposed_date,
                consensual,
                filed_on,
            )?)
        })?;

        self.notifier.publish(notification)?;
        Ok(request)
    }

    pub fn resolve_extension(
        &self,
        case_id: &CaseId,
        extension_id: &str,
        decision: ExtensionDecision,
        note: Option<String>,
    ) -> Result<ExtensionRequest, CaseServiceError> {
        let (request, notification) = self.with_record(case_id, |record| {
            Ok(extensions::resolve_extension(
                &mut record.timeline,
                &mut record.delays,
                extension_id,
                decision,
                note,
            )?)
        })?;

        self.notifier.publish(notification)?;
        Ok(request)
    }

    // --- Costs ------------------------------------------------------------

    pub fn log_cost(
        &self,
        case_id: &CaseId,
        phase: String,
        category: String,
        date: String,
        amount: f64,
        logged_by: CostParty,
    ) -> Result<CostLogEntry, CaseServiceError> {
        let entry = CostLogEntry::new(phase, category, date, amount, logged_by)?;
        self.with_record(case_id, |record| {
            let log = match logged_by {
                CostParty::Claimant => &mut record.costs.claimant_log,
                CostParty::Respondent => &mut record.costs.respondent_log,
                CostParty::Common => &mut record.costs.common_log,
            };
            log.push(entry.clone());
            Ok(())
        })?;
        Ok(entry)
    }

    pub fn record_sealed_offer(
        &self,
        case_id: &CaseId,
        party: Party,
        amount: String,
        date: String,
    ) -> Result<SealedOffer, CaseServiceError> {
        let offer = SealedOffer {
            party,
            amount,
            date,
            status: OfferStatus::Sealed,
        };
        self.with_record(case_id, |record| {
            record.costs.sealed_offers.push(offer.clone());
            Ok(())
        })?;
        Ok(offer)
    }

    /// Assess conduct and delay for both parties, evaluate sealed offers
    /// when a final award figure is supplied, and render the narrative.
    pub async fn cost_allocation(
        &self,
        case_id: &CaseId,
        final_award: Option<f64>,
        today: NaiveDate,
    ) -> Result<CostAllocationReport, CaseServiceError> {
        let record = self.store.load(case_id)?;
        Ok(CostAllocationReport::build(
            case_id.clone(),
            &record,
            final_award,
            today,
            &self.synthesizer,
        )
        .await)
    }
}

fn all_parties() -> Vec<String> {
    vec![
        Party::Claimant.label().to_string(),
        Party::Respondent.label().to_string(),
    ]
}
