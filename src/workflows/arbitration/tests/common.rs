use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::workflows::arbitration::costs::allocation::{NarrativeError, NarrativeGenerator};
use crate::workflows::arbitration::costs::domain::CostSettings;
use crate::workflows::arbitration::domain::{CaseId, Party, ResponsibleParty};
use crate::workflows::arbitration::notify::{Notification, NotificationPublisher, NotifyError};
use crate::workflows::arbitration::redfern::domain::{DocumentRequest, RequestStatus};
use crate::workflows::arbitration::service::ArbitrationCaseService;
use crate::workflows::arbitration::store::{CaseRecord, MemoryCaseStore};
use crate::workflows::arbitration::timetable::domain::{ComplianceStatus, TimetableEvent};
use crate::workflows::arbitration::Synthesizer;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 7).expect("valid date")
}

pub(super) fn settings() -> CostSettings {
    CostSettings::default()
}

pub(super) fn request(id: &str, party: Party, status: RequestStatus) -> DocumentRequest {
    DocumentRequest {
        id: id.to_string(),
        party,
        description: format!("Category {id}"),
        relevance: "Material and relevant".to_string(),
        objection: None,
        reply: None,
        ruling: None,
        status,
    }
}

/// Build a request list with the given mix of outcomes.
pub(super) fn requests_with(
    party: Party,
    denied: usize,
    allowed: usize,
    pending: usize,
) -> Vec<DocumentRequest> {
    let mut requests = Vec::new();
    let prefix = match party {
        Party::Claimant => "C",
        Party::Respondent => "R",
    };
    for (status, count) in [
        (RequestStatus::Denied, denied),
        (RequestStatus::Allowed, allowed),
        (RequestStatus::Pending, pending),
    ] {
        for _ in 0..count {
            let id = format!("{}-{}", prefix, requests.len() + 1);
            requests.push(request(&id, party, status));
        }
    }
    requests
}

pub(super) fn event(
    id: &str,
    milestone: &str,
    deadline: &str,
    responsible: ResponsibleParty,
    status: ComplianceStatus,
) -> TimetableEvent {
    TimetableEvent {
        id: id.to_string(),
        milestone: milestone.to_string(),
        deadline: deadline.to_string(),
        current_deadline: None,
        responsible,
        status,
        history: Vec::new(),
    }
}

/// Event whose effective deadline sits `days_overdue` days before `today()`.
pub(super) fn overdue_event(
    id: &str,
    milestone: &str,
    responsible: ResponsibleParty,
    days_overdue: i64,
) -> TimetableEvent {
    let deadline = (today() - chrono::Duration::days(days_overdue))
        .format("%Y-%m-%d")
        .to_string();
    event(
        id,
        milestone,
        &deadline,
        responsible,
        ComplianceStatus::AwaitingCompliance,
    )
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifier {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

/// Generator that always fails, for exercising the fallback path.
pub(super) struct FailingGenerator;

#[async_trait]
impl NarrativeGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, NarrativeError> {
        Err(NarrativeError::MalformedResponse)
    }
}

/// Generator that returns a fixed body, for exercising the service path.
pub(super) struct CannedGenerator(pub(super) &'static str);

#[async_trait]
impl NarrativeGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, NarrativeError> {
        Ok(self.0.to_string())
    }
}

pub(super) type TestService = ArbitrationCaseService<MemoryCaseStore, MemoryNotifier>;

pub(super) fn build_service() -> (Arc<TestService>, Arc<MemoryCaseStore>, MemoryNotifier) {
    build_service_with(Synthesizer::template_only())
}

pub(super) fn build_service_with(
    synthesizer: Synthesizer,
) -> (Arc<TestService>, Arc<MemoryCaseStore>, MemoryNotifier) {
    let store = Arc::new(MemoryCaseStore::default());
    let notifier = MemoryNotifier::default();
    let service = Arc::new(ArbitrationCaseService::new(
        store.clone(),
        Arc::new(notifier.clone()),
        synthesizer,
    ));
    (service, store, notifier)
}

pub(super) fn opened_case(service: &TestService) -> CaseId {
    let case_id = CaseId("case-001".to_string());
    service.open_case(&case_id).expect("case opens");
    case_id
}

/// A record with a heavy-handed claimant (8 of 10 requests denied), a
/// restrained respondent (1 of 5 denied), and one overdue claimant
/// obligation.
pub(super) fn scenario_record() -> CaseRecord {
    let mut record = CaseRecord::default();
    record.doc_prod.claimant = requests_with(Party::Claimant, 8, 2, 0);
    record.doc_prod.respondent = requests_with(Party::Respondent, 1, 4, 0);
    record.timeline = vec![overdue_event(
        "T-1",
        "Statement of Defence",
        ResponsibleParty::Claimant,
        10,
    )];
    record
}
