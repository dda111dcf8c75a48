//! Procedural case management for arbitration: the Redfern document
//! production schedule, the shared timetable with extensions of time, the
//! cost ledger with sealed offers, and the cost-allocation engine that
//! scores procedural conduct into a narrative.

pub mod costs;
pub mod domain;
pub mod notify;
pub mod redfern;
pub mod router;
pub mod service;
pub mod store;
pub mod timetable;

#[cfg(test)]
mod tests;

pub use costs::{
    ConductScore, CostAllocationAssessment, CostAllocationReport, CostError, CostLogEntry,
    CostParty, CostSettings, DelayAssessment, NarrativeOutcome, NarrativeSource, OfferStatus,
    ReversalTrigger, SealedOffer, Synthesizer,
};
pub use costs::allocation::{ChatCompletionsGenerator, NarrativeError, NarrativeGenerator};
pub use domain::{CaseId, Party, ResponsibleParty};
pub use notify::{LogPublisher, Notification, NotificationPublisher, NotifyError};
pub use redfern::{DocumentRequest, RedfernError, RedfernScheduleView, RequestStatus, Ruling};
pub use router::case_router;
pub use service::{ArbitrationCaseService, CaseServiceError};
pub use store::{
    CaseMeta, CaseRecord, CaseStore, CostSection, DocumentProduction, MemoryCaseStore, StoreError,
};
pub use timetable::{
    ComplianceStatus, ExtensionDecision, ExtensionRequest, ExtensionStatus, TimetableError,
    TimetableEvent, TimetableImportError, TimetableImporter,
};
