use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::costs::domain::{CostLogEntry, CostSettings, SealedOffer};
use super::domain::{CaseId, Party};
use super::redfern::domain::DocumentRequest;
use super::timetable::domain::{ExtensionRequest, TimetableEvent};

/// The whole nested case document, read and written wholesale.
///
/// Every mutation goes load -> modify in memory -> save; two concurrent
/// editors of the same case race at whole-record granularity (last write
/// wins), never at field granularity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(default)]
    pub doc_prod: DocumentProduction,
    #[serde(default)]
    pub timeline: Vec<TimetableEvent>,
    #[serde(default)]
    pub delays: Vec<ExtensionRequest>,
    #[serde(default)]
    pub costs: CostSection,
    #[serde(default)]
    pub meta: CaseMeta,
}

/// Redfern schedule storage: one request list per filing party.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentProduction {
    #[serde(default)]
    pub claimant: Vec<DocumentRequest>,
    #[serde(default)]
    pub respondent: Vec<DocumentRequest>,
}

impl DocumentProduction {
    pub fn filed_by(&self, party: Party) -> &[DocumentRequest] {
        match party {
            Party::Claimant => &self.claimant,
            Party::Respondent => &self.respondent,
        }
    }

    pub fn filed_by_mut(&mut self, party: Party) -> &mut Vec<DocumentRequest> {
        match party {
            Party::Claimant => &mut self.claimant,
            Party::Respondent => &mut self.respondent,
        }
    }

    /// Locate a request by its schedule id, whichever list holds it.
    pub fn find_mut(&mut self, request_id: &str) -> Option<&mut DocumentRequest> {
        self.claimant
            .iter_mut()
            .chain(self.respondent.iter_mut())
            .find(|request| request.id == request_id)
    }
}

/// Cost ledger storage: per-party logs, a common log, and sealed offers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostSection {
    #[serde(default)]
    pub claimant_log: Vec<CostLogEntry>,
    #[serde(default)]
    pub respondent_log: Vec<CostLogEntry>,
    #[serde(default)]
    pub common_log: Vec<CostLogEntry>,
    #[serde(default)]
    pub sealed_offers: Vec<SealedOffer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseMeta {
    #[serde(default)]
    pub cost_settings: CostSettings,
}

/// Storage abstraction so the case service can be exercised in isolation.
pub trait CaseStore: Send + Sync {
    fn create(&self, case_id: &CaseId, record: CaseRecord) -> Result<(), StoreError>;
    fn load(&self, case_id: &CaseId) -> Result<CaseRecord, StoreError>;
    fn save(&self, case_id: &CaseId, record: &CaseRecord) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("case {0} already exists")]
    Conflict(CaseId),
    #[error("case {0} not found")]
    NotFound(CaseId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// In-process store backing the server, the demo CLI, and tests.
#[derive(Debug, Default)]
pub struct MemoryCaseStore {
    records: Mutex<HashMap<CaseId, CaseRecord>>,
}

impl CaseStore for MemoryCaseStore {
    fn create(&self, case_id: &CaseId, record: CaseRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("case store mutex poisoned");
        if guard.contains_key(case_id) {
            return Err(StoreError::Conflict(case_id.clone()));
        }
        guard.insert(case_id.clone(), record);
        Ok(())
    }

    fn load(&self, case_id: &CaseId) -> Result<CaseRecord, StoreError> {
        let guard = self.records.lock().expect("case store mutex poisoned");
        guard
            .get(case_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(case_id.clone()))
    }

    fn save(&self, case_id: &CaseId, record: &CaseRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("case store mutex poisoned");
        if !guard.contains_key(case_id) {
            return Err(StoreError::NotFound(case_id.clone()));
        }
        guard.insert(case_id.clone(), record.clone());
        Ok(())
    }
}
