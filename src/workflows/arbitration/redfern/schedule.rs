use serde::Serialize;

use super::domain::{DocumentRequest, RequestStatus, Ruling};
use crate::workflows::arbitration::domain::Party;
use crate::workflows::arbitration::store::DocumentProduction;

/// Error enumeration for schedule mutations.
#[derive(Debug, thiserror::Error)]
pub enum RedfernError {
    #[error("document request {0} not found")]
    RequestNotFound(String),
    #[error("cannot {action} a request in status {}", status.label())]
    InvalidTransition {
        action: &'static str,
        status: RequestStatus,
    },
}

/// File a new request for the given party. Ids are sequential within the
/// party's list: C-1, C-2, ... for the claimant, R-1, R-2, ... for the
/// respondent.
pub fn file_request(
    schedule: &mut DocumentProduction,
    party: Party,
    description: String,
    relevance: String,
) -> DocumentRequest {
    let list = schedule.filed_by_mut(party);
    let prefix = match party {
        Party::Claimant => "C",
        Party::Respondent => "R",
    };
    let id = format!("{}-{}", prefix, list.len() + 1);
    let request = DocumentRequest::new(id, party, description, relevance);
    list.push(request.clone());
    request
}

/// Record the opposing party's objection. Only a Pending request can be
/// objected to.
pub fn object(
    schedule: &mut DocumentProduction,
    request_id: &str,
    text: String,
) -> Result<DocumentRequest, RedfernError> {
    let request = schedule
        .find_mut(request_id)
        .ok_or_else(|| RedfernError::RequestNotFound(request_id.to_string()))?;

    if request.status != RequestStatus::Pending {
        return Err(RedfernError::InvalidTransition {
            action: "object to",
            status: request.status,
        });
    }

    request.objection = Some(text);
    request.status = RequestStatus::Objected;
    Ok(request.clone())
}

/// Record the filing party's reply to an objection.
pub fn reply(
    schedule: &mut DocumentProduction,
    request_id: &str,
    text: String,
) -> Result<DocumentRequest, RedfernError> {
    let request = schedule
        .find_mut(request_id)
        .ok_or_else(|| RedfernError::RequestNotFound(request_id.to_string()))?;

    if request.status != RequestStatus::Objected {
        return Err(RedfernError::InvalidTransition {
            action: "reply on",
            status: request.status,
        });
    }

    request.reply = Some(text);
    request.status = RequestStatus::Responded;
    Ok(request.clone())
}

/// Enter the tribunal's ruling. Allowed from Pending, Objected, or
/// Responded; Allowed/Denied are terminal.
pub fn rule(
    schedule: &mut DocumentProduction,
    request_id: &str,
    ruling: Ruling,
    text: String,
) -> Result<DocumentRequest, RedfernError> {
    let request = schedule
        .find_mut(request_id)
        .ok_or_else(|| RedfernError::RequestNotFound(request_id.to_string()))?;

    if request.status.is_terminal() {
        return Err(RedfernError::InvalidTransition {
            action: "rule on",
            status: request.status,
        });
    }

    request.ruling = Some(text);
    request.status = ruling.status();
    Ok(request.clone())
}

/// Sanitized schedule representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct RedfernScheduleView {
    pub claimant: ScheduleColumnView,
    pub respondent: ScheduleColumnView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleColumnView {
    pub requests: Vec<DocumentRequest>,
    pub total: usize,
    pub denied: usize,
}

impl RedfernScheduleView {
    pub fn from_schedule(schedule: &DocumentProduction) -> Self {
        Self {
            claimant: ScheduleColumnView::from_requests(schedule.filed_by(Party::Claimant)),
            respondent: ScheduleColumnView::from_requests(schedule.filed_by(Party::Respondent)),
        }
    }
}

impl ScheduleColumnView {
    fn from_requests(requests: &[DocumentRequest]) -> Self {
        Self {
            requests: requests.to_vec(),
            total: requests.len(),
            denied: requests
                .iter()
                .filter(|request| request.status == RequestStatus::Denied)
                .count(),
        }
    }
}
