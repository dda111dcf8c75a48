use chrono::NaiveDate;

use super::domain::{
    ComplianceStatus, ExtensionDecision, ExtensionRequest, ExtensionStatus, TimetableEvent,
};
use crate::workflows::arbitration::domain::{Party, ResponsibleParty};
use crate::workflows::arbitration::notify::Notification;

/// Error enumeration for timetable mutations.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    #[error("timetable event {0} not found")]
    EventNotFound(String),
    #[error("extension request {0} not found")]
    ExtensionNotFound(String),
    #[error("extension request {0} has already been resolved")]
    AlreadyResolved(String),
}

/// Append a new event to the timeline. Ids are sequential: T-1, T-2, ...
pub fn add_event(
    timeline: &mut Vec<TimetableEvent>,
    milestone: String,
    deadline: String,
    responsible: ResponsibleParty,
) -> TimetableEvent {
    let id = format!("T-{}", timeline.len() + 1);
    let event = TimetableEvent {
        id,
        milestone,
        history: vec![format!("Created with deadline {deadline}")],
        deadline,
        current_deadline: None,
        responsible,
        status: ComplianceStatus::Upcoming,
    };
    timeline.push(event.clone());
    event
}

/// Move an event to a new compliance status, appending to its history.
pub fn set_status(
    timeline: &mut [TimetableEvent],
    event_id: &str,
    status: ComplianceStatus,
) -> Result<TimetableEvent, TimetableError> {
    let event = find_event_mut(timeline, event_id)?;
    let previous = event.status;
    event.status = status;
    event.history.push(format!(
        "Status changed from {} to {}",
        previous.label(),
        status.label()
    ));
    Ok(event.clone())
}

/// File an extension-of-time request against an event.
///
/// When the filing date is past the event's effective deadline the request
/// carries the lateness in days; an unparseable deadline leaves it unset.
pub fn file_extension(
    timeline: &[TimetableEvent],
    delays: &mut Vec<ExtensionRequest>,
    event_id: &str,
    party: Party,
    reason: String,
    proposed_date: String,
    consensual: bool,
    filed_on: NaiveDate,
) -> Result<(ExtensionRequest, Notification), TimetableError> {
    let event = timeline
        .iter()
        .find(|event| event.id == event_id)
        .ok_or_else(|| TimetableError::EventNotFound(event_id.to_string()))?;

    let days_late = match event.effective_deadline() {
        Ok(deadline) => {
            let days = (filed_on - deadline).num_days();
            (days > 0).then_some(days)
        }
        Err(error) => {
            tracing::debug!(
                event_id = %event.id,
                raw = event.effective_deadline_raw(),
                %error,
                "skipping lateness computation for unparseable deadline"
            );
            None
        }
    };

    let request = ExtensionRequest {
        id: format!("EOT-{}", delays.len() + 1),
        event_id: event.id.clone(),
        party,
        reason,
        proposed_date,
        status: ExtensionStatus::Pending,
        decision_note: None,
        consensual,
        days_late,
    };
    delays.push(request.clone());

    let notification = Notification {
        recipients: vec![
            party.opposing().label().to_string(),
            "Tribunal".to_string(),
        ],
        subject: format!("Extension of time requested for {}", event.milestone),
        body: format!(
            "{} requests moving \"{}\" from {} to {}. Reason: {}",
            party.label(),
            event.milestone,
            event.effective_deadline_raw(),
            request.proposed_date,
            request.reason
        ),
    };

    Ok((request, notification))
}

/// Resolve a pending extension request, exactly once.
///
/// Approval rewrites the target event's current deadline and appends to its
/// change history. Both outcomes notify both parties.
pub fn resolve_extension(
    timeline: &mut [TimetableEvent],
    delays: &mut [ExtensionRequest],
    extension_id: &str,
    decision: ExtensionDecision,
    note: Option<String>,
) -> Result<(ExtensionRequest, Notification), TimetableError> {
    let request = delays
        .iter_mut()
        .find(|request| request.id == extension_id)
        .ok_or_else(|| TimetableError::ExtensionNotFound(extension_id.to_string()))?;

    if request.status.is_resolved() {
        return Err(TimetableError::AlreadyResolved(request.id.clone()));
    }

    request.status = decision.status();
    request.decision_note = note;

    let event = find_event_mut(timeline, &request.event_id)?;
    let (subject, body) = match decision {
        ExtensionDecision::Approved => {
            let previous = event.effective_deadline_raw().to_string();
            event.current_deadline = Some(request.proposed_date.clone());
            event.history.push(format!(
                "Deadline moved from {} to {} ({} approved{})",
                previous,
                request.proposed_date,
                request.id,
                if request.consensual { ", consensual" } else { "" }
            ));
            (
                format!("Extension approved for {}", event.milestone),
                format!(
                    "\"{}\" now falls due on {}.",
                    event.milestone, request.proposed_date
                ),
            )
        }
        ExtensionDecision::Denied => {
            event.history.push(format!(
                "Extension {} denied; deadline remains {}",
                request.id,
                event.effective_deadline_raw()
            ));
            (
                format!("Extension denied for {}", event.milestone),
                format!(
                    "\"{}\" remains due on {}.",
                    event.milestone,
                    event.effective_deadline_raw()
                ),
            )
        }
    };

    let notification = Notification {
        recipients: vec![
            Party::Claimant.label().to_string(),
            Party::Respondent.label().to_string(),
        ],
        subject,
        body,
    };

    Ok((request.clone(), notification))
}

fn find_event_mut<'a>(
    timeline: &'a mut [TimetableEvent],
    event_id: &str,
) -> Result<&'a mut TimetableEvent, TimetableError> {
    timeline
        .iter_mut()
        .find(|event| event.id == event_id)
        .ok_or_else(|| TimetableError::EventNotFound(event_id.to_string()))
}
