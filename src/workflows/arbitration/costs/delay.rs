use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::Party;
use super::super::timetable::domain::{ComplianceStatus, TimetableEvent};

/// Cumulative delay deduction for one party, with one log line per
/// contributing event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayAssessment {
    /// Total deduction in percent of the party's recoverable costs.
    pub total_percent: f64,
    pub log: Vec<String>,
}

impl DelayAssessment {
    pub const fn zero() -> Self {
        Self {
            total_percent: 0.0,
            log: Vec::new(),
        }
    }
}

/// Accumulate delay penalties for `role` across the timeline.
///
/// An event qualifies when its responsibility covers `role` (collective
/// events charge every party independently) and its status is exactly
/// Awaiting Compliance. Events that were late but have since been marked
/// Completed contribute nothing. An unparseable deadline skips that event
/// only; the rest of the timeline still aggregates.
pub fn penalties(
    timeline: &[TimetableEvent],
    role: Party,
    rate: f64,
    today: NaiveDate,
) -> DelayAssessment {
    let mut total_percent = 0.0;
    let mut log = Vec::new();

    for event in timeline {
        if !event.responsible.charged_to(role) {
            continue;
        }
        if event.status != ComplianceStatus::AwaitingCompliance {
            continue;
        }

        let deadline = match event.effective_deadline() {
            Ok(deadline) => deadline,
            Err(error) => {
                tracing::debug!(
                    event_id = %event.id,
                    raw = event.effective_deadline_raw(),
                    %error,
                    "skipping event with unparseable deadline"
                );
                continue;
            }
        };

        let days_overdue = (today - deadline).num_days();
        if days_overdue <= 0 {
            continue;
        }

        let penalty = days_overdue as f64 * rate;
        total_percent += penalty;
        log.push(format!(
            "{}: {} days overdue (-{:.1}%)",
            event.milestone, days_overdue, penalty
        ));
    }

    DelayAssessment { total_percent, log }
}
