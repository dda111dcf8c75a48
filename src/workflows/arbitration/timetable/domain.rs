use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::arbitration::domain::{Party, ResponsibleParty};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Compliance state of a timetable obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Upcoming,
    CommencedPending,
    AwaitingCompliance,
    Completed,
}

impl ComplianceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::CommencedPending => "Commenced and Pending",
            Self::AwaitingCompliance => "Awaiting Compliance",
            Self::Completed => "Completed",
        }
    }
}

/// One milestone of the procedural order.
///
/// Dates are carried as `YYYY-MM-DD` strings, the wire form the record store
/// holds; parsing happens at the point of use with an explicit error branch.
/// The effective deadline is `current_deadline` when an extension has been
/// approved, the original `deadline` otherwise. The change history is
/// append-only; events are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableEvent {
    pub id: String,
    pub milestone: String,
    pub deadline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_deadline: Option<String>,
    pub responsible: ResponsibleParty,
    pub status: ComplianceStatus,
    #[serde(default)]
    pub history: Vec<String>,
}

impl TimetableEvent {
    pub fn effective_deadline_raw(&self) -> &str {
        self.current_deadline.as_deref().unwrap_or(&self.deadline)
    }

    /// Parse the effective deadline. Callers decide what a parse failure
    /// means for them; aggregations skip the event, imports reject the row.
    pub fn effective_deadline(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(self.effective_deadline_raw().trim(), DATE_FORMAT)
    }
}

/// Lifecycle of an extension-of-time request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionStatus {
    Pending,
    Approved,
    Denied,
}

impl ExtensionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Denied => "Denied",
        }
    }

    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Approved | Self::Denied)
    }
}

/// The tribunal's disposition of an extension request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionDecision {
    Approved,
    Denied,
}

impl ExtensionDecision {
    pub const fn status(self) -> ExtensionStatus {
        match self {
            Self::Approved => ExtensionStatus::Approved,
            Self::Denied => ExtensionStatus::Denied,
        }
    }
}

/// A party's request to move a deadline. Resolved exactly once; afterwards
/// the record is immutable and can only be superseded by a new request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionRequest {
    pub id: String,
    pub event_id: String,
    pub party: Party,
    pub reason: String,
    pub proposed_date: String,
    pub status: ExtensionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_note: Option<String>,
    #[serde(default)]
    pub consensual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_late: Option<i64>,
}
