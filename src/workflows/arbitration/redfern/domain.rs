use serde::{Deserialize, Serialize};

use crate::workflows::arbitration::domain::Party;

/// Lifecycle of a document-production request.
///
/// Transitions run one way: Pending -> Objected -> Responded, with a ruling
/// (Allowed/Denied) allowed from any of the three and terminal thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Objected,
    Responded,
    Allowed,
    Denied,
}

impl RequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Objected => "Objected",
            Self::Responded => "Responded",
            Self::Allowed => "Allowed",
            Self::Denied => "Denied",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Allowed | Self::Denied)
    }
}

/// Tribunal ruling on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ruling {
    Allowed,
    Denied,
}

impl Ruling {
    pub const fn status(self) -> RequestStatus {
        match self {
            Self::Allowed => RequestStatus::Allowed,
            Self::Denied => RequestStatus::Denied,
        }
    }
}

/// One row of the Redfern schedule.
///
/// Filed by `party`; the objection column belongs to the opposing party, the
/// reply to the filing party, the ruling to the tribunal. Rows are never
/// deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub id: String,
    pub party: Party,
    pub description: String,
    pub relevance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruling: Option<String>,
    pub status: RequestStatus,
}

impl DocumentRequest {
    pub fn new(id: String, party: Party, description: String, relevance: String) -> Self {
        Self {
            id,
            party,
            description,
            relevance,
            objection: None,
            reply: None,
            ruling: None,
            status: RequestStatus::Pending,
        }
    }
}
