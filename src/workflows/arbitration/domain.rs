use serde::{Deserialize, Serialize};

/// Identifier wrapper for arbitration cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named party to the arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Claimant,
    Respondent,
}

impl Party {
    pub const fn ordered() -> [Self; 2] {
        [Self::Claimant, Self::Respondent]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Claimant => "Claimant",
            Self::Respondent => "Respondent",
        }
    }

    pub const fn opposing(self) -> Self {
        match self {
            Self::Claimant => Self::Respondent,
            Self::Respondent => Self::Claimant,
        }
    }
}

/// Who answers for a timetable obligation.
///
/// `All` is the collective designator: it charges every party independently,
/// not a split share. `Tribunal` obligations charge neither party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsibleParty {
    Claimant,
    Respondent,
    Tribunal,
    #[serde(alias = "both")]
    All,
}

impl ResponsibleParty {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Claimant => "Claimant",
            Self::Respondent => "Respondent",
            Self::Tribunal => "Tribunal",
            Self::All => "All Parties",
        }
    }

    pub const fn charged_to(self, party: Party) -> bool {
        match self {
            Self::Claimant => matches!(party, Party::Claimant),
            Self::Respondent => matches!(party, Party::Respondent),
            Self::Tribunal => false,
            Self::All => true,
        }
    }
}
