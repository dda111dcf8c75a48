use serde::{Deserialize, Serialize};

use crate::workflows::arbitration::domain::Party;

/// Who logged a cost entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostParty {
    Claimant,
    Respondent,
    Common,
}

impl CostParty {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Claimant => "Claimant",
            Self::Respondent => "Respondent",
            Self::Common => "Common",
        }
    }
}

/// One line of the running cost ledger. Append-only; entries are never
/// mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLogEntry {
    pub phase: String,
    pub category: String,
    pub date: String,
    pub amount: f64,
    pub logged_by: CostParty,
}

impl CostLogEntry {
    /// Amounts are monetary values; negative entries are rejected at the
    /// door rather than silently skewing totals.
    pub fn new(
        phase: String,
        category: String,
        date: String,
        amount: f64,
        logged_by: CostParty,
    ) -> Result<Self, CostError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CostError::InvalidAmount(amount));
        }
        Ok(Self {
            phase,
            category,
            date,
            amount,
            logged_by,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CostError {
    #[error("cost amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),
}

/// Disclosure state of a settlement offer. The evaluator reads offers
/// regardless; revealing is a presentation concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Sealed,
    Revealed,
}

/// A confidential settlement offer. The amount stays in its stored string
/// form; evaluation parses it with an explicit failure branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SealedOffer {
    pub party: Party,
    pub amount: String,
    pub date: String,
    pub status: OfferStatus,
}

impl SealedOffer {
    pub fn parsed_amount(&self) -> Result<f64, std::num::ParseFloatError> {
        self.amount.trim().replace(',', "").parse::<f64>()
    }
}

/// Per-case scoring configuration, stored in the record's meta section and
/// passed by value into every computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostSettings {
    /// Rejection-rate percentage above which the document-production
    /// penalty applies. Strictly above: a tie does not trigger.
    #[serde(default = "CostSettings::default_threshold")]
    pub doc_prod_threshold: f64,
    /// Cost deduction in percent per day of delay.
    #[serde(default = "CostSettings::default_rate")]
    pub delay_penalty_rate: f64,
}

impl CostSettings {
    const fn default_threshold() -> f64 {
        75.0
    }

    const fn default_rate() -> f64 {
        0.5
    }
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            doc_prod_threshold: Self::default_threshold(),
            delay_penalty_rate: Self::default_rate(),
        }
    }
}
