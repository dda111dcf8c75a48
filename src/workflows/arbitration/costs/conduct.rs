use serde::Serialize;

use super::super::redfern::domain::{DocumentRequest, RequestStatus};

/// Document-production conduct metric for one party. Derived on demand,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConductScore {
    /// Rejection rate in percent, within [0, 100].
    pub ratio: f64,
    pub penalty_triggered: bool,
}

impl ConductScore {
    pub const fn neutral() -> Self {
        Self {
            ratio: 0.0,
            penalty_triggered: false,
        }
    }
}

/// Score the requests one party filed (not the requests it received).
///
/// The denominator is every filed request, resolved or not: a backlog of
/// still-Pending requests dilutes the ratio instead of being excluded.
/// The penalty flag uses strict comparison; a ratio exactly at the
/// threshold does not trigger.
pub fn score(requests: &[DocumentRequest], threshold: f64) -> ConductScore {
    if requests.is_empty() {
        return ConductScore::neutral();
    }

    let rejected = requests
        .iter()
        .filter(|request| request.status == RequestStatus::Denied)
        .count();
    let ratio = rejected as f64 / requests.len() as f64 * 100.0;

    ConductScore {
        ratio,
        penalty_triggered: ratio > threshold,
    }
}
