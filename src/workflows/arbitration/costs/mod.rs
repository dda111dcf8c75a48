//! Cost and conduct scoring: document-production rejection ratios, delay
//! penalties, sealed-offer comparisons, and the allocation narrative built
//! from them.

pub mod allocation;
pub mod conduct;
pub mod delay;
pub mod domain;
pub mod offers;

pub use allocation::{
    CostAllocationAssessment, CostAllocationReport, NarrativeOutcome, NarrativeSource,
    PartyAssessment, Synthesizer,
};
pub use conduct::ConductScore;
pub use delay::DelayAssessment;
pub use domain::{CostError, CostLogEntry, CostParty, CostSettings, OfferStatus, SealedOffer};
pub use offers::ReversalTrigger;
