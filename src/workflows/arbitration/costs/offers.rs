use serde::Serialize;

use super::domain::SealedOffer;
use crate::workflows::arbitration::domain::Party;

/// A sealed offer the eventual award failed to beat. The offering party is
/// treated as having beaten the award; the opposing party bears
/// cost-shifting liability from the offer date forward. Applying that
/// liability is the consumer's job; this record only identifies the offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReversalTrigger {
    pub party: Party,
    pub offer_date: String,
    pub offer_amount: f64,
    pub award_amount: f64,
}

/// Compare every stored offer against the proposed final award.
///
/// A trigger is emitted iff the award is strictly below the offer amount;
/// equality emits nothing. Offers are evaluated independently — several may
/// trigger, including offers from both parties; consuming logic resolves
/// conflicts. An unparseable amount skips that offer only.
pub fn evaluate(offers: &[SealedOffer], final_award: f64) -> Vec<ReversalTrigger> {
    let mut triggers = Vec::new();

    for offer in offers {
        match offer.parsed_amount() {
            Ok(amount) if final_award < amount => triggers.push(ReversalTrigger {
                party: offer.party,
                offer_date: offer.date.clone(),
                offer_amount: amount,
                award_amount: final_award,
            }),
            Ok(_) => {}
            Err(error) => {
                tracing::debug!(
                    offerer = offer.party.label(),
                    raw = %offer.amount,
                    %error,
                    "skipping sealed offer with non-numeric amount"
                );
            }
        }
    }

    triggers
}
