use std::fmt::Write as _;

use super::CostAllocationAssessment;

/// Render the deterministic four-section narrative. Ratios and percentages
/// interpolate to one decimal place.
pub(crate) fn render_template(assessment: &CostAllocationAssessment) -> String {
    let mut text = String::new();

    writeln!(
        text,
        "1. General principle: costs follow the event, subject to each party's procedural conduct."
    )
    .expect("write principle");

    writeln!(text, "2. Document production:").expect("write doc-prod heading");
    for party in assessment.parties() {
        if party.conduct.penalty_triggered {
            writeln!(
                text,
                "- {}: rejection rate {:.1}% exceeds the {:.1}% threshold; the {} bears 100% of its own document-production costs.",
                party.party.label(),
                party.conduct.ratio,
                assessment.settings.doc_prod_threshold,
                party.party.label(),
            )
            .expect("write doc-prod penalty");
        } else {
            writeln!(
                text,
                "- {}: rejection rate {:.1}% was within reasonable limits.",
                party.party.label(),
                party.conduct.ratio,
            )
            .expect("write doc-prod neutral");
        }
    }

    writeln!(text, "3. Delay:").expect("write delay heading");
    if assessment.no_delay_deductions() {
        writeln!(text, "- No deductions for delay on either side.").expect("write no deductions");
    } else {
        for party in assessment.parties() {
            writeln!(
                text,
                "- {}: deductions total {:.1}%.",
                party.party.label(),
                party.delay.total_percent,
            )
            .expect("write delay total");
            for line in &party.delay.log {
                writeln!(text, "  - {line}").expect("write delay line");
            }
        }
    }

    writeln!(
        text,
        "4. Allocation: the tribunal applies the adjustments above to the final costs award."
    )
    .expect("write allocation");

    text
}

/// Closed-form prompt for the generative strategy, seeded with exactly the
/// metrics the template renders.
pub(crate) fn build_prompt(assessment: &CostAllocationAssessment) -> String {
    let mut prompt = String::new();

    writeln!(
        prompt,
        "Draft a cost-allocation section for an arbitral award. Use four numbered sections: \
general principle, document production, delay, allocation. State that costs follow the \
event, subject to conduct. Do not invent figures beyond those given."
    )
    .expect("write instructions");

    for party in assessment.parties() {
        writeln!(
            prompt,
            "{}: document-production rejection rate {:.1}% (threshold {:.1}%, penalty {}); \
delay deductions {:.1}%{}.",
            party.party.label(),
            party.conduct.ratio,
            assessment.settings.doc_prod_threshold,
            if party.conduct.penalty_triggered {
                "triggered"
            } else {
                "not triggered"
            },
            party.delay.total_percent,
            if party.delay.log.is_empty() {
                String::new()
            } else {
                format!(" ({})", party.delay.log.join("; "))
            },
        )
        .expect("write party metrics");
    }

    prompt
}
