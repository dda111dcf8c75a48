use std::sync::Arc;

use super::common::*;
use crate::workflows::arbitration::costs::allocation::{
    CostAllocationAssessment, NarrativeSource, Synthesizer,
};
use crate::workflows::arbitration::store::CaseRecord;

fn scenario_assessment() -> CostAllocationAssessment {
    CostAllocationAssessment::from_record(&scenario_record(), today())
}

#[test]
fn assessment_gathers_both_parties() {
    let assessment = scenario_assessment();

    assert_eq!(assessment.claimant.conduct.ratio, 80.0);
    assert!(assessment.claimant.conduct.penalty_triggered);
    assert_eq!(assessment.respondent.conduct.ratio, 20.0);
    assert!(!assessment.respondent.conduct.penalty_triggered);
    assert_eq!(assessment.claimant.delay.total_percent, 5.0);
    assert_eq!(assessment.respondent.delay.total_percent, 0.0);
}

#[tokio::test]
async fn template_renders_all_four_sections_with_values() {
    let synthesizer = Synthesizer::template_only();
    let outcome = synthesizer.synthesize(&scenario_assessment()).await;

    assert_eq!(outcome.source, NarrativeSource::Template);
    assert!(outcome.fallback_note.is_none());

    let text = &outcome.text;
    assert!(text.contains("1. General principle"));
    assert!(text.contains("costs follow the event"));
    assert!(text.contains("2. Document production:"));
    assert!(text.contains("3. Delay:"));
    assert!(text.contains("4. Allocation"));
    assert!(text.contains("80.0%"));
    assert!(text.contains("bears 100% of its own document-production costs"));
    assert!(text.contains("20.0%"));
    assert!(text.contains("within reasonable limits"));
    assert!(text.contains("Statement of Defence: 10 days overdue (-5.0%)"));
}

#[tokio::test]
async fn party_with_no_requests_is_stated_not_omitted() {
    let assessment = CostAllocationAssessment::from_record(&CaseRecord::default(), today());
    let outcome = Synthesizer::template_only().synthesize(&assessment).await;

    assert!(outcome
        .text
        .contains("Claimant: rejection rate 0.0% was within reasonable limits"));
    assert!(outcome
        .text
        .contains("Respondent: rejection rate 0.0% was within reasonable limits"));
}

#[tokio::test]
async fn zero_delay_on_both_sides_is_called_out_explicitly() {
    let assessment = CostAllocationAssessment::from_record(&CaseRecord::default(), today());
    let outcome = Synthesizer::template_only().synthesize(&assessment).await;

    assert!(outcome.text.contains("No deductions for delay"));
}

#[tokio::test]
async fn failing_service_falls_back_to_the_template() {
    let synthesizer = Synthesizer::with_generator(Arc::new(FailingGenerator));
    let outcome = synthesizer.synthesize(&scenario_assessment()).await;

    assert_eq!(outcome.source, NarrativeSource::Template);
    assert!(outcome.fallback_note.is_some());
    assert!(outcome.text.contains("1. General principle"));
    assert!(outcome.text.contains("4. Allocation"));
}

#[tokio::test]
async fn empty_service_response_falls_back_to_the_template() {
    let synthesizer = Synthesizer::with_generator(Arc::new(CannedGenerator("   ")));
    let outcome = synthesizer.synthesize(&scenario_assessment()).await;

    assert_eq!(outcome.source, NarrativeSource::Template);
    assert!(outcome
        .fallback_note
        .as_deref()
        .unwrap_or_default()
        .contains("empty"));
}

#[tokio::test]
async fn service_text_is_used_when_the_call_succeeds() {
    let canned = "The tribunal allocates costs as set out above.";
    let synthesizer = Synthesizer::with_generator(Arc::new(CannedGenerator(canned)));
    let outcome = synthesizer.synthesize(&scenario_assessment()).await;

    assert_eq!(outcome.source, NarrativeSource::Generative);
    assert_eq!(outcome.text, canned);
    assert!(outcome.fallback_note.is_none());
}

#[tokio::test]
async fn report_includes_offer_triggers_only_with_a_final_award() {
    let (service, _, _) = build_service();
    let case_id = opened_case(&service);
    service
        .record_sealed_offer(
            &case_id,
            crate::workflows::arbitration::Party::Respondent,
            "3800000".to_string(),
            "2026-01-15".to_string(),
        )
        .expect("offer recorded");

    let without_award = service
        .cost_allocation(&case_id, None, today())
        .await
        .expect("report builds");
    assert!(without_award.reversal_triggers.is_empty());
    assert_eq!(without_award.final_award, None);

    let with_award = service
        .cost_allocation(&case_id, Some(3_000_000.0), today())
        .await
        .expect("report builds");
    assert_eq!(with_award.reversal_triggers.len(), 1);
    assert_eq!(with_award.final_award, Some(3_000_000.0));
}
