use super::common::*;
use crate::workflows::arbitration::costs::delay::penalties;
use crate::workflows::arbitration::domain::{Party, ResponsibleParty};
use crate::workflows::arbitration::timetable::domain::ComplianceStatus;

#[test]
fn ten_days_overdue_at_half_percent_per_day() {
    let timeline = vec![overdue_event(
        "T-1",
        "Statement of Defence",
        ResponsibleParty::Claimant,
        10,
    )];

    let result = penalties(&timeline, Party::Claimant, 0.5, today());

    assert_eq!(result.total_percent, 5.0);
    assert_eq!(result.log.len(), 1);
    assert!(result.log[0].contains("10 days overdue (-5.0%)"));
}

#[test]
fn deadline_today_or_in_the_future_contributes_nothing() {
    let due_today = today().format("%Y-%m-%d").to_string();
    let future = (today() + chrono::Duration::days(5))
        .format("%Y-%m-%d")
        .to_string();
    let timeline = vec![
        event(
            "T-1",
            "Reply Submissions",
            &due_today,
            ResponsibleParty::Claimant,
            ComplianceStatus::AwaitingCompliance,
        ),
        event(
            "T-2",
            "Expert Report",
            &future,
            ResponsibleParty::Claimant,
            ComplianceStatus::AwaitingCompliance,
        ),
    ];

    let result = penalties(&timeline, Party::Claimant, 0.5, today());

    assert_eq!(result.total_percent, 0.0);
    assert!(result.log.is_empty());
}

#[test]
fn collective_events_charge_both_parties_independently() {
    let timeline = vec![overdue_event(
        "T-1",
        "Joint Chronology",
        ResponsibleParty::All,
        4,
    )];

    let claimant = penalties(&timeline, Party::Claimant, 0.5, today());
    let respondent = penalties(&timeline, Party::Respondent, 0.5, today());

    assert_eq!(claimant.total_percent, 2.0);
    assert_eq!(respondent.total_percent, 2.0);
    assert_eq!(claimant.log, respondent.log);
}

#[test]
fn tribunal_events_charge_neither_party() {
    let timeline = vec![overdue_event(
        "T-1",
        "Procedural Order No. 2",
        ResponsibleParty::Tribunal,
        30,
    )];

    assert_eq!(penalties(&timeline, Party::Claimant, 0.5, today()).total_percent, 0.0);
    assert_eq!(
        penalties(&timeline, Party::Respondent, 0.5, today()).total_percent,
        0.0
    );
}

#[test]
fn completed_events_never_accrue_retroactive_penalty() {
    let past = (today() - chrono::Duration::days(15))
        .format("%Y-%m-%d")
        .to_string();
    let timeline = vec![event(
        "T-1",
        "Statement of Claim",
        &past,
        ResponsibleParty::Claimant,
        ComplianceStatus::Completed,
    )];

    let result = penalties(&timeline, Party::Claimant, 0.5, today());
    assert_eq!(result.total_percent, 0.0);
}

#[test]
fn only_awaiting_compliance_events_accrue() {
    let past = (today() - chrono::Duration::days(6))
        .format("%Y-%m-%d")
        .to_string();
    let timeline = vec![
        event(
            "T-1",
            "Disclosure",
            &past,
            ResponsibleParty::Claimant,
            ComplianceStatus::Upcoming,
        ),
        event(
            "T-2",
            "Witness Statements",
            &past,
            ResponsibleParty::Claimant,
            ComplianceStatus::CommencedPending,
        ),
    ];

    let result = penalties(&timeline, Party::Claimant, 0.5, today());
    assert_eq!(result.total_percent, 0.0);
}

#[test]
fn malformed_deadline_skips_that_event_only() {
    let mut broken = overdue_event("T-1", "Hearing Bundle", ResponsibleParty::Claimant, 8);
    broken.deadline = "not-a-date".to_string();
    let timeline = vec![
        broken,
        overdue_event("T-2", "Costs Submissions", ResponsibleParty::Claimant, 2),
    ];

    let result = penalties(&timeline, Party::Claimant, 0.5, today());

    assert_eq!(result.total_percent, 1.0);
    assert_eq!(result.log.len(), 1);
    assert!(result.log[0].starts_with("Costs Submissions"));
}

#[test]
fn penalty_grows_with_lateness() {
    let rate = 0.5;
    let mut previous = 0.0;
    for days in [1, 3, 10, 40] {
        let timeline = vec![overdue_event(
            "T-1",
            "Submissions",
            ResponsibleParty::Respondent,
            days,
        )];
        let result = penalties(&timeline, Party::Respondent, rate, today());
        assert!(result.total_percent > previous);
        previous = result.total_percent;
    }
}

#[test]
fn approved_extension_uses_the_current_deadline() {
    let mut moved = overdue_event("T-1", "Rejoinder", ResponsibleParty::Respondent, 20);
    moved.current_deadline = Some(
        (today() + chrono::Duration::days(10))
            .format("%Y-%m-%d")
            .to_string(),
    );
    let result = penalties(&[moved], Party::Respondent, 0.5, today());
    assert_eq!(result.total_percent, 0.0);
}
