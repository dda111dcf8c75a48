use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::arbitration::router::case_router;

fn build_router() -> axum::Router {
    let (service, _, _) = build_service();
    case_router(service)
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

#[tokio::test]
async fn opening_a_case_twice_conflicts() {
    let router = build_router();
    let open = |router: axum::Router| async move {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/cases/icc-2026-014")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch")
    };

    let first = open(router.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = open(router.clone()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn filing_a_request_returns_its_schedule_id() {
    let router = build_router();
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/cases/icc-2026-014")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("open case");

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/cases/icc-2026-014/redfern/requests",
            json!({
                "party": "claimant",
                "description": "Monthly progress reports",
                "relevance": "Delay analysis"
            }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("id"), Some(&json!("C-1")));
    assert_eq!(payload.get("status"), Some(&json!("pending")));
}

#[tokio::test]
async fn unknown_case_maps_to_not_found() {
    let router = build_router();
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/cases/nope/redfern/requests",
            json!({
                "party": "claimant",
                "description": "Anything",
                "relevance": "Anything"
            }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("not found"));
}

#[tokio::test]
async fn invalid_transition_maps_to_unprocessable() {
    let (service, _, _) = build_service();
    let case_id = opened_case(&service);
    let request = service
        .file_document_request(
            &case_id,
            crate::workflows::arbitration::Party::Claimant,
            "Ledgers".to_string(),
            "Loss".to_string(),
        )
        .expect("request filed");
    service
        .rule_on_request(
            &case_id,
            &request.id,
            crate::workflows::arbitration::Ruling::Denied,
            "Refused".to_string(),
        )
        .expect("ruled");

    let router = case_router(service);
    let response = router
        .oneshot(post_json(
            &format!(
                "/api/v1/cases/{}/redfern/requests/{}/objection",
                case_id.0, request.id
            ),
            json!({ "text": "Too late" }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn allocation_endpoint_returns_the_full_report() {
    let (service, store, _) = build_service();
    let case_id = crate::workflows::arbitration::CaseId("icc-2026-014".to_string());
    service.open_case(&case_id).expect("case opens");
    {
        use crate::workflows::arbitration::store::CaseStore;
        let mut record = store.load(&case_id).expect("record loads");
        record.doc_prod.claimant =
            requests_with(crate::workflows::arbitration::Party::Claimant, 8, 2, 0);
        record.timeline = vec![overdue_event(
            "T-1",
            "Statement of Defence",
            crate::workflows::arbitration::ResponsibleParty::Claimant,
            10,
        )];
        store.save(&case_id, &record).expect("record saves");
    }

    let router = case_router(service);
    let response = router
        .oneshot(post_json(
            "/api/v1/cases/icc-2026-014/costs/allocation",
            json!({ "final_award": 3000000.0, "today": "2026-08-07" }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;

    let claimant = payload.get("claimant").expect("claimant assessment");
    assert_eq!(
        claimant.pointer("/conduct/ratio").and_then(Value::as_f64),
        Some(80.0)
    );
    assert_eq!(
        claimant
            .pointer("/conduct/penalty_triggered")
            .and_then(Value::as_bool),
        Some(true)
    );
    assert_eq!(
        claimant
            .pointer("/delay/total_percent")
            .and_then(Value::as_f64),
        Some(5.0)
    );
    assert_eq!(
        payload.pointer("/narrative/source").and_then(Value::as_str),
        Some("template")
    );
    assert!(payload
        .pointer("/narrative/text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("costs follow the event"));
}

#[tokio::test]
async fn negative_cost_amounts_are_rejected() {
    let router = build_router();
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/cases/icc-2026-014")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("open case");

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/cases/icc-2026-014/costs/entries",
            json!({
                "phase": "Jurisdiction",
                "category": "Counsel fees",
                "date": "2026-05-01",
                "amount": -1500.0,
                "logged_by": "claimant"
            }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
