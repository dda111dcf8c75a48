use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::costs::domain::CostParty;
use super::domain::{CaseId, Party, ResponsibleParty};
use super::notify::NotificationPublisher;
use super::redfern::domain::Ruling;
use super::redfern::schedule::RedfernError;
use super::service::{ArbitrationCaseService, CaseServiceError};
use super::store::{CaseStore, StoreError};
use super::timetable::domain::{ComplianceStatus, ExtensionDecision};
use super::timetable::extensions::TimetableError;

/// Router builder exposing HTTP endpoints for the case workflow.
pub fn case_router<S, N>(service: Arc<ArbitrationCaseService<S, N>>) -> Router
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/cases/:case_id", post(open_case_handler::<S, N>))
        .route(
            "/api/v1/cases/:case_id/redfern",
            get(schedule_handler::<S, N>),
        )
        .route(
            "/api/v1/cases/:case_id/redfern/requests",
            post(file_request_handler::<S, N>),
        )
        .route(
            "/api/v1/cases/:case_id/redfern/requests/:request_id/objection",
            post(objection_handler::<S, N>),
        )
        .route(
            "/api/v1/cases/:case_id/redfern/requests/:request_id/reply",
            post(reply_handler::<S, N>),
        )
        .route(
            "/api/v1/cases/:case_id/redfern/requests/:request_id/ruling",
            post(ruling_handler::<S, N>),
        )
        .route(
            "/api/v1/cases/:case_id/timetable/events",
            post(add_event_handler::<S, N>),
        )
        .route(
            "/api/v1/cases/:case_id/timetable/events/:event_id/status",
            post(event_status_handler::<S, N>),
        )
        .route(
            "/api/v1/cases/:case_id/timetable/extensions",
            post(request_extension_handler::<S, N>),
        )
        .route(
            "/api/v1/cases/:case_id/timetable/extensions/:extension_id/resolution",
            post(resolve_extension_handler::<S, N>),
        )
        .route(
            "/api/v1/cases/:case_id/costs/entries",
            post(log_cost_handler::<S, N>),
        )
        .route(
            "/api/v1/cases/:case_id/costs/offers",
            post(sealed_offer_handler::<S, N>),
        )
        .route(
            "/api/v1/cases/:case_id/costs/allocation",
            post(allocation_handler::<S, N>),
        )
        .with_state(service)
}

fn error_response(error: CaseServiceError) -> Response {
    let status = match &error {
        CaseServiceError::Store(StoreError::NotFound(_))
        | CaseServiceError::Redfern(RedfernError::RequestNotFound(_))
        | CaseServiceError::Timetable(TimetableError::EventNotFound(_))
        | CaseServiceError::Timetable(TimetableError::ExtensionNotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        CaseServiceError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
        CaseServiceError::Redfern(RedfernError::InvalidTransition { .. })
        | CaseServiceError::Timetable(TimetableError::AlreadyResolved(_))
        | CaseServiceError::Cost(_)
        | CaseServiceError::Import(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CaseServiceError::Store(StoreError::Unavailable(_))
        | CaseServiceError::Notify(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(
    result: Result<T, CaseServiceError>,
    success: StatusCode,
) -> Response {
    match result {
        Ok(value) => (success, axum::Json(value)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn open_case_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path(case_id): Path<String>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    respond(
        service.open_case(&CaseId(case_id)),
        StatusCode::CREATED,
    )
}

async fn schedule_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path(case_id): Path<String>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    respond(service.schedule(&CaseId(case_id)), StatusCode::OK)
}

#[derive(Debug, Deserialize)]
struct FileRequestPayload {
    party: Party,
    description: String,
    relevance: String,
}

async fn file_request_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path(case_id): Path<String>,
    axum::Json(payload): axum::Json<FileRequestPayload>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    respond(
        service.file_document_request(
            &CaseId(case_id),
            payload.party,
            payload.description,
            payload.relevance,
        ),
        StatusCode::ACCEPTED,
    )
}

#[derive(Debug, Deserialize)]
struct TextPayload {
    text: String,
}

async fn objection_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path((case_id, request_id)): Path<(String, String)>,
    axum::Json(payload): axum::Json<TextPayload>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    respond(
        service.object_to_request(&CaseId(case_id), &request_id, payload.text),
        StatusCode::OK,
    )
}

async fn reply_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path((case_id, request_id)): Path<(String, String)>,
    axum::Json(payload): axum::Json<TextPayload>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    respond(
        service.reply_to_objection(&CaseId(case_id), &request_id, payload.text),
        StatusCode::OK,
    )
}

#[derive(Debug, Deserialize)]
struct RulingPayload {
    decision: Ruling,
    text: String,
}

async fn ruling_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path((case_id, request_id)): Path<(String, String)>,
    axum::Json(payload): axum::Json<RulingPayload>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    respond(
        service.rule_on_request(&CaseId(case_id), &request_id, payload.decision, payload.text),
        StatusCode::OK,
    )
}

#[derive(Debug, Deserialize)]
struct AddEventPayload {
    milestone: String,
    deadline: String,
    responsible: ResponsibleParty,
}

async fn add_event_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path(case_id): Path<String>,
    axum::Json(payload): axum::Json<AddEventPayload>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    respond(
        service.add_timetable_event(
            &CaseId(case_id),
            payload.milestone,
            payload.deadline,
            payload.responsible,
        ),
        StatusCode::CREATED,
    )
}

#[derive(Debug, Deserialize)]
struct EventStatusPayload {
    status: ComplianceStatus,
}

async fn event_status_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path((case_id, event_id)): Path<(String, String)>,
    axum::Json(payload): axum::Json<EventStatusPayload>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    respond(
        service.set_compliance_status(&CaseId(case_id), &event_id, payload.status),
        StatusCode::OK,
    )
}

#[derive(Debug, Deserialize)]
struct ExtensionPayload {
    event_id: String,
    party: Party,
    reason: String,
    proposed_date: String,
    #[serde(default)]
    consensual: bool,
    #[serde(default)]
    filed_on: Option<NaiveDate>,
}

async fn request_extension_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path(case_id): Path<String>,
    axum::Json(payload): axum::Json<ExtensionPayload>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    let filed_on = payload
        .filed_on
        .unwrap_or_else(|| Local::now().date_naive());
    respond(
        service.request_extension(
            &CaseId(case_id),
            &payload.event_id,
            payload.party,
            payload.reason,
            payload.proposed_date,
            payload.consensual,
            filed_on,
        ),
        StatusCode::CREATED,
    )
}

#[derive(Debug, Deserialize)]
struct ResolutionPayload {
    decision: ExtensionDecision,
    #[serde(default)]
    note: Option<String>,
}

async fn resolve_extension_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path((case_id, extension_id)): Path<(String, String)>,
    axum::Json(payload): axum::Json<ResolutionPayload>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    respond(
        service.resolve_extension(
            &CaseId(case_id),
            &extension_id,
            payload.decision,
            payload.note,
        ),
        StatusCode::OK,
    )
}

#[derive(Debug, Deserialize)]
struct CostEntryPayload {
    phase: String,
    category: String,
    date: String,
    amount: f64,
    logged_by: CostParty,
}

async fn log_cost_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path(case_id): Path<String>,
    axum::Json(payload): axum::Json<CostEntryPayload>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    respond(
        service.log_cost(
            &CaseId(case_id),
            payload.phase,
            payload.category,
            payload.date,
            payload.amount,
            payload.logged_by,
        ),
        StatusCode::CREATED,
    )
}

#[derive(Debug, Deserialize)]
struct SealedOfferPayload {
    party: Party,
    amount: String,
    date: String,
}

async fn sealed_offer_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path(case_id): Path<String>,
    axum::Json(payload): axum::Json<SealedOfferPayload>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    respond(
        service.record_sealed_offer(
            &CaseId(case_id),
            payload.party,
            payload.amount,
            payload.date,
        ),
        StatusCode::CREATED,
    )
}

#[derive(Debug, Deserialize)]
struct AllocationPayload {
    #[serde(default)]
    final_award: Option<f64>,
    #[serde(default)]
    today: Option<NaiveDate>,
}

async fn allocation_handler<S, N>(
    State(service): State<Arc<ArbitrationCaseService<S, N>>>,
    Path(case_id): Path<String>,
    axum::Json(payload): axum::Json<AllocationPayload>,
) -> Response
where
    S: CaseStore + 'static,
    N: NotificationPublisher + 'static,
{
    let today = payload.today.unwrap_or_else(|| Local::now().date_naive());
    respond(
        service
            .cost_allocation(&CaseId(case_id), payload.final_award, today)
            .await,
        StatusCode::OK,
    )
}
