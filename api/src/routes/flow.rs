//! Step flow endpoints
//!
//! `POST /api/flow/start` assigns (or re-reads) the caller's session
//! token and returns the current flow position. The step endpoints
//! (`/intake`, `/card-details`, `/verify`) submit one step's field
//! values against that token, and `/reset` drops the flow entirely.
//!
//! Submission outcomes travel in the response envelope: `success`
//! reflects whether the step moved forward, and the flattened outcome
//! payload tells the client what to render next (pacing delay, next
//! step, attempt count, cooldown).

use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use fg_core::domain::flow::{FlowState, StepKind};
use fg_core::domain::session::SessionId;
use fg_core::errors::DomainError;
use fg_core::services::flow::SubmitOutcome;
use fg_shared::types::response::ApiResponse;

use crate::middleware::gateway::client_key;

use super::AppState;

/// Client-facing view of a flow's position
#[derive(Debug, Serialize)]
pub struct FlowStateView {
    pub session: String,
    pub step: &'static str,
}

impl From<&FlowState> for FlowStateView {
    fn from(state: &FlowState) -> Self {
        Self {
            session: state.session_id.to_string(),
            step: state.step.name(),
        }
    }
}

/// Body of every step submission: the session token plus the step's
/// field values, flattened
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub session: String,
    #[serde(flatten)]
    pub fields: HashMap<String, String>,
}

pub async fn start(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let key = client_key(&req);
    let session = state.sessions.get_or_create(&key).await;
    match state.flow.start(session).await {
        Ok(flow) => {
            HttpResponse::Ok().json(ApiResponse::ok_with("Flow ready", FlowStateView::from(&flow)))
        }
        Err(error) => error_response(&error),
    }
}

pub async fn intake(state: web::Data<AppState>, body: web::Json<SubmitRequest>) -> HttpResponse {
    submit(&state, &body, StepKind::Intake).await
}

pub async fn card_details(
    state: web::Data<AppState>,
    body: web::Json<SubmitRequest>,
) -> HttpResponse {
    submit(&state, &body, StepKind::CardDetails).await
}

pub async fn verify(state: web::Data<AppState>, body: web::Json<SubmitRequest>) -> HttpResponse {
    submit(&state, &body, StepKind::Verification).await
}

pub async fn reset(state: web::Data<AppState>, body: web::Json<SubmitRequest>) -> HttpResponse {
    let Some(session) = SessionId::parse(&body.session) else {
        return error_response(&DomainError::SessionNotFound);
    };
    match state.flow.reset(&session).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::ok("Flow reset")),
        Err(error) => error_response(&error),
    }
}

async fn submit(state: &AppState, body: &SubmitRequest, step: StepKind) -> HttpResponse {
    let Some(session) = SessionId::parse(&body.session) else {
        return error_response(&DomainError::SessionNotFound);
    };

    if !state.notifier_ready {
        log::error!("Flow submission refused: notifier credentials are not configured");
        return HttpResponse::InternalServerError()
            .json(ApiResponse::error("Server configuration error"));
    }

    match state.flow.submit(&session, step, &body.fields).await {
        Ok(outcome) => outcome_response(outcome),
        Err(error) => error_response(&error),
    }
}

/// Every accepted submission answers `200`; the envelope's `success`
/// flag says whether the flow moved forward
fn outcome_response(outcome: SubmitOutcome) -> HttpResponse {
    let (success, message) = match &outcome {
        SubmitOutcome::Advanced { .. } => (true, "Step accepted"),
        SubmitOutcome::Completed { .. } => (true, "Verification complete"),
        SubmitOutcome::CodeMismatch { .. } => (false, "Invalid code"),
        SubmitOutcome::CooldownActive { .. } => (false, "Please wait before retrying"),
        SubmitOutcome::Busy => (false, "Submission already in progress"),
    };
    let body = if success {
        ApiResponse::ok_with(message, outcome)
    } else {
        ApiResponse::error_with(message, outcome)
    };
    HttpResponse::Ok().json(body)
}

fn error_response(error: &DomainError) -> HttpResponse {
    if let Some(detail) = error.internal_detail() {
        log::error!("{}: {}", error.error_code(), detail);
    }

    let body = ApiResponse::error_with(
        error.to_string(),
        serde_json::json!({ "code": error.error_code() }),
    );

    match error {
        DomainError::Validation { .. } => HttpResponse::BadRequest().json(
            ApiResponse::error_with(
                error.to_string(),
                serde_json::json!({
                    "code": error.error_code(),
                    "field": validation_field(error),
                }),
            ),
        ),
        DomainError::RateLimited { retry_after_secs } => HttpResponse::TooManyRequests()
            .insert_header(("Retry-After", retry_after_secs.to_string()))
            .json(body),
        DomainError::SessionNotFound => HttpResponse::NotFound().json(body),
        DomainError::Configuration { .. }
        | DomainError::Transport { .. }
        | DomainError::Internal { .. } => HttpResponse::InternalServerError().json(body),
    }
}

fn validation_field(error: &DomainError) -> &str {
    match error {
        DomainError::Validation { field, .. } => field,
        _ => "",
    }
}
