//! Interaction check endpoints.
//!
//! Two endpoints over the same request shape:
//! - `POST /api/interactions` — JSON findings for the results view
//! - `POST /api/interactions/report` — plain-text exportable report

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::report::{check_interactions, distinct_drugs, render_report, InteractionFinding};
use crate::severity::PatientContext;

/// Maximum accepted patient age, matching the form input bounds.
const MAX_AGE: u32 = 120;

const PROMPT_SELECT_TWO: &str = "Select at least two medications to check for interactions.";
const PROMPT_NO_INTERACTIONS: &str = "No known interactions found for the selected medications.";

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub drugs: Vec<String>,
    pub age: u32,
    /// Comma-separated chronic conditions, as typed into the form.
    #[serde(default)]
    pub conditions: String,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub findings: Vec<InteractionFinding>,
    /// Informational prompt when no computation ran or nothing was found.
    pub message: Option<String>,
    pub checked_at: String,
}

/// Validate the request and run the check. With fewer than two distinct
/// drugs no lookup or classification happens at all.
fn run_check(
    ctx: &ApiContext,
    request: &CheckRequest,
) -> Result<(Vec<InteractionFinding>, Option<String>), ApiError> {
    if request.age > MAX_AGE {
        return Err(ApiError::BadRequest(format!(
            "Age must be between 0 and {MAX_AGE}"
        )));
    }

    if distinct_drugs(&request.drugs).len() < 2 {
        return Ok((Vec::new(), Some(PROMPT_SELECT_TWO.to_string())));
    }

    let patient = PatientContext::parse_conditions(request.age, &request.conditions);
    let findings = check_interactions(&ctx.table, &request.drugs, &patient);

    tracing::debug!(
        selected = request.drugs.len(),
        findings = findings.len(),
        age = request.age,
        "Interaction check"
    );

    let message = if findings.is_empty() {
        Some(PROMPT_NO_INTERACTIONS.to_string())
    } else {
        None
    };
    Ok((findings, message))
}

/// `POST /api/interactions` — check all pairs of the selected drugs.
pub async fn check(
    State(ctx): State<ApiContext>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    let (findings, message) = run_check(&ctx, &request)?;
    Ok(Json(CheckResponse {
        findings,
        message,
        checked_at: chrono::Utc::now().to_rfc3339(),
    }))
}

/// `POST /api/interactions/report` — same check, rendered as the
/// downloadable plain-text report. Informational outcomes become the
/// report body rather than an error.
pub async fn report(
    State(ctx): State<ApiContext>,
    Json(request): Json<CheckRequest>,
) -> Result<Response, ApiError> {
    let (findings, message) = run_check(&ctx, &request)?;
    let body = match message {
        Some(prompt) => prompt,
        None => render_report(&findings),
    };
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}
