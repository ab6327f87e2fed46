//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub pairs_loaded: usize,
    pub drugs_known: usize,
    pub version: &'static str,
}

/// `GET /api/health` — connection check for the front end.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok",
        pairs_loaded: ctx.table.len(),
        drugs_known: ctx.table.known_drugs().len(),
        version: crate::config::APP_VERSION,
    }))
}
