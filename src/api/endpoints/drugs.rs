//! Known-drug listing for the medication selector.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::report::title_case;

#[derive(Deserialize)]
pub struct DrugListQuery {
    /// Optional case-insensitive prefix filter for autocomplete.
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct DrugsResponse {
    pub drugs: Vec<String>,
    pub total: usize,
}

/// `GET /api/drugs` — all known drug names, sorted, title-cased for
/// display. With `?search=` only names starting with the prefix are
/// returned; `total` stays the full table count.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<DrugListQuery>,
) -> Result<Json<DrugsResponse>, ApiError> {
    let total = ctx.table.known_drugs().len();
    let prefix = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();

    let drugs = ctx
        .table
        .known_drugs()
        .iter()
        .filter(|d| prefix.is_empty() || d.starts_with(&prefix))
        .map(|d| title_case(d))
        .collect();

    Ok(Json(DrugsResponse { drugs, total }))
}
