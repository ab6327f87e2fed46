//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. The table is read-only shared state,
//! so there is no middleware beyond a permissive CORS layer for the
//! locally-served form front end.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::interactions::InteractionTable;

/// Build the API router over a loaded interaction table.
pub fn api_router(table: Arc<InteractionTable>) -> Router {
    let ctx = ApiContext::new(table);

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/drugs", get(endpoints::drugs::list))
        .route("/interactions", post(endpoints::interactions::check))
        .route(
            "/interactions/report",
            post(endpoints::interactions::report),
        )
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        api_router(Arc::new(InteractionTable::load_test()))
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 65536).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn response_text(response: axum::http::Response<Body>) -> String {
        let body = axum::body::to_bytes(response.into_body(), 65536).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_response_shape() {
        let app = test_router();
        let req = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert!(json["pairs_loaded"].as_u64().unwrap() > 0);
        assert!(json["drugs_known"].as_u64().unwrap() > 0);
        assert!(!json["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn drugs_list_is_sorted_and_title_cased() {
        let app = test_router();
        let req = Request::builder()
            .uri("/api/drugs")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let drugs: Vec<&str> = json["drugs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d.as_str().unwrap())
            .collect();
        assert!(drugs.contains(&"Aspirin"));
        assert!(drugs.contains(&"Warfarin"));
        let mut sorted = drugs.clone();
        sorted.sort();
        assert_eq!(drugs, sorted);
        assert_eq!(json["total"].as_u64().unwrap() as usize, drugs.len());
    }

    #[tokio::test]
    async fn drugs_search_filters_by_prefix() {
        let app = test_router();
        let req = Request::builder()
            .uri("/api/drugs?search=asp")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        let json = response_json(response).await;
        let drugs = json["drugs"].as_array().unwrap();
        assert_eq!(drugs.len(), 1);
        assert_eq!(drugs[0], "Aspirin");
        // total stays the full table count
        assert!(json["total"].as_u64().unwrap() > 1);
    }

    #[tokio::test]
    async fn interactions_check_finds_known_pair() {
        let app = test_router();
        let req = json_request(
            "/api/interactions",
            serde_json::json!({
                "drugs": ["Aspirin", "Warfarin", "Paracetamol"],
                "age": 45,
                "conditions": "diabetes"
            }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let findings = json["findings"].as_array().unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0]["drug_a"], "Aspirin");
        assert_eq!(findings[0]["drug_b"], "Warfarin");
        assert_eq!(findings[0]["severity"], "Severe");
        assert!(json["message"].is_null());
        assert!(json["checked_at"].is_string());
    }

    #[tokio::test]
    async fn interactions_check_symmetric_selection() {
        let app = test_router();
        let req = json_request(
            "/api/interactions",
            serde_json::json!({
                "drugs": ["Warfarin", "Aspirin"],
                "age": 45
            }),
        );
        let response = app.oneshot(req).await.unwrap();
        let json = response_json(response).await;
        assert_eq!(json["findings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn interactions_check_single_drug_prompts() {
        let app = test_router();
        let req = json_request(
            "/api/interactions",
            serde_json::json!({ "drugs": ["Aspirin"], "age": 45 }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert!(json["findings"].as_array().unwrap().is_empty());
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("at least two medications"));
    }

    #[tokio::test]
    async fn interactions_check_no_known_pairs_prompts() {
        let app = test_router();
        let req = json_request(
            "/api/interactions",
            serde_json::json!({ "drugs": ["Aspirin", "Metformin"], "age": 45 }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert!(json["findings"].as_array().unwrap().is_empty());
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("No known interactions"));
    }

    #[tokio::test]
    async fn interactions_check_rejects_out_of_range_age() {
        let app = test_router();
        let req = json_request(
            "/api/interactions",
            serde_json::json!({ "drugs": ["Aspirin", "Warfarin"], "age": 121 }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn interactions_check_escalates_for_elderly() {
        let app = test_router();
        // "May reduce the blood pressure lowering effect." → Mild base,
        // risk keyword escalates to Moderate regardless of age
        let req = json_request(
            "/api/interactions",
            serde_json::json!({ "drugs": ["Ibuprofen", "Lisinopril"], "age": 70 }),
        );
        let response = app.oneshot(req).await.unwrap();
        let json = response_json(response).await;
        let findings = json["findings"].as_array().unwrap();
        assert_eq!(findings[0]["severity"], "Moderate");
    }

    #[tokio::test]
    async fn report_is_plain_text_with_blocks() {
        let app = test_router();
        let req = json_request(
            "/api/interactions/report",
            serde_json::json!({
                "drugs": ["Aspirin", "Warfarin"],
                "age": 45,
                "conditions": ""
            }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get("Content-Type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let text = response_text(response).await;
        assert!(text.starts_with("Interaction: Aspirin + Warfarin"));
        assert!(text.contains("→ Severity: Severe"));
        assert!(text.contains("========================================"));
    }

    #[tokio::test]
    async fn report_single_drug_returns_prompt_body() {
        let app = test_router();
        let req = json_request(
            "/api/interactions/report",
            serde_json::json!({ "drugs": ["Aspirin"], "age": 45 }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let text = response_text(response).await;
        assert!(text.contains("at least two medications"));
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let app = test_router();
        let req = Request::builder()
            .uri("/api/nonexistent")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
