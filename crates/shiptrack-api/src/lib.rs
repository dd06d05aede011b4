//! # shiptrack-api — Axum API for Shipment Lifecycle Tracking
//!
//! Registers shipments under caller-chosen tracking ids and walks them
//! through a fixed three-stage lifecycle with guarded transitions.
//!
//! ## API Surface
//!
//! | Prefix              | Module                 | Domain                  |
//! |---------------------|------------------------|-------------------------|
//! | `/v1/shipments/*`   | [`routes::shipments`]  | Shipment lifecycle      |
//! | `/v1/statuses`      | [`routes::statuses`]   | Status catalog          |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::collections::HashMap;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Check if metrics are enabled via the `SHIPTRACK_METRICS_ENABLED` env var.
/// Defaults to `true` when the variable is absent or set to anything other
/// than `"false"`.
fn metrics_enabled() -> bool {
    std::env::var("SHIPTRACK_METRICS_ENABLED")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true)
}

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`), the welcome page, and `/metrics` are
/// mounted outside the API middleware stack.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let metrics_on = metrics_enabled();

    // Body size limit: 2 MiB. Prevents OOM from oversized request bodies.
    let mut api = Router::new()
        .merge(routes::shipments::router())
        .merge(routes::statuses::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    // Only register the metrics middleware when metrics are enabled.
    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(axum::Extension(metrics.clone()));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let mut unauthenticated = Router::new()
        .route("/", axum::routing::get(welcome))
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    // Mount /metrics when enabled (unauthenticated, like health probes).
    if metrics_on {
        unauthenticated = unauthenticated
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(axum::Extension(metrics));
    }

    let unauthenticated = unauthenticated.with_state(state);

    Router::new().merge(unauthenticated).merge(api)
}

/// GET / — Welcome message.
async fn welcome() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "shiptrack-api",
        "message": "Welcome to the Shiptrack shipment tracking API",
        "docs": "/openapi.json",
    }))
}

/// GET /metrics — Prometheus metrics scrape endpoint.
///
/// Updates the shipment gauge from current `AppState` on each scrape
/// (pull model), then gathers and encodes all metrics in Prometheus text
/// exposition format.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    let shipments = state.shipments.list();
    let mut by_status: HashMap<&'static str, usize> = HashMap::new();
    for s in &shipments {
        *by_status.entry(s.status.name()).or_default() += 1;
    }
    // Reset all status labels, then set current values.
    metrics.shipments_total().reset();
    for (status, count) in &by_status {
        metrics
            .shipments_total()
            .with_label_values(&[status])
            .set(*count as f64);
    }

    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the application is ready to serve traffic.
///
/// Checks:
/// - In-memory store is accessible (read lock acquirable).
/// - Database connection is healthy (when configured).
///
/// Returns 200 "ready" or 503 with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let _ = state.shipments.len();

    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }

    (StatusCode::OK, "ready").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn welcome_page_responds() {
        let app = app(AppState::new());
        let (status, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("shiptrack-api"));
    }

    #[tokio::test]
    async fn liveness_is_ok() {
        let app = app(AppState::new());
        let (status, body) = get(&app, "/health/liveness").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn readiness_without_database_is_ready() {
        let app = app(AppState::new());
        let (status, body) = get(&app, "/health/readiness").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ready");
    }

    #[tokio::test]
    async fn openapi_spec_is_served() {
        let app = app(AppState::new());
        let (status, body) = get(&app, "/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Shiptrack API"));
    }

    #[tokio::test]
    async fn metrics_endpoint_reports_shipment_gauge() {
        let app = app(AppState::new());

        let create = Request::builder()
            .method("POST")
            .uri("/v1/shipments")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"trackingId":"TRK-900","phoneNumber":"+201234567890"}"#,
            ))
            .unwrap();
        let response = app.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let (status, body) = get(&app, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("shiptrack_shipments_total"));
        assert!(body.contains("Ready to Pick Up"));
    }
}
