//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
///
/// Registers all utoipa-documented routes, schemas, and tags. Serves as
/// the single source of truth for integrators.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shiptrack API — Shipment Lifecycle Tracking",
        version = "0.3.2",
        description = "Shipment lifecycle tracking service.\n\nProvides:\n- **Shipment registration** with caller-chosen, globally unique tracking ids\n- **Guarded lifecycle transitions**: Ready to Pick Up → Out for Delivery → Delivered\n- **Status catalog** listing the fixed lifecycle stages\n- **Hard delete** that frees the tracking id for reuse\n\nAll state lives in memory, with optional Postgres write-through when DATABASE_URL is set.",
        license(name = "Apache-2.0"),
        contact(name = "Shiptrack", url = "https://github.com/shiptrack/shiptrack")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
    ),
    paths(
        crate::routes::shipments::create_shipment,
        crate::routes::shipments::list_shipments,
        crate::routes::shipments::get_shipment,
        crate::routes::shipments::checkout_shipment,
        crate::routes::shipments::deliver_shipment,
        crate::routes::shipments::delete_shipment,
        crate::routes::statuses::list_statuses,
    ),
    components(
        schemas(
            crate::state::ShipmentRecord,
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            crate::routes::shipments::CreateShipmentRequest,
            crate::routes::shipments::ShipmentDto,
            crate::routes::shipments::DeleteResponse,
            crate::routes::statuses::StatusDto,
        ),
    ),
    tags(
        (name = "shipments", description = "Shipment registration, lifecycle transitions, and deletion"),
        (name = "statuses", description = "Fixed lifecycle status catalog"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
