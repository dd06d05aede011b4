//! Status catalog endpoint.

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use shiptrack_state::ShipmentStatus;

use crate::state::AppState;

/// Wire representation of a lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusDto {
    /// Stable numeric code (1..=3).
    pub id: i16,
    /// Display name, e.g. "Ready to Pick Up".
    pub name: String,
}

impl From<ShipmentStatus> for StatusDto {
    fn from(status: ShipmentStatus) -> Self {
        Self {
            id: status.code(),
            name: status.name().to_string(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/statuses", get(list_statuses))
}

/// List the lifecycle status catalog.
#[utoipa::path(
    get,
    path = "/v1/statuses",
    tag = "statuses",
    responses(
        (status = 200, description = "Full status catalog in lifecycle order", body = Vec<StatusDto>),
    )
)]
pub async fn list_statuses() -> Json<Vec<StatusDto>> {
    Json(ShipmentStatus::ALL.into_iter().map(StatusDto::from).collect())
}
