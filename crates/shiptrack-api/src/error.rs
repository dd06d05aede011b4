//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! The enum is closed — one variant per failure kind the lifecycle
//! engine can produce — so the HTTP mapping is exhaustive and checked
//! at compile time. Internal error details are logged, never returned
//! to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use shiptrack_state::TransitionError;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API
/// surface. The `details` field carries additional context for client
/// errors but is omitted for 500-class errors to prevent information
/// leakage.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "INVALID_TRANSITION").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// No shipment with the given id exists (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed required input, rejected before any store access (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed or contains invalid values (422).
    ///
    /// Normalized with `Validation` to 422 Unprocessable Entity: the
    /// client sent syntactically valid HTTP but semantically invalid
    /// content. Only malformed HTTP framing is 400.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Creation targeted a tracking id already present (409). No write
    /// occurs; the caller must choose a new id.
    #[error("shipment with trackingId \"{0}\" already exists")]
    DuplicateTrackingId(String),

    /// A transition was requested from a status other than the required
    /// predecessor (409). Carries actual + required stage.
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    /// Internal server error (500). Message is logged but not returned
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for
    /// this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::DuplicateTrackingId(_) => (StatusCode::CONFLICT, "DUPLICATE_TRACKING_ID"),
            Self::InvalidTransition(_) => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        // Log server-side errors for operator visibility.
        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert domain-primitive validation errors to API errors.
impl From<shiptrack_core::ValidationError> for AppError {
    fn from(err: shiptrack_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiptrack_state::ShipmentStatus;

    fn invalid_transition() -> AppError {
        AppError::InvalidTransition(TransitionError::InvalidTransition {
            actual: ShipmentStatus::OutForDelivery,
            required: ShipmentStatus::ReadyToPickUp,
            requested: ShipmentStatus::OutForDelivery,
        })
    }

    #[test]
    fn not_found_status_code() {
        let err = AppError::NotFound("missing shipment".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }

    #[test]
    fn validation_status_code() {
        let err = AppError::Validation("bad field".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn bad_request_status_code() {
        let err = AppError::BadRequest("malformed JSON".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "BAD_REQUEST");
    }

    #[test]
    fn duplicate_tracking_id_status_code() {
        let err = AppError::DuplicateTrackingId("TRK-001".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "DUPLICATE_TRACKING_ID");
    }

    #[test]
    fn invalid_transition_status_code() {
        let (status, code) = invalid_transition().status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "INVALID_TRANSITION");
    }

    #[test]
    fn internal_status_code() {
        let err = AppError::Internal("db connection failed".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
    }

    #[test]
    fn duplicate_message_names_the_tracking_id() {
        let msg = AppError::DuplicateTrackingId("TRK-001".to_string()).to_string();
        assert!(msg.contains("TRK-001"), "got: {msg}");
    }

    #[test]
    fn invalid_transition_message_carries_both_stages() {
        let msg = invalid_transition().to_string();
        assert!(msg.contains("Out for Delivery"), "got: {msg}");
        assert!(msg.contains("Ready to Pick Up"), "got: {msg}");
    }

    #[test]
    fn validation_error_from_core() {
        let core_err = shiptrack_core::ValidationError::EmptyTrackingId;
        let app_err = AppError::from(core_err);
        match &app_err {
            AppError::Validation(msg) => assert!(msg.contains("trackingId"), "got: {msg}"),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn transition_error_converts_via_from() {
        let err = ShipmentStatus::Delivered.checkout().unwrap_err();
        let app_err = AppError::from(err);
        let (status, _) = app_err.status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn error_body_serializes() {
        let body = ErrorBody {
            error: ErrorDetail {
                code: "TEST".to_string(),
                message: "test message".to_string(),
                details: None,
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("TEST"));
        assert!(json.contains("test message"));
        assert!(!json.contains("details")); // skipped when None
    }

    // ── into_response tests ──────────────────────────────────────

    use http_body_util::BodyExt;

    /// Helper to extract status and body from a Response.
    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_not_found() {
        let (status, body) = response_parts(AppError::NotFound("shipment 123".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.code, "NOT_FOUND");
        assert!(body.error.message.contains("shipment 123"));
        assert!(body.error.details.is_none());
    }

    #[tokio::test]
    async fn into_response_invalid_transition_reports_stages() {
        let (status, body) = response_parts(invalid_transition()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error.code, "INVALID_TRANSITION");
        assert!(body.error.message.contains("Expected status"));
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("db connection failed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        // The internal error message must NOT appear in the response body.
        assert!(
            !body.error.message.contains("db connection"),
            "internal error details must not leak: {}",
            body.error.message
        );
        assert_eq!(body.error.message, "An internal error occurred");
    }
}
