//! Request extraction helpers.
//!
//! JSON deserialization failures surface as Axum rejections with the
//! parser's own wording; this module maps them to the structured error
//! body and runs domain validation in the same step so handlers only
//! ever see well-formed input.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Domain validation beyond what serde enforces structurally.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON extraction, mapping parse failures to `BadRequest`
/// and validation failures to `Validation`.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        count: u32,
    }

    impl Validate for Probe {
        fn validate(&self) -> Result<(), String> {
            if self.count == 0 {
                return Err("count must be positive".to_string());
            }
            Ok(())
        }
    }

    #[test]
    fn valid_body_passes_through() {
        let probe: Probe = serde_json::from_str(r#"{"count": 3}"#).unwrap();
        let result = extract_validated_json(Ok(Json(probe)));
        assert_eq!(result.unwrap().count, 3);
    }

    #[test]
    fn failing_validation_maps_to_validation_error() {
        let probe: Probe = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        let result = extract_validated_json(Ok(Json(probe)));
        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("positive")),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }
}
