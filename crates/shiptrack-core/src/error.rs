//! # Validation Errors
//!
//! Structured errors raised when a domain primitive rejects its input.
//! Every variant carries the offending value so the transport layer can
//! form a precise user-facing message.

use thiserror::Error;

/// Errors raised at domain-primitive construction time.
///
/// These are always client faults: the value never reaches a store or
/// a state machine before being rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The tracking identifier is empty or whitespace-only.
    #[error("trackingId must not be empty")]
    EmptyTrackingId,

    /// The tracking identifier exceeds the storage bound.
    #[error("trackingId must not exceed {max} characters (got {len})")]
    TrackingIdTooLong {
        /// Maximum accepted length.
        max: usize,
        /// Length of the rejected value.
        len: usize,
    },

    /// The phone number does not match the required pattern.
    #[error("phone number must be in the format +20 followed by 10 digits, got '{0}'")]
    InvalidPhoneNumber(String),
}
