//! # Identifier and Contact Newtypes
//!
//! Domain-primitive newtypes used throughout the shipment tracker.
//!
//! ## Validation
//!
//! String-based values ([`TrackingId`], [`PhoneNumber`]) validate format
//! at construction time. UUID-based identifiers ([`ShipmentId`]) are
//! always valid by construction.
//!
//! ## Format Reference
//!
//! - Tracking id: caller-supplied, non-empty, at most 64 characters,
//!   globally unique across the store (uniqueness is enforced by the
//!   store, not here).
//! - Phone number: `+20` followed by exactly 10 digits (Egyptian
//!   international format).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time, not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// A unique identifier for one tracked shipment.
///
/// System-generated at creation; never supplied by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipmentId(Uuid);

impl ShipmentId {
    /// Create a new random shipment identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a shipment identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ShipmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ShipmentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ShipmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

// ---------------------------------------------------------------------------
// String-based values (validated at construction)
// ---------------------------------------------------------------------------

/// Maximum accepted tracking id length.
const TRACKING_ID_MAX_LEN: usize = 64;

/// A caller-supplied tracking code a recipient uses to look up a
/// shipment. Immutable after creation.
///
/// Non-empty (after trimming) and bounded; global uniqueness is a store
/// invariant, not a format rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TrackingId(String);

impl_validating_deserialize!(TrackingId);

impl TrackingId {
    /// Create a tracking id from a string value, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTrackingId`] for empty or
    /// whitespace-only input, [`ValidationError::TrackingIdTooLong`]
    /// past 64 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyTrackingId);
        }
        if raw.len() > TRACKING_ID_MAX_LEN {
            return Err(ValidationError::TrackingIdTooLong {
                max: TRACKING_ID_MAX_LEN,
                len: raw.len(),
            });
        }
        Ok(Self(raw))
    }

    /// Access the tracking id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recipient phone number in Egyptian international format:
/// `+20` followed by exactly 10 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PhoneNumber(String);

impl_validating_deserialize!(PhoneNumber);

impl PhoneNumber {
    /// Create a phone number from a string value, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPhoneNumber`] if the value is
    /// not `+20` followed by exactly 10 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let digits = match raw.strip_prefix("+20") {
            Some(rest) => rest,
            None => return Err(ValidationError::InvalidPhoneNumber(raw)),
        };
        if digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhoneNumber(raw));
        }
        Ok(Self(raw))
    }

    /// Access the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
