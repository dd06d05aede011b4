//! # Shipment Status Catalog and Guarded Transitions
//!
//! One enum variant per lifecycle stage. Each stage carries a stable
//! small integer code and a display name; the display name is what the
//! API and the database see, the enum is what the code sees.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One stage in the fixed delivery lifecycle.
///
/// The catalog is closed: no stage is created or removed at runtime.
/// `ReadyToPickUp` is the sole initial stage, assigned at creation;
/// `Delivered` is terminal — no transition leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    /// Package registered and waiting for courier pickup.
    ReadyToPickUp,
    /// Courier has the package and is en route.
    OutForDelivery,
    /// Package handed to the recipient. Terminal stage.
    Delivered,
}

impl ShipmentStatus {
    /// The status every shipment is created with.
    pub const INITIAL: ShipmentStatus = ShipmentStatus::ReadyToPickUp;

    /// The full catalog in lifecycle order.
    pub const ALL: [ShipmentStatus; 3] = [
        ShipmentStatus::ReadyToPickUp,
        ShipmentStatus::OutForDelivery,
        ShipmentStatus::Delivered,
    ];

    /// Stable small integer code for this stage.
    ///
    /// Codes are part of the external contract (the API exposes them in
    /// status objects and the database uses them as primary keys), so
    /// they never change meaning between releases.
    pub fn code(&self) -> i16 {
        match self {
            Self::ReadyToPickUp => 1,
            Self::OutForDelivery => 2,
            Self::Delivered => 3,
        }
    }

    /// The display name of this stage.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReadyToPickUp => "Ready to Pick Up",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
        }
    }

    /// Resolve a stable integer code back to a catalog stage.
    ///
    /// Returns `None` for codes outside the catalog; see [`from_name`]
    /// for how callers treat that.
    ///
    /// [`from_name`]: ShipmentStatus::from_name
    pub fn from_code(code: i16) -> Option<ShipmentStatus> {
        match code {
            1 => Some(Self::ReadyToPickUp),
            2 => Some(Self::OutForDelivery),
            3 => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Resolve a display name back to a catalog stage.
    ///
    /// Returns `None` for names outside the catalog. The only way this
    /// path sees an unknown name is externally tampered storage, so
    /// callers treat `None` as an internal integrity failure rather
    /// than a client fault.
    pub fn from_name(name: &str) -> Option<ShipmentStatus> {
        match name {
            "Ready to Pick Up" => Some(Self::ReadyToPickUp),
            "Out for Delivery" => Some(Self::OutForDelivery),
            "Delivered" => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Whether this is a terminal stage (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Move from `Ready to Pick Up` to `Out for Delivery`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::InvalidTransition`] if the shipment is
    /// not currently `Ready to Pick Up`, reporting both the actual and
    /// the required stage. The guard failing never mutates anything —
    /// `self` is `Copy` and the caller only stores the `Ok` value.
    pub fn checkout(self) -> Result<ShipmentStatus, TransitionError> {
        self.guarded(Self::ReadyToPickUp, Self::OutForDelivery)
    }

    /// Move from `Out for Delivery` to `Delivered`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::InvalidTransition`] if the shipment is
    /// not currently `Out for Delivery`.
    pub fn deliver(self) -> Result<ShipmentStatus, TransitionError> {
        self.guarded(Self::OutForDelivery, Self::Delivered)
    }

    /// The single guarded edge both named transitions go through:
    /// accept only if the current stage matches the required
    /// predecessor, otherwise report actual vs. required.
    fn guarded(
        self,
        required: ShipmentStatus,
        requested: ShipmentStatus,
    ) -> Result<ShipmentStatus, TransitionError> {
        if self != required {
            return Err(TransitionError::InvalidTransition {
                actual: self,
                required,
                requested,
            });
        }
        Ok(requested)
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Errors raised when a transition guard rejects a request.
///
/// Each variant carries structured context — the offending stages, not
/// just a message — so the transport layer can form a precise response.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The shipment is not in the stage the requested transition
    /// requires. A precondition failure, not a retryable error.
    #[error("Cannot move to '{requested}' from '{actual}'. Expected status: '{required}'")]
    InvalidTransition {
        /// The stage the shipment is actually in.
        actual: ShipmentStatus,
        /// The stage the transition requires.
        required: ShipmentStatus,
        /// The stage the transition would have moved to.
        requested: ShipmentStatus,
    },
}
