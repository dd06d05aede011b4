//! # shiptrack-core — Foundational Types
//!
//! Domain-primitive newtypes for the shipment tracking service. Each
//! identifier is a distinct type — you cannot pass a [`TrackingId`]
//! where a [`PhoneNumber`] is expected, and a value that exists at all
//! has already passed format validation.
//!
//! ## Validation
//!
//! String-based values ([`TrackingId`], [`PhoneNumber`]) validate at
//! construction time and again at deserialization time. UUID-based
//! identifiers ([`ShipmentId`]) are always valid by construction.

pub mod error;
pub mod identity;

pub use error::ValidationError;
pub use identity::{PhoneNumber, ShipmentId, TrackingId};
