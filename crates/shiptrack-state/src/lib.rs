//! # shiptrack-state — Shipment Lifecycle State Machine
//!
//! The delivery lifecycle is a fixed, linear three-stage path:
//!
//! ```text
//! Ready to Pick Up --checkout--> Out for Delivery --deliver--> Delivered
//! ```
//!
//! The status catalog is a tagged enumeration, not a lookup table: a
//! status that exists at all is a catalog value, and the only way to
//! move between stages is through the two named transition methods.
//! There is no shortcut path, no reverse transition, and no runtime
//! "status not configured" failure mode — the default initial status is
//! a compile-time constant.

pub mod status;

pub use status::{ShipmentStatus, TransitionError};
