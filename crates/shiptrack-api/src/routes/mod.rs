//! HTTP route handlers, grouped by resource.

pub mod shipments;
pub mod statuses;
