//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: caller-facing request types and re-exports
//! - `wire.rs`: serde structs matching the portal's JSON field names
//! - `convert.rs`: conversions between the two, where they differ
//! - `client.rs`: sub-client with one method per portal operation

pub mod audit;
pub mod authority;
pub mod certificate;
pub mod registration;
pub mod self_service;

use crate::error::PreconditionError;
use crate::shared::normalize_validity_days;

/// Reject empty or whitespace-only text arguments.
pub(crate) fn require_text(name: &'static str, value: &str) -> Result<(), PreconditionError> {
    if value.trim().is_empty() {
        return Err(PreconditionError::MissingArgument(name));
    }
    Ok(())
}

/// Absolute value of `days`; zero is rejected.
pub(crate) fn require_validity(days: i32) -> Result<i32, PreconditionError> {
    match normalize_validity_days(days) {
        0 => Err(PreconditionError::InvalidArgument {
            name: "validity_days",
            reason: "must be non-zero".to_string(),
        }),
        days => Ok(days),
    }
}
