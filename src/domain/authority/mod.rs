//! Certificate authorities available to the caller.

pub mod client;
pub mod wire;

pub use wire::AvailableCa;
