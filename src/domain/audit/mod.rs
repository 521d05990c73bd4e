//! Certificate audit log.

pub mod client;
pub mod wire;

pub use wire::{AuditRequest, CertificateAuditLog};
