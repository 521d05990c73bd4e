//! HTTP layer: the [`Transport`] seam, result envelopes and the endpoint table.
//!
//! A transport turns one request into one [`Envelope`]. Network failures and
//! non-2xx statuses are folded into `success = false` envelopes; only failures
//! to even build the request surface as [`TransportError`].

#[cfg(feature = "http")]
pub mod client;
pub mod endpoint;
pub mod envelope;

use async_trait::async_trait;

use crate::error::TransportError;

#[cfg(feature = "http")]
pub use client::{ReqwestTransport, TRANSPORT_FAILURE_PREFIX};
pub use endpoint::{AuthScheme, Endpoint, EnvelopeShape, HttpMethod};
pub use envelope::Envelope;

/// One outgoing request.
#[derive(Debug, Clone, Copy)]
pub struct TransportRequest<'a> {
    pub method: HttpMethod,
    pub url: &'a str,
    pub body: Option<&'a serde_json::Value>,
    /// Sent as `Authorization: Bearer <token>`.
    pub token: &'a str,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, request: TransportRequest<'_>) -> Result<Envelope, TransportError>;
}
