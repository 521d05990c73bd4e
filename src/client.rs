//! High-level client: `EzcaClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared dispatch path and the accessors.

use std::sync::Arc;

use crate::auth::{
    self, CallerIdentity, Credential, DefaultCredential, TokenCredential, TrustedToken,
};
use crate::domain::audit::client::Audit;
use crate::domain::authority::client::Authorities;
use crate::domain::certificate::client::Certificates;
use crate::domain::registration::client::Domains;
use crate::domain::self_service::client::SelfService;
use crate::error::{PreconditionError, SdkError};
use crate::http::envelope::unwrap_payload;
use crate::http::{Endpoint, Transport, TransportRequest};
use crate::network::{normalize_base_url, DEFAULT_BASE_URL};

// Re-export sub-client types for convenience.
pub use crate::domain::audit::client::Audit as AuditClient;
pub use crate::domain::authority::client::Authorities as AuthoritiesClient;
pub use crate::domain::certificate::client::Certificates as CertificatesClient;
pub use crate::domain::registration::client::Domains as DomainsClient;
pub use crate::domain::self_service::client::SelfService as SelfServiceClient;

/// The primary entry point for the EZCA SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.certificates()`, `client.domains()`, etc.
///
/// Holds no per-call state, so one client may serve concurrent operations.
#[derive(Clone)]
pub struct EzcaClient {
    pub(crate) base_url: String,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) credential: Arc<dyn TokenCredential>,
}

impl EzcaClient {
    pub fn builder() -> EzcaClientBuilder {
        EzcaClientBuilder::default()
    }

    /// Normalized portal URL (https, no trailing `/`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn authorities(&self) -> Authorities<'_> {
        Authorities { client: self }
    }

    pub fn certificates(&self) -> Certificates<'_> {
        Certificates { client: self }
    }

    pub fn domains(&self) -> Domains<'_> {
        Domains { client: self }
    }

    pub fn self_service(&self) -> SelfService<'_> {
        SelfService { client: self }
    }

    pub fn audit(&self) -> Audit<'_> {
        Audit { client: self }
    }

    /// Identity of the principal behind the configured credential.
    pub async fn caller_identity(&self) -> Result<CallerIdentity, SdkError> {
        self.bearer().await?.identity()
    }

    // ── Shared request path ──────────────────────────────────────────────

    pub(crate) async fn bearer(&self) -> Result<TrustedToken, SdkError> {
        Ok(auth::get_bearer_token(self.credential.as_ref()).await?)
    }

    /// Send one request and peel its envelopes down to the payload text.
    pub(crate) async fn dispatch(
        &self,
        endpoint: &Endpoint,
        query: Option<String>,
        body: Option<&serde_json::Value>,
        credential: &Credential,
    ) -> Result<String, SdkError> {
        debug_assert_eq!(endpoint.auth, credential.scheme(), "{}", endpoint.path);

        let url = match query {
            Some(q) => format!("{}{}?{}", self.base_url, endpoint.path, q),
            None => format!("{}{}", self.base_url, endpoint.path),
        };

        tracing::debug!(method = %endpoint.method, url = %url, "EZCA request");
        let envelope = self
            .transport
            .call(TransportRequest {
                method: endpoint.method,
                url: &url,
                body,
                token: credential.token(),
            })
            .await?;

        if !envelope.success {
            tracing::debug!(url = %url, message = %envelope.message, "EZCA request failed");
        }
        unwrap_payload(envelope, endpoint.shape)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct EzcaClientBuilder {
    base_url: String,
    credential: Option<Arc<dyn TokenCredential>>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for EzcaClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credential: None,
            transport: None,
        }
    }
}

impl EzcaClientBuilder {
    /// Portal URL. Normalized on build: trailing `/` trimmed, `http` upgraded to `https`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Bearer token source. Defaults to [`DefaultCredential`].
    pub fn credential(mut self, credential: Arc<dyn TokenCredential>) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Request transport. Defaults to [`ReqwestTransport`](crate::http::ReqwestTransport)
    /// when the `http` feature is enabled; required otherwise.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<EzcaClient, SdkError> {
        if self.base_url.trim().is_empty() {
            return Err(PreconditionError::MissingArgument("base_url").into());
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport()?,
        };

        Ok(EzcaClient {
            base_url: normalize_base_url(&self.base_url),
            transport,
            credential: self
                .credential
                .unwrap_or_else(|| Arc::new(DefaultCredential::new())),
        })
    }
}

#[cfg(feature = "http")]
fn default_transport() -> Result<Arc<dyn Transport>, SdkError> {
    Ok(Arc::new(crate::http::ReqwestTransport::new()?))
}

#[cfg(not(feature = "http"))]
fn default_transport() -> Result<Arc<dyn Transport>, SdkError> {
    Err(PreconditionError::MissingArgument("transport").into())
}
