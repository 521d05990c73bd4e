//! # EZCA SDK
//!
//! A Rust SDK for the EZCA certificate authority portal: issue, renew, revoke
//! and audit X.509 certificates, register domains and drive self-service
//! on-behalf-of issuance.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: shared newtypes, local PKI material, domain models (always available)
//! 2. **Auth**: ambient bearer credentials and certificate-signed assertions
//! 3. **HTTP**: the `Transport` seam, result envelopes and the endpoint table
//! 4. **High-Level Client**: `EzcaClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ezca_sdk::prelude::*;
//!
//! let client = EzcaClient::builder()
//!     .base_url("https://portal.ezca.io")
//!     .build()?;
//!
//! let cas = client.authorities().available().await?;
//! let issued = client.certificates().request_for_domain(&cas[0], "www.contoso.com", 90).await?;
//! client.certificates().revoke(&issued).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, constants and normalization rules.
pub mod shared;

/// Certificates, private keys and CSRs.
pub mod pki;

/// Domain modules (vertical slices): request types, wire types, sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Authentication: bearer credentials and signed assertions.
pub mod auth;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// Transport trait, envelopes, endpoints and the reqwest transport.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `EzcaClient`, the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes + constants
    pub use crate::shared::{eku, key_usage, location, SubjectName};

    // PKI
    pub use crate::pki::{Certificate, CertificateWithKey, KeyAlgorithm, PrivateKey};

    // Domain types
    pub use crate::domain::audit::{AuditRequest, CertificateAuditLog};
    pub use crate::domain::authority::AvailableCa;
    pub use crate::domain::certificate::{
        CertificateChain, CertificateRecord, CsrCertificateRequest, DcCertificateRequest,
        SubjectAltValue,
    };
    pub use crate::domain::registration::{DirectoryObject, DomainInformation, DomainRegistration};
    pub use crate::domain::self_service::{
        AvailableSelfServiceProfiles, BehalfOfAgent, OnBehalfOfRequest, SelfServiceProfile,
    };

    // Errors
    pub use crate::error::{AuthError, PkiError, PreconditionError, SdkError, TransportError};

    // Network
    pub use crate::network::DEFAULT_BASE_URL;

    // Auth
    #[cfg(feature = "azure-cli")]
    pub use crate::auth::AzureCliCredential;
    pub use crate::auth::{
        AccessToken, CallerIdentity, DefaultCredential, EnvironmentCredential,
        StaticTokenCredential, TokenCredential,
    };

    // HTTP
    #[cfg(feature = "http")]
    pub use crate::http::ReqwestTransport;
    pub use crate::http::{Envelope, Transport, TransportRequest};

    // Client + sub-clients
    pub use crate::client::{
        AuditClient, AuthoritiesClient, CertificatesClient, DomainsClient, EzcaClient,
        EzcaClientBuilder, SelfServiceClient,
    };
}
