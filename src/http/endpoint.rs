//! The portal's endpoint table.
//!
//! Each endpoint fixes its method, its auth scheme and how many envelope
//! layers wrap its payload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// Token from the ambient credential.
    Bearer,
    /// JWT signed with an existing certificate's key.
    Assertion,
}

/// Number of result envelopes around the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// The transport envelope's message is the payload.
    Single,
    /// The transport envelope's message is itself a serialized envelope whose
    /// message is the payload.
    Nested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub method: HttpMethod,
    pub auth: AuthScheme,
    pub shape: EnvelopeShape,
}

const fn endpoint(
    path: &'static str,
    method: HttpMethod,
    auth: AuthScheme,
    shape: EnvelopeShape,
) -> Endpoint {
    Endpoint {
        path,
        method,
        auth,
        shape,
    }
}

use AuthScheme::{Assertion, Bearer};
use EnvelopeShape::{Nested, Single};
use HttpMethod::{Get, Post};

pub const AVAILABLE_SSL_CAS: Endpoint = endpoint("/api/CA/GetAvailableSSLCAs", Get, Bearer, Single);
pub const REQUEST_SSL_CERTIFICATE: Endpoint =
    endpoint("/api/CA/RequestSSLCertificate", Post, Bearer, Nested);
pub const REQUEST_SSL_CERTIFICATE_V2: Endpoint =
    endpoint("/api/CA/RequestSSLCertificateV2", Post, Bearer, Nested);
pub const REQUEST_DC_CERTIFICATE: Endpoint =
    endpoint("/api/CA/RequestDCCertificate", Post, Bearer, Nested);
pub const REQUEST_DC_CERTIFICATE_V2: Endpoint =
    endpoint("/api/CA/RequestDCCertificateV2", Post, Bearer, Nested);
pub const REQUEST_FULL_SSL_CERTIFICATE: Endpoint =
    endpoint("/api/CA/RequestFullSSLCertificate", Post, Bearer, Nested);
pub const RENEW_CERTIFICATE: Endpoint = endpoint("/api/Certificates/RenewCertificate", Post, Assertion, Nested);
pub const REVOKE_CERTIFICATE: Endpoint = endpoint("/api/Certificates/RevokeCertificate", Get, Assertion, Nested);
pub const MY_CERTIFICATES: Endpoint =
    endpoint("/api/CA/GetMyCertificatesV2Paginated", Get, Bearer, Single);
pub const REGISTER_NEW_DOMAIN: Endpoint = endpoint("/api/CA/RegisterNewDomain", Post, Bearer, Nested);
pub const MY_DOMAINS: Endpoint = endpoint("/api/CA/GetMyDomains", Get, Bearer, Single);
pub const REGISTER_BEHALF_OF_AGENT: Endpoint = endpoint(
    "/api/CA/RegisterNewBehalfOfSelfServiceAgent",
    Post,
    Bearer,
    Nested,
);
pub const ON_BEHALF_OF: Endpoint = endpoint(
    "/api/Certificates/RequestSelfServiceCertificateOnBehalfOf",
    Post,
    Assertion,
    Nested,
);
pub const CERTIFICATE_LOGS: Endpoint = endpoint("/api/Audit/GetCertLogs", Post, Bearer, Single);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_endpoints() {
        for e in [RENEW_CERTIFICATE, REVOKE_CERTIFICATE, ON_BEHALF_OF] {
            assert_eq!(e.auth, Assertion, "{}", e.path);
            assert_eq!(e.shape, Nested, "{}", e.path);
        }
    }

    #[test]
    fn test_revoke_is_get() {
        assert_eq!(REVOKE_CERTIFICATE.method, Get);
        assert_eq!(RENEW_CERTIFICATE.method, Post);
    }
}
