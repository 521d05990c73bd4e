//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with `success = false`. Displays the server
    /// message verbatim.
    #[error("{0}")]
    Service(String),

    #[error("Could not decode {expected} from response: {payload}")]
    Decode {
        expected: &'static str,
        payload: String,
    },

    #[error("PKI error: {0}")]
    Pki(#[from] PkiError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SdkError {
    pub(crate) fn decode(expected: &'static str, payload: impl Into<String>) -> Self {
        SdkError::Decode {
            expected,
            payload: payload.into(),
        }
    }
}

/// Input validation failures. Raised before any credential or network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("`{0}` is required")]
    MissingArgument(&'static str),

    #[error("`{name}` is invalid: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Only RSA certificates are supported for certificate based authentication (found {0})")]
    InvalidKeyType(String),
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("No credential source available: {0}")]
    CredentialUnavailable(String),

    #[error("Assertion signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Failures the transport could not fold into an envelope.
#[derive(Error, Debug)]
pub enum TransportError {
    #[cfg(feature = "http")]
    #[error("Could not build request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Local certificate / key processing errors.
#[derive(Error, Debug)]
pub enum PkiError {
    #[error("Invalid PEM: {0}")]
    Pem(String),

    #[error("Invalid certificate: {0}")]
    Certificate(String),

    #[error("Invalid private key: {0}")]
    PrivateKey(String),

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("CSR generation failed: {0}")]
    Csr(#[from] rcgen::Error),
}
