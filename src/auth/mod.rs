//! Authentication: bearer tokens from ambient credentials, and
//! certificate-signed assertions.
//!
//! ## Two schemes
//!
//! - **Bearer**: a token obtained from a [`TokenCredential`] for
//!   [`MANAGEMENT_SCOPE`](crate::network::MANAGEMENT_SCOPE). Used for issuance,
//!   registration, listing and audit.
//! - **Assertion**: a short-lived RS256 JWT signed with the private key of an
//!   existing EZCA certificate ([`assertion::build_assertion`]). Used for renew,
//!   revoke and on-behalf-of issuance.
//!
//! Every operation obtains a fresh credential. Nothing is cached on the client.

pub mod assertion;
pub mod credential;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{AuthError, SdkError};
use crate::http::AuthScheme;
use crate::network::MANAGEMENT_SCOPE;

pub use assertion::{build_assertion, AssertionClaims, SignedAssertion};
#[cfg(feature = "azure-cli")]
pub use credential::AzureCliCredential;
pub use credential::{DefaultCredential, EnvironmentCredential, StaticTokenCredential};

/// A raw access token as handed out by a credential source.
#[derive(Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_on: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_on: None,
        }
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("expires_on", &self.expires_on)
            .finish_non_exhaustive()
    }
}

/// A source of bearer tokens.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, AuthError>;
}

/// A bearer token that came out of a [`TokenCredential`].
///
/// Its claims are read without signature verification, which is only sound
/// because the token was issued to us by the credential source. There is no
/// public constructor.
#[derive(Clone)]
pub struct TrustedToken(String);

impl TrustedToken {
    pub(crate) fn secret(&self) -> &str {
        &self.0
    }

    /// Caller identity from the `oid` and `upn` claims.
    pub fn identity(&self) -> Result<CallerIdentity, SdkError> {
        #[derive(Deserialize)]
        struct IdentityClaims {
            oid: Option<String>,
            upn: Option<String>,
        }

        let payload = self
            .0
            .split('.')
            .nth(1)
            .ok_or_else(|| SdkError::decode("token claims", "bearer token is not a JWT"))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| SdkError::decode("token claims", e.to_string()))?;
        let claims: IdentityClaims = serde_json::from_slice(&bytes)
            .map_err(|e| SdkError::decode("token claims", e.to_string()))?;

        let object_id = claims
            .oid
            .filter(|oid| !oid.is_empty())
            .ok_or_else(|| SdkError::decode("token claims", "missing `oid` claim"))?;

        Ok(CallerIdentity {
            object_id,
            principal_name: claims.upn.unwrap_or_default(),
        })
    }
}

impl std::fmt::Debug for TrustedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TrustedToken(..)")
    }
}

/// The authenticated principal behind a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub object_id: String,
    pub principal_name: String,
}

/// Obtain a bearer token for the management scope.
///
/// An empty or whitespace token is an authentication failure.
pub async fn get_bearer_token(
    credential: &dyn TokenCredential,
) -> Result<TrustedToken, AuthError> {
    let token = credential.get_token(&[MANAGEMENT_SCOPE]).await?;
    if token.token.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed(
            "Error getting token".to_string(),
        ));
    }
    Ok(TrustedToken(token.token))
}

/// The credential attached to one request.
pub(crate) enum Credential {
    Bearer(TrustedToken),
    Assertion(SignedAssertion),
}

impl Credential {
    pub(crate) fn token(&self) -> &str {
        match self {
            Credential::Bearer(token) => token.secret(),
            Credential::Assertion(assertion) => assertion.token(),
        }
    }

    pub(crate) fn scheme(&self) -> AuthScheme {
        match self {
            Credential::Bearer(_) => AuthScheme::Bearer,
            Credential::Assertion(_) => AuthScheme::Assertion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_with_claims(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.sig", header, body)
    }

    #[tokio::test]
    async fn test_identity_from_claims() {
        let jwt = jwt_with_claims(serde_json::json!({
            "oid": "0b9b8e0a-1111-2222-3333-444455556666",
            "upn": "alice@contoso.com",
        }));
        let token = get_bearer_token(&StaticTokenCredential::new(jwt))
            .await
            .unwrap();
        let identity = token.identity().unwrap();
        assert_eq!(identity.object_id, "0b9b8e0a-1111-2222-3333-444455556666");
        assert_eq!(identity.principal_name, "alice@contoso.com");
    }

    #[tokio::test]
    async fn test_missing_upn_is_empty() {
        let jwt = jwt_with_claims(serde_json::json!({ "oid": "abc" }));
        let token = get_bearer_token(&StaticTokenCredential::new(jwt))
            .await
            .unwrap();
        assert_eq!(token.identity().unwrap().principal_name, "");
    }

    #[tokio::test]
    async fn test_missing_oid_is_decode_error() {
        let jwt = jwt_with_claims(serde_json::json!({ "upn": "bob@contoso.com" }));
        let token = get_bearer_token(&StaticTokenCredential::new(jwt))
            .await
            .unwrap();
        assert!(matches!(token.identity(), Err(SdkError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_empty_token_fails_authentication() {
        let result = get_bearer_token(&StaticTokenCredential::new("   ")).await;
        assert!(matches!(result, Err(AuthError::AuthenticationFailed(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = TrustedToken("secret-value".to_string());
        assert!(!format!("{:?}", token).contains("secret-value"));
        let access = AccessToken::new("secret-value");
        assert!(!format!("{:?}", access).contains("secret-value"));
    }
}
