//! Certificate-signed assertions.
//!
//! An assertion is an RS256 JWT whose header carries the signing
//! certificate's thumbprint in `x5t`, with claims `{aud, jti, nbf, exp}`.
//! The portal looks the certificate up by thumbprint and verifies the
//! signature against it.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, PreconditionError, SdkError};
use crate::network::ASSERTION_AUDIENCE;
use crate::pki::{Certificate, PrivateKey};

/// Lifetime of a signed assertion.
pub const ASSERTION_LIFETIME_MINUTES: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub aud: String,
    pub jti: String,
    pub nbf: i64,
    pub exp: i64,
}

/// A signed assertion ready to be sent as a bearer credential.
#[derive(Clone)]
pub struct SignedAssertion {
    token: String,
    pub not_before: DateTime<Utc>,
    pub expires_on: DateTime<Utc>,
}

impl SignedAssertion {
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for SignedAssertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedAssertion")
            .field("not_before", &self.not_before)
            .field("expires_on", &self.expires_on)
            .finish_non_exhaustive()
    }
}

/// Sign an assertion with `private_key`, identified by `certificate`.
///
/// Fails with [`PreconditionError::InvalidKeyType`] when the certificate key
/// is not RSA.
pub fn build_assertion(
    certificate: &Certificate,
    private_key: &PrivateKey,
) -> Result<SignedAssertion, SdkError> {
    if !certificate.key_algorithm().is_rsa() {
        return Err(PreconditionError::InvalidKeyType(certificate.key_algorithm().to_string()).into());
    }

    let now = Utc::now();
    let not_before = DateTime::<Utc>::from_timestamp(now.timestamp(), 0).unwrap_or(now);
    let expires_on = not_before + Duration::minutes(ASSERTION_LIFETIME_MINUTES);

    let claims = AssertionClaims {
        aud: ASSERTION_AUDIENCE.to_string(),
        jti: Uuid::new_v4().to_string(),
        nbf: not_before.timestamp(),
        exp: expires_on.timestamp(),
    };

    let mut header = Header::new(Algorithm::RS256);
    header.typ = Some("JWT".to_string());
    header.x5t = Some(certificate.thumbprint().to_string());

    let key = EncodingKey::from_rsa_der(&private_key.to_pkcs1_der()?);
    let token = jsonwebtoken::encode(&header, &claims, &key).map_err(AuthError::from)?;

    tracing::debug!(
        thumbprint = certificate.thumbprint(),
        expires_on = %expires_on,
        "signed certificate assertion"
    );

    Ok(SignedAssertion {
        token,
        not_before,
        expires_on,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    const RSA_CERT: &str = include_str!("../../tests/fixtures/rsa_cert.pem");
    const RSA_KEY: &str = include_str!("../../tests/fixtures/rsa_key.pem");
    const RSA_PUB: &str = include_str!("../../tests/fixtures/rsa_pub.pem");

    fn fixture() -> (Certificate, PrivateKey) {
        (
            Certificate::from_pem(RSA_CERT).unwrap(),
            PrivateKey::from_pem(RSA_KEY).unwrap(),
        )
    }

    #[test]
    fn test_header_carries_thumbprint() {
        let (cert, key) = fixture();
        let assertion = build_assertion(&cert, &key).unwrap();
        let header = decode_header(assertion.token()).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.typ.as_deref(), Some("JWT"));
        assert_eq!(
            header.x5t.as_deref(),
            Some("77FC4D8042C3167C522A78703066144EA1B73DE4")
        );
    }

    #[test]
    fn test_claims_verify_against_certificate_key() {
        let (cert, key) = fixture();
        let assertion = build_assertion(&cert, &key).unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[ASSERTION_AUDIENCE]);
        validation.validate_nbf = true;
        let data = decode::<AssertionClaims>(
            assertion.token(),
            &DecodingKey::from_rsa_pem(RSA_PUB.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.aud, "https://ezca.io");
        assert_eq!(data.claims.exp - data.claims.nbf, 1800);
        assert!(Uuid::parse_str(&data.claims.jti).is_ok());
        assert_eq!(assertion.not_before.timestamp(), data.claims.nbf);
    }

    #[test]
    fn test_each_assertion_has_unique_jti() {
        let (cert, key) = fixture();
        let a = build_assertion(&cert, &key).unwrap();
        let b = build_assertion(&cert, &key).unwrap();
        let jti = |t: &str| {
            let mut v = Validation::new(Algorithm::RS256);
            v.set_audience(&[ASSERTION_AUDIENCE]);
            decode::<AssertionClaims>(t, &DecodingKey::from_rsa_pem(RSA_PUB.as_bytes()).unwrap(), &v)
                .unwrap()
                .claims
                .jti
        };
        assert_ne!(jti(a.token()), jti(b.token()));
    }

    #[test]
    fn test_ec_certificate_is_rejected() {
        let cert = Certificate::from_pem(include_str!("../../tests/fixtures/ec_cert.pem")).unwrap();
        let (_, key) = fixture();
        let err = build_assertion(&cert, &key).unwrap_err();
        assert!(matches!(
            err,
            SdkError::Precondition(PreconditionError::InvalidKeyType(_))
        ));
    }
}
