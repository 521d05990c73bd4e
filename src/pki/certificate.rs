//! X.509 certificate parsing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};
use x509_parser::public_key::PublicKey;

use crate::error::PkiError;

/// Public key family of a certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa { bits: usize },
    Ec,
    Other(String),
}

impl KeyAlgorithm {
    pub fn is_rsa(&self) -> bool {
        matches!(self, KeyAlgorithm::Rsa { .. })
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyAlgorithm::Rsa { bits } => write!(f, "RSA-{}", bits),
            KeyAlgorithm::Ec => write!(f, "EC"),
            KeyAlgorithm::Other(oid) => write!(f, "{}", oid),
        }
    }
}

/// A parsed X.509 certificate.
///
/// Holds the DER encoding plus the handful of fields the SDK reads: subject,
/// validity window, thumbprint and key family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
    subject: String,
    issuer: String,
    serial: String,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    thumbprint: String,
    key_algorithm: KeyAlgorithm,
}

impl Certificate {
    /// Parse a PEM certificate. A bare base64 body without the
    /// `-----BEGIN CERTIFICATE-----` armor is accepted too.
    pub fn from_pem(text: &str) -> Result<Self, PkiError> {
        let text = text.trim();
        let der = if text.contains("-----BEGIN") {
            let block = pem::parse(text).map_err(|e| PkiError::Pem(e.to_string()))?;
            if block.tag() != "CERTIFICATE" {
                return Err(PkiError::Pem(format!(
                    "expected CERTIFICATE block, found {}",
                    block.tag()
                )));
            }
            block.into_contents()
        } else {
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD
                .decode(compact)
                .map_err(|e| PkiError::Pem(e.to_string()))?
        };
        Self::from_der(der)
    }

    pub fn from_der(der: Vec<u8>) -> Result<Self, PkiError> {
        let (subject, issuer, serial, not_before, not_after, key_algorithm) = {
            let (_, cert) = x509_parser::parse_x509_certificate(&der)
                .map_err(|e| PkiError::Certificate(e.to_string()))?;

            let validity = cert.validity();
            let not_before = DateTime::<Utc>::from_timestamp(validity.not_before.timestamp(), 0)
                .ok_or_else(|| PkiError::Certificate("notBefore out of range".to_string()))?;
            let not_after = DateTime::<Utc>::from_timestamp(validity.not_after.timestamp(), 0)
                .ok_or_else(|| PkiError::Certificate("notAfter out of range".to_string()))?;

            let spki = cert.public_key();
            let key_algorithm = match spki.parsed() {
                Ok(PublicKey::RSA(rsa)) => KeyAlgorithm::Rsa {
                    bits: rsa.key_size(),
                },
                Ok(PublicKey::EC(_)) => KeyAlgorithm::Ec,
                _ => KeyAlgorithm::Other(spki.algorithm.algorithm.to_id_string()),
            };

            (
                cert.subject().to_string(),
                cert.issuer().to_string(),
                hex::encode_upper(cert.raw_serial()),
                not_before,
                not_after,
                key_algorithm,
            )
        };

        let thumbprint = hex::encode_upper(Sha1::digest(&der));

        Ok(Self {
            der,
            subject,
            issuer,
            serial,
            not_before,
            not_after,
            thumbprint,
            key_algorithm,
        })
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }

    pub fn to_pem(&self) -> String {
        let block = pem::Pem::new("CERTIFICATE", self.der.clone());
        pem::encode_config(
            &block,
            pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
        )
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Serial number as uppercase hex.
    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    pub fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    /// Uppercase hex SHA-1 of the DER encoding.
    pub fn thumbprint(&self) -> &str {
        &self.thumbprint
    }

    pub fn key_algorithm(&self) -> &KeyAlgorithm {
        &self.key_algorithm
    }

    /// Whole days between notBefore and notAfter (fractional days truncated).
    pub fn validity_days(&self) -> i32 {
        (self.not_after - self.not_before).num_days() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSA_CERT: &str = include_str!("../../tests/fixtures/rsa_cert.pem");
    const EC_CERT: &str = include_str!("../../tests/fixtures/ec_cert.pem");

    #[test]
    fn test_parse_rsa_certificate() {
        let cert = Certificate::from_pem(RSA_CERT).unwrap();
        assert_eq!(cert.subject(), "CN=agent.example.com");
        assert_eq!(cert.key_algorithm(), &KeyAlgorithm::Rsa { bits: 2048 });
        assert_eq!(cert.validity_days(), 30);
    }

    #[test]
    fn test_thumbprint_is_uppercase_sha1_hex() {
        let cert = Certificate::from_pem(RSA_CERT).unwrap();
        assert_eq!(cert.thumbprint(), "77FC4D8042C3167C522A78703066144EA1B73DE4");
    }

    #[test]
    fn test_parse_ec_certificate() {
        let cert = Certificate::from_pem(EC_CERT).unwrap();
        assert_eq!(cert.key_algorithm(), &KeyAlgorithm::Ec);
        assert!(!cert.key_algorithm().is_rsa());
    }

    #[test]
    fn test_bare_base64_body_is_accepted() {
        let body: String = RSA_CERT
            .lines()
            .filter(|l| !l.starts_with("-----"))
            .collect();
        let bare = Certificate::from_pem(&body).unwrap();
        let armored = Certificate::from_pem(RSA_CERT).unwrap();
        assert_eq!(bare, armored);
    }

    #[test]
    fn test_pem_export_parses_back() {
        let cert = Certificate::from_pem(RSA_CERT).unwrap();
        let pem = cert.to_pem();
        assert!(pem.starts_with("-----BEGIN CERTIFICATE-----\n"));
        assert_eq!(Certificate::from_pem(&pem).unwrap(), cert);
    }

    #[test]
    fn test_rejects_non_certificate_block() {
        let key = include_str!("../../tests/fixtures/rsa_key.pem");
        assert!(matches!(Certificate::from_pem(key), Err(PkiError::Pem(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Certificate::from_pem("not a certificate").is_err());
    }
}
