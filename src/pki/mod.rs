//! Local PKI material: parsed certificates, RSA private keys and CSR generation.
//!
//! The portal never sees a private key. Keys generated here stay with the
//! caller and are paired back with the certificate the portal returns.

pub mod certificate;
pub mod csr;
pub mod key;

pub use certificate::{Certificate, KeyAlgorithm};
pub use csr::build_csr;
pub use key::{PrivateKey, LOCAL_KEY_BITS};

/// A certificate together with the private key it was issued for.
///
/// Required by every operation that authenticates with a signed assertion
/// (renew, revoke, on-behalf-of issuance).
#[derive(Debug, Clone)]
pub struct CertificateWithKey {
    pub certificate: Certificate,
    pub private_key: PrivateKey,
}

impl CertificateWithKey {
    pub fn new(certificate: Certificate, private_key: PrivateKey) -> Self {
        Self {
            certificate,
            private_key,
        }
    }

    /// Load a pair from a certificate PEM and a PKCS#8 or PKCS#1 key PEM.
    pub fn from_pem(certificate_pem: &str, key_pem: &str) -> Result<Self, crate::error::PkiError> {
        Ok(Self {
            certificate: Certificate::from_pem(certificate_pem)?,
            private_key: PrivateKey::from_pem(key_pem)?,
        })
    }
}
