//! RSA private keys.

use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;

use crate::error::PkiError;

/// Modulus size of keys generated for locally keyed certificates.
pub const LOCAL_KEY_BITS: usize = 4096;

/// An RSA private key held only on the caller's side.
#[derive(Clone)]
pub struct PrivateKey(RsaPrivateKey);

impl PrivateKey {
    pub fn generate(bits: usize) -> Result<Self, PkiError> {
        let key = RsaPrivateKey::new(&mut rand::thread_rng(), bits)
            .map_err(|e| PkiError::KeyGeneration(e.to_string()))?;
        Ok(Self(key))
    }

    /// Load a key from a PKCS#8 (`PRIVATE KEY`) or PKCS#1 (`RSA PRIVATE KEY`) PEM.
    pub fn from_pem(pem: &str) -> Result<Self, PkiError> {
        let pem = pem.trim();
        if let Ok(key) = RsaPrivateKey::from_pkcs8_pem(pem) {
            return Ok(Self(key));
        }
        RsaPrivateKey::from_pkcs1_pem(pem)
            .map(Self)
            .map_err(|e| PkiError::PrivateKey(e.to_string()))
    }

    pub fn to_pkcs8_pem(&self) -> Result<String, PkiError> {
        self.0
            .to_pkcs8_pem(LineEnding::LF)
            .map(|pem| pem.to_string())
            .map_err(|e| PkiError::PrivateKey(e.to_string()))
    }

    pub(crate) fn to_pkcs1_der(&self) -> Result<Vec<u8>, PkiError> {
        self.0
            .to_pkcs1_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| PkiError::PrivateKey(e.to_string()))
    }

    pub fn bits(&self) -> usize {
        self.0.size() * 8
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}
