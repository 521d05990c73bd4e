//! PKCS#10 certificate signing requests.

use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair, PKCS_RSA_SHA256};

use crate::error::PkiError;
use crate::pki::PrivateKey;
use crate::shared::SubjectName;

/// Build a PEM CSR for `subject`, signed with `key` (SHA-256 with RSA).
///
/// Only the common name goes into the CSR. SANs travel in the request body.
pub fn build_csr(subject: &SubjectName, key: &PrivateKey) -> Result<String, PkiError> {
    let key_pair = KeyPair::from_pem_and_sign_algo(&key.to_pkcs8_pem()?, &PKCS_RSA_SHA256)?;

    let mut params = CertificateParams::default();
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::CommonName, subject.common_name().to_string());

    let csr = params.serialize_request(&key_pair)?;
    Ok(csr.pem()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csr_is_pem_encoded() {
        let key = PrivateKey::from_pem(include_str!("../../tests/fixtures/rsa_key.pem")).unwrap();
        let csr = build_csr(&SubjectName::new("device.example.com"), &key).unwrap();
        assert!(csr.starts_with("-----BEGIN CERTIFICATE REQUEST-----"));
        let block = pem::parse(&csr).unwrap();
        assert_eq!(block.tag(), "CERTIFICATE REQUEST");
        assert!(!block.contents().is_empty());
    }
}
