//! Certificate domain: issuance, renewal, revocation and listing.

pub mod client;
pub mod convert;
pub mod wire;

use crate::domain::authority::AvailableCa;
use crate::pki::Certificate;
use crate::shared::location;

pub use wire::{CertificateRecord, SubjectAltValue};

/// Default `AutoRenewPercentage` of issuance requests.
pub const DEFAULT_AUTO_RENEW_PERCENTAGE: i32 = 80;

// ─── CSR-based SSL requests ──────────────────────────────────────────────────

/// An SSL certificate request for a caller-supplied CSR, sent to the V2 or
/// full-chain issuance routes.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrCertificateRequest {
    pub ca: AvailableCa,
    /// PEM PKCS#10.
    pub csr: String,
    /// `CN=` is prefixed when missing.
    pub subject_name: String,
    pub subject_alt_names: Vec<SubjectAltValue>,
    /// Negative values are taken as their absolute value.
    pub validity_days: i32,
    pub location: String,
    /// Empty → client + server authentication.
    pub ekus: Vec<String>,
    /// Empty → key encipherment + digital signature.
    pub key_usages: Vec<String>,
    pub auto_renew: bool,
    pub auto_renew_percentage: i32,
    pub certificate_tags: String,
}

impl CsrCertificateRequest {
    pub fn new(ca: AvailableCa, csr: &str, subject_name: &str, validity_days: i32) -> Self {
        Self {
            ca,
            csr: csr.to_string(),
            subject_name: subject_name.to_string(),
            subject_alt_names: Vec::new(),
            validity_days,
            location: location::IMPORT_CSR.to_string(),
            ekus: Vec::new(),
            key_usages: Vec::new(),
            auto_renew: false,
            auto_renew_percentage: DEFAULT_AUTO_RENEW_PERCENTAGE,
            certificate_tags: String::new(),
        }
    }

    pub fn subject_alt_names(mut self, names: Vec<SubjectAltValue>) -> Self {
        self.subject_alt_names = names;
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn ekus(mut self, ekus: Vec<String>) -> Self {
        self.ekus = ekus;
        self
    }

    pub fn auto_renew(mut self, percentage: i32) -> Self {
        self.auto_renew = true;
        self.auto_renew_percentage = percentage;
        self
    }

    pub fn tags(mut self, tags: &str) -> Self {
        self.certificate_tags = tags.to_string();
        self
    }
}

// ─── Domain-controller requests ──────────────────────────────────────────────

/// A domain-controller certificate request.
///
/// Sent to `RequestDCCertificateV2` when `sid` is set and to
/// `RequestDCCertificate` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct DcCertificateRequest {
    pub ca: AvailableCa,
    pub csr: String,
    pub subject_name: String,
    /// DNS SAN. Defaults to the subject's common name.
    pub dns_name: Option<String>,
    pub validity_days: i32,
    /// Empty → the domain-controller EKU set.
    pub ekus: Vec<String>,
    /// Application id used by the portal for the GUID SAN.
    pub cert_app_id: String,
    /// Security identifier of the DC's machine account.
    pub sid: Option<String>,
}

impl DcCertificateRequest {
    pub fn new(ca: AvailableCa, csr: &str, subject_name: &str, validity_days: i32) -> Self {
        Self {
            ca,
            csr: csr.to_string(),
            subject_name: subject_name.to_string(),
            dns_name: None,
            validity_days,
            ekus: Vec::new(),
            cert_app_id: String::new(),
            sid: None,
        }
    }

    pub fn dns_name(mut self, dns_name: &str) -> Self {
        self.dns_name = Some(dns_name.to_string());
        self
    }

    pub fn ekus(mut self, ekus: Vec<String>) -> Self {
        self.ekus = ekus;
        self
    }

    pub fn cert_app_id(mut self, cert_app_id: &str) -> Self {
        self.cert_app_id = cert_app_id.to_string();
        self
    }

    pub fn sid(mut self, sid: &str) -> Self {
        self.sid = Some(sid.to_string());
        self
    }
}

// ─── Responses ───────────────────────────────────────────────────────────────

/// An issued certificate with the CA certificates above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateChain {
    pub certificate: Certificate,
    pub issuing_ca: Option<Certificate>,
    pub root: Option<Certificate>,
}
