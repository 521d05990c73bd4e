//! Certificates sub-client: issuance, renewal, revocation and listing.

use crate::auth::{build_assertion, Credential};
use crate::client::EzcaClient;
use crate::domain::authority::AvailableCa;
use crate::domain::certificate::wire::{
    CertRenewRequest, CertificateCreateRequest, CertificateCreateRequestV2,
    CertificateCreatedResponse, CertificateRecord,
};
use crate::domain::certificate::{CertificateChain, CsrCertificateRequest, DcCertificateRequest};
use crate::domain::{require_text, require_validity};
use crate::error::SdkError;
use crate::http::endpoint::{self, Endpoint};
use crate::http::envelope::decode_json;
use crate::pki::{csr, Certificate, CertificateWithKey, PrivateKey, LOCAL_KEY_BITS};
use crate::shared::{location, SubjectName};

pub struct Certificates<'a> {
    pub(crate) client: &'a EzcaClient,
}

impl<'a> Certificates<'a> {
    // ── Issuance ─────────────────────────────────────────────────────────

    /// Issue a certificate for `domain` with a locally generated 4096-bit RSA key.
    ///
    /// The key never leaves the process; it is returned paired with the
    /// issued certificate.
    ///
    /// Key generation is CPU-bound and runs on the calling task, typically for
    /// a few seconds. It happens before the bearer token is requested so the
    /// token is fresh when the request is sent.
    pub async fn request_for_domain(
        &self,
        ca: &AvailableCa,
        domain: &str,
        validity_days: i32,
    ) -> Result<CertificateWithKey, SdkError> {
        require_text("domain", domain)?;
        ca.ids()?;
        let validity_days = require_validity(validity_days)?;

        let subject = SubjectName::new(domain);
        let private_key = PrivateKey::generate(LOCAL_KEY_BITS)?;
        let csr = csr::build_csr(&subject, &private_key)?;

        let token = self.client.bearer().await?;
        let alt_names = vec![subject.common_name().to_string()];
        let request = CertificateCreateRequest::build(
            ca,
            subject,
            alt_names,
            csr,
            validity_days,
            location::GENERATE_LOCALLY_SLOW,
        )?;

        let certificate = self
            .issue(&endpoint::REQUEST_SSL_CERTIFICATE, &request, Credential::Bearer(token))
            .await?;
        Ok(CertificateWithKey::new(certificate, private_key))
    }

    /// Issue a certificate for a caller-supplied CSR.
    pub async fn request_with_csr(
        &self,
        ca: &AvailableCa,
        csr: &str,
        subject_name: &str,
        validity_days: i32,
    ) -> Result<Certificate, SdkError> {
        require_text("csr", csr)?;
        require_text("subject_name", subject_name)?;
        let request = CertificateCreateRequest::build(
            ca,
            SubjectName::new(subject_name),
            Vec::new(),
            csr.to_string(),
            validity_days,
            location::IMPORT_CSR,
        )?;

        let token = self.client.bearer().await?;
        self.issue(&endpoint::REQUEST_SSL_CERTIFICATE, &request, Credential::Bearer(token))
            .await
    }

    /// Issue a certificate through the V2 route (typed SANs).
    pub async fn request_v2(&self, request: &CsrCertificateRequest) -> Result<Certificate, SdkError> {
        let body = CertificateCreateRequestV2::try_from(request)?;
        let token = self.client.bearer().await?;
        self.issue(&endpoint::REQUEST_SSL_CERTIFICATE_V2, &body, Credential::Bearer(token))
            .await
    }

    /// Issue a certificate and return it with its issuing and root CA certificates.
    pub async fn request_with_chain(
        &self,
        request: &CsrCertificateRequest,
    ) -> Result<CertificateChain, SdkError> {
        let body = serde_json::to_value(CertificateCreateRequestV2::try_from(request)?)?;
        let token = self.client.bearer().await?;
        let payload = self
            .client
            .dispatch(
                &endpoint::REQUEST_FULL_SSL_CERTIFICATE,
                None,
                Some(&body),
                &Credential::Bearer(token),
            )
            .await?;

        let response: CertificateCreatedResponse = decode_json(&payload, "certificate chain")?;
        CertificateChain::try_from(response).map_err(|_| SdkError::decode("certificate chain", payload))
    }

    /// Issue a domain-controller certificate.
    pub async fn request_dc(&self, request: &DcCertificateRequest) -> Result<Certificate, SdkError> {
        let body = CertificateCreateRequestV2::try_from(request)?;
        let endpoint = if body.sid.is_empty() {
            &endpoint::REQUEST_DC_CERTIFICATE
        } else {
            &endpoint::REQUEST_DC_CERTIFICATE_V2
        };
        let token = self.client.bearer().await?;
        self.issue(endpoint, &body, Credential::Bearer(token)).await
    }

    async fn issue<T: serde::Serialize>(
        &self,
        endpoint: &Endpoint,
        request: &T,
        credential: Credential,
    ) -> Result<Certificate, SdkError> {
        let body = serde_json::to_value(request)?;
        let payload = self
            .client
            .dispatch(endpoint, None, Some(&body), &credential)
            .await?;
        Certificate::from_pem(&payload).map_err(|_| SdkError::decode("certificate", payload))
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Renew `existing` with a new CSR. Returns the new certificate PEM.
    ///
    /// The requested validity is the existing certificate's lifetime, not the
    /// CSR's.
    pub async fn renew(&self, existing: &CertificateWithKey, csr: &str) -> Result<String, SdkError> {
        self.renew_inner(existing, csr, None).await
    }

    /// Renew a domain-controller certificate, carrying the machine account SID.
    pub async fn renew_with_sid(
        &self,
        existing: &CertificateWithKey,
        csr: &str,
        sid: &str,
    ) -> Result<String, SdkError> {
        require_text("sid", sid)?;
        self.renew_inner(existing, csr, Some(sid)).await
    }

    async fn renew_inner(
        &self,
        existing: &CertificateWithKey,
        csr: &str,
        sid: Option<&str>,
    ) -> Result<String, SdkError> {
        require_text("csr", csr)?;
        let assertion = build_assertion(&existing.certificate, &existing.private_key)?;
        let body = serde_json::to_value(CertRenewRequest::for_certificate(
            &existing.certificate,
            csr,
            sid,
        ))?;
        self.client
            .dispatch(
                &endpoint::RENEW_CERTIFICATE,
                None,
                Some(&body),
                &Credential::Assertion(assertion),
            )
            .await
    }

    /// Revoke the certificate whose key signs the request.
    pub async fn revoke(&self, existing: &CertificateWithKey) -> Result<(), SdkError> {
        let assertion = build_assertion(&existing.certificate, &existing.private_key)?;
        let message = self
            .client
            .dispatch(
                &endpoint::REVOKE_CERTIFICATE,
                None,
                None,
                &Credential::Assertion(assertion),
            )
            .await?;
        tracing::info!(
            thumbprint = existing.certificate.thumbprint(),
            "{}",
            message
        );
        Ok(())
    }

    // ── Listing ──────────────────────────────────────────────────────────

    /// One page of the caller's certificates. Pages start at 0.
    pub async fn list_page(&self, page: u32) -> Result<Vec<CertificateRecord>, SdkError> {
        let token = self.client.bearer().await?;
        let payload = self
            .client
            .dispatch(
                &endpoint::MY_CERTIFICATES,
                Some(format!("pageNumber={}", page)),
                None,
                &Credential::Bearer(token),
            )
            .await?;
        decode_json(&payload, "certificate list")
    }

    /// Every certificate of the caller: pages 0, 1, 2, … until an empty page.
    pub async fn list_all(&self) -> Result<Vec<CertificateRecord>, SdkError> {
        let mut all = Vec::new();
        let mut page = 0;
        loop {
            let records = self.list_page(page).await?;
            if records.is_empty() {
                break;
            }
            all.extend(records);
            page += 1;
        }
        Ok(all)
    }
}
