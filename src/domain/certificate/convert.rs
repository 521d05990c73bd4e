//! Request → wire conversions and response → domain conversions.

use crate::domain::certificate::wire::{
    CertRenewRequest, CertificateCreateRequest, CertificateCreateRequestV2,
    CertificateCreatedResponse, SubjectAltValue,
};
use crate::domain::certificate::{CertificateChain, CsrCertificateRequest, DcCertificateRequest, DEFAULT_AUTO_RENEW_PERCENTAGE};
use crate::domain::{require_text, require_validity};
use crate::domain::authority::AvailableCa;
use crate::error::{PkiError, PreconditionError};
use crate::pki::Certificate;
use crate::shared::{eku, key_usage, location, normalize_validity_days, SubjectName};

fn or_defaults(values: &[String], defaults: fn() -> Vec<String>) -> Vec<String> {
    if values.is_empty() {
        defaults()
    } else {
        values.to_vec()
    }
}

impl CertificateCreateRequest {
    /// v1 body with plain DNS SANs.
    pub(crate) fn build(
        ca: &AvailableCa,
        subject_name: SubjectName,
        subject_alt_names: Vec<String>,
        csr: String,
        validity_days: i32,
        location: &str,
    ) -> Result<Self, PreconditionError> {
        let (ca_id, template_id) = ca.ids()?;
        Ok(Self {
            subject_name,
            subject_alt_names,
            ca_id: ca_id.to_string(),
            template_id: template_id.to_string(),
            csr,
            validity_in_days: require_validity(validity_days)?,
            ekus: eku::ssl_defaults(),
            key_usages: key_usage::defaults(),
            selected_location: location.to_string(),
            resource_id: String::new(),
            secret_name: String::new(),
            akv_name: String::new(),
            auto_renew: false,
            auto_renew_percentage: DEFAULT_AUTO_RENEW_PERCENTAGE,
            cert_app_id: String::new(),
            certificate_tags: String::new(),
        })
    }
}

impl TryFrom<&CsrCertificateRequest> for CertificateCreateRequestV2 {
    type Error = PreconditionError;

    fn try_from(request: &CsrCertificateRequest) -> Result<Self, Self::Error> {
        let (ca_id, template_id) = request.ca.ids()?;
        require_text("csr", &request.csr)?;
        require_text("subject_name", &request.subject_name)?;
        Ok(Self {
            subject_name: SubjectName::new(&request.subject_name),
            subject_alt_names: request.subject_alt_names.clone(),
            ca_id: ca_id.to_string(),
            template_id: template_id.to_string(),
            csr: request.csr.clone(),
            validity_in_days: require_validity(request.validity_days)?,
            ekus: or_defaults(&request.ekus, eku::ssl_defaults),
            key_usages: or_defaults(&request.key_usages, key_usage::defaults),
            selected_location: request.location.clone(),
            resource_id: String::new(),
            secret_name: String::new(),
            akv_name: String::new(),
            auto_renew: request.auto_renew,
            auto_renew_percentage: request.auto_renew_percentage,
            cert_app_id: String::new(),
            certificate_tags: request.certificate_tags.clone(),
            sid: String::new(),
        })
    }
}

impl TryFrom<&DcCertificateRequest> for CertificateCreateRequestV2 {
    type Error = PreconditionError;

    fn try_from(request: &DcCertificateRequest) -> Result<Self, Self::Error> {
        let (ca_id, template_id) = request.ca.ids()?;
        require_text("csr", &request.csr)?;
        require_text("subject_name", &request.subject_name)?;
        let subject_name = SubjectName::new(&request.subject_name);
        let dns_name = request
            .dns_name
            .clone()
            .unwrap_or_else(|| subject_name.common_name().to_string());
        Ok(Self {
            subject_alt_names: vec![SubjectAltValue::dns(dns_name)],
            subject_name,
            ca_id: ca_id.to_string(),
            template_id: template_id.to_string(),
            csr: request.csr.clone(),
            validity_in_days: require_validity(request.validity_days)?,
            ekus: or_defaults(&request.ekus, eku::domain_controller_defaults),
            key_usages: key_usage::defaults(),
            selected_location: location::DOMAIN_CONTROLLER.to_string(),
            resource_id: String::new(),
            secret_name: String::new(),
            akv_name: String::new(),
            auto_renew: false,
            auto_renew_percentage: DEFAULT_AUTO_RENEW_PERCENTAGE,
            cert_app_id: request.cert_app_id.clone(),
            certificate_tags: String::new(),
            sid: request.sid.clone().unwrap_or_default(),
        })
    }
}

impl CertRenewRequest {
    /// Validity is the renewed certificate's lifetime in whole days.
    pub(crate) fn for_certificate(certificate: &Certificate, csr: &str, sid: Option<&str>) -> Self {
        Self {
            csr: csr.to_string(),
            validity_in_days: normalize_validity_days(certificate.validity_days()),
            sid: sid.map(str::to_string),
        }
    }
}

fn optional_certificate(pem: &str) -> Result<Option<Certificate>, PkiError> {
    if pem.trim().is_empty() {
        Ok(None)
    } else {
        Certificate::from_pem(pem).map(Some)
    }
}

impl TryFrom<CertificateCreatedResponse> for CertificateChain {
    type Error = PkiError;

    fn try_from(response: CertificateCreatedResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            certificate: Certificate::from_pem(&response.certificate_pem)?,
            issuing_ca: optional_certificate(&response.issuing_ca_certificate)?,
            root: optional_certificate(&response.root_certificate)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ca() -> AvailableCa {
        AvailableCa::new("ca-1", "tpl-1")
    }

    #[test]
    fn test_csr_request_normalizes_subject_and_validity() {
        let request = CsrCertificateRequest::new(ca(), "csr", "example.com", -10);
        let wire = CertificateCreateRequestV2::try_from(&request).unwrap();
        assert_eq!(wire.subject_name.as_str(), "CN=example.com");
        assert_eq!(wire.validity_in_days, 10);
        assert_eq!(wire.ekus, eku::ssl_defaults());
        assert_eq!(wire.selected_location, location::IMPORT_CSR);
    }

    #[test]
    fn test_csr_request_requires_csr() {
        let request = CsrCertificateRequest::new(ca(), " ", "example.com", 30);
        assert_eq!(
            CertificateCreateRequestV2::try_from(&request),
            Err(PreconditionError::MissingArgument("csr"))
        );
    }

    #[test]
    fn test_dc_request_defaults() {
        let request = DcCertificateRequest::new(ca(), "csr", "dc01.corp.contoso.com", 365);
        let wire = CertificateCreateRequestV2::try_from(&request).unwrap();
        assert_eq!(wire.ekus, eku::domain_controller_defaults());
        assert_eq!(wire.selected_location, location::DOMAIN_CONTROLLER);
        assert_eq!(wire.subject_alt_names, vec![SubjectAltValue::dns("dc01.corp.contoso.com")]);
        assert_eq!(wire.sid, "");

        let body = serde_json::to_value(&wire).unwrap();
        assert_eq!(body["SID"], "");
        assert_eq!(body["CAID"], "ca-1");
        assert_eq!(body["SubjectAltNames"][0]["SubjectAltType"], 2);
    }

    #[test]
    fn test_dc_request_keeps_explicit_ekus() {
        let request = DcCertificateRequest::new(ca(), "csr", "dc01", 365)
            .ekus(vec![eku::KDC_AUTHENTICATION.to_string()])
            .sid("S-1-5-21-1");
        let wire = CertificateCreateRequestV2::try_from(&request).unwrap();
        assert_eq!(wire.ekus, vec![eku::KDC_AUTHENTICATION.to_string()]);
        assert_eq!(wire.sid, "S-1-5-21-1");
    }

    #[test]
    fn test_v1_body_field_names() {
        let wire = CertificateCreateRequest::build(
            &ca(),
            SubjectName::new("a.test"),
            vec!["a.test".to_string()],
            "csr".to_string(),
            90,
            location::GENERATE_LOCALLY_SLOW,
        )
        .unwrap();
        let body = serde_json::to_value(&wire).unwrap();
        assert_eq!(body["SubjectName"], "CN=a.test");
        assert_eq!(body["SubjectAltNames"][0], "a.test");
        assert_eq!(body["ValidityInDays"], 90);
        assert_eq!(body["AutoRenewPercentage"], 80);
        assert_eq!(body["KeyUsages"][0], "Key Encipherment");
        assert_eq!(body["AKVName"], "");
    }

    #[test]
    fn test_chain_with_empty_ca_fields() {
        let response = CertificateCreatedResponse {
            certificate_pem: include_str!("../../../tests/fixtures/rsa_cert.pem").to_string(),
            issuing_ca_certificate: String::new(),
            root_certificate: " ".to_string(),
        };
        let chain = CertificateChain::try_from(response).unwrap();
        assert_eq!(chain.issuing_ca, None);
        assert_eq!(chain.root, None);
    }
}
