//! Wire types for certificate issuance, renewal and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::serde_util::{null_as_default, portal_datetime};
use crate::shared::SubjectName;

// ─── Subject alternative names ───────────────────────────────────────────────

/// A typed SAN entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAltValue {
    #[serde(rename = "ValueSTR", default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(rename = "SubjectAltType", default)]
    pub kind: i32,
}

impl SubjectAltValue {
    pub const DNS: i32 = 2;
    pub const IP_ADDRESS: i32 = 7;

    pub fn dns(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: Self::DNS,
        }
    }

    pub fn ip(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: Self::IP_ADDRESS,
        }
    }
}

// ─── Issuance requests ───────────────────────────────────────────────────────

/// Body of `RequestSSLCertificate` (SANs as plain DNS names).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateCreateRequest {
    pub subject_name: SubjectName,
    pub subject_alt_names: Vec<String>,
    #[serde(rename = "CAID")]
    pub ca_id: String,
    #[serde(rename = "TemplateID")]
    pub template_id: String,
    #[serde(rename = "CSR")]
    pub csr: String,
    pub validity_in_days: i32,
    #[serde(rename = "EKUs")]
    pub ekus: Vec<String>,
    pub key_usages: Vec<String>,
    pub selected_location: String,
    #[serde(rename = "ResourceID")]
    pub resource_id: String,
    pub secret_name: String,
    #[serde(rename = "AKVName")]
    pub akv_name: String,
    pub auto_renew: bool,
    pub auto_renew_percentage: i32,
    #[serde(rename = "CertAppID")]
    pub cert_app_id: String,
    pub certificate_tags: String,
}

/// Body of the V2, full-chain and domain-controller issuance routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateCreateRequestV2 {
    pub subject_name: SubjectName,
    pub subject_alt_names: Vec<SubjectAltValue>,
    #[serde(rename = "CAID")]
    pub ca_id: String,
    #[serde(rename = "TemplateID")]
    pub template_id: String,
    #[serde(rename = "CSR")]
    pub csr: String,
    pub validity_in_days: i32,
    #[serde(rename = "EKUs")]
    pub ekus: Vec<String>,
    pub key_usages: Vec<String>,
    pub selected_location: String,
    #[serde(rename = "ResourceID")]
    pub resource_id: String,
    pub secret_name: String,
    #[serde(rename = "AKVName")]
    pub akv_name: String,
    pub auto_renew: bool,
    pub auto_renew_percentage: i32,
    #[serde(rename = "CertAppID")]
    pub cert_app_id: String,
    pub certificate_tags: String,
    #[serde(rename = "SID")]
    pub sid: String,
}

/// Body of `RenewCertificate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertRenewRequest {
    #[serde(rename = "CSR")]
    pub csr: String,
    #[serde(rename = "ValidityInDays")]
    pub validity_in_days: i32,
    #[serde(rename = "Sid", skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

// ─── Responses ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CertificateCreatedResponse {
    #[serde(rename = "CertificatePEM", deserialize_with = "null_as_default")]
    pub certificate_pem: String,
    #[serde(rename = "IssuingCACertificate", deserialize_with = "null_as_default")]
    pub issuing_ca_certificate: String,
    #[serde(rename = "RootCertificate", deserialize_with = "null_as_default")]
    pub root_certificate: String,
}

/// One entry of `GetMyCertificatesV2Paginated`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateRecord {
    #[serde(rename = "CertificatePEM")]
    pub certificate_pem: Option<String>,
    #[serde(rename = "Thumbprint")]
    pub thumbprint: Option<String>,
    #[serde(rename = "CAID")]
    pub ca_id: Option<String>,
    #[serde(rename = "SubjectName")]
    pub subject_name: Option<String>,
    #[serde(rename = "TemplateID")]
    pub template_id: Option<String>,
    #[serde(rename = "Revoked")]
    pub revoked: bool,
    #[serde(rename = "SubjectAlternateNames", deserialize_with = "null_as_default")]
    pub subject_alternate_names: Vec<SubjectAltValue>,
    #[serde(rename = "KeyUsages", deserialize_with = "null_as_default")]
    pub key_usages: Vec<String>,
    #[serde(rename = "EKUs", deserialize_with = "null_as_default")]
    pub ekus: Vec<String>,
    #[serde(rename = "DateRequested", with = "portal_datetime")]
    pub date_requested: DateTime<Utc>,
    #[serde(rename = "ExpiryDate", with = "portal_datetime")]
    pub expiry_date: DateTime<Utc>,
    /// local, AKV, Machine.
    #[serde(rename = "CertLocationType", deserialize_with = "null_as_default")]
    pub location_type: String,
    #[serde(rename = "CertLocation", deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(rename = "CAFriendlyName", deserialize_with = "null_as_default")]
    pub ca_friendly_name: String,
    #[serde(rename = "CertNameAtLocation", deserialize_with = "null_as_default")]
    pub name_at_location: String,
    #[serde(rename = "AutoRenew")]
    pub auto_renew: bool,
    #[serde(rename = "AutoRenewPercentage")]
    pub auto_renew_percentage: i32,
    #[serde(rename = "CertLengthDays")]
    pub length_days: i32,
    #[serde(rename = "CertAppID", deserialize_with = "null_as_default")]
    pub cert_app_id: String,
    #[serde(rename = "CertificateTags", deserialize_with = "null_as_default")]
    pub certificate_tags: String,
    #[serde(rename = "CanRevoke")]
    pub can_revoke: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renew_request_omits_missing_sid() {
        let body = serde_json::to_value(CertRenewRequest {
            csr: "csr".to_string(),
            validity_in_days: 30,
            sid: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "CSR": "csr", "ValidityInDays": 30 }));
    }

    #[test]
    fn test_record_from_portal_json() {
        let json = r#"{
            "CertificatePEM": null,
            "Thumbprint": "ABCD",
            "CAID": "ca-1",
            "SubjectName": "CN=web.contoso.com",
            "TemplateID": "tpl-1",
            "Revoked": false,
            "SubjectAlternateNames": [{"ValueSTR": "web.contoso.com", "SubjectAltType": 2}],
            "KeyUsages": ["Digital Signature"],
            "EKUs": ["1.3.6.1.5.5.7.3.1"],
            "DateRequested": "2024-03-01T12:00:00.5",
            "ExpiryDate": "2025-03-01T12:00:00Z",
            "CertLocationType": "local",
            "CanRevoke": true
        }"#;
        let record: CertificateRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.thumbprint.as_deref(), Some("ABCD"));
        assert_eq!(record.certificate_pem, None);
        assert_eq!(record.subject_alternate_names, vec![SubjectAltValue::dns("web.contoso.com")]);
        assert!(record.can_revoke);
        assert_eq!(record.ca_friendly_name, "");
        assert_eq!(record.expiry_date.timestamp(), 1740830400);
    }

    #[test]
    fn test_record_tolerates_null_strings() {
        let json = r#"[{
            "Thumbprint": "ABCD",
            "DateRequested": "2024-03-01T12:00:00",
            "ExpiryDate": "2025-03-01T12:00:00",
            "CertLocationType": null,
            "CertLocation": null,
            "CAFriendlyName": null,
            "CertNameAtLocation": null,
            "CertAppID": null,
            "CertificateTags": null,
            "SubjectAlternateNames": null,
            "KeyUsages": null,
            "EKUs": null
        }]"#;
        let records: Vec<CertificateRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].cert_app_id, "");
        assert_eq!(records[0].location, "");
        assert!(records[0].subject_alternate_names.is_empty());
        assert!(records[0].ekus.is_empty());
    }

    #[test]
    fn test_created_response_tolerates_null_chain() {
        let json = r#"{"CertificatePEM":"abc","IssuingCACertificate":null,"RootCertificate":null}"#;
        let created: CertificateCreatedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(created.certificate_pem, "abc");
        assert_eq!(created.root_certificate, "");
    }
}
