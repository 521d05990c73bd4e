//! Wire types for `GetCertLogs`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::serde_util::{null_as_default, portal_datetime};

/// Window and page of an audit query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuditRequest {
    #[serde(with = "portal_datetime")]
    pub date_from: DateTime<Utc>,
    #[serde(with = "portal_datetime")]
    pub date_to: DateTime<Utc>,
    pub max_number_of_records: i32,
    pub page_number: i32,
}

impl AuditRequest {
    pub const DEFAULT_MAX_RECORDS: i32 = 12_000;

    pub fn between(date_from: DateTime<Utc>, date_to: DateTime<Utc>) -> Self {
        Self {
            date_from,
            date_to,
            ..Self::default()
        }
    }

    pub fn page(mut self, page_number: i32) -> Self {
        self.page_number = page_number;
        self
    }

    pub fn max_records(mut self, max: i32) -> Self {
        self.max_number_of_records = max;
        self
    }
}

impl Default for AuditRequest {
    /// The last 90 days through tomorrow.
    fn default() -> Self {
        let now = Utc::now();
        Self {
            date_from: now - Duration::days(90),
            date_to: now + Duration::days(1),
            max_number_of_records: Self::DEFAULT_MAX_RECORDS,
            page_number: 0,
        }
    }
}

/// One certificate lifecycle event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CertificateAuditLog {
    #[serde(rename = "TenantID")]
    pub tenant_id: Option<String>,
    #[serde(rename = "CAID")]
    pub ca_id: Option<String>,
    #[serde(with = "portal_datetime")]
    pub date_requested: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(rename = "DomainID", deserialize_with = "null_as_default")]
    pub domain_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbprint: String,
    #[serde(rename = "TemplateID", deserialize_with = "null_as_default")]
    pub template_id: String,
    #[serde(rename = "CertificatePEM", deserialize_with = "null_as_default")]
    pub certificate_pem: String,
    #[serde(rename = "SubID", deserialize_with = "null_as_default")]
    pub sub_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub requester: String,
    #[serde(rename = "CAFriendlyName", deserialize_with = "null_as_default")]
    pub ca_friendly_name: String,
    #[serde(rename = "CertLocationType", deserialize_with = "null_as_default")]
    pub location_type: String,
    #[serde(rename = "CertLocation", deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(rename = "CertNameAtLocation", deserialize_with = "null_as_default")]
    pub name_at_location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let request = AuditRequest::default();
        assert_eq!((request.date_to - request.date_from).num_days(), 91);
        assert_eq!(request.max_number_of_records, 12_000);
        assert_eq!(request.page_number, 0);
    }

    #[test]
    fn test_request_field_names() {
        let value = serde_json::to_value(AuditRequest::default().page(2)).unwrap();
        assert_eq!(value["PageNumber"], 2);
        assert_eq!(value["MaxNumberOfRecords"], 12_000);
        assert!(value["DateFrom"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_log_from_portal_json() {
        let json = r#"{
            "TenantID": "t-1",
            "CAID": "ca-1",
            "DateRequested": "2024-05-02T08:00:00+00:00",
            "Domain": "web.contoso.com",
            "Thumbprint": "ABCD",
            "Requester": "alice@contoso.com",
            "Action": "Revoked"
        }"#;
        let log: CertificateAuditLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.action, "Revoked");
        assert_eq!(log.tenant_id.as_deref(), Some("t-1"));
        assert_eq!(log.date_requested.timestamp(), 1714636800);
        assert_eq!(log.domain_id, "");
    }

    #[test]
    fn test_log_tolerates_null_strings() {
        let json = r#"[{
            "DateRequested": "2024-05-02T08:00:00",
            "SubID": null,
            "CertificatePEM": null,
            "CertLocation": null,
            "Action": "Issued"
        }]"#;
        let logs: Vec<CertificateAuditLog> = serde_json::from_str(json).unwrap();
        assert_eq!(logs[0].sub_id, "");
        assert_eq!(logs[0].certificate_pem, "");
        assert_eq!(logs[0].action, "Issued");
    }
}
