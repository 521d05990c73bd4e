//! Shared newtypes, normalization rules and constants used across all domain modules.
//!
//! Newtypes here serialize/deserialize identically to the raw format the portal
//! expects, so they can be used directly in wire types.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── Extended key usages ─────────────────────────────────────────────────────

pub mod eku {
    pub const ANY: &str = "2.5.29.37.0";
    pub const CLIENT_AUTHENTICATION: &str = "1.3.6.1.5.5.7.3.2";
    pub const SERVER_AUTHENTICATION: &str = "1.3.6.1.5.5.7.3.1";
    pub const SMART_CARD_LOGON: &str = "1.3.6.1.4.1.311.20.2.2";
    pub const KDC_AUTHENTICATION: &str = "1.3.6.1.5.2.3.5";

    /// EKUs applied to SSL requests that do not name any.
    pub fn ssl_defaults() -> Vec<String> {
        vec![
            CLIENT_AUTHENTICATION.to_string(),
            SERVER_AUTHENTICATION.to_string(),
        ]
    }

    /// EKUs applied to domain-controller requests that do not name any.
    pub fn domain_controller_defaults() -> Vec<String> {
        vec![
            CLIENT_AUTHENTICATION.to_string(),
            SERVER_AUTHENTICATION.to_string(),
            SMART_CARD_LOGON.to_string(),
            KDC_AUTHENTICATION.to_string(),
        ]
    }
}

pub mod key_usage {
    pub const KEY_ENCIPHERMENT: &str = "Key Encipherment";
    pub const DIGITAL_SIGNATURE: &str = "Digital Signature";

    pub fn defaults() -> Vec<String> {
        vec![KEY_ENCIPHERMENT.to_string(), DIGITAL_SIGNATURE.to_string()]
    }
}

// ─── Certificate locations ───────────────────────────────────────────────────

/// Values of the `SelectedLocation` request field.
pub mod location {
    pub const IOT: &str = "IoT Device";
    pub const IOT_EDGE: &str = "IoT Edge";
    pub const IMPORT_CSR: &str = "Import CSR";
    pub const ACME: &str = "ACME";
    pub const SCEP: &str = "SCEP";
    pub const DOMAIN_CONTROLLER: &str = "Domain Controller";
    pub const GENERATE_LOCALLY: &str = "Generate Locally";
    pub const GENERATE_LOCALLY_SLOW: &str = "Generate Locally (Takes Up to Two Minutes)";
}

// ─── SubjectName ─────────────────────────────────────────────────────────────

/// A certificate subject that always carries a `CN=` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectName(String);

impl SubjectName {
    /// Prefix `CN=` unless the value already starts with it (case-insensitive).
    pub fn new(s: &str) -> Self {
        let s = s.trim();
        let has_prefix = s
            .get(..3)
            .map(|p| p.eq_ignore_ascii_case("CN="))
            .unwrap_or(false);
        if has_prefix {
            Self(s.to_string())
        } else {
            Self(format!("CN={}", s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value without its `CN=` prefix.
    pub fn common_name(&self) -> &str {
        &self.0[3..]
    }
}

impl std::fmt::Display for SubjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SubjectName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Serialize for SubjectName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SubjectName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SubjectName::new(&s))
    }
}

// ─── Validity ────────────────────────────────────────────────────────────────

/// Negative lifetimes are treated as their absolute value.
pub fn normalize_validity_days(days: i32) -> i32 {
    days.saturating_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_name_gets_prefix() {
        assert_eq!(SubjectName::new("example.com").as_str(), "CN=example.com");
    }

    #[test]
    fn test_subject_name_keeps_existing_prefix() {
        assert_eq!(SubjectName::new("CN=example.com").as_str(), "CN=example.com");
        assert_eq!(SubjectName::new("cn=example.com").as_str(), "cn=example.com");
        assert_eq!(SubjectName::new("cn=example.com").common_name(), "example.com");
    }

    #[test]
    fn test_subject_name_serializes_transparently() {
        let json = serde_json::to_string(&SubjectName::new("a.test")).unwrap();
        assert_eq!(json, r#""CN=a.test""#);
        let back: SubjectName = serde_json::from_str(r#""b.test""#).unwrap();
        assert_eq!(back.as_str(), "CN=b.test");
    }

    #[test]
    fn test_negative_validity_is_absolute() {
        assert_eq!(normalize_validity_days(-10), 10);
        assert_eq!(normalize_validity_days(10), 10);
        assert_eq!(normalize_validity_days(i32::MIN), i32::MAX);
    }

    #[test]
    fn test_domain_controller_ekus_extend_ssl_ekus() {
        let dc = eku::domain_controller_defaults();
        for e in eku::ssl_defaults() {
            assert!(dc.contains(&e));
        }
        assert_eq!(dc.len(), 4);
    }
}
