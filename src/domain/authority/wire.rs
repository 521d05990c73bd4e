//! Wire types for `GetAvailableSSLCAs`.

use serde::{Deserialize, Serialize};

use crate::domain::self_service::SelfServiceProfile;
use crate::error::PreconditionError;

/// A CA + template pair the caller may request certificates from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableCa {
    #[serde(rename = "CAID")]
    pub ca_id: Option<String>,
    #[serde(rename = "CAFriendlyName")]
    pub friendly_name: Option<String>,
    #[serde(rename = "CATemplateType")]
    pub template_type: Option<String>,
    #[serde(rename = "TemplateID")]
    pub template_id: Option<String>,
    #[serde(rename = "KeyUsage")]
    pub key_usage: Option<String>,
    #[serde(rename = "MaxCertLifeDays", default)]
    pub max_cert_life_days: i32,
    /// Whether all domains are allowed or only registered ones.
    #[serde(rename = "DomainRestrictions")]
    pub domain_restrictions: Option<String>,
    #[serde(rename = "CAKeyType")]
    pub key_type: Option<String>,
    #[serde(rename = "CAHashing")]
    pub hashing: Option<String>,
}

impl AvailableCa {
    pub fn new(ca_id: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            ca_id: Some(ca_id.into()),
            template_id: Some(template_id.into()),
            ..Default::default()
        }
    }

    /// `(ca_id, template_id)`, both required to be non-empty.
    pub(crate) fn ids(&self) -> Result<(&str, &str), PreconditionError> {
        fn non_empty(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.trim().is_empty())
        }
        let ca_id = non_empty(&self.ca_id).ok_or(PreconditionError::MissingArgument("ca.ca_id"))?;
        let template_id =
            non_empty(&self.template_id).ok_or(PreconditionError::MissingArgument("ca.template_id"))?;
        Ok((ca_id, template_id))
    }
}

impl From<&SelfServiceProfile> for AvailableCa {
    /// The profile's CA id doubles as the friendly name.
    fn from(profile: &SelfServiceProfile) -> Self {
        Self {
            ca_id: Some(profile.ca_id.clone()),
            friendly_name: Some(profile.ca_id.clone()),
            template_id: Some(profile.template_id.clone()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_portal_shape() {
        let json = r#"{
            "CAID": "ca-1",
            "CAFriendlyName": "Contoso Issuing CA",
            "CATemplateType": "SSL",
            "TemplateID": "tpl-1",
            "KeyUsage": null,
            "MaxCertLifeDays": 397,
            "DomainRestrictions": "Registered",
            "CAKeyType": "RSA 4096",
            "CAHashing": "SHA256"
        }"#;
        let ca: AvailableCa = serde_json::from_str(json).unwrap();
        assert_eq!(ca.ids().unwrap(), ("ca-1", "tpl-1"));
        assert_eq!(ca.max_cert_life_days, 397);
        assert_eq!(ca.key_usage, None);
    }

    #[test]
    fn test_missing_ids_are_preconditions() {
        let ca = AvailableCa {
            ca_id: Some(" ".to_string()),
            template_id: Some("tpl".to_string()),
            ..Default::default()
        };
        assert_eq!(ca.ids(), Err(PreconditionError::MissingArgument("ca.ca_id")));
        let ca = AvailableCa::new("ca", "");
        assert_eq!(ca.ids(), Err(PreconditionError::MissingArgument("ca.template_id")));
    }
}
