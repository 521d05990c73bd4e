//! Wire types for self-service profiles and on-behalf-of issuance.

use serde::{Deserialize, Serialize};

use crate::shared::key_usage;
use crate::shared::serde_util::null_as_default;

/// A self-service certificate profile.
///
/// List-valued settings (`Ekus`, `KeyUsages`, `BehalfOfAgents`, …) travel as
/// strings, exactly as the portal stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfServiceProfile {
    #[serde(rename = "TenantID", default, deserialize_with = "null_as_default")]
    pub tenant_id: String,
    #[serde(rename = "CaID", default, deserialize_with = "null_as_default")]
    pub ca_id: String,
    #[serde(rename = "TemplateID", default, deserialize_with = "null_as_default")]
    pub template_id: String,
    #[serde(rename = "ProfileID", default, deserialize_with = "null_as_default")]
    pub profile_id: String,
    #[serde(rename = "allUsers", default = "yes")]
    pub all_users: bool,
    #[serde(rename = "MultipleDevices", default)]
    pub multiple_devices: bool,
    #[serde(rename = "otherTenants", default)]
    pub other_tenants: bool,
    #[serde(rename = "otherTenantsIds", default, deserialize_with = "null_as_default")]
    pub other_tenants_ids: String,
    #[serde(rename = "subjectName", default, deserialize_with = "null_as_default")]
    pub subject_name: String,
    #[serde(rename = "subjectAltNames", default, deserialize_with = "null_as_default")]
    pub subject_alt_names: String,
    #[serde(rename = "durationInDays", default = "default_duration")]
    pub duration_in_days: i32,
    #[serde(rename = "Ekus", default, deserialize_with = "null_as_default")]
    pub ekus: String,
    #[serde(
        rename = "KeyUsages",
        default = "default_key_usages",
        deserialize_with = "null_as_default"
    )]
    pub key_usages: String,
    #[serde(rename = "PolicyName", default, deserialize_with = "null_as_default")]
    pub policy_name: String,
    #[serde(rename = "EncryptionKeyLocation", default, deserialize_with = "null_as_default")]
    pub encryption_key_location: String,
    /// JSON text of a `[BehalfOfAgent]` list.
    #[serde(rename = "BehalfOfAgents", default, deserialize_with = "null_as_default")]
    pub behalf_of_agents: String,
}

fn yes() -> bool {
    true
}

fn default_duration() -> i32 {
    30
}

fn default_key_usages() -> String {
    key_usage::DIGITAL_SIGNATURE.to_string()
}

impl Default for SelfServiceProfile {
    fn default() -> Self {
        Self {
            tenant_id: String::new(),
            ca_id: String::new(),
            template_id: String::new(),
            profile_id: String::new(),
            all_users: true,
            multiple_devices: false,
            other_tenants: false,
            other_tenants_ids: String::new(),
            subject_name: String::new(),
            subject_alt_names: String::new(),
            duration_in_days: default_duration(),
            ekus: String::new(),
            key_usages: default_key_usages(),
            policy_name: String::new(),
            encryption_key_location: String::new(),
            behalf_of_agents: String::new(),
        }
    }
}

impl SelfServiceProfile {
    /// Decoded `BehalfOfAgents`. Empty text means no agents.
    pub fn agents(&self) -> Result<Vec<BehalfOfAgent>, serde_json::Error> {
        if self.behalf_of_agents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&self.behalf_of_agents)
    }

    pub fn set_agents(&mut self, agents: &[BehalfOfAgent]) -> Result<(), serde_json::Error> {
        self.behalf_of_agents = serde_json::to_string(agents)?;
        Ok(())
    }
}

/// An agent allowed to request certificates on behalf of a profile's users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehalfOfAgent {
    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Identifier of the agent, matching its certificate's common name.
    #[serde(rename = "ProfileID", default, deserialize_with = "null_as_default")]
    pub profile_id: String,
}

// ─── Profile listing ─────────────────────────────────────────────────────────

/// Self-service profiles visible to the caller: the tenant's own plus the
/// ones shared in from other tenants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableSelfServiceProfiles {
    #[serde(rename = "TenantSelfServiceProfiles", deserialize_with = "null_as_default")]
    pub tenant_profiles: Vec<SelfServiceProfile>,
    #[serde(rename = "SelfServiceGuestProfiles", deserialize_with = "null_as_default")]
    pub guest_profiles: Vec<SelfServiceGuestDetails>,
}

impl AvailableSelfServiceProfiles {
    /// The tenant profile with the given policy name. With no name, the
    /// sole tenant profile if there is exactly one.
    pub fn tenant_profile(&self, policy_name: Option<&str>) -> Option<&SelfServiceProfile> {
        match policy_name {
            Some(name) => self.tenant_profiles.iter().find(|p| p.policy_name == name),
            None if self.tenant_profiles.len() == 1 => self.tenant_profiles.first(),
            None => None,
        }
    }
}

/// A profile shared from another tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfServiceGuestDetails {
    #[serde(rename = "OriginalTenantPolicy", deserialize_with = "null_as_default")]
    pub original_tenant_policy: SelfServiceProfile,
    #[serde(rename = "GuestPolicy", deserialize_with = "null_as_default")]
    pub guest_policy: SelfServiceGuestPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfServiceGuestPolicy {
    #[serde(rename = "TenantID", deserialize_with = "null_as_default")]
    pub tenant_id: String,
    /// Tenant that owns the CA.
    #[serde(rename = "CaTenantID", deserialize_with = "null_as_default")]
    pub ca_tenant_id: String,
    #[serde(rename = "CaID", deserialize_with = "null_as_default")]
    pub ca_id: String,
    #[serde(rename = "TemplateID", deserialize_with = "null_as_default")]
    pub template_id: String,
    #[serde(rename = "ProfileID", deserialize_with = "null_as_default")]
    pub profile_id: String,
    #[serde(rename = "allUsers")]
    pub all_users: bool,
    #[serde(rename = "PolicyName", deserialize_with = "null_as_default")]
    pub policy_name: String,
}

// ─── On-behalf-of issuance ───────────────────────────────────────────────────

/// Body of `RequestSelfServiceCertificateOnBehalfOf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnBehalfOfCertificateRequest {
    #[serde(rename = "CSR")]
    pub csr: String,
    #[serde(rename = "CertificateName")]
    pub certificate_name: String,
    #[serde(rename = "UserGUID")]
    pub user_guid: String,
    #[serde(rename = "CaID")]
    pub ca_id: String,
    #[serde(rename = "TemplateID")]
    pub template_id: String,
    #[serde(rename = "CAProfileID")]
    pub profile_id: String,
    #[serde(rename = "CAPolicyName")]
    pub policy_name: String,
    /// The agent's own certificate.
    #[serde(rename = "EZCACertificatePEM")]
    pub agent_certificate_pem: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_when_fields_missing() {
        let profile: SelfServiceProfile =
            serde_json::from_str(r#"{"CaID":"ca-1","TemplateID":"tpl-1","ProfileID":"p-1","subjectName":null}"#)
                .unwrap();
        assert!(profile.all_users);
        assert_eq!(profile.duration_in_days, 30);
        assert_eq!(profile.key_usages, "Digital Signature");
        assert_eq!(profile.subject_name, "");
        assert!(profile.agents().unwrap().is_empty());
    }

    #[test]
    fn test_agents_round_trip_through_text() {
        let mut profile = SelfServiceProfile::default();
        let agents = vec![BehalfOfAgent {
            name: "Provisioning agent".to_string(),
            profile_id: "7d3c".to_string(),
        }];
        profile.set_agents(&agents).unwrap();
        assert_eq!(
            profile.behalf_of_agents,
            r#"[{"Name":"Provisioning agent","ProfileID":"7d3c"}]"#
        );
        assert_eq!(profile.agents().unwrap(), agents);
    }

    #[test]
    fn test_profile_serializes_mixed_case_names() {
        let value = serde_json::to_value(SelfServiceProfile::default()).unwrap();
        assert_eq!(value["allUsers"], true);
        assert_eq!(value["durationInDays"], 30);
        assert!(value.get("CaID").is_some());
        assert!(value.get("BehalfOfAgents").is_some());
    }

    #[test]
    fn test_available_profiles_from_portal_json() {
        let json = r#"{
            "TenantSelfServiceProfiles": [
                {"CaID": "ca-1", "TemplateID": "tpl-1", "ProfileID": "p-1", "PolicyName": "Laptops"},
                {"CaID": "ca-1", "TemplateID": "tpl-2", "ProfileID": "p-2", "PolicyName": "Phones",
                 "BehalfOfAgents": null}
            ],
            "SelfServiceGuestProfiles": [{
                "OriginalTenantPolicy": {"CaID": "ca-9", "PolicyName": "Partner"},
                "GuestPolicy": {"TenantID": "t-2", "CaTenantID": "t-9", "CaID": "ca-9",
                                "ProfileID": "g-1", "allUsers": true, "PolicyName": null}
            }]
        }"#;
        let available: AvailableSelfServiceProfiles = serde_json::from_str(json).unwrap();
        assert_eq!(available.tenant_profiles.len(), 2);
        assert_eq!(available.guest_profiles[0].guest_policy.ca_tenant_id, "t-9");
        assert!(available.guest_profiles[0].guest_policy.all_users);
        assert_eq!(available.guest_profiles[0].guest_policy.policy_name, "");
        assert_eq!(available.guest_profiles[0].original_tenant_policy.ca_id, "ca-9");

        let phones = available.tenant_profile(Some("Phones")).unwrap();
        assert_eq!(phones.profile_id, "p-2");
        assert!(phones.agents().unwrap().is_empty());
        assert!(available.tenant_profile(None).is_none());
        assert!(available.tenant_profile(Some("Servers")).is_none());
    }

    #[test]
    fn test_sole_tenant_profile_is_picked_without_name() {
        let available: AvailableSelfServiceProfiles =
            serde_json::from_str(r#"{"TenantSelfServiceProfiles":[{"ProfileID":"p-1"}],"SelfServiceGuestProfiles":null}"#)
                .unwrap();
        assert_eq!(available.tenant_profile(None).unwrap().profile_id, "p-1");
        assert!(available.guest_profiles.is_empty());
    }
}
