//! Wire types for domain registration.

use serde::{Deserialize, Serialize};

use crate::auth::CallerIdentity;
use crate::shared::serde_util::null_as_default;

/// A directory principal (owner or requester of a domain).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryObject {
    #[serde(rename = "ObjectId", default, deserialize_with = "null_as_default")]
    pub object_id: String,
    #[serde(rename = "FriendlyName", default, deserialize_with = "null_as_default")]
    pub friendly_name: String,
    #[serde(
        rename = "ObjectType",
        default = "default_object_type",
        deserialize_with = "null_as_default"
    )]
    pub object_type: String,
    #[serde(rename = "isValid", default = "default_valid")]
    pub is_valid: bool,
}

fn default_object_type() -> String {
    DirectoryObject::USER.to_string()
}

fn default_valid() -> bool {
    true
}

impl DirectoryObject {
    pub const USER: &'static str = "User";

    /// A valid user entry.
    pub fn user(object_id: impl Into<String>, friendly_name: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            friendly_name: friendly_name.into(),
            object_type: Self::USER.to_string(),
            is_valid: true,
        }
    }
}

impl From<CallerIdentity> for DirectoryObject {
    fn from(identity: CallerIdentity) -> Self {
        Self::user(identity.object_id, identity.principal_name)
    }
}

/// Body of `RegisterNewDomain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewDomainRegistrationRequest {
    #[serde(rename = "CAID")]
    pub ca_id: String,
    #[serde(rename = "TemplateID")]
    pub template_id: String,
    pub domain: String,
    pub owners: Vec<DirectoryObject>,
    pub requesters: Vec<DirectoryObject>,
    pub requesters_only: Vec<DirectoryObject>,
    pub notification_emails: Vec<String>,
}

/// One entry of `GetMyDomains`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DomainInformation {
    #[serde(rename = "CAID")]
    pub ca_id: Option<String>,
    #[serde(rename = "TemplateID")]
    pub template_id: Option<String>,
    #[serde(rename = "DomainID", deserialize_with = "null_as_default")]
    pub domain_id: String,
    pub domain: Option<String>,
    #[serde(rename = "CAFriendlyName")]
    pub ca_friendly_name: Option<String>,
    pub is_owner: bool,
    pub is_requester: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub owners: Vec<DirectoryObject>,
    #[serde(deserialize_with = "null_as_default")]
    pub requesters: Vec<DirectoryObject>,
    #[serde(deserialize_with = "null_as_default")]
    pub requesters_only: Vec<DirectoryObject>,
    #[serde(deserialize_with = "null_as_default")]
    pub notification_emails: Vec<String>,
}
