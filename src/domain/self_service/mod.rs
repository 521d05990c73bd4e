//! Self-service profiles: registering on-behalf-of agents and issuing user
//! certificates through them.

pub mod client;
pub mod wire;

pub use wire::{
    AvailableSelfServiceProfiles, BehalfOfAgent, SelfServiceGuestDetails, SelfServiceGuestPolicy,
    SelfServiceProfile,
};

/// A certificate request an agent makes for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct OnBehalfOfRequest {
    pub profile: SelfServiceProfile,
    /// PEM PKCS#10. The portal replaces its subject with the profile's.
    pub csr: String,
    /// Directory object id of the user.
    pub user_guid: String,
    /// Defaults to the profile's subject name, then to the user id.
    pub certificate_name: Option<String>,
}

impl OnBehalfOfRequest {
    pub fn new(profile: SelfServiceProfile, csr: &str, user_guid: &str) -> Self {
        Self {
            profile,
            csr: csr.to_string(),
            user_guid: user_guid.to_string(),
            certificate_name: None,
        }
    }

    pub fn certificate_name(mut self, name: &str) -> Self {
        self.certificate_name = Some(name.to_string());
        self
    }
}
