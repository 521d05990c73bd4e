//! Domain registration: claiming a domain on a CA and listing owned domains.

pub mod client;
pub mod wire;

use crate::domain::authority::AvailableCa;

pub use wire::{DirectoryObject, DomainInformation};

/// A request to register `domain` on `ca`.
///
/// `owners` and `requesters` left as `None` are each filled with the caller's
/// identity.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRegistration {
    pub ca: AvailableCa,
    pub domain: String,
    pub owners: Option<Vec<DirectoryObject>>,
    pub requesters: Option<Vec<DirectoryObject>>,
    pub requesters_only: Vec<DirectoryObject>,
    pub notification_emails: Vec<String>,
}

impl DomainRegistration {
    pub fn new(ca: AvailableCa, domain: &str) -> Self {
        Self {
            ca,
            domain: domain.to_string(),
            owners: None,
            requesters: None,
            requesters_only: Vec::new(),
            notification_emails: Vec::new(),
        }
    }

    pub fn owners(mut self, owners: Vec<DirectoryObject>) -> Self {
        self.owners = Some(owners);
        self
    }

    pub fn requesters(mut self, requesters: Vec<DirectoryObject>) -> Self {
        self.requesters = Some(requesters);
        self
    }

    pub fn requesters_only(mut self, requesters_only: Vec<DirectoryObject>) -> Self {
        self.requesters_only = requesters_only;
        self
    }

    pub fn notification_emails(mut self, emails: Vec<String>) -> Self {
        self.notification_emails = emails;
        self
    }
}
