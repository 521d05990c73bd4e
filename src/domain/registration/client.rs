//! Domains sub-client.

use crate::auth::Credential;
use crate::client::EzcaClient;
use crate::domain::registration::wire::NewDomainRegistrationRequest;
use crate::domain::registration::{DirectoryObject, DomainInformation, DomainRegistration};
use crate::domain::require_text;
use crate::error::SdkError;
use crate::http::endpoint;
use crate::http::envelope::decode_json;

pub struct Domains<'a> {
    pub(crate) client: &'a EzcaClient,
}

impl<'a> Domains<'a> {
    /// Register a domain. Returns the portal's confirmation message.
    pub async fn register(&self, registration: DomainRegistration) -> Result<String, SdkError> {
        require_text("domain", &registration.domain)?;
        let (ca_id, template_id) = registration.ca.ids()?;
        let (ca_id, template_id) = (ca_id.to_string(), template_id.to_string());

        let token = self.client.bearer().await?;

        let (owners, requesters) = match (registration.owners, registration.requesters) {
            (Some(owners), Some(requesters)) => (owners, requesters),
            (owners, requesters) => {
                let caller = DirectoryObject::from(token.identity()?);
                (
                    owners.unwrap_or_else(|| vec![caller.clone()]),
                    requesters.unwrap_or_else(|| vec![caller]),
                )
            }
        };

        let request = NewDomainRegistrationRequest {
            ca_id,
            template_id,
            domain: registration.domain.trim().to_string(),
            owners,
            requesters,
            requesters_only: registration.requesters_only,
            notification_emails: registration.notification_emails,
        };
        let body = serde_json::to_value(&request)?;

        self.client
            .dispatch(
                &endpoint::REGISTER_NEW_DOMAIN,
                None,
                Some(&body),
                &Credential::Bearer(token),
            )
            .await
    }

    /// Domains the caller owns or may request certificates for.
    pub async fn mine(&self) -> Result<Vec<DomainInformation>, SdkError> {
        let token = self.client.bearer().await?;
        let payload = self
            .client
            .dispatch(&endpoint::MY_DOMAINS, None, None, &Credential::Bearer(token))
            .await?;
        decode_json(&payload, "domain list")
    }
}
