//! Self-service sub-client.

use crate::auth::{build_assertion, Credential};
use crate::client::EzcaClient;
use crate::domain::require_text;
use crate::domain::self_service::wire::OnBehalfOfCertificateRequest;
use crate::domain::self_service::{OnBehalfOfRequest, SelfServiceProfile};
use crate::error::{PreconditionError, SdkError};
use crate::http::endpoint;
use crate::pki::CertificateWithKey;

pub struct SelfService<'a> {
    pub(crate) client: &'a EzcaClient,
}

fn require_profile(profile: &SelfServiceProfile) -> Result<(), PreconditionError> {
    require_text("profile.ca_id", &profile.ca_id)?;
    require_text("profile.template_id", &profile.template_id)?;
    require_text("profile.profile_id", &profile.profile_id)
}

impl<'a> SelfService<'a> {
    /// Register the agents listed in `profile.behalf_of_agents`.
    /// Requires a PKI administrator. Returns the portal's message.
    pub async fn register_agent(&self, profile: &SelfServiceProfile) -> Result<String, SdkError> {
        require_profile(profile)?;
        let agents = profile
            .agents()
            .map_err(|e| PreconditionError::InvalidArgument {
                name: "profile.behalf_of_agents",
                reason: e.to_string(),
            })?;
        if agents.is_empty() {
            return Err(PreconditionError::MissingArgument("profile.behalf_of_agents").into());
        }

        let token = self.client.bearer().await?;
        let body = serde_json::to_value(profile)?;
        self.client
            .dispatch(
                &endpoint::REGISTER_BEHALF_OF_AGENT,
                None,
                Some(&body),
                &Credential::Bearer(token),
            )
            .await
    }

    /// Issue a user certificate, authenticating as `agent`. Returns the PEM.
    pub async fn request_on_behalf_of(
        &self,
        agent: &CertificateWithKey,
        request: &OnBehalfOfRequest,
    ) -> Result<String, SdkError> {
        require_profile(&request.profile)?;
        require_text("csr", &request.csr)?;
        require_text("user_guid", &request.user_guid)?;

        let assertion = build_assertion(&agent.certificate, &agent.private_key)?;

        let certificate_name = request
            .certificate_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| Some(request.profile.subject_name.clone()).filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| request.user_guid.clone());

        let body = serde_json::to_value(OnBehalfOfCertificateRequest {
            csr: request.csr.clone(),
            certificate_name,
            user_guid: request.user_guid.clone(),
            ca_id: request.profile.ca_id.clone(),
            template_id: request.profile.template_id.clone(),
            profile_id: request.profile.profile_id.clone(),
            policy_name: request.profile.policy_name.clone(),
            agent_certificate_pem: agent.certificate.to_pem(),
        })?;

        self.client
            .dispatch(
                &endpoint::ON_BEHALF_OF,
                None,
                Some(&body),
                &Credential::Assertion(assertion),
            )
            .await
    }
}
