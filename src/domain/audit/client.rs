//! Audit sub-client.

use crate::auth::Credential;
use crate::client::EzcaClient;
use crate::domain::audit::{AuditRequest, CertificateAuditLog};
use crate::error::{PreconditionError, SdkError};
use crate::http::endpoint;
use crate::http::envelope::decode_json;

pub struct Audit<'a> {
    pub(crate) client: &'a EzcaClient,
}

impl<'a> Audit<'a> {
    /// Certificate events in the request's window.
    pub async fn certificate_logs(
        &self,
        request: &AuditRequest,
    ) -> Result<Vec<CertificateAuditLog>, SdkError> {
        if request.date_from > request.date_to {
            return Err(PreconditionError::InvalidArgument {
                name: "date_from",
                reason: "must not be after date_to".to_string(),
            }
            .into());
        }
        if request.max_number_of_records <= 0 {
            return Err(PreconditionError::InvalidArgument {
                name: "max_number_of_records",
                reason: "must be positive".to_string(),
            }
            .into());
        }

        let token = self.client.bearer().await?;
        let body = serde_json::to_value(request)?;
        let payload = self
            .client
            .dispatch(
                &endpoint::CERTIFICATE_LOGS,
                None,
                Some(&body),
                &Credential::Bearer(token),
            )
            .await?;
        decode_json(&payload, "certificate audit log")
    }
}
