//! Authorities sub-client.

use crate::auth::Credential;
use crate::client::EzcaClient;
use crate::domain::authority::AvailableCa;
use crate::error::SdkError;
use crate::http::endpoint;
use crate::http::envelope::decode_json;

pub struct Authorities<'a> {
    pub(crate) client: &'a EzcaClient,
}

impl<'a> Authorities<'a> {
    /// CAs the caller may request SSL certificates from.
    pub async fn available(&self) -> Result<Vec<AvailableCa>, SdkError> {
        let token = self.client.bearer().await?;
        let payload = self
            .client
            .dispatch(&endpoint::AVAILABLE_SSL_CAS, None, None, &Credential::Bearer(token))
            .await?;
        decode_json(&payload, "available CA list")
    }
}
