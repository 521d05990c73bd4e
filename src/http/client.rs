//! reqwest-backed [`Transport`].

use async_trait::async_trait;
use reqwest::Client;

use crate::error::TransportError;
use crate::http::{Envelope, HttpMethod, Transport, TransportRequest};

/// Prefix of failure messages for requests that never got an HTTP response.
pub const TRANSPORT_FAILURE_PREFIX: &str = "transport failure: ";

fn transport_failure(url: &str, stage: &'static str, error: &reqwest::Error) -> Envelope {
    tracing::warn!(url, stage, kind = "transport", error = %error, "request failed");
    Envelope::failure(format!("{}{}", TRANSPORT_FAILURE_PREFIX, error))
}

/// Sends requests with reqwest and folds every response into an [`Envelope`].
///
/// 2xx → `success = true` with the body text as message. Non-2xx →
/// `success = false` with the body text, or the status when the body is empty.
/// Connection and body-read failures → `success = false` with a message
/// starting with [`TRANSPORT_FAILURE_PREFIX`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self {
            client: Client::builder().build()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn call(&self, request: TransportRequest<'_>) -> Result<Envelope, TransportError> {
        let mut req = self
            .client
            .request(request.method.into(), request.url)
            .bearer_auth(request.token);
        if let Some(body) = request.body {
            req = req.json(body);
        }
        let req = req.build()?;

        let resp = match self.client.execute(req).await {
            Ok(resp) => resp,
            Err(e) => return Ok(transport_failure(request.url, "send", &e)),
        };

        let status = resp.status();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => return Ok(transport_failure(request.url, "read body", &e)),
        };

        if status.is_success() {
            return Ok(Envelope::success(body));
        }

        tracing::debug!(
            url = request.url,
            status = status.as_u16(),
            kind = "service",
            "non-success status"
        );
        if body.trim().is_empty() {
            Ok(Envelope::failure(status.to_string()))
        } else {
            Ok(Envelope::failure(body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_failure_is_marked_as_transport() {
        let transport = ReqwestTransport::new().unwrap();
        let envelope = transport
            .call(TransportRequest {
                method: HttpMethod::Get,
                url: "http://127.0.0.1:1/api/CA/GetMyDomains",
                body: None,
                token: "token",
            })
            .await
            .unwrap();
        assert!(!envelope.success);
        assert!(envelope.message.starts_with(TRANSPORT_FAILURE_PREFIX));
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(reqwest::Method::from(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(HttpMethod::Post), reqwest::Method::POST);
    }
}
