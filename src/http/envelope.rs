//! Result envelopes: `{Success, Message}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::SdkError;
use crate::http::EnvelopeShape;
use crate::shared::serde_util::null_as_default;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "Success", alias = "success")]
    pub success: bool,
    #[serde(
        rename = "Message",
        alias = "message",
        default,
        deserialize_with = "null_as_default"
    )]
    pub message: String,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// The message of a successful envelope; the message as a service error
    /// otherwise.
    pub fn into_payload(self) -> Result<String, SdkError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(SdkError::Service(self.message))
        }
    }

    pub fn parse(payload: &str) -> Result<Self, SdkError> {
        serde_json::from_str(payload).map_err(|_| SdkError::decode("result envelope", payload))
    }
}

/// Peel every envelope layer of `shape` and return the payload text.
pub fn unwrap_payload(envelope: Envelope, shape: EnvelopeShape) -> Result<String, SdkError> {
    let payload = envelope.into_payload()?;
    match shape {
        EnvelopeShape::Single => Ok(payload),
        EnvelopeShape::Nested => Envelope::parse(&payload)?.into_payload(),
    }
}

/// Decode a JSON payload, keeping the raw text in the error.
pub fn decode_json<T: DeserializeOwned>(payload: &str, expected: &'static str) -> Result<T, SdkError> {
    serde_json::from_str(payload).map_err(|_| SdkError::decode(expected, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_shape_returns_message() {
        let payload = unwrap_payload(Envelope::success("[]"), EnvelopeShape::Single).unwrap();
        assert_eq!(payload, "[]");
    }

    #[test]
    fn test_outer_failure_is_service_error() {
        let err = unwrap_payload(Envelope::failure("CA not found"), EnvelopeShape::Nested).unwrap_err();
        assert!(matches!(&err, SdkError::Service(m) if m == "CA not found"));
        assert_eq!(err.to_string(), "CA not found");
    }

    #[test]
    fn test_nested_shape_unwraps_inner() {
        let inner = r#"{"Success":true,"Message":"-----BEGIN CERTIFICATE-----"}"#;
        let payload = unwrap_payload(Envelope::success(inner), EnvelopeShape::Nested).unwrap();
        assert_eq!(payload, "-----BEGIN CERTIFICATE-----");
    }

    #[test]
    fn test_inner_failure_is_service_error() {
        let inner = r#"{"success":false,"message":"Domain already registered"}"#;
        let err = unwrap_payload(Envelope::success(inner), EnvelopeShape::Nested).unwrap_err();
        assert!(matches!(err, SdkError::Service(m) if m == "Domain already registered"));
    }

    #[test]
    fn test_inner_non_envelope_is_decode_error() {
        let err = unwrap_payload(Envelope::success("<html>oops</html>"), EnvelopeShape::Nested)
            .unwrap_err();
        match err {
            SdkError::Decode { payload, .. } => assert_eq!(payload, "<html>oops</html>"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_null_message_is_empty() {
        let env = Envelope::parse(r#"{"Success":true,"Message":null}"#).unwrap();
        assert_eq!(env.message, "");
    }
}
