//! Credential sources for bearer tokens.

use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::{AccessToken, TokenCredential};
use crate::error::AuthError;

/// Environment variable read by [`EnvironmentCredential`] by default.
pub const ACCESS_TOKEN_ENV: &str = "EZCA_ACCESS_TOKEN";

/// A fixed token. Useful for tests and for tokens obtained out of band.
#[derive(Clone)]
pub struct StaticTokenCredential {
    token: String,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(&self, _scopes: &[&str]) -> Result<AccessToken, AuthError> {
        Ok(AccessToken::new(self.token.clone()))
    }
}

/// Reads a token from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvironmentCredential {
    var: String,
}

impl EnvironmentCredential {
    pub fn new() -> Self {
        Self::with_var(ACCESS_TOKEN_ENV)
    }

    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvironmentCredential {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenCredential for EnvironmentCredential {
    async fn get_token(&self, _scopes: &[&str]) -> Result<AccessToken, AuthError> {
        match std::env::var(&self.var) {
            Ok(token) if !token.trim().is_empty() => Ok(AccessToken::new(token)),
            _ => Err(AuthError::CredentialUnavailable(format!(
                "{} is not set",
                self.var
            ))),
        }
    }
}

/// Tokens from the signed-in Azure CLI (`az account get-access-token`).
#[cfg(feature = "azure-cli")]
#[derive(Debug, Clone, Default)]
pub struct AzureCliCredential;

#[cfg(feature = "azure-cli")]
impl AzureCliCredential {
    pub fn new() -> Self {
        Self
    }

    fn program() -> &'static str {
        if cfg!(windows) {
            "az.cmd"
        } else {
            "az"
        }
    }
}

#[cfg(feature = "azure-cli")]
#[derive(serde::Deserialize)]
struct CliAccessToken {
    #[serde(rename = "accessToken")]
    access_token: String,
    /// Unix seconds. Older CLI versions only emit the local-time `expiresOn`.
    expires_on: Option<i64>,
}

#[cfg(feature = "azure-cli")]
#[async_trait]
impl TokenCredential for AzureCliCredential {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, AuthError> {
        let scope = match scopes {
            [scope] => *scope,
            _ => {
                return Err(AuthError::CredentialUnavailable(
                    "Azure CLI accepts exactly one scope".to_string(),
                ))
            }
        };

        let output = tokio::process::Command::new(Self::program())
            .args(["account", "get-access-token", "--output", "json", "--scope", scope])
            .output()
            .await
            .map_err(|e| AuthError::CredentialUnavailable(format!("Azure CLI not found: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AuthError::CredentialUnavailable(format!(
                "Azure CLI failed: {}",
                stderr.trim()
            )));
        }

        let parsed: CliAccessToken = serde_json::from_slice(&output.stdout).map_err(|e| {
            AuthError::AuthenticationFailed(format!("unexpected Azure CLI output: {}", e))
        })?;

        Ok(AccessToken {
            token: parsed.access_token,
            expires_on: parsed
                .expires_on
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)),
        })
    }
}

/// Tries each source in order. A source answering
/// [`AuthError::CredentialUnavailable`] passes to the next one; any other
/// error stops the chain.
#[derive(Clone)]
pub struct DefaultCredential {
    sources: Vec<Arc<dyn TokenCredential>>,
}

impl DefaultCredential {
    /// Environment variable first, then the Azure CLI when enabled.
    pub fn new() -> Self {
        let mut sources: Vec<Arc<dyn TokenCredential>> = vec![Arc::new(EnvironmentCredential::new())];
        #[cfg(feature = "azure-cli")]
        sources.push(Arc::new(AzureCliCredential::new()));
        Self { sources }
    }

    pub fn with_sources(sources: Vec<Arc<dyn TokenCredential>>) -> Self {
        Self { sources }
    }
}

impl Default for DefaultCredential {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenCredential for DefaultCredential {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken, AuthError> {
        let mut reasons = Vec::new();
        for source in &self.sources {
            match source.get_token(scopes).await {
                Ok(token) => return Ok(token),
                Err(AuthError::CredentialUnavailable(reason)) => {
                    tracing::debug!(reason = %reason, "credential source unavailable");
                    reasons.push(reason);
                }
                Err(e) => return Err(e),
            }
        }
        Err(AuthError::CredentialUnavailable(if reasons.is_empty() {
            "no credential sources configured".to_string()
        } else {
            reasons.join("; ")
        }))
    }
}
