//! Rackspace Email (`api.emailsrvr.com`) Provider

mod http;
mod provider;
mod sign;

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::ApiCredentials;

/// Production API base URL.
pub const RACKSPACE_API_BASE: &str = "https://api.emailsrvr.com/";
/// Fixed `User-Agent`; it is part of the signed data.
pub const DEFAULT_USER_AGENT: &str = concat!("mail-orchestrator/", env!("CARGO_PKG_VERSION"));

pub(crate) const PROVIDER_NAME: &str = "rackspace";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::InvalidRequest {
            provider: PROVIDER_NAME.to_string(),
            detail: format!("failed to create HTTP client: {e}"),
        })
}

/// Rackspace Email Provider
#[derive(Debug)]
pub struct RackspaceProvider {
    pub(crate) client: Client,
    pub(crate) credentials: ApiCredentials,
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
    pub(crate) max_retries: u32,
}

/// Rackspace Provider Builder
pub struct RackspaceProviderBuilder {
    credentials: ApiCredentials,
    base_url: String,
    user_agent: String,
    max_retries: u32,
}

impl RackspaceProviderBuilder {
    fn new(credentials: ApiCredentials) -> Self {
        Self {
            credentials,
            base_url: RACKSPACE_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_retries: 2,
        }
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Validates the base URL and creates the HTTP client.
    pub fn build(self) -> Result<RackspaceProvider> {
        let mut base_url = self.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        reqwest::Url::parse(&base_url).map_err(|e| ProviderError::InvalidRequest {
            provider: PROVIDER_NAME.to_string(),
            detail: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(RackspaceProvider {
            client: create_http_client()?,
            credentials: self.credentials,
            base_url,
            user_agent: self.user_agent,
            max_retries: self.max_retries,
        })
    }
}

impl RackspaceProvider {
    pub fn new(credentials: ApiCredentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    pub fn builder(credentials: ApiCredentials) -> RackspaceProviderBuilder {
        RackspaceProviderBuilder::new(credentials)
    }

    /// Base URL requests are resolved against (always ends with `/`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> ApiCredentials {
        ApiCredentials {
            api_key: "key".to_string(),
            secret_key: "secret".to_string(),
        }
    }

    #[test]
    fn default_base_url() {
        let provider = RackspaceProvider::new(credentials()).unwrap();
        assert_eq!(provider.base_url(), RACKSPACE_API_BASE);
        assert_eq!(provider.max_retries, 2);
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let provider = RackspaceProvider::builder(credentials())
            .base_url("http://localhost:8080/api")
            .build()
            .unwrap();
        assert_eq!(provider.base_url(), "http://localhost:8080/api/");
    }

    #[test]
    fn invalid_base_url_rejected() {
        let result = RackspaceProvider::builder(credentials())
            .base_url("not a url")
            .build();
        assert!(matches!(result, Err(ProviderError::InvalidRequest { .. })));
    }
}
