use serde::{Deserialize, Serialize};

/// HTTP verbs used against the vendor API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiVerb {
    Get,
    Post,
    Delete,
}

impl ApiVerb {
    /// Upper-case method name, as used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for ApiVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw response from the vendor API.
///
/// The status is informational only. Fault bodies arrive with 2xx and 4xx statuses alike,
/// so interpretation is always done on `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, possibly empty.
    pub body: String,
}

impl ApiResponse {
    /// Whether the HTTP status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// API key pair issued in the Rackspace control panel.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiCredentials {
    /// User key (sent in clear as the first part of `X-Api-Signature`).
    pub api_key: String,
    /// Secret key (only ever hashed).
    pub secret_key: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"***")
            .finish()
    }
}
