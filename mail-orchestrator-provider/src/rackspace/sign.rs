//! `X-Api-Signature` 签名
//!
//! `base64(sha1(api_key + user_agent + timestamp + secret_key))`, timestamp in UTC as
//! `yyyyMMddHHmmss`. The header value is `api_key:timestamp:signature`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};

use super::RackspaceProvider;

/// Timestamp layout the API expects.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Compute the full `X-Api-Signature` header value.
pub(crate) fn compute_signature(
    api_key: &str,
    secret_key: &str,
    user_agent: &str,
    timestamp: DateTime<Utc>,
) -> String {
    let timestamp = timestamp.format(TIMESTAMP_FORMAT).to_string();

    let mut hasher = Sha1::new();
    hasher.update(api_key.as_bytes());
    hasher.update(user_agent.as_bytes());
    hasher.update(timestamp.as_bytes());
    hasher.update(secret_key.as_bytes());
    let signature = STANDARD.encode(hasher.finalize());

    format!("{api_key}:{timestamp}:{signature}")
}

impl RackspaceProvider {
    /// Signature header for a request sent at `timestamp`.
    pub(crate) fn sign(&self, timestamp: DateTime<Utc>) -> String {
        compute_signature(
            &self.credentials.api_key,
            &self.credentials.secret_key,
            &self.user_agent,
            timestamp,
        )
    }
}
