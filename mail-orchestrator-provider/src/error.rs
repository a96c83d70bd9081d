use serde::{Deserialize, Serialize};

/// Error type for transport-level failures against the Rackspace Email API.
///
/// Vendor fault bodies (`itemNotFoundFault`, `unauthorizedFault`, ...) are *not* errors at this
/// layer. They come back as a normal [`ApiResponse`](crate::ApiResponse) and are interpreted by
/// the caller. Only conditions that prevent a usable response from being read end up here.
///
/// # Retryable Errors
///
/// - [`NetworkError`](Self::NetworkError) - connection failure or HTTP 502/503/504
/// - [`Timeout`](Self::Timeout) - request timed out
/// - [`RateLimited`](Self::RateLimited) - HTTP 429
///
/// The built-in HTTP client retries these with exponential backoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, TLS, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Response body, if any.
        raw_message: Option<String>,
    },

    /// The request could not be built (bad base URL, empty path segment, ...).
    InvalidRequest {
        /// Provider that produced the error.
        provider: String,
        /// What was wrong with the request.
        detail: String,
    },
}

impl ProviderError {
    /// Whether the error is transient and worth another attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// 是否为预期行为，用于日志分级。
    ///
    /// Returns `true` when the failure is caused by the caller's input rather than the
    /// environment; use `warn` for those and `error` for the rest.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::InvalidRequest { provider, detail } => {
                write!(f, "[{provider}] Invalid request: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
