//! Generic HTTP execution
//!
//! Sends a fully signed `RequestBuilder`, logs it, maps transport failures to
//! [`ProviderError`] and hands back the raw status and body.
//!
//! # design principles
//! - **Non-2xx is not an error** - the vendor returns fault bodies with both success and error
//!   statuses, so the body is always returned for the caller to interpret
//! - **Only throttling (HTTP 429, or 403 without a fault body) and 502/503/504 are lifted into
//!   errors**, because they carry no usable body and are worth retrying

use reqwest::RequestBuilder;
use std::time::Duration;

use crate::error::ProviderError;
use crate::types::ApiResponse;
use crate::utils::log_sanitizer::truncate_for_log;

/// Cap for a server supplied `Retry-After`.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Cap for exponential backoff.
const MAX_BACKOFF_MS: u64 = 10_000;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status code and body
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `provider_name` - Provider name (for logging)
    /// * `method_name` - "GET", "POST", "DELETE" (for logging)
    /// * `path` - resource path (for logging)
    ///
    /// # Returns
    /// * `Ok(ApiResponse)` - any response with a readable body, whatever its status
    /// * `Err(ProviderError::RateLimited)` - HTTP 429, or HTTP 403 without a fault body
    /// * `Err(ProviderError::NetworkError)` - connect/TLS failure or HTTP 502..=504
    /// * `Err(ProviderError::Timeout)` - request timed out
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        path: &str,
    ) -> Result<ApiResponse, ProviderError> {
        log::debug!("[{provider_name}] {method_name} {path}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status}");

        // Read before the body consumes the response
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if status == 403 {
            let body = response.text().await.unwrap_or_default();
            if !is_fault_body(&body) {
                log::warn!(
                    "[{provider_name}] Throttled (HTTP 403: {}), retry_after={retry_after:?}",
                    truncate_for_log(&body)
                );
                return Err(ProviderError::RateLimited {
                    provider: provider_name.to_string(),
                    retry_after,
                    raw_message: Some(body),
                });
            }
            log::debug!("[{provider_name}] Response Body: {}", truncate_for_log(&body));
            return Ok(ApiResponse { status, body });
        }

        if matches!(status, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Server error (HTTP {status})");
            return Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[{provider_name}] Response Body: {}", truncate_for_log(&body));

        Ok(ApiResponse { status, body })
    }

    /// Performs an HTTP request with retries
    ///
    /// # Retry strategy
    /// - Only [`ProviderError::is_retryable`] errors are retried
    /// - `Retry-After` is honoured (capped at 30s), otherwise exponential backoff:
    ///   100ms, 200ms, 400ms, ... (maximum 10 seconds)
    ///
    /// The vendor signature embeds a timestamp, so `sign` is called again for each attempt
    /// rather than cloning a stale request.
    pub async fn execute_request_with_retry<F>(
        mut build: F,
        provider_name: &str,
        method_name: &str,
        path: &str,
        max_retries: u32,
    ) -> Result<ApiResponse, ProviderError>
    where
        F: FnMut() -> Result<RequestBuilder, ProviderError>,
    {
        let mut attempt = 0;
        loop {
            let request = build()?;
            match Self::execute_request(request, provider_name, method_name, path).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        provider_name,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// The vendor throttles with a plain-text 403 (`Exceeded request limits`); a real
/// authorization failure carries a JSON fault such as `unauthorizedFault`.
fn is_fault_body(body: &str) -> bool {
    body.trim_start().starts_with('{') && body.contains("Fault\"")
}

/// `Retry-After` when the server sent one, exponential backoff otherwise.
fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(attempt)
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // 2^attempt overflow
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}
