//! Rackspace HTTP 请求方法

use chrono::Utc;
use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::types::{ApiResponse, ApiVerb};
use crate::utils::log_sanitizer::mask_signature;

use super::{PROVIDER_NAME, RackspaceProvider};

const ACCEPT_JSON: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const SIGNATURE_HEADER: &str = "X-Api-Signature";

impl RackspaceProvider {
    /// Build a freshly signed request for `path` (relative to the base URL).
    ///
    /// A body is sent form-encoded; only POST carries one.
    pub(crate) fn build_request(
        &self,
        verb: ApiVerb,
        path: &str,
        body: Option<&str>,
    ) -> Result<RequestBuilder> {
        let url = format!("{}{path}", self.base_url);
        let signature = self.sign(Utc::now());
        log::debug!("{SIGNATURE_HEADER}: {}", mask_signature(&signature));

        let builder = match verb {
            ApiVerb::Get => self.client.get(&url),
            ApiVerb::Post => self.client.post(&url),
            ApiVerb::Delete => self.client.delete(&url),
        }
        .header(USER_AGENT, &self.user_agent)
        .header(ACCEPT, ACCEPT_JSON)
        .header(SIGNATURE_HEADER, signature);

        Ok(match body {
            Some(body) => {
                log::debug!("Request Body: {body}");
                builder
                    .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                    .body(body.to_string())
            }
            None => builder,
        })
    }

    /// Send a signed request, re-signing on every retry.
    pub async fn request(
        &self,
        verb: ApiVerb,
        path: &str,
        body: Option<&str>,
    ) -> Result<ApiResponse> {
        HttpUtils::execute_request_with_retry(
            || self.build_request(verb, path, body),
            PROVIDER_NAME,
            verb.as_str(),
            path,
            self.max_retries,
        )
        .await
    }
}
