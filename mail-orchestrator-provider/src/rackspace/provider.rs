//! Rackspace `MailProvider` implementation

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::MailProvider;
use crate::types::{ApiResponse, ApiVerb};

use super::{PROVIDER_NAME, RackspaceProvider};

/// Percent-encode one path segment, rejecting empty ones so a blank domain can never
/// turn into a request against the collection itself.
fn segment<'a>(value: &'a str, what: &str) -> Result<std::borrow::Cow<'a, str>> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ProviderError::InvalidRequest {
            provider: PROVIDER_NAME.to_string(),
            detail: format!("empty {what}"),
        });
    }
    Ok(urlencoding::encode(value))
}

pub(crate) fn domain_path(domain: &str) -> Result<String> {
    Ok(format!("customers/all/domains/{}", segment(domain, "domain")?))
}

pub(crate) fn mailbox_path(domain: &str, local_part: &str) -> Result<String> {
    Ok(format!(
        "{}/rs/mailboxes/{}",
        domain_path(domain)?,
        segment(local_part, "mailbox name")?
    ))
}

#[async_trait]
impl MailProvider for RackspaceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn get_domain(&self, domain: &str) -> Result<ApiResponse> {
        let path = domain_path(domain)?;
        self.request(ApiVerb::Get, &path, None).await
    }

    async fn delete_domain(&self, domain: &str) -> Result<ApiResponse> {
        let path = domain_path(domain)?;
        self.request(ApiVerb::Delete, &path, None).await
    }

    async fn delete_mailbox(&self, domain: &str, local_part: &str) -> Result<ApiResponse> {
        let path = mailbox_path(domain, local_part)?;
        self.request(ApiVerb::Delete, &path, None).await
    }
}
