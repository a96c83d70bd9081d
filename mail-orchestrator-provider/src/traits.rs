use async_trait::async_trait;

use crate::error::Result;
use crate::types::ApiResponse;

/// Hosted-email provider Trait
///
/// Every method returns the raw [`ApiResponse`]; fault bodies are not mapped to errors here.
/// Only transport failures surface as `Err`.
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Look up a domain (`GET customers/all/domains/{domain}`).
    async fn get_domain(&self, domain: &str) -> Result<ApiResponse>;

    /// Delete a domain (`DELETE customers/all/domains/{domain}`).
    async fn delete_domain(&self, domain: &str) -> Result<ApiResponse>;

    /// Delete a Rackspace Email mailbox
    /// (`DELETE customers/all/domains/{domain}/rs/mailboxes/{local_part}`).
    async fn delete_mailbox(&self, domain: &str, local_part: &str) -> Result<ApiResponse>;
}
