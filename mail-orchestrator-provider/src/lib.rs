//! # mail-orchestrator-provider
//!
//! A signed client for the Rackspace Email REST API (`api.emailsrvr.com`), limited to the
//! calls needed to audit and clean up hosted domains: domain lookup, domain deletion and
//! mailbox deletion.
//!
//! ## Authentication
//!
//! Every request carries
//! `X-Api-Signature: {api_key}:{yyyyMMddHHmmss}:{base64(sha1(api_key + user_agent + timestamp + secret_key))}`
//! with the timestamp in UTC. The request is re-signed on each retry.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* - Use the platform's native TLS implementation.
//! - **`rustls`** - Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mail_orchestrator_provider::{ApiCredentials, MailProvider, RackspaceProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = RackspaceProvider::builder(ApiCredentials {
//!         api_key: "your-key".to_string(),
//!         secret_key: "your-secret".to_string(),
//!     })
//!     .max_retries(3)
//!     .build()?;
//!
//!     let response = provider.get_domain("example.com").await?;
//!     println!("{} {}", response.status, response.body);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Vendor fault bodies are returned as ordinary [`ApiResponse`] values. Only transport
//! failures are reported as [`ProviderError`]:
//!
//! - [`ProviderError::NetworkError`] - connectivity issue or HTTP 502/503/504 (retryable)
//! - [`ProviderError::Timeout`] - request timed out (retryable)
//! - [`ProviderError::RateLimited`] - HTTP 429 (retryable)
//! - [`ProviderError::InvalidRequest`] - the request could not be built

mod error;
mod http_client;
mod rackspace;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use traits::MailProvider;

pub use types::{ApiCredentials, ApiResponse, ApiVerb};

pub use rackspace::{
    DEFAULT_USER_AGENT, RACKSPACE_API_BASE, RackspaceProvider, RackspaceProviderBuilder,
};

pub use utils::log_sanitizer::truncate_for_log;
