//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use mail_orchestrator_provider::ProviderError;

/// Core layer error type
///
/// Only run-level failures live here. A vendor response that cannot be understood is not an
/// error but a [`ClassifiedResult::ParseFailure`](crate::ClassifiedResult::ParseFailure), and
/// the explicit abort at a prompt is a workflow outcome.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The input CSV does not exist
    #[error("The file \"{0}\" is not a valid file name or does not exist in the location specified")]
    InputNotFound(String),

    /// The input CSV could not be read or is not valid CSV
    #[error("The file \"{path}\" is not in a valid CSV format: {detail}")]
    MalformedInput { path: String, detail: String },

    /// A row does not hold a `local@domain` mailbox
    #[error("Invalid input at row {row}: {detail}")]
    InvalidRow { row: u64, detail: String },

    /// Audit CSV could not be written
    #[error("Audit file error ({path}): {detail}")]
    Audit { path: String, detail: String },

    /// Console prompt failed
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Missing or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (bad input, missing configuration), used for log levels.
    ///
    /// Level `warn` should be used when returning `true` and level `error` otherwise.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InputNotFound(_)
            | Self::MalformedInput { .. }
            | Self::InvalidRow { .. }
            | Self::Config(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Audit { .. } | Self::Prompt(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
