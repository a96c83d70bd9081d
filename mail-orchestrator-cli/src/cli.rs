//! Command-line options

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser};
use mail_orchestrator_core::audit::{DEFAULT_NOT_FOUND_CSV, DEFAULT_WITHOUT_MAILBOX_CSV};
use mail_orchestrator_core::validation::{is_valid_domain, is_valid_mailbox};
use mail_orchestrator_core::{AuditPaths, CoreError, CoreResult, RunSettings};
use mail_orchestrator_provider::{ApiCredentials, RACKSPACE_API_BASE};

/// Audit and clean up Rackspace Email domains and mailboxes.
///
/// Reads `local@domain` mailboxes from the first column of a CSV file, looks each domain up,
/// records invalid and mailbox-less domains in audit CSVs, then offers to delete the
/// mailboxes and the emptied domains.
#[derive(Debug, Parser)]
#[command(name = "mail-orchestrator", version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").args(["file", "domain", "mail"]).multiple(false)))]
pub struct Cli {
    /// Path to the CSV file containing mailboxes
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Single domain to process
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Single mailbox to process
    #[arg(short, long)]
    pub mail: Option<String>,

    /// Rackspace API user key
    #[arg(long, env = "RACKSPACE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Rackspace API secret key
    #[arg(long, env = "RACKSPACE_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// API base URL
    #[arg(long, env = "RACKSPACE_BASE_URL", default_value = RACKSPACE_API_BASE)]
    pub base_url: String,

    /// Retries for rate-limited or failed requests
    #[arg(long, default_value_t = 2)]
    pub max_retries: u32,

    /// Pause between batches, in seconds
    #[arg(long, default_value_t = 60)]
    pub pause_secs: u64,

    /// Audit file for domains without mailboxes
    #[arg(long, value_name = "PATH", default_value = DEFAULT_WITHOUT_MAILBOX_CSV)]
    pub no_email_csv: PathBuf,

    /// Audit file for domains that were not found or unauthorized
    #[arg(long, value_name = "PATH", default_value = DEFAULT_NOT_FOUND_CSV)]
    pub not_found_csv: PathBuf,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What to do with the parsed options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    File(PathBuf),
    Domain(String),
    Mail(String),
    /// Nothing usable was given.
    Usage,
}

/// Outcome of parsing the process arguments.
#[derive(Debug)]
pub enum Invocation {
    Run(Cli),
    /// Unusable options (e.g. two modes at once); shown with the usage text, exit 0.
    Usage(clap::Error),
    /// `--help` or `--version`.
    Info(clap::Error),
}

impl Invocation {
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Cli::try_parse_from(args) {
            Ok(cli) => Self::Run(cli),
            Err(e) if e.use_stderr() => Self::Usage(e),
            Err(e) => Self::Info(e),
        }
    }
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if let Some(path) = self.file.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            return Mode::File(path.clone());
        }
        if let Some(domain) = self.domain.as_deref().filter(|d| is_valid_domain(d)) {
            return Mode::Domain(domain.trim().to_string());
        }
        if let Some(mail) = self.mail.as_deref().filter(|m| is_valid_mailbox(m)) {
            return Mode::Mail(mail.trim().to_string());
        }
        Mode::Usage
    }

    /// API credentials; both keys are required and must be non-empty.
    pub fn credentials(&self) -> CoreResult<ApiCredentials> {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };

        let api_key = non_empty(&self.api_key).ok_or_else(|| {
            CoreError::Config("missing API key (--api-key or RACKSPACE_API_KEY)".to_string())
        })?;
        let secret_key = non_empty(&self.secret_key).ok_or_else(|| {
            CoreError::Config(
                "missing secret key (--secret-key or RACKSPACE_SECRET_KEY)".to_string(),
            )
        })?;

        Ok(ApiCredentials {
            api_key,
            secret_key,
        })
    }

    pub fn run_settings(&self) -> RunSettings {
        RunSettings::default()
            .with_pause(Duration::from_secs(self.pause_secs))
            .with_audit(AuditPaths {
                without_mailbox: self.no_email_csv.clone(),
                not_found: self.not_found_csv.clone(),
            })
    }
}
