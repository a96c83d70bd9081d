//! Mail Orchestrator command-line entry point
//!
//! Reads a mailbox list, classifies every domain through the Rackspace Email API, writes the
//! audit CSVs and then asks before deleting mailboxes and emptied domains.

mod cli;

use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::CommandFactory;
use cli::{Cli, Invocation, Mode};
use mail_orchestrator_core::{CoreError, LinePrompter, Orchestrator, read_mailboxes};
use mail_orchestrator_provider::RackspaceProvider;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Invocation::from_args(std::env::args_os()) {
        Invocation::Run(cli) => cli,
        Invocation::Info(e) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Invocation::Usage(e) => {
            let _ = e.print();
            let _ = print_usage();
            return ExitCode::SUCCESS;
        }
    };
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<CoreError>() {
                Some(core) if core.is_expected() => tracing::warn!("{e:#}"),
                _ => tracing::error!("{e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so prompts on stdout stay readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(filter)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    match cli.mode() {
        Mode::File(path) => run_file(cli, &path).await,
        Mode::Domain(domain) => {
            println!("{domain}");
            Ok(ExitCode::SUCCESS)
        }
        Mode::Mail(mail) => {
            println!("{mail}");
            Ok(ExitCode::SUCCESS)
        }
        Mode::Usage => {
            print_usage().context("failed to print help")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_usage() -> io::Result<()> {
    println!("No valid options were provided");
    Cli::command().print_help()
}

async fn run_file(cli: &Cli, path: &Path) -> anyhow::Result<ExitCode> {
    println!("{}", path.display());

    let mailboxes = read_mailboxes(path)?;
    for mailbox in &mailboxes {
        println!("{mailbox}");
    }

    let credentials = cli.credentials()?;
    let provider = RackspaceProvider::builder(credentials)
        .base_url(cli.base_url.as_str())
        .max_retries(cli.max_retries)
        .build()
        .map_err(CoreError::from)?;
    tracing::debug!("Using API endpoint {}", provider.base_url());

    let orchestrator = Orchestrator::new(Arc::new(provider), cli.run_settings());
    let mut prompter = LinePrompter::new(io::stdin().lock(), io::stdout());
    let today = chrono::Local::now().date_naive();

    let summary = orchestrator.run(mailboxes, &mut prompter, today).await?;

    if summary.aborted() {
        tracing::info!("Run aborted at the confirmation prompt");
    } else if !summary.failures.is_empty() {
        tracing::warn!(
            "Finished with {} failed items, see the log above",
            summary.failures.len()
        );
    }
    Ok(ExitCode::SUCCESS)
}
