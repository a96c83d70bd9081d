//! Audit CSVs of domains skipped from deletion
//!
//! Two append-only files, one row per domain: `{domain},{MM/dd/yyyy},x`. A domain already
//! present in the file (a line starting with `{domain},`) is not written again, so reruns
//! over the same input leave the files unchanged.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::registry::DomainRegistry;

/// Header written when a file is created.
pub const AUDIT_HEADER: [&str; 3] = ["Domain", "Value1", "Value2"];
/// Flag column value.
const AUDIT_FLAG: &str = "x";
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Default location of the mailbox-less domain list.
pub const DEFAULT_WITHOUT_MAILBOX_CSV: &str = "Csv_files/Domains_without_email.csv";
/// Default location of the invalid domain list.
pub const DEFAULT_NOT_FOUND_CSV: &str = "Csv_files/Domains_not_found.csv";

/// Where the two audit files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditPaths {
    /// Domains without mailbox storage.
    pub without_mailbox: PathBuf,
    /// Domains that were unauthorized or not found.
    pub not_found: PathBuf,
}

impl Default for AuditPaths {
    fn default() -> Self {
        Self {
            without_mailbox: PathBuf::from(DEFAULT_WITHOUT_MAILBOX_CSV),
            not_found: PathBuf::from(DEFAULT_NOT_FOUND_CSV),
        }
    }
}

/// Rows written by one audit step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub without_mailbox_written: usize,
    pub not_found_written: usize,
}

/// One append-only audit file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, detail: impl ToString) -> CoreError {
        CoreError::Audit {
            path: self.path.display().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Append every domain not yet in the file, dated `date`. Returns the rows written.
    ///
    /// Creates parent directories and the header row as needed.
    pub fn append(&self, domains: &[String], date: NaiveDate) -> CoreResult<usize> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }

        let existing = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(self.error(e)),
        };
        let needs_header = existing.trim().is_empty();

        let mut seen = HashSet::new();
        let pending: Vec<&str> = domains
            .iter()
            .map(String::as_str)
            .filter(|domain| seen.insert(*domain))
            .filter(|domain| {
                let prefix = format!("{domain},");
                !existing.lines().any(|line| line.starts_with(&prefix))
            })
            .collect();

        if pending.is_empty() && !needs_header {
            return Ok(0);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.error(e))?;
        // 上次手工编辑可能缺少换行
        if !existing.is_empty() && !existing.ends_with('\n') {
            file.write_all(b"\n").map_err(|e| self.error(e))?;
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer
                .write_record(AUDIT_HEADER)
                .map_err(|e| self.error(e))?;
        }

        let date = date.format(DATE_FORMAT).to_string();
        for domain in &pending {
            writer
                .write_record([*domain, date.as_str(), AUDIT_FLAG])
                .map_err(|e| self.error(e))?;
        }
        writer.flush().map_err(|e| self.error(e))?;

        Ok(pending.len())
    }
}

/// Terminal audit step: record invalid and mailbox-less domains.
pub fn write_audit(
    registry: &DomainRegistry,
    paths: &AuditPaths,
    date: NaiveDate,
) -> CoreResult<AuditSummary> {
    let without_mailbox_written =
        AuditLog::new(&paths.without_mailbox).append(registry.domains_without_mailbox(), date)?;
    let not_found_written =
        AuditLog::new(&paths.not_found).append(registry.invalid_domains(), date)?;

    for domain in registry.domains_without_mailbox() {
        log::info!("No mailbox: {domain}");
    }
    for domain in registry.invalid_domains() {
        log::info!("Invalid: {domain}");
    }

    let location = fs::canonicalize(&paths.without_mailbox)
        .unwrap_or_else(|_| paths.without_mailbox.clone());
    log::info!(
        "A CSV file has been created or updated at {} ({} new rows)",
        location.display(),
        without_mailbox_written
    );
    log::info!(
        "Invalid domains recorded in {} ({} new rows)",
        paths.not_found.display(),
        not_found_written
    );

    Ok(AuditSummary {
        without_mailbox_written,
        not_found_written,
    })
}
