//! Mailbox list input
//!
//! One mailbox (`local@domain`) per row, first column only. A leading header row (first
//! field without `@`) is tolerated; any later row without `@` is rejected.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::types::Mailbox;

/// Read mailboxes from a CSV file.
pub fn read_mailboxes(path: &Path) -> CoreResult<Vec<Mailbox>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            CoreError::InputNotFound(path.display().to_string())
        } else {
            CoreError::MalformedInput {
                path: path.display().to_string(),
                detail: e.to_string(),
            }
        }
    })?;

    let mailboxes = read_mailboxes_from(file, &path.display().to_string())?;
    log::info!(
        "Total mailboxes read from {}: {}",
        path.display(),
        mailboxes.len()
    );
    Ok(mailboxes)
}

/// Read mailboxes from any CSV source; `source` names it in errors.
pub fn read_mailboxes_from<R: Read>(reader: R, source: &str) -> CoreResult<Vec<Mailbox>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut mailboxes = Vec::new();
    let mut seen_data_row = false;

    for record in csv_reader.records() {
        let record = record.map_err(|e| CoreError::MalformedInput {
            path: source.to_string(),
            detail: e.to_string(),
        })?;
        let row = record.position().map_or(0, csv::Position::line);

        let Some(field) = record.get(0).filter(|f| !f.is_empty()) else {
            continue;
        };

        match Mailbox::parse(field) {
            Some(mailbox) => {
                log::debug!("Read mailbox {mailbox}");
                mailboxes.push(mailbox);
            }
            None if !seen_data_row && !field.contains('@') => {
                log::debug!("Treating row {row} ('{field}') as a header");
            }
            None => {
                return Err(CoreError::InvalidRow {
                    row,
                    detail: format!("'{field}' is not a local@domain mailbox"),
                });
            }
        }
        seen_data_row = true;
    }

    Ok(mailboxes)
}
