//! Shared value types

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// A mailbox address read from the input, `local@domain`.
///
/// The domain part is lower-cased on parse; the local part is kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Mailbox {
    local_part: String,
    domain: String,
}

impl Mailbox {
    /// Split on the first `@`. Returns `None` if there is no `@` or either side is empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let (local, domain) = raw.trim().split_once('@')?;
        let local = local.trim();
        let domain = domain.trim();
        if local.is_empty() || domain.is_empty() {
            return None;
        }
        Some(Self {
            local_part: local.to_string(),
            domain: domain.to_lowercase(),
        })
    }

    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

/// Domain worklist for the lookup phase: each domain once, in first-seen order.
pub fn unique_domains(mailboxes: &[Mailbox]) -> Vec<String> {
    let mut seen = HashSet::new();
    mailboxes
        .iter()
        .filter(|m| seen.insert(m.domain()))
        .map(|m| m.domain().to_string())
        .collect()
}

/// Which registry set a domain was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DomainState {
    /// Active Rackspace Email service with used storage.
    Valid,
    /// Lookup returned an unauthorized or not-found fault.
    Invalid,
    /// Domain exists but its mailbox storage is empty.
    WithoutMailbox,
}

/// A single item that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    /// Item as displayed (domain or mailbox address).
    pub item: String,
    /// Human-readable reason.
    pub reason: String,
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item, self.reason)
    }
}
