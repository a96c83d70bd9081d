//! Domain/mailbox state accumulated during one run

use std::collections::BTreeSet;

use crate::classifier::ClassifiedResult;
use crate::types::{DomainState, Mailbox};

/// Per-run domain classification.
///
/// Each looked-up domain lands in at most one of the three collections, decided by its
/// lookup response. Owned by a single orchestration run and passed explicitly to each phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRegistry {
    valid: BTreeSet<String>,
    invalid: Vec<String>,
    without_mailbox: Vec<String>,
}

impl DomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one lookup result for `domain` into a collection.
    ///
    /// Returns the state the domain was given, or `None` when the result is not a lookup
    /// outcome (parse failures, deletion results) or the domain was already classified.
    pub fn classify_and_accumulate(
        &mut self,
        result: &ClassifiedResult,
        domain: &str,
    ) -> Option<DomainState> {
        if let Some(existing) = self.state_of(domain) {
            log::warn!("{domain} already classified as {existing:?}, ignoring repeated result");
            return None;
        }

        match result {
            ClassifiedResult::Unauthorized | ClassifiedResult::NotFound => {
                log::info!("Invalid domain ({result}): {domain}");
                self.invalid.push(domain.to_string());
                Some(DomainState::Invalid)
            }
            ClassifiedResult::EmptyMailboxStorage => {
                log::info!("Domain has no email: {domain}");
                self.without_mailbox.push(domain.to_string());
                Some(DomainState::WithoutMailbox)
            }
            ClassifiedResult::ActiveDomain(name) => {
                if name != domain {
                    log::debug!("{domain} reported by the API as {name}");
                }
                self.valid.insert(name.clone());
                Some(DomainState::Valid)
            }
            ClassifiedResult::ParseFailure(detail) => {
                log::warn!("Skipping {domain}: {detail}");
                None
            }
            ClassifiedResult::DeletionConfirmed | ClassifiedResult::DeletionNotFound => {
                log::warn!("Ignoring deletion result for {domain} during lookup");
                None
            }
        }
    }

    /// Which collection `domain` is in, if any.
    pub fn state_of(&self, domain: &str) -> Option<DomainState> {
        if self.valid.contains(domain) {
            Some(DomainState::Valid)
        } else if self.invalid.iter().any(|d| d == domain) {
            Some(DomainState::Invalid)
        } else if self.without_mailbox.iter().any(|d| d == domain) {
            Some(DomainState::WithoutMailbox)
        } else {
            None
        }
    }

    pub fn valid_domains(&self) -> &BTreeSet<String> {
        &self.valid
    }

    pub fn invalid_domains(&self) -> &[String] {
        &self.invalid
    }

    pub fn domains_without_mailbox(&self) -> &[String] {
        &self.without_mailbox
    }

    /// Keep only mailboxes whose domain is valid. Returns how many remain.
    pub fn sync_mailboxes(&self, mailboxes: &mut Vec<Mailbox>) -> usize {
        let before = mailboxes.len();
        mailboxes.retain(|m| self.valid.contains(m.domain()));

        for mailbox in mailboxes.iter() {
            log::debug!("Mailbox to process: {mailbox}");
        }
        log::info!(
            "There are {} mailboxes to process ({} discarded).",
            mailboxes.len(),
            before - mailboxes.len()
        );
        mailboxes.len()
    }
}
