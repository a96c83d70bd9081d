//! 删除服务

use std::sync::Arc;

use mail_orchestrator_provider::MailProvider;
use serde::Serialize;

use crate::classifier::{ClassifiedResult, ResponseContext, classify};
use crate::scheduler::{BatchPlan, BatchReport, run_batches};
use crate::types::{BatchFailure, Mailbox};

/// Per-item result of one deletion flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    /// Deleted (empty response body).
    pub confirmed: Vec<String>,
    /// Already gone. Not an error.
    pub not_found: Vec<String>,
    /// The API answered with something other than success or not-found.
    pub rejected: Vec<BatchFailure>,
    /// Transport failures.
    pub failures: Vec<BatchFailure>,
    /// Rate-limit pauses taken.
    pub pauses: usize,
}

impl DeletionReport {
    fn from_batches(kind: &str, report: BatchReport<ClassifiedResult>) -> Self {
        let mut out = Self {
            failures: report.failures,
            pauses: report.pauses,
            ..Self::default()
        };

        for completed in report.completed {
            match completed.output {
                ClassifiedResult::DeletionConfirmed => {
                    log::info!("{kind} deleted: {}", completed.item);
                    out.confirmed.push(completed.item);
                }
                ClassifiedResult::DeletionNotFound => {
                    log::warn!("{kind} not found: {}", completed.item);
                    out.not_found.push(completed.item);
                }
                other => {
                    log::error!("{kind} {} was not deleted: {other}", completed.item);
                    out.rejected.push(BatchFailure {
                        item: completed.item,
                        reason: other.to_string(),
                    });
                }
            }
        }

        out
    }

    /// Items that were neither deleted nor already gone.
    pub fn error_count(&self) -> usize {
        self.rejected.len() + self.failures.len()
    }

    /// Rejections and transport failures together.
    pub fn errors(&self) -> impl Iterator<Item = &BatchFailure> {
        self.rejected.iter().chain(self.failures.iter())
    }
}

/// Batch DELETE of mailboxes and domains.
pub struct DeletionService {
    provider: Arc<dyn MailProvider>,
    mailbox_plan: BatchPlan,
    domain_plan: BatchPlan,
}

impl DeletionService {
    /// 创建删除服务实例
    #[must_use]
    pub fn new(provider: Arc<dyn MailProvider>) -> Self {
        Self {
            provider,
            mailbox_plan: BatchPlan::mailbox_delete(),
            domain_plan: BatchPlan::domain_delete(),
        }
    }

    #[must_use]
    pub fn with_mailbox_plan(mut self, plan: BatchPlan) -> Self {
        self.mailbox_plan = plan;
        self
    }

    #[must_use]
    pub fn with_domain_plan(mut self, plan: BatchPlan) -> Self {
        self.domain_plan = plan;
        self
    }

    /// Delete each mailbox, one request at a time.
    pub async fn delete_mailboxes(&self, mailboxes: &[Mailbox]) -> DeletionReport {
        log::info!(
            "Deleting {} mailboxes via {}",
            mailboxes.len(),
            self.provider.id()
        );
        let provider = &self.provider;
        let report = run_batches(mailboxes, &self.mailbox_plan, |mailbox| async move {
            provider
                .delete_mailbox(mailbox.domain(), mailbox.local_part())
                .await
                .map(|response| classify(&response.body, ResponseContext::Deletion))
        })
        .await;

        DeletionReport::from_batches("Mailbox", report)
    }

    /// Delete each domain, one request at a time.
    pub async fn delete_domains(&self, domains: &[String]) -> DeletionReport {
        log::info!(
            "Deleting {} domains via {}",
            domains.len(),
            self.provider.id()
        );
        let provider = &self.provider;
        let report = run_batches(domains, &self.domain_plan, |domain| async move {
            provider
                .delete_domain(domain)
                .await
                .map(|response| classify(&response.body, ResponseContext::Deletion))
        })
        .await;

        DeletionReport::from_batches("Domain", report)
    }
}
