//! 域名查询服务

use std::sync::Arc;

use mail_orchestrator_provider::{MailProvider, truncate_for_log};
use serde::Serialize;

use crate::classifier::{ClassifiedResult, ResponseContext, classify};
use crate::registry::DomainRegistry;
use crate::scheduler::{BatchPlan, run_batches};
use crate::types::BatchFailure;

/// Result of the lookup phase.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub registry: DomainRegistry,
    /// Transport failures.
    pub failures: Vec<BatchFailure>,
    /// Responses that could not be classified.
    pub unclassified: Vec<BatchFailure>,
    /// Rate-limit pauses taken.
    pub pauses: usize,
}

/// Summary counts, for logging and serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanCounts {
    pub valid: usize,
    pub invalid: usize,
    pub without_mailbox: usize,
    pub errors: usize,
}

impl ScanOutcome {
    pub fn counts(&self) -> ScanCounts {
        ScanCounts {
            valid: self.registry.valid_domains().len(),
            invalid: self.registry.invalid_domains().len(),
            without_mailbox: self.registry.domains_without_mailbox().len(),
            errors: self.failures.len() + self.unclassified.len(),
        }
    }
}

/// GET every domain in the worklist and classify the answers.
pub struct ScanService {
    provider: Arc<dyn MailProvider>,
    plan: BatchPlan,
}

impl ScanService {
    /// 创建查询服务实例
    #[must_use]
    pub fn new(provider: Arc<dyn MailProvider>) -> Self {
        Self {
            provider,
            plan: BatchPlan::domain_lookup(),
        }
    }

    #[must_use]
    pub fn with_plan(mut self, plan: BatchPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Look up each domain once, in order, and build the registry.
    pub async fn scan(&self, domains: &[String]) -> ScanOutcome {
        log::info!(
            "Total domains to look up: {} (via {})",
            domains.len(),
            self.provider.id()
        );

        let provider = &self.provider;
        let report = run_batches(domains, &self.plan, |domain| async move {
            provider.get_domain(domain).await.map(|response| {
                log::debug!(
                    "{domain} -> {} {}",
                    response.status,
                    truncate_for_log(&response.body)
                );
                classify(&response.body, ResponseContext::DomainLookup)
            })
        })
        .await;

        let mut outcome = ScanOutcome {
            failures: report.failures,
            pauses: report.pauses,
            ..ScanOutcome::default()
        };

        for completed in report.completed {
            if let ClassifiedResult::ParseFailure(detail) = &completed.output {
                outcome.unclassified.push(BatchFailure {
                    item: completed.item.clone(),
                    reason: detail.clone(),
                });
            }
            outcome
                .registry
                .classify_and_accumulate(&completed.output, &completed.item);
        }

        let counts = outcome.counts();
        log::info!(
            "Total valid domains: {}, invalid: {}, without mailbox: {}, errors: {}",
            counts.valid,
            counts.invalid,
            counts.without_mailbox,
            counts.errors
        );
        outcome
    }
}
