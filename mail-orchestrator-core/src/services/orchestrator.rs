//! One complete run: lookup, sync, audit, then the deletion workflow

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use mail_orchestrator_provider::MailProvider;

use crate::audit::{AuditPaths, AuditSummary, write_audit};
use crate::error::CoreResult;
use crate::registry::DomainRegistry;
use crate::scheduler::BatchPlan;
use crate::services::{DeletionService, ScanOutcome, ScanService};
use crate::types::{BatchFailure, Mailbox, unique_domains};
use crate::workflow::{DeletionWorkflow, FlowOutcome, Prompter, WorkflowOutcome};

/// Knobs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub lookup: BatchPlan,
    pub mailbox_delete: BatchPlan,
    pub domain_delete: BatchPlan,
    pub audit: AuditPaths,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            lookup: BatchPlan::domain_lookup(),
            mailbox_delete: BatchPlan::mailbox_delete(),
            domain_delete: BatchPlan::domain_delete(),
            audit: AuditPaths::default(),
        }
    }
}

impl RunSettings {
    /// Same pause for all three plans.
    #[must_use]
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.lookup = self.lookup.with_pause(pause);
        self.mailbox_delete = self.mailbox_delete.with_pause(pause);
        self.domain_delete = self.domain_delete.with_pause(pause);
        self
    }

    #[must_use]
    pub fn with_audit(mut self, audit: AuditPaths) -> Self {
        self.audit = audit;
        self
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub registry: DomainRegistry,
    /// Mailbox worklist after sync with the valid domains.
    pub mailboxes: Vec<Mailbox>,
    pub audit: AuditSummary,
    pub workflow: WorkflowOutcome,
    /// Per-item failures from every batch run, in the order they happened.
    pub failures: Vec<BatchFailure>,
}

impl RunSummary {
    pub fn aborted(&self) -> bool {
        self.workflow.aborted()
    }
}

/// Wires the scan, audit and deletion phases around one provider.
pub struct Orchestrator {
    scan: ScanService,
    deletion: DeletionService,
    audit: AuditPaths,
}

impl Orchestrator {
    #[must_use]
    pub fn new(provider: Arc<dyn MailProvider>, settings: RunSettings) -> Self {
        Self {
            scan: ScanService::new(provider.clone()).with_plan(settings.lookup),
            deletion: DeletionService::new(provider)
                .with_mailbox_plan(settings.mailbox_delete)
                .with_domain_plan(settings.domain_delete),
            audit: settings.audit,
        }
    }

    /// Run the whole pipeline over `mailboxes`.
    ///
    /// The audit files are written before the first prompt, so an abort still leaves them
    /// up to date.
    pub async fn run<P: Prompter + ?Sized>(
        &self,
        mut mailboxes: Vec<Mailbox>,
        prompter: &mut P,
        today: NaiveDate,
    ) -> CoreResult<RunSummary> {
        let domains = unique_domains(&mailboxes);
        let ScanOutcome {
            registry,
            failures: scan_failures,
            unclassified,
            ..
        } = self.scan.scan(&domains).await;

        registry.sync_mailboxes(&mut mailboxes);

        let audit = write_audit(&registry, &self.audit, today)?;

        let workflow = DeletionWorkflow::new(&self.deletion)
            .run(&mailboxes, registry.domains_without_mailbox(), prompter)
            .await?;

        let mut failures = scan_failures;
        failures.extend(unclassified);
        for flow in [&workflow.mailboxes, &workflow.domains] {
            if let Some(FlowOutcome::Completed(report)) = flow {
                failures.extend(report.errors().cloned());
            }
        }

        let summary = RunSummary {
            registry,
            mailboxes,
            audit,
            workflow,
            failures,
        };
        self.log_summary(&summary);
        Ok(summary)
    }

    fn log_summary(&self, summary: &RunSummary) {
        log::info!(
            "Run finished: {} valid, {} invalid, {} without mailbox, {} mailboxes processed",
            summary.registry.valid_domains().len(),
            summary.registry.invalid_domains().len(),
            summary.registry.domains_without_mailbox().len(),
            summary.mailboxes.len()
        );
        for path in [&self.audit.without_mailbox, &self.audit.not_found] {
            let path = fs::canonicalize(path).unwrap_or_else(|_| path.clone());
            log::info!("Audit file: {}", path.display());
        }

        if summary.failures.is_empty() {
            return;
        }
        log::warn!("{} items failed:", summary.failures.len());
        for failure in &summary.failures {
            log::warn!("  {failure}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_utils::{
        MockMailProvider, ScriptedPrompter, active_body, empty_storage_body, mailboxes,
        unauthorized_body,
    };
    use crate::types::DomainState;

    fn settings(dir: &std::path::Path) -> RunSettings {
        RunSettings::default().with_audit(AuditPaths {
            without_mailbox: dir.join("Csv_files/Domains_without_email.csv"),
            not_found: dir.join("Csv_files/Domains_not_found.csv"),
        })
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn three_domain_provider() -> Arc<MockMailProvider> {
        Arc::new(
            MockMailProvider::new()
                .with_lookup("x.com", active_body("x.com", 12))
                .with_lookup("y.com", empty_storage_body("y.com"))
                .with_lookup("z.com", unauthorized_body()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn classifies_syncs_and_audits() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = three_domain_provider();
        let orchestrator = Orchestrator::new(provider.clone(), settings(tmp.path()));
        let mut prompter = ScriptedPrompter::new(["n"]);

        let summary = orchestrator
            .run(
                mailboxes(&["a@x.com", "b@y.com", "c@z.com"]),
                &mut prompter,
                today(),
            )
            .await
            .unwrap();

        assert_eq!(
            summary.registry.valid_domains().iter().collect::<Vec<_>>(),
            vec!["x.com"]
        );
        assert_eq!(summary.registry.domains_without_mailbox(), ["y.com"]);
        assert_eq!(summary.registry.invalid_domains(), ["z.com"]);
        assert_eq!(summary.mailboxes, mailboxes(&["a@x.com"]));
        assert_eq!(summary.workflow.mailboxes, Some(FlowOutcome::Cancelled));
        assert_eq!(provider.delete_count(), 0);

        let no_email =
            fs::read_to_string(tmp.path().join("Csv_files/Domains_without_email.csv")).unwrap();
        assert_eq!(no_email, "Domain,Value1,Value2\ny.com,01/15/2024,x\n");
        let not_found =
            fs::read_to_string(tmp.path().join("Csv_files/Domains_not_found.csv")).unwrap();
        assert_eq!(not_found, "Domain,Value1,Value2\nz.com,01/15/2024,x\n");
    }

    #[tokio::test(start_paused = true)]
    async fn confirming_both_flows_deletes_mailboxes_then_domains() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = three_domain_provider();
        let orchestrator = Orchestrator::new(provider.clone(), settings(tmp.path()));
        let mut prompter = ScriptedPrompter::new(["y", "y"]);

        let summary = orchestrator
            .run(
                mailboxes(&["a@x.com", "d@x.com", "b@y.com", "c@z.com"]),
                &mut prompter,
                today(),
            )
            .await
            .unwrap();

        assert!(!summary.aborted());
        assert_eq!(provider.mailbox_deletes(), ["a@x.com", "d@x.com"]);
        assert_eq!(provider.domain_deletes(), ["y.com"]);
        assert!(summary.failures.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn abort_still_leaves_audit_files() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = three_domain_provider();
        let orchestrator = Orchestrator::new(provider.clone(), settings(tmp.path()));
        let mut prompter = ScriptedPrompter::new(["a"]);

        let summary = orchestrator
            .run(mailboxes(&["a@x.com", "b@y.com"]), &mut prompter, today())
            .await
            .unwrap();

        assert!(summary.aborted());
        assert_eq!(provider.delete_count(), 0);
        assert_eq!(summary.audit.without_mailbox_written, 1);
        assert!(
            tmp.path()
                .join("Csv_files/Domains_without_email.csv")
                .exists()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn each_domain_is_looked_up_once() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = three_domain_provider();
        let orchestrator = Orchestrator::new(provider.clone(), settings(tmp.path()));
        let mut prompter = ScriptedPrompter::new(["n"]);

        let summary = orchestrator
            .run(
                mailboxes(&["a@x.com", "b@X.com", "c@x.com"]),
                &mut prompter,
                today(),
            )
            .await
            .unwrap();

        assert_eq!(provider.lookups(), ["x.com"]);
        assert_eq!(summary.mailboxes.len(), 3);
        assert_eq!(summary.registry.state_of("x.com"), Some(DomainState::Valid));
    }

    #[tokio::test(start_paused = true)]
    async fn failures_from_every_phase_are_aggregated() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = Arc::new(
            MockMailProvider::new()
                .with_lookup("x.com", active_body("x.com", 1))
                .with_lookup_failure("v.com", "connection refused")
                .with_delete_failure("b@x.com", "connection reset"),
        );
        let orchestrator = Orchestrator::new(provider.clone(), settings(tmp.path()));
        let mut prompter = ScriptedPrompter::new(["y"]);

        let summary = orchestrator
            .run(
                mailboxes(&["a@x.com", "b@x.com", "c@x.com", "e@v.com"]),
                &mut prompter,
                today(),
            )
            .await
            .unwrap();

        assert_eq!(provider.mailbox_deletes(), ["a@x.com", "b@x.com", "c@x.com"]);
        let failed: Vec<&str> = summary.failures.iter().map(|f| f.item.as_str()).collect();
        assert_eq!(failed, ["v.com", "b@x.com"]);
    }
}
