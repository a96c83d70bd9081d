//! Mail Orchestrator Core Library
//!
//! Business logic for auditing and cleaning up hosted email domains:
//! - Response classification of vendor API bodies
//! - Rate-limited batch scheduling
//! - Per-run domain registry and mailbox sync
//! - Append-only audit CSVs
//! - Interactive confirm-then-delete workflow
//!
//! The vendor API is reached only through the
//! [`MailProvider`](mail_orchestrator_provider::MailProvider) trait, and the console only
//! through [`Prompter`], so every phase runs against mocks in tests.

pub mod audit;
pub mod classifier;
pub mod error;
pub mod registry;
pub mod row_source;
pub mod scheduler;
pub mod services;
pub mod types;
pub mod validation;
pub mod workflow;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use audit::{AuditLog, AuditPaths, AuditSummary};
pub use classifier::{ClassifiedResult, ResponseContext, classify};
pub use error::{CoreError, CoreResult};
pub use registry::DomainRegistry;
pub use row_source::{read_mailboxes, read_mailboxes_from};
pub use scheduler::{BatchPlan, BatchReport, run_batches};
pub use services::{
    DeletionReport, DeletionService, Orchestrator, RunSettings, RunSummary, ScanOutcome,
    ScanService,
};
pub use types::{BatchFailure, DomainState, Mailbox};
pub use workflow::{Choice, FlowOutcome, LinePrompter, Prompter, WorkflowOutcome};
