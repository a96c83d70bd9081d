//! 业务逻辑服务层

mod deletion_service;
mod orchestrator;
mod scan_service;

pub use deletion_service::{DeletionReport, DeletionService};
pub use orchestrator::{Orchestrator, RunSettings, RunSummary};
pub use scan_service::{ScanCounts, ScanOutcome, ScanService};
