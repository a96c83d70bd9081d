//! Rate-limited batch scheduler
//!
//! Rackspace Email limits are per minute, not per second:
//!
//! | Operation                          | Limit          |
//! |------------------------------------|----------------|
//! | GET                                | 60 per minute  |
//! | PUT, POST, DELETE (mailboxes)      | 30 per minute  |
//! | POST, PUT, DELETE on a domain      | 2 per minute   |
//!
//! Items are therefore sent strictly one after another and a fixed pause separates batches.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::types::BatchFailure;

/// Pause between two batches.
pub const RATE_LIMIT_PAUSE: Duration = Duration::from_secs(60);

/// Batch size and pause for one kind of call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    /// Used in log lines, e.g. "domain lookup".
    pub operation: &'static str,
    /// Maximum number of requests per batch.
    pub batch_size: usize,
    /// Pause after every batch but the last.
    pub pause: Duration,
}

impl BatchPlan {
    /// GET on domains: quota 60/min, one request of headroom.
    pub const fn domain_lookup() -> Self {
        Self {
            operation: "domain lookup",
            batch_size: 59,
            pause: RATE_LIMIT_PAUSE,
        }
    }

    /// DELETE on mailboxes: quota 30/min.
    pub const fn mailbox_delete() -> Self {
        Self {
            operation: "mailbox deletion",
            batch_size: 29,
            pause: RATE_LIMIT_PAUSE,
        }
    }

    /// DELETE on domains.
    pub const fn domain_delete() -> Self {
        Self {
            operation: "domain deletion",
            batch_size: 3,
            pause: RATE_LIMIT_PAUSE,
        }
    }

    #[must_use]
    pub const fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// A zero batch size would never make progress.
    fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    /// Number of batches needed for `items` entries.
    pub fn batch_count(&self, items: usize) -> usize {
        items.div_ceil(self.effective_batch_size())
    }
}

/// One successfully processed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed<R> {
    /// Item as displayed.
    pub item: String,
    /// Output of the per-item action.
    pub output: R,
}

/// Result of a scheduler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport<R> {
    /// Successful items in worklist order.
    pub completed: Vec<Completed<R>>,
    /// Failed items in worklist order.
    pub failures: Vec<BatchFailure>,
    /// Batches started.
    pub batches: usize,
    /// Inter-batch pauses taken.
    pub pauses: usize,
}

impl<R> Default for BatchReport<R> {
    fn default() -> Self {
        Self {
            completed: Vec::new(),
            failures: Vec::new(),
            batches: 0,
            pauses: 0,
        }
    }
}

/// Run `action` once per item, batch by batch, pausing between batches.
///
/// A failing item is logged and recorded in [`BatchReport::failures`]; the remaining items
/// still run.
pub async fn run_batches<'a, T, R, E, F, Fut>(
    items: &'a [T],
    plan: &BatchPlan,
    mut action: F,
) -> BatchReport<R>
where
    T: Display,
    E: Display,
    F: FnMut(&'a T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let mut report = BatchReport::default();
    let total_batches = plan.batch_count(items.len());

    for (index, batch) in items.chunks(plan.effective_batch_size()).enumerate() {
        if index > 0 {
            log::warn!(
                "Pausing for {}s to satisfy the {} rate limit...",
                plan.pause.as_secs(),
                plan.operation
            );
            tokio::time::sleep(plan.pause).await;
            report.pauses += 1;
        }

        report.batches += 1;
        log::info!(
            "{}: batch {}/{} ({} items)",
            plan.operation,
            index + 1,
            total_batches,
            batch.len()
        );

        for item in batch {
            match action(item).await {
                Ok(output) => report.completed.push(Completed {
                    item: item.to_string(),
                    output,
                }),
                Err(e) => {
                    log::error!("{} failed for {item}: {e}", plan.operation);
                    report.failures.push(BatchFailure {
                        item: item.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    report
}
