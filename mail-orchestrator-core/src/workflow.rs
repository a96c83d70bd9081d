//! Interactive confirm-then-delete workflow
//!
//! Two flows, each gated by a y/n/a prompt:
//!
//! 1. mailboxes whose domain is valid
//! 2. domains that no longer have mailbox storage
//!
//! The domain flow is only offered when the mailbox worklist was empty or the mailbox flow
//! ran to completion. Abort at either prompt ends the run before any further DELETE.

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::services::{DeletionReport, DeletionService};
use crate::types::Mailbox;

pub const MAILBOX_QUESTION: &str =
    "Do you want to delete the mailboxes associated with the listed domains? (y/n/a)";
pub const DOMAIN_QUESTION: &str =
    "Do you want to delete the domains that no longer have mailboxes? (y/n/a)";
const CHOICE_PROMPT: &str = "Enter your choice (y = yes, n = no, a = abort): ";
const INVALID_CHOICE: &str = "Invalid input. Please enter 'y', 'n', or 'a'.";

/// Answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Choice {
    Yes,
    No,
    Abort,
}

impl Choice {
    /// `y`/`yes`, `n`/`no`, `a`/`abort`; trimmed, case-insensitive.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Self::Yes),
            "n" | "no" => Some(Self::No),
            "a" | "abort" => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Console seam for the confirmation prompts.
pub trait Prompter {
    /// Show `prompt` and read one answer. `Ok(None)` means the input is exhausted.
    fn ask(&mut self, prompt: &str) -> CoreResult<Option<String>>;

    /// Show a line of text.
    fn notify(&mut self, message: &str);
}

/// Line-oriented prompter over any reader/writer pair (stdin/stdout in the binary).
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> CoreResult<Option<String>> {
        write!(self.output, "{prompt}").map_err(|e| CoreError::Prompt(e.to_string()))?;
        self.output
            .flush()
            .map_err(|e| CoreError::Prompt(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| CoreError::Prompt(e.to_string()))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn notify(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{message}") {
            log::warn!("Failed to write to console: {e}");
        }
    }
}

/// Ask `question` until a valid choice is given. End of input counts as abort.
pub fn confirm<P: Prompter + ?Sized>(prompter: &mut P, question: &str) -> CoreResult<Choice> {
    prompter.notify(question);
    loop {
        let Some(answer) = prompter.ask(CHOICE_PROMPT)? else {
            log::warn!("Input closed at the confirmation prompt, treating as abort");
            return Ok(Choice::Abort);
        };
        match Choice::parse(&answer) {
            Some(choice) => return Ok(choice),
            None => prompter.notify(INVALID_CHOICE),
        }
    }
}

/// What happened to one flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "report")]
pub enum FlowOutcome {
    /// Confirmed and run.
    Completed(DeletionReport),
    /// Declined; nothing was deleted.
    Cancelled,
    /// Aborted; nothing was deleted and the run stops.
    Aborted,
}

/// Outcome of both flows. `None` means the flow was not offered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowOutcome {
    pub mailboxes: Option<FlowOutcome>,
    pub domains: Option<FlowOutcome>,
}

impl WorkflowOutcome {
    pub fn aborted(&self) -> bool {
        matches!(self.mailboxes, Some(FlowOutcome::Aborted))
            || matches!(self.domains, Some(FlowOutcome::Aborted))
    }
}

/// Drives the two deletion flows against a [`DeletionService`].
pub struct DeletionWorkflow<'a> {
    deletion: &'a DeletionService,
}

impl<'a> DeletionWorkflow<'a> {
    pub fn new(deletion: &'a DeletionService) -> Self {
        Self { deletion }
    }

    pub async fn run<P: Prompter + ?Sized>(
        &self,
        mailboxes: &[Mailbox],
        domains_without_mailbox: &[String],
        prompter: &mut P,
    ) -> CoreResult<WorkflowOutcome> {
        let mut outcome = WorkflowOutcome::default();

        if mailboxes.is_empty() {
            log::info!("No mailboxes to delete");
        } else {
            let flow = match confirm(prompter, MAILBOX_QUESTION)? {
                Choice::Yes => {
                    prompter.notify("Running the delete function...");
                    let report = self.deletion.delete_mailboxes(mailboxes).await;
                    prompter.notify(&format!(
                        "Mailboxes deleted: {}, not found: {}, errors: {}",
                        report.confirmed.len(),
                        report.not_found.len(),
                        report.error_count()
                    ));
                    FlowOutcome::Completed(report)
                }
                Choice::No => {
                    prompter.notify("Operation cancelled.");
                    FlowOutcome::Cancelled
                }
                Choice::Abort => {
                    prompter.notify("Operation aborted.");
                    FlowOutcome::Aborted
                }
            };
            let proceed = matches!(flow, FlowOutcome::Completed(_));
            outcome.mailboxes = Some(flow);
            if !proceed {
                return Ok(outcome);
            }
        }

        if domains_without_mailbox.is_empty() {
            log::info!("No domains without mailboxes to delete");
            return Ok(outcome);
        }

        outcome.domains = Some(match confirm(prompter, DOMAIN_QUESTION)? {
            Choice::Yes => {
                prompter.notify("Running the delete function...");
                let report = self.deletion.delete_domains(domains_without_mailbox).await;
                prompter.notify(&format!(
                    "Domains deleted: {}, not found: {}, errors: {}",
                    report.confirmed.len(),
                    report.not_found.len(),
                    report.error_count()
                ));
                FlowOutcome::Completed(report)
            }
            Choice::No => {
                prompter.notify("Operation cancelled.");
                FlowOutcome::Cancelled
            }
            Choice::Abort => {
                prompter.notify("Operation aborted.");
                FlowOutcome::Aborted
            }
        });

        Ok(outcome)
    }
}
