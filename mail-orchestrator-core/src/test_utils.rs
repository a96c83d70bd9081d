//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use mail_orchestrator_provider::{ApiResponse, ApiVerb, MailProvider, ProviderError, Result};

use crate::error::CoreResult;
use crate::types::Mailbox;
use crate::workflow::Prompter;

// ===== Response bodies =====

pub fn active_body(name: &str, used_storage: u64) -> String {
    format!(r#"{{"name":"{name}","accountNumber":"123456","rsEmailUsedStorage":{used_storage},"rsEmailMaxNumberMailboxes":10}}"#)
}

pub fn empty_storage_body(name: &str) -> String {
    active_body(name, 0)
}

pub fn unauthorized_body() -> String {
    r#"{"unauthorizedFault":{"message":"Authentication failed.","code":403}}"#.to_string()
}

pub fn not_found_body() -> String {
    r#"{"itemNotFoundFault":{"message":"Domain not found.","code":404}}"#.to_string()
}

pub fn mailboxes(raw: &[&str]) -> Vec<Mailbox> {
    raw.iter().filter_map(|s| Mailbox::parse(s)).collect()
}

fn network_error(detail: &str) -> ProviderError {
    ProviderError::NetworkError {
        provider: "mock".to_string(),
        detail: detail.to_string(),
    }
}

// ===== MockMailProvider =====

type Reply = std::result::Result<String, ProviderError>;

/// Scripted provider. Unknown domains answer `itemNotFoundFault` on lookup; deletions answer
/// with an empty body unless overridden.
#[derive(Default)]
pub struct MockMailProvider {
    lookups: HashMap<String, Reply>,
    deletes: HashMap<String, Reply>,
    calls: Mutex<Vec<(ApiVerb, String)>>,
}

impl MockMailProvider {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lookup(mut self, domain: &str, body: impl Into<String>) -> Self {
        self.lookups.insert(domain.to_string(), Ok(body.into()));
        self
    }

    #[must_use]
    pub fn with_lookup_failure(mut self, domain: &str, detail: &str) -> Self {
        self.lookups
            .insert(domain.to_string(), Err(network_error(detail)));
        self
    }

    /// `item` is a domain or a `local@domain` address.
    #[must_use]
    pub fn with_delete(mut self, item: &str, body: impl Into<String>) -> Self {
        self.deletes.insert(item.to_string(), Ok(body.into()));
        self
    }

    #[must_use]
    pub fn with_delete_failure(mut self, item: &str, detail: &str) -> Self {
        self.deletes
            .insert(item.to_string(), Err(network_error(detail)));
        self
    }

    fn record(&self, verb: ApiVerb, item: &str) {
        self.calls.lock().unwrap().push((verb, item.to_string()));
    }

    fn calls_where(&self, filter: impl Fn(ApiVerb, &str) -> bool) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(verb, item)| filter(*verb, item.as_str()))
            .map(|(_, item)| item.clone())
            .collect()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.calls_where(|verb, _| verb == ApiVerb::Get)
    }

    pub fn mailbox_deletes(&self) -> Vec<String> {
        self.calls_where(|verb, item| verb == ApiVerb::Delete && item.contains('@'))
    }

    pub fn domain_deletes(&self) -> Vec<String> {
        self.calls_where(|verb, item| verb == ApiVerb::Delete && !item.contains('@'))
    }

    pub fn delete_count(&self) -> usize {
        self.calls_where(|verb, _| verb == ApiVerb::Delete).len()
    }

    fn delete_reply(&self, item: &str) -> Result<ApiResponse> {
        match self.deletes.get(item) {
            Some(Ok(body)) => Ok(ApiResponse {
                status: 200,
                body: body.clone(),
            }),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(ApiResponse {
                status: 200,
                body: String::new(),
            }),
        }
    }
}

#[async_trait]
impl MailProvider for MockMailProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn get_domain(&self, domain: &str) -> Result<ApiResponse> {
        self.record(ApiVerb::Get, domain);
        match self.lookups.get(domain) {
            Some(Ok(body)) => Ok(ApiResponse {
                status: 200,
                body: body.clone(),
            }),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(ApiResponse {
                status: 404,
                body: not_found_body(),
            }),
        }
    }

    async fn delete_domain(&self, domain: &str) -> Result<ApiResponse> {
        self.record(ApiVerb::Delete, domain);
        self.delete_reply(domain)
    }

    async fn delete_mailbox(&self, domain: &str, local_part: &str) -> Result<ApiResponse> {
        let address = format!("{local_part}@{domain}");
        self.record(ApiVerb::Delete, &address);
        self.delete_reply(&address)
    }
}

// ===== ScriptedPrompter =====

/// Answers prompts from a fixed script, then reports end of input.
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Number of `ask` calls.
    pub asked: usize,
    /// Everything passed to `notify`.
    pub messages: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: 0,
            messages: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, _prompt: &str) -> CoreResult<Option<String>> {
        self.asked += 1;
        Ok(self.answers.pop_front())
    }

    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
