//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mail_orchestrator_core::{CoreResult, Mailbox, Prompter};
use mail_orchestrator_provider::{ApiResponse, MailProvider, ProviderError, Result};

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const UNAUTHORIZED: &str =
    r#"{"unauthorizedFault":{"message":"Authentication failed.","code":403}}"#;
pub const NOT_FOUND: &str = r#"{"itemNotFoundFault":{"message":"Item not found.","code":404}}"#;

pub fn domain_body(name: &str, used_storage: u64) -> String {
    format!(r#"{{"name":"{name}","rsEmailUsedStorage":{used_storage}}}"#)
}

pub fn mailboxes(raw: &[&str]) -> Vec<Mailbox> {
    raw.iter().filter_map(|s| Mailbox::parse(s)).collect()
}

/// In-memory stand-in for the vendor API. Every call is recorded as `"VERB item"`.
#[derive(Default)]
pub struct FakeApi {
    lookups: HashMap<String, String>,
    deletes: HashMap<String, String>,
    broken: Vec<String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(mut self, domain: &str, body: impl Into<String>) -> Self {
        self.lookups.insert(domain.to_string(), body.into());
        self
    }

    pub fn delete(mut self, item: &str, body: impl Into<String>) -> Self {
        self.deletes.insert(item.to_string(), body.into());
        self
    }

    /// Any call for `item` fails at the transport level.
    pub fn broken(mut self, item: &str) -> Self {
        self.broken.push(item.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("DELETE ").map(ToString::to_string))
            .collect()
    }

    fn answer(&self, verb: &str, item: &str, body: Option<&String>) -> Result<ApiResponse> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{verb} {item}"));
        }
        if self.broken.iter().any(|b| b == item) {
            return Err(ProviderError::NetworkError {
                provider: "fake".to_string(),
                detail: "connection reset by peer".to_string(),
            });
        }
        Ok(ApiResponse {
            status: 200,
            body: body.cloned().unwrap_or_default(),
        })
    }
}

#[async_trait]
impl MailProvider for FakeApi {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn get_domain(&self, domain: &str) -> Result<ApiResponse> {
        let body = self
            .lookups
            .get(domain)
            .cloned()
            .unwrap_or_else(|| NOT_FOUND.to_string());
        self.answer("GET", domain, Some(&body))
    }

    async fn delete_domain(&self, domain: &str) -> Result<ApiResponse> {
        self.answer("DELETE", domain, self.deletes.get(domain))
    }

    async fn delete_mailbox(&self, domain: &str, local_part: &str) -> Result<ApiResponse> {
        let address = format!("{local_part}@{domain}");
        self.answer("DELETE", &address, self.deletes.get(&address))
    }
}

/// Answers from a fixed list, then end of input.
pub struct Answers {
    pending: Vec<String>,
    pub shown: Vec<String>,
}

impl Answers {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            pending: answers.iter().rev().map(ToString::to_string).collect(),
            shown: Vec::new(),
        }
    }
}

impl Prompter for Answers {
    fn ask(&mut self, _prompt: &str) -> CoreResult<Option<String>> {
        Ok(self.pending.pop())
    }

    fn notify(&mut self, message: &str) {
        self.shown.push(message.to_string());
    }
}
