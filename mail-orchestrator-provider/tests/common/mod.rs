//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use mail_orchestrator_provider::{ApiCredentials, ProviderError, RackspaceProvider};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

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

/// 测试上下文
#[derive(Debug)]
pub struct TestContext {
    pub provider: RackspaceProvider,
    pub test_domain: String,
}

impl TestContext {
    /// Live provider from `RACKSPACE_API_KEY`, `RACKSPACE_SECRET_KEY` and `TEST_DOMAIN`.
    pub fn rackspace() -> Result<Self, ProviderError> {
        let credentials = ApiCredentials {
            api_key: env::var("RACKSPACE_API_KEY").unwrap_or_default(),
            secret_key: env::var("RACKSPACE_SECRET_KEY").unwrap_or_default(),
        };
        let provider = RackspaceProvider::builder(credentials)
            .max_retries(1)
            .build()?;

        Ok(Self {
            provider,
            test_domain: env::var("TEST_DOMAIN").unwrap_or_default(),
        })
    }
}
