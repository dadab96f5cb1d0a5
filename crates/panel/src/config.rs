/// 配置管理

use serde::Deserialize;
use std::time::Duration;

use common::models::constants;

#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    pub status_url: String,
    pub power_url: String,
    pub csrf_token: String,
    pub request_timeout_ms: u64,
    pub fallback_timeout_ms: u64,
    pub repoll_delay_ms: u64,
}

impl PanelConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> anyhow::Result<Self> {
        let status_url = std::env::var("STATUS_URL")
            .unwrap_or_else(|_| "http://localhost:3000/control_vm/status".to_string());

        let power_url = std::env::var("POWER_URL")
            .unwrap_or_else(|_| "http://localhost:3000/control_vm/power".to_string());

        let csrf_token = std::env::var("CSRF_TOKEN").unwrap_or_default();

        let request_timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| constants::DEFAULT_REQUEST_TIMEOUT_MS.to_string())
            .parse()?;

        let fallback_timeout_ms = std::env::var("FALLBACK_TIMEOUT_MS")
            .unwrap_or_else(|_| constants::DEFAULT_FALLBACK_TIMEOUT_MS.to_string())
            .parse()?;

        let repoll_delay_ms = std::env::var("REPOLL_DELAY_MS")
            .unwrap_or_else(|_| constants::DEFAULT_REPOLL_DELAY_MS.to_string())
            .parse()?;

        Ok(Self {
            status_url,
            power_url,
            csrf_token,
            request_timeout_ms,
            fallback_timeout_ms,
            repoll_delay_ms,
        })
    }

    /// 指定接口地址构造配置，超时取默认值
    pub fn new(
        status_url: impl Into<String>,
        power_url: impl Into<String>,
        csrf_token: impl Into<String>,
    ) -> Self {
        Self {
            status_url: status_url.into(),
            power_url: power_url.into(),
            csrf_token: csrf_token.into(),
            request_timeout_ms: constants::DEFAULT_REQUEST_TIMEOUT_MS,
            fallback_timeout_ms: constants::DEFAULT_FALLBACK_TIMEOUT_MS,
            repoll_delay_ms: constants::DEFAULT_REPOLL_DELAY_MS,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }

    pub fn repoll_delay(&self) -> Duration {
        Duration::from_millis(self.repoll_delay_ms)
    }
}
