/// 配置管理

use panel::PanelConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub panel: PanelConfig,
    pub log_level: String,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> anyhow::Result<Self> {
        let panel = PanelConfig::from_env()?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self { panel, log_level })
    }
}
