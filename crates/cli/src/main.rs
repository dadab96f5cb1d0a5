/// VM Control Panel - 终端前端
///
/// 读取环境配置，以交互式命令行驱动面板控制器

use std::sync::Arc;
use tracing::info;

mod config;
mod terminal;

use panel::PanelController;
use terminal::TerminalView;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载环境变量与配置
    dotenvy::dotenv().ok();
    let cfg = config::Config::from_env()?;

    // 初始化日志
    // 可以通过环境变量 RUST_LOG 设置日志级别，例如：
    // RUST_LOG=debug cargo run
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cfg.log_level.clone())),
        )
        .init();

    info!("🚀 启动 VM Control Panel...");
    info!("✅ 配置加载成功");
    info!("🎯 状态接口: {}", cfg.panel.status_url);
    info!("🎯 电源接口: {}", cfg.panel.power_url);

    let view = Arc::new(TerminalView::new());
    let controller = PanelController::new(&cfg.panel, view.clone())?;

    terminal::run(controller, view).await?;

    Ok(())
}
