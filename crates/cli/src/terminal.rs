/// 终端视图与交互循环

use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use common::models::{ActionGating, PowerAction, VmStatus};
use common::Error;
use panel::{NoticeLevel, PanelController, PanelView, StatusDisplay};

/// 终端视图
///
/// 状态行与提示消息直接写到标准输出；
/// 确认交互与命令循环复用同一个行读取器
pub struct TerminalView {
    stdin: Mutex<Lines<BufReader<Stdin>>>,
    gating: Mutex<ActionGating>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            stdin: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            gating: Mutex::new(ActionGating::none()),
        }
    }

    /// 打印提示并读取一行输入
    pub async fn read_line(&self, prompt: &str) -> anyhow::Result<String> {
        print!("{}", prompt);
        std::io::stdout().flush()?;

        let mut lines = self.stdin.lock().await;
        match lines.next_line().await? {
            Some(line) => Ok(line),
            None => Err(anyhow::anyhow!("标准输入已关闭")),
        }
    }

    /// 最近一次门控结果
    pub async fn gating(&self) -> ActionGating {
        *self.gating.lock().await
    }

    fn status_glyph(status: &VmStatus) -> &'static str {
        match status {
            VmStatus::Running => "🟢",
            VmStatus::Stopped | VmStatus::ShutOff => "⚪",
            VmStatus::Unknown => "🟡",
            VmStatus::Loading => "⏳",
        }
    }
}

#[async_trait]
impl PanelView for TerminalView {
    async fn render_status(&self, display: StatusDisplay) {
        println!("{} 状态: {}", Self::status_glyph(&display.status), display.label);
    }

    async fn update_actions(&self, gating: ActionGating) {
        *self.gating.lock().await = gating;

        let mut enabled = Vec::new();
        if gating.start {
            enabled.push("start");
        }
        if gating.shutdown {
            enabled.push("shutdown");
        }
        if gating.reboot {
            enabled.push("reboot");
        }

        if enabled.is_empty() {
            println!("   可用操作: (无)");
        } else {
            println!("   可用操作: {}", enabled.join(" / "));
        }
    }

    async fn confirm_action(&self, ip: &str, action: PowerAction) -> bool {
        println!();
        println!("⚠️  This operation is irreversible. Please verify the IP address and operation type to avoid unnecessary trouble for other colleagues.");
        println!();
        println!("   IP Address: {}", ip);
        println!("   Operation: {}", action);
        println!();

        match self.read_line("Confirm to execute this operation? [y/N] ").await {
            Ok(answer) => matches!(answer.trim(), "y" | "Y" | "yes" | "YES"),
            Err(_) => false,
        }
    }

    async fn notify(&self, level: NoticeLevel, message: &str) {
        let mark = match level {
            NoticeLevel::Success => "✅",
            NoticeLevel::Error => "❌",
        };
        println!(
            "{} [{}] {}",
            mark,
            chrono::Local::now().format("%H:%M:%S"),
            message
        );
    }
}

/// 读取一个合法的目标地址，空输入返回 None
async fn prompt_address(
    controller: &PanelController,
    view: &TerminalView,
) -> anyhow::Result<Option<String>> {
    loop {
        let input = view.read_line("IP> ").await?;
        match controller.submit_address(&input) {
            Ok(found) => return Ok(found),
            Err(Error::Validation(msg)) => println!("❌ {}", msg),
            Err(e) => println!("❌ {}", e),
        }
    }
}

/// 交互式命令循环
pub async fn run(controller: PanelController, view: Arc<TerminalView>) -> anyhow::Result<()> {
    println!("VM Control Panel");
    println!("输入目标虚拟机的 IPv4 地址开始；命令: status / start / shutdown / reboot / ip / quit");

    // 先确定目标地址
    let mut target = loop {
        match prompt_address(&controller, &view).await? {
            Some(ip) => break ip,
            None => continue,
        }
    };

    // 进入面板后立即请求一次状态
    controller.refresh(&target).await;

    loop {
        let input = view.read_line("> ").await?;
        let command = input.trim();

        match command {
            "" => continue,
            "status" | "s" => controller.refresh(&target).await,
            "start" | "shutdown" | "reboot" => {
                let action = match command {
                    "start" => PowerAction::Start,
                    "shutdown" => PowerAction::Shutdown,
                    _ => PowerAction::Reboot,
                };

                // 门控：当前状态下不可用的操作不发送请求
                if !view.gating().await.allows(action) {
                    println!("⚠️  当前状态下不允许执行 {}", action);
                    continue;
                }

                controller.request_action(&target, action).await;
            }
            "ip" => {
                if let Some(ip) = prompt_address(&controller, &view).await? {
                    target = ip;
                    controller.refresh(&target).await;
                }
            }
            "quit" | "q" | "exit" => break,
            other => println!("未知命令: {}", other),
        }
    }

    Ok(())
}
