/// 面板视图接口
///
/// 将状态渲染、按钮门控、二次确认与消息提示抽象为显式的事件订阅接口

use async_trait::async_trait;

use common::models::{ActionGating, PowerAction, VmStatus};

/// 提示消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// 状态显示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDisplay {
    pub status: VmStatus,
    /// 显示文案，默认为状态本身，操作进行中为过渡文案
    pub label: String,
}

impl StatusDisplay {
    pub fn of(status: VmStatus) -> Self {
        let label = status.to_string();
        Self { status, label }
    }

    pub fn with_label(status: VmStatus, label: impl Into<String>) -> Self {
        Self {
            status,
            label: label.into(),
        }
    }
}

/// 面板视图
///
/// 每次状态变更都会先后收到 render_status 与 update_actions，
/// 保证显示状态与按钮门控始终一致
#[async_trait]
pub trait PanelView: Send + Sync {
    /// 渲染状态显示
    async fn render_status(&self, display: StatusDisplay);

    /// 更新操作按钮门控
    async fn update_actions(&self, gating: ActionGating);

    /// 请求用户确认操作，返回 false 表示取消
    async fn confirm_action(&self, ip: &str, action: PowerAction) -> bool;

    /// 显示提示消息
    async fn notify(&self, level: NoticeLevel, message: &str);
}
