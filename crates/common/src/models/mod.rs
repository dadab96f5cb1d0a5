/// 共享数据模型
///
/// 定义面板组件与前端共享的数据结构

use serde::{Deserialize, Serialize};

/// 虚拟机电源状态
///
/// `Loading` 仅用于本地显示，不会出现在接口返回中
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmStatus {
    Running,
    Stopped,
    ShutOff,
    Unknown,
    Loading,
}

impl VmStatus {
    /// 解析接口返回的状态字符串
    ///
    /// 只认 running / stopped / shut off 三个已知值，其余一律归一化为 unknown
    pub fn parse(raw: &str) -> Self {
        match raw {
            "running" => VmStatus::Running,
            "stopped" => VmStatus::Stopped,
            "shut off" => VmStatus::ShutOff,
            _ => VmStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VmStatus::Running => "running",
            VmStatus::Stopped => "stopped",
            VmStatus::ShutOff => "shut off",
            VmStatus::Unknown => "unknown",
            VmStatus::Loading => "loading",
        }
    }
}

impl std::fmt::Display for VmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 电源操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    Start,
    Shutdown,
    Reboot,
}

impl PowerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerAction::Start => "start",
            PowerAction::Shutdown => "shutdown",
            PowerAction::Reboot => "reboot",
        }
    }

    /// 操作进行中的过渡状态文案
    pub fn transitional_label(&self) -> &'static str {
        match self {
            PowerAction::Start => "booting...",
            PowerAction::Shutdown => "shutting down...",
            PowerAction::Reboot => "rebooting...",
        }
    }
}

impl std::fmt::Display for PowerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 按钮门控
///
/// 由最近一次已知状态唯一决定哪些操作可用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionGating {
    pub start: bool,
    pub shutdown: bool,
    pub reboot: bool,
}

impl ActionGating {
    /// 全部禁用
    pub fn none() -> Self {
        Self {
            start: false,
            shutdown: false,
            reboot: false,
        }
    }

    /// 根据状态计算门控
    ///
    /// unknown / loading 状态下禁用所有操作；
    /// 其余状态下 start 仅在非 running 时可用，shutdown / reboot 仅在 running 时可用
    pub fn for_status(status: &VmStatus) -> Self {
        match status {
            VmStatus::Unknown | VmStatus::Loading => Self::none(),
            VmStatus::Running => Self {
                start: false,
                shutdown: true,
                reboot: true,
            },
            VmStatus::Stopped | VmStatus::ShutOff => Self {
                start: true,
                shutdown: false,
                reboot: false,
            },
        }
    }

    /// 判断某个操作当前是否可用
    pub fn allows(&self, action: PowerAction) -> bool {
        match action {
            PowerAction::Start => self.start,
            PowerAction::Shutdown => self.shutdown,
            PowerAction::Reboot => self.reboot,
        }
    }
}

/// 状态查询接口返回
///
/// 除 status 外的字段与门控无关，解析时忽略
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    /// 归一化后的虚拟机状态
    pub fn vm_status(&self) -> VmStatus {
        VmStatus::parse(&self.status)
    }
}

/// 电源操作请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerRequest {
    pub ip: String,
    pub action: PowerAction,
}

/// 电源操作接口返回
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerResponse {
    pub status: String,
    pub message: String,
}

impl PowerResponse {
    /// 判断是否是成功结果
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// 常量定义
pub mod constants {
    /// 状态查询请求级超时（毫秒），比回退计时留 1 秒缓冲
    pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 9_000;

    /// 状态查询回退计时（毫秒），到期后强制置为 unknown
    pub const DEFAULT_FALLBACK_TIMEOUT_MS: u64 = 10_000;

    /// 电源操作后延迟刷新状态的间隔（毫秒）
    pub const DEFAULT_REPOLL_DELAY_MS: u64 = 2_000;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vm_status_parse() {
        assert_eq!(VmStatus::parse("running"), VmStatus::Running);
        assert_eq!(VmStatus::parse("stopped"), VmStatus::Stopped);
        assert_eq!(VmStatus::parse("shut off"), VmStatus::ShutOff);
        // 未知值一律归一化为 unknown
        assert_eq!(VmStatus::parse("paused"), VmStatus::Unknown);
        assert_eq!(VmStatus::parse("loading"), VmStatus::Unknown);
        assert_eq!(VmStatus::parse(""), VmStatus::Unknown);
        assert_eq!(VmStatus::parse("Running"), VmStatus::Unknown);
    }

    #[test]
    fn test_gating_running() {
        let gating = ActionGating::for_status(&VmStatus::Running);
        assert!(!gating.start);
        assert!(gating.shutdown);
        assert!(gating.reboot);
    }

    #[test]
    fn test_gating_stopped() {
        for status in [VmStatus::Stopped, VmStatus::ShutOff] {
            let gating = ActionGating::for_status(&status);
            assert!(gating.start);
            assert!(!gating.shutdown);
            assert!(!gating.reboot);
        }
    }

    #[test]
    fn test_gating_unknown_and_loading() {
        for status in [VmStatus::Unknown, VmStatus::Loading] {
            let gating = ActionGating::for_status(&status);
            assert_eq!(gating, ActionGating::none());
            assert!(!gating.allows(PowerAction::Start));
            assert!(!gating.allows(PowerAction::Shutdown));
            assert!(!gating.allows(PowerAction::Reboot));
        }
    }

    #[test]
    fn test_gating_idempotent() {
        // 同一状态重复计算得到同样的门控
        let first = ActionGating::for_status(&VmStatus::Running);
        let second = ActionGating::for_status(&VmStatus::Running);
        assert_eq!(first, second);
    }

    #[test]
    fn test_power_action_serialization() {
        assert_eq!(
            serde_json::to_value(PowerAction::Start).unwrap(),
            json!("start")
        );
        assert_eq!(
            serde_json::to_value(PowerAction::Shutdown).unwrap(),
            json!("shutdown")
        );
        assert_eq!(
            serde_json::to_value(PowerAction::Reboot).unwrap(),
            json!("reboot")
        );
    }

    #[test]
    fn test_transitional_labels() {
        assert_eq!(PowerAction::Start.transitional_label(), "booting...");
        assert_eq!(
            PowerAction::Shutdown.transitional_label(),
            "shutting down..."
        );
        assert_eq!(PowerAction::Reboot.transitional_label(), "rebooting...");
    }

    #[test]
    fn test_power_response_is_success() {
        let ok = PowerResponse {
            status: "success".to_string(),
            message: "VM 10.0.0.5 start operation success".to_string(),
        };
        assert!(ok.is_success());

        let failed = PowerResponse {
            status: "failed".to_string(),
            message: "command execution failed".to_string(),
        };
        assert!(!failed.is_success());
    }

    #[test]
    fn test_status_response_ignores_extra_fields() {
        // 接口返回可能携带 host_info / vm_info 等附加字段
        let raw = json!({
            "status": "shut off",
            "host_info": { "ip": "10.0.0.1", "type": "kvm" },
            "vm_info": { "ip": "10.0.0.5" }
        });
        let resp: StatusResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(resp.vm_status(), VmStatus::ShutOff);
    }
}
