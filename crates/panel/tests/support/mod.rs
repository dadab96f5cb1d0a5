#![allow(dead_code)]

/// 集成测试辅助：事件记录视图与模拟后端

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Mutex;

use common::models::{ActionGating, PowerAction, VmStatus};
use panel::{NoticeLevel, PanelConfig, PanelView, StatusDisplay};

/// 视图收到的回调事件
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Status(StatusDisplay),
    Actions(ActionGating),
    Confirm(String, PowerAction),
    Notice(NoticeLevel, String),
}

/// 记录所有视图回调的测试视图
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
    confirm: bool,
}

impl RecordingView {
    pub fn new(confirm: bool) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            confirm,
        }
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    /// 按顺序提取所有状态变更
    pub fn statuses(&self) -> Vec<VmStatus> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Status(d) => Some(d.status),
                _ => None,
            })
            .collect()
    }

    /// 按顺序提取所有状态显示文案
    pub fn labels(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Status(d) => Some(d.label),
                _ => None,
            })
            .collect()
    }

    /// 最近一次门控结果
    pub fn last_gating(&self) -> Option<ActionGating> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Actions(g) => Some(g),
                _ => None,
            })
            .last()
    }

    /// 按顺序提取所有提示消息
    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Notice(level, msg) => Some((level, msg)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl PanelView for RecordingView {
    async fn render_status(&self, display: StatusDisplay) {
        self.events.lock().unwrap().push(ViewEvent::Status(display));
    }

    async fn update_actions(&self, gating: ActionGating) {
        self.events.lock().unwrap().push(ViewEvent::Actions(gating));
    }

    async fn confirm_action(&self, ip: &str, action: PowerAction) -> bool {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Confirm(ip.to_string(), action));
        self.confirm
    }

    async fn notify(&self, level: NoticeLevel, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Notice(level, message.to_string()));
    }
}

/// 启动模拟后端，返回监听地址
pub async fn spawn_backend(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// 指向模拟后端的测试配置，各超时缩短便于测试
pub fn test_config(addr: SocketAddr) -> PanelConfig {
    let mut cfg = PanelConfig::new(
        format!("http://{}/control_vm/status", addr),
        format!("http://{}/control_vm/power", addr),
        "test-csrf-token",
    );
    cfg.request_timeout_ms = 300;
    cfg.fallback_timeout_ms = 900;
    cfg.repoll_delay_ms = 100;
    cfg
}
