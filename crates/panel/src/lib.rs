/// VM Control Panel - 面板组件库
///
/// 维护远端虚拟机电源状态的最终一致视图，并代理用户发起的电源操作

pub mod config;
pub mod controller;
pub mod http;
pub mod poller;
pub mod view;

// 重新导出常用类型
pub use config::PanelConfig;
pub use controller::PanelController;
pub use http::ApiClient;
pub use poller::StatusPoller;
pub use view::{NoticeLevel, PanelView, StatusDisplay};
