/// 面板控制器
///
/// 组件门面：地址校验、状态刷新、电源操作流程

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use common::models::PowerAction;
use common::utils::validate_ipv4_address;
use common::{Error, Result, VmStatus};

use crate::config::PanelConfig;
use crate::http::ApiClient;
use crate::poller::StatusPoller;
use crate::view::{NoticeLevel, PanelView};

/// 地址校验失败时的提示文案
pub const INVALID_ADDRESS_MESSAGE: &str = "Please enter a valid IPv4 address";

/// 电源操作请求发送失败时的提示文案
const ACTION_FAILED_MESSAGE: &str = "Operation request failed";

pub struct PanelController {
    client: Arc<ApiClient>,
    poller: Arc<StatusPoller>,
    view: Arc<dyn PanelView>,
    repoll_delay: Duration,
}

impl PanelController {
    /// 创建面板控制器
    pub fn new(cfg: &PanelConfig, view: Arc<dyn PanelView>) -> Result<Self> {
        let client = Arc::new(ApiClient::new(cfg)?);
        let poller = Arc::new(StatusPoller::new(
            client.clone(),
            view.clone(),
            cfg.fallback_timeout(),
        ));

        Ok(Self {
            client,
            poller,
            view,
            repoll_delay: cfg.repoll_delay(),
        })
    }

    /// 校验用户输入的目标地址
    ///
    /// 空输入不算校验失败，也不触发轮询
    pub fn submit_address(&self, input: &str) -> Result<Option<String>> {
        let ip = input.trim();
        if ip.is_empty() {
            return Ok(None);
        }
        if !validate_ipv4_address(ip) {
            return Err(Error::Validation(INVALID_ADDRESS_MESSAGE.to_string()));
        }
        Ok(Some(ip.to_string()))
    }

    /// 刷新目标状态
    pub async fn refresh(&self, ip: &str) {
        self.poller.poll(ip).await;
    }

    /// 最近一次已知状态
    pub async fn last_status(&self) -> VmStatus {
        self.poller.last_status().await
    }

    /// 执行电源操作
    ///
    /// 需要用户显式确认；无论成败都会安排一次状态刷新
    pub async fn request_action(&self, ip: &str, action: PowerAction) {
        if !self.view.confirm_action(ip, action).await {
            info!("用户取消电源操作: ip={}, action={}", ip, action);
            return;
        }

        self.poller.set_transitional(action).await;

        match self.client.power_control(ip, action).await {
            Ok(body) => {
                let level = if body.is_success() {
                    NoticeLevel::Success
                } else {
                    NoticeLevel::Error
                };
                self.view.notify(level, &body.message).await;

                // 给 hypervisor 留出状态切换时间再刷新
                tokio::time::sleep(self.repoll_delay).await;
                self.poller.poll(ip).await;
            }
            Err(e) => {
                error!("电源操作请求失败: ip={}, action={}, error={}", ip, action, e);
                self.view.notify(NoticeLevel::Error, ACTION_FAILED_MESSAGE).await;
                self.poller.poll(ip).await;
            }
        }
    }
}
