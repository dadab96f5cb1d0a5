/// HTTP 接口客户端
///
/// 封装状态查询与电源控制两个后端接口

use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

use common::models::{PowerAction, PowerRequest, PowerResponse, StatusResponse};
use common::{Error, Result};

use crate::config::PanelConfig;

/// CSRF 令牌请求头
const CSRF_HEADER: &str = "X-CSRFToken";

pub struct ApiClient {
    http: reqwest::Client,
    status_url: String,
    power_url: String,
    csrf_token: String,
    request_timeout: Duration,
}

impl ApiClient {
    /// 创建接口客户端
    pub fn new(cfg: &PanelConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Internal(format!("构建 HTTP 客户端失败: {}", e)))?;

        Ok(Self {
            http,
            status_url: cfg.status_url.clone(),
            power_url: cfg.power_url.clone(),
            csrf_token: cfg.csrf_token.clone(),
            request_timeout: cfg.request_timeout(),
        })
    }

    /// 查询虚拟机状态
    ///
    /// GET {status_url}?ip=<addr>，带请求级超时
    pub async fn fetch_status(&self, ip: &str) -> Result<StatusResponse> {
        let resp = self
            .http
            .get(&self.status_url)
            .query(&[("ip", ip)])
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: format!("状态查询返回异常: {}", status),
            });
        }

        let body = resp
            .json::<StatusResponse>()
            .await
            .map_err(|e| Error::Transport(format!("解析状态返回失败: {}", e)))?;

        debug!("状态查询完成: ip={}, status={}", ip, body.status);
        Ok(body)
    }

    /// 执行电源操作
    ///
    /// POST {power_url}，JSON 请求体 {ip, action}，携带 CSRF 令牌
    pub async fn power_control(&self, ip: &str, action: PowerAction) -> Result<PowerResponse> {
        let request_id = format!("req-{}", Uuid::new_v4());
        info!(
            "发起电源操作: id={}, ip={}, action={}",
            request_id, ip, action
        );

        let payload = PowerRequest {
            ip: ip.to_string(),
            action,
        };

        let resp = self
            .http
            .post(&self.power_url)
            .header(CSRF_HEADER, &self.csrf_token)
            .json(&payload)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = resp.status();

        // 后端以业务字段报告成败，非 2xx 时消息体也可能可解析
        match resp.json::<PowerResponse>().await {
            Ok(body) => {
                info!(
                    "电源操作返回: id={}, status={}, message={}",
                    request_id, body.status, body.message
                );
                Ok(body)
            }
            Err(e) if status.is_success() => {
                error!("解析电源操作返回失败: id={}, error={}", request_id, e);
                Err(Error::Transport(format!("解析电源操作返回失败: {}", e)))
            }
            Err(_) => Err(Error::Api {
                status: status.as_u16(),
                message: format!("电源操作返回异常: {}", status),
            }),
        }
    }
}

/// 将 reqwest 错误归类为超时或网络错误
fn classify_transport(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(err.to_string())
    } else {
        Error::Transport(err.to_string())
    }
}
