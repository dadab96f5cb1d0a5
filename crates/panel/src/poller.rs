/// 状态轮询
///
/// 单次轮询带双重超时（请求级超时 + 回退计时），
/// 并以单调递增的轮询序号丢弃过期的状态更新

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use common::models::{ActionGating, PowerAction};
use common::{Error, VmStatus};

use crate::http::ApiClient;
use crate::view::{PanelView, StatusDisplay};

/// 最近一次应用的显示状态及其序号
struct Applied {
    seq: u64,
    status: VmStatus,
}

pub struct StatusPoller {
    client: Arc<ApiClient>,
    view: Arc<dyn PanelView>,
    fallback_timeout: Duration,

    /// 轮询序号发生器
    seq: AtomicU64,

    applied: Arc<Mutex<Applied>>,
}

impl StatusPoller {
    pub fn new(
        client: Arc<ApiClient>,
        view: Arc<dyn PanelView>,
        fallback_timeout: Duration,
    ) -> Self {
        Self {
            client,
            view,
            fallback_timeout,
            seq: AtomicU64::new(0),
            applied: Arc::new(Mutex::new(Applied {
                seq: 0,
                status: VmStatus::Loading,
            })),
        }
    }

    /// 最近一次已知状态
    pub async fn last_status(&self) -> VmStatus {
        self.applied.lock().await.status.clone()
    }

    /// 执行一次状态轮询
    ///
    /// 先切换到 loading 并禁用所有操作，再发起请求；
    /// 请求路径与回退计时共用一个落点标记，先到者生效
    pub async fn poll(&self, ip: &str) {
        let seq = self.next_seq();
        self.apply(seq, StatusDisplay::of(VmStatus::Loading)).await;

        let settled = Arc::new(AtomicBool::new(false));
        let fallback = self.arm_fallback(seq, ip, settled.clone());

        match self.client.fetch_status(ip).await {
            Ok(body) => {
                if !settled.swap(true, Ordering::SeqCst) {
                    fallback.abort();
                    self.apply(seq, StatusDisplay::of(body.vm_status())).await;
                }
            }
            // 请求级超时交给回退计时收尾，避免重复状态切换
            Err(Error::Timeout(e)) => {
                debug!("状态查询请求超时，等待回退计时收尾: ip={}, error={}", ip, e);
            }
            Err(e) => {
                if !settled.swap(true, Ordering::SeqCst) {
                    fallback.abort();
                    warn!("状态查询失败: ip={}, error={}", ip, e);
                    self.apply(seq, StatusDisplay::of(VmStatus::Unknown)).await;
                }
            }
        }
    }

    /// 进入操作过渡状态（禁用所有操作）
    ///
    /// 占用一个新序号，使仍在途的旧轮询计时全部失效
    pub async fn set_transitional(&self, action: PowerAction) {
        let seq = self.next_seq();
        self.apply(
            seq,
            StatusDisplay::with_label(VmStatus::Loading, action.transitional_label()),
        )
        .await;
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 启动回退计时任务，到期仍未落点则强制置为 unknown
    fn arm_fallback(
        &self,
        seq: u64,
        ip: &str,
        settled: Arc<AtomicBool>,
    ) -> tokio::task::JoinHandle<()> {
        let view = self.view.clone();
        let applied = self.applied.clone();
        let timeout = self.fallback_timeout;
        let ip = ip.to_string();

        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if !settled.swap(true, Ordering::SeqCst) {
                warn!("状态查询超过回退时限，置为 unknown: ip={}", ip);
                Self::apply_to(&applied, &view, seq, StatusDisplay::of(VmStatus::Unknown)).await;
            }
        })
    }

    async fn apply(&self, seq: u64, display: StatusDisplay) {
        Self::apply_to(&self.applied, &self.view, seq, display).await;
    }

    /// 应用显示状态并同步更新门控
    ///
    /// 序号低于已应用值的更新直接丢弃；锁覆盖视图回调，保证回调按序号有序
    async fn apply_to(
        applied: &Arc<Mutex<Applied>>,
        view: &Arc<dyn PanelView>,
        seq: u64,
        display: StatusDisplay,
    ) {
        let mut st = applied.lock().await;
        if seq < st.seq {
            debug!("丢弃过期的状态更新: seq={}, 当前={}", seq, st.seq);
            return;
        }
        st.seq = seq;
        st.status = display.status.clone();

        let gating = ActionGating::for_status(&display.status);
        view.render_status(display).await;
        view.update_actions(gating).await;
    }
}
