//! Graceful Shutdown

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Shutdown 控制器
///
/// 收到关闭信号后，HTTP 服务停止接收新连接；宽限期结束后取消 token，
/// 仍在执行的数据库操作随之中止。
#[derive(Clone)]
pub struct ShutdownController {
    token: CancellationToken,
    grace: Duration,
}

impl ShutdownController {
    pub fn new(token: CancellationToken, grace: Duration) -> Self {
        Self { token, grace }
    }

    /// 宽限期后取消
    pub fn cancel_after_grace(&self) -> JoinHandle<()> {
        let token = self.token.clone();
        let grace = self.grace;
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(grace) => {
                    warn!(
                        grace_secs = grace.as_secs(),
                        "Grace period elapsed, cancelling in-flight operations"
                    );
                    token.cancel();
                }
                _ = token.cancelled() => {}
            }
        })
    }

    /// 等待 `signal` 完成后开始宽限期，可直接交给 `with_graceful_shutdown`
    pub fn graceful<S>(self, signal: S) -> impl Future<Output = ()> + Send + 'static
    where
        S: Future<Output = ()> + Send + 'static,
    {
        async move {
            signal.await;
            info!(grace_secs = self.grace.as_secs(), "Draining in-flight requests");
            self.cancel_after_grace();
        }
    }
}
