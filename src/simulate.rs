//! 擬似遅延
//!
//! 外部処理（管理者審査・金融機関の入札）の代わりに一定時間待つ。
//! 待機後の継続処理は Liveness を確認し、所有者が破棄済みなら状態を変更しない。

use crate::error::{HomeOnlineError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// 待機の実装（テストでは差し替える）
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// tokio のタイマーで待つ
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// 待たない
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

/// 現在時刻の取得元
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定時刻（テスト用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 所有者の生存フラグ
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// 破棄済みにする（以降の継続処理は何もしない）
    pub fn shutdown(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 遅延後、生存していれば続行
pub async fn after_delay(
    delay: &dyn Delay,
    duration: Duration,
    liveness: &Liveness,
    label: &str,
) -> Result<()> {
    tracing::debug!(label, ms = duration.as_millis() as u64, "擬似遅延開始");
    delay.wait(duration).await;

    if !liveness.is_alive() {
        tracing::warn!(label, "破棄後の継続処理をスキップ");
        return Err(HomeOnlineError::Cancelled(label.to_string()));
    }
    Ok(())
}
