//! ダッシュボードのセッション
//!
//! 申込データ・書類チェックリスト・審査レコードを1つの状態として持ち、
//! 操作ごとに通知を出してストアに保存する。

use crate::error::{HomeOnlineError, Result};
use crate::fixtures;
use crate::simulate::{self, Clock, Delay, Liveness, SystemClock, TokioDelay};
use crate::store::{LocalStore, DASHBOARD_KEY, LENDERS_KEY};
use crate::upload;
use home_online_common::aggregator::{self, AcceptedOffer};
use home_online_common::{
    DocumentChecklist, FileMeta, LenderApplication, Notification, Notifier, Stage,
    StoredApplication, UploadedFile, Variant, APPLICATION_KEY,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// 通知を標準出力に表示
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let glyph = match notification.variant {
            Variant::Default => "ℹ",
            Variant::Success => "✔",
            Variant::Destructive => "✖",
        };
        println!("{} {}: {}", glyph, notification.title, notification.description);
    }
}

pub struct Session<N: Notifier> {
    store: LocalStore,
    application: StoredApplication,
    checklist: DocumentChecklist,
    lenders: Vec<LenderApplication>,
    notifier: N,
    delay: Arc<dyn Delay>,
    clock: Arc<dyn Clock>,
    liveness: Liveness,
}

impl<N: Notifier> Session<N> {
    /// 新規申込（書類と審査レコードを初期化）
    pub fn create(store: LocalStore, application: StoredApplication, notifier: N) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let today = clock.now().date_naive();

        let checklist =
            DocumentChecklist::new(fixtures::default_requirements(application.application_type));
        let lenders = fixtures::sample_lenders(today);

        tracing::info!(title = application.display_title(), "申込を作成");
        Self {
            store,
            application,
            checklist,
            lenders,
            notifier,
            delay: Arc::new(TokioDelay),
            clock,
            liveness: Liveness::new(),
        }
    }

    /// ストアから復元（導出値は再計算）
    pub fn load(store: LocalStore, notifier: N) -> Result<Self> {
        let application: StoredApplication = store
            .get_item(APPLICATION_KEY)?
            .ok_or(HomeOnlineError::NoApplication)?;

        let checklist = match store.get_item::<DocumentChecklist>(DASHBOARD_KEY)? {
            Some(mut checklist) => {
                checklist.recompute();
                checklist
            }
            None => DocumentChecklist::new(fixtures::default_requirements(
                application.application_type,
            )),
        };

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let lenders = match store.get_item::<Vec<LenderApplication>>(LENDERS_KEY)? {
            Some(lenders) => lenders,
            None => fixtures::sample_lenders(clock.now().date_naive()),
        };

        Ok(Self {
            store,
            application,
            checklist,
            lenders,
            notifier,
            delay: Arc::new(TokioDelay),
            clock,
            liveness: Liveness::new(),
        })
    }

    pub fn with_delay(mut self, delay: impl Delay + 'static) -> Self {
        self.delay = Arc::new(delay);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_lenders(mut self, lenders: Vec<LenderApplication>) -> Self {
        self.lenders = lenders;
        self
    }

    /// 擬似遅延中に破棄された場合に使うハンドル
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    pub fn title(&self) -> &'static str {
        self.application.display_title()
    }

    pub fn application(&self) -> &StoredApplication {
        &self.application
    }

    pub fn checklist(&self) -> &DocumentChecklist {
        &self.checklist
    }

    pub fn lenders(&self) -> &[LenderApplication] {
        &self.lenders
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// 書類へファイルを添付
    pub fn upload(&mut self, doc_id: &str, meta: FileMeta) -> Result<UploadedFile> {
        let before = self.checklist.stage();
        let now = self.clock.now();

        match self.checklist.upload_file(doc_id, meta, now) {
            Ok(file) => {
                tracing::info!(doc_id, file = %file.name, size = file.size, "ファイル添付");
                self.notifier.notify(Notification::success(
                    "Document uploaded",
                    format!("{} has been uploaded", file.name),
                ));
                self.log_stage_change(before);
                Ok(file)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::destructive("Upload failed", e.to_string()));
                Err(e.into())
            }
        }
    }

    /// ローカルファイルを添付
    pub fn upload_path(&mut self, doc_id: &str, path: &Path) -> Result<UploadedFile> {
        let meta = upload::file_meta(path)?;
        self.upload(doc_id, meta)
    }

    /// 書類からファイルを削除
    pub fn remove(&mut self, doc_id: &str, file_index: usize) -> Result<UploadedFile> {
        let before = self.checklist.stage();
        let now = self.clock.now();

        match self.checklist.remove_file(doc_id, file_index, now) {
            Ok(removed) => {
                tracing::info!(doc_id, file = %removed.name, "ファイル削除");
                self.notifier.notify(Notification::new(
                    "Document removed",
                    format!("{} has been removed", removed.name),
                ));
                self.log_stage_change(before);
                Ok(removed)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::destructive("Remove failed", e.to_string()));
                Err(e.into())
            }
        }
    }

    /// 管理者審査に提出（擬似遅延の後に承認）
    pub async fn submit_for_review(&mut self, duration: Duration) -> Result<()> {
        if self.checklist.stage() != Stage::AdminReview
            && self.checklist.stage() != Stage::LenderBidding
        {
            return Err(home_online_common::Error::InvalidTransition {
                from: self.checklist.stage().to_string(),
                action: "submit for review".to_string(),
            }
            .into());
        }

        simulate::after_delay(self.delay.as_ref(), duration, &self.liveness, "admin review")
            .await?;

        let before = self.checklist.stage();
        self.checklist.approve_admin(self.clock.now())?;
        self.notifier.notify(Notification::success(
            "Application approved",
            "Your application has been sent to lenders",
        ));
        self.log_stage_change(before);
        Ok(())
    }

    /// 金融機関のオファーを受け取る（擬似遅延の後）
    ///
    /// 受領件数は承認済みオファーの件数
    pub async fn request_offers(&mut self, duration: Duration) -> Result<u32> {
        let count = aggregator::approved_offers(&self.lenders).len() as u32;
        if count == 0 {
            return Err(home_online_common::Error::NoApprovedOffers.into());
        }
        if self.checklist.stage() != Stage::LenderBidding {
            return Err(home_online_common::Error::InvalidTransition {
                from: self.checklist.stage().to_string(),
                action: "receive offers".to_string(),
            }
            .into());
        }

        simulate::after_delay(self.delay.as_ref(), duration, &self.liveness, "lender bidding")
            .await?;

        let before = self.checklist.stage();
        self.checklist.receive_offers(count, self.clock.now())?;
        self.notifier.notify(Notification::success(
            "Offers received",
            format!("{} lenders have made you an offer", count),
        ));
        self.log_stage_change(before);
        Ok(count)
    }

    /// オファーを確定
    pub fn accept(&mut self, offer_id: &str) -> Result<AcceptedOffer> {
        let accepted = aggregator::accept_offer(&self.lenders, offer_id)?;
        let before = self.checklist.stage();
        self.checklist
            .accept_offer(&accepted.lender_name, self.clock.now())?;

        self.notifier.notify(Notification::success(
            "Offer accepted",
            format!("You accepted the offer from {}", accepted.lender_name),
        ));
        self.log_stage_change(before);
        tracing::info!(route = %accepted.route, "確認画面へ遷移");
        Ok(accepted)
    }

    /// ストアに保存（導出値も含めて書くが、読み込み時は再計算する）
    pub fn save(&mut self) -> Result<()> {
        self.store.set_item(APPLICATION_KEY, &self.application)?;
        self.store.set_item(DASHBOARD_KEY, &self.checklist)?;
        self.store.set_item(LENDERS_KEY, &self.lenders)?;
        self.store.save()
    }

    fn log_stage_change(&self, before: Stage) {
        let after = self.checklist.stage();
        if before != after {
            tracing::info!(from = %before, to = %after, progress = self.checklist.status().progress, "ステージ変更");
        }
    }
}
