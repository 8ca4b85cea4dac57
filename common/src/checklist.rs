//! 書類チェックリスト（状態と操作）
//!
//! 書類の追加・削除のたびに tracker で再導出し、ステージと進捗を更新する。
//! offers_received 以降は明示的な操作でのみ遷移する。

use crate::activity::{ActivityKind, ActivityLog, ALL_REQUIRED_UPLOADED};
use crate::error::{Error, Result};
use crate::tracker::{
    self, Classification, CompletionCounts, Derivation, PROGRESS_LENDER_BIDDING,
    PROGRESS_LOAN_ACCEPTED, PROGRESS_OFFERS_RECEIVED,
};
use crate::types::{ApplicationStatus, DocumentRequirement, FileMeta, Stage, UploadedFile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChecklist {
    documents: Vec<DocumentRequirement>,

    #[serde(default)]
    status: ApplicationStatus,

    #[serde(default)]
    activity: ActivityLog,

    /// ファイルID採番用
    #[serde(default)]
    next_file_seq: u64,
}

impl DocumentChecklist {
    pub fn new(documents: Vec<DocumentRequirement>) -> Self {
        let mut checklist = Self {
            documents,
            ..Default::default()
        };
        checklist.recompute();
        checklist
    }

    pub fn documents(&self) -> &[DocumentRequirement] {
        &self.documents
    }

    pub fn document(&self, doc_id: &str) -> Option<&DocumentRequirement> {
        self.documents.iter().find(|d| d.id == doc_id)
    }

    pub fn status(&self) -> &ApplicationStatus {
        &self.status
    }

    pub fn stage(&self) -> Stage {
        self.status.stage
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn classify(&self) -> Classification<'_> {
        tracker::classify(&self.documents)
    }

    pub fn counts(&self) -> CompletionCounts {
        CompletionCounts::from_documents(&self.documents)
    }

    /// 書類にファイルを追加
    pub fn upload_file(
        &mut self,
        doc_id: &str,
        meta: FileMeta,
        now: DateTime<Utc>,
    ) -> Result<UploadedFile> {
        let index = self.position(doc_id)?;

        self.next_file_seq += 1;
        let file = UploadedFile {
            id: format!("file-{}-{}", now.timestamp_millis(), self.next_file_seq),
            name: meta.name,
            size: meta.size,
            mime_type: meta.mime_type,
            upload_timestamp: now,
            checksum: meta.checksum,
        };

        let doc = &mut self.documents[index];
        doc.uploaded_files.push(file.clone());
        let message = format!("Uploaded {} for {}", file.name, doc.name);

        self.activity.push(ActivityKind::Upload, message, now);
        self.rederive(now);
        Ok(file)
    }

    /// 書類からファイルを削除（位置指定）
    pub fn remove_file(
        &mut self,
        doc_id: &str,
        file_index: usize,
        now: DateTime<Utc>,
    ) -> Result<UploadedFile> {
        let index = self.position(doc_id)?;
        let doc = &mut self.documents[index];

        let len = doc.uploaded_files.len();
        if file_index >= len {
            return Err(Error::InvalidIndex {
                doc_id: doc_id.to_string(),
                index: file_index,
                len,
            });
        }

        let removed = doc.uploaded_files.remove(file_index);
        let message = format!("Removed {} from {}", removed.name, doc.name);

        self.activity.push(ActivityKind::Removal, message, now);
        self.rederive(now);
        Ok(removed)
    }

    /// 書類状況から再導出し、必須書類が揃っていればマイルストーンを記録
    pub fn rederive(&mut self, now: DateTime<Utc>) -> Derivation {
        let derivation = self.recompute();
        if self.counts().all_required_done() {
            self.activity
                .push_unique(ActivityKind::Milestone, ALL_REQUIRED_UPLOADED, now);
        }
        derivation
    }

    /// ステータスだけを再計算（ログは書かない）
    ///
    /// 管理者承認済みなら admin_review は lender_bidding として扱う。
    pub fn recompute(&mut self) -> Derivation {
        let mut derivation = tracker::derive_progress(&self.documents);
        if self.status.admin_approved && derivation.stage == Stage::AdminReview {
            derivation = Derivation {
                stage: Stage::LenderBidding,
                progress: PROGRESS_LENDER_BIDDING,
            };
        }
        self.status.documents_complete = derivation.documents_complete();

        if self.status.stage.is_document_driven() {
            self.status.stage = derivation.stage;
            self.status.progress = derivation.progress;
        }

        derivation
    }

    /// 管理者承認（admin_review → lender_bidding）
    pub fn approve_admin(&mut self, now: DateTime<Utc>) -> Result<()> {
        let stage = self.status.stage;
        if !stage.is_document_driven() || !self.counts().all_required_done() {
            return Err(transition_error(stage, "approve application"));
        }

        self.status.admin_approved = true;
        if stage == Stage::AdminReview {
            self.status.stage = Stage::LenderBidding;
            self.status.progress = PROGRESS_LENDER_BIDDING;
        }

        self.activity
            .push(ActivityKind::Info, "Application approved by admin", now);
        Ok(())
    }

    /// オファー受領（lender_bidding → offers_received）
    pub fn receive_offers(&mut self, count: u32, now: DateTime<Utc>) -> Result<()> {
        let stage = self.status.stage;
        if stage != Stage::LenderBidding || count == 0 {
            return Err(transition_error(stage, "receive offers"));
        }

        self.status.offers_received = count;
        self.status.stage = Stage::OffersReceived;
        self.status.progress = PROGRESS_OFFERS_RECEIVED;

        let message = if count == 1 {
            "1 offer received".to_string()
        } else {
            format!("{} offers received", count)
        };
        self.activity.push(ActivityKind::Milestone, message, now);
        Ok(())
    }

    /// オファー確定（offers_received → loan_accepted）
    pub fn accept_offer(&mut self, lender_name: &str, now: DateTime<Utc>) -> Result<()> {
        let stage = self.status.stage;
        if stage != Stage::OffersReceived {
            return Err(transition_error(stage, "accept offer"));
        }

        self.status.stage = Stage::LoanAccepted;
        self.status.progress = PROGRESS_LOAN_ACCEPTED;
        self.activity.push(
            ActivityKind::Milestone,
            format!("Accepted offer from {}", lender_name),
            now,
        );
        Ok(())
    }

    fn position(&self, doc_id: &str) -> Result<usize> {
        self.documents
            .iter()
            .position(|d| d.id == doc_id)
            .ok_or_else(|| Error::DocumentNotFound(doc_id.to_string()))
    }
}

fn transition_error(from: Stage, action: &str) -> Error {
    Error::InvalidTransition {
        from: from.to_string(),
        action: action.to_string(),
    }
}
