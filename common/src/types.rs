//! データモデルの型定義
//!
//! CLIと共有される型:
//! - DocumentRequirement / UploadedFile: 書類チェックリスト
//! - ApplicationStatus / Stage: 書類状況から導出される申込ステージ
//! - LenderApplication / LoanOffer: 金融機関ごとの審査状況とオファー

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 書類にアップロードされたファイル
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub upload_timestamp: DateTime<Utc>,

    /// SHA-256（CLIでローカルファイルから取得した場合のみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// ファイル選択（またはカメラ撮影）から渡されるメタデータ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub checksum: Option<String>,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            checksum: None,
        }
    }
}

/// 提出を求められている書類
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequirement {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub reason_for_request: String,

    #[serde(default)]
    pub required: bool,

    /// financial / income / identity / property など
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
}

impl DocumentRequirement {
    /// ファイルが1件以上あれば完了（部分完了は存在しない）
    pub fn is_complete(&self) -> bool {
        !self.uploaded_files.is_empty()
    }
}

/// 申込ステージ（順序付き）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Application,
    #[default]
    Documents,
    AdminReview,
    LenderBidding,
    OffersReceived,
    LoanAccepted,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Application => "application",
            Stage::Documents => "documents",
            Stage::AdminReview => "admin_review",
            Stage::LenderBidding => "lender_bidding",
            Stage::OffersReceived => "offers_received",
            Stage::LoanAccepted => "loan_accepted",
        }
    }

    /// 書類の状況だけで決まるステージか
    ///
    /// offers_received / loan_accepted は明示的な操作でのみ到達し、
    /// 書類の再導出では戻らない。
    pub fn is_document_driven(&self) -> bool {
        matches!(
            self,
            Stage::Application | Stage::Documents | Stage::AdminReview | Stage::LenderBidding
        )
    }

    /// 表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Application => "Application",
            Stage::Documents => "Documents",
            Stage::AdminReview => "Admin Review",
            Stage::LenderBidding => "Lender Bidding",
            Stage::OffersReceived => "Offers Received",
            Stage::LoanAccepted => "Loan Accepted",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 導出される申込状況
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatus {
    pub stage: Stage,
    pub progress: u8,
    pub documents_complete: bool,
    pub admin_approved: bool,
    pub offers_received: u32,
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        Self {
            stage: Stage::Documents,
            progress: 25,
            documents_complete: false,
            admin_approved: false,
            offers_received: 0,
        }
    }
}

/// 金融機関の審査ステータス
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LenderStatus {
    Reviewing,
    Approved,
    Declined,
    MoreInfo,
    #[default]
    Pending,
}

impl LenderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LenderStatus::Reviewing => "Under Review",
            LenderStatus::Approved => "Approved",
            LenderStatus::Declined => "Declined",
            LenderStatus::MoreInfo => "More Info Required",
            LenderStatus::Pending => "Pending",
        }
    }
}

/// 追加書類のステータス
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentRequestStatus {
    #[default]
    Pending,
    Uploaded,
    Verified,
}

/// 金融機関からの追加書類依頼
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: DocumentRequestStatus,
}

/// 金融機関が提示するローン条件（発行後は不変）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanOffer {
    pub id: String,
    pub amount: f64,
    pub interest_rate: f64,
    pub comparison_rate: f64,

    /// 年数
    pub term: u32,
    pub monthly_repayment: f64,
    pub total_repayment: f64,

    #[serde(default)]
    pub establishment_fee: f64,

    #[serde(default)]
    pub annual_fee: f64,

    #[serde(default)]
    pub cashback: f64,

    #[serde(default)]
    pub features: BTreeSet<String>,

    pub expiry_date: NaiveDate,
}

impl LoanOffer {
    /// 初期費用（設定手数料 - キャッシュバック）
    pub fn upfront_cost(&self) -> f64 {
        self.establishment_fee - self.cashback
    }
}

/// 金融機関ごとの審査レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LenderApplication {
    pub id: String,
    pub lender_name: String,
    pub application_id: String,
    pub application_date: NaiveDate,

    #[serde(default)]
    pub status: LenderStatus,

    /// status = approved の場合のみ
    #[serde(default)]
    pub offer: Option<LoanOffer>,

    #[serde(default)]
    pub additional_documents: Vec<DocumentRequest>,

    /// ローンダッシュボード用の進捗 (0-100)
    #[serde(default)]
    pub progress: u8,
}
