//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid file index {index} for document {doc_id} ({len} files)")]
    InvalidIndex {
        doc_id: String,
        index: usize,
        len: usize,
    },

    #[error("No approved offers")]
    NoApprovedOffers,

    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    #[error("Cannot {action} while application is in stage {from}")]
    InvalidTransition { from: String, action: String },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
