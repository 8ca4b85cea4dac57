use thiserror::Error;

#[derive(Error, Debug)]
pub enum HomeOnlineError {
    #[error(transparent)]
    Common(#[from] home_online_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力エラー: {0}")]
    Validation(String),

    #[error("申込データがありません。`home-online init` で作成してください")]
    NoApplication,

    #[error("ストアファイルを読めません: {path}: {source}")]
    CorruptStore {
        path: String,
        source: serde_json::Error,
    },

    #[error("ストアのエントリ {key} を読めません: {source}")]
    CorruptEntry {
        key: String,
        source: serde_json::Error,
    },

    #[error("処理が中断されました: {0}")]
    Cancelled(String),

    #[error("Excel生成エラー: {0}")]
    Export(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, HomeOnlineError>;
