//! 申込フォームの保存データ
//!
//! `homeOnlineApplication` キーに保存されるJSON。表示タイトルの選択にのみ使う。

use serde::{Deserialize, Serialize};

/// ローカル保存のキー
pub const APPLICATION_KEY: &str = "homeOnlineApplication";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationType {
    #[default]
    FirstTime,
    New,
    Refinance,
}

impl ApplicationType {
    pub fn display_title(&self) -> &'static str {
        match self {
            ApplicationType::FirstTime => "First Home Buyer Application",
            ApplicationType::New => "New Home Loan Application",
            ApplicationType::Refinance => "Refinance Application",
        }
    }
}

impl std::str::FromStr for ApplicationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "firsttime" | "first-time" | "first_time" | "first" => Ok(ApplicationType::FirstTime),
            "new" => Ok(ApplicationType::New),
            "refinance" | "refi" => Ok(ApplicationType::Refinance),
            _ => Err(format!(
                "Unknown application type: {}. Use first-time, new, or refinance",
                s
            )),
        }
    }
}

/// 保存された申込フォーム
///
/// `type` 以外の項目はそのまま保持する（スキーマのバージョン管理なし）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredApplication {
    #[serde(rename = "type")]
    pub application_type: ApplicationType,

    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StoredApplication {
    pub fn new(application_type: ApplicationType) -> Self {
        Self {
            application_type,
            ..Default::default()
        }
    }

    pub fn display_title(&self) -> &'static str {
        self.application_type.display_title()
    }
}
