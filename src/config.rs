use crate::error::{HomeOnlineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// ストア位置を上書きする環境変数
pub const STORE_ENV: &str = "HOME_ONLINE_STORE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ストアファイル（省略時は設定ディレクトリ/store.json）
    pub store_path: Option<PathBuf>,
    /// 管理者審査の擬似遅延
    pub review_delay_ms: u64,
    /// オファー受領の擬似遅延
    pub offer_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            review_delay_ms: 1500,
            offer_delay_ms: 2000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "設定読み込み");
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| HomeOnlineError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("home-online"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// ストアの場所（環境変数 > 設定ファイル > 既定）
    pub fn resolve_store_path(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var(STORE_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("store.json")),
        }
    }

    pub fn review_delay(&self) -> Duration {
        Duration::from_millis(self.review_delay_ms)
    }

    pub fn offer_delay(&self) -> Duration {
        Duration::from_millis(self.offer_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays() {
        let config = Config::default();
        assert_eq!(config.review_delay(), Duration::from_millis(1500));
        assert_eq!(config.offer_delay(), Duration::from_millis(2000));
        assert!(config.store_path.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"offerDelayMs": 5}"#).unwrap();
        // snake_caseのみ受け付けるので未知キーは無視される
        assert_eq!(config.offer_delay_ms, 2000);

        let config: Config = serde_json::from_str(r#"{"offer_delay_ms": 5}"#).unwrap();
        assert_eq!(config.offer_delay_ms, 5);
        assert_eq!(config.review_delay_ms, 1500);
    }
}
