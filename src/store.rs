//! ローカルキー・バリューストア
//!
//! ブラウザの localStorage 相当。1つのJSONファイルに キー → JSON値 を保存する。
//! ファイルがなければ空。読めないファイルやエントリはエラーにして、上書きしない。

use crate::error::{HomeOnlineError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 書類チェックリストの保存キー
pub const DASHBOARD_KEY: &str = "homeOnlineDashboard";
/// 金融機関レコードの保存キー
pub const LENDERS_KEY: &str = "homeOnlineLenders";

#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, serde_json::Value>,
}

impl LocalStore {
    /// ストアを読み込み（ファイルがなければ空）
    pub fn open(path: &Path) -> Result<Self> {
        let entries = match std::fs::read_to_string(path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| HomeOnlineError::CorruptStore {
                    path: path.display().to_string(),
                    source: e,
                })?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "ストア読み込み");
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 値を取得（キーがなければ None、型が合わなければエラー）
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = self.entries.get(key) else {
            return Ok(None);
        };
        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| HomeOnlineError::CorruptEntry {
                key: key.to_string(),
                source: e,
            })
    }

    pub fn set_item<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.entries
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// 削除した場合 true
    pub fn remove_item(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), "ストア保存");
        Ok(())
    }
}
