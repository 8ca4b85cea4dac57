//! オファー比較表のファイル出力

use crate::error::{HomeOnlineError, Result};
use home_online_common::export::offer_sheet;
use home_online_common::OfferRow;
use std::path::{Path, PathBuf};

/// ディレクトリ指定なら `<title>.xlsx` を付ける
pub fn output_path_for(output: &Path, title: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.xlsx", title))
    } else {
        output.to_path_buf()
    }
}

pub fn export_offers(rows: &[OfferRow<'_>], output: &Path, title: &str) -> Result<PathBuf> {
    let output_path = output_path_for(output, title);

    let buffer = offer_sheet::generate_offer_sheet(rows, title).map_err(HomeOnlineError::Export)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&output_path, buffer)?;
    tracing::info!(path = %output_path.display(), rows = rows.len(), "オファー比較表を出力");

    Ok(output_path)
}
