//! CLIと共有する出力処理

#[cfg(feature = "excel")]
pub mod offer_sheet;
