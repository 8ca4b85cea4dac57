//! 添付ファイルのメタデータ取得
//!
//! ファイル本体はコピーしない。名前・サイズ・MIME・SHA-256のみ。

use crate::error::{HomeOnlineError, Result};
use home_online_common::FileMeta;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const MIME_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("heic", "image/heic"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("csv", "text/csv"),
    ("txt", "text/plain"),
];

const FALLBACK_MIME: &str = "application/octet-stream";

/// 拡張子からMIMEタイプを推定
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME)
}

/// ファイルのSHA-256（16進）
pub fn compute_checksum(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// ローカルファイルから添付メタデータを作る
pub fn file_meta(path: &Path) -> Result<FileMeta> {
    if !path.is_file() {
        return Err(HomeOnlineError::FileNotFound(path.display().to_string()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let size = std::fs::metadata(path)?.len();

    Ok(FileMeta {
        name,
        size,
        mime_type: mime_for_path(path).to_string(),
        checksum: Some(compute_checksum(path)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("payslip.PDF")), "application/pdf");
        assert_eq!(mime_for_path(Path::new("licence.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("scan.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("archive.zip")), FALLBACK_MIME);
        assert_eq!(mime_for_path(Path::new("noext")), FALLBACK_MIME);
    }

    #[test]
    fn test_file_meta_missing() {
        let result = file_meta(Path::new("/nonexistent/statement.pdf"));
        assert!(matches!(result, Err(HomeOnlineError::FileNotFound(_))));
    }

    #[test]
    fn test_file_meta_reads_size_and_checksum() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("statement.pdf");
        std::fs::write(&path, b"abc").unwrap();

        let meta = file_meta(&path).unwrap();
        assert_eq!(meta.name, "statement.pdf");
        assert_eq!(meta.size, 3);
        assert_eq!(meta.mime_type, "application/pdf");
        assert_eq!(
            meta.checksum.as_deref(),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }
}
