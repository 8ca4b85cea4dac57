//! オファー比較表出力の統合テスト

use chrono::NaiveDate;
use home_online::export;
use home_online::fixtures;
use home_online_common::aggregator::compare_offers;
use home_online_common::OfferSortKey;
use tempfile::tempdir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

#[test]
fn test_export_to_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let lenders = fixtures::sample_lenders(today());
    let rows = compare_offers(&lenders, OfferSortKey::Rate);

    let path = export::export_offers(&rows, dir.path(), "Offer Comparison").unwrap();
    assert_eq!(path, dir.path().join("Offer Comparison.xlsx"));

    let bytes = std::fs::read(&path).expect("ファイル読み込み失敗");
    // xlsx は ZIP
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_export_creates_parent_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("reports").join("offers.xlsx");
    let lenders = fixtures::sample_lenders(today());
    let rows = compare_offers(&lenders, OfferSortKey::Upfront);

    let path = export::export_offers(&rows, &output, "Offers").unwrap();
    assert_eq!(path, output);
    assert!(output.exists(), "Excelファイルが作成されていない");
}

/// 承認済みオファーがなくてもヘッダだけのシートを出力
#[test]
fn test_export_without_offers() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = export::export_offers(&[], dir.path(), "Empty").unwrap();
    assert!(path.exists());
}
