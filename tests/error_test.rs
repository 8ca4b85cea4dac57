//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use home_online::error::HomeOnlineError;
use home_online::upload;
use home_online::validation::ApplicantDetails;
use std::path::Path;

/// 存在しないファイルを添付しようとした場合
#[test]
fn test_upload_nonexistent_file() {
    let result = upload::file_meta(Path::new("/nonexistent/path/12345.pdf"));
    assert!(matches!(result, Err(HomeOnlineError::FileNotFound(_))));
}

/// ディレクトリは添付できない
#[test]
fn test_upload_directory() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let result = upload::file_meta(dir.path());
    assert!(matches!(result, Err(HomeOnlineError::FileNotFound(_))));
}

#[test]
fn test_invalid_applicant_details() {
    let details = ApplicantDetails {
        full_name: "  ".to_string(),
        email: "not-an-email".to_string(),
        phone: "12345".to_string(),
    };
    let errors = details.validate();
    assert!(!errors.is_empty());

    let err = HomeOnlineError::Validation(errors.summary());
    assert!(err.to_string().starts_with("入力エラー"));
}

/// 共通クレートのエラーはそのまま表示される
#[test]
fn test_common_error_is_transparent() {
    let err: HomeOnlineError = home_online_common::Error::OfferNotFound("offer-x".into()).into();
    assert_eq!(
        err.to_string(),
        home_online_common::Error::OfferNotFound("offer-x".into()).to_string()
    );
}

/// HomeOnlineErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        HomeOnlineError::Config("テスト設定エラー".to_string()),
        HomeOnlineError::FileNotFound("payslip.pdf".to_string()),
        HomeOnlineError::Validation("email: Invalid email".to_string()),
        HomeOnlineError::NoApplication,
        HomeOnlineError::Cancelled("admin review".to_string()),
        HomeOnlineError::Export("Excel生成エラー".to_string()),
        HomeOnlineError::CliExecution("選択失敗".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: HomeOnlineError = io.into();
    assert!(matches!(err, HomeOnlineError::Io(_)));
}
