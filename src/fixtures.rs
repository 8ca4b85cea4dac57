//! 初期データ
//!
//! `init` 時の書類チェックリストと、金融機関の審査レコードの見本。

use chrono::{Days, NaiveDate};
use home_online_common::{
    ApplicationType, DocumentRequest, DocumentRequestStatus, DocumentRequirement,
    LenderApplication, LenderStatus, LoanOffer,
};

fn requirement(
    id: &str,
    name: &str,
    description: &str,
    reason: &str,
    required: bool,
    category: &str,
) -> DocumentRequirement {
    DocumentRequirement {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        reason_for_request: reason.into(),
        required,
        category: category.into(),
        uploaded_files: Vec::new(),
    }
}

/// 申込種別ごとの提出書類
pub fn default_requirements(kind: ApplicationType) -> Vec<DocumentRequirement> {
    let mut docs = vec![
        requirement(
            "photo-id",
            "Photo Identification",
            "Driver licence or passport",
            "Lenders must verify your identity",
            true,
            "identity",
        ),
        requirement(
            "payslips",
            "Recent Payslips",
            "Your two most recent payslips",
            "Confirms your current income",
            true,
            "income",
        ),
        requirement(
            "bank-statements",
            "Bank Statements",
            "Last 3 months of transaction account statements",
            "Shows living expenses and savings history",
            true,
            "financial",
        ),
        requirement(
            "tax-return",
            "Tax Return",
            "Most recent notice of assessment",
            "Helps lenders assess variable or bonus income",
            false,
            "income",
        ),
    ];

    match kind {
        ApplicationType::Refinance => docs.push(requirement(
            "loan-statement",
            "Current Loan Statement",
            "Latest statement for the loan being refinanced",
            "Confirms the balance to be paid out",
            true,
            "financial",
        )),
        ApplicationType::FirstTime | ApplicationType::New => docs.push(requirement(
            "contract-of-sale",
            "Contract of Sale",
            "Signed contract for the property",
            "Confirms the purchase price and settlement date",
            false,
            "property",
        )),
    }

    docs
}

#[allow(clippy::too_many_arguments)]
fn offer(
    id: &str,
    amount: f64,
    rate: f64,
    comparison: f64,
    monthly: f64,
    establishment_fee: f64,
    annual_fee: f64,
    cashback: f64,
    features: &[&str],
    expiry: NaiveDate,
) -> LoanOffer {
    LoanOffer {
        id: id.into(),
        amount,
        interest_rate: rate,
        comparison_rate: comparison,
        term: 30,
        monthly_repayment: monthly,
        total_repayment: (monthly * 360.0).round(),
        establishment_fee,
        annual_fee,
        cashback,
        features: features.iter().map(|f| f.to_string()).collect(),
        expiry_date: expiry,
    }
}

/// 審査レコードの見本（承認2・審査中1・追加書類1・否決1）
pub fn sample_lenders(today: NaiveDate) -> Vec<LenderApplication> {
    let applied = today.checked_sub_days(Days::new(7)).unwrap_or(today);
    let expiry = today.checked_add_days(Days::new(30)).unwrap_or(today);

    vec![
        LenderApplication {
            id: "la-harbour".into(),
            lender_name: "Harbour Bank".into(),
            application_id: "HB-20431".into(),
            application_date: applied,
            status: LenderStatus::Approved,
            offer: Some(offer(
                "offer-harbour",
                650000.0,
                5.89,
                5.94,
                3851.0,
                600.0,
                0.0,
                2000.0,
                &["Offset account", "Redraw facility", "Extra repayments"],
                expiry,
            )),
            additional_documents: Vec::new(),
            progress: 100,
        },
        LenderApplication {
            id: "la-southern".into(),
            lender_name: "Southern Cross Credit Union".into(),
            application_id: "SC-7781".into(),
            application_date: applied,
            status: LenderStatus::Approved,
            offer: Some(offer(
                "offer-southern",
                650000.0,
                6.04,
                6.21,
                3913.0,
                0.0,
                395.0,
                3000.0,
                &["Redraw facility", "Split loan option"],
                expiry,
            )),
            additional_documents: Vec::new(),
            progress: 100,
        },
        LenderApplication {
            id: "la-coastal".into(),
            lender_name: "Coastal Home Loans".into(),
            application_id: "CHL-1190".into(),
            application_date: applied,
            status: LenderStatus::Reviewing,
            offer: None,
            additional_documents: Vec::new(),
            progress: 50,
        },
        LenderApplication {
            id: "la-metro".into(),
            lender_name: "Metro Mutual".into(),
            application_id: "MM-5502".into(),
            application_date: applied,
            status: LenderStatus::MoreInfo,
            offer: None,
            additional_documents: vec![
                DocumentRequest {
                    id: "mm-employment".into(),
                    name: "Employment Letter".into(),
                    description: "Letter confirming role, salary and tenure".into(),
                    status: DocumentRequestStatus::Pending,
                },
                DocumentRequest {
                    id: "mm-rates".into(),
                    name: "Council Rates Notice".into(),
                    description: "For the property being purchased".into(),
                    status: DocumentRequestStatus::Uploaded,
                },
            ],
            progress: 40,
        },
        LenderApplication {
            id: "la-pacific".into(),
            lender_name: "Pacific Lending".into(),
            application_id: "PL-0093".into(),
            application_date: applied,
            status: LenderStatus::Declined,
            offer: None,
            additional_documents: Vec::new(),
            progress: 100,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use home_online_common::aggregator;

    #[test]
    fn test_requirements_by_type() {
        let first = default_requirements(ApplicationType::FirstTime);
        assert!(first.iter().any(|d| d.id == "contract-of-sale"));
        assert!(first.iter().all(|d| d.uploaded_files.is_empty()));

        let refi = default_requirements(ApplicationType::Refinance);
        let statement = refi.iter().find(|d| d.id == "loan-statement").unwrap();
        assert!(statement.required);
    }

    #[test]
    fn test_sample_lenders_summary() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let lenders = sample_lenders(today);
        let summary = aggregator::summarize(&lenders);

        assert_eq!(summary.approved, 2);
        assert_eq!(summary.needing_more_info, 1);
        assert_eq!(summary.best_rate, Some(5.89));
        assert_eq!(summary.pending_documents, 1);
        // (100 + 100 + 50 + 40 + 100) / 5 = 78
        assert_eq!(summary.overall_progress, 78);
    }
}
