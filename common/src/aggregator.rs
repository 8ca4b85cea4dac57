//! 金融機関・オファー集計
//!
//! 事前承認画面とローンダッシュボードで使う集計。すべて O(n) の純粋関数。

use crate::error::{Error, Result};
use crate::route::Route;
use crate::types::{DocumentRequestStatus, LenderApplication, LenderStatus, LoanOffer};
use serde::Serialize;

/// オファー確定後の遷移先
pub const ACCEPTANCE_PATH: &str = "/loan-acceptance";

fn with_status(apps: &[LenderApplication], status: LenderStatus) -> Vec<&LenderApplication> {
    apps.iter().filter(|a| a.status == status).collect()
}

pub fn approved(apps: &[LenderApplication]) -> Vec<&LenderApplication> {
    with_status(apps, LenderStatus::Approved)
}

pub fn needing_more_info(apps: &[LenderApplication]) -> Vec<&LenderApplication> {
    with_status(apps, LenderStatus::MoreInfo)
}

pub fn reviewing(apps: &[LenderApplication]) -> Vec<&LenderApplication> {
    with_status(apps, LenderStatus::Reviewing)
}

pub fn declined(apps: &[LenderApplication]) -> Vec<&LenderApplication> {
    with_status(apps, LenderStatus::Declined)
}

pub fn pending(apps: &[LenderApplication]) -> Vec<&LenderApplication> {
    with_status(apps, LenderStatus::Pending)
}

/// 承認済みオファーの (申込, オファー) 一覧
///
/// approved でもオファーが付いていないレコードは除外する。
pub fn approved_offers(apps: &[LenderApplication]) -> Vec<(&LenderApplication, &LoanOffer)> {
    apps.iter()
        .filter(|a| a.status == LenderStatus::Approved)
        .filter_map(|a| a.offer.as_ref().map(|o| (a, o)))
        .collect()
}

/// 承認済みオファーの最低金利
pub fn best_rate(apps: &[LenderApplication]) -> Result<f64> {
    approved_offers(apps)
        .into_iter()
        .map(|(_, offer)| offer.interest_rate)
        .min_by(|a, b| a.total_cmp(b))
        .ok_or(Error::NoApprovedOffers)
}

/// 未提出の追加書類の合計
pub fn total_pending_documents(apps: &[LenderApplication]) -> usize {
    apps.iter()
        .flat_map(|a| a.additional_documents.iter())
        .filter(|d| d.status == DocumentRequestStatus::Pending)
        .count()
}

/// 各申込の進捗の平均（四捨五入、空なら0）
pub fn overall_progress(apps: &[LenderApplication]) -> u8 {
    if apps.is_empty() {
        return 0;
    }
    let sum: u32 = apps.iter().map(|a| a.progress as u32).sum();
    (sum as f64 / apps.len() as f64).round() as u8
}

/// 集計サマリー
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LenderSummary {
    pub total: usize,
    pub approved: usize,
    pub needing_more_info: usize,
    pub reviewing: usize,
    pub declined: usize,
    pub pending: usize,
    pub best_rate: Option<f64>,
    pub pending_documents: usize,
    pub overall_progress: u8,
}

pub fn summarize(apps: &[LenderApplication]) -> LenderSummary {
    LenderSummary {
        total: apps.len(),
        approved: approved(apps).len(),
        needing_more_info: needing_more_info(apps).len(),
        reviewing: reviewing(apps).len(),
        declined: declined(apps).len(),
        pending: pending(apps).len(),
        best_rate: best_rate(apps).ok(),
        pending_documents: total_pending_documents(apps),
        overall_progress: overall_progress(apps),
    }
}

/// オファー比較の並び順
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OfferSortKey {
    #[default]
    Rate,
    ComparisonRate,
    Monthly,
    Total,
    Upfront,
}

impl OfferSortKey {
    fn value(&self, offer: &LoanOffer) -> f64 {
        match self {
            OfferSortKey::Rate => offer.interest_rate,
            OfferSortKey::ComparisonRate => offer.comparison_rate,
            OfferSortKey::Monthly => offer.monthly_repayment,
            OfferSortKey::Total => offer.total_repayment,
            OfferSortKey::Upfront => offer.upfront_cost(),
        }
    }
}

impl std::str::FromStr for OfferSortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rate" => Ok(OfferSortKey::Rate),
            "comparison" | "comparison_rate" | "comparison-rate" => Ok(OfferSortKey::ComparisonRate),
            "monthly" => Ok(OfferSortKey::Monthly),
            "total" => Ok(OfferSortKey::Total),
            "upfront" | "fees" => Ok(OfferSortKey::Upfront),
            _ => Err(format!(
                "Unknown sort key: {}. Use rate, comparison, monthly, total, or upfront",
                s
            )),
        }
    }
}

/// 比較表の1行
#[derive(Debug, Clone, PartialEq)]
pub struct OfferRow<'a> {
    pub lender_name: &'a str,
    pub application_id: &'a str,
    pub offer: &'a LoanOffer,
}

/// 承認済みオファーを指定キーの昇順で並べる（同値は元の順序）
pub fn compare_offers(apps: &[LenderApplication], key: OfferSortKey) -> Vec<OfferRow<'_>> {
    let mut rows: Vec<OfferRow<'_>> = approved_offers(apps)
        .into_iter()
        .map(|(app, offer)| OfferRow {
            lender_name: &app.lender_name,
            application_id: &app.application_id,
            offer,
        })
        .collect();

    rows.sort_by(|a, b| key.value(a.offer).total_cmp(&key.value(b.offer)));
    rows
}

/// 確定したオファー
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedOffer {
    pub lender_name: String,
    pub application_id: String,
    pub offer: LoanOffer,
    pub route: Route,
}

/// オファーを確定し、確認画面への遷移先を返す
///
/// 取り消し処理は存在しない。
pub fn accept_offer(apps: &[LenderApplication], offer_id: &str) -> Result<AcceptedOffer> {
    let (app, offer) = approved_offers(apps)
        .into_iter()
        .find(|(_, offer)| offer.id == offer_id)
        .ok_or_else(|| Error::OfferNotFound(offer_id.to_string()))?;

    let route = Route::new(ACCEPTANCE_PATH)
        .with_param("offerId", &offer.id)
        .with_param("amount", offer.amount)
        .with_param("term", offer.term);

    Ok(AcceptedOffer {
        lender_name: app.lender_name.clone(),
        application_id: app.application_id.clone(),
        offer: offer.clone(),
        route,
    })
}
