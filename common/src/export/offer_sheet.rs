//! オファー比較表のExcel生成
//!
//! aggregator::compare_offers の並び順のまま1シートに出力する

use crate::aggregator::OfferRow;
use rust_xlsxwriter::*;

const HEADERS: &[(&str, f64)] = &[
    ("Lender", 24.0),
    ("Application ID", 16.0),
    ("Interest Rate (%)", 14.0),
    ("Comparison Rate (%)", 16.0),
    ("Term (years)", 11.0),
    ("Monthly Repayment", 18.0),
    ("Total Repayment", 18.0),
    ("Establishment Fee", 16.0),
    ("Annual Fee", 12.0),
    ("Cashback", 12.0),
    ("Upfront Cost", 14.0),
    ("Features", 40.0),
    ("Expires", 12.0),
];

/// 比較表をバッファに生成
pub fn generate_offer_sheet(rows: &[OfferRow<'_>], title: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x1F4E79))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let text_format = Format::new().set_border(FormatBorder::Hair);
    let rate_format = Format::new()
        .set_num_format("0.00")
        .set_border(FormatBorder::Hair);
    let money_format = Format::new()
        .set_num_format("$#,##0.00")
        .set_border(FormatBorder::Hair);
    let best_format = Format::new()
        .set_num_format("0.00")
        .set_bold()
        .set_background_color(Color::RGB(0xE2EFDA))
        .set_border(FormatBorder::Hair);

    let best_rate = rows
        .iter()
        .map(|r| r.offer.interest_rate)
        .min_by(|a, b| a.total_cmp(b));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name(title))
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (header, width)) in HEADERS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(0, col, *header, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        let offer = row.offer;
        let features = offer.features.iter().cloned().collect::<Vec<_>>().join(", ");
        let expiry = offer.expiry_date.format("%Y-%m-%d").to_string();

        let rate_cell = if Some(offer.interest_rate) == best_rate {
            &best_format
        } else {
            &rate_format
        };

        let write = |e: XlsxError| format!("行{}書き込みエラー: {}", r, e);

        worksheet.write_string_with_format(r, 0, row.lender_name, &text_format).map_err(write)?;
        worksheet.write_string_with_format(r, 1, row.application_id, &text_format).map_err(write)?;
        worksheet.write_number_with_format(r, 2, offer.interest_rate, rate_cell).map_err(write)?;
        worksheet.write_number_with_format(r, 3, offer.comparison_rate, &rate_format).map_err(write)?;
        worksheet.write_number_with_format(r, 4, offer.term, &text_format).map_err(write)?;
        worksheet.write_number_with_format(r, 5, offer.monthly_repayment, &money_format).map_err(write)?;
        worksheet.write_number_with_format(r, 6, offer.total_repayment, &money_format).map_err(write)?;
        worksheet.write_number_with_format(r, 7, offer.establishment_fee, &money_format).map_err(write)?;
        worksheet.write_number_with_format(r, 8, offer.annual_fee, &money_format).map_err(write)?;
        worksheet.write_number_with_format(r, 9, offer.cashback, &money_format).map_err(write)?;
        worksheet.write_number_with_format(r, 10, offer.upfront_cost(), &money_format).map_err(write)?;
        worksheet.write_string_with_format(r, 11, &features, &text_format).map_err(write)?;
        worksheet.write_string_with_format(r, 12, &expiry, &text_format).map_err(write)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

/// Excelのシート名制約（31文字、一部記号不可）に合わせる
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Offers".to_string()
    } else {
        cleaned
    }
}
