//! Presentation mapper.
//!
//! The only place display strings are built from raw fields. The record
//! itself stays numeric; prefixes and suffixes are applied here and
//! absent fields render as the shared placeholder.

use crate::extract::record::{StockRecord, ABSENT_PLACEHOLDER};

/// Flat label-to-display mapping in presentation order.
pub fn display_fields(record: &StockRecord) -> Vec<(&'static str, String)> {
    let price = &record.price_volume;
    let valuation = &record.valuation;
    let strength = &record.financial_strength;
    let growth = &record.growth;
    let holding = &record.shareholding;
    let signals = &record.corporate_signals;

    vec![
        ("CMP", rupee(price.cmp)),
        ("52W High", rupee(price.high_52w)),
        ("52W Low", rupee(price.low_52w)),
        ("Stock P/E", plain(valuation.pe_ratio)),
        ("Book Value", rupee(valuation.book_value)),
        ("Face Value", rupee(valuation.face_value)),
        ("P/B Ratio", plain(valuation.pb_ratio)),
        ("Market Cap", text(strength.market_cap.as_deref())),
        ("EPS (TTM)", plain(strength.eps_ttm)),
        ("ROE", percent(strength.roe)),
        ("ROCE", percent(strength.roce)),
        ("Sales Growth (TTM)", percent(growth.sales_growth_ttm)),
        ("Profit Growth (TTM)", percent(growth.profit_growth_ttm)),
        ("Operating Margin", percent(growth.operating_margin)),
        ("Promoter Holding", percent(holding.promoter)),
        ("FII Holding", percent(holding.fii)),
        ("DII Holding", percent(holding.dii)),
        ("Public Holding", percent(holding.public)),
        ("Promoter Change (QoQ)", signed_percent(holding.promoter_change)),
        ("Result Date", text(signals.result_date.as_deref())),
        ("Corporate Action", text(signals.corporate_action.as_deref())),
        ("Announcement", yes_no(signals.has_announcement)),
        ("Headline", text(signals.headline.as_deref())),
    ]
}

fn rupee(value: Option<f64>) -> String {
    value.map_or_else(placeholder, |value| format!("₹ {value}"))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(placeholder, |value| format!("{value}%"))
}

/// Explicit sign so a flat quarter reads "+0%" rather than "0%".
fn signed_percent(value: Option<f64>) -> String {
    value.map_or_else(placeholder, |value| {
        if value == 0.0 {
            "+0%".to_owned()
        } else if value.is_sign_negative() {
            format!("{value}%")
        } else {
            format!("+{value}%")
        }
    })
}

fn plain(value: Option<f64>) -> String {
    value.map_or_else(placeholder, |value| value.to_string())
}

fn text(value: Option<&str>) -> String {
    value.map_or_else(placeholder, str::to_owned)
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_owned()
}

fn placeholder() -> String {
    ABSENT_PLACEHOLDER.to_owned()
}
