//! Size and profitability extractor.

use crate::extract::numeric::{format_indian_grouping, last_numeric_token};
use crate::extract::patterns::{
    extract_number, extract_string, EPS_ROW, MARKET_CAP, MARKET_CAP_ALT, PROFIT_AND_LOSS, ROCE,
    ROE, TTM_TOKEN,
};
use crate::extract::record::FinancialStrength;

pub fn extract(text: &str) -> FinancialStrength {
    // Direct labeled figure first; the peer-table label carries a bare
    // crore number that gets regrouped into a display string.
    let market_cap = extract_string(text, &MARKET_CAP).or_else(|| {
        extract_number(text, &MARKET_CAP_ALT)
            .map(|value| format!("₹ {} Cr.", format_indian_grouping(value)))
    });

    let eps_ttm = eps_from_profit_and_loss(text).or_else(|| {
        extract_string(text, &EPS_ROW)
            .as_deref()
            .and_then(last_numeric_token)
    });

    FinancialStrength {
        market_cap,
        eps_ttm,
        roe: extract_number(text, &ROE),
        roce: extract_number(text, &ROCE),
    }
}

/// EPS row inside the "Profit & Loss" block, provided the block also
/// carries a TTM column. Rows run oldest to newest, so the rightmost
/// parseable token is the trailing-twelve-month figure.
fn eps_from_profit_and_loss(text: &str) -> Option<f64> {
    let start = PROFIT_AND_LOSS.find(text)?.start();
    let block = &text[start..];
    if !TTM_TOKEN.is_match(block) {
        return None;
    }
    extract_string(block, &EPS_ROW)
        .as_deref()
        .and_then(last_numeric_token)
}
