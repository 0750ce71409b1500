//! Growth extractor.

use crate::extract::numeric::last_numeric_token;
use crate::extract::patterns::{
    extract_number, extract_string, MARGIN_ROW, PROFIT_GROWTH_TTM, PROFIT_GROWTH_TTM_LOOSE,
    SALES_GROWTH_TTM, SALES_GROWTH_TTM_LOOSE,
};
use crate::extract::record::Growth;

/// Compounded TTM growth rates and the latest operating margin.
///
/// Each growth rate tries a tight colon-delimited capture first, then a
/// looser scan for any percentage after the TTM marker. The margin row
/// is scanned backward so a trailing placeholder column does not mask
/// the latest figure.
pub fn extract(text: &str) -> Growth {
    let sales_growth_ttm = extract_number(text, &SALES_GROWTH_TTM)
        .or_else(|| extract_number(text, &SALES_GROWTH_TTM_LOOSE));
    let profit_growth_ttm = extract_number(text, &PROFIT_GROWTH_TTM)
        .or_else(|| extract_number(text, &PROFIT_GROWTH_TTM_LOOSE));

    let operating_margin = extract_string(text, &MARGIN_ROW)
        .as_deref()
        .and_then(last_numeric_token);

    Growth {
        sales_growth_ttm,
        profit_growth_ttm,
        operating_margin,
    }
}
