//! Compiled pattern table and the two extraction primitives.
//!
//! Every field pattern lives here as a `LazyLock<Regex>` static so the
//! section extractors stay declarative and each pattern can be audited
//! and tested in isolation. Patterns are case-insensitive and written so
//! the captured value may sit on the line after its label.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::numeric::parse_numeric_token;

/// First match of `pattern`, capture group 1 normalized to a finite f64.
///
/// Total: a missing match, missing group, or unparseable token is `None`.
pub fn extract_number(text: &str, pattern: &Regex) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_numeric_token(m.as_str()))
}

/// First match of `pattern`, capture group 1 trimmed.
pub fn extract_string(text: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|value| !value.is_empty())
}

// Price and volume.

/// Any rupee-prefixed amount; the first occurrence in a pasted page is
/// the current market price.
pub static CURRENCY_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"₹\s*([\d,]+(?:\.\d+)?)").expect("valid currency amount regex"));

pub static HIGH_LOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)High\s*/\s*Low\s*:?\s*₹?\s*([\d,]+(?:\.\d+)?)\s*/\s*₹?\s*([\d,]+(?:\.\d+)?)")
        .expect("valid high/low regex")
});

// Valuation.

pub static STOCK_PE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Stock\s+)?P/E[\s:]*([\d,]+(?:\.\d+)?)").expect("valid p/e regex")
});

pub static BOOK_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Book\s+Value[\s:]*₹?\s*([\d,]+(?:\.\d+)?)").expect("valid book value regex")
});

pub static FACE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Face\s+Value[\s:]*₹?\s*([\d,]+(?:\.\d+)?)").expect("valid face value regex")
});

/// Explicit price-to-book statement; outranks the derived ratio.
pub static BOOK_VALUE_MULTIPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)trading\s+at\s+([\d,]+(?:\.\d+)?)\s+times\s+its\s+book\s+value")
        .expect("valid book value multiple regex")
});

// Financial strength.

pub static MARKET_CAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Market\s+Cap[\s:]*(₹?\s*[\d,]+(?:\.\d+)?\s*Cr\.?)")
        .expect("valid market cap regex")
});

/// Peer-table variant of the market cap label; the amount is a plain
/// crore figure that needs regrouped display formatting.
pub static MARKET_CAP_ALT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Mar\.?\s*Cap\s*Rs\.?\s*Cr\.?[\s:]*([\d,]+(?:\.\d+)?)")
        .expect("valid alternate market cap regex")
});

pub static PROFIT_AND_LOSS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Profit\s*&\s*Loss").expect("valid profit & loss regex"));

pub static TTM_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bTTM\b").expect("valid ttm regex"));

/// Row capture: everything after the label to end of line; the rightmost
/// parseable token is the trailing-twelve-month figure.
pub static EPS_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)EPS\s+in\s+Rs\.?([^\r\n]*)").expect("valid eps row regex"));

pub static ROE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bROE\b\s*%?[\s:]*(-?[\d,]+(?:\.\d+)?)\s*%").expect("valid roe regex")
});

pub static ROCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bROCE\b\s*%?[\s:]*(-?[\d,]+(?:\.\d+)?)\s*%").expect("valid roce regex")
});

// Growth.

pub static SALES_GROWTH_TTM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Compounded\s+Sales\s+Growth.*?TTM\s*:\s*(-?[\d,]+(?:\.\d+)?)\s*%")
        .expect("valid sales growth regex")
});

pub static SALES_GROWTH_TTM_LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Compounded\s+Sales\s+Growth.*?TTM.*?(-?[\d,]+(?:\.\d+)?)\s*%")
        .expect("valid loose sales growth regex")
});

pub static PROFIT_GROWTH_TTM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Compounded\s+Profit\s+Growth.*?TTM\s*:\s*(-?[\d,]+(?:\.\d+)?)\s*%")
        .expect("valid profit growth regex")
});

pub static PROFIT_GROWTH_TTM_LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Compounded\s+Profit\s+Growth.*?TTM.*?(-?[\d,]+(?:\.\d+)?)\s*%")
        .expect("valid loose profit growth regex")
});

/// Margin row: financing companies title it "Financing Margin %", every
/// other listing shows "OPM %".
pub static MARGIN_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Financing\s+Margin|OPM)\s*%([^\r\n]*)").expect("valid margin row regex")
});

// Shareholding.
//
// Quarter rows read oldest to newest; the optional `+` is the expansion
// marker copied from the collapsible holder rows.

pub static PROMOTER_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*Promoters?\b[ \t]*\+?[ \t]*((?:-?[\d,]+(?:\.\d+)?%[ \t]*)+)")
        .expect("valid promoter row regex")
});

pub static FII_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*FIIs?\b[ \t]*\+?[ \t]*((?:-?[\d,]+(?:\.\d+)?%[ \t]*)+)")
        .expect("valid fii row regex")
});

pub static DII_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*DIIs?\b[ \t]*\+?[ \t]*((?:-?[\d,]+(?:\.\d+)?%[ \t]*)+)")
        .expect("valid dii row regex")
});

pub static PUBLIC_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*Public\b[ \t]*\+?[ \t]*((?:-?[\d,]+(?:\.\d+)?%[ \t]*)+)")
        .expect("valid public row regex")
});

// Corporate signals.

pub static RESULT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Upcoming\s+result\s+date\s*:?\s*(\d{1,2}[\s-]*[A-Za-z]{3,9}[\s-]*\d{2,4})")
        .expect("valid result date regex")
});

pub static DATE_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}[\s-]*[A-Za-z]{3,9}[\s-]*\d{2,4})").expect("valid date fragment regex")
});

pub static ESOP_ALLOTMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:ESOP|ESPS)\b").expect("valid esop regex"));

pub static DIVIDEND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdividend\b").expect("valid dividend regex"));

pub static BONUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bbonus\b").expect("valid bonus regex"));

pub static SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsplit\b").expect("valid split regex"));

pub static BOARD_MEETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)board\s+(?:meeting|of\s+directors)").expect("valid board meeting regex")
});

pub static SEBI_INTIMATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bsebi\b|regulatory\s+intimation").expect("valid sebi regex")
});

pub static RBI_APPROVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\brbi\b.{0,80}?approv(?:al|ed|es)").expect("valid rbi approval regex")
});
