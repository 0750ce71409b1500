//! Valuation extractor.

use crate::extract::numeric::round2;
use crate::extract::patterns::{
    extract_number, BOOK_VALUE, BOOK_VALUE_MULTIPLE, CURRENCY_AMOUNT, FACE_VALUE, STOCK_PE,
};
use crate::extract::record::Valuation;

/// Labeled ratios plus the derived price-to-book.
///
/// Price-to-book is `price / book value` rounded to two decimals, and
/// only when book value is positive. An explicit "trading at N times
/// its book value" statement outranks the derived figure.
pub fn extract(text: &str) -> Valuation {
    let pe_ratio = extract_number(text, &STOCK_PE);
    let book_value = extract_number(text, &BOOK_VALUE);
    let face_value = extract_number(text, &FACE_VALUE);

    let price = extract_number(text, &CURRENCY_AMOUNT);
    let derived = match (price, book_value) {
        (Some(price), Some(book)) if book > 0.0 => Some(round2(price / book)),
        _ => None,
    };
    let pb_ratio = extract_number(text, &BOOK_VALUE_MULTIPLE).or(derived);

    Valuation {
        pe_ratio,
        book_value,
        face_value,
        pb_ratio,
    }
}
