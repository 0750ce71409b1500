//! Price block extractor.

use crate::extract::numeric::parse_numeric_token;
use crate::extract::patterns::{CURRENCY_AMOUNT, HIGH_LOW};
use crate::extract::record::PriceVolume;

/// The first rupee-prefixed amount on the page is the headline price;
/// the 52-week band comes from the "High / Low" pair.
pub fn extract(text: &str) -> PriceVolume {
    let cmp = CURRENCY_AMOUNT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_numeric_token(m.as_str()));

    let (high_52w, low_52w) = match HIGH_LOW.captures(text) {
        Some(caps) => (
            caps.get(1).and_then(|m| parse_numeric_token(m.as_str())),
            caps.get(2).and_then(|m| parse_numeric_token(m.as_str())),
        ),
        None => (None, None),
    };

    PriceVolume {
        cmp,
        high_52w,
        low_52w,
    }
}
