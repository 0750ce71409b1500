//! Shareholding pattern extractor.

use regex::Regex;

use crate::extract::numeric::{parse_numeric_token, round2};
use crate::extract::patterns::{DII_ROW, FII_ROW, PROMOTER_ROW, PUBLIC_ROW};
use crate::extract::record::Shareholding;

/// Holder rows run oldest quarter to newest, so the last token of each
/// row is the current value. The promoter row additionally yields the
/// quarter-over-quarter change when two or more quarters are present.
pub fn extract(text: &str) -> Shareholding {
    let promoters = quarter_series(text, &PROMOTER_ROW);

    let promoter_change = match promoters.as_slice() {
        [.., previous, latest] => Some(round2(latest - previous)),
        _ => None,
    };

    Shareholding {
        promoter: promoters.last().copied(),
        fii: quarter_series(text, &FII_ROW).last().copied(),
        dii: quarter_series(text, &DII_ROW).last().copied(),
        public: quarter_series(text, &PUBLIC_ROW).last().copied(),
        promoter_change,
    }
}

fn quarter_series(text: &str, pattern: &Regex) -> Vec<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .split_whitespace()
                .filter_map(parse_numeric_token)
                .collect()
        })
        .unwrap_or_default()
}
