//! Report text extraction.
//!
//! Turns pasted research-page text into a [`StockRecord`]:
//!
//! - [`parse_report`] validates the input once, fans out to six
//!   independent section extractors, and scores completeness.
//! - Section extractors are pure `text -> record` functions; they never
//!   fail, they only leave fields absent.
//! - All pattern matching funnels through the primitives in `patterns`
//!   and the token normalizer in `numeric`.

mod corporate_signals;
mod display;
mod financial_strength;
mod growth;
mod numeric;
mod patterns;
mod price_volume;
mod record;
mod shareholding;
mod valuation;

pub use display::display_fields;
pub use numeric::{format_indian_grouping, parse_numeric_token, round2};
pub use patterns::{extract_number, extract_string};
pub use record::{
    CompletenessSummary, CorporateSignals, FieldView, FinancialStrength, Growth, PriceVolume,
    Shareholding, StockRecord, Valuation, ABSENT_PLACEHOLDER,
};

use crate::error::ExtractError;

/// Parses pasted report text into a [`StockRecord`].
///
/// The single validation point: fails only when `text` has no visible
/// characters. Every downstream extractor is total, so any non-empty
/// input yields a record, possibly with every field absent.
pub fn parse_report(text: &str) -> Result<StockRecord, ExtractError> {
    if text.trim().is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    let mut record = StockRecord {
        price_volume: price_volume::extract(text),
        valuation: valuation::extract(text),
        financial_strength: financial_strength::extract(text),
        growth: growth::extract(text),
        shareholding: shareholding::extract(text),
        corporate_signals: corporate_signals::extract(text),
        completeness: CompletenessSummary::default(),
    };
    record.completeness.extracted = extracted_count(&record);

    Ok(record)
}

fn extracted_count(record: &StockRecord) -> u32 {
    count_present(&record.price_volume.fields())
        + count_present(&record.valuation.fields())
        + count_present(&record.financial_strength.fields())
        + count_present(&record.growth.fields())
        + count_present(&record.shareholding.fields())
        + count_present(&record.corporate_signals.fields())
}

fn count_present(fields: &[(&'static str, FieldView<'_>)]) -> u32 {
    fields.iter().filter(|(_, view)| view.is_present()).count() as u32
}
