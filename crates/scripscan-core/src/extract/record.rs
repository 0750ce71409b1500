//! Extracted-report data model.
//!
//! Every field is optional: extraction never fails a section, it just
//! leaves holes. `None` serializes as an explicit `null` so downstream
//! consumers can tell "not found" from "not requested".

use serde::{Deserialize, Serialize};

/// Placeholder rendered for any field that could not be extracted.
pub const ABSENT_PLACEHOLDER: &str = "N/A";

/// Price block: current market price and the 52-week band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceVolume {
    pub cmp: Option<f64>,
    pub high_52w: Option<f64>,
    pub low_52w: Option<f64>,
}

/// Valuation ratios, including the derived price-to-book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub pe_ratio: Option<f64>,
    pub book_value: Option<f64>,
    pub face_value: Option<f64>,
    pub pb_ratio: Option<f64>,
}

/// Size and profitability figures.
///
/// `market_cap` stays a display string: the source shows it with Indian
/// digit grouping and a crore suffix, and reformatting a number would
/// lose that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStrength {
    pub market_cap: Option<String>,
    pub eps_ttm: Option<f64>,
    pub roe: Option<f64>,
    pub roce: Option<f64>,
}

/// Trailing-twelve-month growth rates and the operating margin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Growth {
    pub sales_growth_ttm: Option<f64>,
    pub profit_growth_ttm: Option<f64>,
    pub operating_margin: Option<f64>,
}

/// Ownership split from the latest quarter plus the promoter delta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shareholding {
    pub promoter: Option<f64>,
    pub fii: Option<f64>,
    pub dii: Option<f64>,
    pub public: Option<f64>,
    pub promoter_change: Option<f64>,
}

/// Event signals: scheduled results, announced actions, filings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorporateSignals {
    pub result_date: Option<String>,
    pub corporate_action: Option<String>,
    pub has_announcement: bool,
    pub headline: Option<String>,
}

/// A field's value viewed uniformly for counting and display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldView<'a> {
    Number(Option<f64>),
    Text(Option<&'a str>),
    Flag(bool),
}

impl FieldView<'_> {
    /// Whether the field holds a real value. A boolean flag is always
    /// present (false is an answer, not a hole), and placeholder text
    /// counts as absent.
    pub fn is_present(&self) -> bool {
        match self {
            FieldView::Number(value) => value.is_some(),
            FieldView::Text(value) => {
                value.is_some_and(|text| text != ABSENT_PLACEHOLDER)
            }
            FieldView::Flag(_) => true,
        }
    }
}

impl PriceVolume {
    pub fn fields(&self) -> [(&'static str, FieldView<'_>); 3] {
        [
            ("cmp", FieldView::Number(self.cmp)),
            ("high_52w", FieldView::Number(self.high_52w)),
            ("low_52w", FieldView::Number(self.low_52w)),
        ]
    }
}

impl Valuation {
    pub fn fields(&self) -> [(&'static str, FieldView<'_>); 4] {
        [
            ("pe_ratio", FieldView::Number(self.pe_ratio)),
            ("book_value", FieldView::Number(self.book_value)),
            ("face_value", FieldView::Number(self.face_value)),
            ("pb_ratio", FieldView::Number(self.pb_ratio)),
        ]
    }
}

impl FinancialStrength {
    pub fn fields(&self) -> [(&'static str, FieldView<'_>); 4] {
        [
            ("market_cap", FieldView::Text(self.market_cap.as_deref())),
            ("eps_ttm", FieldView::Number(self.eps_ttm)),
            ("roe", FieldView::Number(self.roe)),
            ("roce", FieldView::Number(self.roce)),
        ]
    }
}

impl Growth {
    pub fn fields(&self) -> [(&'static str, FieldView<'_>); 3] {
        [
            ("sales_growth_ttm", FieldView::Number(self.sales_growth_ttm)),
            ("profit_growth_ttm", FieldView::Number(self.profit_growth_ttm)),
            ("operating_margin", FieldView::Number(self.operating_margin)),
        ]
    }
}

impl Shareholding {
    pub fn fields(&self) -> [(&'static str, FieldView<'_>); 5] {
        [
            ("promoter", FieldView::Number(self.promoter)),
            ("fii", FieldView::Number(self.fii)),
            ("dii", FieldView::Number(self.dii)),
            ("public", FieldView::Number(self.public)),
            ("promoter_change", FieldView::Number(self.promoter_change)),
        ]
    }
}

impl CorporateSignals {
    pub fn fields(&self) -> [(&'static str, FieldView<'_>); 4] {
        [
            ("result_date", FieldView::Text(self.result_date.as_deref())),
            (
                "corporate_action",
                FieldView::Text(self.corporate_action.as_deref()),
            ),
            ("has_announcement", FieldView::Flag(self.has_announcement)),
            ("headline", FieldView::Text(self.headline.as_deref())),
        ]
    }
}

/// How many of the schema's fields were actually found.
///
/// `total` is a schema constant, not a per-input count: a report with
/// nothing extracted still reports the full denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessSummary {
    pub total: u32,
    pub extracted: u32,
}

impl CompletenessSummary {
    /// Schema field count across all six sections.
    pub const TOTAL: u32 = 23;
}

/// Everything one report parse produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub price_volume: PriceVolume,
    pub valuation: Valuation,
    pub financial_strength: FinancialStrength,
    pub growth: Growth,
    pub shareholding: Shareholding,
    pub corporate_signals: CorporateSignals,
    pub completeness: CompletenessSummary,
}

impl Default for CompletenessSummary {
    fn default() -> Self {
        Self {
            total: Self::TOTAL,
            extracted: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_matches_sum_of_section_field_counts() {
        let record = StockRecord::default();
        let count = record.price_volume.fields().len()
            + record.valuation.fields().len()
            + record.financial_strength.fields().len()
            + record.growth.fields().len()
            + record.shareholding.fields().len()
            + record.corporate_signals.fields().len();
        assert_eq!(count as u32, CompletenessSummary::TOTAL);
    }

    #[test]
    fn flag_fields_always_count_as_present() {
        assert!(FieldView::Flag(false).is_present());
        assert!(FieldView::Flag(true).is_present());
    }

    #[test]
    fn placeholder_text_counts_as_absent() {
        assert!(!FieldView::Text(Some(ABSENT_PLACEHOLDER)).is_present());
        assert!(FieldView::Text(Some("25 Jul 2024")).is_present());
        assert!(!FieldView::Text(None).is_present());
    }

    #[test]
    fn absent_numbers_serialize_as_null() {
        let json = serde_json::to_value(PriceVolume::default())
            .expect("price block should serialize");
        assert!(json.get("cmp").is_some_and(serde_json::Value::is_null));
    }
}
