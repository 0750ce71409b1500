//! Behavior-driven tests for research text extraction
//!
//! These tests verify HOW the system turns a raw fundamentals paste into
//! a structured record, focusing on normalization, derived metrics,
//! priority rules, and completeness accounting.

use scripscan_core::{display_fields, parse_numeric_token, parse_report, ExtractError, Shareholding};

fn fragments() -> String {
    [
        "₹ 937",
        "Stock P/E",
        "20.3",
        "Book Value",
        "₹ 337",
        "ROE",
        "14.3 %",
        "Promoters +\t25.59%\t25.52%",
    ]
    .join("\n")
}

fn full_page() -> String {
    [
        "HDFC Bank Ltd",
        "₹ 937",
        "High / Low: ₹ 1,012 / ₹ 801.5",
        "Market Cap",
        "₹ 14,41,457 Cr.",
        "Stock P/E",
        "20.3",
        "Book Value",
        "₹ 337",
        "Face Value",
        "₹ 1.00",
        "ROE",
        "14.3 %",
        "ROCE",
        "7.67 %",
        "Profit & Loss",
        "\tMar 2023\tMar 2024\tTTM",
        "EPS in Rs.\t45.2\t48.1\t61.2",
        "OPM %\t21.0\t22.5\t23.4",
        "Compounded Sales Growth",
        "TTM:\t12.5%",
        "Compounded Profit Growth",
        "TTM:\t-8.4%",
        "Shareholding Pattern",
        "\tJun 2024\tSep 2024",
        "Promoters +\t25.59%\t25.52%",
        "FIIs +\t33.15%\t32.50%",
        "DIIs +\t21.64%\t22.83%",
        "Public +\t19.62%\t19.15%",
        "Upcoming result date: 18 October 2025",
        "Allotment of equity shares under ESOP - 12 Aug 2025",
        "Board Meeting Intimation received",
    ]
    .join("\n")
}

// =============================================================================
// Normalization: Indian-format numbers
// =============================================================================

#[test]
fn when_a_number_uses_indian_grouping_commas_are_collapsed() {
    // Given: lakh/crore style grouping as Screener prints it
    assert_eq!(parse_numeric_token("14,41,457"), Some(1441457.0));
    assert_eq!(parse_numeric_token("1,012"), Some(1012.0));
}

#[test]
fn when_a_number_carries_currency_or_percent_decoration_it_still_parses() {
    assert_eq!(parse_numeric_token("₹ 937"), Some(937.0));
    assert_eq!(parse_numeric_token("12.5%"), Some(12.5));
    assert_eq!(parse_numeric_token("-0.07%"), Some(-0.07));
}

#[test]
fn when_a_token_is_not_numeric_the_result_is_absence_not_zero() {
    assert_eq!(parse_numeric_token("garbage"), None);
    assert_eq!(parse_numeric_token(""), None);
    assert_eq!(parse_numeric_token("-"), None);
    assert_eq!(parse_numeric_token("₹"), None);
}

// =============================================================================
// Report parsing: end-to-end scenarios
// =============================================================================

#[test]
fn when_price_fragments_are_pasted_the_headline_metrics_come_back() {
    // Given: the handful of lines a user copies from a quote header

    // When: the paste is parsed
    let record = parse_report(&fragments()).expect("fragments should parse");

    // Then: every pasted metric lands in its section
    assert_eq!(record.price_volume.cmp, Some(937.0));
    assert_eq!(record.valuation.pe_ratio, Some(20.3));
    assert_eq!(record.valuation.book_value, Some(337.0));
    assert_eq!(record.valuation.pb_ratio, Some(2.78), "937 / 337 rounded");
    assert_eq!(record.financial_strength.roe, Some(14.3));
    assert_eq!(record.shareholding.promoter, Some(25.52));
    assert_eq!(record.shareholding.promoter_change, Some(-0.07));

    // And: metrics that were never pasted stay absent
    assert_eq!(record.financial_strength.market_cap, None);
    assert_eq!(record.financial_strength.eps_ttm, None);
    assert_eq!(record.growth.sales_growth_ttm, None);
    assert_eq!(record.corporate_signals.result_date, None);
}

#[test]
fn when_a_full_research_page_is_pasted_every_schema_field_is_filled() {
    // Given: a complete fundamentals page paste

    // When: the paste is parsed
    let record = parse_report(&full_page()).expect("full page should parse");

    // Then: the completeness summary reports a full house
    assert_eq!(record.completeness.total, 23);
    assert_eq!(record.completeness.extracted, 23);

    // And: spot checks across sections hold
    assert_eq!(record.price_volume.high_52w, Some(1012.0));
    assert_eq!(record.price_volume.low_52w, Some(801.5));
    assert_eq!(
        record.financial_strength.market_cap.as_deref(),
        Some("₹ 14,41,457 Cr.")
    );
    assert_eq!(record.financial_strength.eps_ttm, Some(61.2));
    assert_eq!(record.growth.sales_growth_ttm, Some(12.5));
    assert_eq!(record.growth.profit_growth_ttm, Some(-8.4));
    assert_eq!(record.growth.operating_margin, Some(23.4));
    assert_eq!(record.shareholding.fii, Some(32.5));
    assert_eq!(record.shareholding.public, Some(19.15));
    assert_eq!(
        record.corporate_signals.result_date.as_deref(),
        Some("18 October 2025")
    );
    assert_eq!(
        record.corporate_signals.corporate_action.as_deref(),
        Some("ESOP/ESPS Allotment (12 Aug 2025)")
    );
    assert!(record.corporate_signals.has_announcement);
    assert_eq!(
        record.corporate_signals.headline.as_deref(),
        Some("Board Meeting Intimation received")
    );
}

#[test]
fn when_the_same_text_is_parsed_twice_the_records_are_identical() {
    let first = parse_report(&full_page()).expect("first parse");
    let second = parse_report(&full_page()).expect("second parse");
    assert_eq!(first, second);
}

#[test]
fn when_the_paste_is_empty_parsing_fails() {
    assert!(matches!(parse_report(""), Err(ExtractError::EmptyInput)));
    assert!(matches!(
        parse_report("   \n\t  "),
        Err(ExtractError::EmptyInput)
    ));
}

#[test]
fn when_shareholding_rows_are_missing_other_sections_are_unaffected() {
    // Given: a paste with valuation lines but no holder table
    let record = parse_report("₹ 937\nBook Value\n₹ 337").expect("should parse");

    // Then: every holder field is absent while valuation still fills in
    assert_eq!(record.shareholding, Shareholding::default());
    assert_eq!(record.price_volume.cmp, Some(937.0));
    assert_eq!(record.valuation.pb_ratio, Some(2.78));
}

#[test]
fn when_the_paste_has_no_recognizable_metrics_a_sparse_record_comes_back() {
    // Given: prose with no financial markers at all
    let record =
        parse_report("nothing resembling a fundamentals page").expect("prose should parse");

    // Then: only the always-present announcement flag counts
    assert_eq!(record.completeness.extracted, 1);
    assert!(!record.corporate_signals.has_announcement);
}

// =============================================================================
// Derived metrics: price-to-book
// =============================================================================

#[test]
fn when_price_and_book_value_are_present_pb_is_derived() {
    let record = parse_report("₹ 937\nBook Value\n₹ 337").expect("should parse");
    assert_eq!(record.valuation.pb_ratio, Some(2.78));
}

#[test]
fn when_the_page_states_a_book_value_multiple_it_overrides_the_derived_ratio() {
    let text = "₹ 937\nBook Value\n₹ 337\nThe stock is trading at 3.5 times its book value.";
    let record = parse_report(text).expect("should parse");
    assert_eq!(record.valuation.pb_ratio, Some(3.5));
}

#[test]
fn when_book_value_is_zero_no_ratio_is_derived() {
    let record = parse_report("₹ 937\nBook Value\n₹ 0").expect("should parse");
    assert_eq!(record.valuation.book_value, Some(0.0));
    assert_eq!(record.valuation.pb_ratio, None);
}

// =============================================================================
// Corporate actions: priority order
// =============================================================================

#[test]
fn when_dividend_appears_before_esop_the_esop_label_still_wins() {
    // Given: a filing where the dividend is mentioned first
    let text = "The board approved a dividend of ₹ 19.5 per share and the \
                allotment of 1,20,000 equity shares under the ESOP plan.";

    let record = parse_report(text).expect("should parse");

    // Then: allotments outrank dividends regardless of position
    assert_eq!(
        record.corporate_signals.corporate_action.as_deref(),
        Some("ESOP/ESPS Allotment")
    );
}

#[test]
fn when_split_appears_before_bonus_the_bonus_label_still_wins() {
    let text = "Stock split in the ratio of 1:10 announced alongside a bonus issue.";
    let record = parse_report(text).expect("should parse");
    assert_eq!(
        record.corporate_signals.corporate_action.as_deref(),
        Some("Bonus Issue")
    );
}

// =============================================================================
// Completeness accounting
// =============================================================================

#[test]
fn extracted_count_never_exceeds_the_schema_total() {
    for text in [
        full_page(),
        fragments(),
        String::from("no finance words here"),
    ] {
        let record = parse_report(&text).expect("should parse");
        assert_eq!(record.completeness.total, 23, "schema total is fixed");
        assert!(
            record.completeness.extracted <= record.completeness.total,
            "extracted {} exceeds total for {:?}",
            record.completeness.extracted,
            text
        );
    }
}

// =============================================================================
// Presentation mapping
// =============================================================================

#[test]
fn when_a_record_is_displayed_absent_fields_read_na() {
    let record = parse_report(&fragments()).expect("should parse");
    let fields = display_fields(&record);

    assert_eq!(fields.len(), 23);

    let value = |label: &str| {
        fields
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, value)| value.as_str())
            .expect("label should exist")
    };

    assert_eq!(value("CMP"), "₹ 937");
    assert_eq!(value("Face Value"), "N/A");
    assert_eq!(value("Market Cap"), "N/A");
    assert_eq!(value("Promoter Change (QoQ)"), "-0.07%");
    assert_eq!(value("Announcement"), "No");
}

// =============================================================================
// Serialized contract
// =============================================================================

#[test]
fn when_a_record_is_serialized_the_section_layout_is_stable() {
    let record = parse_report(&fragments()).expect("should parse");

    let payload = serde_json::to_value(&record).expect("record serializes");

    assert_eq!(payload["price_volume"]["cmp"], 937.0);
    assert_eq!(payload["valuation"]["pb_ratio"], 2.78);
    assert_eq!(payload["shareholding"]["promoter_change"], -0.07);
    // Absent fields serialize as explicit nulls, not missing keys.
    assert!(payload["price_volume"]["high_52w"].is_null());
    assert_eq!(payload["completeness"]["total"], 23);
}
