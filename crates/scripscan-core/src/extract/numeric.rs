//! Locale-tolerant numeric token handling.
//!
//! Pasted fundamentals text mixes Indian-grouped amounts (`14,41,457`),
//! currency glyphs (`₹ 937`), and percentage suffixes (`12.5%`), often
//! with stray whitespace from browser copy behavior. Everything here is
//! pure and total: a token that does not normalize yields `None`.

/// Parse one locale-formatted numeric token into a plain finite `f64`.
///
/// Strips currency prefixes (`₹`, `Rs.`, `Rs`), all interior whitespace,
/// every grouping comma, and one trailing `%`. Grouping structure is not
/// validated, so Indian and Western comma placement parse identically.
pub fn parse_numeric_token(raw: &str) -> Option<f64> {
    let compact: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();

    let stripped = compact
        .strip_prefix('₹')
        .or_else(|| compact.strip_prefix("Rs."))
        .or_else(|| compact.strip_prefix("Rs"))
        .unwrap_or(&compact);
    let stripped = stripped.strip_suffix('%').unwrap_or(stripped);

    let plain: String = stripped.chars().filter(|ch| *ch != ',').collect();
    if plain.is_empty() {
        return None;
    }

    plain.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format the rounded integer part of `value` with Indian digit grouping:
/// the last three digits form one group, every group before that has two
/// (`1441457` becomes `14,41,457`).
pub fn format_indian_grouping(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    let len = digits.len();
    for (index, ch) in digits.chars().enumerate() {
        let from_right = len - index;
        let boundary =
            index > 0 && (from_right == 3 || (from_right > 3 && (from_right - 3) % 2 == 0));
        if boundary {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Rightmost whitespace-delimited token of `row` that parses as a
/// number. Placeholder tokens such as bare hyphens are skipped, so a
/// blank trailing column does not hide the latest figure.
pub fn last_numeric_token(row: &str) -> Option<f64> {
    row.split_whitespace().rev().find_map(parse_numeric_token)
}
