//! Corporate event extractor.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::patterns::{
    extract_string, BOARD_MEETING, BONUS, DATE_FRAGMENT, DIVIDEND, ESOP_ALLOTMENT, RBI_APPROVAL,
    RESULT_DATE, SEBI_INTIMATION, SPLIT,
};
use crate::extract::record::CorporateSignals;

/// Characters of context captured after an announcement match.
const HEADLINE_CONTEXT: usize = 100;

/// Bytes scanned past an action keyword for its date fragment.
const ACTION_DATE_WINDOW: usize = 80;

/// Action keywords in precedence order. An earlier entry wins even when
/// a later keyword appears first in the text: an ESOP allotment filing
/// routinely mentions dividends and splits in boilerplate, so position
/// is not a reliable signal.
static ACTION_PRIORITY: [(&LazyLock<Regex>, &str); 4] = [
    (&ESOP_ALLOTMENT, "ESOP/ESPS Allotment"),
    (&DIVIDEND, "Dividend"),
    (&BONUS, "Bonus Issue"),
    (&SPLIT, "Stock Split"),
];

pub fn extract(text: &str) -> CorporateSignals {
    let (has_announcement, headline) = announcement(text);

    CorporateSignals {
        result_date: extract_string(text, &RESULT_DATE),
        corporate_action: corporate_action(text),
        has_announcement,
        headline,
    }
}

/// First keyword in precedence order, labeled with the nearest date
/// fragment after it when one exists.
fn corporate_action(text: &str) -> Option<String> {
    for (pattern, label) in ACTION_PRIORITY {
        let Some(found) = pattern.find(text) else {
            continue;
        };
        let window_end = clamp_to_char_boundary(text, found.end() + ACTION_DATE_WINDOW);
        let window = &text[found.end()..window_end];
        return Some(match extract_string(window, &DATE_FRAGMENT) {
            Some(date) => format!("{label} ({date})"),
            None => label.to_owned(),
        });
    }
    None
}

/// Board-meeting and SEBI phrases are checked in order and the first
/// match supplies the headline. The RBI check always contributes to the
/// flag but fills the headline only when nothing else captured one.
fn announcement(text: &str) -> (bool, Option<String>) {
    let mut has_announcement = false;
    let mut headline = None;

    for pattern in [&BOARD_MEETING, &SEBI_INTIMATION] {
        if let Some(found) = pattern.find(text) {
            has_announcement = true;
            headline = Some(headline_from(text, found.start()));
            break;
        }
    }

    if let Some(found) = RBI_APPROVAL.find(text) {
        has_announcement = true;
        if headline.is_none() {
            headline = Some(headline_from(text, found.start()));
        }
    }

    (has_announcement, headline)
}

/// Up to [`HEADLINE_CONTEXT`] characters from the match onward, with
/// runs of whitespace collapsed to single spaces.
fn headline_from(text: &str, start: usize) -> String {
    let snippet: String = text[start..].chars().take(HEADLINE_CONTEXT).collect();
    snippet.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clamp_to_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_upcoming_result_date() {
        let block = extract("Upcoming result date: 25 Jul 2024");
        assert_eq!(block.result_date.as_deref(), Some("25 Jul 2024"));
    }

    #[test]
    fn esop_outranks_dividend_regardless_of_position() {
        let text = "Dividend of ₹ 5 declared. Allotment of shares under ESOP scheme.";
        let block = extract(text);
        assert_eq!(block.corporate_action.as_deref(), Some("ESOP/ESPS Allotment"));
    }

    #[test]
    fn action_carries_a_nearby_date_fragment() {
        let text = "Dividend of ₹ 5 per share, record date 25-Jul-2024.";
        let block = extract(text);
        assert_eq!(block.corporate_action.as_deref(), Some("Dividend (25-Jul-2024)"));
    }

    #[test]
    fn action_without_a_date_is_the_bare_label() {
        let block = extract("Approved bonus issue of equity shares.");
        assert_eq!(block.corporate_action.as_deref(), Some("Bonus Issue"));
    }

    #[test]
    fn board_meeting_headline_wins_over_rbi() {
        let text = "Intimation of board meeting to approve results. RBI approval received.";
        let block = extract(text);
        assert!(block.has_announcement);
        let headline = block.headline.expect("board match should set headline");
        assert!(headline.starts_with("board meeting"));
    }

    #[test]
    fn rbi_alone_sets_flag_and_headline() {
        let block = extract("RBI approval received for the proposed acquisition.");
        assert!(block.has_announcement);
        let headline = block.headline.expect("rbi match should set headline");
        assert!(headline.starts_with("RBI approval"));
    }

    #[test]
    fn headline_collapses_whitespace_runs() {
        let text = "Intimation of board\tmeeting\n\nscheduled for next week";
        let block = extract(text);
        assert_eq!(
            block.headline.as_deref(),
            Some("board meeting scheduled for next week"),
        );
    }

    #[test]
    fn quiet_text_has_no_signals() {
        let block = extract("plain commentary with no filings");
        assert!(!block.has_announcement);
        assert_eq!(block.headline, None);
        assert_eq!(block.corporate_action, None);
    }
}
