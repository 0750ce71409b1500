use std::fs;
use std::time::Instant;

use scripscan_core::{
    display_fields, parse_report, LiveQuote, MarketSnapshot, NseClient, SourceId, StockRecord,
    Symbol, YahooChartClient,
};
use serde::Serialize;

use crate::cli::ReportArgs;
use crate::error::CliError;

use super::{
    fetch_error_to_envelope, http_client, rupee_or_absent, volume_or_absent, CommandResult,
};

/// Combined payload for the `report` command.
#[derive(Debug, Serialize)]
struct ReportData {
    symbol: Symbol,
    quote: Option<LiveQuote>,
    snapshot: Option<MarketSnapshot>,
    extracted: Option<StockRecord>,
}

pub async fn run(args: &ReportArgs, timeout_ms: u64) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    // Pasted research text is parsed up front; a file that fails to
    // read or parse is a command error, not a degraded report.
    let extracted = match &args.text {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|error| {
                CliError::Command(format!("failed to read {}: {error}", path.display()))
            })?;
            Some(parse_report(&text)?)
        }
        None => None,
    };

    let http = http_client();
    let nse = NseClient::new(http.clone()).with_timeout_ms(timeout_ms);
    let yahoo = YahooChartClient::new(http).with_timeout_ms(timeout_ms);

    let started = Instant::now();
    let (quote_result, snapshot_result) =
        tokio::join!(nse.quote(&symbol), yahoo.snapshot(&symbol));
    let latency_ms = started.elapsed().as_millis() as u64;

    let mut source_chain = vec![SourceId::Nse, SourceId::Yahoo];
    if extracted.is_some() {
        source_chain.push(SourceId::Paste);
    }

    let mut errors = Vec::new();
    let quote = match quote_result {
        Ok(quote) => Some(quote),
        Err(error) => {
            errors.push(fetch_error_to_envelope(&error, SourceId::Nse)?);
            None
        }
    };
    let snapshot = match snapshot_result {
        Ok(snapshot) => Some(snapshot),
        Err(error) => {
            errors.push(fetch_error_to_envelope(&error, SourceId::Yahoo)?);
            None
        }
    };

    let incomplete = extracted.as_ref().and_then(|record| {
        let summary = &record.completeness;
        (summary.extracted < summary.total)
            .then(|| format!("extracted {} of {} fields", summary.extracted, summary.total))
    });

    let table = report_table(quote.as_ref(), snapshot.as_ref(), extracted.as_ref());
    let data = serde_json::to_value(ReportData {
        symbol,
        quote,
        snapshot,
        extracted,
    })?;

    let mut result = CommandResult::ok(data, source_chain)
        .with_errors(errors)
        .with_latency(latency_ms)
        .with_table(table);
    if let Some(warning) = incomplete {
        result = result.with_warning(warning);
    }

    Ok(result)
}

fn report_table(
    quote: Option<&LiveQuote>,
    snapshot: Option<&MarketSnapshot>,
    extracted: Option<&StockRecord>,
) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();

    if let Some(quote) = quote {
        rows.push(("NSE Last Price", format!("₹ {}", quote.last_price)));
        rows.push(("NSE Prev Close", rupee_or_absent(quote.prev_close)));
        rows.push(("NSE Volume", volume_or_absent(quote.volume)));
    }
    if let Some(snapshot) = snapshot {
        rows.push((
            "Yahoo Price",
            rupee_or_absent(snapshot.regular_market_price),
        ));
        rows.push((
            "Yahoo 52W High",
            rupee_or_absent(snapshot.fifty_two_week_high),
        ));
        rows.push((
            "Yahoo 52W Low",
            rupee_or_absent(snapshot.fifty_two_week_low),
        ));
    }
    if let Some(record) = extracted {
        rows.extend(display_fields(record));
        rows.push((
            "Fields Extracted",
            format!(
                "{} of {}",
                record.completeness.extracted, record.completeness.total
            ),
        ));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use scripscan_core::UtcDateTime;

    #[test]
    fn report_table_appends_extraction_rows_after_source_rows() {
        let symbol = Symbol::parse("HDFCBANK").expect("valid symbol");
        let snapshot = MarketSnapshot::new(
            symbol,
            Some(String::from("INR")),
            Some(937.0),
            None,
            Some(1012.0),
            Some(801.5),
            UtcDateTime::now(),
        )
        .expect("valid snapshot");
        let record = parse_report("Book Value\n₹ 337").expect("record parses");

        let table = report_table(None, Some(&snapshot), Some(&record));

        assert_eq!(table[0].0, "Yahoo Price");
        assert_eq!(table[0].1, "₹ 937");
        let last = table.last().expect("non-empty table");
        assert_eq!(last.0, "Fields Extracted");
        assert!(last.1.ends_with(" of 23"));
    }

    #[test]
    fn report_table_is_empty_without_any_source() {
        assert!(report_table(None, None, None).is_empty());
    }
}
