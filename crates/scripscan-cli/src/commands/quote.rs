use std::time::Instant;

use scripscan_core::{LiveQuote, NseClient, SourceId, Symbol};
use serde_json::Value;

use crate::cli::QuoteArgs;
use crate::error::CliError;

use super::{
    fetch_error_to_envelope, http_client, rupee_or_absent, text_or_absent, volume_or_absent,
    CommandResult,
};

pub async fn run(args: &QuoteArgs, timeout_ms: u64) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;

    let client = NseClient::new(http_client()).with_timeout_ms(timeout_ms);

    let started = Instant::now();
    match client.quote(&symbol).await {
        Ok(quote) => {
            let latency_ms = started.elapsed().as_millis() as u64;
            let table = quote_table(&quote);
            let data = serde_json::to_value(&quote)?;

            Ok(CommandResult::ok(data, vec![SourceId::Nse])
                .with_latency(latency_ms)
                .with_table(table))
        }
        Err(error) => {
            // The failure travels inside the envelope; exit code policy
            // is decided by --strict, not here.
            let latency_ms = started.elapsed().as_millis() as u64;
            let envelope_error = fetch_error_to_envelope(&error, SourceId::Nse)?;

            Ok(CommandResult::ok(Value::Null, vec![SourceId::Nse])
                .with_errors(vec![envelope_error])
                .with_latency(latency_ms))
        }
    }
}

fn quote_table(quote: &LiveQuote) -> Vec<(&'static str, String)> {
    vec![
        ("Symbol", quote.symbol.as_str().to_owned()),
        ("Company", text_or_absent(quote.company_name.as_deref())),
        ("Last Price", format!("₹ {}", quote.last_price)),
        ("Open", rupee_or_absent(quote.open)),
        ("Prev Close", rupee_or_absent(quote.prev_close)),
        ("Day High", rupee_or_absent(quote.day_high)),
        ("Day Low", rupee_or_absent(quote.day_low)),
        ("Volume", volume_or_absent(quote.volume)),
        ("As Of", quote.as_of.to_string()),
    ]
}
