mod parse;
mod quote;
mod report;

use std::sync::Arc;

use scripscan_core::{
    format_indian_grouping, Envelope, EnvelopeError, FetchError, HttpClient, ReqwestHttpClient,
    SourceId, ABSENT_PLACEHOLDER,
};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::Metadata;

/// Envelope schema version stamped on every response.
const SCHEMA_VERSION: &str = "v1.0.0";

/// Raw command outcome before envelope assembly.
#[derive(Debug)]
pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
    pub source_chain: Vec<SourceId>,
    pub table: Vec<(&'static str, String)>,
}

impl CommandResult {
    pub fn ok(data: Value, source_chain: Vec<SourceId>) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            latency_ms: 0,
            source_chain,
            table: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_table(mut self, table: Vec<(&'static str, String)>) -> Self {
        self.table = table;
        self
    }
}

/// Finished command outcome: the envelope plus optional table lines.
pub struct CommandOutput {
    pub envelope: Envelope<Value>,
    pub table: Vec<(&'static str, String)>,
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let command_result = match &cli.command {
        Command::Parse(args) => parse::run(args)?,
        Command::Quote(args) => quote::run(args, cli.timeout_ms).await?,
        Command::Report(args) => report::run(args, cli.timeout_ms).await?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
        latency_ms,
        source_chain,
        table,
    } = command_result;

    let mut metadata = Metadata::new(source_chain, latency_ms)?;
    for warning in warnings {
        metadata.push_warning(warning);
    }

    let meta = metadata.into_envelope_meta(SCHEMA_VERSION)?;
    let envelope = Envelope::with_errors(meta, data, errors)?;

    Ok(CommandOutput { envelope, table })
}

/// Shared production transport for the fetch commands.
fn http_client() -> Arc<dyn HttpClient> {
    Arc::new(ReqwestHttpClient::new())
}

/// Lift an adapter failure into an envelope error tagged with its source.
fn fetch_error_to_envelope(
    error: &FetchError,
    source: SourceId,
) -> Result<EnvelopeError, CliError> {
    Ok(EnvelopeError::new(error.code(), error.message())?
        .with_retryable(error.retryable())
        .with_source(source))
}

fn rupee_or_absent(value: Option<f64>) -> String {
    value.map_or_else(
        || ABSENT_PLACEHOLDER.to_owned(),
        |value| format!("₹ {value}"),
    )
}

fn text_or_absent(value: Option<&str>) -> String {
    value.map_or_else(|| ABSENT_PLACEHOLDER.to_owned(), str::to_owned)
}

fn volume_or_absent(value: Option<u64>) -> String {
    value.map_or_else(
        || ABSENT_PLACEHOLDER.to_owned(),
        |value| format_indian_grouping(value as f64),
    )
}
