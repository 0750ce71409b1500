use std::fs;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(
    output: &CommandOutput,
    format: OutputFormat,
    pretty: bool,
    out: Option<&Path>,
) -> Result<(), CliError> {
    let rendered = match format {
        OutputFormat::Json => render_json(output, pretty)?,
        OutputFormat::Table => render_table(output)?,
    };

    match out {
        Some(path) => fs::write(path, rendered.as_bytes())?,
        None => print!("{rendered}"),
    }

    Ok(())
}

fn render_json(output: &CommandOutput, pretty: bool) -> Result<String, CliError> {
    let mut payload = if pretty {
        serde_json::to_string_pretty(&output.envelope)?
    } else {
        serde_json::to_string(&output.envelope)?
    };
    payload.push('\n');
    Ok(payload)
}

fn render_table(output: &CommandOutput) -> Result<String, CliError> {
    let envelope = &output.envelope;
    let mut rendered = String::new();

    rendered.push_str(&format!("request_id  : {}\n", envelope.meta.request_id));
    if let Some(trace_id) = &envelope.meta.trace_id {
        rendered.push_str(&format!("trace_id    : {trace_id}\n"));
    }
    rendered.push_str(&format!("schema      : {}\n", envelope.meta.schema_version));
    rendered.push_str(&format!("generated_at: {}\n", envelope.meta.generated_at));
    rendered.push_str(&format!(
        "sources     : {}\n",
        envelope
            .meta
            .source_chain
            .iter()
            .map(|source| source.as_str())
            .collect::<Vec<_>>()
            .join(",")
    ));
    rendered.push_str(&format!("latency_ms  : {}\n", envelope.meta.latency_ms));

    if !envelope.meta.warnings.is_empty() {
        rendered.push_str("warnings:\n");
        for warning in &envelope.meta.warnings {
            rendered.push_str(&format!("  - {warning}\n"));
        }
    }

    if output.table.is_empty() {
        rendered.push_str("data:\n");
        let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
        for line in pretty_data.lines() {
            rendered.push_str(&format!("  {line}\n"));
        }
    } else {
        rendered.push_str("fields:\n");
        let width = output
            .table
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        for (label, value) in &output.table {
            rendered.push_str(&format!("  {label:<width$} : {value}\n"));
        }
    }

    if !envelope.errors.is_empty() {
        rendered.push_str("errors:\n");
        for error in &envelope.errors {
            rendered.push_str(&format!("  - {}: {}\n", error.code, error.message));
        }
    }

    Ok(rendered)
}
