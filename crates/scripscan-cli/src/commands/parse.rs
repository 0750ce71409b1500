use std::fs;
use std::io::Read;
use std::time::Instant;

use scripscan_core::{display_fields, parse_report, SourceId};

use crate::cli::ParseArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &ParseArgs) -> Result<CommandResult, CliError> {
    let started = Instant::now();

    let text = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let record = parse_report(&text)?;
    let latency_ms = started.elapsed().as_millis() as u64;

    let completeness = record.completeness;
    let mut table = display_fields(&record);
    table.push((
        "Fields Extracted",
        format!("{} of {}", completeness.extracted, completeness.total),
    ));

    let data = serde_json::to_value(&record)?;

    let mut result = CommandResult::ok(data, vec![SourceId::Paste])
        .with_latency(latency_ms)
        .with_table(table);

    if completeness.extracted < completeness.total {
        result = result.with_warning(format!(
            "extracted {} of {} fields",
            completeness.extracted, completeness.total
        ));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_a_text_file_into_an_extraction_payload() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "₹ 937\nStock P/E\n20.3\nBook Value\n₹ 337").expect("write text");

        let args = ParseArgs {
            file: Some(file.path().to_path_buf()),
        };
        let result = run(&args).expect("parse should succeed");

        assert_eq!(result.source_chain, vec![SourceId::Paste]);
        assert_eq!(result.data["price_volume"]["cmp"], 937.0);
        assert_eq!(result.data["valuation"]["pb_ratio"], 2.78);
        // Most fields are missing, so an incompleteness warning is set.
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("extracted "));
        assert!(result
            .table
            .iter()
            .any(|(label, _)| *label == "Fields Extracted"));
    }

    #[test]
    fn empty_file_maps_to_an_extract_error() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let args = ParseArgs {
            file: Some(file.path().to_path_buf()),
        };

        let error = run(&args).expect_err("empty input should fail");
        assert!(matches!(error, CliError::Extract(_)));
        assert_eq!(error.exit_code(), 2);
    }
}
