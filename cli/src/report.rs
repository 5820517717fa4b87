//! Serializable summary of one parse run.

use cmd_parser_core::{CmdParser, ParseError, ParseOutcome};
use serde::Serialize;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Serialize)]
pub struct FlagReport {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct OptionReport {
    pub name: String,
    pub values: Vec<String>,
}

/// Result of parsing an argument vector against a definition.
#[derive(Debug, Serialize)]
pub struct ParseReport {
    pub ok: bool,
    /// `complete`, `help` or `exit`; absent on error.
    pub outcome: Option<&'static str>,
    pub exit_code: Option<i32>,
    pub error: Option<String>,
    pub flags: Vec<FlagReport>,
    pub options: Vec<OptionReport>,
    pub rest: Vec<String>,
}

impl ParseReport {
    /// Captures the parser state after a parse attempt.
    pub fn new(parser: &CmdParser, result: &Result<ParseOutcome, ParseError>) -> Self {
        let (outcome, exit_code) = match result {
            Ok(ParseOutcome::Complete) => (Some("complete"), None),
            Ok(ParseOutcome::Help) => (Some("help"), Some(0)),
            Ok(ParseOutcome::Exit(code)) => (Some("exit"), Some(*code)),
            Err(_) => (None, None),
        };

        Self {
            ok: result.is_ok(),
            outcome,
            exit_code,
            error: result.as_ref().err().map(ToString::to_string),
            flags: parser
                .flag_counts()
                .map(|(item, count)| FlagReport {
                    name: item.long().to_string(),
                    count,
                })
                .collect(),
            options: parser
                .option_values()
                .map(|(item, values)| OptionReport {
                    name: item.long().to_string(),
                    values: values.to_vec(),
                })
                .collect(),
            rest: parser.rest().to_vec(),
        }
    }

    /// Serializes the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String, String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| format!("JSON serialization failed: {e}")),
            OutputFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| format!("YAML serialization failed: {e}"))
            }
        }
    }
}
