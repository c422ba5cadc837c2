//! `panlog parse` command handler

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, info_span};

use panlog_core::config::PanlogConfig;
use panlog_core::types::{FieldValue, LogRecord};
use panlog_pan_parser::{PanCodec, PanInputConfig, PanParseError, TemplateSet};

use crate::cli::{OutputFormat, ParseArgs};
use crate::error::CliError;
use crate::output::Render;

/// Execute the `parse` command.
///
/// Records go to stdout; the summary goes to stderr.
pub async fn execute(args: ParseArgs, config: &PanlogConfig) -> Result<(), CliError> {
    let codec = build_codec(config)?;

    let input = read_input(args.input.as_deref()).await?;

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    let summary = parse_input(&input, &codec, args.format, &mut out)?;
    out.flush()?;

    info!(
        lines = summary.lines,
        parsed = summary.parsed,
        dropped = summary.dropped_total(),
        "parse finished"
    );

    let stderr = std::io::stderr();
    summary.render_text(&mut stderr.lock())?;

    Ok(())
}

/// Build the codec from the `[paloalto]` section. Template errors are fatal.
pub fn build_codec(config: &PanlogConfig) -> Result<PanCodec, CliError> {
    let input_config = PanInputConfig::from_core(&config.paloalto)?;
    let templates = TemplateSet::from_config(&input_config)?;
    Ok(PanCodec::new(Arc::new(templates), &input_config))
}

async fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => Ok(tokio::fs::read(path).await?),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Parse every non-blank line of `input` in parallel and write records in input order.
pub fn parse_input(
    input: &[u8],
    codec: &PanCodec,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<ParseSummary, CliError> {
    let lines: Vec<(usize, &[u8])> = input
        .split(|b| *b == b'\n')
        .enumerate()
        .filter(|(_, line)| !line.trim_ascii().is_empty())
        .map(|(idx, line)| (idx + 1, line))
        .collect();

    // the codec counts drops and logs a preview of each dropped line
    let results: Vec<Result<LogRecord, PanParseError>> = lines
        .par_iter()
        .map(|(line_number, line)| {
            let _span = info_span!("line", number = *line_number).entered();
            codec.decode_reported(line)
        })
        .collect();

    let mut summary = ParseSummary {
        lines: results.len(),
        ..Default::default()
    };

    for result in results {
        match result {
            Ok(record) => {
                summary.parsed += 1;
                write_record(&record, format, out)?;
            }
            Err(err) => *summary.dropped.entry(err.reason_label()).or_default() += 1,
        }
    }

    Ok(summary)
}

fn write_record(record: &LogRecord, format: OutputFormat, out: &mut dyn Write) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &RecordLine::from(record))?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{record}")?;
            for (name, value) in &record.fields {
                writeln!(out, "  {name} = {value}")?;
            }
        }
    }
    Ok(())
}

/// One parsed record as a flat JSON object.
#[derive(Serialize)]
struct RecordLine<'a> {
    timestamp: String,
    source: &'a str,
    category: &'a str,
    message: &'a str,
    fields: BTreeMap<&'a str, &'a FieldValue>,
}

impl<'a> From<&'a LogRecord> for RecordLine<'a> {
    fn from(record: &'a LogRecord) -> Self {
        Self {
            timestamp: record.timestamp.to_rfc3339(),
            source: &record.source,
            category: &record.category,
            message: &record.message,
            fields: record
                .fields
                .iter()
                .map(|(name, value)| (name.as_str(), value))
                .collect(),
        }
    }
}

/// Per-run counts.
#[derive(Debug, Default, Serialize)]
pub struct ParseSummary {
    /// Non-blank input lines
    pub lines: usize,
    /// Lines that produced a record
    pub parsed: usize,
    /// Dropped lines by reason
    pub dropped: BTreeMap<&'static str, usize>,
}

impl ParseSummary {
    /// Total dropped lines across all reasons.
    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }
}

impl Render for ParseSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "{} lines, {} parsed, {} dropped",
            self.lines,
            self.parsed.to_string().green(),
            self.dropped_total().to_string().yellow()
        )?;
        for (reason, count) in &self.dropped {
            writeln!(w, "  {reason}: {count}")?;
        }
        Ok(())
    }
}
