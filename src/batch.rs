//! # Batch Decoding
//!
//! Decodes every record column of a device table and writes one JSON
//! document per record into an output directory.
//!
//! Records are independent. A record whose document cannot be written is
//! reported in the [`BatchReport`] and the remaining records are still
//! written. Each document is first written to a temporary file in the
//! output directory and then persisted under its final name, so a reader
//! never sees a partially written document.
//!
//! With the `parallel` feature, records are decoded and written on the
//! rayon thread pool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[cfg(feature = "colorized_output")]
use console::style;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::assemble::decode_record;
use crate::config::TranscoderConfig;
use crate::model::Record;
use crate::table::{Table, TableError, TableFormat};

/// Version of the JSON document layout
pub const FORMAT_VERSION: &str = "1.0";

/// Errors of one batch output
#[derive(Debug, Error)]
pub enum BatchError {
    /// Output directory or document file could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input table could not be read
    #[error("Table error: {0}")]
    Table(#[from] TableError),
}

/// A decoded record wrapped with provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDocument {
    /// Document layout version, see [`FORMAT_VERSION`]
    pub format_version: String,
    /// Identifier of the table column
    pub record_id: String,
    /// Table file the record was decoded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Conversion time
    pub converted_at: DateTime<Utc>,
    /// The nested record
    pub record: Record,
}

impl RecordDocument {
    /// Wrap a record, stamping the current time
    pub fn new(record: Record, source_file: Option<&Path>) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            record_id: record.id.clone(),
            source_file: source_file.map(|path| path.display().to_string()),
            converted_at: Utc::now(),
            record,
        }
    }
}

/// Output settings of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Pretty-print documents
    pub pretty: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// File name of a record document: the id with path-unsafe characters replaced
pub fn document_file_name(record_id: &str) -> String {
    let stem: String = record_id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        "record.json".to_string()
    } else {
        format!("{stem}.json")
    }
}

/// Write one document atomically into `dir` under `file_name`
pub fn write_document(
    document: &RecordDocument,
    dir: &Path,
    file_name: &str,
    options: BatchOptions,
) -> Result<PathBuf, BatchError> {
    let path = dir.join(file_name);
    let temp_file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        if options.pretty {
            serde_json::to_writer_pretty(&mut writer, document)?;
        } else {
            serde_json::to_writer(&mut writer, document)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    temp_file.persist(&path).map_err(|e| e.error)?;
    Ok(path)
}

/// Decode every record of a table
pub fn decode_table(table: &Table, config: &TranscoderConfig) -> Vec<Record> {
    let records = table.records(&config.aliases);

    #[cfg(feature = "parallel")]
    let decoded: Vec<Record> = records
        .par_iter()
        .map(|(id, index)| decode_record(id, index, config))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let decoded: Vec<Record> = records
        .iter()
        .map(|(id, index)| decode_record(id, index, config))
        .collect();

    decoded
}

/// Unique document file names, in record order.
///
/// A name already handed out, compared case-insensitively, gets the lowest
/// free numeric suffix, so a repeated id never lands on another record's file.
fn file_names(records: &[Record]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    records
        .iter()
        .map(|record| {
            let name = document_file_name(&record.id);
            let stem = name.trim_end_matches(".json").to_string();
            let mut candidate = name;
            let mut suffix = 1;
            while !taken.insert(candidate.to_lowercase()) {
                suffix += 1;
                candidate = format!("{}_{}.json", stem, suffix);
            }
            candidate
        })
        .collect()
}

fn write_one(
    record: &Record,
    file_name: &str,
    source: Option<&Path>,
    dir: &Path,
    options: BatchOptions,
) -> RecordOutcome {
    let layers = record.layers.len();
    let document = RecordDocument::new(record.clone(), source);
    let status = match write_document(&document, dir, file_name, options) {
        Ok(path) => {
            log::debug!("Wrote record '{}' to {}", record.id, path.display());
            OutcomeStatus::Written(path)
        }
        Err(e) => {
            log::warn!("Failed to write record '{}': {}", record.id, e);
            OutcomeStatus::Failed(e.to_string())
        }
    };
    RecordOutcome {
        record_id: record.id.clone(),
        layers,
        status,
    }
}

/// Write one document per record into `dir`, which must exist
pub fn write_documents(
    records: &[Record],
    source: Option<&Path>,
    dir: &Path,
    options: BatchOptions,
) -> BatchReport {
    let names = file_names(records);
    let jobs: Vec<(&Record, &String)> = records.iter().zip(&names).collect();

    #[cfg(feature = "parallel")]
    let outcomes: Vec<RecordOutcome> = jobs
        .par_iter()
        .map(|(record, name)| write_one(record, name, source, dir, options))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<RecordOutcome> = jobs
        .iter()
        .map(|(record, name)| write_one(record, name, source, dir, options))
        .collect();

    let mut report = BatchReport::new(
        source
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string()),
    );
    for outcome in outcomes {
        report.add_outcome(outcome);
    }
    report
}

/// Read a table file, decode all of its records and write their documents to `out_dir`
pub fn decode_to_directory(
    input: &Path,
    format: Option<TableFormat>,
    out_dir: &Path,
    config: &TranscoderConfig,
    options: BatchOptions,
) -> Result<BatchReport, BatchError> {
    let table = match format {
        Some(format) => Table::from_reader(fs::File::open(input)?, format)?,
        None => Table::from_path(input)?,
    };
    log::info!(
        "Decoding {} record(s) from {}",
        table.record_ids().len(),
        input.display()
    );

    fs::create_dir_all(out_dir)?;
    let records = decode_table(&table, config);
    let report = write_documents(&records, Some(input), out_dir, options);
    log::info!(
        "Wrote {} of {} document(s) to {}",
        report.written_count(),
        report.outcomes.len(),
        out_dir.display()
    );
    Ok(report)
}

/// Result of writing one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Document written to this path
    Written(PathBuf),
    /// Writing failed with this message
    Failed(String),
}

/// Per-record entry of a [`BatchReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Record identifier
    pub record_id: String,
    /// Number of decoded sublayers
    pub layers: usize,
    /// Write result
    pub status: OutcomeStatus,
}

/// Summary of a batch run
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Input the records came from
    pub source: String,
    /// One outcome per record, in record order
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    /// Create an empty report for `source`
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            outcomes: Vec::new(),
        }
    }

    /// Add the outcome of one record
    pub fn add_outcome(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of documents written
    pub fn written_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, OutcomeStatus::Written(_)))
            .count()
    }

    /// Number of records that failed
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.written_count()
    }

    /// True when any record failed
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Format the report with colors (requires the `colorized_output` feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();
            output.push_str(&format!("{}\n", style("pvstack Decode Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("=====================").cyan()));
            output.push_str(&format!("{}: {}\n\n", style("Source").bold(), self.source));

            for outcome in &self.outcomes {
                match &outcome.status {
                    OutcomeStatus::Written(path) => output.push_str(&format!(
                        "[{}] {} ({} layers) -> {}\n",
                        OK,
                        style(&outcome.record_id).green(),
                        outcome.layers,
                        path.display()
                    )),
                    OutcomeStatus::Failed(message) => output.push_str(&format!(
                        "[{}] {} - {}: {}\n",
                        FAIL,
                        style(&outcome.record_id).red(),
                        style("FAILED").red().bold(),
                        message
                    )),
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} written, {} failed\n",
                style("Summary").bold(),
                style(self.written_count()).green(),
                style(self.failure_count()).red()
            ));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pvstack Decode Report")?;
        writeln!(f, "=====================")?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f)?;

        for outcome in &self.outcomes {
            match &outcome.status {
                OutcomeStatus::Written(path) => writeln!(
                    f,
                    "[✓] {} ({} layers) -> {}",
                    outcome.record_id,
                    outcome.layers,
                    path.display()
                )?,
                OutcomeStatus::Failed(message) => {
                    writeln!(f, "[✗] {} - FAILED: {}", outcome.record_id, message)?
                }
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} written, {} failed",
            self.written_count(),
            self.failure_count()
        )
    }
}
