use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use pvstack::batch::RecordDocument;
use pvstack::encode::encode_record;
use pvstack::model::Record;
use pvstack::table::{Table, TableFormat};

use super::Config;

/// Accepted shapes of the encoder input
#[derive(Deserialize)]
#[serde(untagged)]
enum EncodeInput {
    Document(RecordDocument),
    Documents(Vec<RecordDocument>),
    Record(Record),
    Records(Vec<Record>),
}

impl EncodeInput {
    fn into_records(self) -> Vec<Record> {
        match self {
            EncodeInput::Document(document) => vec![document.record],
            EncodeInput::Documents(documents) => {
                documents.into_iter().map(|document| document.record).collect()
            }
            EncodeInput::Record(record) => vec![record],
            EncodeInput::Records(records) => records,
        }
    }
}

fn parse_records(content: &str) -> Result<Vec<Record>> {
    let input: EncodeInput =
        serde_json::from_str(content).context("Input is neither a record document nor a record")?;
    Ok(input.into_records())
}

/// Encode record documents into a flat table
pub fn run(input: PathBuf, output: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path.as_deref())?;

    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let records = parse_records(&content)?;
    if records.is_empty() {
        anyhow::bail!("No records in {}", input.display());
    }
    info!("Encoding {} record(s) from {}", records.len(), input.display());

    let columns: Vec<_> = records
        .iter()
        .map(|record| (record.id.clone(), encode_record(record, &config.transcoder)))
        .collect();
    let table = Table::from_indexes(&columns);

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            table
                .to_writer(BufWriter::new(file), TableFormat::from_path(&path))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} rows to {}", table.row_count(), path.display());
        }
        None => {
            table
                .to_writer(io::stdout().lock(), TableFormat::Tsv)
                .context("Failed to write table")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_documents_and_records() {
        let record = r#"{"id": "a", "layers": {"layers": [{"position": 1, "name": "ITO"}]}}"#;
        let records = parse_records(record).unwrap();
        assert_eq!(records[0].id, "a");
        assert_eq!(records[0].layers.len(), 1);

        let many = format!("[{record}, {record}]");
        assert_eq!(parse_records(&many).unwrap().len(), 2);

        let document = RecordDocument::new(records[0].clone(), None);
        let json = serde_json::to_string(&document).unwrap();
        assert_eq!(parse_records(&json).unwrap(), records);
    }
}
