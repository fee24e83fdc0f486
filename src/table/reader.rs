use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use super::{LabelIndex, TableError};
use crate::quantity::UNKNOWN;

/// Field separator of a table file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Tab-separated values
    #[default]
    Tsv,
    /// Comma-separated values
    Csv,
}

impl TableFormat {
    /// Guess the format from a file extension, defaulting to TSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => TableFormat::Csv,
            _ => TableFormat::Tsv,
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            TableFormat::Tsv => b'\t',
            TableFormat::Csv => b',',
        }
    }
}

/// A device table: labelled rows, one column per record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    record_ids: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
}

impl Table {
    /// Create an empty table with the given record columns
    pub fn new(record_ids: Vec<String>) -> Self {
        Self {
            record_ids,
            rows: Vec::new(),
        }
    }

    /// Read a table file, choosing the separator from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), TableFormat::from_path(path))
    }

    /// Read a table from any reader.
    ///
    /// The header's first cell names the label column; the remaining header
    /// cells are record identifiers. Rows may be ragged.
    pub fn from_reader<R: Read>(reader: R, format: TableFormat) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(format.delimiter())
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let record_ids: Vec<String> = csv_reader
            .headers()?
            .iter()
            .skip(1)
            .enumerate()
            .map(|(i, id)| {
                let id = id.trim();
                if id.is_empty() {
                    format!("record_{}", i + 1)
                } else {
                    id.to_string()
                }
            })
            .collect();

        if record_ids.is_empty() {
            return Err(TableError::InvalidFormat(
                "header has no record columns".to_string(),
            ));
        }

        let mut table = Table::new(record_ids);
        for record in csv_reader.records() {
            let record = record?;
            let mut cells = record.iter();
            let label = match cells.next() {
                Some(label) if !label.trim().is_empty() => label.trim().to_string(),
                _ => continue,
            };
            let values: Vec<String> = cells.map(str::to_string).collect();
            table.push_row(label, values);
        }

        log::debug!(
            "Read table with {} rows and {} records",
            table.rows.len(),
            table.record_ids.len()
        );
        Ok(table)
    }

    /// Append a labelled row; missing trailing cells read as blank
    pub fn push_row(&mut self, label: String, mut values: Vec<String>) {
        values.resize(self.record_ids.len(), String::new());
        self.rows.push((label, values));
    }

    /// Record identifiers in column order
    pub fn record_ids(&self) -> &[String] {
        &self.record_ids
    }

    /// Number of labelled rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Label index of the record in column `i`, with aliases applied
    pub fn column(&self, i: usize, aliases: &BTreeMap<String, String>) -> Option<LabelIndex> {
        if i >= self.record_ids.len() {
            return None;
        }
        let index = LabelIndex::from_rows(
            self.rows
                .iter()
                .map(|(label, values)| (label.clone(), values[i].clone())),
        );
        Some(index.with_aliases(aliases))
    }

    /// All records as `(id, index)` pairs in column order
    pub fn records(&self, aliases: &BTreeMap<String, String>) -> Vec<(String, LabelIndex)> {
        (0..self.record_ids.len())
            .filter_map(|i| {
                self.column(i, aliases)
                    .map(|index| (self.record_ids[i].clone(), index))
            })
            .collect()
    }

    /// Build a single-record table from a label index
    pub fn from_index(record_id: &str, index: &LabelIndex) -> Self {
        let mut table = Table::new(vec![record_id.to_string()]);
        for row in index.rows() {
            table.push_row(row.label.clone(), vec![row.value.clone()]);
        }
        table
    }

    /// Build a table with one column per record.
    ///
    /// Rows appear in the order their label is first seen; a record without
    /// a row gets `Unknown` in that cell.
    pub fn from_indexes(records: &[(String, LabelIndex)]) -> Self {
        let mut order: Vec<String> = Vec::new();
        let mut cells: HashMap<String, Vec<String>> = HashMap::new();

        for (column, (_, index)) in records.iter().enumerate() {
            for row in index.rows() {
                let values = cells.entry(row.label.clone()).or_insert_with(|| {
                    order.push(row.label.clone());
                    vec![UNKNOWN.to_string(); records.len()]
                });
                values[column] = row.value.clone();
            }
        }

        let mut table = Table::new(records.iter().map(|(id, _)| id.clone()).collect());
        for label in order {
            let values = cells.remove(&label).unwrap_or_default();
            table.push_row(label, values);
        }
        table
    }

    /// Write the table with a `Label` header column
    pub fn to_writer<W: Write>(&self, writer: W, format: TableFormat) -> Result<(), TableError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(format.delimiter())
            .from_writer(writer);

        let mut header = vec!["Label".to_string()];
        header.extend(self.record_ids.iter().cloned());
        csv_writer.write_record(&header)?;

        for (label, values) in &self.rows {
            let mut record = Vec::with_capacity(values.len() + 1);
            record.push(label.as_str());
            record.extend(values.iter().map(String::as_str));
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
