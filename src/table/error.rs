/// Errors that can occur while reading or writing a device table
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error reading or writing the table file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The table structure cannot hold device records
    #[error("Invalid table format: {0}")]
    InvalidFormat(String),
}
