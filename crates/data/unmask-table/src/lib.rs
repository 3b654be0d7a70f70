//! Tabular source and sink
//!
//! The encoded spreadsheet arrives as a CSV export. Rows are read into memory,
//! the three encoded columns are pulled out as [`EncodedRecord`]s, and the four
//! decoded columns are appended before the table is written back out.

pub mod io;
pub mod table;

pub use io::{TableReader, TableWriter};
pub use table::Table;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table has no header row")]
    NoHeader,

    #[error("Missing column '{name}' (available: {})", .available.join(", "))]
    MissingColumn { name: String, available: Vec<String> },

    #[error("Column '{name}' has {got} values, table has {expected} rows")]
    ColumnLength {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Delimiter '{0}' is not a single-byte character")]
    InvalidDelimiter(char),
}

pub use unmask_core::{DecodedRecord, EncodedRecord};
