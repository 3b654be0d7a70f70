//! CSV reading and writing

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use unmask_config::TableConfig;

use crate::{Error, Result, Table};

const BOM: char = '\u{feff}';

/// Reads a delimited export into a [`Table`]
#[derive(Debug, Clone)]
pub struct TableReader {
    delimiter: u8,
    header_row: usize,
    drop_index_column: bool,
}

impl Default for TableReader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            header_row: 0,
            drop_index_column: false,
        }
    }
}

impl TableReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TableConfig) -> Result<Self> {
        Ok(Self::new()
            .delimiter(delimiter_byte(config.delimiter)?)
            .header_row(config.header_row)
            .drop_index_column(config.drop_index_column))
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Number of lines preceding the header line
    pub fn header_row(mut self, rows: usize) -> Self {
        self.header_row = rows;
        self
    }

    pub fn drop_index_column(mut self, drop: bool) -> Self {
        self.drop_index_column = drop;
        self
    }

    pub fn read_path(&self, path: &Path) -> Result<Table> {
        let file = File::open(path)?;
        let table = self.read(file)?;
        tracing::info!(path = %path.display(), rows = table.len(), "table loaded");
        Ok(table)
    }

    pub fn read<R: Read>(&self, reader: R) -> Result<Table> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut records = csv.records().skip(self.header_row);

        let mut headers: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(|h| h.trim().to_string()).collect(),
            None => return Err(Error::NoHeader),
        };

        let mut rows = Vec::new();
        for record in records {
            rows.push(record?.iter().map(str::to_string).collect::<Vec<_>>());
        }

        // spreadsheet exports often start with a byte order mark
        if self.header_row == 0 {
            if let Some(first) = headers.first_mut() {
                *first = first.trim_start_matches(BOM).to_string();
            }
        }

        let mut table = Table::new(headers, rows);
        if self.drop_index_column {
            table.drop_column(0);
        }
        Ok(table)
    }
}

/// Writes a [`Table`] as delimited text, header first, no index column
#[derive(Debug, Clone)]
pub struct TableWriter {
    delimiter: u8,
}

impl Default for TableWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TableWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TableConfig) -> Result<Self> {
        Ok(Self::new().delimiter(delimiter_byte(config.delimiter)?))
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write to a temp file next to `path`, then rename over it
    pub fn write_path(&self, path: &Path, table: &Table) -> Result<()> {
        let temp_path = path.with_extension("csv.tmp");
        {
            let file = File::create(&temp_path)?;
            self.write(file, table)?;
        }
        fs::rename(&temp_path, path)?;

        tracing::info!(path = %path.display(), rows = table.len(), "table written");
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: W, table: &Table) -> Result<()> {
        let mut csv = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        csv.write_record(table.headers())?;
        for row in table.rows() {
            csv.write_record(row)?;
        }
        csv.flush()?;
        Ok(())
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(|b| b.is_ascii())
        .ok_or(Error::InvalidDelimiter(delimiter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use unmask_config::InputColumns;

    const EXPORT: &str = "\
Задание 3,,,
,Телефон,email,Адрес
0,8a9f6d3da10ac044ed09b7421386b6017fdb95b0,uftu@uftu.sv,\"Нптлгб, фм. Мжрйрг\"
1,,broken,
";

    fn task_reader() -> TableReader {
        TableReader::from_config(&TableConfig::default()).unwrap()
    }

    #[test]
    fn test_reads_task_layout() {
        let table = task_reader().read(EXPORT.as_bytes()).unwrap();
        assert_eq!(table.headers(), &["Телефон", "email", "Адрес"].map(String::from)[..]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 2), "Нптлгб, фм. Мжрйрг");

        let records = table.records(&InputColumns::default()).unwrap();
        assert_eq!(records[1].phone, "");
        assert_eq!(records[1].email, "broken");
    }

    #[test]
    fn test_plain_header_with_bom() {
        let input = "\u{feff}Телефон;email;Адрес\nabc;x@y.ru;Дом\n";
        let table = TableReader::new().delimiter(b';').read(input.as_bytes()).unwrap();
        assert_eq!(table.headers()[0], "Телефон");
        assert_eq!(table.cell(0, 2), "Дом");
    }

    #[test]
    fn test_empty_input_has_no_header() {
        assert!(matches!(task_reader().read("".as_bytes()), Err(Error::NoHeader)));
    }

    #[test]
    fn test_write_quotes_commas() {
        let table = task_reader().read(EXPORT.as_bytes()).unwrap();
        let mut out = Vec::new();
        TableWriter::new().write(&mut out, &table).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Телефон,email,Адрес\n"));
        assert!(text.contains("\"Нптлгб, фм. Мжрйрг\""));
    }

    #[test]
    fn test_write_path_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answer.csv");
        let table = task_reader().read(EXPORT.as_bytes()).unwrap();

        TableWriter::new().write_path(&path, &table).unwrap();
        assert!(!path.with_extension("csv.tmp").exists());

        let reread = TableReader::new().read_path(&path).unwrap();
        assert_eq!(reread, table);
    }

    #[test]
    fn test_rejects_multibyte_delimiter() {
        let config = TableConfig {
            delimiter: '§',
            ..TableConfig::default()
        };
        assert!(matches!(
            TableReader::from_config(&config),
            Err(Error::InvalidDelimiter('§'))
        ));
    }
}
