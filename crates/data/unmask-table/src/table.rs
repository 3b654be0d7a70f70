//! In-memory table with named columns

use unmask_config::{InputColumns, OutputColumns};
use unmask_core::{DecodedRecord, EncodedRecord};

use crate::{Error, Result};

/// Header plus rows; every row is cut or padded to the header width
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::MissingColumn {
                name: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// Cell text, empty when the row is shorter than `column`
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Remove a column by position
    pub fn drop_column(&mut self, column: usize) {
        if column < self.headers.len() {
            self.headers.remove(column);
        }
        for row in &mut self.rows {
            if column < row.len() {
                row.remove(column);
            }
        }
    }

    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<String>) -> Result<()> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(Error::ColumnLength {
                name,
                expected: self.rows.len(),
                got: values.len(),
            });
        }

        self.headers.push(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Pull the three encoded fields out of every row
    pub fn records(&self, columns: &InputColumns) -> Result<Vec<EncodedRecord>> {
        let phone = self.column_index(&columns.phone)?;
        let email = self.column_index(&columns.email)?;
        let address = self.column_index(&columns.address)?;

        Ok((0..self.rows.len())
            .map(|row| {
                EncodedRecord::new(
                    row,
                    self.cell(row, phone).trim(),
                    self.cell(row, email).trim(),
                    self.cell(row, address),
                )
            })
            .collect())
    }

    /// Append the four decoded columns, matched to rows by position
    pub fn append_decoded(&mut self, names: &OutputColumns, decoded: &[DecodedRecord]) -> Result<()> {
        let mut columns: [Vec<String>; 4] = Default::default();
        let mut ordered: Vec<&DecodedRecord> = decoded.iter().collect();
        ordered.sort_by_key(|d| d.row);

        for record in ordered {
            for (column, cell) in columns.iter_mut().zip(record.cells()) {
                column.push(cell);
            }
        }

        for (name, values) in names.names().into_iter().zip(columns) {
            self.push_column(name, values)?;
        }
        Ok(())
    }
}
