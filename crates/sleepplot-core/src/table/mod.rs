//! Flat, string-typed table shared by the fetch and plot stages.
//!
//! The column set is whatever the wellness service returns, so cells stay
//! untyped until [`crate::normalize::SleepTable`] picks out the columns it
//! needs.

mod csv_file;
mod flatten;

pub use csv_file::{read_csv, read_csv_from, write_csv, write_csv_to};
pub use flatten::{flatten_payloads, DTO_KEY};

/// Name of the column whose absence marks a day without data.
pub const ID_COLUMN: &str = "id";

/// One row of a [`RawTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Position of the row in the fetched sequence. Survives dropping.
    pub index: usize,
    /// One cell per column; `None` is a null cell.
    pub cells: Vec<Option<String>>,
}

/// Column-named table of optional text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` among the columns.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Appends a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, index: usize, mut cells: Vec<Option<String>>) {
        cells.resize(self.columns.len(), None);
        self.rows.push(RawRow { index, cells });
    }

    /// Cell value of `row` in column `name`, if both exist and the cell is set.
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column_index(name)?;
        self.rows.get(row)?.cells.get(col)?.as_deref()
    }

    /// Removes rows whose `column` cell is null. Returns how many were dropped.
    ///
    /// A table without that column loses every row.
    pub fn drop_missing(&mut self, column: &str) -> usize {
        let before = self.rows.len();
        match self.column_index(column) {
            Some(col) => self.rows.retain(|r| r.cells[col].is_some()),
            None => self.rows.clear(),
        }
        before - self.rows.len()
    }
}
