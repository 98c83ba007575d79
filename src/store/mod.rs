mod address;
mod schema;
mod sqlite;

use thiserror::Error;

pub(crate) use address::{CellRange, CellRef};
pub(crate) use sqlite::SqliteWorksheet;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid cell address: {0:?}")]
    InvalidAddress(String),
    #[error("range {range} cannot hold {rows} row(s) of up to {cols} value(s)")]
    RangeMismatch {
        range: String,
        rows: usize,
        cols: usize,
    },
    #[error("cell {cell} holds {value:?}, expected an integer")]
    NotAnInteger { cell: String, value: Option<String> },
}

/// A grid of string cells addressed in A1 notation, modelled on a
/// spreadsheet tab. Empty cells read back as `None` (or `""` inside
/// `get_all_values`).
pub(crate) trait Worksheet {
    fn title(&self) -> &str;

    fn acell(&self, cell: CellRef) -> Result<Option<String>, StoreError>;

    /// Writing an empty string clears the cell.
    fn update_acell(&mut self, cell: CellRef, value: &str) -> Result<(), StoreError>;

    /// Dense grid from A1 to the last non-empty row and column.
    fn get_all_values(&self) -> Result<Vec<Vec<String>>, StoreError>;

    /// First cell, in row-major order, whose value equals `query` exactly.
    fn find(&self, query: &str) -> Result<Option<CellRef>, StoreError>;

    /// Writes `values` into `range`, row by row. Rows shorter than the
    /// range leave the remaining cells untouched.
    fn update_range(&mut self, range: CellRange, values: &[Vec<String>]) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests;
