use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::StoreError;

static A1_CELL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{1,3})([1-9][0-9]{0,6})$").ok());

/// A single cell in A1 notation. Rows and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct CellRef {
    pub(crate) row: usize,
    pub(crate) col: usize,
}

impl CellRef {
    pub(crate) fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Column number → letters: 1 → "A", 26 → "Z", 27 → "AA".
pub(crate) fn column_letters(mut col: usize) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

fn column_number(letters: &str) -> usize {
    letters
        .bytes()
        .fold(0, |acc, b| acc * 26 + usize::from(b - b'A' + 1))
}

impl FromStr for CellRef {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let re = A1_CELL
            .as_ref()
            .ok_or_else(|| StoreError::InvalidAddress(s.to_string()))?;
        let caps = re
            .captures(&upper)
            .ok_or_else(|| StoreError::InvalidAddress(s.to_string()))?;
        let row = caps[2]
            .parse::<usize>()
            .map_err(|_| StoreError::InvalidAddress(s.to_string()))?;
        Ok(Self::new(row, column_number(&caps[1])))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

/// Rectangular block of cells, inclusive on both corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellRange {
    pub(crate) start: CellRef,
    pub(crate) end: CellRef,
}

impl CellRange {
    pub(crate) fn new(start: CellRef, end: CellRef) -> Self {
        Self {
            start: CellRef::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellRef::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// One row starting at `col`, `width` cells wide.
    pub(crate) fn row_span(row: usize, col: usize, width: usize) -> Self {
        Self::new(
            CellRef::new(row, col),
            CellRef::new(row, col + width.saturating_sub(1)),
        )
    }

    pub(crate) fn rows(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    pub(crate) fn cols(&self) -> usize {
        self.end.col - self.start.col + 1
    }
}

#[cfg(test)]
impl FromStr for CellRange {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((a, b)) => Ok(Self::new(a.parse()?, b.parse()?)),
            None => {
                let cell: CellRef = s.parse()?;
                Ok(Self::new(cell, cell))
            }
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}
