//! Fixed-size grid snapshots

use crate::cell::CellSnapshot;
use crate::error::{Error, Result};

/// A rectangular, fixed-size matrix of [`CellSnapshot`]s
///
/// Row and column counts are supplied by the caller, never inferred from
/// content. Absent content is a blank cell, so every row holds exactly
/// `column_count` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: Vec<Vec<CellSnapshot>>,
    columns: usize,
}

impl Grid {
    /// Create an all-blank grid
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: vec![vec![CellSnapshot::blank(); columns]; rows],
            columns,
        }
    }

    /// Build a grid from captured rows
    ///
    /// Short rows are padded with blank cells up to the widest row.
    pub fn from_rows(rows: Vec<Vec<CellSnapshot>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self::with_columns(rows, columns)
    }

    /// Build a grid from captured rows with an explicit column count
    ///
    /// Rows are padded with blank cells or truncated to `columns`.
    pub fn with_columns(mut rows: Vec<Vec<CellSnapshot>>, columns: usize) -> Self {
        for row in &mut rows {
            row.resize(columns, CellSnapshot::blank());
        }
        Self { rows, columns }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Check if the grid has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by 0-based indices
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellSnapshot> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Replace a cell by 0-based indices
    pub fn set(&mut self, row: usize, col: usize, cell: CellSnapshot) -> Result<()> {
        let row_count = self.rows.len();
        let columns = self.columns;
        let target = self
            .rows
            .get_mut(row)
            .ok_or(Error::RowOutOfBounds(row, row_count))?
            .get_mut(col)
            .ok_or(Error::ColumnOutOfBounds(col, columns))?;
        *target = cell;
        Ok(())
    }

    /// Iterate over rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[CellSnapshot]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Borrow all rows
    pub fn as_rows(&self) -> &[Vec<CellSnapshot>] {
        &self.rows
    }

    /// Number of rows left once trailing blank rows are dropped
    pub fn content_row_count(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.is_blank()))
            .map_or(0, |last| last + 1)
    }

    /// Drop trailing rows where every cell is blank
    ///
    /// The column count is kept. If every row is blank the grid ends up with
    /// no rows.
    pub fn trim_trailing_blank_rows(mut self) -> Self {
        let keep = self.content_row_count();
        self.rows.truncate(keep);
        self
    }

    /// A copy of the grid without trailing blank rows
    pub fn trimmed(&self) -> Self {
        Self {
            rows: self.rows[..self.content_row_count()].to_vec(),
            columns: self.columns,
        }
    }
}
