//! # snapsheet-core
//!
//! Core data structures shared by the snapsheet exporters.
//!
//! This crate provides:
//! - [`CellSnapshot`] and [`Grid`] - the read-only matrix captured at export time
//! - [`CellValue`] - the human-visible value of a cell
//! - [`CanonicalValue`] and [`resolve_for`] - per-target value resolution
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing
//!
//! ## Example
//!
//! ```rust
//! use snapsheet_core::{CellSnapshot, ExportTarget, Grid, Resolved};
//!
//! let mut grid = Grid::new(2, 2);
//! grid.set(0, 0, CellSnapshot::value("Revenue")).unwrap();
//! grid.set(0, 1, CellSnapshot::formula("=B2*2", 100.0)).unwrap();
//!
//! let cell = grid.cell(0, 1).unwrap();
//! assert_eq!(snapsheet_core::resolve_for(cell, ExportTarget::Ooxml), Resolved::Formula("=B2*2"));
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod resolve;

// Re-exports for convenience
pub use cell::{CellAddress, CellRange, CellSnapshot, CellValue};
pub use error::{Error, Result};
pub use grid::Grid;
pub use resolve::{format_number, resolve, resolve_for, CanonicalValue, ExportTarget, Resolved};

/// Prefix of the note attached to cells whose value came from a formula
pub const FORMULA_NOTE_PREFIX: &str = "Formula: ";

/// Build the annotation text for a formula cell (e.g. `Formula: =A1*2`)
pub fn formula_note(formula: &str) -> String {
    format!("{}{}", FORMULA_NOTE_PREFIX, formula)
}
