//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The display value captured for a cell
//! - [`CellSnapshot`] - A cell as captured at export time (value plus optional formula)
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")

mod address;
mod snapshot;
mod value;

pub use address::{CellAddress, CellRange};
pub use snapshot::CellSnapshot;
pub use value::CellValue;
