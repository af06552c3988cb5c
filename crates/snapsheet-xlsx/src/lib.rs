//! # snapsheet-xlsx
//!
//! XLSX (Office Open XML) writer for snapsheet grids.
//!
//! The package holds a single worksheet. Formula cells are written as live
//! formulas without a cached value, so the consuming application recalculates
//! them on open.

pub mod error;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use writer::{to_xlsx_archive, XlsxOptions, XlsxWriter};

/// Maximum length of a worksheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
