//! # snapsheet-csv
//!
//! Delimited text (CSV and TSV) writer for snapsheet grids.
//!
//! Formula cells are written as their formula text, numbers and booleans as
//! plain literals, and strings are quoted only when they need it.

mod error;
mod options;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvWriteOptions, LineTerminator};
pub use writer::{to_delimited_text, CsvWriter};

/// Byte-order mark placed at the start of the output
pub const BOM: char = '\u{FEFF}';
