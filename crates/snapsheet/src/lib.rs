//! # snapsheet
//!
//! Export fixed-size grid snapshots to delimited text (CSV/TSV), XLSX and
//! ODS, or append them to a remote spreadsheet ledger.
//!
//! ## Features
//!
//! - CSV and TSV with a UTF-8 BOM, suitable for spreadsheet import
//! - XLSX with live formulas and inline strings
//! - ODS with computed values and formulas kept as annotations
//! - Ledger append payloads and an async client (`ledger` feature)
//!
//! ## Example
//!
//! ```rust
//! use snapsheet::prelude::*;
//!
//! let grid = Grid::from_rows(vec![
//!     vec![CellSnapshot::value("Item"), CellSnapshot::value("Total")],
//!     vec![CellSnapshot::value("Coffee"), CellSnapshot::formula("=2*3.5", 7.0)],
//! ]);
//!
//! let csv = grid.export(ExportFormat::Csv).unwrap();
//! assert_eq!(csv, "\u{FEFF}Item,Total\r\nCoffee,=2*3.5".as_bytes());
//!
//! // grid.save("snapshot.xlsx").unwrap();
//! ```

pub mod error;
pub mod format;
pub mod naming;
pub mod prelude;

pub use error::{ExportError, ExportResult};
pub use format::ExportFormat;
pub use naming::{export_file_name, MAX_LABEL_LEN};

// Re-export core types
pub use snapsheet_core::{
    format_number, formula_note, resolve, resolve_for, CanonicalValue, CellAddress, CellRange,
    CellSnapshot, CellValue, ExportTarget, Grid, Resolved, FORMULA_NOTE_PREFIX,
};

// Re-export writers
pub use snapsheet_csv::{to_delimited_text, CsvError, CsvWriteOptions, CsvWriter, LineTerminator};
pub use snapsheet_ods::{to_ods_archive, OdsError, OdsOptions, OdsWriter};
pub use snapsheet_xlsx::{to_xlsx_archive, XlsxError, XlsxOptions, XlsxWriter};

#[cfg(feature = "ledger")]
pub use snapsheet_ledger as ledger;

use std::path::Path;

/// Extension trait for Grid to add export and file I/O
pub trait GridExt {
    /// Export to an in-memory byte buffer
    fn export(&self, format: ExportFormat) -> ExportResult<Vec<u8>>;

    /// Save to a file, choosing the format from the extension
    fn save<P: AsRef<Path>>(&self, path: P) -> ExportResult<()>;
}

impl GridExt for Grid {
    fn export(&self, format: ExportFormat) -> ExportResult<Vec<u8>> {
        format.export(self)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> ExportResult<()> {
        let path = path.as_ref();
        ExportFormat::from_path(path)?.export_to_file(self, path)
    }
}
