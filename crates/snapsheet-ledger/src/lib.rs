//! # snapsheet-ledger
//!
//! Appends a grid snapshot to a remote spreadsheet ("the ledger") as one
//! block: four blank gap rows, an optional label row, then the data rows.
//!
//! ```
//! use snapsheet_core::CellSnapshot;
//! use snapsheet_ledger::build_append_rows;
//!
//! let rows = build_append_rows("Q1 Close", &[vec![CellSnapshot::value(5)]], 1);
//! assert_eq!(rows.len(), 6);
//! ```

pub mod client;
pub mod error;
pub mod payload;
pub mod target;

pub use client::{remote_error_message, AppendOutcome, LedgerClient, LedgerConfig, DEFAULT_BASE_URL};
pub use error::{LedgerError, LedgerResult};
pub use payload::{
    build_append_rows, AppendCellsRequest, BatchUpdateRequest, CellData, ExtendedValue, Request,
    RowData, APPEND_FIELDS, GAP_ROWS,
};
pub use target::LedgerTarget;
