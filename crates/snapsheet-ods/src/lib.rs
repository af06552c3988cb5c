//! # snapsheet-ods
//!
//! ODS (OpenDocument spreadsheet) writer for snapsheet grids.
//!
//! Unlike the XLSX writer, every row and column of the grid is written, and
//! formula cells keep their computed value with the formula attached as an
//! annotation.

pub mod error;
pub mod writer;

mod text;

pub use error::{OdsError, OdsResult};
pub use writer::{to_ods_archive, OdsOptions, OdsWriter};

/// MIME type stored in the leading `mimetype` entry
pub const MIME_TYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

/// ODF version written to every part
pub const ODF_VERSION: &str = "1.2";
