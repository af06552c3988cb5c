//! # snapsheet-zip
//!
//! A small ZIP writer for the spreadsheet containers produced by snapsheet.
//!
//! Entries are always stored (no compression) in a single-disk archive, which
//! is all OOXML and ODF packages need. The CRC-32 used by the headers lives in
//! [`crc`].
//!
//! ```rust
//! use snapsheet_zip::{build_zip_archive, ZipEntry};
//!
//! let bytes = build_zip_archive(vec![
//!     ZipEntry::new("mimetype", "application/vnd.oasis.opendocument.spreadsheet"),
//!     ZipEntry::new("content.xml", "<root/>"),
//! ])
//! .unwrap();
//! assert_eq!(&bytes[..4], b"PK\x03\x04");
//! ```
#![forbid(unsafe_code)]

pub mod crc;
mod error;
mod writer;

pub use crc::{crc32, Crc32};
pub use error::{ZipError, ZipResult};
pub use writer::{build_zip_archive, ZipEntry, ZipWriter};
