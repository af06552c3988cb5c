//! ZIP writer error types

use thiserror::Error;

/// Result type for archive operations
pub type ZipResult<T> = std::result::Result<T, ZipError>;

/// Inputs that cannot be represented in a classic (non-ZIP64) archive
#[derive(Debug, Error)]
pub enum ZipError {
    /// More entries than the 16-bit count fields can hold
    #[error("Too many entries: {0} (max 65535)")]
    TooManyEntries(usize),

    /// Entry larger than the 32-bit size fields can hold
    #[error("Entry '{name}' is too large: {size} bytes")]
    EntryTooLarge { name: String, size: u64 },

    /// Entry name longer than the 16-bit length field can hold
    #[error("Entry name too long: {0} bytes")]
    NameTooLong(usize),

    /// Entry name that is not a relative, forward-slash path
    #[error("Invalid entry name: {0:?}")]
    InvalidName(String),

    /// Archive grew past the 32-bit offset fields
    #[error("Archive too large: {0} bytes")]
    ArchiveTooLarge(u64),
}
