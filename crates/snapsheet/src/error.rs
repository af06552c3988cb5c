//! Export error types

use thiserror::Error;

/// Result type for facade operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Errors from any exporter
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] snapsheet_csv::CsvError),

    #[error(transparent)]
    Xlsx(#[from] snapsheet_xlsx::XlsxError),

    #[error(transparent)]
    Ods(#[from] snapsheet_ods::OdsError),

    /// Format name or file extension not recognized
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}
