//! Export format dispatch

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use snapsheet_core::Grid;
use snapsheet_csv::{CsvWriteOptions, CsvWriter};
use snapsheet_ods::{OdsOptions, OdsWriter};
use snapsheet_xlsx::{XlsxOptions, XlsxWriter};

use crate::error::{ExportError, ExportResult};

/// A file format a grid can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Xlsx,
    Ods,
}

impl ExportFormat {
    /// Every supported format
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Csv,
        ExportFormat::Tsv,
        ExportFormat::Xlsx,
        ExportFormat::Ods,
    ];

    /// File extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Ods => "ods",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Tsv => "text/tab-separated-values",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Ods => snapsheet_ods::MIME_TYPE,
        }
    }

    /// Detect the format from a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ExportResult<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ExportError::UnsupportedFormat(path.display().to_string()))?
            .parse()
    }

    /// Export a grid
    ///
    /// Trailing blank rows are trimmed before dispatching, so every format
    /// sees the same rows.
    pub fn export(self, grid: &Grid) -> ExportResult<Vec<u8>> {
        let grid = grid.trimmed();
        let bytes = match self {
            ExportFormat::Csv => CsvWriter::render(&grid, &CsvWriteOptions::csv())?.into_bytes(),
            ExportFormat::Tsv => CsvWriter::render(&grid, &CsvWriteOptions::tsv())?.into_bytes(),
            ExportFormat::Xlsx => XlsxWriter::to_bytes(&grid, &XlsxOptions::default())?,
            ExportFormat::Ods => OdsWriter::to_bytes(&grid, &OdsOptions::default())?,
        };
        Ok(bytes)
    }

    /// Export a grid to a file
    pub fn export_to_file<P: AsRef<Path>>(self, grid: &Grid, path: P) -> ExportResult<()> {
        let bytes = self.export(grid)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.extension() == name)
            .ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}
