//! Remote sheet addressing

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// A sheet inside a remote spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTarget {
    pub spreadsheet_id: String,
    #[serde(default)]
    pub spreadsheet_title: String,
    pub sheet_id: i64,
    #[serde(default)]
    pub sheet_title: String,
}

impl LedgerTarget {
    /// Target a sheet by ids only
    pub fn new<S: Into<String>>(spreadsheet_id: S, sheet_id: i64) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            spreadsheet_title: String::new(),
            sheet_id,
            sheet_title: String::new(),
        }
    }

    /// Check that the spreadsheet id can be placed in a URL path segment
    pub fn validate(&self) -> LedgerResult<()> {
        let id = &self.spreadsheet_id;
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(LedgerError::InvalidTarget(id.clone()));
        }
        Ok(())
    }
}
