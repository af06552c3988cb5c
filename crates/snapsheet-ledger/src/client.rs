//! Remote append client

use std::time::Duration;

use snapsheet_core::Grid;

use crate::error::{LedgerError, LedgerResult};
use crate::payload::{build_append_rows, BatchUpdateRequest};
use crate::target::LedgerTarget;

/// Default batch-update endpoint root
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Connection settings for [`LedgerClient`]
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Endpoint root; requests go to `{base_url}/{spreadsheetId}:batchUpdate`
    pub base_url: String,
    /// Bearer token, if the endpoint needs one
    pub access_token: Option<String>,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl LedgerConfig {
    pub fn with_access_token<S: Into<String>>(mut self, token: S) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Result of [`LedgerClient::append_block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Nothing to append; no request was made
    Skipped,
    /// The block was appended
    Appended { rows: usize },
}

/// Appends grid blocks to a remote sheet
pub struct LedgerClient {
    http: reqwest::Client,
    config: LedgerConfig,
}

impl LedgerClient {
    pub fn new(config: LedgerConfig) -> LedgerResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Append a labelled block to the target sheet
    ///
    /// Trailing blank rows are trimmed first. A block with no data rows and
    /// no label carries nothing but gap rows, so it is skipped.
    pub async fn append_block(
        &self,
        target: &LedgerTarget,
        label: &str,
        grid: &Grid,
    ) -> LedgerResult<AppendOutcome> {
        target.validate()?;

        let trimmed = grid.trimmed();
        if trimmed.is_empty() && label.trim().is_empty() {
            tracing::debug!(
                "Nothing to append to {}/{}",
                target.spreadsheet_id,
                target.sheet_id
            );
            return Ok(AppendOutcome::Skipped);
        }

        let rows = build_append_rows(label, trimmed.as_rows(), grid.column_count());
        let count = rows.len();
        self.send(target, &BatchUpdateRequest::append_cells(target.sheet_id, rows))
            .await?;

        tracing::info!(
            "Appended {count} rows to {}/{}",
            target.spreadsheet_id,
            target.sheet_id
        );
        Ok(AppendOutcome::Appended { rows: count })
    }

    /// Send a batch update and return the parsed response body
    pub async fn send(
        &self,
        target: &LedgerTarget,
        body: &BatchUpdateRequest,
    ) -> LedgerResult<serde_json::Value> {
        target.validate()?;
        let url = format!(
            "{}/{}:batchUpdate",
            self.config.base_url.trim_end_matches('/'),
            target.spreadsheet_id
        );

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = remote_error_message(status.as_u16(), &text);
            tracing::warn!("Append to {url} failed: {message}");
            return Err(LedgerError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Human-readable message for a failed request
///
/// Uses the remote `error.message` when the body carries one.
pub fn remote_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("request failed ({status})"))
}
