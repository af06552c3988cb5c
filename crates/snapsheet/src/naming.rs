//! Export file names

use chrono::NaiveDateTime;

use crate::format::ExportFormat;

/// Longest label kept in a file name
pub const MAX_LABEL_LEN: usize = 80;

/// Derive a file name for an export
///
/// The label is reduced to `[A-Za-z0-9 _.-]`, with each run of other
/// characters replaced by a single `_`. A label that ends up empty falls
/// back to `snapshot-YYYYMMDD-HHMMSS`.
///
/// ```
/// use chrono::NaiveDate;
/// use snapsheet::{export_file_name, ExportFormat};
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 5, 0).unwrap();
/// assert_eq!(export_file_name("Q1 / Close", ExportFormat::Xlsx, now), "Q1 _ Close.xlsx");
/// assert_eq!(export_file_name("", ExportFormat::Csv, now), "snapshot-20240301-090500.csv");
/// ```
pub fn export_file_name(label: &str, format: ExportFormat, now: NaiveDateTime) -> String {
    let stem = sanitize_label(label);
    let stem = if stem.is_empty() {
        format!("snapshot-{}", now.format("%Y%m%d-%H%M%S"))
    } else {
        stem
    };
    format!("{}.{}", stem, format.extension())
}

fn sanitize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_run = false;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '.' | '-') {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    // ASCII only from here, so byte slicing is safe
    let trimmed = trim_edges(&out);
    let truncated = &trimmed[..trimmed.len().min(MAX_LABEL_LEN)];
    trim_edges(truncated).to_string()
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '.' | '_'))
}
