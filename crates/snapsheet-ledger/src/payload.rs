//! Append-cells payload
//!
//! Wire structs mirror the remote batch-update JSON. Absent fields are
//! skipped, so an empty cell serializes as `{}`.

use serde::{Deserialize, Serialize};
use snapsheet_core::{formula_note, resolve_for, CanonicalValue, CellSnapshot, ExportTarget, Resolved};

/// Blank rows emitted before every appended block
pub const GAP_ROWS: usize = 4;

/// Field mask sent with every append
pub const APPEND_FIELDS: &str = "userEnteredValue,note";

/// Typed cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtendedValue {
    NumberValue(f64),
    BoolValue(bool),
    StringValue(String),
}

/// One appended cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_entered_value: Option<ExtendedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CellData {
    /// Map a captured cell; value and formula note are independent
    pub fn from_snapshot(cell: &CellSnapshot) -> Self {
        let (value, annotation) = match resolve_for(cell, ExportTarget::LedgerAppend) {
            Resolved::Value { value, annotation } => (value, annotation),
            Resolved::Formula(text) => (CanonicalValue::Null, Some(text)),
        };

        let user_entered_value = match value {
            CanonicalValue::Number(n) => Some(ExtendedValue::NumberValue(n)),
            CanonicalValue::Boolean(b) => Some(ExtendedValue::BoolValue(b)),
            CanonicalValue::String(s) => Some(ExtendedValue::StringValue(s.to_string())),
            CanonicalValue::Null => None,
        };

        Self {
            user_entered_value,
            note: annotation.map(formula_note),
        }
    }

    /// Check if the cell serializes as `{}`
    pub fn is_empty(&self) -> bool {
        self.user_entered_value.is_none() && self.note.is_none()
    }
}

/// One appended row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowData {
    pub values: Vec<CellData>,
}

impl RowData {
    fn blank(columns: usize) -> Self {
        Self {
            values: vec![CellData::default(); columns],
        }
    }
}

/// Assemble the rows of one appended block
///
/// The block is [`GAP_ROWS`] blank rows, a label row when `label` is not
/// blank, then one row per entry of `cells`. Every row is
/// `max(1, column_count)` wide; data rows are padded or truncated to fit.
pub fn build_append_rows(label: &str, cells: &[Vec<CellSnapshot>], column_count: usize) -> Vec<RowData> {
    let columns = column_count.max(1);
    let label = label.trim();

    let mut rows = Vec::with_capacity(GAP_ROWS + 1 + cells.len());
    rows.extend((0..GAP_ROWS).map(|_| RowData::blank(columns)));

    if !label.is_empty() {
        let mut row = RowData::blank(columns);
        row.values[0].user_entered_value = Some(ExtendedValue::StringValue(label.to_string()));
        rows.push(row);
    }

    for source in cells {
        let mut values: Vec<CellData> = source.iter().take(columns).map(CellData::from_snapshot).collect();
        values.resize(columns, CellData::default());
        rows.push(RowData { values });
    }

    rows
}

/// Batch-update request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

/// A single batch-update request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub append_cells: AppendCellsRequest,
}

/// Append rows after the last row with data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendCellsRequest {
    pub sheet_id: i64,
    pub rows: Vec<RowData>,
    pub fields: String,
}

impl BatchUpdateRequest {
    /// Wrap rows into a single append-cells request
    pub fn append_cells(sheet_id: i64, rows: Vec<RowData>) -> Self {
        Self {
            requests: vec![Request {
                append_cells: AppendCellsRequest {
                    sheet_id,
                    rows,
                    fields: APPEND_FIELDS.to_string(),
                },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use snapsheet_core::CellValue;

    #[test]
    fn test_empty_block_is_gap_only() {
        let rows = build_append_rows("", &[], 3);
        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert_eq!(row.values.len(), 3);
            assert!(row.values.iter().all(CellData::is_empty));
        }
    }

    #[test]
    fn test_label_then_data() {
        let cells = vec![vec![CellSnapshot::value(5)]];
        let rows = build_append_rows("  Q1 Close ", &cells, 1);

        assert_eq!(rows.len(), 6);
        assert_eq!(
            serde_json::to_value(&rows[4]).unwrap(),
            json!({"values": [{"userEnteredValue": {"stringValue": "Q1 Close"}}]})
        );
        assert_eq!(
            serde_json::to_value(&rows[5]).unwrap(),
            json!({"values": [{"userEnteredValue": {"numberValue": 5.0}}]})
        );
    }

    #[test]
    fn test_blank_label_skipped() {
        let cells = vec![vec![CellSnapshot::value(1)]];
        assert_eq!(build_append_rows(" \t", &cells, 1).len(), 5);
    }

    #[test]
    fn test_minimum_one_column() {
        let rows = build_append_rows("x", &[], 0);
        assert!(rows.iter().all(|r| r.values.len() == 1));
    }

    #[test]
    fn test_rows_padded_and_truncated() {
        let cells = vec![
            vec![CellSnapshot::value(1)],
            vec![CellSnapshot::value(1), CellSnapshot::value(2), CellSnapshot::value(3)],
        ];
        let rows = build_append_rows("", &cells, 2);
        assert_eq!(rows[4].values.len(), 2);
        assert!(rows[4].values[1].is_empty());
        assert_eq!(rows[5].values.len(), 2);
    }

    #[test]
    fn test_cell_mapping() {
        let cases = [
            (CellSnapshot::value(true), json!({"userEnteredValue": {"boolValue": true}})),
            (CellSnapshot::value("hi"), json!({"userEnteredValue": {"stringValue": "hi"}})),
            (CellSnapshot::value(f64::NAN), json!({})),
            (CellSnapshot::blank(), json!({})),
            (
                CellSnapshot::formula("=A1*2", 100.0),
                json!({"userEnteredValue": {"numberValue": 100.0}, "note": "Formula: =A1*2"}),
            ),
            (
                CellSnapshot::formula("=NA()", CellValue::Null),
                json!({"note": "Formula: =NA()"}),
            ),
        ];
        for (cell, expected) in cases {
            assert_eq!(serde_json::to_value(CellData::from_snapshot(&cell)).unwrap(), expected);
        }
    }

    #[test]
    fn test_bare_equals_gets_no_note() {
        let cell = CellSnapshot {
            display_value: CellValue::Number(3.0),
            formula: Some("=".to_string()),
        };
        assert_eq!(
            serde_json::to_value(CellData::from_snapshot(&cell)).unwrap(),
            json!({"userEnteredValue": {"numberValue": 3.0}})
        );
    }

    #[test]
    fn test_request_shape() {
        let body = BatchUpdateRequest::append_cells(42, build_append_rows("", &[], 1));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["requests"][0]["appendCells"]["sheetId"], json!(42));
        assert_eq!(value["requests"][0]["appendCells"]["fields"], json!("userEnteredValue,note"));
        assert_eq!(value["requests"][0]["appendCells"]["rows"][0], json!({"values": [{}]}));
    }

    proptest::proptest! {
        #[test]
        fn prop_block_shape(label in "[ a-z]{0,6}", data_rows in 0usize..6, width in 0usize..5, column_count in 0usize..6) {
            let cells = vec![vec![CellSnapshot::value(1); width]; data_rows];
            let rows = build_append_rows(&label, &cells, column_count);

            let label_rows = usize::from(!label.trim().is_empty());
            proptest::prop_assert_eq!(rows.len(), GAP_ROWS + label_rows + data_rows);
            proptest::prop_assert!(rows.iter().all(|r| r.values.len() == column_count.max(1)));
            proptest::prop_assert!(rows[..GAP_ROWS].iter().all(|r| r.values.iter().all(CellData::is_empty)));
        }
    }
}
