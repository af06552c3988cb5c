//! Value resolution
//!
//! Every exporter turns a [`CellSnapshot`] into what it actually writes
//! through this module. The formula/value priority differs per target:
//!
//! | Target | Formula cell writes |
//! |--------|---------------------|
//! | [`ExportTarget::DelimitedText`] | the formula text (`=A1*2`) |
//! | [`ExportTarget::Ooxml`] | a live formula |
//! | [`ExportTarget::Odf`] | the display value, formula as annotation |
//! | [`ExportTarget::LedgerAppend`] | the display value, formula as note |

use crate::cell::{CellSnapshot, CellValue};

/// A cell value normalized for export
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanonicalValue<'a> {
    /// Finite number
    Number(f64),
    /// Boolean
    Boolean(bool),
    /// Non-blank string, exactly as captured
    String(&'a str),
    /// Nothing to write
    Null,
}

/// Output format a cell is being resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportTarget {
    /// CSV / TSV
    DelimitedText,
    /// XLSX worksheet
    Ooxml,
    /// ODS content
    Odf,
    /// Remote append-cells payload
    LedgerAppend,
}

impl ExportTarget {
    /// Whether formulas are written in place of the display value
    pub fn prefers_formula(self) -> bool {
        matches!(self, ExportTarget::DelimitedText | ExportTarget::Ooxml)
    }
}

/// What an exporter should write for one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    /// Formula text including its leading `=`
    Formula(&'a str),
    /// A value, with the formula (if any) carried as annotation
    Value {
        /// Value to write
        value: CanonicalValue<'a>,
        /// Formula text to attach as a note
        annotation: Option<&'a str>,
    },
}

impl Resolved<'_> {
    /// Check if nothing at all would be written
    pub fn is_blank(&self) -> bool {
        matches!(
            self,
            Resolved::Value {
                value: CanonicalValue::Null,
                annotation: None,
            }
        )
    }
}

/// Normalize a display value
///
/// Non-finite numbers and all-whitespace strings resolve to
/// [`CanonicalValue::Null`]. Other strings are kept untouched.
pub fn resolve(value: &CellValue) -> CanonicalValue<'_> {
    match value {
        CellValue::Null => CanonicalValue::Null,
        CellValue::Boolean(b) => CanonicalValue::Boolean(*b),
        CellValue::Number(n) if n.is_finite() => CanonicalValue::Number(*n),
        CellValue::Number(_) => CanonicalValue::Null,
        CellValue::String(s) if s.trim().is_empty() => CanonicalValue::Null,
        CellValue::String(s) => CanonicalValue::String(s),
    }
}

/// Resolve a cell for a specific output format
pub fn resolve_for(cell: &CellSnapshot, target: ExportTarget) -> Resolved<'_> {
    match cell.formula_text() {
        Some(formula) if target.prefers_formula() => Resolved::Formula(formula),
        annotation => Resolved::Value {
            value: resolve(&cell.display_value),
            annotation,
        },
    }
}

/// Format a finite number as the shortest decimal that round-trips
///
/// Integral values carry no fractional part (`5`, not `5.0`), and no
/// locale grouping is ever applied.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // -0 prints as "-0"
        return "0".to_string();
    }
    format!("{}", n)
}
