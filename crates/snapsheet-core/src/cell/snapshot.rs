//! Captured cell snapshots

use super::value::CellValue;
use crate::resolve::{resolve, CanonicalValue};

/// One grid cell as captured at export time
///
/// When `formula` is present, `display_value` holds the last computed result
/// (or [`CellValue::Null`] if none is available), never the formula text.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CellSnapshot {
    /// Resolved, human-visible value
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_value: CellValue,
    /// Raw formula text, starting with `=`
    #[cfg_attr(feature = "serde", serde(default))]
    pub formula: Option<String>,
}

impl CellSnapshot {
    /// Capture a cell, normalizing the way the grid hands values over
    ///
    /// String values are trimmed and an empty result becomes `Null`. The
    /// formula is trimmed and dropped unless it is `=` followed by something.
    pub fn new<V: Into<CellValue>>(display_value: V, formula: Option<&str>) -> Self {
        let display_value = match display_value.into() {
            CellValue::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    CellValue::Null
                } else if trimmed.len() == s.len() {
                    CellValue::String(s)
                } else {
                    CellValue::String(trimmed.to_string())
                }
            }
            other => other,
        };

        let formula = formula.and_then(usable_formula).map(str::to_string);

        Self {
            display_value,
            formula,
        }
    }

    /// A cell holding a plain value
    pub fn value<V: Into<CellValue>>(value: V) -> Self {
        Self::new(value, None)
    }

    /// A formula cell with its last computed result
    pub fn formula<V: Into<CellValue>>(formula: &str, computed: V) -> Self {
        Self::new(computed, Some(formula))
    }

    /// An empty cell
    pub fn blank() -> Self {
        Self::default()
    }

    /// Formula text, if the cell holds a formula
    ///
    /// Fields are public, so this re-checks what [`CellSnapshot::new`]
    /// enforces: a bare `=` or text without a leading `=` is no formula.
    pub fn formula_text(&self) -> Option<&str> {
        self.formula.as_deref().and_then(usable_formula)
    }

    /// Check whether the cell has neither a usable value nor a formula
    pub fn is_blank(&self) -> bool {
        self.formula_text().is_none() && resolve(&self.display_value) == CanonicalValue::Null
    }
}

/// Trimmed formula text, if it is `=` followed by a body
fn usable_formula(formula: &str) -> Option<&str> {
    let formula = formula.trim();
    let body = formula.strip_prefix('=')?;
    (!body.trim().is_empty()).then_some(formula)
}
