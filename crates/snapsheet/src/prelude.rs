//! Prelude module - common imports for snapsheet users
//!
//! ```rust
//! use snapsheet::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellSnapshot,
    CellValue,
    // Errors
    ExportError,
    ExportFormat,
    ExportResult,
    Grid,
    // Extension traits
    GridExt,
};
