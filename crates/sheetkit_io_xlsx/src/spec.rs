//! Export specification models and top-level error types.

use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region RecordDescription

/// Rendered value produced by a field accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumFieldValue {
    /// Missing/blank value; renders as the empty string.
    None,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value; renders as `True`/`False`.
    Boolean(bool),
}

/// One exportable field: stable name plus value accessor.
#[derive(Debug, Clone, Copy)]
pub struct SpecFieldDescriptor<T> {
    /// Field name used for selection-by-name and merge-trigger lookup.
    pub name: &'static str,
    /// Reads the field value from one record instance.
    pub accessor: fn(&T) -> EnumFieldValue,
}

/// Record type exportable as worksheet rows.
///
/// `fields` must return descriptors in a fixed order (declaration order by
/// convention); that order is the default column order and the order used to
/// test selected-field membership. A type with no exportable fields returns
/// an empty list, which yields column-less rows rather than an error.
pub trait ExportRecord {
    /// Ordered field descriptors for this record type.
    fn fields() -> Vec<SpecFieldDescriptor<Self>>
    where
        Self: Sized;
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellModels

/// One explicit cell write applied after the record pass, independent of any
/// record.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecExtraCell {
    /// Cell text.
    pub text: String,
    /// Zero-based target row.
    pub row: usize,
    /// Zero-based target column.
    pub col: usize,
    /// Merge `[row..=row_merge_end] x [col..=col_merge_end]` after the write.
    pub if_need_merge: bool,
    /// Inclusive merge end row.
    pub row_merge_end: usize,
    /// Inclusive merge end column.
    pub col_merge_end: usize,
}

impl Default for SpecExtraCell {
    fn default() -> Self {
        Self {
            text: String::new(),
            row: 0,
            col: 0,
            if_need_merge: false,
            row_merge_end: 0,
            col_merge_end: 0,
        }
    }
}

/// Rectangular merged block, all bounds zero-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMergedRegion {
    /// First row of the region.
    pub row_start: usize,
    /// Last row of the region.
    pub row_end: usize,
    /// First column of the region.
    pub col_start: usize,
    /// Last column of the region.
    pub col_end: usize,
}

impl SpecMergedRegion {
    /// Whether two regions share at least one cell.
    pub fn intersects(&self, other: &SpecMergedRegion) -> bool {
        self.row_start <= other.row_end
            && other.row_start <= self.row_end
            && self.col_start <= other.col_end
            && other.col_start <= self.col_end
    }
}

/// Cell style specification with right-side override border codes.
///
/// Border codes follow the numeric scheme of [`crate::style`]: `0` none,
/// `1` thin, `2` medium, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecCellStyle {
    /// Horizontal alignment (`left`, `center`, `right`, ...).
    pub align: Option<String>,
    /// Vertical alignment (`top`, `vcenter`, `bottom`, ...).
    pub valign: Option<String>,
    /// Border code for all four sides.
    pub border: Option<i64>,
    /// Text wrap.
    pub text_wrap: Option<bool>,
    /// Top border override.
    pub top: Option<i64>,
    /// Bottom border override.
    pub bottom: Option<i64>,
    /// Left border override.
    pub left: Option<i64>,
    /// Right border override.
    pub right: Option<i64>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExportOptions

/// Clamp policy for autofit column widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitColumnsPolicy {
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitColumnsPolicy {
    fn default() -> Self {
        Self {
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

/// Per-call options for [`crate::writer::export_records_with_extra`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportOptions {
    /// Zero-based first data row.
    pub row_start: usize,
    /// Zero-based first data column.
    pub col_start: usize,
    /// Field names to export; `None` exports every field.
    pub fields_selected: Option<Vec<String>>,
    /// Boolean field driving per-row auto-merge; the named field is control
    /// metadata and is never exported as a column.
    pub field_merge_trigger: Option<String>,
    /// Apply the default cell style to every written data cell.
    pub if_apply_default_style: bool,
    /// Autofit clamp policy for touched columns.
    pub policy_autofit: SpecAutofitColumnsPolicy,
}

impl Default for SpecExportOptions {
    fn default() -> Self {
        Self {
            row_start: 0,
            col_start: 0,
            fields_selected: None,
            field_merge_trigger: None,
            if_apply_default_style: true,
            policy_autofit: SpecAutofitColumnsPolicy::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// "Export call failed" errors. Every variant aborts the call; no partial
/// documents are returned and nothing is retried.
#[derive(Debug)]
pub enum ExportError {
    /// Template path does not resolve to an existing, readable file.
    FileNotFound(PathBuf),
    /// Template bytes do not parse as a valid workbook.
    FormatError {
        /// Underlying decoder error text.
        message: String,
    },
    /// A merge-trigger field produced a non-boolean value.
    TypeMismatch {
        /// Offending field name.
        field: String,
        /// Kind of value actually produced.
        found: String,
    },
    /// A requested merge region overlaps one declared earlier in this call.
    MergeOverlap {
        /// Previously declared region.
        declared: SpecMergedRegion,
        /// Rejected region.
        requested: SpecMergedRegion,
    },
    /// Merge end bounds precede the start bounds.
    InvalidMergeRange {
        /// Rejected region.
        region: SpecMergedRegion,
    },
    /// Cell coordinate exceeds worksheet limits.
    CoordinateOverflow {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
    },
    /// Workbook serialization failed.
    Encode(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => {
                write!(f, "Template file not found: {}", path.display())
            }
            Self::FormatError { message } => {
                write!(f, "Template is not a valid workbook: {message}")
            }
            Self::TypeMismatch { field, found } => write!(
                f,
                "Merge trigger field {field:?} must be boolean, found {found}"
            ),
            Self::MergeOverlap {
                declared,
                requested,
            } => write!(
                f,
                "Merge region {requested:?} overlaps declared region {declared:?}"
            ),
            Self::InvalidMergeRange { region } => {
                write!(f, "Merge end bounds precede start bounds: {region:?}")
            }
            Self::CoordinateOverflow { row, col } => {
                write!(f, "Cell coordinate exceeds worksheet limits: row={row} col={col}")
            }
            Self::Encode(message) => write!(f, "Workbook serialization failed: {message}"),
        }
    }
}

impl std::error::Error for ExportError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
