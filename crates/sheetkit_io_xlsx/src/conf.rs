//! XLSX constants and default preset factories.

use crate::spec::{SpecAutofitColumnsPolicy, SpecCellStyle};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Border code applied to the outer edges of merged regions.
pub const N_BORDER_REGION_DEFAULT: i64 = 1;

/// Build the default cell style: thin borders on all four sides, horizontal
/// and vertical centering, text wrap enabled.
///
/// Every styled cell in one export call receives this same style definition.
pub fn derive_default_cell_style() -> SpecCellStyle {
    SpecCellStyle {
        align: Some("center".to_string()),
        valign: Some("vcenter".to_string()),
        border: Some(1),
        text_wrap: Some(true),
        ..Default::default()
    }
}

/// Build the default autofit clamp policy.
pub fn derive_default_autofit_policy() -> SpecAutofitColumnsPolicy {
    SpecAutofitColumnsPolicy::default()
}
