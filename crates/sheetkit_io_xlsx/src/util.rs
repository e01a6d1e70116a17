//! Stateless helper utilities used by the export engine.

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::spec::{
    EnumFieldValue, ExportError, SpecAutofitColumnsPolicy, SpecFieldDescriptor, SpecMergedRegion,
};

////////////////////////////////////////////////////////////////////////////////
// #region FieldRendering

/// Render one field value to its cell text form.
///
/// Missing values render as the empty string, never a placeholder.
pub fn render_field_text(value: &EnumFieldValue) -> String {
    match value {
        EnumFieldValue::None => String::new(),
        EnumFieldValue::Text(val) => val.clone(),
        EnumFieldValue::Boolean(val) => if *val { "True" } else { "False" }.to_string(),
        EnumFieldValue::Number(val) => {
            if val.is_finite() && val.fract() == 0.0 && val.abs() < 9_007_199_254_740_992.0 {
                format!("{}", *val as i64)
            } else {
                val.to_string()
            }
        }
    }
}

/// Short kind label for diagnostics.
pub fn describe_field_value_kind(value: &EnumFieldValue) -> &'static str {
    match value {
        EnumFieldValue::None => "none",
        EnumFieldValue::Text(_) => "text",
        EnumFieldValue::Number(_) => "number",
        EnumFieldValue::Boolean(_) => "boolean",
    }
}

/// Filter descriptors by selection list and excluded control field.
///
/// Output order is always descriptor order, not selection-list order.
/// Selection names with no matching descriptor select nothing.
pub fn select_export_descriptors<'a, T>(
    descriptors: &'a [SpecFieldDescriptor<T>],
    fields_selected: Option<&[String]>,
    field_excluded: Option<&str>,
) -> Vec<&'a SpecFieldDescriptor<T>> {
    descriptors
        .iter()
        .filter(|descriptor| field_excluded != Some(descriptor.name))
        .filter(|descriptor| {
            fields_selected.is_none_or(|l_fields| {
                l_fields.iter().any(|c_name| c_name == descriptor.name)
            })
        })
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CoordinateNaming

/// Convert zero-based column index to `A1`-notation letters.
pub fn derive_column_letters(n_idx_col: usize) -> String {
    let mut n_remaining = n_idx_col + 1;
    let mut l_letters = Vec::new();
    while n_remaining > 0 {
        let n_digit = (n_remaining - 1) % 26;
        l_letters.push((b'A' + n_digit as u8) as char);
        n_remaining = (n_remaining - 1) / 26;
    }
    l_letters.iter().rev().collect()
}

/// Convert zero-based (row, col) to an `A1`-notation cell reference.
pub fn derive_cell_reference(n_idx_row: usize, n_idx_col: usize) -> String {
    format!("{}{}", derive_column_letters(n_idx_col), n_idx_row + 1)
}

/// Convert a merged region to an `A1:C3`-notation range reference.
pub fn derive_region_reference(region: &SpecMergedRegion) -> String {
    format!(
        "{}:{}",
        derive_cell_reference(region.row_start, region.col_start),
        derive_cell_reference(region.row_end, region.col_end)
    )
}

/// Parse an `A1`-notation cell reference back to zero-based (row, col).
pub fn parse_cell_reference(reference: &str) -> Option<(usize, usize)> {
    let n_split = reference.find(|chr: char| chr.is_ascii_digit())?;
    let (c_letters, c_digits) = reference.split_at(n_split);
    if c_letters.is_empty() || !c_letters.chars().all(|chr| chr.is_ascii_uppercase()) {
        return None;
    }

    let mut n_col = 0usize;
    for chr in c_letters.chars() {
        n_col = n_col * 26 + (chr as usize - 'A' as usize + 1);
    }
    let n_row: usize = c_digits.parse().ok()?;
    if n_row == 0 {
        return None;
    }
    Some((n_row - 1, n_col - 1))
}

/// Parse an `A1:C3`-notation range reference back to a merged region.
///
/// A bare cell reference parses as a 1x1 region.
pub fn parse_region_reference(reference: &str) -> Option<SpecMergedRegion> {
    let (c_start, c_end) = match reference.split_once(':') {
        Some((c_start, c_end)) => (c_start, c_end),
        None => (reference, reference),
    };
    let (row_start, col_start) = parse_cell_reference(c_start)?;
    let (row_end, col_end) = parse_cell_reference(c_end)?;
    Some(SpecMergedRegion {
        row_start,
        row_end,
        col_start,
        col_end,
    })
}

/// Convert zero-based (row, col) to the encoder's 1-based `(col, row)` pair,
/// rejecting coordinates beyond worksheet limits.
pub fn cast_coordinate(n_idx_row: usize, n_idx_col: usize) -> Result<(u32, u32), ExportError> {
    if n_idx_row >= N_NROWS_EXCEL_MAX || n_idx_col >= N_NCOLS_EXCEL_MAX {
        return Err(ExportError::CoordinateOverflow {
            row: n_idx_row,
            col: n_idx_col,
        });
    }
    let n_row = u32::try_from(n_idx_row + 1).map_err(|_| ExportError::CoordinateOverflow {
        row: n_idx_row,
        col: n_idx_col,
    })?;
    let n_col = u32::try_from(n_idx_col + 1).map_err(|_| ExportError::CoordinateOverflow {
        row: n_idx_row,
        col: n_idx_col,
    })?;
    Ok((n_col, n_row))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MergePlanning

/// Reject a region that overlaps any previously declared region.
pub fn validate_region_disjoint(
    l_regions_declared: &[SpecMergedRegion],
    region: &SpecMergedRegion,
) -> Result<(), ExportError> {
    if let Some(declared) = l_regions_declared
        .iter()
        .find(|declared| declared.intersects(region))
    {
        return Err(ExportError::MergeOverlap {
            declared: declared.clone(),
            requested: region.clone(),
        });
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AutofitInference

/// Estimate displayed width units for one cell text.
pub fn estimate_width_len(text: &str) -> usize {
    let n_ascii = text.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = text.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

/// Clamp and pad one recorded column width into a final width.
pub fn calculate_autofit_width(
    n_width_recorded: usize,
    policy: &SpecAutofitColumnsPolicy,
) -> usize {
    let n_min = usize::max(1, policy.width_cell_min);
    let n_max = usize::min(255, usize::max(n_min, policy.width_cell_max));
    usize::min(
        n_max,
        usize::max(n_min, n_width_recorded + policy.width_cell_padding),
    )
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
