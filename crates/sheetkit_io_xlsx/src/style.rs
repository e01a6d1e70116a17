//! Cell and merged-region styling on top of the workbook encoder.

use umya_spreadsheet::{
    Border, HorizontalAlignmentValues, Style, VerticalAlignmentValues, Worksheet,
};

use crate::spec::{ExportError, SpecCellStyle, SpecMergedRegion};
use crate::util::cast_coordinate;

////////////////////////////////////////////////////////////////////////////////
// #region StyleConversion

/// Convert a style specification into an encoder style object.
pub fn derive_encoder_style(style: &SpecCellStyle) -> Style {
    let mut style_out = Style::default();

    if let Some(val) = &style.align
        && let Some(align) = derive_horizontal_alignment(val)
    {
        style_out.get_alignment_mut().set_horizontal(align);
    }
    if let Some(val) = &style.valign
        && let Some(align) = derive_vertical_alignment(val)
    {
        style_out.get_alignment_mut().set_vertical(align);
    }
    if style.text_wrap.unwrap_or(false) {
        style_out.get_alignment_mut().set_wrap_text(true);
    }

    if let Some(val) = style.border.or(style.top) {
        style_out
            .get_borders_mut()
            .get_top_border_mut()
            .set_border_style(derive_border_style_name(style.top.unwrap_or(val)));
    }
    if let Some(val) = style.border.or(style.bottom) {
        style_out
            .get_borders_mut()
            .get_bottom_border_mut()
            .set_border_style(derive_border_style_name(style.bottom.unwrap_or(val)));
    }
    if let Some(val) = style.border.or(style.left) {
        style_out
            .get_borders_mut()
            .get_left_border_mut()
            .set_border_style(derive_border_style_name(style.left.unwrap_or(val)));
    }
    if let Some(val) = style.border.or(style.right) {
        style_out
            .get_borders_mut()
            .get_right_border_mut()
            .set_border_style(derive_border_style_name(style.right.unwrap_or(val)));
    }

    style_out
}

/// Map a numeric border code to the encoder border style name.
pub fn derive_border_style_name(code: i64) -> &'static str {
    match code {
        0 => Border::BORDER_NONE,
        1 => Border::BORDER_THIN,
        2 => Border::BORDER_MEDIUM,
        3 => Border::BORDER_DASHED,
        4 => Border::BORDER_DOTTED,
        5 => Border::BORDER_THICK,
        6 => Border::BORDER_DOUBLE,
        7 => Border::BORDER_HAIR,
        8 => Border::BORDER_MEDIUMDASHED,
        9 => Border::BORDER_DASHDOT,
        10 => Border::BORDER_MEDIUMDASHDOT,
        11 => Border::BORDER_DASHDOTDOT,
        12 => Border::BORDER_MEDIUMDASHDOTDOT,
        13 => Border::BORDER_SLANTDASHDOT,
        _ => Border::BORDER_NONE,
    }
}

fn derive_horizontal_alignment(align: &str) -> Option<HorizontalAlignmentValues> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(HorizontalAlignmentValues::General),
        "left" => Some(HorizontalAlignmentValues::Left),
        "center" => Some(HorizontalAlignmentValues::Center),
        "right" => Some(HorizontalAlignmentValues::Right),
        "fill" => Some(HorizontalAlignmentValues::Fill),
        "justify" => Some(HorizontalAlignmentValues::Justify),
        "distributed" => Some(HorizontalAlignmentValues::Distributed),
        _ => None,
    }
}

fn derive_vertical_alignment(align: &str) -> Option<VerticalAlignmentValues> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "top" => Some(VerticalAlignmentValues::Top),
        "bottom" => Some(VerticalAlignmentValues::Bottom),
        "center" | "vcenter" | "vertical_center" => Some(VerticalAlignmentValues::Center),
        "justify" | "vjustify" => Some(VerticalAlignmentValues::Justify),
        "distributed" | "vdistributed" => Some(VerticalAlignmentValues::Distributed),
        _ => None,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleApplication

/// Assign one prepared encoder style to a cell, creating the cell if absent.
pub fn apply_cell_style(
    worksheet: &mut Worksheet,
    n_idx_row: usize,
    n_idx_col: usize,
    style: &Style,
) -> Result<(), ExportError> {
    let coordinate = cast_coordinate(n_idx_row, n_idx_col)?;
    *worksheet.get_style_mut(coordinate) = style.clone();
    Ok(())
}

/// Apply one border code to all four outer edges of a merged region.
///
/// Only the rim cells are touched: the top edge along the first row, the
/// bottom edge along the last row, and the left/right edges along the first
/// and last columns.
pub fn apply_region_border(
    worksheet: &mut Worksheet,
    region: &SpecMergedRegion,
    code_border: i64,
) -> Result<(), ExportError> {
    let c_border_style = derive_border_style_name(code_border);

    for n_idx_col in region.col_start..=region.col_end {
        let coordinate = cast_coordinate(region.row_start, n_idx_col)?;
        worksheet
            .get_style_mut(coordinate)
            .get_borders_mut()
            .get_top_border_mut()
            .set_border_style(c_border_style);

        let coordinate = cast_coordinate(region.row_end, n_idx_col)?;
        worksheet
            .get_style_mut(coordinate)
            .get_borders_mut()
            .get_bottom_border_mut()
            .set_border_style(c_border_style);
    }

    for n_idx_row in region.row_start..=region.row_end {
        let coordinate = cast_coordinate(n_idx_row, region.col_start)?;
        worksheet
            .get_style_mut(coordinate)
            .get_borders_mut()
            .get_left_border_mut()
            .set_border_style(c_border_style);

        let coordinate = cast_coordinate(n_idx_row, region.col_end)?;
        worksheet
            .get_style_mut(coordinate)
            .get_borders_mut()
            .get_right_border_mut()
            .set_border_style(c_border_style);
    }

    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
