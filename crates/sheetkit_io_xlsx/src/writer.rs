//! Export orchestration: record walk, overlay pass, merge planning and
//! workbook serialization.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use umya_spreadsheet::{Spreadsheet, Style, Worksheet, new_file, writer as encoder};

use crate::conf::{N_BORDER_REGION_DEFAULT, derive_default_cell_style};
use crate::spec::{
    EnumFieldValue, ExportError, ExportRecord, SpecAutofitColumnsPolicy, SpecExportOptions,
    SpecExtraCell, SpecFieldDescriptor, SpecMergedRegion,
};
use crate::style::{apply_cell_style, apply_region_border, derive_encoder_style};
use crate::template::load_template_workbook;
use crate::util::{
    calculate_autofit_width, cast_coordinate, derive_column_letters, derive_region_reference,
    describe_field_value_kind, estimate_width_len, parse_region_reference, render_field_text,
    select_export_descriptors, validate_region_disjoint,
};

////////////////////////////////////////////////////////////////////////////////
// #region PublicOperations

/// Export a list of explicit cells into a blank workbook.
///
/// Each cell is written via get-or-create; cells flagged `if_need_merge`
/// declare a bordered merged region. No default styling is applied.
pub fn export_extra_cells(l_extra: &[SpecExtraCell]) -> Result<Vec<u8>, ExportError> {
    let mut book = new_file();
    let mut report = ReportExportPass::default();

    let worksheet = derive_first_worksheet_mut(&mut book)?;
    write_extra_cells(worksheet, l_extra, None, &mut report)?;

    serialize_workbook(&book)
}

/// Export every field of every record into a blank workbook.
///
/// Records become consecutive rows starting at `(row_start, col_start)`;
/// field order is descriptor order.
pub fn export_records<T: ExportRecord>(
    l_records: &[T],
    row_start: usize,
    col_start: usize,
) -> Result<Vec<u8>, ExportError> {
    let mut book = new_file();
    let mut report = ReportExportPass::default();

    let worksheet = derive_first_worksheet_mut(&mut book)?;
    write_record_rows(
        worksheet,
        l_records,
        &SpecExportOptions {
            row_start,
            col_start,
            if_apply_default_style: false,
            ..Default::default()
        },
        &mut report,
    )?;

    serialize_workbook(&book)
}

/// Export only the named fields of every record into a blank workbook.
///
/// Exported column order follows the full field order, not the order of
/// `fields_selected`.
pub fn export_records_selected<T: ExportRecord>(
    l_records: &[T],
    fields_selected: &[String],
    row_start: usize,
    col_start: usize,
) -> Result<Vec<u8>, ExportError> {
    let mut book = new_file();
    let mut report = ReportExportPass::default();

    let worksheet = derive_first_worksheet_mut(&mut book)?;
    write_record_rows(
        worksheet,
        l_records,
        &SpecExportOptions {
            row_start,
            col_start,
            fields_selected: Some(fields_selected.to_vec()),
            if_apply_default_style: false,
            ..Default::default()
        },
        &mut report,
    )?;

    serialize_workbook(&book)
}

/// Full-featured export: field selection, per-row auto-merge, default
/// styling, overlay pass, and autofit of every touched column.
pub fn export_records_with_extra<T: ExportRecord>(
    l_records: &[T],
    l_extra: &[SpecExtraCell],
    options: &SpecExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let mut book = new_file();
    let mut report = ReportExportPass::default();
    let style_default = if options.if_apply_default_style {
        Some(derive_encoder_style(&derive_default_cell_style()))
    } else {
        None
    };

    let worksheet = derive_first_worksheet_mut(&mut book)?;
    write_record_rows(worksheet, l_records, options, &mut report)?;
    write_extra_cells(worksheet, l_extra, style_default.as_ref(), &mut report)?;
    apply_autofit_columns(worksheet, &report.dict_width_by_col, &options.policy_autofit)?;

    serialize_workbook(&book)
}

/// Export records over a template workbook loaded from `path_template`.
///
/// Get-or-create semantics reuse the template's rows and cells; everything
/// the export does not touch survives as loaded.
pub fn export_records_from_template<T: ExportRecord>(
    l_records: &[T],
    path_template: &Path,
    fields_selected: Option<&[String]>,
    row_start: usize,
    col_start: usize,
) -> Result<Vec<u8>, ExportError> {
    let mut book = load_template_workbook(path_template)?;
    let mut report = ReportExportPass::default();

    let worksheet = derive_first_worksheet_mut(&mut book)?;
    seed_template_regions(worksheet, &mut report);
    write_record_rows(
        worksheet,
        l_records,
        &SpecExportOptions {
            row_start,
            col_start,
            fields_selected: fields_selected.map(<[String]>::to_vec),
            if_apply_default_style: false,
            ..Default::default()
        },
        &mut report,
    )?;

    serialize_workbook(&book)
}

/// Template-based export followed by an unstyled overlay pass.
pub fn export_records_from_template_with_extra<T: ExportRecord>(
    l_records: &[T],
    l_extra: &[SpecExtraCell],
    path_template: &Path,
    row_start: usize,
    col_start: usize,
) -> Result<Vec<u8>, ExportError> {
    let mut book = load_template_workbook(path_template)?;
    let mut report = ReportExportPass::default();

    let worksheet = derive_first_worksheet_mut(&mut book)?;
    seed_template_regions(worksheet, &mut report);
    write_record_rows(
        worksheet,
        l_records,
        &SpecExportOptions {
            row_start,
            col_start,
            if_apply_default_style: false,
            ..Default::default()
        },
        &mut report,
    )?;
    write_extra_cells(worksheet, l_extra, None, &mut report)?;

    serialize_workbook(&book)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PassState

/// Per-call accumulator: declared merge regions and touched-column widths.
#[derive(Debug, Default)]
struct ReportExportPass {
    l_regions_merged: Vec<SpecMergedRegion>,
    dict_width_by_col: BTreeMap<usize, usize>,
}

/// Register merged regions already present in a loaded template so a merge
/// declared by this call cannot silently overlap one of them.
fn seed_template_regions(worksheet: &Worksheet, report: &mut ReportExportPass) {
    for range in worksheet.get_merge_cells() {
        if let Some(region) = parse_region_reference(&range.get_range()) {
            report.l_regions_merged.push(region);
        }
    }
}

impl ReportExportPass {
    fn record_width(&mut self, n_idx_col: usize, n_width: usize) {
        let n_width_recorded = self.dict_width_by_col.entry(n_idx_col).or_insert(0);
        *n_width_recorded = usize::max(*n_width_recorded, n_width);
    }

    fn declare_region(&mut self, region: SpecMergedRegion) -> Result<(), ExportError> {
        validate_region_disjoint(&self.l_regions_merged, &region)?;
        self.l_regions_merged.push(region);
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RecordPass

fn write_record_rows<T: ExportRecord>(
    worksheet: &mut Worksheet,
    l_records: &[T],
    options: &SpecExportOptions,
    report: &mut ReportExportPass,
) -> Result<(), ExportError> {
    let l_descriptors = T::fields();
    let l_descriptors_exported = select_export_descriptors(
        &l_descriptors,
        options.fields_selected.as_deref(),
        options.field_merge_trigger.as_deref(),
    );
    let n_cols_exported = l_descriptors_exported.len();
    let descriptor_trigger = options.field_merge_trigger.as_deref().and_then(|c_name| {
        l_descriptors
            .iter()
            .find(|descriptor| descriptor.name == c_name)
    });
    let style_default = if options.if_apply_default_style {
        Some(derive_encoder_style(&derive_default_cell_style()))
    } else {
        None
    };

    let mut n_idx_row = options.row_start;
    for record in l_records {
        let mut n_idx_col = options.col_start;
        for descriptor in &l_descriptors_exported {
            let c_text = render_field_text(&(descriptor.accessor)(record));
            write_cell_text(worksheet, n_idx_row, n_idx_col, &c_text)?;
            if let Some(style) = &style_default {
                apply_cell_style(worksheet, n_idx_row, n_idx_col, style)?;
            }
            report.record_width(n_idx_col, estimate_width_len(&c_text));
            n_idx_col += 1;
        }

        // The merged band is anchored at column 0 regardless of col_start.
        if let Some(descriptor) = descriptor_trigger
            && evaluate_merge_trigger(descriptor, record)?
            && n_cols_exported > 1
        {
            declare_merged_region(
                worksheet,
                SpecMergedRegion {
                    row_start: n_idx_row,
                    row_end: n_idx_row,
                    col_start: 0,
                    col_end: n_cols_exported - 1,
                },
                report,
            )?;
        }

        n_idx_row += 1;
    }

    Ok(())
}

fn evaluate_merge_trigger<T>(
    descriptor: &SpecFieldDescriptor<T>,
    record: &T,
) -> Result<bool, ExportError> {
    match (descriptor.accessor)(record) {
        EnumFieldValue::Boolean(val) => Ok(val),
        other => Err(ExportError::TypeMismatch {
            field: descriptor.name.to_string(),
            found: describe_field_value_kind(&other).to_string(),
        }),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OverlayPass

fn write_extra_cells(
    worksheet: &mut Worksheet,
    l_extra: &[SpecExtraCell],
    style_default: Option<&Style>,
    report: &mut ReportExportPass,
) -> Result<(), ExportError> {
    for element in l_extra {
        write_cell_text(worksheet, element.row, element.col, &element.text)?;
        if let Some(style) = style_default {
            apply_cell_style(worksheet, element.row, element.col, style)?;
        }
        report.record_width(element.col, estimate_width_len(&element.text));

        if element.if_need_merge {
            declare_merged_region(
                worksheet,
                SpecMergedRegion {
                    row_start: element.row,
                    row_end: element.row_merge_end,
                    col_start: element.col,
                    col_end: element.col_merge_end,
                },
                report,
            )?;
        }
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WorksheetPrimitives

/// Write one text value at a zero-based (row, col), creating row and cell on
/// first reference and overwriting pre-existing content.
fn write_cell_text(
    worksheet: &mut Worksheet,
    n_idx_row: usize,
    n_idx_col: usize,
    text: &str,
) -> Result<(), ExportError> {
    let coordinate = cast_coordinate(n_idx_row, n_idx_col)?;
    worksheet.get_cell_mut(coordinate).set_value_string(text);
    Ok(())
}

fn declare_merged_region(
    worksheet: &mut Worksheet,
    region: SpecMergedRegion,
    report: &mut ReportExportPass,
) -> Result<(), ExportError> {
    if region.row_end < region.row_start || region.col_end < region.col_start {
        return Err(ExportError::InvalidMergeRange { region });
    }
    // 1x1 spans declare nothing.
    if region.row_start == region.row_end && region.col_start == region.col_end {
        return Ok(());
    }
    cast_coordinate(region.row_end, region.col_end)?;

    report.declare_region(region.clone())?;
    worksheet.add_merge_cells(derive_region_reference(&region));
    apply_region_border(worksheet, &region, N_BORDER_REGION_DEFAULT)?;
    Ok(())
}

fn apply_autofit_columns(
    worksheet: &mut Worksheet,
    dict_width_by_col: &BTreeMap<usize, usize>,
    policy: &SpecAutofitColumnsPolicy,
) -> Result<(), ExportError> {
    for (n_idx_col, n_width_recorded) in dict_width_by_col {
        let n_width_final = calculate_autofit_width(*n_width_recorded, policy);
        worksheet
            .get_column_dimension_mut(&derive_column_letters(*n_idx_col))
            .set_width(n_width_final as f64);
    }
    Ok(())
}

fn derive_first_worksheet_mut(book: &mut Spreadsheet) -> Result<&mut Worksheet, ExportError> {
    book.get_sheet_mut(&0).ok_or_else(|| ExportError::FormatError {
        message: "Workbook has no worksheet.".to_string(),
    })
}

/// Serialize the finished workbook into a byte buffer.
///
/// The buffer is handed to the caller only after the encoder has flushed
/// every byte, so ownership transfer replaces any close-suppression scheme.
fn serialize_workbook(book: &Spreadsheet) -> Result<Vec<u8>, ExportError> {
    let mut cursor = Cursor::new(Vec::new());
    encoder::xlsx::write_writer(book, &mut cursor)
        .map_err(|err| ExportError::Encode(err.to_string()))?;
    Ok(cursor.into_inner())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
