//! `sheetkit_io_xlsx` v1:
//! Record-to-worksheet XLSX export engine.
//!
//! Architecture:
//! - `conf`     : constants and default presets
//! - `spec`     : descriptors/models/options/errors
//! - `util`     : pure helper functions
//! - `style`    : cell and merged-region styling
//! - `template` : template workbook loading
//! - `writer`   : export orchestration and serialization
pub mod conf;
pub mod spec;
pub mod style;
pub mod template;
pub mod util;
pub mod writer;

pub use conf::{
    N_BORDER_REGION_DEFAULT, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, derive_default_autofit_policy,
    derive_default_cell_style,
};
pub use spec::{
    EnumFieldValue, ExportError, ExportRecord, SpecAutofitColumnsPolicy, SpecCellStyle,
    SpecExportOptions, SpecExtraCell, SpecFieldDescriptor, SpecMergedRegion,
};
pub use template::{load_template_workbook, load_template_workbook_from_bytes};
pub use writer::{
    export_extra_cells, export_records, export_records_from_template,
    export_records_from_template_with_extra, export_records_selected, export_records_with_extra,
};
