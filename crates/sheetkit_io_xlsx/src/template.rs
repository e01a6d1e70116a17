//! Template workbook loading.

use std::io::Cursor;
use std::path::Path;

use umya_spreadsheet::{Spreadsheet, reader};

use crate::spec::ExportError;

/// Load an existing workbook file as the export starting point.
///
/// The first worksheet becomes the write target; rows, cells and styles not
/// touched by the export survive as loaded.
pub fn load_template_workbook(path_template: &Path) -> Result<Spreadsheet, ExportError> {
    if !path_template.is_file() {
        return Err(ExportError::FileNotFound(path_template.to_path_buf()));
    }
    reader::xlsx::read(path_template).map_err(|err| ExportError::FormatError {
        message: err.to_string(),
    })
}

/// Load a template workbook from an in-memory byte buffer.
pub fn load_template_workbook_from_bytes(v_template: &[u8]) -> Result<Spreadsheet, ExportError> {
    reader::xlsx::read_reader(Cursor::new(v_template), true).map_err(|err| {
        ExportError::FormatError {
            message: err.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_template_workbook_missing_path() {
        let dir_temp = tempfile::tempdir().unwrap();
        let path_missing = dir_temp.path().join("missing.xlsx");

        let result = load_template_workbook(&path_missing);
        assert!(matches!(result, Err(ExportError::FileNotFound(path)) if path == path_missing));
    }

    #[test]
    fn test_load_template_workbook_rejects_invalid_bytes() {
        let dir_temp = tempfile::tempdir().unwrap();
        let path_bogus = dir_temp.path().join("bogus.xlsx");
        std::fs::File::create(&path_bogus)
            .unwrap()
            .write_all(b"this is not a workbook")
            .unwrap();

        assert!(matches!(
            load_template_workbook(&path_bogus),
            Err(ExportError::FormatError { .. })
        ));
        assert!(matches!(
            load_template_workbook_from_bytes(b"this is not a workbook"),
            Err(ExportError::FormatError { .. })
        ));
    }

    #[test]
    fn test_load_template_workbook_roundtrip() {
        let dir_temp = tempfile::tempdir().unwrap();
        let path_template = dir_temp.path().join("template.xlsx");

        let mut book = umya_spreadsheet::new_file();
        book.get_sheet_mut(&0)
            .unwrap()
            .get_cell_mut((1, 1))
            .set_value_string("header");
        umya_spreadsheet::writer::xlsx::write(&book, &path_template).unwrap();

        let book_loaded = load_template_workbook(&path_template).unwrap();
        assert_eq!(book_loaded.get_sheet(&0).unwrap().get_value((1, 1)), "header");
    }
}
