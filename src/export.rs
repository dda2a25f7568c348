//! Excel export of rendered tables.

use std::path::{Path, PathBuf};

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};

use crate::error::Result;
use crate::panel::{Record, RecordTable};

/// Column widths are clamped to this range (characters).
const MIN_WIDTH: usize = 8;
const MAX_WIDTH: usize = 50;

/// Write one sheet with a header row followed by `rows`.
pub fn export_table(
    sheet: &str,
    headers: &[&str],
    rows: &[Vec<String>],
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(sheet)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, cells) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, cell) in cells.iter().enumerate().take(headers.len()) {
            worksheet.write_string(row, col as u16, cell)?;
        }
    }

    for (col, header) in headers.iter().enumerate() {
        let widest = rows
            .iter()
            .filter_map(|cells| cells.get(col))
            .map(|cell| cell.chars().count())
            .chain(std::iter::once(header.chars().count()))
            .max()
            .unwrap_or(MIN_WIDTH);
        worksheet.set_column_width(col as u16, (widest + 2).clamp(MIN_WIDTH, MAX_WIDTH) as f64)?;
    }

    if !rows.is_empty() && !headers.is_empty() {
        worksheet.autofilter(0, 0, rows.len() as u32, (headers.len() - 1) as u16)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Export the current rows of a table.
pub fn export_records<R: Record>(
    sheet: &str,
    table: &RecordTable<R>,
    path: &Path,
) -> Result<usize> {
    let rows = table.cell_rows();
    export_table(sheet, R::COLUMNS, &rows, path)?;
    Ok(rows.len())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;
    use serde_json::json;

    #[test]
    fn test_export_table_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("departments.xlsx");
        let rows = vec![
            vec!["1".to_string(), "Operations".to_string()],
            vec!["2".to_string(), "Finance".to_string()],
        ];

        export_table("Departments", &["ID", "Name"], &rows, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx files are zip archives.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_export_records_counts_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let mut table = RecordTable::<Department>::new();
        table
            .apply(Ok(json!([{"departmentId": 1, "departmentName": "Ops"}])))
            .unwrap();

        assert_eq!(export_records("Departments", &table, &path).unwrap(), 1);
        assert!(path.exists());
    }

    #[test]
    fn test_empty_table_still_exports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        export_table("Empty", &["A"], &[], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_filename_has_prefix_and_extension() {
        let name = generate_export_filename("payroll");
        assert!(name.starts_with("payroll_"));
        assert!(name.ends_with(".xlsx"));
    }
}
