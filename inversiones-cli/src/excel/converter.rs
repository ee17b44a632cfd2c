//! XLSX to CSV conversion with preamble removal

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};
use csv::WriterBuilder;

use super::header::detect_header_row;

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub csv_path: PathBuf,
    /// 1-based sheet row the output starts at
    pub header_row: u32,
    pub rows_written: usize,
    pub rows_skipped: usize,
}

/// `report.xlsx` -> `report.csv` next to it
pub fn default_csv_path(xlsx_path: &Path) -> PathBuf {
    xlsx_path.with_extension("csv")
}

/// Convert the first worksheet of `xlsx_path` to CSV
///
/// With `auto_clean` the output starts at the detected header row, otherwise
/// at the first row. Cell values are written as displayed, without quoting
/// beyond what CSV requires. Leading empty columns are kept as empty fields
/// so column positions match the sheet.
pub fn convert_xlsx_to_csv(
    xlsx_path: &Path,
    csv_path: Option<&Path>,
    auto_clean: bool,
) -> Result<ConversionReport> {
    let csv_path = csv_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_csv_path(xlsx_path));

    let mut workbook: Xlsx<_> = open_workbook(xlsx_path)
        .with_context(|| format!("Failed to open Excel file: {}", xlsx_path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("Excel file has no sheets")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let start_row = if auto_clean { detect_header_row(&range) } else { 0 };
    let (first_row, first_col) = range.start().unwrap_or((0, 0));

    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(&csv_path)
        .with_context(|| format!("Failed to create CSV file: {}", csv_path.display()))?;

    let mut rows_written = 0;
    let mut rows_skipped = 0;

    for (offset, row) in range.rows().enumerate() {
        let row_idx = first_row + offset as u32;
        if row_idx < start_row {
            rows_skipped += 1;
            continue;
        }

        let record = std::iter::repeat_n(String::new(), first_col as usize)
            .chain(row.iter().map(cell_to_string));
        writer
            .write_record(record)
            .with_context(|| format!("Failed to write sheet row {}", row_idx + 1))?;
        rows_written += 1;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    log::info!(
        "Converted {} -> {} (header at row {}, {} rows written, {} skipped)",
        xlsx_path.display(),
        csv_path.display(),
        start_row + 1,
        rows_written,
        rows_skipped
    );

    Ok(ConversionReport {
        csv_path,
        header_row: start_row + 1,
        rows_written,
        rows_skipped,
    })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    fn read_csv(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    fn write_report(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "REPORTE DE SEGUIMIENTO").unwrap();
        sheet.write_string(1, 0, "Fecha de generación:").unwrap();
        sheet.write_string(1, 1, "01/12/2024").unwrap();
        let headers = ["CUI", "NOMBRE DE LA INVERSION", "FUNCION", "MONTO VIABLE"];
        for (col, name) in headers.iter().enumerate() {
            sheet.write_string(2, col as u16, *name).unwrap();
        }
        sheet.write_number(3, 0, 2001.0).unwrap();
        sheet.write_string(3, 1, "CREACIÓN DEL PUENTE, DISTRITO YURA").unwrap();
        sheet.write_string(3, 2, "TRANSPORTE").unwrap();
        sheet.write_number(3, 3, 1500.5).unwrap();
        sheet.write_number(4, 0, 2002.0).unwrap();
        sheet.write_string(4, 1, "MEJORAMIENTO, \"ESCUELA\" 40").unwrap();
        sheet.write_string(4, 2, "EDUCACIÓN").unwrap();
        sheet.write_number(4, 3, 300.0).unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_preamble_rows_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let xlsx = dir.path().join("inversiones_4.xlsx");
        write_report(&xlsx);

        let report = convert_xlsx_to_csv(&xlsx, None, true).unwrap();

        assert_eq!(report.csv_path, dir.path().join("inversiones_4.csv"));
        assert_eq!(report.header_row, 3);
        assert_eq!(report.rows_skipped, 2);
        assert_eq!(report.rows_written, 3);

        let rows = read_csv(&report.csv_path);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["CUI", "NOMBRE DE LA INVERSION", "FUNCION", "MONTO VIABLE"]);
        assert_eq!(
            rows[1],
            vec!["2001", "CREACIÓN DEL PUENTE, DISTRITO YURA", "TRANSPORTE", "1500.5"]
        );
        assert_eq!(rows[2], vec!["2002", "MEJORAMIENTO, \"ESCUELA\" 40", "EDUCACIÓN", "300"]);
    }

    #[test]
    fn test_no_clean_keeps_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let xlsx = dir.path().join("report.xlsx");
        let csv_out = dir.path().join("out").join("custom.csv");
        std::fs::create_dir_all(csv_out.parent().unwrap()).unwrap();
        write_report(&xlsx);

        let report = convert_xlsx_to_csv(&xlsx, Some(&csv_out), false).unwrap();

        assert_eq!(report.csv_path, csv_out);
        assert_eq!(report.header_row, 1);
        assert_eq!(report.rows_skipped, 0);

        let rows = read_csv(&csv_out);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0][0], "REPORTE DE SEGUIMIENTO");
        assert_eq!(rows[0][1], "");
    }

    #[test]
    fn test_leading_empty_columns_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let xlsx = dir.path().join("offset.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for col in 1..4u16 {
            sheet.write_string(0, col, format!("H{}", col)).unwrap();
            sheet.write_string(1, col, format!("V{}", col)).unwrap();
        }
        workbook.save(&xlsx).unwrap();

        let report = convert_xlsx_to_csv(&xlsx, None, true).unwrap();

        let rows = read_csv(&report.csv_path);
        assert_eq!(rows[0], vec!["", "H1", "H2", "H3"]);
        assert_eq!(rows[1], vec!["", "V1", "V2", "V3"]);
    }

    #[test]
    fn test_date_cells_are_written_as_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let xlsx = dir.path().join("dates.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("dd/mm/yyyy");
        let date = ExcelDateTime::from_ymd(2024, 12, 1).unwrap();
        for (col, name) in ["FECHA", "ACTIVO", "MONTO"].iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        sheet.write_datetime_with_format(1, 0, &date, &date_format).unwrap();
        sheet.write_boolean(1, 1, true).unwrap();
        sheet.write_number(1, 2, 1500.5).unwrap();
        workbook.save(&xlsx).unwrap();

        let report = convert_xlsx_to_csv(&xlsx, None, true).unwrap();

        let rows = read_csv(&report.csv_path);
        assert_eq!(rows[1], vec!["2024-12-01 00:00:00", "true", "1500.5"]);
    }

    #[test]
    fn test_non_workbook_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("error_page.xlsx");
        std::fs::write(&bogus, b"<html>Service Unavailable</html>").unwrap();

        assert!(convert_xlsx_to_csv(&bogus, None, true).is_err());
    }
}
