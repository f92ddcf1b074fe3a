use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook, Data, Range, Reader, Xlsx, XlsxError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Options for reading Excel files
#[derive(Debug, Clone, Default)]
pub struct XlsxReadOptions {
    /// Whether date serials count from 1904-01-01 instead of 1899-12-30.
    ///
    /// The workbook's own date-system setting is not read; set this for
    /// workbooks saved with the 1904 system or their dates land 1462 days
    /// early.
    pub date1904: bool,
}

impl XlsxReadOptions {
    /// Select the 1904 date system
    #[must_use]
    pub fn with_date1904(mut self, date1904: bool) -> Self {
        self.date1904 = date1904;
        self
    }
}

fn xlsx_error(e: XlsxError) -> SheetError {
    SheetError::Xlsx(e.to_string())
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Dates stay numeric: the serial is days since the workbook epoch
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Lay a calamine range out from A1.
///
/// A range starts at its first non-empty cell; leading rows and columns are
/// padded back in so sheet coordinates match the workbook's.
fn range_to_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let (row_offset, col_offset) = range
        .start()
        .map_or((0, 0), |(r, c)| (r as usize, c as usize));

    let mut data: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];

    for row in range.rows() {
        let mut row_data: Vec<CellValue> = vec![CellValue::Null; col_offset];
        row_data.extend(row.iter().map(data_to_cell_value));
        data.push(row_data);
    }

    data
}

impl Sheet {
    /// Load a sheet from an Excel file (first sheet)
    ///
    /// Date serials are taken in the 1900 date system. Use
    /// [`Sheet::from_xlsx_with_options`] with
    /// [`XlsxReadOptions::with_date1904`] for 1904-system workbooks.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened or read.
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_xlsx_with_options(path, XlsxReadOptions::default())
    }

    /// Load the first sheet of an Excel file with options
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened or read.
    pub fn from_xlsx_with_options<P: AsRef<Path>>(
        path: P,
        options: XlsxReadOptions,
    ) -> Result<Self> {
        let workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref()).map_err(xlsx_error)?;

        let sheet_names = workbook.sheet_names();
        let Some(first) = sheet_names.first() else {
            return Ok(Sheet::new());
        };

        Self::from_xlsx_sheet_with_options(path, first, options)
    }

    /// Load a specific sheet from an Excel file by name
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened, sheet not found, or read fails.
    pub fn from_xlsx_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        Self::from_xlsx_sheet_with_options(path, sheet_name, XlsxReadOptions::default())
    }

    /// Load a specific sheet from an Excel file with options
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened, sheet not found, or read fails.
    pub fn from_xlsx_sheet_with_options<P: AsRef<Path>>(
        path: P,
        sheet_name: &str,
        options: XlsxReadOptions,
    ) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> =
            open_workbook(path.as_ref()).map_err(xlsx_error)?;

        if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
            return Err(SheetError::SheetNotFound {
                name: sheet_name.to_string(),
            });
        }

        let range = workbook.worksheet_range(sheet_name).map_err(xlsx_error)?;

        let mut sheet = Sheet::with_name(sheet_name);
        *sheet.data_mut() = range_to_rows(&range);
        sheet.set_date1904(options.date1904);

        Ok(sheet)
    }

    /// Get sheet names from an Excel file without loading data
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened.
    pub fn xlsx_sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref()).map_err(xlsx_error)?;

        Ok(workbook.sheet_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{Format, Workbook};
    use tempfile::tempdir;

    #[test]
    fn test_xlsx_read_types() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Types").unwrap();
        worksheet.write_string(0, 0, "text").unwrap();
        worksheet.write_number(0, 1, 42.0).unwrap();
        worksheet.write_boolean(0, 2, true).unwrap();
        let date = Format::new().set_num_format("yyyy-mm-dd");
        worksheet
            .write_number_with_format(0, 3, 44202.0, &date)
            .unwrap();
        workbook.save(&path).unwrap();

        let sheet = Sheet::from_xlsx(&path).unwrap();

        assert_eq!(sheet.name(), "Types");
        assert!(matches!(sheet.get(0, 0).unwrap(), CellValue::String(s) if s == "text"));
        assert!(matches!(sheet.get(0, 1).unwrap(), CellValue::Float(f) if (*f - 42.0).abs() < 0.01));
        assert!(matches!(sheet.get(0, 2).unwrap(), CellValue::Bool(true)));
        assert!(matches!(sheet.get(0, 3).unwrap(), CellValue::Float(f) if (*f - 44202.0).abs() < 0.01));
    }

    #[test]
    fn test_xlsx_range_offset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(2, 1, "Region").unwrap();
        worksheet.write_string(3, 1, "East").unwrap();
        workbook.save(&path).unwrap();

        let sheet = Sheet::from_xlsx(&path).unwrap();

        assert_eq!(sheet.row_count(), 4);
        assert_eq!(sheet.get(2, 1).unwrap(), &CellValue::from("Region"));
        assert_eq!(sheet.get(3, 1).unwrap(), &CellValue::from("East"));
        assert!(sheet.get(2, 0).unwrap().is_null());
    }

    #[test]
    fn test_xlsx_specific_sheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("specific.xlsx");

        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name("Data").unwrap();
        let other = workbook.add_worksheet();
        other.set_name("Other").unwrap();
        other.write_number(0, 0, 4.0).unwrap();
        workbook.save(&path).unwrap();

        let names = Sheet::xlsx_sheet_names(&path).unwrap();
        assert_eq!(names, vec!["Data".to_string(), "Other".to_string()]);

        let sheet = Sheet::from_xlsx_sheet_with_options(
            &path,
            "Other",
            XlsxReadOptions::default().with_date1904(true),
        )
        .unwrap();
        assert_eq!(sheet.name(), "Other");
        assert_eq!(sheet.row_count(), 1);
        assert!(sheet.is_date1904());
    }

    #[test]
    fn test_xlsx_missing_sheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.xlsx");

        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        workbook.save(&path).unwrap();

        let err = Sheet::from_xlsx_sheet(&path, "Nope").unwrap_err();
        assert!(matches!(err, SheetError::SheetNotFound { name } if name == "Nope"));
    }
}
