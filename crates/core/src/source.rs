//! The cell source the binder reads from.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;
use xlbind_sheet::{CellValue, Sheet};

/// How a cell's value is stored by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Text,
    Numeric,
    Other,
}

/// Raw text of one cell plus its storage kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    pub text: String,
    pub kind: CellKind,
}

impl RawCell {
    /// A text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: CellKind::Text,
        }
    }

    /// A numeric cell holding the number's text form.
    pub fn numeric(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: CellKind::Numeric,
        }
    }

    /// An empty text cell.
    #[must_use]
    pub fn empty() -> Self {
        Self::text("")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Epoch rule for date serials stored in numeric cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateSystem {
    /// Serial 0 is 1899-12-30.
    #[default]
    Excel1900,
    /// Serial 0 is 1904-01-01.
    Excel1904,
}

impl DateSystem {
    /// The instant serial 0 refers to.
    #[must_use]
    pub fn epoch(self) -> Option<NaiveDateTime> {
        let date = match self {
            Self::Excel1900 => NaiveDate::from_ymd_opt(1899, 12, 30),
            Self::Excel1904 => NaiveDate::from_ymd_opt(1904, 1, 1),
        };
        date.map(|d| d.and_time(NaiveTime::MIN))
    }
}

/// A cell address the source cannot serve.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot read cell ({row}, {col}): {message}")]
pub struct SourceError {
    pub row: usize,
    pub col: usize,
    pub message: String,
}

impl SourceError {
    pub fn new(row: usize, col: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            col,
            message: message.into(),
        }
    }
}

/// Read-only access to a grid of cells by zero-based (row, column).
pub trait TabularSource {
    /// Read one cell.
    ///
    /// # Errors
    ///
    /// Returns an error when the coordinates are not addressable.
    fn read(&self, row: usize, col: usize) -> std::result::Result<RawCell, SourceError>;

    /// Epoch rule for numeric date cells.
    fn date_system(&self) -> DateSystem {
        DateSystem::Excel1900
    }
}

impl<T: TabularSource + ?Sized> TabularSource for &T {
    fn read(&self, row: usize, col: usize) -> std::result::Result<RawCell, SourceError> {
        (**self).read(row, col)
    }

    fn date_system(&self) -> DateSystem {
        (**self).date_system()
    }
}

/// Rows addressable in an XLSX worksheet.
pub const MAX_ROWS: usize = 1_048_576;
/// Columns addressable in an XLSX worksheet.
pub const MAX_COLS: usize = 16_384;

impl TabularSource for Sheet {
    /// Cells outside the stored grid but inside the worksheet limits read as
    /// empty text.
    fn read(&self, row: usize, col: usize) -> std::result::Result<RawCell, SourceError> {
        if row >= MAX_ROWS || col >= MAX_COLS {
            return Err(SourceError::new(row, col, "outside worksheet limits"));
        }

        let Ok(cell) = self.get(row, col) else {
            return Ok(RawCell::empty());
        };

        Ok(match cell {
            CellValue::Null => RawCell::empty(),
            CellValue::Int(_) | CellValue::Float(_) => RawCell::numeric(cell.as_str()),
            CellValue::String(s) => RawCell::text(s.clone()),
            CellValue::Bool(_) => RawCell {
                text: cell.as_str(),
                kind: CellKind::Other,
            },
        })
    }

    fn date_system(&self) -> DateSystem {
        if self.is_date1904() {
            DateSystem::Excel1904
        } else {
            DateSystem::Excel1900
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_cell_kinds() {
        let sheet = Sheet::from_data(vec![vec![
            CellValue::from("East"),
            CellValue::Int(95),
            CellValue::Float(1.99),
            CellValue::Bool(true),
            CellValue::Null,
        ]]);

        assert_eq!(sheet.read(0, 0).unwrap(), RawCell::text("East"));
        assert_eq!(sheet.read(0, 1).unwrap(), RawCell::numeric("95"));
        assert_eq!(sheet.read(0, 2).unwrap(), RawCell::numeric("1.99"));
        assert_eq!(sheet.read(0, 3).unwrap().kind, CellKind::Other);
        assert!(sheet.read(0, 4).unwrap().is_empty());
    }

    #[test]
    fn test_csv_cells_read_verbatim() {
        let sheet = Sheet::from_csv_str("a,b,c,d\n007,1.50,   ,42\n").unwrap();

        assert_eq!(sheet.read(1, 0).unwrap(), RawCell::text("007"));
        assert_eq!(sheet.read(1, 1).unwrap(), RawCell::text("1.50"));
        assert_eq!(sheet.read(1, 2).unwrap(), RawCell::text("   "));
        assert!(!sheet.read(1, 2).unwrap().is_empty());
        assert_eq!(sheet.read(1, 3).unwrap(), RawCell::numeric("42"));
    }

    #[test]
    fn test_sheet_reads_past_grid_as_empty() {
        let sheet = Sheet::from_data(vec![vec!["a"]]);

        assert!(sheet.read(0, 9).unwrap().is_empty());
        assert!(sheet.read(500, 0).unwrap().is_empty());
        assert!(sheet.read(MAX_ROWS, 0).is_err());
        assert!(sheet.read(0, MAX_COLS).is_err());
    }

    #[test]
    fn test_date_systems() {
        let mut sheet = Sheet::new();
        assert_eq!(sheet.date_system(), DateSystem::Excel1900);
        sheet.set_date1904(true);
        assert_eq!(sheet.date_system(), DateSystem::Excel1904);

        let epoch = DateSystem::Excel1904.epoch().unwrap();
        assert_eq!(epoch.date(), NaiveDate::from_ymd_opt(1904, 1, 1).unwrap());
    }
}
