//! Sheet layout options.

use serde::{Deserialize, Serialize};

/// Where headings and data sit in a sheet.
///
/// The defaults describe the common layout: headings start at A1 and data
/// starts on the second row.
///
/// ```
/// use xlbind_core::SheetOptions;
///
/// let options = SheetOptions::default().with_header_row(2).with_data_row(4);
/// assert_eq!(options.start_col, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetOptions {
    /// Zero-based row holding the headings.
    pub header_row: usize,
    /// Zero-based column of the first heading.
    pub start_col: usize,
    /// Zero-based row of the first record.
    pub data_row: usize,
    /// Stop after this many records. Unbounded when `None`; the source's
    /// addressable limit then ends iteration on sheets without a blank row.
    pub max_data_rows: Option<usize>,
}

impl Default for SheetOptions {
    fn default() -> Self {
        SheetOptions {
            header_row: 0,
            start_col: 0,
            data_row: 1,
            max_data_rows: None,
        }
    }
}

impl SheetOptions {
    #[must_use]
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }

    #[must_use]
    pub fn with_start_col(mut self, start_col: usize) -> Self {
        self.start_col = start_col;
        self
    }

    #[must_use]
    pub fn with_data_row(mut self, data_row: usize) -> Self {
        self.data_row = data_row;
        self
    }

    /// Cap the number of records read.
    #[must_use]
    pub fn with_max_data_rows(mut self, max_data_rows: usize) -> Self {
        self.max_data_rows = Some(max_data_rows);
        self
    }
}
