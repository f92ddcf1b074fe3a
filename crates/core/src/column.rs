//! Header row scanning.

use tracing::trace;

use crate::error::Result;
use crate::source::TabularSource;

/// A named column of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Heading text as stored, whitespace included.
    pub heading: String,
    /// Zero-based column index.
    pub index: usize,
}

/// Scan the header row from `start_col` rightwards.
///
/// Stops at the first cell whose trimmed text is empty and returns the
/// headings before it.
///
/// # Errors
///
/// Propagates any read failure of the source.
pub fn extract_columns<S: TabularSource + ?Sized>(
    source: &S,
    header_row: usize,
    start_col: usize,
) -> Result<Vec<Column>> {
    let mut columns = Vec::new();
    let mut col = start_col;

    loop {
        let cell = source.read(header_row, col)?;
        if cell.text.trim().is_empty() {
            break;
        }

        trace!(col, heading = %cell.text, "header column");
        columns.push(Column {
            heading: cell.text,
            index: col,
        });
        col += 1;
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BindError;
    use xlbind_sheet::Sheet;

    #[test]
    fn test_extract_columns() {
        let sheet = Sheet::from_data(vec![
            vec!["Order Date", "Region", "Rep", "Item", "Units", "Unit Cost", "Total"],
            vec!["2021-01-06", "East", "Jones", "Pencil", "95", "1.99", "189.05"],
        ]);

        let columns = extract_columns(&sheet, 0, 0).unwrap();

        assert_eq!(columns.len(), 7);
        assert_eq!(columns[0].heading, "Order Date");
        assert_eq!(columns[0].index, 0);
        assert_eq!(columns[6].heading, "Total");
        assert_eq!(columns[6].index, 6);
    }

    #[test]
    fn test_stops_at_blank_heading() {
        let sheet = Sheet::from_data(vec![vec!["", "A", " B ", "  ", "C"]]);

        let columns = extract_columns(&sheet, 0, 1).unwrap();

        assert_eq!(
            columns,
            vec![
                Column { heading: "A".to_string(), index: 1 },
                Column { heading: " B ".to_string(), index: 2 },
            ]
        );
        assert!(extract_columns(&sheet, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_read_failure_propagates() {
        let sheet = Sheet::new();
        let err = extract_columns(&sheet, crate::source::MAX_ROWS, 0).unwrap_err();
        assert!(matches!(err, BindError::Source(_)));
    }
}
