//! Sheet module for xlbind
//!
//! Holds a sheet as an in-memory grid of cells and loads it from XLSX or CSV
//! files. The grid is the cell source the binding engine in `xlbind-core`
//! reads from.
//!
//! # Examples
//!
//! ```
//! use xlbind_sheet::{CellValue, Sheet};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["Region", "Units"],
//!     vec!["East", "95"],
//! ]);
//!
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(sheet.get(1, 0).unwrap(), &CellValue::from("East"));
//! ```
//!
//! ## Loading from CSV
//!
//! ```no_run
//! use xlbind_sheet::Sheet;
//!
//! let sheet = Sheet::from_csv("orders.csv").unwrap();
//! ```

mod cell;
mod csv;
mod error;
mod sheet;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
/// Re-export XLSX read options.
pub use xlsx::XlsxReadOptions;
