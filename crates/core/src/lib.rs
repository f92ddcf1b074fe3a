//! # xlbind-core
//!
//! Binds the rows of a spreadsheet to typed Rust records.
//!
//! A record type declares its fields (usually with `#[derive(Record)]`),
//! each optionally tagged with binding options:
//!
//! - `heading=<text>` binds to the column with that heading instead of the
//!   field name
//! - `trim` strips surrounding whitespace before coercion
//! - `default=<text>` is coerced when the cell is empty
//! - `time=<format>` is the `strftime` layout for temporal text
//!
//! [`unmarshal`] scans the header row, maps fields to columns by exact
//! heading match, then coerces row after row until it reaches a row where
//! every field fell back to its default.
//!
//! ```
//! use chrono::NaiveDate;
//! use xlbind_core::{unmarshal_records, Record, SheetOptions};
//! use xlbind_sheet::{CellValue, Sheet};
//!
//! #[derive(Record)]
//! struct SaleOrder {
//!     #[column = "heading=Order Date"]
//!     date: NaiveDate,
//!     #[column = "heading=Region,trim"]
//!     region: String,
//!     #[column = "heading=Units,default=1"]
//!     units: i32,
//! }
//!
//! let sheet = Sheet::from_data(vec![
//!     vec![CellValue::from("Order Date"), "Region".into(), "Units".into()],
//!     vec![CellValue::Float(44202.0), " East ".into(), CellValue::Int(95)],
//! ]);
//!
//! let orders: Vec<SaleOrder> = unmarshal_records(&sheet, &SheetOptions::default()).unwrap();
//! assert_eq!(orders[0].date, NaiveDate::from_ymd_opt(2021, 1, 6).unwrap());
//! assert_eq!(orders[0].region, "East");
//! assert_eq!(orders[0].units, 95);
//! ```

extern crate self as xlbind_core;

/// Cell coercion.
pub mod coerce;
/// Header scanning.
pub mod column;
/// Error types and result aliases.
pub mod error;
/// Field declarations and descriptors.
pub mod field;
/// Field-to-column mapping.
pub mod mapping;
/// Sheet layout options.
pub mod options;
/// Record trait and construction.
pub mod record;
/// Cell source trait.
pub mod source;
/// Binding option parsing.
pub mod tag;
/// The unmarshal driver.
pub mod unmarshal;
/// Field kinds and values.
pub mod value;

pub use coerce::{coerce_field, CellRef, Coerced, TimeFormat, DEFAULT_TIME_FORMATS};
pub use column::{extract_columns, Column};
pub use error::{BindError, CellLocation, Result};
pub use field::{extract_fields, FieldDef, FieldDescriptor};
pub use mapping::{map_fields, FieldMapping};
pub use options::SheetOptions;
pub use record::{construct, FieldValues, Record};
pub use source::{CellKind, DateSystem, RawCell, SourceError, TabularSource};
pub use tag::ColumnTag;
pub use unmarshal::{map_record, read_row, unmarshal, unmarshal_records};
pub use value::{FieldKind, FieldType, Value};

/// Derive [`Record`] for a struct with named fields.
#[cfg(feature = "derive")]
pub use xlbind_derive::Record;
