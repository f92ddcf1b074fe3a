//! Row-by-row binding of a sheet to records.

use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::coerce::{coerce_field, CellRef};
use crate::column::extract_columns;
use crate::error::Result;
use crate::field::extract_fields;
use crate::mapping::{map_fields, FieldMapping};
use crate::options::SheetOptions;
use crate::record::{construct, FieldValues, Record};
use crate::source::{DateSystem, TabularSource};

/// Read every record of `source` into `records`.
///
/// On success `records` holds exactly the rows read, in row order; on
/// failure it is left untouched.
///
/// ```
/// use xlbind_core::{unmarshal, Record, SheetOptions};
/// use xlbind_sheet::Sheet;
///
/// #[derive(Record)]
/// struct Line {
///     #[column = "heading=Item"]
///     item: String,
///     #[column = "heading=Units,default=1"]
///     units: i32,
/// }
///
/// let sheet = Sheet::from_data(vec![
///     vec!["Item", "Units"],
///     vec!["Pencil", "95"],
///     vec!["Binder", ""],
/// ]);
///
/// let mut lines: Vec<Line> = Vec::new();
/// unmarshal(&sheet, &mut lines, &SheetOptions::default()).unwrap();
///
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[1].item, "Binder");
/// assert_eq!(lines[1].units, 1);
/// ```
///
/// # Errors
///
/// Fails on the first header read, coercion or construction error.
pub fn unmarshal<R, S>(source: &S, records: &mut Vec<R>, options: &SheetOptions) -> Result<()>
where
    R: Record,
    S: TabularSource + ?Sized,
{
    *records = unmarshal_records(source, options)?;
    Ok(())
}

/// Read every record of `source` into a new vector.
///
/// # Errors
///
/// Fails on the first header read, coercion or construction error.
pub fn unmarshal_records<R, S>(source: &S, options: &SheetOptions) -> Result<Vec<R>>
where
    R: Record,
    S: TabularSource + ?Sized,
{
    let mapping = map_record::<R, S>(source, options)?;

    let rows = RecordRows::<R, S> {
        source,
        mapping: &mapping,
        dates: source.date_system(),
        row: options.data_row,
        remaining: options.max_data_rows,
        state: State::Reading,
        _record: PhantomData,
    };
    let records = rows.collect::<Result<Vec<R>>>()?;

    debug!(
        record = R::type_name(),
        count = records.len(),
        "unmarshalled records"
    );
    Ok(records)
}

/// Associate the fields of `R` with the header columns of `source`.
///
/// # Errors
///
/// Fails when `R` is not a valid target or a header cell cannot be read.
pub fn map_record<R, S>(source: &S, options: &SheetOptions) -> Result<FieldMapping>
where
    R: Record,
    S: TabularSource + ?Sized,
{
    let fields = extract_fields::<R>()?;
    let columns = extract_columns(source, options.header_row, options.start_col)?;
    debug!(
        record = R::type_name(),
        fields = fields.len(),
        columns = columns.len(),
        "mapping fields to columns"
    );
    Ok(map_fields(fields, &columns))
}

/// Coerce every field of one row.
///
/// Returns `None` for the end-of-data row, where no field was read from its
/// cell. A data cell the source cannot serve counts as absent.
///
/// # Errors
///
/// Fails on the first field that cannot be coerced.
pub fn read_row<S: TabularSource + ?Sized>(
    source: &S,
    mapping: &FieldMapping,
    row: usize,
    dates: DateSystem,
) -> Result<Option<FieldValues>> {
    let mut values = FieldValues::with_capacity(mapping.len());
    let mut any_read = false;

    for (field, column) in mapping.iter() {
        let raw = column.and_then(|c| match source.read(row, c.index) {
            Ok(cell) => Some(cell),
            Err(err) => {
                trace!(field = field.name(), %err, "unreadable cell treated as absent");
                None
            }
        });

        let cell = CellRef {
            row,
            col: column.map(|c| c.index),
            raw: raw.as_ref(),
        };
        let coerced = coerce_field(field, cell, dates)?;

        any_read |= coerced.read;
        values.insert(field.name(), coerced.value);
    }

    Ok(any_read.then_some(values))
}

/// Row iteration states. Mapping happens before the iterator is built, in
/// [`map_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Reading,
    Done,
    Error,
}

/// Yields one record per data row until the end-of-data row, the row cap or
/// the first error.
struct RecordRows<'a, R, S: ?Sized> {
    source: &'a S,
    mapping: &'a FieldMapping,
    dates: DateSystem,
    row: usize,
    remaining: Option<usize>,
    state: State,
    _record: PhantomData<fn() -> R>,
}

impl<R, S> RecordRows<'_, R, S>
where
    R: Record,
    S: TabularSource + ?Sized,
{
    fn step(&mut self) -> Result<Option<R>> {
        if self.remaining == Some(0) {
            trace!(row = self.row, "row cap reached");
            return Ok(None);
        }

        let Some(values) = read_row(self.source, self.mapping, self.row, self.dates)? else {
            trace!(row = self.row, "end of data");
            return Ok(None);
        };

        let record = construct::<R>(values)?;
        trace!(row = self.row, "record built");

        self.row += 1;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Ok(Some(record))
    }
}

impl<R, S> Iterator for RecordRows<'_, R, S>
where
    R: Record,
    S: TabularSource + ?Sized,
{
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Reading {
            return None;
        }

        match self.step() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.state = State::Done;
                None
            }
            Err(err) => {
                self.state = State::Error;
                Some(Err(err))
            }
        }
    }
}
