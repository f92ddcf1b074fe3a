//! Cell text to typed field values.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{BindError, CellLocation, Result};
use crate::field::FieldDescriptor;
use crate::source::{CellKind, DateSystem, RawCell};
use crate::value::{FieldKind, Value};

/// A temporal text layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// A chrono `strftime` pattern.
    Pattern(&'static str),
    /// RFC 3339 timestamp with offset.
    Rfc3339,
}

/// Layouts tried for temporal text when the tag names none.
pub static DEFAULT_TIME_FORMATS: &[TimeFormat] =
    &[TimeFormat::Pattern("%Y-%m-%d"), TimeFormat::Rfc3339];

impl TimeFormat {
    fn parse(self, text: &str) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Pattern(pattern) => parse_pattern(text, pattern),
            Self::Rfc3339 => DateTime::parse_from_rfc3339(text).ok(),
        }
    }
}

/// Serials beyond this many days either way are rejected.
const MAX_SERIAL_DAYS: f64 = 3_000_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// The cell a field is coerced from.
#[derive(Debug, Clone, Copy)]
pub struct CellRef<'a> {
    pub row: usize,
    /// Mapped column, `None` when the field has none.
    pub col: Option<usize>,
    /// Cell content, `None` when nothing was read.
    pub raw: Option<&'a RawCell>,
}

/// Outcome of coercing one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced {
    pub value: Value,
    /// False when the value came from a default rather than the cell.
    pub read: bool,
}

/// Coerce one cell into the field's declared type.
///
/// Empty or absent cells take the tag's default, else the kind's zero text,
/// and go through the same parse as real data.
///
/// # Errors
///
/// Returns [`BindError::FieldCoercion`] wrapping [`BindError::UnsupportedField`]
/// or [`BindError::UnsupportedValue`].
pub fn coerce_field(
    field: &FieldDescriptor,
    cell: CellRef<'_>,
    dates: DateSystem,
) -> Result<Coerced> {
    let tag = field.tag();
    let (text, storage, read) = match cell.raw {
        Some(raw) if !raw.is_empty() => (raw.text.as_str(), raw.kind, true),
        _ => {
            let text = tag
                .default_value
                .as_deref()
                .unwrap_or_else(|| field.kind().zero_text());
            (text, CellKind::Text, false)
        }
    };

    let text = if tag.trim { text.trim() } else { text };

    match parse_value(field, text, storage, dates) {
        Ok(value) => Ok(Coerced { value, read }),
        Err(source) => Err(BindError::FieldCoercion {
            field: field.name().to_string(),
            type_name: field.kind().type_name(),
            heading: field.heading().to_string(),
            cell: CellLocation {
                row: cell.row,
                col: cell.col,
                raw: cell.raw.map(|raw| raw.text.clone()),
            },
            source: Box::new(source),
        }),
    }
}

macro_rules! parse_number {
    ($text:expr, $variant:ident) => {
        $text
            .parse()
            .map(Value::$variant)
            .map_err(|_| BindError::unsupported_value($text))
    };
}

fn parse_value(
    field: &FieldDescriptor,
    text: &str,
    storage: CellKind,
    dates: DateSystem,
) -> Result<Value> {
    match field.kind() {
        FieldKind::Bool => parse_bool(text)
            .map(Value::Bool)
            .ok_or_else(|| BindError::unsupported_value(text)),
        FieldKind::I8 => parse_number!(text, I8),
        FieldKind::I16 => parse_number!(text, I16),
        FieldKind::I32 => parse_number!(text, I32),
        FieldKind::I64 => parse_number!(text, I64),
        FieldKind::Isize => parse_number!(text, Isize),
        FieldKind::U8 => parse_number!(text, U8),
        FieldKind::U16 => parse_number!(text, U16),
        FieldKind::U32 => parse_number!(text, U32),
        FieldKind::U64 => parse_number!(text, U64),
        FieldKind::Usize => parse_number!(text, Usize),
        FieldKind::F32 => parse_number!(text, F32),
        FieldKind::F64 => parse_number!(text, F64),
        FieldKind::Text => Ok(Value::Text(text.to_string())),
        FieldKind::Date => parse_temporal(field, text, storage, dates)
            .map(|t| Value::Date(t.date_naive())),
        FieldKind::DateTime => parse_temporal(field, text, storage, dates).map(Value::DateTime),
        FieldKind::Unsupported(type_name) => Err(BindError::UnsupportedField {
            field: field.name().to_string(),
            type_name,
            heading: field.heading().to_string(),
        }),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_temporal(
    field: &FieldDescriptor,
    text: &str,
    storage: CellKind,
    dates: DateSystem,
) -> Result<DateTime<FixedOffset>> {
    let parsed = if storage == CellKind::Numeric {
        text.parse::<f64>()
            .ok()
            .and_then(|serial| from_serial(serial, dates))
    } else {
        let formats = &field.tag().time_formats;
        if formats.is_empty() {
            DEFAULT_TIME_FORMATS.iter().find_map(|f| f.parse(text))
        } else {
            formats.iter().find_map(|p| parse_pattern(text, p))
        }
    };

    parsed.ok_or_else(|| BindError::unsupported_value(text))
}

/// Try `pattern` as a full timestamp with offset, then a naive timestamp,
/// then a bare date. Naive results are taken as UTC.
fn parse_pattern(text: &str, pattern: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(t) = DateTime::parse_from_str(text, pattern) {
        return Some(t);
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(text, pattern) {
        return Some(t.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(text, pattern)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

/// Convert a date serial to UTC. The 1900 leap-year bug is not corrected.
fn from_serial(serial: f64, dates: DateSystem) -> Option<DateTime<FixedOffset>> {
    if !serial.is_finite() || serial.abs() > MAX_SERIAL_DAYS {
        return None;
    }

    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    let offset = Duration::try_milliseconds(millis)?;
    dates
        .epoch()?
        .checked_add_signed(offset)
        .map(|t| t.and_utc().fixed_offset())
}
