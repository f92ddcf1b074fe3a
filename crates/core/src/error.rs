//! Error types for xlbind.

use std::fmt;

use thiserror::Error;

use crate::source::SourceError;

/// Result type for binding operations.
pub type Result<T> = std::result::Result<T, BindError>;

/// Location and content of the cell a field was coerced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLocation {
    /// Zero-based data row.
    pub row: usize,
    /// Zero-based column, `None` when the field has no mapped column.
    pub col: Option<usize>,
    /// Raw cell text, `None` when no cell was read.
    pub raw: Option<String>,
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.col {
            Some(col) => write!(f, "({}, {col})", self.row)?,
            None => write!(f, "({}, -)", self.row)?,
        }
        match &self.raw {
            Some(raw) => write!(f, "[{raw:?}]"),
            None => write!(f, "[absent]"),
        }
    }
}

/// Errors that can occur while binding sheet rows to records.
///
/// Every variant aborts the whole unmarshal; no partial output is returned.
#[derive(Debug, Error)]
pub enum BindError {
    /// The record type cannot be used as a binding target.
    #[error("invalid target {type_name}: {reason}")]
    InvalidTarget {
        type_name: &'static str,
        reason: String,
    },

    /// The field's declared type has no coercion rule.
    #[error("unsupported field '{heading}' ({type_name}) for '{field}'")]
    UnsupportedField {
        field: String,
        type_name: &'static str,
        heading: String,
    },

    /// The text has no valid parse under the field's type or format rules.
    #[error("unsupported value {value:?}")]
    UnsupportedValue { value: String },

    /// Coercing a cell into a field failed.
    #[error("cannot coerce cell {cell} into field '{field}' (type: {type_name}, column: '{heading}'): {source}")]
    FieldCoercion {
        field: String,
        type_name: &'static str,
        heading: String,
        cell: CellLocation,
        source: Box<BindError>,
    },

    /// A value names no assignable field, or a field received no value.
    #[error("invalid field assignment '{field}' on {record}")]
    InvalidFieldAssignment { field: String, record: &'static str },

    /// A value's type differs from the field's declared type.
    #[error("invalid value type for field '{field}': expected {expected}, got {actual}")]
    InvalidFieldValueType {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The cell source failed to read a header cell.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl BindError {
    /// Create an unsupported-value error.
    pub fn unsupported_value(value: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            value: value.into(),
        }
    }

    /// Create an invalid-target error.
    pub fn invalid_target(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            type_name,
            reason: reason.into(),
        }
    }

    /// The innermost cause of a coercion failure, or `self`.
    #[must_use]
    pub fn root_cause(&self) -> &BindError {
        match self {
            Self::FieldCoercion { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_location_display() {
        let cell = CellLocation {
            row: 2,
            col: Some(4),
            raw: Some("abc".to_string()),
        };
        assert_eq!(cell.to_string(), "(2, 4)[\"abc\"]");

        let absent = CellLocation {
            row: 7,
            col: None,
            raw: None,
        };
        assert_eq!(absent.to_string(), "(7, -)[absent]");
    }

    #[test]
    fn test_coercion_message_and_root_cause() {
        let err = BindError::FieldCoercion {
            field: "units".to_string(),
            type_name: "i32",
            heading: "Units".to_string(),
            cell: CellLocation {
                row: 3,
                col: Some(4),
                raw: Some("x".to_string()),
            },
            source: Box::new(BindError::unsupported_value("x")),
        };

        assert_eq!(
            err.to_string(),
            "cannot coerce cell (3, 4)[\"x\"] into field 'units' (type: i32, column: 'Units'): unsupported value \"x\""
        );
        assert!(matches!(err.root_cause(), BindError::UnsupportedValue { value } if value == "x"));
    }
}
