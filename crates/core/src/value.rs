//! Field kinds and the coerced values that fill them.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Text,
    /// Calendar date (`NaiveDate`).
    Date,
    /// Timestamp with offset (`DateTime<FixedOffset>`).
    DateTime,
    /// A type with no coercion rule, named as declared.
    Unsupported(&'static str),
}

impl FieldKind {
    /// Rust name of the declared type.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Text => "String",
            Self::Date => "NaiveDate",
            Self::DateTime => "DateTime<FixedOffset>",
            Self::Unsupported(name) => name,
        }
    }

    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::Usize
        )
    }

    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    #[must_use]
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    /// Raw text standing in for an empty cell when the tag sets no default.
    #[must_use]
    pub fn zero_text(self) -> &'static str {
        if self.is_integer() {
            "0"
        } else if self.is_float() {
            "0.0"
        } else if self.is_temporal() {
            "0001-01-01"
        } else if self == Self::Bool {
            "false"
        } else {
            ""
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A coerced field value, one variant per supported [`FieldKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl Value {
    /// Kind of field this value fills.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Bool,
            Self::I8(_) => FieldKind::I8,
            Self::I16(_) => FieldKind::I16,
            Self::I32(_) => FieldKind::I32,
            Self::I64(_) => FieldKind::I64,
            Self::Isize(_) => FieldKind::Isize,
            Self::U8(_) => FieldKind::U8,
            Self::U16(_) => FieldKind::U16,
            Self::U32(_) => FieldKind::U32,
            Self::U64(_) => FieldKind::U64,
            Self::Usize(_) => FieldKind::Usize,
            Self::F32(_) => FieldKind::F32,
            Self::F64(_) => FieldKind::F64,
            Self::Text(_) => FieldKind::Text,
            Self::Date(_) => FieldKind::Date,
            Self::DateTime(_) => FieldKind::DateTime,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Isize(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::Usize(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

/// A Rust type a record field may be declared with.
pub trait FieldType: Sized {
    /// Kind the coercer produces for this type.
    const KIND: FieldKind;

    /// Unwrap a value of exactly this type, handing it back otherwise.
    ///
    /// # Errors
    ///
    /// Returns the value unchanged when its variant is not this type's.
    fn from_value(value: Value) -> std::result::Result<Self, Value>;
}

macro_rules! field_types {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl FieldType for $ty {
            const KIND: FieldKind = FieldKind::$variant;

            fn from_value(value: Value) -> std::result::Result<Self, Value> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }
    )*};
}

field_types! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => Text,
    NaiveDate => Date,
    DateTime<FixedOffset> => DateTime,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}
