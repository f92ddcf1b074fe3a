//! Record types and their construction from coerced values.

use indexmap::IndexMap;

use crate::error::{BindError, Result};
use crate::field::FieldDef;
use crate::value::{FieldType, Value};

/// A type rows can be bound to.
///
/// Usually derived:
///
/// ```
/// use xlbind_core::Record;
///
/// #[derive(Record)]
/// struct SaleOrder {
///     #[column = "heading=Region,trim"]
///     region: String,
///     #[column = "heading=Units,default=1"]
///     units: i32,
/// }
/// ```
pub trait Record: Sized {
    /// Name used in error messages.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Declared fields in declaration order, hidden ones included.
    fn fields() -> Vec<FieldDef>;

    /// Build an instance by taking each field's value out of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::InvalidFieldAssignment`] when a field has no value
    /// and [`BindError::InvalidFieldValueType`] when a value has the wrong type.
    fn construct(values: &mut FieldValues) -> Result<Self>;
}

/// Records may also be collected boxed.
impl<R: Record> Record for Box<R> {
    fn type_name() -> &'static str {
        R::type_name()
    }

    fn fields() -> Vec<FieldDef> {
        R::fields()
    }

    fn construct(values: &mut FieldValues) -> Result<Self> {
        R::construct(values).map(Box::new)
    }
}

/// Coerced values keyed by field name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    entries: IndexMap<String, Value>,
}

impl FieldValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Set a field's value, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(field.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries.get(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Remove a field's value, requiring it to be exactly a `T`.
    ///
    /// # Errors
    ///
    /// Fails when the field has no value or the value is not a `T`.
    pub fn take<T: FieldType>(&mut self, field: &str, record: &'static str) -> Result<T> {
        let value = self
            .entries
            .shift_remove(field)
            .ok_or_else(|| BindError::InvalidFieldAssignment {
                field: field.to_string(),
                record,
            })?;

        T::from_value(value).map_err(|value| BindError::InvalidFieldValueType {
            field: field.to_string(),
            expected: T::KIND.type_name(),
            actual: value.kind().type_name(),
        })
    }

    /// Error for a field whose declared type no value can fill.
    #[must_use]
    pub fn reject(&mut self, field: &str, record: &'static str, expected: &'static str) -> BindError {
        match self.entries.shift_remove(field) {
            Some(value) => BindError::InvalidFieldValueType {
                field: field.to_string(),
                expected,
                actual: value.kind().type_name(),
            },
            None => BindError::InvalidFieldAssignment {
                field: field.to_string(),
                record,
            },
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (field, value) in iter {
            values.insert(field, value);
        }
        values
    }
}

/// Build a record from a complete set of field values.
///
/// # Errors
///
/// Besides the failures of [`Record::construct`], an entry left over after
/// construction names no assignable field and is reported as
/// [`BindError::InvalidFieldAssignment`].
pub fn construct<R: Record>(mut values: FieldValues) -> Result<R> {
    let record = R::construct(&mut values)?;

    if let Some((field, _)) = values.entries.first() {
        return Err(BindError::InvalidFieldAssignment {
            field: field.clone(),
            record: R::type_name(),
        });
    }

    Ok(record)
}
