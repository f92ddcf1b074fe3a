//! Field declarations and the descriptors extracted from them.

use std::collections::HashSet;
use std::fmt;

use crate::error::{BindError, Result};
use crate::record::Record;
use crate::tag::ColumnTag;
use crate::value::FieldKind;

/// A field as a record type declares it.
///
/// `#[derive(Record)]` emits one per struct field; hand-written [`Record`]
/// impls build them with the `const` constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub tag: Option<&'static str>,
    pub exported: bool,
}

impl FieldDef {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            tag: None,
            exported: true,
        }
    }

    /// Attach a binding option string such as `"heading=Units,default=1"`.
    #[must_use]
    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Keep the field out of binding.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.exported = false;
        self
    }
}

/// A bindable field with its parsed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    kind: FieldKind,
    tag: ColumnTag,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: &'static str, kind: FieldKind, tag: ColumnTag) -> Self {
        Self { name, kind, tag }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    #[must_use]
    pub fn tag(&self) -> &ColumnTag {
        &self.tag
    }

    /// Column heading this field binds to: the tag's override, else the name.
    #[must_use]
    pub fn heading(&self) -> &str {
        self.tag.heading.as_deref().unwrap_or(self.name)
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' (type: {}, column: '{}')",
            self.name,
            self.kind,
            self.heading()
        )
    }
}

/// Descriptors for every bindable field of `R`, in declaration order.
///
/// # Errors
///
/// Returns [`BindError::InvalidTarget`] when a name is empty or declared twice.
pub fn extract_fields<R: Record>() -> Result<Vec<FieldDescriptor>> {
    describe_fields(R::type_name(), &R::fields())
}

pub(crate) fn describe_fields(
    type_name: &'static str,
    defs: &[FieldDef],
) -> Result<Vec<FieldDescriptor>> {
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(defs.len());

    for def in defs {
        if def.name.is_empty() {
            return Err(BindError::invalid_target(type_name, "field with empty name"));
        }
        if !seen.insert(def.name) {
            return Err(BindError::invalid_target(
                type_name,
                format!("field '{}' declared twice", def.name),
            ));
        }
        if !def.exported {
            continue;
        }

        let tag = def.tag.map(ColumnTag::parse).unwrap_or_default();
        fields.push(FieldDescriptor::new(def.name, def.kind, tag));
    }

    Ok(fields)
}
