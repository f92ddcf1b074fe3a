//! Field-to-column association.

use std::collections::HashMap;

use tracing::debug;

use crate::column::Column;
use crate::field::FieldDescriptor;

/// Each field paired with the column it reads from, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<(FieldDescriptor, Option<Column>)>,
}

impl FieldMapping {
    /// Fields in declaration order with their columns.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldDescriptor, Option<&Column>)> {
        self.entries.iter().map(|(field, column)| (field, column.as_ref()))
    }

    /// Column bound to the named field.
    #[must_use]
    pub fn column_for(&self, field: &str) -> Option<&Column> {
        self.entries
            .iter()
            .find(|(f, _)| f.name() == field)
            .and_then(|(_, column)| column.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Bind each field to the column whose heading equals the field's heading.
///
/// Comparison is exact. When several columns share a heading the rightmost
/// one wins.
#[must_use]
pub fn map_fields(fields: Vec<FieldDescriptor>, columns: &[Column]) -> FieldMapping {
    let mut by_heading: HashMap<&str, &Column> = HashMap::with_capacity(columns.len());
    for column in columns {
        if let Some(previous) = by_heading.insert(column.heading.as_str(), column) {
            debug!(
                heading = %column.heading,
                dropped = previous.index,
                kept = column.index,
                "duplicate heading"
            );
        }
    }

    let entries = fields
        .into_iter()
        .map(|field| {
            let column = by_heading.get(field.heading()).map(|c| (*c).clone());
            if column.is_none() {
                debug!(field = field.name(), heading = field.heading(), "no column for field");
            }
            (field, column)
        })
        .collect();

    FieldMapping { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::ColumnTag;
    use crate::value::FieldKind;

    fn column(heading: &str, index: usize) -> Column {
        Column {
            heading: heading.to_string(),
            index,
        }
    }

    fn field(name: &'static str, tag: &str) -> FieldDescriptor {
        FieldDescriptor::new(name, FieldKind::Text, ColumnTag::parse(tag))
    }

    #[test]
    fn test_map_by_heading_and_name() {
        let columns = vec![column("Region", 0), column("Rep", 1)];
        let mapping = map_fields(vec![field("area", "heading=Region"), field("Rep", "")], &columns);

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.column_for("area").map(|c| c.index), Some(0));
        assert_eq!(mapping.column_for("Rep").map(|c| c.index), Some(1));
    }

    #[test]
    fn test_unmatched_field() {
        let mapping = map_fields(vec![field("total", "")], &[column("Total", 0)]);

        assert!(mapping.column_for("total").is_none());
        assert_eq!(mapping.iter().count(), 1);
    }

    #[test]
    fn test_exact_whitespace_sensitive_match() {
        let columns = vec![column(" Region ", 0)];
        let mapping = map_fields(
            vec![field("a", "heading=Region"), field("b", "trim,heading= Region ")],
            &columns,
        );

        assert!(mapping.column_for("a").is_none());
        assert_eq!(mapping.column_for("b").map(|c| c.index), Some(0));
    }

    #[test]
    fn test_duplicate_heading_last_wins() {
        let columns = vec![column("Units", 2), column("Item", 3), column("Units", 5)];
        let mapping = map_fields(vec![field("units", "heading=Units")], &columns);

        assert_eq!(mapping.column_for("units").map(|c| c.index), Some(5));
    }
}
