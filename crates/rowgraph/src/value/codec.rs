use crate::{
    entity::{self, EntityRef},
    mapping::PropertyMap,
    path::PropertyDescriptor,
    value::Value,
};

/// Sentinel written for absent or null values on export.
pub(crate) const ABSENT_CELL: &str = "-";

/// Split cell text on the configured separator, dropping empty tokens.
#[must_use]
pub fn split_cell<'a>(cell: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return if cell.is_empty() { Vec::new() } else { vec![cell] };
    }

    cell.split(separator)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Token-aware membership test backing all identifier matching.
///
/// A separator-delimited `expected` is split and any one token may match.
/// List containers match by element, scalars by string equality. `Null`
/// and absent containers match nothing, and entity references are opaque:
/// they never text-match a token.
#[must_use]
pub fn contains_value(container: Option<&Value>, expected: &str, separator: &str) -> bool {
    let Some(container) = container else {
        return false;
    };

    if !separator.is_empty() && expected.contains(separator) {
        return split_cell(expected, separator)
            .iter()
            .any(|token| contains_value(Some(container), token, separator));
    }

    match container {
        Value::Text(text) => text == expected,
        Value::List(values) => values
            .iter()
            .any(|value| contains_value(Some(value), expected, separator)),
        Value::Entity(_) | Value::Null => false,
    }
}

/// Render a property value into one CSV cell.
///
/// Lists join on the separator, the prefix lands once at the start, and an
/// absent or null value renders as the `-` placeholder.
#[must_use]
pub fn to_cell_value(value: Option<&Value>, separator: &str, prefix: &str) -> String {
    match value {
        None | Some(Value::Null) => ABSENT_CELL.to_string(),
        Some(value) => format!("{prefix}{}", render(value, separator)),
    }
}

fn render(value: &Value, separator: &str) -> String {
    match value {
        Value::Text(text) => text.clone(),
        Value::Entity(entity) => entity.kind(),
        Value::List(values) => values
            .iter()
            .map(|value| render(value, separator))
            .collect::<Vec<_>>()
            .join(separator),
        Value::Null => String::new(),
    }
}

/// Resolve one split token to the entities the rule's search kind declares:
/// entities of `search_entity_kind` whose search property contains the
/// token. Already-produced entities are searched before the snapshot and
/// the result is distinct by identity.
#[must_use]
pub fn resolve_references(
    token: &str,
    rule: &PropertyMap,
    already_produced: &[EntityRef],
    snapshot: &[EntityRef],
) -> Vec<EntityRef> {
    let Some(kind) = rule.search_entity_kind.as_deref() else {
        return Vec::new();
    };

    // The last path segment is the property actually read on candidates.
    let descriptor = rule.search.as_deref().map(PropertyDescriptor::parse);
    let Some(property) = descriptor.as_ref().and_then(PropertyDescriptor::last) else {
        return Vec::new();
    };

    let matches = |entity: &EntityRef| {
        let entity = entity.borrow();
        entity.kind() == kind
            && contains_value(entity.property(property).as_ref(), token, &rule.separator)
    };

    entity::distinct(
        already_produced
            .iter()
            .filter(|entity| matches(entity))
            .chain(snapshot.iter().filter(|entity| matches(entity)))
            .cloned(),
    )
}
