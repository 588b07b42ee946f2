//! Shared fixture builders for the in-crate tests.

use crate::{
    entity::{Entity, EntityRef, InMemorySource},
    mapping::{PropertyMap, TypeMap},
    value::Value,
};

/// Build an entity with the given scalar/reference properties.
pub(crate) fn entity(kind: &str, properties: &[(&str, Value)]) -> EntityRef {
    let mut entity = Entity::new(kind);
    for (name, value) in properties {
        entity.set_value(*name, value.clone());
    }

    EntityRef::new(entity)
}

pub(crate) fn text(value: &str) -> Value {
    Value::text(value)
}

pub(crate) fn store(entities: Vec<EntityRef>) -> InMemorySource {
    InMemorySource::new(entities)
}

/// Identifier rule searching `search` on candidates of `kind`.
pub(crate) fn identifier(source: &str, path: &str, kind: &str, search: &str) -> PropertyMap {
    PropertyMap {
        source: source.to_string(),
        is_identifier: true,
        path: path.to_string(),
        search: Some(search.to_string()),
        entity_kind: Some(kind.to_string()),
        ..PropertyMap::default()
    }
}

/// Plain value-setting rule.
pub(crate) fn setter(source: &str, target: &str) -> PropertyMap {
    PropertyMap {
        source: source.to_string(),
        target: Some(target.to_string()),
        ..PropertyMap::default()
    }
}

pub(crate) fn type_map(kind: &str, properties: Vec<PropertyMap>) -> TypeMap {
    TypeMap {
        file_name: None,
        entity_kind: kind.to_string(),
        properties,
    }
}
