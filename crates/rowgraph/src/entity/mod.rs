mod source;

#[cfg(test)]
mod tests;

pub use source::{EntitySource, InMemorySource};

use crate::{path::PropertyDescriptor, value::Value};
use derive_more::Deref;
use std::{
    cell::RefCell,
    collections::{BTreeMap, HashSet},
    hash::{Hash, Hasher},
    rc::Rc,
};

///
/// Entity
///
/// One node of the domain graph: a kind tag plus named properties. The
/// engine only ever reads and writes properties; identity generation and
/// persistence belong to the collaborator that produced the entity.
///

#[derive(Debug, Default)]
pub struct Entity {
    kind: String,
    properties: BTreeMap<String, Value>,
}

impl Entity {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Look up a single named property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    /// Walk a dotted property path through entity references.
    ///
    /// A list encountered mid-path fans out over its elements and the
    /// gathered tail values collapse into one list.
    #[must_use]
    pub fn query(&self, descriptor: &PropertyDescriptor) -> Option<Value> {
        let mut current = self.property(descriptor.segment(0)?)?;
        for segment in descriptor.segments().iter().skip(1) {
            current = step(&current, segment)?;
        }

        Some(current)
    }

    /// Set a named property, replacing any previous value.
    pub fn set_value(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
    }
}

fn step(value: &Value, segment: &str) -> Option<Value> {
    match value {
        Value::Entity(entity) => entity.borrow().property(segment),
        Value::List(values) => {
            let gathered: Vec<Value> = values
                .iter()
                .filter_map(|value| step(value, segment))
                .collect();

            if gathered.is_empty() {
                None
            } else {
                Some(Value::List(gathered))
            }
        }
        Value::Text(_) | Value::Null => None,
    }
}

///
/// EntityRef
///
/// Shared handle to an [`Entity`]. Equality and hashing are identity based
/// (the handle address), never structural: produced-entity deduplication
/// and pending-link keys must distinguish two entities that happen to carry
/// the same property values.
///

#[derive(Clone, Debug, Deref)]
pub struct EntityRef(Rc<RefCell<Entity>>);

impl EntityRef {
    #[must_use]
    pub fn new(entity: Entity) -> Self {
        Self(Rc::new(RefCell::new(entity)))
    }

    /// Kind tag, without holding the borrow open.
    #[must_use]
    pub fn kind(&self) -> String {
        self.borrow().kind().to_string()
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for EntityRef {}

impl Hash for EntityRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

/// Order-preserving identity dedup.
pub(crate) fn distinct(entities: impl IntoIterator<Item = EntityRef>) -> Vec<EntityRef> {
    let mut seen: HashSet<*const RefCell<Entity>> = HashSet::new();
    let mut out = Vec::new();

    for entity in entities {
        if seen.insert(Rc::as_ptr(&entity.0)) {
            out.push(entity);
        }
    }

    out
}
