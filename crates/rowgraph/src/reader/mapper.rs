use crate::{
    entity::{self, EntityRef, EntitySource},
    error::{ConfigurationError, DataError, Error},
    mapping::{PropertyMap, TypeMap},
    path::{PathTree, PropertyDescriptor},
    reader::row::Row,
    value::{self, Value},
};
use tracing::{debug, error};

///
/// RowMapper
///
/// Walks one compiled tree for one CSV row. Holds the per-row accumulation:
/// entities read so far, deferred link assignments, and the entities this
/// row created or updated.
///

pub(super) struct RowMapper<'a, S> {
    map: &'a TypeMap,
    tree: &'a PathTree,
    session: &'a S,
    snapshot: &'a [EntityRef],
    already_read: Vec<EntityRef>,
    pending: PendingLinks,
    mapped: Vec<EntityRef>,
}

impl<'a, S: EntitySource> RowMapper<'a, S> {
    pub(super) fn new(
        map: &'a TypeMap,
        tree: &'a PathTree,
        session: &'a S,
        snapshot: &'a [EntityRef],
        already_read: Vec<EntityRef>,
    ) -> Self {
        Self {
            map,
            tree,
            session,
            snapshot,
            already_read,
            pending: PendingLinks::default(),
            mapped: Vec::new(),
        }
    }

    /// Map one row, returning the entities it created or updated, distinct
    /// by identity.
    pub(super) fn map_row(mut self, row: &Row<'_>) -> Result<Vec<EntityRef>, Error> {
        let root = self.tree.root().clone();
        let root_kind = required_kind(&root.rule)?;

        let entry_value = value_to_use(row, &root.rule);
        debug!(kind = %root_kind, "processing entry point");

        let matched = self.query_matching(&root_kind, &entry_value, &root.rule);

        if root_kind == self.map.entity_kind {
            // Direct case: rows map 1:1 onto target entities.
            if matched.is_empty() {
                let created = self.session.create(&root_kind);
                self.update_values(row, &created, &root.rule);
                self.mapped.push(created);
            } else {
                for found in &matched {
                    self.update_values(row, found, &root.rule);
                }
                self.mapped.extend(matched);
            }
        } else {
            // Chained case: the tree may not invent root-level entities.
            if matched.is_empty() {
                error!(
                    source = %root.rule.source,
                    "the csv references entities that are not part of the store"
                );

                return Err(DataError::UnresolvedEntryPoint {
                    source: root.rule.source.clone(),
                }
                .into());
            }

            for child in &root.children {
                self.process_node(*child, &matched, row)?;
            }
        }

        self.pending.apply();

        Ok(entity::distinct(self.mapped))
    }

    fn process_node(
        &mut self,
        index: usize,
        parents: &[EntityRef],
        row: &Row<'_>,
    ) -> Result<(), Error> {
        let node = self.tree.node(index).clone();
        let kind = required_kind(&node.rule)?;
        let value = value_to_use(row, &node.rule);
        let link = node.link_property().unwrap_or_default().to_string();

        let related = self.query_matching(&kind, &value, &node.rule);

        // Entities the parents actually reference through the link property.
        let mut referenced: Vec<EntityRef> = Vec::new();
        for parent in parents {
            match parent.borrow().property(&link) {
                Some(Value::Entity(entity)) => referenced.push(entity),
                Some(Value::List(values)) => {
                    let entities = values.into_iter().filter_map(|value| match value {
                        Value::Entity(entity) => Some(entity),
                        _ => None,
                    });

                    if node.rule.first_or_default {
                        referenced.extend(entities.take(1));
                    } else {
                        referenced.extend(entities);
                    }
                }
                _ => {}
            }
        }

        // Structurally linked to a parent AND matching the cell value.
        let found = entity::distinct(
            referenced
                .into_iter()
                .filter(|entity| related.contains(entity)),
        );
        self.already_read.extend(found.iter().cloned());

        if found.is_empty() {
            if kind != self.map.entity_kind {
                error!(
                    source = %node.rule.source,
                    value = %value,
                    "the csv references entities that are not part of the store"
                );

                return Err(DataError::UnresolvedReference {
                    source: node.rule.source.clone(),
                    value,
                }
                .into());
            }

            let created = self.session.create(&kind);
            self.update_values(row, &created, &node.rule);
            self.mapped.push(created.clone());

            for parent in parents {
                self.pending.push(parent, &link, std::slice::from_ref(&created));
            }
        } else if kind == self.map.entity_kind {
            for entity in &found {
                self.update_values(row, entity, &node.rule);
            }
            self.mapped.extend(found.iter().cloned());

            for parent in parents {
                self.pending.push(parent, &link, &found);
            }
        }

        for child in &node.children {
            self.process_node(*child, &found, row)?;
        }

        Ok(())
    }

    /// Union of snapshot and already-produced entities of `kind` whose
    /// search property contains `value`. `first_or_default` matches every
    /// entity of the kind regardless of value.
    fn query_matching(&self, kind: &str, value: &str, rule: &PropertyMap) -> Vec<EntityRef> {
        let search = rule.search.as_deref().map(PropertyDescriptor::parse);

        let matches = |entity: &EntityRef| {
            let entity = entity.borrow();
            if entity.kind() != kind {
                return false;
            }
            if rule.first_or_default {
                return true;
            }

            let Some(search) = &search else {
                return false;
            };

            value::contains_value(entity.query(search).as_ref(), value, &rule.separator)
        };

        entity::distinct(
            self.snapshot
                .iter()
                .chain(&self.already_read)
                .filter(|entity| matches(entity))
                .cloned(),
        )
    }

    /// Apply every value-setting rule of the map to `entity`: the current
    /// identifier rule's own target first, then the non-identifier rules.
    fn update_values(&self, row: &Row<'_>, entity: &EntityRef, identifier: &PropertyMap) {
        let map = self.map;

        if identifier.is_value_setter() {
            let value = self.value_to_set(row, identifier);
            if let Some(target) = identifier.target.as_deref() {
                entity.borrow_mut().set_value(target, value);
            }
        }

        for rule in map.value_rules() {
            let value = self.value_to_set(row, rule);
            if let Some(target) = rule.target.as_deref() {
                entity.borrow_mut().set_value(target, value);
            }
        }
    }

    /// Build the value a target-setting rule assigns: blank cells clear,
    /// tokens resolve to referenced entities when the rule declares a
    /// search kind, and a single result collapses out of the list.
    fn value_to_set(&self, row: &Row<'_>, rule: &PropertyMap) -> Value {
        let raw = value_to_use(row, rule);
        let raw = if rule.value_prefix.is_empty() {
            raw.as_str()
        } else {
            raw.strip_prefix(&rule.value_prefix).unwrap_or(&raw)
        };

        if raw.trim().is_empty() {
            return Value::Null;
        }

        let mut values: Vec<Value> = Vec::new();
        for token in value::split_cell(raw, &rule.separator) {
            if rule.search_entity_kind.is_some() {
                values.extend(
                    value::resolve_references(token, rule, &self.already_read, self.snapshot)
                        .into_iter()
                        .map(Value::Entity),
                );
            } else {
                values.push(Value::text(token));
            }
        }

        if values.len() == 1 {
            values.swap_remove(0)
        } else {
            Value::List(values)
        }
    }
}

/// Cell value for a rule: the rule's source literal when the rule searches
/// based on the header, the row's cell content otherwise.
fn value_to_use(row: &Row<'_>, rule: &PropertyMap) -> String {
    if rule.search_based_on_header {
        rule.source.clone()
    } else {
        row.field(&rule.source).unwrap_or_default().to_string()
    }
}

fn required_kind(rule: &PropertyMap) -> Result<String, ConfigurationError> {
    rule.entity_kind
        .clone()
        .ok_or_else(|| ConfigurationError::MissingEntityKind {
            source: rule.source.clone(),
        })
}

///
/// PendingLinks
///
/// Deferred `(parent, property) -> entities` assignments discovered while
/// walking the tree. Applied once per row after the walk: gathered entities
/// merge with the references the property already holds, one entity sets a
/// single reference, several set a list. Insertion order is kept so
/// application stays deterministic.
///

#[derive(Debug, Default)]
struct PendingLinks(Vec<PendingLink>);

#[derive(Debug)]
struct PendingLink {
    parent: EntityRef,
    property: String,
    entities: Vec<EntityRef>,
}

impl PendingLinks {
    fn push(&mut self, parent: &EntityRef, property: &str, entities: &[EntityRef]) {
        if let Some(link) = self
            .0
            .iter_mut()
            .find(|link| link.parent == *parent && link.property == property)
        {
            link.entities.extend(entities.iter().cloned());
        } else {
            self.0.push(PendingLink {
                parent: parent.clone(),
                property: property.to_string(),
                entities: entities.to_vec(),
            });
        }
    }

    fn apply(self) {
        for link in self.0 {
            let existing = link
                .parent
                .borrow()
                .property(&link.property)
                .map(|value| value.references())
                .unwrap_or_default();

            let mut entities = entity::distinct(existing.into_iter().chain(link.entities));

            let value = if entities.len() == 1 {
                Value::Entity(entities.swap_remove(0))
            } else {
                Value::List(entities.into_iter().map(Value::Entity).collect())
            };

            link.parent.borrow_mut().set_value(link.property, value);
        }
    }
}
