mod evaluator;


pub use evaluator::{PropertyEvaluator, TimeStampEvaluator};

use crate::{
    entity::EntityRef,
    error::{ArgumentError, Error},
    mapping::{PropertyMap, TypeMap},
    path::PropertyDescriptor,
    value::{self, Value},
};
use std::{collections::HashMap, fs, path::Path};
use tracing::debug;

///
/// CsvWriter
///
/// Flattens entities of a map's target kind into one CSV file per map.
/// Cell values resolve through registered evaluators first (keyed by the
/// rule's source tag), then through the default property query, and render
/// with the shared value codec.
///

#[derive(Default)]
pub struct CsvWriter {
    evaluators: HashMap<String, Box<dyn PropertyEvaluator>>,
}

impl CsvWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an evaluator for every rule whose `source` equals `tag`.
    pub fn register_evaluator(
        &mut self,
        tag: impl Into<String>,
        evaluator: Box<dyn PropertyEvaluator>,
    ) {
        self.evaluators.insert(tag.into(), evaluator);
    }

    /// Write one CSV file per map into the `target` directory, creating it
    /// when absent.
    pub fn write(
        &self,
        entities: &[EntityRef],
        maps: &[TypeMap],
        target: &Path,
    ) -> Result<(), Error> {
        if maps.is_empty() {
            return Err(ArgumentError::EmptyTypeMaps.into());
        }

        fs::create_dir_all(target)?;

        for map in maps {
            self.write_type_map(entities, map, target)?;
        }

        Ok(())
    }

    fn write_type_map(
        &self,
        entities: &[EntityRef],
        map: &TypeMap,
        target: &Path,
    ) -> Result<(), Error> {
        let path = target.join(format!("{}-export.csv", file_name(map)));
        let mut csv = csv::WriterBuilder::new().from_path(&path)?;

        debug!(kind = %map.entity_kind, path = %path.display(), "writing header");

        for rule in &map.properties {
            csv.write_field(rule.target.as_deref().unwrap_or_default())?;
        }
        csv.write_record(None::<&[u8]>)?;

        for entity in entities
            .iter()
            .filter(|entity| entity.kind() == map.entity_kind)
        {
            for rule in &map.properties {
                let queried = self.query_value(entity, rule);
                let cell =
                    value::to_cell_value(queried.as_ref(), &rule.separator, &rule.value_prefix);
                csv.write_field(cell)?;
            }
            csv.write_record(None::<&[u8]>)?;
        }

        csv.flush()?;

        Ok(())
    }

    /// Value for one cell: a registered evaluator for the rule's source tag
    /// wins over the default property query.
    fn query_value(&self, entity: &EntityRef, rule: &PropertyMap) -> Option<Value> {
        if let Some(evaluator) = self.evaluators.get(&rule.source) {
            return evaluator.evaluate(entity, rule);
        }

        entity
            .borrow()
            .query(&PropertyDescriptor::parse(&rule.source))
    }
}

/// Export file name: the explicit one when configured, else the target kind
/// joined with the first path segment of every rule source.
fn file_name(map: &TypeMap) -> String {
    if let Some(name) = map
        .file_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
    {
        return name.to_string();
    }

    let mut parts = vec![map.entity_kind.clone()];
    for rule in &map.properties {
        if let Some(name) = PropertyDescriptor::parse(&rule.source).name() {
            parts.push(name.to_string());
        }
    }

    parts.join("-")
}
