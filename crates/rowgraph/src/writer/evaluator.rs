use crate::{entity::EntityRef, mapping::PropertyMap, value::Value};
use time::OffsetDateTime;

///
/// PropertyEvaluator
///
/// Export hook for values that cannot be derived from the entity's own
/// properties. Implementations are registered on the writer under the
/// source tag a mapping uses for the synthetic column.
///

pub trait PropertyEvaluator {
    /// Value associated with the entity and rule, if one can be produced.
    fn evaluate(&self, entity: &EntityRef, rule: &PropertyMap) -> Option<Value>;
}

///
/// TimeStampEvaluator
///
/// Sample evaluator: renders the entity kind with the current UTC time.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TimeStampEvaluator;

impl PropertyEvaluator for TimeStampEvaluator {
    fn evaluate(&self, entity: &EntityRef, _rule: &PropertyMap) -> Option<Value> {
        let stamp = OffsetDateTime::now_utc();

        Some(Value::Text(format!("{}:{stamp}", entity.kind())))
    }
}
