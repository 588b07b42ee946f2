use crate::entity::{Entity, EntityRef};

///
/// EntitySource
///
/// Contract with the external entity store. The engine takes one immutable
/// snapshot per call and never triggers further loads mid-row; entities
/// created through the factory are unattached and travel back to the caller
/// with the mapping result, which owns persistence.
///

pub trait EntitySource {
    /// Snapshot of every entity the backing store has materialized.
    fn entities(&self) -> Vec<EntityRef>;

    /// Create a new, unattached entity of the given kind.
    fn create(&self, kind: &str) -> EntityRef;
}

///
/// InMemorySource
///
/// Trivial source over a pre-materialized collection. Used by tests and by
/// callers that assemble their graph up front.
///

#[derive(Debug, Default)]
pub struct InMemorySource {
    entities: Vec<EntityRef>,
}

impl InMemorySource {
    #[must_use]
    pub const fn new(entities: Vec<EntityRef>) -> Self {
        Self { entities }
    }

    pub fn push(&mut self, entity: EntityRef) {
        self.entities.push(entity);
    }
}

impl EntitySource for InMemorySource {
    fn entities(&self) -> Vec<EntityRef> {
        self.entities.clone()
    }

    fn create(&self, kind: &str) -> EntityRef {
        EntityRef::new(Entity::new(kind))
    }
}
