mod codec;


pub use codec::{contains_value, resolve_references, split_cell, to_cell_value};

use crate::entity::EntityRef;

///
/// Value
///
/// Property values carried by entities. `Null` is an explicitly cleared
/// property; a property that was never set reads back as absent instead.
///
/// List order is preserved: link aggregation and export rendering both
/// depend on it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// Scalar cell text.
    Text(String),
    /// Single entity reference.
    Entity(EntityRef),
    /// Ordered list of values.
    List(Vec<Self>),
    Null,
}

impl Value {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Entity references contained in this value, in order.
    #[must_use]
    pub fn references(&self) -> Vec<EntityRef> {
        match self {
            Self::Entity(entity) => vec![entity.clone()],
            Self::List(values) => values.iter().flat_map(Self::references).collect(),
            Self::Text(_) | Self::Null => Vec::new(),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}
