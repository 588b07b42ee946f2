use crate::mapping::PropertyMap;
use serde::Deserialize;

///
/// TypeMap
///
/// Binds one target entity kind to an ordered set of property rules.
///

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeMap {
    /// Optional explicit name for the exported CSV file.
    #[serde(alias = "FileName")]
    pub file_name: Option<String>,

    /// Target entity kind.
    #[serde(alias = "ClassKind", alias = "classKind", alias = "EntityKind")]
    pub entity_kind: String,

    /// Ordered property rules.
    #[serde(alias = "Properties")]
    pub properties: Vec<PropertyMap>,
}

impl TypeMap {
    /// Identifier rules in declaration order.
    pub fn identifier_rules(&self) -> impl Iterator<Item = &PropertyMap> {
        self.properties.iter().filter(|rule| rule.is_identifier)
    }

    /// Non-identifier rules that set a value on the mapped entity.
    pub fn value_rules(&self) -> impl Iterator<Item = &PropertyMap> {
        self.properties
            .iter()
            .filter(|rule| !rule.is_identifier && rule.is_value_setter())
    }
}
