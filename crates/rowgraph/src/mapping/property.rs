use serde::Deserialize;

///
/// PropertyMap
///
/// One rule of a [`TypeMap`](crate::mapping::TypeMap): which CSV column it
/// reads, which entity property it sets, and how it participates in entity
/// identification and path building.
///

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyMap {
    /// CSV column name; a literal value when `search_based_on_header` is
    /// set.
    #[serde(alias = "Source")]
    pub source: String,

    /// Destination property on the mapped entity. Absent means the rule is
    /// identifier-only and never sets a value.
    #[serde(alias = "Target")]
    pub target: Option<String>,

    /// Whether the rule participates in entity identification and path
    /// building.
    #[serde(alias = "IsIdentifierProperty", alias = "isIdentifierProperty")]
    pub is_identifier: bool,

    /// Dotted chain of property names from the tree root down to this
    /// rule's entity kind; empty marks the root.
    #[serde(alias = "Path")]
    pub path: String,

    /// Property on a candidate entity to compare against the cell value.
    #[serde(alias = "Search")]
    pub search: Option<String>,

    /// Kind this rule resolves to.
    #[serde(alias = "ClassKind", alias = "classKind", alias = "EntityKind")]
    pub entity_kind: Option<String>,

    /// Kind used when resolving referenced values inside a cell.
    #[serde(
        alias = "SearchClassKind",
        alias = "searchClassKind",
        alias = "SearchEntityKind"
    )]
    pub search_entity_kind: Option<String>,

    /// Match any entity of the kind regardless of value. Used when
    /// uniqueness is structural, e.g. a singleton per parent.
    #[serde(alias = "FirstOrDefault")]
    pub first_or_default: bool,

    /// Use `source` itself as the value instead of the cell content.
    #[serde(alias = "SearchBasedOnHeader")]
    pub search_based_on_header: bool,

    /// Separator for enumerable values.
    #[serde(alias = "Separator")]
    pub separator: String,

    /// Prefix applied to the rendered value on export and stripped back off
    /// on import.
    #[serde(alias = "ValuePrefix")]
    pub value_prefix: String,
}

impl Default for PropertyMap {
    fn default() -> Self {
        Self {
            source: String::new(),
            target: None,
            is_identifier: false,
            path: String::new(),
            search: None,
            entity_kind: None,
            search_entity_kind: None,
            first_or_default: false,
            search_based_on_header: false,
            separator: "|".to_string(),
            value_prefix: String::new(),
        }
    }
}

impl PropertyMap {
    /// Whether the rule sets a value on the mapped entity.
    #[must_use]
    pub fn is_value_setter(&self) -> bool {
        self.target
            .as_deref()
            .is_some_and(|target| !target.trim().is_empty())
    }
}
