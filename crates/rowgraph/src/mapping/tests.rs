use crate::{
    error::{ConfigurationError, Error},
    mapping::parse_type_maps,
};

#[test]
fn parses_a_camel_case_document() {
    let json = r#"[
        {
            "entityKind": "Element",
            "fileName": "elements",
            "properties": [
                {
                    "source": "name",
                    "target": "name",
                    "isIdentifier": true,
                    "path": "",
                    "search": "shortName",
                    "entityKind": "Element",
                    "firstOrDefault": false
                },
                { "source": "owner", "target": "owner" }
            ]
        }
    ]"#;

    let maps = parse_type_maps(json).unwrap();

    assert_eq!(maps.len(), 1);
    assert_eq!(maps[0].entity_kind, "Element");
    assert_eq!(maps[0].file_name.as_deref(), Some("elements"));
    assert_eq!(maps[0].properties.len(), 2);
    assert!(maps[0].properties[0].is_identifier);
    assert_eq!(maps[0].properties[0].search.as_deref(), Some("shortName"));
}

#[test]
fn parses_a_pascal_case_document() {
    let json = r#"[
        {
            "ClassKind": "ElementDefinition",
            "Properties": [
                {
                    "Source": "shortname",
                    "Target": "shortName",
                    "IsIdentifierProperty": true,
                    "Path": "",
                    "Search": "shortName",
                    "ClassKind": "ElementDefinition"
                },
                {
                    "Source": "category",
                    "Target": "category",
                    "Search": "name",
                    "SearchClassKind": "Category",
                    "Separator": ";",
                    "ValuePrefix": "cat-"
                }
            ]
        }
    ]"#;

    let maps = parse_type_maps(json).unwrap();
    let rules = &maps[0].properties;

    assert_eq!(maps[0].entity_kind, "ElementDefinition");
    assert!(rules[0].is_identifier);
    assert_eq!(rules[1].search_entity_kind.as_deref(), Some("Category"));
    assert_eq!(rules[1].separator, ";");
    assert_eq!(rules[1].value_prefix, "cat-");
}

#[test]
fn omitted_fields_take_their_defaults() {
    let json = r#"[{ "entityKind": "Element", "properties": [{ "source": "name" }] }]"#;

    let maps = parse_type_maps(json).unwrap();
    let rule = &maps[0].properties[0];

    assert_eq!(rule.separator, "|");
    assert_eq!(rule.value_prefix, "");
    assert_eq!(rule.path, "");
    assert!(!rule.is_identifier);
    assert!(!rule.first_or_default);
    assert!(!rule.search_based_on_header);
    assert!(rule.target.is_none());
    assert!(!rule.is_value_setter());
}

#[test]
fn a_malformed_document_is_a_configuration_error() {
    let error = parse_type_maps("{ not json ").unwrap_err();

    assert!(matches!(
        error,
        Error::Configuration(ConfigurationError::MalformedDocument(_))
    ));
}
