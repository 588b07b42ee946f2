use crate::{
    error::ConfigurationError,
    mapping::PropertyMap,
    path::{PathTree, PropertyDescriptor},
    test_support::{identifier, setter, type_map},
};

// ---- descriptor -------------------------------------------------------

#[test]
fn descriptor_parses_dotted_segments() {
    let descriptor = PropertyDescriptor::parse("iteration.element.parameter");

    assert_eq!(descriptor.depth(), 3);
    assert_eq!(descriptor.name(), Some("iteration"));
    assert_eq!(descriptor.last(), Some("parameter"));
    assert_eq!(descriptor.segment(1), Some("element"));
}

#[test]
fn descriptor_of_the_empty_path_has_depth_zero() {
    let descriptor = PropertyDescriptor::parse("");

    assert_eq!(descriptor.depth(), 0);
    assert_eq!(descriptor.name(), None);
    assert_eq!(descriptor.last(), None);
}

// ---- tree building ----------------------------------------------------

#[test]
fn builds_a_single_chain_from_depth_ordered_rules() {
    let map = type_map(
        "Parameter",
        vec![
            identifier("model", "", "Model", "name"),
            identifier("element", "elements", "Element", "name"),
            identifier("parameter", "elements.parameters", "Parameter", "name"),
        ],
    );

    let tree = PathTree::build(&map).unwrap();

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.root().children, vec![1]);
    assert_eq!(tree.node(1).rule.source, "element");
    assert_eq!(tree.node(1).link_property(), Some("elements"));
    assert_eq!(tree.node(1).children, vec![2]);
    assert_eq!(tree.node(2).parent, Some(1));
    assert_eq!(tree.node(2).link_property(), Some("parameters"));
}

#[test]
fn same_depth_siblings_group_under_the_parent_sharing_their_source() {
    let map = type_map(
        "Parameter",
        vec![
            identifier("element", "", "Model", "name"),
            identifier("element", "elements", "Element", "name"),
            identifier("other", "owners", "Owner", "name"),
        ],
    );

    let tree = PathTree::build(&map).unwrap();

    // Only the rule sharing the root's source attaches.
    assert_eq!(tree.root().children.len(), 1);
    assert_eq!(tree.node(1).rule.source, "element");
}

#[test]
fn same_depth_siblings_all_attach_when_none_shares_the_source() {
    let map = type_map(
        "Parameter",
        vec![
            identifier("model", "", "Model", "name"),
            identifier("element", "elements", "Element", "name"),
            identifier("owner", "owners", "Owner", "name"),
        ],
    );

    let tree = PathTree::build(&map).unwrap();

    assert_eq!(tree.root().children.len(), 2);
}

// ---- failure shapes ---------------------------------------------------

#[test]
fn a_mapping_without_an_entry_point_is_rejected() {
    let map = type_map(
        "Parameter",
        vec![identifier("element", "elements", "Element", "name")],
    );

    assert!(matches!(
        PathTree::build(&map),
        Err(ConfigurationError::MissingEntryPoint)
    ));
}

#[test]
fn a_mapping_with_two_entry_points_is_rejected() {
    let map = type_map(
        "Parameter",
        vec![
            identifier("model", "", "Model", "name"),
            identifier("other", "", "Model", "name"),
        ],
    );

    assert!(matches!(
        PathTree::build(&map),
        Err(ConfigurationError::MultipleEntryPoints)
    ));
}

#[test]
fn an_identifier_rule_without_a_kind_is_rejected() {
    let mut rule = identifier("model", "", "Model", "name");
    rule.entity_kind = None;

    let map = type_map("Parameter", vec![rule]);

    assert!(matches!(
        PathTree::build(&map),
        Err(ConfigurationError::MissingEntityKind { source }) if source == "model"
    ));
}

#[test]
fn a_target_kind_entry_point_must_be_the_only_identifier() {
    let map = type_map(
        "Parameter",
        vec![
            identifier("parameter", "", "Parameter", "name"),
            identifier("element", "elements", "Element", "name"),
        ],
    );

    assert!(matches!(
        PathTree::build(&map),
        Err(ConfigurationError::EntryPointNotAlone)
    ));
}

#[test]
fn a_lone_target_kind_entry_point_is_accepted() {
    let map = type_map(
        "Parameter",
        vec![
            identifier("parameter", "", "Parameter", "name"),
            setter("value", "value"),
        ],
    );

    let tree = PathTree::build(&map).unwrap();

    assert_eq!(tree.len(), 1);
    assert!(tree.root().children.is_empty());
}
