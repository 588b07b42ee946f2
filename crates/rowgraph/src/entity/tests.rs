use crate::{
    entity::{Entity, EntityRef, distinct},
    path::PropertyDescriptor,
    test_support::{entity, text},
    value::Value,
};

#[test]
fn property_reads_back_what_was_set() {
    let foo = entity("Foo", &[("name", text("Alpha"))]);

    assert_eq!(foo.borrow().property("name"), Some(text("Alpha")));
    assert_eq!(foo.borrow().property("missing"), None);
}

#[test]
fn set_value_replaces_the_previous_value() {
    let foo = entity("Foo", &[("name", text("Alpha"))]);
    foo.borrow_mut().set_value("name", text("Beta"));

    assert_eq!(foo.borrow().property("name"), Some(text("Beta")));
}

#[test]
fn query_walks_through_entity_references() {
    let owner = entity("Owner", &[("name", text("System Engineering"))]);
    let element = entity("Element", &[("owner", Value::Entity(owner))]);

    let value = element
        .borrow()
        .query(&PropertyDescriptor::parse("owner.name"));

    assert_eq!(value, Some(text("System Engineering")));
}

#[test]
fn query_fans_out_over_lists() {
    let first = entity("Parameter", &[("name", text("area"))]);
    let second = entity("Parameter", &[("name", text("mass"))]);
    let element = entity(
        "Element",
        &[(
            "parameters",
            Value::List(vec![Value::Entity(first), Value::Entity(second)]),
        )],
    );

    let value = element
        .borrow()
        .query(&PropertyDescriptor::parse("parameters.name"));

    assert_eq!(value, Some(Value::List(vec![text("area"), text("mass")])));
}

#[test]
fn query_stops_on_scalar_midway() {
    let element = entity("Element", &[("name", text("Alpha"))]);

    let value = element
        .borrow()
        .query(&PropertyDescriptor::parse("name.inner"));

    assert_eq!(value, None);
}

#[test]
fn entity_ref_equality_is_identity_not_structure() {
    let left = EntityRef::new(Entity::new("Foo"));
    let right = EntityRef::new(Entity::new("Foo"));

    assert_ne!(left, right);
    assert_eq!(left, left.clone());
}

#[test]
fn distinct_preserves_first_occurrence_order() {
    let a = EntityRef::new(Entity::new("Foo"));
    let b = EntityRef::new(Entity::new("Foo"));

    let out = distinct(vec![a.clone(), b.clone(), a.clone()]);

    assert_eq!(out, vec![a, b]);
}
