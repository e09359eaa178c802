//! Tests for examples attached through type definitions.

mod common;

use basalt_ast::{TypeDeclBuilder, TypeRef};
use basalt_core::type_system::DataType;
use basalt_core::{Error, Value};
use common::{error_message, resolve_types, type_id};

#[test]
fn test_scalar_example() {
    let api = resolve_types(vec![
        TypeDeclBuilder::structure("Quota")
            .field("quota", TypeRef::named("UInt64"))
            .example("default", Value::object([("quota", Value::from(64000))]))
            .build(),
    ])
    .unwrap();
    let quota = type_id(&api, "test", "Quota");
    assert_eq!(
        api.registry.get_example(quota, "default").unwrap(),
        Some(Value::object([("quota", Value::from(64000))]))
    );
}

#[test]
fn test_nested_example_from_later_type() {
    let api = resolve_types(vec![
        TypeDeclBuilder::structure("Team")
            .field("name", TypeRef::named("String"))
            .field("quota", TypeRef::named("Quota"))
            .example("small", Value::object([("name", Value::from("core"))]))
            .build(),
        TypeDeclBuilder::structure("Quota")
            .field("quota", TypeRef::named("UInt64"))
            .example("default", Value::object([("quota", Value::from(10))]))
            .example("small", Value::object([("quota", Value::from(1))]))
            .build(),
    ])
    .unwrap();

    let team = type_id(&api, "test", "Team");
    let example = api.registry.get_example(team, "small").unwrap().unwrap();
    insta::assert_snapshot!(example, @r#"{name: "core", quota: {quota: 1}}"#);
    assert!(DataType::struct_ref(team).check(&example, &api.registry).is_ok());
}

#[test]
fn test_missing_nested_example_rejected() {
    let message = error_message(resolve_types(vec![
        TypeDeclBuilder::structure("Quota")
            .field("quota", TypeRef::named("UInt64"))
            .build(),
        TypeDeclBuilder::structure("Team")
            .field("quota", TypeRef::named("Quota"))
            .example("default", Value::object::<&str, _>([]))
            .build(),
    ]));
    assert!(message.contains("no example of 'Quota' for required field 'quota'"));
}

#[test]
fn test_nullable_nested_example_may_be_missing() {
    let api = resolve_types(vec![
        TypeDeclBuilder::structure("Quota")
            .field("quota", TypeRef::named("UInt64"))
            .build(),
        TypeDeclBuilder::structure("Team")
            .field("name", TypeRef::named("String"))
            .optional_field("quota", TypeRef::named("Quota"))
            .example("default", Value::object([("name", Value::from("core"))]))
            .build(),
    ])
    .unwrap();
    let team = type_id(&api, "test", "Team");
    assert_eq!(
        api.registry.get_example(team, "default").unwrap(),
        Some(Value::object([("name", Value::from("core"))]))
    );
}

#[test]
fn test_invalid_example_value() {
    let err = resolve_types(vec![
        TypeDeclBuilder::structure("Quota")
            .field("quota", TypeRef::named("UInt64"))
            .example("default", Value::object([("quota", Value::from("lots"))]))
            .build(),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_duplicate_example_label() {
    let message = error_message(resolve_types(vec![
        TypeDeclBuilder::structure("Quota")
            .field("quota", TypeRef::named("UInt64"))
            .example("default", Value::object([("quota", Value::from(1))]))
            .example("default", Value::object([("quota", Value::from(2))]))
            .build(),
    ]));
    assert!(message.contains("Example with label 'default' already exists for 'Quota'"));
}

#[test]
fn test_inherited_fields_in_example() {
    let api = resolve_types(vec![
        TypeDeclBuilder::structure("Metadata")
            .field("name", TypeRef::named("String"))
            .build(),
        TypeDeclBuilder::structure("FileMetadata")
            .extends(TypeRef::named("Metadata"))
            .field("size", TypeRef::named("UInt64"))
            .example(
                "default",
                Value::object([("name", Value::from("a.txt")), ("size", Value::from(3))]),
            )
            .build(),
    ])
    .unwrap();
    let file = type_id(&api, "test", "FileMetadata");
    assert!(api.registry.get_example(file, "default").unwrap().is_some());
}

#[test]
fn test_union_example_with_composite_member() {
    let api = resolve_types(vec![
        TypeDeclBuilder::union("Entry")
            .symbol("deleted")
            .field("file", TypeRef::named("File"))
            .example("default", Value::from("file"))
            .example("gone", Value::from("deleted"))
            .build(),
        TypeDeclBuilder::structure("File")
            .field("name", TypeRef::named("String"))
            .example("default", Value::object([("name", Value::from("a.txt"))]))
            .build(),
    ])
    .unwrap();
    let entry = type_id(&api, "test", "Entry");
    insta::assert_snapshot!(
        api.registry.get_example(entry, "default").unwrap().unwrap(),
        @r#"{file: {name: "a.txt"}}"#
    );
    insta::assert_snapshot!(
        api.registry.get_example(entry, "gone").unwrap().unwrap(),
        @"Entry.deleted"
    );
}
