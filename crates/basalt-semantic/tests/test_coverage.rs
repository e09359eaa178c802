//! Tests for coverage (enumerated subtype) resolution.

mod common;

use basalt_ast::{TypeDeclBuilder, TypeRef};
use common::{error_message, resolve_types, type_id};

fn base_with_coverage(names: &[&str]) -> basalt_ast::TypeDecl {
    TypeDeclBuilder::structure("Base")
        .field("id", TypeRef::named("String"))
        .coverage(names.iter().copied())
        .build()
}

fn child(name: &str, parent: &str) -> basalt_ast::TypeDecl {
    TypeDeclBuilder::structure(name)
        .extends(TypeRef::named(parent))
        .build()
}

#[test]
fn test_coverage_of_later_subtypes() {
    let api = resolve_types(vec![
        base_with_coverage(&["A", "B"]),
        child("A", "Base"),
        child("B", "Base"),
    ])
    .unwrap();

    let base = type_id(&api, "test", "Base");
    let coverage: Vec<_> = api
        .registry
        .struct_type(base)
        .unwrap()
        .coverage
        .iter()
        .map(|id| api.registry.name(*id))
        .collect();
    assert_eq!(coverage, ["A", "B"]);
    for id in &api.registry.struct_type(base).unwrap().coverage {
        assert_eq!(api.registry.get(*id).and_then(|t| t.parent()), Some(base));
    }
}

#[test]
fn test_coverage_of_non_subtype_rejected() {
    let message = error_message(resolve_types(vec![
        base_with_coverage(&["A", "Other"]),
        child("A", "Base"),
        TypeDeclBuilder::structure("Other").build(),
    ]));
    assert!(message.contains("which does not extend 'Base'"));
}

#[test]
fn test_coverage_of_grandchild_rejected() {
    let message = error_message(resolve_types(vec![
        base_with_coverage(&["A", "AA"]),
        child("A", "Base"),
        child("AA", "A"),
    ]));
    assert!(message.contains("'AA', which does not extend 'Base'"));
}

#[test]
fn test_coverage_of_undefined_type() {
    let message = error_message(resolve_types(vec![base_with_coverage(&["Missing"])]));
    assert!(message.contains("undefined type 'Missing'"));
}

#[test]
fn test_coverage_duplicate_rejected() {
    let message = error_message(resolve_types(vec![
        base_with_coverage(&["A", "A"]),
        child("A", "Base"),
    ]));
    assert!(message.contains("more than once"));
}

#[test]
fn test_coverage_must_list_every_subtype() {
    let message = error_message(resolve_types(vec![
        base_with_coverage(&["A"]),
        child("A", "Base"),
        child("B", "Base"),
    ]));
    assert!(message.contains("Struct 'B' extends 'Base' but is missing from its coverage"));
}

#[test]
fn test_coverage_on_union_rejected() {
    let message = error_message(resolve_types(vec![
        TypeDeclBuilder::union("Shape")
            .symbol("circle")
            .coverage(["Square"])
            .build(),
    ]));
    assert!(message.contains("Union 'Shape' cannot declare coverage"));
}

#[test]
fn test_coverage_names_union_rejected() {
    let message = error_message(resolve_types(vec![
        base_with_coverage(&["Shape"]),
        TypeDeclBuilder::union("Shape").symbol("circle").build(),
    ]));
    assert!(message.contains("which is not a struct"));
}
