//! Tests for dependency ordering of types and aliases.

use basalt_core::Span;
use basalt_core::type_system::{Alias, DataType, TypeId, TypeRegistry};
use basalt_ir::ApiNamespace;

fn names(registry: &TypeRegistry, ids: &[TypeId]) -> Vec<String> {
    ids.iter().map(|id| registry.name(*id).to_string()).collect()
}

fn declare_child(registry: &mut TypeRegistry, name: &str, ns: &str, parent: TypeId) -> TypeId {
    let id = registry.declare_struct(name, ns, Span::default());
    registry.struct_type_mut(id).unwrap().parent = Some(parent);
    id
}

#[test]
fn test_parents_come_first() {
    let mut registry = TypeRegistry::new();
    let base = registry.declare_struct("Metadata", "files", Span::default());
    let file = declare_child(&mut registry, "FileMetadata", "files", base);
    let photo = declare_child(&mut registry, "PhotoMetadata", "files", file);

    let mut namespace = ApiNamespace::new("files");
    // Children listed before their parents, as after normalization.
    namespace.add_data_type("PhotoMetadata", photo);
    namespace.add_data_type("FileMetadata", file);
    namespace.add_data_type("Metadata", base);

    let ordered = namespace.linearize_data_types(&registry);
    insta::assert_debug_snapshot!(names(&registry, &ordered), @r#"
    [
        "Metadata",
        "FileMetadata",
        "PhotoMetadata",
    ]
    "#);
}

#[test]
fn test_parent_index_precedes_child_index() {
    let mut registry = TypeRegistry::new();
    let root = registry.declare_struct("Root", "tree", Span::default());
    let a = declare_child(&mut registry, "A", "tree", root);
    let b = declare_child(&mut registry, "B", "tree", root);
    let aa = declare_child(&mut registry, "AA", "tree", a);

    let mut namespace = ApiNamespace::new("tree");
    for (name, id) in [("AA", aa), ("B", b), ("A", a), ("Root", root)] {
        namespace.add_data_type(name, id);
    }

    let ordered = namespace.linearize_data_types(&registry);
    assert_eq!(ordered.len(), 4);
    let index = |id: TypeId| ordered.iter().position(|x| *x == id).unwrap();
    for &id in &ordered {
        if let Some(parent) = registry.get(id).and_then(|t| t.parent()) {
            assert!(index(parent) < index(id));
        }
    }
}

#[test]
fn test_foreign_parent_skipped() {
    let mut registry = TypeRegistry::new();
    let account = registry.declare_struct("Account", "users", Span::default());
    let admin = declare_child(&mut registry, "Admin", "team", account);

    let mut namespace = ApiNamespace::new("team");
    namespace.add_data_type("Admin", admin);

    let ordered = namespace.linearize_data_types(&registry);
    assert_eq!(names(&registry, &ordered), ["Admin"]);
}

#[test]
fn test_alias_chain_ordered() {
    let mut registry = TypeRegistry::new();
    let rev = registry.add_alias(Alias::new(
        "Rev",
        "files",
        DataType::boolean(),
        Span::default(),
    ));
    let rev_alias = registry.add_alias(Alias::new(
        "RevAlias",
        "files",
        DataType::alias_ref(rev),
        Span::default(),
    ));
    let latest = registry.add_alias(Alias::new(
        "LatestRev",
        "files",
        DataType::alias_ref(rev_alias).with_nullable(true),
        Span::default(),
    ));

    let mut namespace = ApiNamespace::new("files");
    namespace.add_alias("LatestRev", latest);
    namespace.add_alias("Rev", rev);
    namespace.add_alias("RevAlias", rev_alias);

    let ordered: Vec<_> = namespace
        .linearize_aliases(&registry)
        .into_iter()
        .map(|id| registry.alias(id).name.clone())
        .collect();
    assert_eq!(ordered, ["Rev", "RevAlias", "LatestRev"]);
}
