//! Tests for multi-file namespaces, imports and includes.

mod common;

use basalt_ast::{RouteDecl, SourceFile, SourceFileBuilder, TypeDeclBuilder, TypeRef};
use basalt_core::type_system::DataType;
use basalt_ir::ImportReason;
use basalt_semantic::{analyze, analyze_with_config};
use basalt_utils::{Config, ResolverConfig};
use common::{error_message, file, namespace, resolve, resolve_with_headers, type_id};

fn users_file() -> SourceFile {
    file("users")
        .alias("AccountId", TypeRef::named("String").attr("min_length", 1))
        .type_decl(
            TypeDeclBuilder::structure("Account")
                .field("id", TypeRef::named("AccountId"))
                .build(),
        )
        .build()
}

#[test]
fn test_first_declaration_must_be_namespace() {
    let source = SourceFileBuilder::new("loose.basalt")
        .alias("Rev", TypeRef::named("String"))
        .build();
    let message = error_message(resolve(&[source]));
    assert!(message.contains("First declaration in 'loose.basalt' must be a namespace"));
}

#[test]
fn test_files_of_one_namespace_share_symbols() {
    let first = file("files")
        .alias("Rev", TypeRef::named("String"))
        .build();
    let second = SourceFileBuilder::new("files_more.basalt")
        .namespace("files")
        .type_decl(
            TypeDeclBuilder::structure("FileMetadata")
                .field("rev", TypeRef::named("Rev"))
                .build(),
        )
        .build();
    let api = resolve(&[first, second]).unwrap();
    assert_eq!(api.namespaces.len(), 1);
    assert!(namespace(&api, "files").data_type("FileMetadata").is_some());
}

#[test]
fn test_foreign_references_record_import_reasons() {
    let team = file("team")
        .import("users")
        .alias("Owner", TypeRef::qualified("users", "Account"))
        .type_decl(
            TypeDeclBuilder::structure("Team")
                .field("owner_id", TypeRef::qualified("users", "AccountId"))
                .build(),
        )
        .build();
    let api = resolve(&[users_file(), team]).unwrap();

    let team_ns = namespace(&api, "team");
    assert_eq!(
        team_ns.import_reason("users"),
        Some(ImportReason {
            alias: true,
            data_type: true
        })
    );
    assert_eq!(team_ns.get_imported_namespaces(true, false), ["users"]);

    let account = type_id(&api, "users", "Account");
    let owner = team_ns.alias("Owner").unwrap();
    assert_eq!(
        api.registry.alias(owner).data_type,
        DataType::struct_ref(account)
    );
}

#[test]
fn test_alias_only_import() {
    let team = file("team")
        .import("users")
        .alias("Owner", TypeRef::qualified("users", "AccountId"))
        .build();
    let api = resolve(&[users_file(), team]).unwrap();
    let team_ns = namespace(&api, "team");
    assert!(team_ns.get_imported_namespaces(true, true).is_empty());
    assert_eq!(team_ns.get_imported_namespaces(false, true), ["users"]);
    assert!(team_ns.get_imported_namespaces(false, false).is_empty());
}

#[test]
fn test_foreign_reference_requires_import() {
    let team = file("team")
        .alias("Owner", TypeRef::qualified("users", "Account"))
        .build();
    let message = error_message(resolve(&[users_file(), team]));
    assert!(message.contains("Namespace 'users' must be imported"));
}

#[test]
fn test_import_of_later_namespace_rejected() {
    let team = file("team").import("users").build();
    let message = error_message(resolve(&[team, users_file()]));
    assert!(message.contains("which is not defined before it"));
}

#[test]
fn test_self_import_rejected() {
    let source = file("users").import("users").build();
    let message = error_message(resolve(&[source]));
    assert!(message.contains("cannot import itself"));
}

#[test]
fn test_unknown_foreign_symbol() {
    let team = file("team")
        .import("users")
        .alias("Owner", TypeRef::qualified("users", "Admin"))
        .build();
    let message = error_message(resolve(&[users_file(), team]));
    assert!(message.contains("Symbol 'Admin' is undefined in namespace 'users'"));
}

#[test]
fn test_include_expands_header() {
    let shared = SourceFileBuilder::new("shared.basalth")
        .alias("Rev", TypeRef::named("String").attr("min_length", 9))
        .type_decl(
            TypeDeclBuilder::structure("Dimensions")
                .field("height", TypeRef::named("UInt64"))
                .build(),
        )
        .build();
    let source = file("files")
        .include("shared")
        .type_decl(
            TypeDeclBuilder::structure("Photo")
                .field("rev", TypeRef::named("Rev"))
                .field("dimensions", TypeRef::named("Dimensions"))
                .build(),
        )
        .build();
    let api = resolve_with_headers(&[source], &[shared]).unwrap();
    let files = namespace(&api, "files");
    assert!(files.alias("Rev").is_some());
    assert!(files.data_type("Dimensions").is_some());
    assert!(files.data_type("Photo").is_some());
}

#[test]
fn test_header_included_twice_expands_once() {
    let shared = SourceFileBuilder::new("shared")
        .alias("Rev", TypeRef::named("String"))
        .build();
    let first = file("files").include("shared").build();
    let second = SourceFileBuilder::new("files_more.basalt")
        .namespace("files")
        .include("shared")
        .build();
    let api = resolve_with_headers(&[first, second], &[shared]).unwrap();
    assert_eq!(namespace(&api, "files").aliases.len(), 1);
}

#[test]
fn test_missing_header() {
    let source = file("files").include("missing").build();
    let message = error_message(resolve(&[source]));
    assert!(message.contains("Included header 'missing' does not exist"));
}

#[test]
fn test_cyclic_include_rejected() {
    let a = SourceFileBuilder::new("a").include("b").build();
    let b = SourceFileBuilder::new("b").include("a").build();
    let source = file("files").include("a").build();
    let message = error_message(resolve_with_headers(&[source], &[a, b]));
    assert!(message.contains("Cyclic include: a -> b -> a"));
}

#[test]
fn test_include_depth_limit() {
    let headers: Vec<_> = (0..4)
        .map(|i| {
            let mut builder = SourceFileBuilder::new(format!("h{i}"));
            if i < 3 {
                builder.include(format!("h{}", i + 1));
            }
            builder.build()
        })
        .collect();
    let source = file("files").include("h0").build();

    let shallow = ResolverConfig {
        max_include_depth: 2,
        normalize: false,
    };
    let err = analyze(std::slice::from_ref(&source), &headers, &shallow).unwrap_err();
    assert!(err.to_string().contains("maximum include depth of 2"));

    assert!(analyze(&[source], &headers, &ResolverConfig::default()).is_ok());
}

#[test]
fn test_header_cannot_declare_routes() {
    let bad = SourceFileBuilder::new("bad")
        .route(RouteDecl::new(
            "ping",
            TypeRef::named("Void"),
            TypeRef::named("Void"),
            TypeRef::named("Void"),
        ))
        .build();
    let source = file("files").include("bad").build();
    let message = error_message(resolve_with_headers(&[source], &[bad]));
    assert!(message.contains("may only contain aliases, type definitions and includes"));
}

#[test]
fn test_second_namespace_declaration_rejected() {
    let source = file("files").namespace("other").build();
    let message = error_message(resolve(&[source]));
    assert!(message.contains("Unexpected namespace declaration 'other'"));
}

#[test]
fn test_normalized_output() {
    let files = file("files")
        .type_decl(TypeDeclBuilder::structure("Zip").build())
        .type_decl(TypeDeclBuilder::structure("Archive").build())
        .alias("Rev", TypeRef::named("String"))
        .alias("Path", TypeRef::named("String"))
        .build();
    let common = file("common").build();

    let mut config = Config::new("files-api");
    config.package.version = "2.1.0".to_string();
    let api = analyze_with_config(&[files, common], &[], &config).unwrap();

    assert_eq!(api.version, "2.1.0");
    insta::assert_snapshot!(api.to_string(), @r"
    api 2.1.0

    namespace common

    namespace files
      alias Path = String
      alias Rev = String
      struct Archive
      struct Zip
    ");
}
