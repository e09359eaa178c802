//! Common test utilities for resolver tests.

#![allow(dead_code)]

use basalt_ast::{SourceFile, SourceFileBuilder, TypeDecl};
use basalt_core::Result;
use basalt_core::type_system::{DataType, PrimitiveTable, TypeId};
use basalt_ir::{Api, ApiNamespace};
use basalt_semantic::analyze;
use basalt_utils::ResolverConfig;

/// Resolver settings that keep declaration order, so tests can assert on it.
pub fn unnormalized() -> ResolverConfig {
    ResolverConfig {
        normalize: false,
        ..ResolverConfig::default()
    }
}

/// Resolves `files` with no headers and declaration order preserved.
pub fn resolve(files: &[SourceFile]) -> Result<Api> {
    analyze(files, &[], &unnormalized())
}

/// Resolves `files` with the given headers and declaration order preserved.
pub fn resolve_with_headers(files: &[SourceFile], headers: &[SourceFile]) -> Result<Api> {
    analyze(files, headers, &unnormalized())
}

/// A file declaring `namespace` and nothing else, to extend with the builder.
pub fn file(namespace: &str) -> SourceFileBuilder {
    let mut builder = SourceFileBuilder::new(format!("{namespace}.basalt"));
    builder.namespace(namespace);
    builder
}

/// Resolves a single file declaring `types` in namespace `test`.
pub fn resolve_types(types: Vec<TypeDecl>) -> Result<Api> {
    let mut builder = file("test");
    for decl in types {
        builder.type_decl(decl);
    }
    resolve(&[builder.build()])
}

/// The error message of a failed resolution.
pub fn error_message(result: Result<Api>) -> String {
    match result {
        Ok(_) => panic!("expected resolution to fail"),
        Err(err) => err.to_string(),
    }
}

pub fn namespace<'a>(api: &'a Api, name: &str) -> &'a ApiNamespace {
    api.namespace(name)
        .unwrap_or_else(|| panic!("namespace '{name}' is missing"))
}

pub fn type_id(api: &Api, namespace_name: &str, name: &str) -> TypeId {
    namespace(api, namespace_name)
        .data_type(name)
        .unwrap_or_else(|| panic!("type '{name}' is missing"))
}

pub fn primitive(name: &str) -> DataType {
    PrimitiveTable::standard()
        .get(name)
        .unwrap()
        .instantiate(vec![])
        .unwrap()
}
