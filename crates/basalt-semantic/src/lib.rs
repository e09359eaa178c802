//! Semantic resolution for Basalt API specs.
//!
//! This crate turns the declaration records produced by a parser into a
//! fully resolved [`Api`]. It builds a symbol table per namespace, resolves
//! type references (including parameterized primitives, nullability,
//! inheritance and coverage), assembles namespaces and validates examples.

mod environment;
mod tower;

pub use environment::{EnvEntry, Environment};
pub use tower::Tower;

use basalt_ast::SourceFile;
use basalt_core::Result;
use basalt_ir::Api;
use basalt_utils::{Config, ResolverConfig};

/// Version reported by an [`Api`] resolved without a project configuration.
pub const UNVERSIONED: &str = "0.0.0";

/// Resolves a set of API description files into an API.
///
/// # Arguments
/// * `files` - Parsed API description files; each must start with a namespace declaration
/// * `headers` - Files that include declarations may name, by path or file stem
/// * `config` - Resolver settings
///
/// # Errors
/// Returns the first error found:
/// - `InvalidSpec` for undefined or duplicate symbols, bad includes, imports,
///   parents, coverage lists, routes or examples
/// - `Parameter` for inconsistent primitive type parameters
/// - `Validation` for defaults or example values that fail their type's check
///
/// # Examples
/// ```
/// use basalt_ast::{SourceFileBuilder, TypeDeclBuilder, TypeRef};
/// use basalt_semantic::analyze;
/// use basalt_utils::ResolverConfig;
///
/// let file = SourceFileBuilder::new("team.basalt")
///     .namespace("team")
///     .type_decl(
///         TypeDeclBuilder::structure("Quota")
///             .field("quota", TypeRef::named("UInt64"))
///             .build(),
///     )
///     .build();
/// let api = analyze(&[file], &[], &ResolverConfig::default()).unwrap();
/// assert!(api.namespace("team").unwrap().data_type("Quota").is_some());
/// ```
pub fn analyze(
    files: &[SourceFile],
    headers: &[SourceFile],
    config: &ResolverConfig,
) -> Result<Api> {
    Tower::new(config, headers).resolve(UNVERSIONED, files)
}

/// Resolves a set of API description files using a project configuration.
///
/// The API takes its version from `[package]` and the resolver settings from
/// `[resolver]`.
///
/// # Errors
/// Same as [`analyze`].
pub fn analyze_with_config(
    files: &[SourceFile],
    headers: &[SourceFile],
    config: &Config,
) -> Result<Api> {
    Tower::new(&config.resolver, headers).resolve(&config.package.version, files)
}
