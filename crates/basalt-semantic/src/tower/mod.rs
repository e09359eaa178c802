//! The resolver.
//!
//! `Tower` turns declaration records into an [`Api`], one namespace at a
//! time. For each namespace it
//!
//! 1. expands includes into one flat declaration list
//! 2. forward-declares every struct and union
//! 3. resolves imports, aliases, type definitions and routes in order
//! 4. resolves coverage lists, route deprecations and examples in post-passes
//!
//! The first error aborts the whole resolution.

mod aliases;
mod coverage;
mod examples;
mod includes;
mod references;
mod routes;
mod types;

use crate::environment::{EnvEntry, Environment};
use includes::Expansion;
use basalt_ast::{Declaration, ExampleDecl, SourceFile};
use basalt_core::type_system::{DataType, PrimitiveTable, TypeId, TypeRegistry};
use basalt_core::{Error, Result, Span};
use basalt_ir::{Api, ApiNamespace, RouteKey};
use basalt_utils::ResolverConfig;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

/// Resolves declaration records into an [`Api`].
pub struct Tower<'a> {
    pub(crate) config: &'a ResolverConfig,
    /// Include targets, by path and by file stem.
    pub(crate) headers: HashMap<&'a str, &'a SourceFile>,
    pub(crate) registry: TypeRegistry,
    /// Namespaces resolved so far, in resolution order.
    pub(crate) namespaces: Vec<ApiNamespace>,
}

/// State of the namespace currently being resolved.
pub(crate) struct Scope<'a> {
    pub(crate) env: Environment,
    pub(crate) namespace: ApiNamespace,
    /// Namespaces named by an import declaration.
    pub(crate) imports: HashSet<String>,
    pub(crate) pending_coverage: Vec<PendingCoverage>,
    pub(crate) pending_examples: Vec<(TypeId, &'a [ExampleDecl])>,
    pub(crate) pending_deprecations: Vec<(RouteKey, RouteKey, Span)>,
}

/// A struct's coverage list, resolved once the whole namespace is declared.
pub(crate) struct PendingCoverage {
    pub(crate) struct_id: TypeId,
    pub(crate) names: Vec<String>,
    pub(crate) span: Span,
}

impl Scope<'_> {
    fn new(name: &str) -> Self {
        Self {
            env: Environment::new(name, &PrimitiveTable::standard()),
            namespace: ApiNamespace::new(name),
            imports: HashSet::new(),
            pending_coverage: Vec::new(),
            pending_examples: Vec::new(),
            pending_deprecations: Vec::new(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.namespace.name
    }
}

impl<'a> Tower<'a> {
    /// Creates a resolver; `headers` are the files include declarations may name.
    pub fn new(config: &'a ResolverConfig, headers: &'a [SourceFile]) -> Self {
        let mut by_name = HashMap::new();
        for header in headers {
            by_name.insert(header.path.as_str(), header);
            if let Some(stem) = Path::new(&header.path).file_stem().and_then(|s| s.to_str()) {
                by_name.entry(stem).or_insert(header);
            }
        }
        Self {
            config,
            headers: by_name,
            registry: TypeRegistry::new(),
            namespaces: Vec::new(),
        }
    }

    /// Resolves every namespace declared by `files` and assembles the API.
    ///
    /// Files declaring the same namespace are resolved together, in the
    /// order given. Namespaces are resolved in order of first appearance,
    /// so a namespace may import only namespaces that appear before it.
    ///
    /// # Errors
    /// Returns the first `InvalidSpec`, `Parameter` or `Validation` error.
    pub fn resolve(mut self, version: &str, files: &'a [SourceFile]) -> Result<Api> {
        for (name, group) in group_by_namespace(files)? {
            let namespace = self.resolve_namespace(&name, &group)?;
            self.namespaces.push(namespace);
        }

        let mut api = Api::new(version, self.registry);
        for namespace in self.namespaces {
            api.add_namespace(namespace);
        }
        if self.config.normalize {
            api.normalize();
        }
        Ok(api)
    }

    fn resolve_namespace(&mut self, name: &str, files: &[&'a SourceFile]) -> Result<ApiNamespace> {
        debug!(namespace = name, files = files.len(), "resolving namespace");
        let mut scope = Scope::new(name);

        let mut declarations = Vec::new();
        let mut expansion = Expansion::default();
        for &file in files {
            if scope.namespace.doc.is_none()
                && let Some(ns) = file.namespace()
            {
                scope.namespace.doc.clone_from(&ns.doc);
            }
            self.expand_file(file, &mut expansion, &mut declarations)?;
        }

        self.declare_types(&mut scope, &declarations)?;

        for &declaration in &declarations {
            match declaration {
                Declaration::Import(decl) => self.resolve_import(&mut scope, decl)?,
                Declaration::Alias(decl) => self.resolve_alias(&mut scope, decl)?,
                Declaration::Type(decl) => self.resolve_type_decl(&mut scope, decl)?,
                Declaration::Route(decl) => self.resolve_route(&mut scope, decl)?,
                Declaration::Namespace(decl) => {
                    return Err(Error::invalid_spec(
                        format!(
                            "Unexpected namespace declaration '{}' inside namespace '{name}'",
                            decl.name
                        ),
                        decl.span,
                    ));
                }
                Declaration::Include(decl) => {
                    return Err(Error::invalid_spec(
                        format!("Include '{}' was not expanded", decl.target),
                        decl.span,
                    ));
                }
            }
        }

        self.resolve_coverage(&mut scope)?;
        self.resolve_deprecations(&scope)?;
        self.attach_examples(&mut scope)?;

        debug!(
            namespace = name,
            data_types = scope.namespace.data_types.len(),
            aliases = scope.namespace.aliases.len(),
            routes = scope.namespace.routes.len(),
            "resolved namespace"
        );
        Ok(scope.namespace)
    }

    /// Forward-declares every struct and union so later declarations, and
    /// the types themselves, may refer to them before their definition.
    fn declare_types(&mut self, scope: &mut Scope<'a>, declarations: &[&'a Declaration]) -> Result<()> {
        for &declaration in declarations {
            let Declaration::Type(decl) = declaration else {
                continue;
            };
            let (id, data_type) = match decl.kind {
                basalt_ast::TypeDeclKind::Struct => {
                    let id = self
                        .registry
                        .declare_struct(&decl.name, scope.name(), decl.span);
                    (id, DataType::struct_ref(id))
                }
                basalt_ast::TypeDeclKind::Union => {
                    let id = self
                        .registry
                        .declare_union(&decl.name, scope.name(), decl.span);
                    (id, DataType::union_ref(id))
                }
            };
            scope
                .env
                .define(&decl.name, EnvEntry::Value(data_type), decl.span)?;
            scope.namespace.add_data_type(&decl.name, id);
        }
        Ok(())
    }

    fn resolve_import(&self, scope: &mut Scope<'a>, decl: &basalt_ast::ImportDecl) -> Result<()> {
        if decl.target == scope.name() {
            return Err(Error::invalid_spec(
                format!("Namespace '{}' cannot import itself", decl.target),
                decl.span,
            ));
        }
        if self.resolved_namespace(&decl.target).is_none() {
            return Err(Error::invalid_spec(
                format!(
                    "Namespace '{}' imports '{}', which is not defined before it",
                    scope.name(),
                    decl.target
                ),
                decl.span,
            ));
        }
        debug!(namespace = scope.name(), import = %decl.target, "imported namespace");
        scope.imports.insert(decl.target.clone());
        scope
            .namespace
            .add_imported_namespace(&decl.target, false, false)
            .map_err(|e| Error::invalid_spec(e.to_string(), decl.span))
    }

    pub(crate) fn resolved_namespace(&self, name: &str) -> Option<&ApiNamespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }
}

/// Groups files by the namespace their first declaration names, keeping
/// the order in which namespaces first appear.
fn group_by_namespace(files: &[SourceFile]) -> Result<Vec<(String, Vec<&SourceFile>)>> {
    let mut groups: Vec<(String, Vec<&SourceFile>)> = Vec::new();
    for file in files {
        let Some(namespace) = file.namespace() else {
            let span = file
                .declarations
                .first()
                .map_or_else(Span::default, Declaration::span);
            return Err(Error::invalid_spec(
                format!(
                    "First declaration in '{}' must be a namespace declaration",
                    file.path
                ),
                span,
            ));
        };
        match groups.iter_mut().find(|(name, _)| *name == namespace.name) {
            Some((_, group)) => group.push(file),
            None => groups.push((namespace.name.clone(), vec![file])),
        }
    }
    Ok(groups)
}
