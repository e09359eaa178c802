//! Namespaces and their import bookkeeping.

use basalt_core::type_system::{AliasId, DataType, TypeId, TypeKind, TypeRegistry};
use basalt_core::{Error, Result, Span};
use std::collections::{BTreeMap, HashMap};

use crate::{ApiRoute, RouteKey};

/// Why a namespace imports another.
///
/// The two reasons are tracked separately so a generator can skip imports
/// that only aliases need when it inlines aliases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ImportReason {
    /// A reference through an alias of the imported namespace.
    pub alias: bool,
    /// A reference to a struct or union of the imported namespace.
    pub data_type: bool,
}

impl ImportReason {
    fn merge(&mut self, alias: bool, data_type: bool) {
        self.alias |= alias;
        self.data_type |= data_type;
    }
}

/// A resolved namespace
#[derive(Debug, Clone, Default)]
pub struct ApiNamespace {
    pub name: String,
    pub doc: Option<String>,
    /// Structs and unions in declaration order (or sorted, once normalized).
    pub data_types: Vec<TypeId>,
    data_type_by_name: HashMap<String, TypeId>,
    pub aliases: Vec<AliasId>,
    alias_by_name: HashMap<String, AliasId>,
    pub routes: Vec<ApiRoute>,
    imported_namespaces: BTreeMap<String, ImportReason>,
}

impl ApiNamespace {
    /// Creates an empty namespace
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a struct or union; a later type with the same name replaces the
    /// name lookup but both stay listed.
    pub fn add_data_type(&mut self, name: impl Into<String>, id: TypeId) {
        self.data_types.push(id);
        self.data_type_by_name.insert(name.into(), id);
    }

    /// Adds an alias
    pub fn add_alias(&mut self, name: impl Into<String>, id: AliasId) {
        self.aliases.push(id);
        self.alias_by_name.insert(name.into(), id);
    }

    /// Adds a route
    pub fn add_route(&mut self, route: ApiRoute) {
        self.routes.push(route);
    }

    /// Finds a struct or union by name
    #[must_use]
    pub fn data_type(&self, name: &str) -> Option<TypeId> {
        self.data_type_by_name.get(name).copied()
    }

    /// Finds an alias by name
    #[must_use]
    pub fn alias(&self, name: &str) -> Option<AliasId> {
        self.alias_by_name.get(name).copied()
    }

    /// Finds a route by name and version
    #[must_use]
    pub fn route(&self, name: &str, version: u32) -> Option<&ApiRoute> {
        self.routes
            .iter()
            .find(|r| r.name == name && r.version == version)
    }

    #[must_use]
    pub fn route_by_key(&self, key: &RouteKey) -> Option<&ApiRoute> {
        self.route(&key.name, key.version)
    }

    /// Records that this namespace imports `namespace`, merging the reasons
    /// into any earlier record.
    ///
    /// # Errors
    /// Returns `InvalidSpec` when `namespace` is this namespace.
    pub fn add_imported_namespace(
        &mut self,
        namespace: &str,
        via_alias: bool,
        via_data_type: bool,
    ) -> Result<()> {
        if namespace == self.name {
            return Err(Error::invalid_spec(
                format!("Namespace '{}' cannot import itself", self.name),
                Span::default(),
            ));
        }
        self.imported_namespaces
            .entry(namespace.to_string())
            .or_default()
            .merge(via_alias, via_data_type);
        Ok(())
    }

    /// The reasons recorded for importing `namespace`.
    #[must_use]
    pub fn import_reason(&self, namespace: &str) -> Option<ImportReason> {
        self.imported_namespaces.get(namespace).copied()
    }

    /// Names of imported namespaces, sorted.
    ///
    /// With `must_have_imported_data_type`, only namespaces whose structs or
    /// unions are referenced are returned. Otherwise a namespace referenced
    /// only through its aliases is returned when `consider_aliases` is set,
    /// and an import with no recorded reference is always returned.
    #[must_use]
    pub fn get_imported_namespaces(
        &self,
        must_have_imported_data_type: bool,
        consider_aliases: bool,
    ) -> Vec<&str> {
        self.imported_namespaces
            .iter()
            .filter(|(_, reason)| {
                if reason.data_type {
                    return true;
                }
                if must_have_imported_data_type {
                    return false;
                }
                consider_aliases || !reason.alias
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// The user-defined types and aliases that route arguments, results and
    /// errors refer to, with list and nullable wrappers removed. Sorted by
    /// name, without duplicates.
    #[must_use]
    pub fn get_route_io_data_types(&self, registry: &TypeRegistry) -> Vec<DataType> {
        let mut found: Vec<DataType> = Vec::new();
        for route in &self.routes {
            for data_type in route.io_types() {
                let mut current = data_type.with_nullable(false);
                while let TypeKind::List(list) = &current.kind {
                    current = list.item_type.with_nullable(false);
                }
                let named = matches!(
                    current.kind,
                    TypeKind::Struct(_) | TypeKind::Union(_) | TypeKind::Alias(_)
                );
                if named && !found.contains(&current) {
                    found.push(current);
                }
            }
        }
        found.sort_by_cached_key(|data_type| registry.type_name(data_type));
        found
    }

    /// Sorts data types and aliases by name and routes by name then version.
    pub fn normalize(&mut self, registry: &TypeRegistry) {
        self.data_types
            .sort_by_cached_key(|id| registry.name(*id).to_string());
        self.aliases
            .sort_by_cached_key(|id| registry.alias(*id).name.clone());
        self.routes.sort_by(|a, b| a.key().cmp(&b.key()));
    }
}
