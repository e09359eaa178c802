//! The top-level resolved API.

use basalt_core::type_system::TypeRegistry;

use crate::ApiNamespace;

/// A fully resolved API: every namespace plus the registry holding their types
#[derive(Debug, Clone)]
pub struct Api {
    pub version: String,
    /// Namespaces in resolution order (or sorted, once normalized)
    pub namespaces: Vec<ApiNamespace>,
    /// Structs, unions and aliases of all namespaces
    pub registry: TypeRegistry,
}

impl Api {
    /// Creates an API with no namespaces
    #[must_use]
    pub fn new(version: impl Into<String>, registry: TypeRegistry) -> Self {
        Self {
            version: version.into(),
            namespaces: Vec::new(),
            registry,
        }
    }

    /// Adds a namespace
    pub fn add_namespace(&mut self, namespace: ApiNamespace) {
        self.namespaces.push(namespace);
    }

    /// Finds a namespace by name
    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&ApiNamespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    /// Namespaces imported by `namespace`, sorted by name.
    ///
    /// See [`ApiNamespace::get_imported_namespaces`] for the filters.
    #[must_use]
    pub fn imported_namespaces(
        &self,
        namespace: &ApiNamespace,
        must_have_imported_data_type: bool,
        consider_aliases: bool,
    ) -> Vec<&ApiNamespace> {
        namespace
            .get_imported_namespaces(must_have_imported_data_type, consider_aliases)
            .into_iter()
            .filter_map(|name| self.namespace(name))
            .collect()
    }

    /// Sorts namespaces by name and normalizes each of them.
    ///
    /// Afterwards output ordering no longer depends on declaration order.
    /// Running it again changes nothing.
    pub fn normalize(&mut self) {
        self.namespaces.sort_by(|a, b| a.name.cmp(&b.name));
        for namespace in &mut self.namespaces {
            namespace.normalize(&self.registry);
        }
    }
}
