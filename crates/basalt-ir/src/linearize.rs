//! Dependency ordering of a namespace's types and aliases.

use basalt_core::type_system::{AliasId, DataType, TypeId, TypeKind, TypeRegistry};
use std::collections::HashSet;

use crate::ApiNamespace;

impl ApiNamespace {
    /// Structs and unions ordered so that every parent comes before its
    /// children. Parents from other namespaces are not included.
    #[must_use]
    pub fn linearize_data_types(&self, registry: &TypeRegistry) -> Vec<TypeId> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::with_capacity(self.data_types.len());
        for &id in &self.data_types {
            self.visit_data_type(id, registry, &mut seen, &mut ordered);
        }
        ordered
    }

    fn visit_data_type(
        &self,
        id: TypeId,
        registry: &TypeRegistry,
        seen: &mut HashSet<TypeId>,
        ordered: &mut Vec<TypeId>,
    ) {
        let Some(user_type) = registry.get(id) else {
            return;
        };
        if user_type.namespace() != self.name || !seen.insert(id) {
            return;
        }
        if let Some(parent) = user_type.parent() {
            self.visit_data_type(parent, registry, seen, ordered);
        }
        ordered.push(id);
    }

    /// Aliases ordered so that an alias of another local alias comes after it.
    #[must_use]
    pub fn linearize_aliases(&self, registry: &TypeRegistry) -> Vec<AliasId> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::with_capacity(self.aliases.len());
        for &id in &self.aliases {
            self.visit_alias(id, registry, &mut seen, &mut ordered);
        }
        ordered
    }

    fn visit_alias(
        &self,
        id: AliasId,
        registry: &TypeRegistry,
        seen: &mut HashSet<AliasId>,
        ordered: &mut Vec<AliasId>,
    ) {
        let Some(alias) = registry.get_alias(id) else {
            return;
        };
        if alias.namespace != self.name || !seen.insert(id) {
            return;
        }
        if let Some(target) = referenced_alias(&alias.data_type) {
            self.visit_alias(target, registry, seen, ordered);
        }
        ordered.push(id);
    }
}

/// The alias a type refers to, looking through list element types.
fn referenced_alias(data_type: &DataType) -> Option<AliasId> {
    match &data_type.kind {
        TypeKind::Alias(id) => Some(*id),
        TypeKind::List(list) => referenced_alias(&list.item_type),
        _ => None,
    }
}
