//! Alias resolution.

use super::{Scope, Tower};
use crate::environment::EnvEntry;
use basalt_ast::AliasDecl;
use basalt_core::Result;
use basalt_core::type_system::{Alias, DataType};
use tracing::trace;

impl<'a> Tower<'a> {
    pub(crate) fn resolve_alias(&mut self, scope: &mut Scope<'a>, decl: &AliasDecl) -> Result<()> {
        let data_type = self.resolve_type_ref(scope, &decl.type_ref)?;

        let mut alias = Alias::new(&decl.name, scope.name(), data_type, decl.span);
        alias.doc.clone_from(&decl.doc);
        let id = self.registry.add_alias(alias);

        // References to the alias are nullable when its target is.
        let alias_ref = DataType::alias_ref(id);
        let nullable = self.registry.is_nullable(&alias_ref);
        scope
            .env
            .define(&decl.name, EnvEntry::Value(alias_ref.with_nullable(nullable)), decl.span)?;
        scope.namespace.add_alias(&decl.name, id);

        trace!(
            namespace = scope.name(),
            alias = %decl.name,
            target = %self.registry.type_name(&self.registry.alias(id).data_type),
            "resolved alias"
        );
        Ok(())
    }
}
