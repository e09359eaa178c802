//! Coverage resolution.
//!
//! Coverage lists usually name subtypes declared after the struct that
//! claims them, so they are resolved once the whole namespace is defined.

use super::{Scope, Tower};
use crate::environment::EnvEntry;
use basalt_core::type_system::{TypeId, TypeKind};
use basalt_core::{Error, Result};
use tracing::trace;

impl<'a> Tower<'a> {
    pub(crate) fn resolve_coverage(&mut self, scope: &mut Scope<'a>) -> Result<()> {
        for pending in std::mem::take(&mut scope.pending_coverage) {
            let owner = self.registry.name(pending.struct_id).to_string();
            let mut covered: Vec<TypeId> = Vec::with_capacity(pending.names.len());

            for name in &pending.names {
                let subtype = match scope.env.lookup(name) {
                    Some(EnvEntry::Value(data_type)) => match data_type.kind {
                        TypeKind::Struct(id) => id,
                        _ => {
                            return Err(Error::invalid_spec(
                                format!("Coverage of '{owner}' names '{name}', which is not a struct"),
                                pending.span,
                            ));
                        }
                    },
                    Some(EnvEntry::Constructor(_)) => {
                        return Err(Error::invalid_spec(
                            format!("Coverage of '{owner}' names '{name}', which is not a struct"),
                            pending.span,
                        ));
                    }
                    None => {
                        return Err(Error::invalid_spec(
                            format!("Coverage of '{owner}' names undefined type '{name}'"),
                            pending.span,
                        ));
                    }
                };
                let parent = self.registry.get(subtype).and_then(|t| t.parent());
                if parent != Some(pending.struct_id) {
                    return Err(Error::invalid_spec(
                        format!("Coverage of '{owner}' names '{name}', which does not extend '{owner}'"),
                        pending.span,
                    ));
                }
                if covered.contains(&subtype) {
                    return Err(Error::invalid_spec(
                        format!("Coverage of '{owner}' names '{name}' more than once"),
                        pending.span,
                    ));
                }
                covered.push(subtype);
            }

            // Every local subtype must be listed.
            for &candidate in &scope.namespace.data_types {
                let extends_owner = self
                    .registry
                    .get(candidate)
                    .and_then(|t| t.parent())
                    == Some(pending.struct_id);
                if extends_owner && !covered.contains(&candidate) {
                    return Err(Error::invalid_spec(
                        format!(
                            "Struct '{}' extends '{owner}' but is missing from its coverage",
                            self.registry.name(candidate)
                        ),
                        pending.span,
                    ));
                }
            }

            trace!(namespace = scope.name(), owner = %owner, subtypes = covered.len(), "resolved coverage");
            if let Some(owner) = self.registry.struct_type_mut(pending.struct_id) {
                owner.coverage = covered;
            }
        }
        Ok(())
    }
}
