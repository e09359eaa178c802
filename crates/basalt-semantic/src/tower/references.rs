//! Type reference resolution.

use super::{Scope, Tower};
use crate::environment::EnvEntry;
use basalt_ast::{AttrValue, TypeRef};
use basalt_core::type_system::{DataType, TypeArg, UserType};
use basalt_core::{Error, Result};

impl<'a> Tower<'a> {
    /// Resolves a reference to a type.
    ///
    /// A constructor is instantiated with the reference's attributes, which
    /// may themselves be type references. An instantiated type takes no
    /// attributes and is copied, nullable if either it or the reference is.
    /// `ns.Name` references require an import of `ns` and record why the
    /// namespace is imported.
    pub(crate) fn resolve_type_ref(&self, scope: &mut Scope<'a>, type_ref: &TypeRef) -> Result<DataType> {
        if let Some(namespace) = &type_ref.namespace {
            return self.resolve_foreign_ref(scope, namespace, type_ref);
        }

        match scope.env.lookup(&type_ref.name).cloned() {
            None => Err(Error::invalid_spec(
                format!(
                    "Symbol '{}' is undefined in namespace '{}'",
                    type_ref.name,
                    scope.name()
                ),
                type_ref.span,
            )),
            Some(EnvEntry::Constructor(constructor)) => {
                let mut args = Vec::with_capacity(type_ref.attrs.len());
                for attr in &type_ref.attrs {
                    let arg = match &attr.value {
                        AttrValue::Value(value) => TypeArg::Value(value.clone()),
                        AttrValue::Type(inner) => TypeArg::Type(self.resolve_type_ref(scope, inner)?),
                    };
                    args.push((attr.key.clone(), arg));
                }
                let data_type = constructor.instantiate(args).map_err(|e| {
                    Error::parameter(
                        format!("Bad parameters for '{}'", type_ref.name),
                        e,
                        type_ref.span,
                    )
                })?;
                Ok(data_type.with_nullable(type_ref.nullable))
            }
            Some(EnvEntry::Value(value)) => {
                if !type_ref.attrs.is_empty() {
                    return Err(Error::invalid_spec(
                        format!(
                            "Attributes cannot be specified for instantiated type '{}'",
                            type_ref.name
                        ),
                        type_ref.span,
                    ));
                }
                let nullable = value.nullable || type_ref.nullable;
                Ok(value.with_nullable(nullable))
            }
        }
    }

    fn resolve_foreign_ref(
        &self,
        scope: &mut Scope<'a>,
        namespace: &str,
        type_ref: &TypeRef,
    ) -> Result<DataType> {
        let display_name = type_ref.display_name();
        if namespace == scope.name() {
            return Err(Error::invalid_spec(
                format!("Reference '{display_name}' names its own namespace; drop the qualifier"),
                type_ref.span,
            ));
        }
        if !scope.imports.contains(namespace) {
            return Err(Error::invalid_spec(
                format!(
                    "Namespace '{namespace}' must be imported before '{display_name}' can be used"
                ),
                type_ref.span,
            ));
        }
        if !type_ref.attrs.is_empty() {
            return Err(Error::invalid_spec(
                format!("Attributes cannot be specified for instantiated type '{display_name}'"),
                type_ref.span,
            ));
        }
        let Some(foreign) = self.resolved_namespace(namespace) else {
            return Err(Error::invalid_spec(
                format!("Namespace '{namespace}' is not defined"),
                type_ref.span,
            ));
        };

        let (data_type, via_alias) = if let Some(id) = foreign.data_type(&type_ref.name) {
            let data_type = match self.registry.get(id) {
                Some(UserType::Union(_)) => DataType::union_ref(id),
                _ => DataType::struct_ref(id),
            };
            (data_type.with_nullable(type_ref.nullable), false)
        } else if let Some(id) = foreign.alias(&type_ref.name) {
            let alias_ref = DataType::alias_ref(id);
            let nullable = self.registry.is_nullable(&alias_ref) || type_ref.nullable;
            (alias_ref.with_nullable(nullable), true)
        } else {
            return Err(Error::invalid_spec(
                format!("Symbol '{}' is undefined in namespace '{namespace}'", type_ref.name),
                type_ref.span,
            ));
        };

        scope
            .namespace
            .add_imported_namespace(namespace, via_alias, !via_alias)
            .map_err(|e| Error::invalid_spec(e.to_string(), type_ref.span))?;
        Ok(data_type)
    }
}
