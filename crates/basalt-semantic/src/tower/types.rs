//! Struct and union definitions.

use super::{PendingCoverage, Scope, Tower};
use basalt_ast::{FieldDecl, SymbolDecl, TypeDecl, TypeDeclKind, TypeRef, ValueFieldDecl};
use basalt_core::type_system::{
    StructField, SymbolField, TypeId, TypeKind, UnionField, UnionMember, UserType,
};
use basalt_core::{Error, Result, Span};
use std::collections::HashSet;
use tracing::trace;

impl<'a> Tower<'a> {
    pub(crate) fn resolve_type_decl(&mut self, scope: &mut Scope<'a>, decl: &'a TypeDecl) -> Result<()> {
        let Some(id) = scope.namespace.data_type(&decl.name) else {
            return Err(Error::invalid_spec(
                format!("Type '{}' was not declared", decl.name),
                decl.span,
            ));
        };
        let parent = match &decl.parent {
            Some(parent_ref) => Some(self.resolve_parent(scope, decl, parent_ref)?),
            None => None,
        };

        match decl.kind {
            TypeDeclKind::Struct => self.define_struct(scope, decl, id, parent)?,
            TypeDeclKind::Union => self.define_union(scope, decl, id, parent)?,
        }

        if !decl.examples.is_empty() {
            scope.pending_examples.push((id, decl.examples.as_slice()));
        }
        trace!(
            namespace = scope.name(),
            kind = decl.kind.keyword(),
            name = %decl.name,
            fields = decl.fields.len(),
            "defined type"
        );
        Ok(())
    }

    /// Resolves an `extends` target: a defined, non-nullable type of the same kind.
    fn resolve_parent(
        &self,
        scope: &mut Scope<'a>,
        decl: &TypeDecl,
        parent_ref: &TypeRef,
    ) -> Result<TypeId> {
        let keyword = decl.kind.keyword();
        if parent_ref.nullable {
            return Err(Error::invalid_spec(
                format!(
                    "The parent of {keyword} '{}' cannot be nullable",
                    decl.name
                ),
                parent_ref.span,
            ));
        }
        let resolved = self.resolve_type_ref(scope, parent_ref)?;
        let resolved = self.registry.unwrap_alias(&resolved);
        let parent_id = match (decl.kind, &resolved.kind) {
            (TypeDeclKind::Struct, TypeKind::Struct(id))
            | (TypeDeclKind::Union, TypeKind::Union(id)) => *id,
            _ => {
                return Err(Error::invalid_spec(
                    format!(
                        "{keyword} '{}' can only extend a {keyword}, not '{}'",
                        decl.name,
                        parent_ref.display_name()
                    ),
                    parent_ref.span,
                ));
            }
        };
        if resolved.nullable {
            return Err(Error::invalid_spec(
                format!(
                    "The parent of {keyword} '{}' cannot be nullable",
                    decl.name
                ),
                parent_ref.span,
            ));
        }
        let defined = self
            .registry
            .get(parent_id)
            .is_some_and(UserType::is_defined);
        if !defined {
            return Err(Error::invalid_spec(
                format!(
                    "Parent '{}' of {keyword} '{}' must be defined before it",
                    parent_ref.display_name(),
                    decl.name
                ),
                parent_ref.span,
            ));
        }
        Ok(parent_id)
    }

    fn define_struct(
        &mut self,
        scope: &mut Scope<'a>,
        decl: &TypeDecl,
        id: TypeId,
        parent: Option<TypeId>,
    ) -> Result<()> {
        let mut names: HashSet<String> = match parent {
            Some(parent) => self
                .registry
                .struct_all_fields(parent)
                .into_iter()
                .map(|f| f.name.clone())
                .collect(),
            None => HashSet::new(),
        };

        let mut fields = Vec::with_capacity(decl.fields.len());
        for field in &decl.fields {
            let field = match field {
                FieldDecl::Value(field) => field,
                FieldDecl::Symbol(symbol) => {
                    return Err(Error::invalid_spec(
                        format!(
                            "Struct '{}' cannot contain symbol member '{}'",
                            decl.name, symbol.name
                        ),
                        symbol.span,
                    ));
                }
            };
            if !names.insert(field.name.clone()) {
                return Err(duplicate_field(decl, &field.name, field.span));
            }
            fields.push(self.build_struct_field(scope, decl, field)?);
        }

        if !decl.coverage.is_empty() {
            scope.pending_coverage.push(PendingCoverage {
                struct_id: id,
                names: decl.coverage.clone(),
                span: decl.span,
            });
        }

        if let Some(target) = self.registry.struct_type_mut(id) {
            target.doc.clone_from(&decl.doc);
            target.fields = fields;
            target.parent = parent;
            target.defined = true;
        }
        Ok(())
    }

    fn build_struct_field(
        &self,
        scope: &mut Scope<'a>,
        decl: &TypeDecl,
        field: &ValueFieldDecl,
    ) -> Result<StructField> {
        let data_type = self.resolve_type_ref(scope, &field.type_ref)?;
        let nullable = data_type.nullable || field.optional;
        let data_type = data_type.with_nullable(nullable);

        if let Some(default) = &field.default {
            if nullable && !default.is_null() {
                return Err(Error::invalid_spec(
                    format!(
                        "Field '{}' of struct '{}' is nullable and cannot have a non-null default",
                        field.name, decl.name
                    ),
                    field.span,
                ));
            }
            data_type.check(default, &self.registry).map_err(|e| {
                Error::validation(
                    format!("Default of field '{}' of struct '{}'", field.name, decl.name),
                    e,
                    field.span,
                )
            })?;
        }

        Ok(StructField::new(&field.name, data_type, field.default.clone(), field.span)?
            .with_doc(field.doc.clone())
            .with_deprecated(field.deprecated))
    }

    fn define_union(
        &mut self,
        scope: &mut Scope<'a>,
        decl: &TypeDecl,
        id: TypeId,
        parent: Option<TypeId>,
    ) -> Result<()> {
        if !decl.coverage.is_empty() {
            return Err(Error::invalid_spec(
                format!("Union '{}' cannot declare coverage", decl.name),
                decl.span,
            ));
        }

        let mut names: HashSet<String> = match parent {
            Some(parent) => self
                .registry
                .union_all_fields(parent)
                .into_iter()
                .map(|member| member.name().to_string())
                .collect(),
            None => HashSet::new(),
        };
        let inherited_catch_all = parent
            .and_then(|parent| self.registry.union_type(parent))
            .and_then(|u| u.catch_all.clone());

        let mut members = Vec::with_capacity(decl.fields.len());
        let mut own_catch_all: Option<SymbolField> = None;
        for field in &decl.fields {
            if !names.insert(field.name().to_string()) {
                return Err(duplicate_field(decl, field.name(), field.span()));
            }
            match field {
                FieldDecl::Symbol(symbol) => {
                    let symbol = symbol_field(symbol);
                    if symbol.catch_all {
                        if let Some(first) = own_catch_all.as_ref().or(inherited_catch_all.as_ref()) {
                            return Err(Error::invalid_spec(
                                format!(
                                    "Union '{}' already has catch-all member '{}'; '{}' cannot be another",
                                    decl.name, first.name, symbol.name
                                ),
                                symbol.span,
                            ));
                        }
                        own_catch_all = Some(symbol.clone());
                    }
                    members.push(UnionMember::Symbol(symbol));
                }
                FieldDecl::Value(field) => {
                    if field.default.is_some() {
                        return Err(Error::invalid_spec(
                            format!(
                                "Member '{}' of union '{}' cannot have a default",
                                field.name, decl.name
                            ),
                            field.span,
                        ));
                    }
                    let data_type = self.resolve_type_ref(scope, &field.type_ref)?;
                    let nullable = data_type.nullable || field.optional;
                    members.push(UnionMember::Field(UnionField {
                        name: field.name.clone(),
                        data_type: data_type.with_nullable(nullable),
                        doc: field.doc.clone(),
                        span: field.span,
                    }));
                }
            }
        }

        if let Some(target) = self.registry.union_type_mut(id) {
            target.doc.clone_from(&decl.doc);
            target.fields = members;
            target.parent = parent;
            target.catch_all = own_catch_all.or(inherited_catch_all);
            target.defined = true;
        }
        Ok(())
    }
}

fn symbol_field(symbol: &SymbolDecl) -> SymbolField {
    SymbolField {
        name: symbol.name.clone(),
        doc: symbol.doc.clone(),
        catch_all: symbol.catch_all,
        span: symbol.span,
    }
}

fn duplicate_field(decl: &TypeDecl, field: &str, span: Span) -> Error {
    Error::invalid_spec(
        format!(
            "Field '{field}' is already defined in {} '{}' or one of its parents",
            decl.kind.keyword(),
            decl.name
        ),
        span,
    )
}
