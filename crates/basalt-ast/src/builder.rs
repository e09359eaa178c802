//! Builder utilities for constructing declaration records.
//!
//! Parsers produce records directly; these builders exist for orchestrators
//! and tests that assemble specs in code.

use basalt_core::{Span, Value};

use crate::{
    AliasDecl, Declaration, ExampleDecl, FieldDecl, ImportDecl, IncludeDecl, NamespaceDecl,
    RouteDecl, SourceFile, SymbolDecl, TypeDecl, TypeDeclKind, TypeRef, ValueFieldDecl,
};

/// Builder for constructing source files
pub struct SourceFileBuilder {
    file: SourceFile,
}

impl SourceFileBuilder {
    /// Creates a builder for a file with no declarations
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            file: SourceFile::new(path, Vec::new()),
        }
    }

    /// Adds a declaration to the file
    pub fn add_declaration(&mut self, declaration: Declaration) -> &mut Self {
        self.file.declarations.push(declaration);
        self
    }

    /// Adds a namespace declaration
    pub fn namespace(&mut self, name: impl Into<String>) -> &mut Self {
        self.add_declaration(Declaration::Namespace(NamespaceDecl {
            name: name.into(),
            doc: None,
            span: Span::default(),
        }))
    }

    /// Adds an import declaration
    pub fn import(&mut self, target: impl Into<String>) -> &mut Self {
        self.add_declaration(Declaration::Import(ImportDecl {
            target: target.into(),
            span: Span::default(),
        }))
    }

    /// Adds an include declaration
    pub fn include(&mut self, target: impl Into<String>) -> &mut Self {
        self.add_declaration(Declaration::Include(IncludeDecl {
            target: target.into(),
            span: Span::default(),
        }))
    }

    /// Adds an alias declaration
    pub fn alias(&mut self, name: impl Into<String>, type_ref: TypeRef) -> &mut Self {
        self.add_declaration(Declaration::Alias(AliasDecl {
            name: name.into(),
            doc: None,
            type_ref,
            span: Span::default(),
        }))
    }

    /// Adds a struct or union definition
    pub fn type_decl(&mut self, decl: TypeDecl) -> &mut Self {
        self.add_declaration(Declaration::Type(decl))
    }

    /// Adds a route declaration
    pub fn route(&mut self, decl: RouteDecl) -> &mut Self {
        self.add_declaration(Declaration::Route(decl))
    }

    /// Builds and returns the file
    #[must_use]
    pub fn build(&self) -> SourceFile {
        self.file.clone()
    }
}

/// Builder for struct and union definitions
#[derive(Debug, Clone)]
pub struct TypeDeclBuilder {
    decl: TypeDecl,
}

impl TypeDeclBuilder {
    #[must_use]
    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(TypeDeclKind::Struct, name)
    }

    #[must_use]
    pub fn union(name: impl Into<String>) -> Self {
        Self::new(TypeDeclKind::Union, name)
    }

    fn new(kind: TypeDeclKind, name: impl Into<String>) -> Self {
        Self {
            decl: TypeDecl {
                kind,
                name: name.into(),
                parent: None,
                coverage: Vec::new(),
                doc: None,
                fields: Vec::new(),
                examples: Vec::new(),
                span: Span::default(),
            },
        }
    }

    #[must_use]
    pub fn extends(mut self, parent: TypeRef) -> Self {
        self.decl.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn coverage<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decl.coverage = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.decl.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub const fn at(mut self, span: Span) -> Self {
        self.decl.span = span;
        self
    }

    /// Adds a required field
    #[must_use]
    pub fn field(self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.field_decl(ValueFieldDecl {
            name: name.into(),
            type_ref,
            optional: false,
            deprecated: false,
            default: None,
            doc: None,
            span: Span::default(),
        })
    }

    /// Adds a field marked optional (`name Type?`)
    #[must_use]
    pub fn optional_field(self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.field_decl(ValueFieldDecl {
            name: name.into(),
            type_ref,
            optional: true,
            deprecated: false,
            default: None,
            doc: None,
            span: Span::default(),
        })
    }

    /// Adds a field with a default value
    #[must_use]
    pub fn default_field(
        self,
        name: impl Into<String>,
        type_ref: TypeRef,
        default: impl Into<Value>,
    ) -> Self {
        self.field_decl(ValueFieldDecl {
            name: name.into(),
            type_ref,
            optional: false,
            deprecated: false,
            default: Some(default.into()),
            doc: None,
            span: Span::default(),
        })
    }

    /// Adds a fully specified field
    #[must_use]
    pub fn field_decl(mut self, field: ValueFieldDecl) -> Self {
        self.decl.fields.push(FieldDecl::Value(field));
        self
    }

    /// Adds a tag-only union member
    #[must_use]
    pub fn symbol(self, name: impl Into<String>) -> Self {
        self.symbol_decl(name, false)
    }

    /// Adds the union's catch-all member
    #[must_use]
    pub fn catch_all(self, name: impl Into<String>) -> Self {
        self.symbol_decl(name, true)
    }

    fn symbol_decl(mut self, name: impl Into<String>, catch_all: bool) -> Self {
        self.decl.fields.push(FieldDecl::Symbol(SymbolDecl {
            name: name.into(),
            catch_all,
            doc: None,
            span: Span::default(),
        }));
        self
    }

    /// Attaches an example payload under `label`
    #[must_use]
    pub fn example(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.decl.examples.push(ExampleDecl {
            label: label.into(),
            doc: None,
            value: value.into(),
            span: Span::default(),
        });
        self
    }

    #[must_use]
    pub fn build(self) -> TypeDecl {
        self.decl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_builder() {
        let file = SourceFileBuilder::new("team.basalt")
            .namespace("team")
            .import("common")
            .alias("TeamId", TypeRef::named("String").attr("min_length", 1))
            .type_decl(
                TypeDeclBuilder::structure("Quota")
                    .field("quota", TypeRef::named("UInt64"))
                    .build(),
            )
            .build();

        assert_eq!(file.namespace().map(|ns| ns.name.as_str()), Some("team"));
        let kinds: Vec<_> = file.declarations.iter().map(Declaration::kind_name).collect();
        assert_eq!(kinds, ["namespace", "import", "alias", "struct"]);
    }

    #[test]
    fn test_union_builder() {
        let decl = TypeDeclBuilder::union("Role")
            .symbol("owner")
            .symbol("viewer")
            .catch_all("other")
            .build();
        assert_eq!(decl.kind, TypeDeclKind::Union);
        let catch_all: Vec<_> = decl
            .fields
            .iter()
            .filter(|f| matches!(f, FieldDecl::Symbol(s) if s.catch_all))
            .map(FieldDecl::name)
            .collect();
        assert_eq!(catch_all, ["other"]);
    }
}
