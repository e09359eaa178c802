//! Flat declaration records produced by the parser.

use basalt_core::{Span, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One parsed API description file, or an include header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path of the file; headers are looked up by this name.
    pub path: String,
    pub declarations: Vec<Declaration>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            path: path.into(),
            declarations,
        }
    }

    /// The namespace this file declares, if its first record is a namespace.
    pub fn namespace(&self) -> Option<&NamespaceDecl> {
        match self.declarations.first() {
            Some(Declaration::Namespace(decl)) => Some(decl),
            _ => None,
        }
    }
}

/// Top-level declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    Namespace(NamespaceDecl),
    Import(ImportDecl),
    Include(IncludeDecl),
    Alias(AliasDecl),
    Type(TypeDecl),
    Route(RouteDecl),
}

impl Declaration {
    /// Name of the declared entity, or the target of an import/include.
    pub fn name(&self) -> &str {
        match self {
            Self::Namespace(decl) => &decl.name,
            Self::Import(decl) => &decl.target,
            Self::Include(decl) => &decl.target,
            Self::Alias(decl) => &decl.name,
            Self::Type(decl) => &decl.name,
            Self::Route(decl) => &decl.name,
        }
    }

    pub const fn span(&self) -> Span {
        match self {
            Self::Namespace(decl) => decl.span,
            Self::Import(decl) => decl.span,
            Self::Include(decl) => decl.span,
            Self::Alias(decl) => decl.span,
            Self::Type(decl) => decl.span,
            Self::Route(decl) => decl.span,
        }
    }

    /// Keyword used for the record in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Namespace(_) => "namespace",
            Self::Import(_) => "import",
            Self::Include(_) => "include",
            Self::Alias(_) => "alias",
            Self::Type(decl) => decl.kind.keyword(),
            Self::Route(_) => "route",
        }
    }
}

/// `namespace files`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    pub name: String,
    pub doc: Option<String>,
    pub span: Span,
}

/// `import common`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub target: String,
    pub span: Span,
}

/// `include shared_types`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeDecl {
    pub target: String,
    pub span: Span,
}

/// `alias Rev = String(min_length=1)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasDecl {
    pub name: String,
    pub doc: Option<String>,
    pub type_ref: TypeRef,
    pub span: Span,
}

/// An unresolved reference such as `List(common.Account, max_items=10)?`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    /// Qualifier naming an imported namespace.
    pub namespace: Option<String>,
    pub attrs: Vec<Attr>,
    pub nullable: bool,
    pub span: Span,
}

impl TypeRef {
    /// A bare, non-nullable reference to `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attrs: Vec::new(),
            nullable: false,
            span: Span::default(),
        }
    }

    /// A reference to `name` in another namespace.
    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Self::named(name)
        }
    }

    /// Adds a named attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.push(Attr {
            key: Some(key.into()),
            value: value.into(),
        });
        self
    }

    /// Adds a positional attribute.
    #[must_use]
    pub fn arg(mut self, value: impl Into<AttrValue>) -> Self {
        self.attrs.push(Attr {
            key: None,
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// `ns.Name` or `Name`.
    pub fn display_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// A constructor argument; `key` is absent for positional arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attr {
    pub key: Option<String>,
    pub value: AttrValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Value(Value),
    Type(TypeRef),
}

impl From<TypeRef> for AttrValue {
    fn from(type_ref: TypeRef) -> Self {
        Self::Type(type_ref)
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

macro_rules! attr_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

attr_value_from!(bool, i32, i64, u64, f64, &str, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDeclKind {
    Struct,
    Union,
}

impl TypeDeclKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Union => "union",
        }
    }
}

/// A struct or union definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub kind: TypeDeclKind,
    pub name: String,
    /// `extends` target.
    pub parent: Option<TypeRef>,
    /// Names listed after `coverage of`.
    pub coverage: Vec<String>,
    pub doc: Option<String>,
    pub fields: Vec<FieldDecl>,
    pub examples: Vec<ExampleDecl>,
    pub span: Span,
}

/// A field of a struct or a member of a union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldDecl {
    Value(ValueFieldDecl),
    Symbol(SymbolDecl),
}

impl FieldDecl {
    pub fn name(&self) -> &str {
        match self {
            Self::Value(field) => &field.name,
            Self::Symbol(symbol) => &symbol.name,
        }
    }

    pub const fn span(&self) -> Span {
        match self {
            Self::Value(field) => field.span,
            Self::Symbol(symbol) => symbol.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueFieldDecl {
    pub name: String,
    pub type_ref: TypeRef,
    /// Declared with a trailing `?` on the field; makes the field nullable.
    pub optional: bool,
    pub deprecated: bool,
    pub default: Option<Value>,
    pub doc: Option<String>,
    pub span: Span,
}

/// A tag-only union member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDecl {
    pub name: String,
    pub catch_all: bool,
    pub doc: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleDecl {
    pub label: String,
    pub doc: Option<String>,
    pub value: Value,
    pub span: Span,
}

/// `route get_metadata:2 (Arg, Result, Error) deprecated by get_metadata_v3`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDecl {
    pub name: String,
    pub version: u32,
    pub doc: Option<String>,
    pub arg: TypeRef,
    pub result: TypeRef,
    pub error: TypeRef,
    pub attrs: BTreeMap<String, Value>,
    pub deprecated: Option<DeprecationDecl>,
    pub span: Span,
}

impl RouteDecl {
    /// A version 1 route with no attributes.
    pub fn new(name: impl Into<String>, arg: TypeRef, result: TypeRef, error: TypeRef) -> Self {
        Self {
            name: name.into(),
            version: 1,
            doc: None,
            arg,
            result,
            error,
            attrs: BTreeMap::new(),
            deprecated: None,
            span: Span::default(),
        }
    }

    #[must_use]
    pub const fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn deprecated_by(mut self, by: Option<RouteRef>) -> Self {
        self.deprecated = Some(DeprecationDecl { by });
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub const fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationDecl {
    /// Replacement route, if one was named.
    pub by: Option<RouteRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteRef {
    pub name: String,
    pub version: u32,
}

impl RouteRef {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_display_name() {
        assert_eq!(TypeRef::named("Account").display_name(), "Account");
        assert_eq!(
            TypeRef::qualified("users", "Account").display_name(),
            "users.Account"
        );
    }

    #[test]
    fn test_type_ref_attrs() {
        let type_ref = TypeRef::named("List")
            .arg(TypeRef::named("String"))
            .attr("max_items", 10)
            .nullable();
        assert!(type_ref.nullable);
        assert_eq!(type_ref.attrs.len(), 2);
        assert_eq!(type_ref.attrs[0].key, None);
        assert!(matches!(type_ref.attrs[0].value, AttrValue::Type(_)));
        assert_eq!(type_ref.attrs[1].key.as_deref(), Some("max_items"));
        assert_eq!(type_ref.attrs[1].value, AttrValue::Value(Value::Integer(10)));
    }

    #[test]
    fn test_source_file_namespace() {
        let file = SourceFile::new(
            "files.basalt",
            vec![Declaration::Namespace(NamespaceDecl {
                name: "files".to_string(),
                doc: None,
                span: Span::default(),
            })],
        );
        assert_eq!(file.namespace().map(|ns| ns.name.as_str()), Some("files"));
        assert!(SourceFile::new("empty.basalt", vec![]).namespace().is_none());
    }
}
