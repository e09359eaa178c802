//! Declaration records for the Basalt API description language.
//!
//! A parser turns each API description file into a [`SourceFile`]: an ordered list of
//! flat [`Declaration`]s. The records carry names and unresolved
//! [`TypeRef`]s only; the semantic crate resolves them into types.

pub mod builder;
pub mod declaration;

pub use builder::{SourceFileBuilder, TypeDeclBuilder};
pub use declaration::{
    AliasDecl, Attr, AttrValue, Declaration, DeprecationDecl, ExampleDecl, FieldDecl,
    ImportDecl, IncludeDecl, NamespaceDecl, RouteDecl, RouteRef, SourceFile, SymbolDecl,
    TypeDecl, TypeDeclKind, TypeRef, ValueFieldDecl,
};
