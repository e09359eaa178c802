//! Core types for the Basalt API description compiler.
//!
//! This crate provides source spans, the error taxonomy, example/default
//! payload values and the type system shared by every resolution stage.
//! It has no knowledge of declaration records or namespaces; those live in
//! `basalt-ast` and `basalt-ir`.

pub mod error;
pub mod span;
pub mod type_system;
pub mod value;

pub use error::{Error, ParameterError, Result, ValidationError};
pub use span::{Location, Span};
pub use value::{TagRef, Value};
