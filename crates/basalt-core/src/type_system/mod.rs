//! Type system for Basalt specifications.
//!
//! This module provides:
//! - Primitive data types with construction-time parameter validation
//! - The static table of primitive type constructors
//! - User-defined structs, unions and aliases stored in a [`TypeRegistry`]
//! - Value checking against resolved types
//! - Example registration and materialization
mod constructors;
mod data_type;
mod examples;
mod registry;
mod type_id;
mod user_types;

pub use constructors::{PrimitiveTable, TypeArg, TypeConstructor};
pub use data_type::{
    DataType, FloatType, IntegerType, ListType, Pattern, StringType, TimestampType, TypeKind,
    Width,
};
pub use examples::DEFAULT_EXAMPLE_LABEL;
pub use registry::{CompositeTarget, TypeRegistry};
pub use type_id::{AliasId, TypeId};
pub use user_types::{
    Alias, Example, Struct, StructField, SymbolField, Union, UnionField, UnionMember, UserType,
};
