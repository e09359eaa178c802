//! Per-namespace symbol table used during resolution.

use basalt_core::type_system::{DataType, PrimitiveTable, TypeConstructor};
use basalt_core::{Error, Result, Span};
use std::collections::HashMap;
use tracing::trace;

/// What a name denotes while a namespace is being resolved.
#[derive(Debug, Clone)]
pub enum EnvEntry {
    /// A primitive that still takes attributes, such as `String` or `List`.
    Constructor(&'static TypeConstructor),
    /// An already instantiated type: a struct, a union or an alias.
    Value(DataType),
}

/// Symbol table for one namespace.
///
/// Starts out as a copy of the primitive constructor table and grows as the
/// namespace's declarations are resolved. It is dropped once the namespace
/// is finished; only the namespace's own tables outlive it.
#[derive(Debug, Clone)]
pub struct Environment {
    namespace: String,
    entries: HashMap<String, EnvEntry>,
}

impl Environment {
    /// Creates an environment seeded with every constructor of `primitives`.
    pub fn new(namespace: impl Into<String>, primitives: &PrimitiveTable) -> Self {
        let entries = primitives
            .iter()
            .map(|constructor| {
                (
                    constructor.name.to_string(),
                    EnvEntry::Constructor(constructor),
                )
            })
            .collect();
        Self {
            namespace: namespace.into(),
            entries,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Defines a new symbol.
    ///
    /// # Errors
    /// Returns `InvalidSpec` if the name is already taken, including by a
    /// primitive.
    pub fn define(&mut self, name: &str, entry: EnvEntry, span: Span) -> Result<()> {
        if self.entries.contains_key(name) {
            return Err(Error::invalid_spec(
                format!(
                    "Symbol '{name}' is already defined in namespace '{}'",
                    self.namespace
                ),
                span,
            ));
        }
        trace!(namespace = %self.namespace, symbol = name, "defined symbol");
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    /// Looks up a symbol.
    pub fn lookup(&self, name: &str) -> Option<&EnvEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}
