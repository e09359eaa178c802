use super::{DataType, TypeId};
use crate::{Error, Result, Span, Value};

/// A field of a struct.
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: String,
    pub data_type: DataType,
    pub doc: Option<String>,
    pub deprecated: bool,
    pub default: Option<Value>,
    pub span: Span,
}

impl StructField {
    /// Creates a struct field.
    ///
    /// # Errors
    /// Returns `InvalidSpec` when a nullable field is given a non-null
    /// default. A `null` default on a nullable field is accepted.
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        default: Option<Value>,
        span: Span,
    ) -> Result<Self> {
        let name = name.into();
        if data_type.nullable && default.as_ref().is_some_and(|d| !d.is_null()) {
            return Err(Error::invalid_spec(
                format!("Field '{name}' is nullable and cannot have a non-null default"),
                span,
            ));
        }
        Ok(Self {
            name,
            data_type,
            doc: None,
            deprecated: false,
            default,
            span,
        })
    }

    #[must_use]
    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    #[must_use]
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Optional fields may be absent from a value: they are nullable or defaulted.
    pub fn is_optional(&self) -> bool {
        self.data_type.nullable || self.default.is_some()
    }
}

/// A union member carrying a value.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionField {
    pub name: String,
    pub data_type: DataType,
    pub doc: Option<String>,
    pub span: Span,
}

/// A tag-only union member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolField {
    pub name: String,
    pub doc: Option<String>,
    /// Absorbs tags unknown to older readers of the union.
    pub catch_all: bool,
    pub span: Span,
}

/// A member of a union: either a tagged value or a bare symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum UnionMember {
    Field(UnionField),
    Symbol(SymbolField),
}

impl UnionMember {
    pub fn name(&self) -> &str {
        match self {
            Self::Field(field) => &field.name,
            Self::Symbol(symbol) => &symbol.name,
        }
    }

    pub fn doc(&self) -> Option<&str> {
        match self {
            Self::Field(field) => field.doc.as_deref(),
            Self::Symbol(symbol) => symbol.doc.as_deref(),
        }
    }

    /// The member's type; symbols report [`DataType::symbol`].
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Field(field) => field.data_type.clone(),
            Self::Symbol(_) => DataType::symbol(),
        }
    }

    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }
}

/// A labelled example payload attached to a struct or union.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub label: String,
    pub doc: Option<String>,
    pub value: Value,
}

impl Example {
    pub fn new(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: label.into(),
            doc: None,
            value,
        }
    }
}

/// A user-defined struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    pub name: String,
    pub namespace: String,
    pub doc: Option<String>,
    /// Own fields in declaration order.
    pub fields: Vec<StructField>,
    pub parent: Option<TypeId>,
    /// Enumerated subtypes, filled in after the whole namespace is declared.
    pub coverage: Vec<TypeId>,
    pub examples: Vec<Example>,
    /// False while the struct is only forward-declared.
    pub defined: bool,
    pub span: Span,
}

impl Struct {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            doc: None,
            fields: Vec::new(),
            parent: None,
            coverage: Vec::new(),
            examples: Vec::new(),
            defined: false,
            span,
        }
    }

    pub fn example(&self, label: &str) -> Option<&Example> {
        self.examples.iter().find(|e| e.label == label)
    }
}

/// A user-defined tagged union.
#[derive(Debug, Clone, PartialEq)]
pub struct Union {
    pub name: String,
    pub namespace: String,
    pub doc: Option<String>,
    /// Own members in declaration order.
    pub fields: Vec<UnionMember>,
    /// The union this one extends.
    pub parent: Option<TypeId>,
    pub catch_all: Option<SymbolField>,
    pub examples: Vec<Example>,
    pub defined: bool,
    pub span: Span,
}

impl Union {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            doc: None,
            fields: Vec::new(),
            parent: None,
            catch_all: None,
            examples: Vec::new(),
            defined: false,
            span,
        }
    }

    pub fn example(&self, label: &str) -> Option<&Example> {
        self.examples.iter().find(|e| e.label == label)
    }
}

/// A named reference to another type.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub name: String,
    pub namespace: String,
    pub doc: Option<String>,
    /// The referenced type; may itself be an alias reference.
    pub data_type: DataType,
    pub span: Span,
}

impl Alias {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        data_type: DataType,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            doc: None,
            data_type,
            span,
        }
    }
}

/// A struct or union stored in the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum UserType {
    Struct(Struct),
    Union(Union),
}

impl UserType {
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(s) => &s.name,
            Self::Union(u) => &u.name,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Self::Struct(s) => &s.namespace,
            Self::Union(u) => &u.namespace,
        }
    }

    pub fn doc(&self) -> Option<&str> {
        match self {
            Self::Struct(s) => s.doc.as_deref(),
            Self::Union(u) => u.doc.as_deref(),
        }
    }

    /// The struct's parent or the union's extended union.
    pub const fn parent(&self) -> Option<TypeId> {
        match self {
            Self::Struct(s) => s.parent,
            Self::Union(u) => u.parent,
        }
    }

    pub const fn is_defined(&self) -> bool {
        match self {
            Self::Struct(s) => s.defined,
            Self::Union(u) => u.defined,
        }
    }

    pub const fn span(&self) -> Span {
        match self {
            Self::Struct(s) => s.span,
            Self::Union(u) => u.span,
        }
    }

    pub fn examples(&self) -> &[Example] {
        match self {
            Self::Struct(s) => &s.examples,
            Self::Union(u) => &u.examples,
        }
    }

    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Struct(_) => "struct",
            Self::Union(_) => "union",
        }
    }
}
