use super::{AliasId, TypeId, TypeRegistry};
use crate::{ParameterError, ValidationError, Value};
use chrono::format::{self, Item, ParseErrorKind, Parsed, StrftimeItems};
use regex::Regex;

/// Bit width of a numeric primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    Bits32,
    Bits64,
}

/// A bounded signed or unsigned integer.
///
/// Every width/signedness combination is a value of this one struct; the
/// intrinsic range comes from [`IntegerType::intrinsic_range`] and the
/// optional caller bounds may only narrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerType {
    pub width: Width,
    pub signed: bool,
    pub min_value: Option<i128>,
    pub max_value: Option<i128>,
}

impl IntegerType {
    pub fn new(
        width: Width,
        signed: bool,
        min_value: Option<i128>,
        max_value: Option<i128>,
    ) -> Result<Self, ParameterError> {
        let integer = Self {
            width,
            signed,
            min_value,
            max_value,
        };
        let (lo, hi) = integer.intrinsic_range();
        for (param, bound) in [("min_value", min_value), ("max_value", max_value)] {
            if let Some(bound) = bound
                && !(lo..=hi).contains(&bound)
            {
                return Err(ParameterError::new(format!(
                    "{param} {bound} is outside the range of {} ({lo} to {hi})",
                    integer.name()
                )));
            }
        }
        if let (Some(min), Some(max)) = (min_value, max_value)
            && min > max
        {
            return Err(ParameterError::new(format!(
                "min_value {min} is greater than max_value {max}"
            )));
        }
        Ok(integer)
    }

    /// The range representable by this width and signedness.
    pub const fn intrinsic_range(&self) -> (i128, i128) {
        match (self.width, self.signed) {
            (Width::Bits32, true) => (i32::MIN as i128, i32::MAX as i128),
            (Width::Bits64, true) => (i64::MIN as i128, i64::MAX as i128),
            (Width::Bits32, false) => (0, u32::MAX as i128),
            (Width::Bits64, false) => (0, u64::MAX as i128),
        }
    }

    pub const fn name(&self) -> &'static str {
        match (self.width, self.signed) {
            (Width::Bits32, true) => "Int32",
            (Width::Bits64, true) => "Int64",
            (Width::Bits32, false) => "UInt32",
            (Width::Bits64, false) => "UInt64",
        }
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Value::Integer(n) = value else {
            return Err(mismatch("integer", value));
        };
        let (lo, hi) = self.intrinsic_range();
        if *n < lo || *n > hi {
            return Err(ValidationError::new(format!(
                "{n} is not within the range of {} ({lo} to {hi})",
                self.name()
            )));
        }
        if let Some(min) = self.min_value
            && *n < min
        {
            return Err(ValidationError::new(format!("{n} is less than {min}")));
        }
        if let Some(max) = self.max_value
            && *n > max
        {
            return Err(ValidationError::new(format!("{n} is greater than {max}")));
        }
        Ok(())
    }
}

/// A bounded IEEE-754 float.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatType {
    pub width: Width,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl FloatType {
    pub fn new(
        width: Width,
        min_value: Option<f64>,
        max_value: Option<f64>,
    ) -> Result<Self, ParameterError> {
        let float = Self {
            width,
            min_value,
            max_value,
        };
        for (param, bound) in [("min_value", min_value), ("max_value", max_value)] {
            if let Some(bound) = bound
                && !float.representable(bound)
            {
                return Err(ParameterError::new(format!(
                    "{param} {bound} is not representable as {}",
                    float.name()
                )));
            }
        }
        if let (Some(min), Some(max)) = (min_value, max_value)
            && min > max
        {
            return Err(ParameterError::new(format!(
                "min_value {min} is greater than max_value {max}"
            )));
        }
        Ok(float)
    }

    pub const fn name(&self) -> &'static str {
        match self.width {
            Width::Bits32 => "Float32",
            Width::Bits64 => "Float64",
        }
    }

    fn representable(&self, x: f64) -> bool {
        x.is_finite() && (self.width == Width::Bits64 || x.abs() <= f64::from(f32::MAX))
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let x = match value {
            Value::Float(x) => *x,
            // Integer literals are accepted wherever a float is expected.
            Value::Integer(n) => *n as f64,
            other => return Err(mismatch("float", other)),
        };
        if !self.representable(x) {
            return Err(ValidationError::new(format!(
                "{x} is not a finite {} value",
                self.name()
            )));
        }
        if let Some(min) = self.min_value
            && x < min
        {
            return Err(ValidationError::new(format!("{x} is less than {min}")));
        }
        if let Some(max) = self.max_value
            && x > max
        {
            return Err(ValidationError::new(format!("{x} is greater than {max}")));
        }
        Ok(())
    }
}

/// A compiled `String` pattern. Equality compares the source text.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern that must match the whole string.
    pub fn new(source: impl Into<String>) -> Result<Self, ParameterError> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| {
            ParameterError::new(format!("pattern {source:?} is not a valid regex: {e}"))
        })?;
        Ok(Self { source, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, s: &str) -> bool {
        self.regex.is_match(s)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// A unicode string with optional length bounds and pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct StringType {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<Pattern>,
}

impl StringType {
    pub fn new(
        min_length: Option<u64>,
        max_length: Option<u64>,
        pattern: Option<Pattern>,
    ) -> Result<Self, ParameterError> {
        if let (Some(min), Some(max)) = (min_length, max_length)
            && max < min
        {
            return Err(ParameterError::new(format!(
                "max_length {max} must be at least min_length {min}"
            )));
        }
        Ok(Self {
            min_length,
            max_length,
            pattern,
        })
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Value::String(s) = value else {
            return Err(mismatch("string", value));
        };
        let length = s.chars().count() as u64;
        if let Some(min) = self.min_length
            && length < min
        {
            return Err(ValidationError::new(format!(
                "{s:?} has fewer than {min} character(s)"
            )));
        }
        if let Some(max) = self.max_length
            && length > max
        {
            return Err(ValidationError::new(format!(
                "{s:?} has more than {max} character(s)"
            )));
        }
        if let Some(pattern) = &self.pattern
            && !pattern.is_match(s)
        {
            return Err(ValidationError::new(format!(
                "{s:?} did not match pattern {:?}",
                pattern.as_str()
            )));
        }
        Ok(())
    }
}

/// A timestamp encoded as a string in a strftime `format`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampType {
    pub format: String,
}

impl TimestampType {
    pub fn new(format: impl Into<String>) -> Result<Self, ParameterError> {
        let format = format.into();
        if format.is_empty() {
            return Err(ParameterError::new("format must not be empty"));
        }
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(ParameterError::new(format!(
                "format {format:?} is not a valid strftime format"
            )));
        }
        Ok(Self { format })
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Value::String(s) = value else {
            return Err(mismatch("timestamp string", value));
        };
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, s, StrftimeItems::new(&self.format)).map_err(|e| {
            ValidationError::new(format!(
                "{s:?} does not match timestamp format {:?}: {e}",
                self.format
            ))
        })?;
        // Fields are only range-checked while parsing; a format without a
        // full date has nothing more to check.
        match parsed.to_naive_date() {
            Err(e) if e.kind() != ParseErrorKind::NotEnough => Err(ValidationError::new(format!(
                "{s:?} is not a valid date for timestamp format {:?}: {e}",
                self.format
            ))),
            _ => Ok(()),
        }
    }
}

/// A homogeneous list with optional item-count bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ListType {
    pub item_type: Box<DataType>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}

impl ListType {
    pub fn new(
        item_type: DataType,
        min_items: Option<u64>,
        max_items: Option<u64>,
    ) -> Result<Self, ParameterError> {
        if let (Some(min), Some(max)) = (min_items, max_items)
            && max < min
        {
            return Err(ParameterError::new(format!(
                "max_items {max} must be at least min_items {min}"
            )));
        }
        Ok(Self {
            item_type: Box::new(item_type),
            min_items,
            max_items,
        })
    }

    fn check(&self, value: &Value, registry: &TypeRegistry) -> Result<(), ValidationError> {
        let Value::List(items) = value else {
            return Err(mismatch("list", value));
        };
        let count = items.len() as u64;
        if let Some(min) = self.min_items
            && count < min
        {
            return Err(ValidationError::new(format!(
                "list has {count} item(s), fewer than {min}"
            )));
        }
        if let Some(max) = self.max_items
            && count > max
        {
            return Err(ValidationError::new(format!(
                "list has {count} item(s), more than {max}"
            )));
        }
        for (index, item) in items.iter().enumerate() {
            self.item_type
                .check(item, registry)
                .map_err(|e| e.within(format!("item {index}")))?;
        }
        Ok(())
    }
}

/// The shape of a type reference.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Boolean,
    Integer(IntegerType),
    Float(FloatType),
    String(StringType),
    Binary,
    Timestamp(TimestampType),
    List(ListType),
    Void,
    /// Opaque value; accepts anything.
    Any,
    /// Tag-only union member.
    Symbol,
    Struct(TypeId),
    Union(TypeId),
    Alias(AliasId),
}

impl TypeKind {
    /// Name of a primitive kind; `None` for user-defined references.
    pub fn primitive_name(&self) -> Option<&'static str> {
        Some(match self {
            Self::Boolean => "Boolean",
            Self::Integer(integer) => integer.name(),
            Self::Float(float) => float.name(),
            Self::String(_) => "String",
            Self::Binary => "Bytes",
            Self::Timestamp(_) => "Timestamp",
            Self::List(_) => "List",
            Self::Void => "Void",
            Self::Any => "Any",
            Self::Symbol => "Symbol",
            Self::Struct(_) | Self::Union(_) | Self::Alias(_) => return None,
        })
    }

    const fn accepts_null(&self) -> bool {
        matches!(self, Self::Void | Self::Symbol | Self::Any)
    }
}

/// A reference to a type, carrying its own nullability.
///
/// Nullability belongs to the reference, never to the definition: marking
/// a reference nullable produces a copy via [`DataType::with_nullable`] and
/// leaves the referenced struct, union or alias untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct DataType {
    pub kind: TypeKind,
    pub nullable: bool,
}

impl DataType {
    pub const fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// Returns a copy of this reference with the given nullability.
    #[must_use]
    pub fn with_nullable(&self, nullable: bool) -> Self {
        Self {
            kind: self.kind.clone(),
            nullable,
        }
    }

    pub const fn boolean() -> Self {
        Self::new(TypeKind::Boolean)
    }

    pub const fn void() -> Self {
        Self::new(TypeKind::Void)
    }

    pub const fn symbol() -> Self {
        Self::new(TypeKind::Symbol)
    }

    pub const fn struct_ref(id: TypeId) -> Self {
        Self::new(TypeKind::Struct(id))
    }

    pub const fn union_ref(id: TypeId) -> Self {
        Self::new(TypeKind::Union(id))
    }

    pub const fn alias_ref(id: AliasId) -> Self {
        Self::new(TypeKind::Alias(id))
    }

    /// The struct or union this reference points at, if any.
    pub const fn user_type_id(&self) -> Option<TypeId> {
        match self.kind {
            TypeKind::Struct(id) | TypeKind::Union(id) => Some(id),
            _ => None,
        }
    }

    pub const fn alias_id(&self) -> Option<AliasId> {
        match self.kind {
            TypeKind::Alias(id) => Some(id),
            _ => None,
        }
    }

    /// Checks that `value` is acceptable for this type.
    ///
    /// User-defined kinds are looked up in `registry`; primitives ignore it.
    pub fn check(&self, value: &Value, registry: &TypeRegistry) -> Result<(), ValidationError> {
        if value.is_null() && (self.nullable || self.kind.accepts_null()) {
            return Ok(());
        }
        match &self.kind {
            // The alias target may itself be nullable.
            TypeKind::Alias(id) => registry.alias(*id).data_type.check(value, registry),
            _ if value.is_null() => Err(ValidationError::new(format!(
                "null is not a valid value for non-nullable {}",
                registry.type_name(self)
            ))),
            TypeKind::Boolean => match value {
                Value::Bool(_) => Ok(()),
                other => Err(mismatch("boolean", other)),
            },
            TypeKind::Integer(integer) => integer.check(value),
            TypeKind::Float(float) => float.check(value),
            TypeKind::String(string) => string.check(value),
            TypeKind::Binary => match value {
                Value::String(_) => Ok(()),
                other => Err(mismatch("bytes", other)),
            },
            TypeKind::Timestamp(timestamp) => timestamp.check(value),
            TypeKind::List(list) => list.check(value, registry),
            TypeKind::Void => Err(ValidationError::new(format!(
                "void carries no value, got {}",
                value.kind_name()
            ))),
            TypeKind::Any => Ok(()),
            TypeKind::Symbol => Err(ValidationError::new(format!(
                "symbol carries no value, got {}",
                value.kind_name()
            ))),
            TypeKind::Struct(id) => registry.check_struct(*id, value),
            TypeKind::Union(id) => registry.check_union(*id, value),
        }
    }
}

pub(crate) fn mismatch(expected: &str, found: &Value) -> ValidationError {
    ValidationError::new(format!("expected {expected}, got {}", found.kind_name()))
}
