//! Literal values carried by declarations: field defaults, route attributes,
//! constructor arguments and example payloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A reference to a union member by tag, e.g. `Role.owner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagRef {
    pub union_name: String,
    pub tag: String,
}

impl TagRef {
    pub fn new(union_name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            union_name: union_name.into(),
            tag: tag.into(),
        }
    }
}

/// A literal value.
///
/// Integers are stored as `i128` so that the full range of both `Int64`
/// and `UInt64` fits without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i128),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
    TagRef(TagRef),
}

impl Value {
    /// Builds an object value from key/value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn tag(union_name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::TagRef(TagRef::new(union_name, tag))
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in validation messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
            Self::TagRef(_) => "tag",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                let items = items
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{items}]")
            }
            Self::Object(map) => {
                let entries = map
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{entries}}}")
            }
            Self::TagRef(tag) => write!(f, "{}.{}", tag.union_name, tag.tag),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<TagRef> for Value {
    fn from(value: TagRef) -> Self {
        Self::TagRef(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_builder() {
        let value = Value::object([("quota", Value::from(64000)), ("name", "bob".into())]);
        let map = value.as_object().unwrap();
        assert_eq!(map.get("quota"), Some(&Value::Integer(64000)));
        assert_eq!(map.get("name").and_then(Value::as_str), Some("bob"));
    }

    #[test]
    fn test_display() {
        let value = Value::object([
            ("tags", Value::from(vec!["a", "b"])),
            ("role", Value::tag("Role", "owner")),
        ]);
        assert_eq!(value.to_string(), r#"{role: Role.owner, tags: ["a", "b"]}"#);
    }

    #[test]
    fn test_u64_max_fits() {
        assert_eq!(Value::from(u64::MAX), Value::Integer(18_446_744_073_709_551_615));
    }
}
