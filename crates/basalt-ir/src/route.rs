//! Routes: the callable endpoints of a namespace.

use basalt_core::type_system::DataType;
use basalt_core::{Span, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies a route within its namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey {
    pub name: String,
    pub version: u32,
}

impl RouteKey {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version == 1 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.name, self.version)
        }
    }
}

/// Deprecation state of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    /// The route that replaces this one, in the same namespace.
    pub by: Option<RouteKey>,
}

/// A resolved route
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRoute {
    pub name: String,
    pub version: u32,
    pub doc: Option<String>,
    pub arg_type: DataType,
    pub result_type: DataType,
    pub error_type: DataType,
    pub deprecated: Option<Deprecation>,
    pub attrs: BTreeMap<String, Value>,
    pub span: Span,
}

impl ApiRoute {
    /// Creates a version 1 route
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        arg_type: DataType,
        result_type: DataType,
        error_type: DataType,
    ) -> Self {
        Self {
            name: name.into(),
            version: 1,
            doc: None,
            arg_type,
            result_type,
            error_type,
            deprecated: None,
            attrs: BTreeMap::new(),
            span: Span::default(),
        }
    }

    #[must_use]
    pub fn key(&self) -> RouteKey {
        RouteKey::new(self.name.clone(), self.version)
    }

    #[must_use]
    pub const fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }

    /// The replacement route, if deprecation named one.
    #[must_use]
    pub fn deprecated_by(&self) -> Option<&RouteKey> {
        self.deprecated.as_ref().and_then(|d| d.by.as_ref())
    }

    /// The argument, result and error types, in that order.
    pub fn io_types(&self) -> [&DataType; 3] {
        [&self.arg_type, &self.result_type, &self.error_type]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_key_display() {
        assert_eq!(RouteKey::new("list_folder", 1).to_string(), "list_folder");
        assert_eq!(RouteKey::new("list_folder", 2).to_string(), "list_folder:2");
    }

    #[test]
    fn test_deprecated_by() {
        let mut route = ApiRoute::new(
            "list_folder",
            DataType::void(),
            DataType::void(),
            DataType::void(),
        );
        assert!(!route.is_deprecated());
        route.deprecated = Some(Deprecation {
            by: Some(RouteKey::new("list_folder", 2)),
        });
        assert!(route.is_deprecated());
        assert_eq!(route.deprecated_by(), Some(&RouteKey::new("list_folder", 2)));
    }
}
