//! Error taxonomy for the Basalt compiler core.
//!
//! Three categories exist. [`ParameterError`] is raised when a type
//! constructor receives inconsistent parameters, independently of any value.
//! [`ValidationError`] is raised when a concrete value (an example or a
//! field default) fails a type's `check`. [`Error::InvalidSpec`] covers every
//! semantic error in the declarations themselves. None of them is
//! recoverable: resolution stops at the first one.

use crate::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// A type constructor was given parameters that contradict each other or
/// the type's intrinsic limits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParameterError {
    pub message: String,
}

impl ParameterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A concrete value failed a `DataType::check`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Prefixes the message with the location of the offending value,
    /// e.g. a field name or list index.
    #[must_use]
    pub fn within(self, location: impl std::fmt::Display) -> Self {
        Self {
            message: format!("{location}: {}", self.message),
        }
    }
}

/// Main error type for the Basalt compiler core.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("{context}: {source}")]
    #[diagnostic(code(basalt::parameter))]
    Parameter {
        context: String,
        source: ParameterError,
        #[label("here")]
        span: Span,
    },

    #[error("{context}: {source}")]
    #[diagnostic(code(basalt::validation))]
    Validation {
        context: String,
        source: ValidationError,
        #[label("here")]
        span: Span,
    },

    #[error("{message}")]
    #[diagnostic(code(basalt::invalid_spec))]
    InvalidSpec {
        message: String,
        #[label("here")]
        span: Span,
    },
}

impl Error {
    pub fn invalid_spec(message: impl Into<String>, span: Span) -> Self {
        Self::InvalidSpec {
            message: message.into(),
            span,
        }
    }

    pub fn parameter(context: impl Into<String>, source: ParameterError, span: Span) -> Self {
        Self::Parameter {
            context: context.into(),
            source,
            span,
        }
    }

    pub fn validation(context: impl Into<String>, source: ValidationError, span: Span) -> Self {
        Self::Validation {
            context: context.into(),
            source,
            span,
        }
    }

    /// Returns true for semantic errors in the declarations.
    pub const fn is_invalid_spec(&self) -> bool {
        matches!(self, Self::InvalidSpec { .. })
    }

    /// Returns the span of the declaration the error was raised for.
    pub const fn span(&self) -> Span {
        match self {
            Self::Parameter { span, .. }
            | Self::Validation { span, .. }
            | Self::InvalidSpec { span, .. } => *span,
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start.offset..span.end.offset)
    }
}

/// Result type alias using the Basalt Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_spec_display() {
        let err = Error::invalid_spec("Symbol 'Foo' is undefined", Span::point(3, 7));
        assert_eq!(err.to_string(), "Symbol 'Foo' is undefined");
        assert!(err.is_invalid_spec());
        assert_eq!(err.span(), Span::point(3, 7));
    }

    #[test]
    fn test_parameter_error_carries_context() {
        let err = Error::parameter(
            "alias 'Rev' in namespace 'files'",
            ParameterError::new("max_length must be at least min_length"),
            Span::default(),
        );
        assert_eq!(
            err.to_string(),
            "alias 'Rev' in namespace 'files': max_length must be at least min_length"
        );
        assert!(!err.is_invalid_spec());
    }

    #[test]
    fn test_validation_error_within() {
        let err = ValidationError::new("expected integer, got string").within("field 'quota'");
        assert_eq!(err.message, "field 'quota': expected integer, got string");
    }
}
