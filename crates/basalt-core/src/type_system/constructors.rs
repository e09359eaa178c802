//! The table of primitive type constructors every namespace starts from.
//!
//! A constructor turns the argument list of a reference such as
//! `String(min_length=1)` or `List(Account, max_items=10)` into a
//! [`DataType`]. Parameters are validated here, before any value exists.

use super::{
    DataType, FloatType, IntegerType, ListType, Pattern, StringType, TimestampType, TypeKind,
    Width,
};
use crate::{ParameterError, Value};
use std::collections::HashMap;

/// An argument passed to a type constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeArg {
    Value(Value),
    Type(DataType),
}

impl TypeArg {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Value(value) => value.kind_name(),
            Self::Type(_) => "type",
        }
    }
}

/// Arguments bound to parameter names.
struct BoundArgs {
    type_name: &'static str,
    args: HashMap<&'static str, TypeArg>,
}

impl BoundArgs {
    fn value(&self, param: &str) -> Result<Option<&Value>, ParameterError> {
        match self.args.get(param) {
            None => Ok(None),
            Some(TypeArg::Value(value)) => Ok(Some(value)),
            Some(TypeArg::Type(_)) => Err(ParameterError::new(format!(
                "{param} of {} must be a value, not a type",
                self.type_name
            ))),
        }
    }

    fn integer(&self, param: &str) -> Result<Option<i128>, ParameterError> {
        match self.value(param)? {
            None => Ok(None),
            Some(Value::Integer(n)) => Ok(Some(*n)),
            Some(other) => Err(self.wrong_kind(param, "an integer", other.kind_name())),
        }
    }

    fn count(&self, param: &str) -> Result<Option<u64>, ParameterError> {
        match self.integer(param)? {
            None => Ok(None),
            Some(n) => u64::try_from(n).map(Some).map_err(|_| {
                ParameterError::new(format!(
                    "{param} of {} must not be negative, got {n}",
                    self.type_name
                ))
            }),
        }
    }

    fn float(&self, param: &str) -> Result<Option<f64>, ParameterError> {
        match self.value(param)? {
            None => Ok(None),
            Some(Value::Float(x)) => Ok(Some(*x)),
            Some(Value::Integer(n)) => Ok(Some(*n as f64)),
            Some(other) => Err(self.wrong_kind(param, "a number", other.kind_name())),
        }
    }

    fn string(&self, param: &str) -> Result<Option<&str>, ParameterError> {
        match self.value(param)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.wrong_kind(param, "a string", other.kind_name())),
        }
    }

    fn data_type(&self, param: &str) -> Result<Option<&DataType>, ParameterError> {
        match self.args.get(param) {
            None => Ok(None),
            Some(TypeArg::Type(data_type)) => Ok(Some(data_type)),
            Some(other) => Err(self.wrong_kind(param, "a type", other.kind_name())),
        }
    }

    fn required<T>(&self, param: &str, value: Option<T>) -> Result<T, ParameterError> {
        value.ok_or_else(|| {
            ParameterError::new(format!(
                "missing required parameter {param} of {}",
                self.type_name
            ))
        })
    }

    fn wrong_kind(&self, param: &str, expected: &str, found: &str) -> ParameterError {
        ParameterError::new(format!(
            "{param} of {} must be {expected}, got {found}",
            self.type_name
        ))
    }
}

type BuildFn = fn(&BoundArgs) -> Result<TypeKind, ParameterError>;

/// A named, parameterizable primitive type.
#[derive(Debug)]
pub struct TypeConstructor {
    pub name: &'static str,
    /// Parameter names; positional arguments bind in this order.
    pub params: &'static [&'static str],
    build: BuildFn,
}

impl TypeConstructor {
    /// Instantiates the type with `(name, argument)` pairs; `None` names are positional.
    ///
    /// # Errors
    /// Returns a `ParameterError` for unknown, duplicate, surplus or
    /// ill-typed arguments and for parameter values the type rejects.
    pub fn instantiate(
        &self,
        args: Vec<(Option<String>, TypeArg)>,
    ) -> Result<DataType, ParameterError> {
        let mut bound = BoundArgs {
            type_name: self.name,
            args: HashMap::new(),
        };
        let mut position = 0;
        for (key, arg) in args {
            let param = match key {
                Some(key) => *self.params.iter().find(|p| **p == key).ok_or_else(|| {
                    ParameterError::new(format!("unknown parameter {key} for {}", self.name))
                })?,
                None => {
                    let param = self.params.get(position).ok_or_else(|| {
                        ParameterError::new(format!(
                            "{} takes at most {} positional argument(s)",
                            self.name,
                            self.params.len()
                        ))
                    })?;
                    position += 1;
                    *param
                }
            };
            if bound.args.insert(param, arg).is_some() {
                return Err(ParameterError::new(format!(
                    "parameter {param} of {} given more than once",
                    self.name
                )));
            }
        }
        (self.build)(&bound).map(DataType::new)
    }
}

fn build_boolean(_: &BoundArgs) -> Result<TypeKind, ParameterError> {
    Ok(TypeKind::Boolean)
}

fn build_bytes(_: &BoundArgs) -> Result<TypeKind, ParameterError> {
    Ok(TypeKind::Binary)
}

fn build_void(_: &BoundArgs) -> Result<TypeKind, ParameterError> {
    Ok(TypeKind::Void)
}

fn build_any(_: &BoundArgs) -> Result<TypeKind, ParameterError> {
    Ok(TypeKind::Any)
}

fn build_integer(args: &BoundArgs, width: Width, signed: bool) -> Result<TypeKind, ParameterError> {
    IntegerType::new(
        width,
        signed,
        args.integer("min_value")?,
        args.integer("max_value")?,
    )
    .map(TypeKind::Integer)
}

fn build_int32(args: &BoundArgs) -> Result<TypeKind, ParameterError> {
    build_integer(args, Width::Bits32, true)
}

fn build_int64(args: &BoundArgs) -> Result<TypeKind, ParameterError> {
    build_integer(args, Width::Bits64, true)
}

fn build_uint32(args: &BoundArgs) -> Result<TypeKind, ParameterError> {
    build_integer(args, Width::Bits32, false)
}

fn build_uint64(args: &BoundArgs) -> Result<TypeKind, ParameterError> {
    build_integer(args, Width::Bits64, false)
}

fn build_float(args: &BoundArgs, width: Width) -> Result<TypeKind, ParameterError> {
    FloatType::new(width, args.float("min_value")?, args.float("max_value")?).map(TypeKind::Float)
}

fn build_float32(args: &BoundArgs) -> Result<TypeKind, ParameterError> {
    build_float(args, Width::Bits32)
}

fn build_float64(args: &BoundArgs) -> Result<TypeKind, ParameterError> {
    build_float(args, Width::Bits64)
}

fn build_string(args: &BoundArgs) -> Result<TypeKind, ParameterError> {
    let pattern = args.string("pattern")?.map(Pattern::new).transpose()?;
    StringType::new(args.count("min_length")?, args.count("max_length")?, pattern)
        .map(TypeKind::String)
}

fn build_timestamp(args: &BoundArgs) -> Result<TypeKind, ParameterError> {
    let format = args.required("format", args.string("format")?)?;
    TimestampType::new(format).map(TypeKind::Timestamp)
}

fn build_list(args: &BoundArgs) -> Result<TypeKind, ParameterError> {
    let item_type = args.required("data_type", args.data_type("data_type")?)?;
    ListType::new(
        item_type.clone(),
        args.count("min_items")?,
        args.count("max_items")?,
    )
    .map(TypeKind::List)
}

const INTEGER_PARAMS: &[&str] = &["min_value", "max_value"];

static STANDARD_CONSTRUCTORS: [TypeConstructor; 13] = [
    TypeConstructor {
        name: "Boolean",
        params: &[],
        build: build_boolean,
    },
    TypeConstructor {
        name: "Bytes",
        params: &[],
        build: build_bytes,
    },
    TypeConstructor {
        name: "Int32",
        params: INTEGER_PARAMS,
        build: build_int32,
    },
    TypeConstructor {
        name: "Int64",
        params: INTEGER_PARAMS,
        build: build_int64,
    },
    TypeConstructor {
        name: "UInt32",
        params: INTEGER_PARAMS,
        build: build_uint32,
    },
    TypeConstructor {
        name: "UInt64",
        params: INTEGER_PARAMS,
        build: build_uint64,
    },
    TypeConstructor {
        name: "Float32",
        params: INTEGER_PARAMS,
        build: build_float32,
    },
    TypeConstructor {
        name: "Float64",
        params: INTEGER_PARAMS,
        build: build_float64,
    },
    TypeConstructor {
        name: "String",
        params: &["min_length", "max_length", "pattern"],
        build: build_string,
    },
    TypeConstructor {
        name: "Timestamp",
        params: &["format"],
        build: build_timestamp,
    },
    TypeConstructor {
        name: "List",
        params: &["data_type", "min_items", "max_items"],
        build: build_list,
    },
    TypeConstructor {
        name: "Void",
        params: &[],
        build: build_void,
    },
    TypeConstructor {
        name: "Any",
        params: &[],
        build: build_any,
    },
];

/// The global table of primitive constructors.
///
/// The table is static data; every namespace's environment is seeded from
/// it by reference.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveTable {
    constructors: &'static [TypeConstructor],
}

impl PrimitiveTable {
    pub fn standard() -> Self {
        Self {
            constructors: &STANDARD_CONSTRUCTORS,
        }
    }

    pub fn get(&self, name: &str) -> Option<&'static TypeConstructor> {
        self.constructors.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static TypeConstructor> {
        self.constructors.iter()
    }
}

impl Default for PrimitiveTable {
    fn default() -> Self {
        Self::standard()
    }
}
