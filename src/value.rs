//! Typed argument values and the textual-token coercion rules.

use crate::bytes;
use crate::error::ShellError;
use anyhow::{Result, bail};
use std::fmt;

/// A typed value produced by coercing a command-line token, passed to and
/// returned from executor operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value; the default for optional parameters declared
    /// without one, and the return of operations that produce nothing.
    Unit,
    Integer(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Bytes(Vec<u8>),
    /// Raw tokens captured by a trailing variadic parameter, in order.
    List(Vec<String>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "Unit",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Bool(_) => "Bool",
            Value::Str(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::List(_) => "StringList",
        }
    }

    pub fn as_integer(&self) -> Result<i64> {
        match self {
            Value::Integer(value) => Ok(*value),
            other => bail!("expected Integer, found {}", other.type_name()),
        }
    }

    pub fn as_float(&self) -> Result<f64> {
        match self {
            Value::Float(value) => Ok(*value),
            other => bail!("expected Float, found {}", other.type_name()),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(value) => Ok(*value),
            other => bail!("expected Bool, found {}", other.type_name()),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Str(value) => Ok(value),
            other => bail!("expected String, found {}", other.type_name()),
        }
    }

    /// String parameters declared optional without a default arrive as
    /// [`Value::Unit`]; this maps that case to `None`.
    pub fn as_opt_str(&self) -> Result<Option<&str>> {
        match self {
            Value::Unit => Ok(None),
            Value::Str(value) => Ok(Some(value)),
            other => bail!("expected String or null, found {}", other.type_name()),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            Value::Bytes(value) => Ok(value),
            other => bail!("expected Bytes, found {}", other.type_name()),
        }
    }

    pub fn as_list(&self) -> Result<&[String]> {
        match self {
            Value::List(value) => Ok(value),
            other => bail!("expected StringList, found {}", other.type_name()),
        }
    }
}

/// Declared type of a single operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamType {
    Integer,
    Float,
    Bool,
    String,
    Bytes,
    /// Closed set of accepted spellings; tokens match case-insensitively and
    /// coerce to the canonical variant name.
    Enum(Vec<String>),
    /// Trailing variadic parameter capturing every remaining token.
    StringList,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Integer => write!(f, "Integer"),
            ParamType::Float => write!(f, "Float"),
            ParamType::Bool => write!(f, "Bool"),
            ParamType::String => write!(f, "String"),
            ParamType::Bytes => write!(f, "Bytes"),
            ParamType::Enum(variants) => write!(f, "Enum({})", variants.join("|")),
            ParamType::StringList => write!(f, "StringList"),
        }
    }
}

/// Declaration of one operation parameter: display name, type, and whether a
/// token must be supplied for it.
///
/// Optional parameters carry their default here; omitted positions are filled
/// from it without going through the coercer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: ParamType,
    pub required: bool,
    pub default: Option<Value>,
}

impl ParameterSpec {
    pub fn required(name: &str, ty: ParamType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            required: true,
            default: None,
        }
    }

    pub fn optional(name: &str, ty: ParamType, default: Value) -> Self {
        Self {
            name: name.to_string(),
            ty,
            required: false,
            default: Some(default),
        }
    }

    /// Trailing `StringList` parameter. Always satisfiable: zero remaining
    /// tokens bind it to an empty list.
    pub fn variadic(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ParamType::StringList,
            required: false,
            default: None,
        }
    }
}

/// Converts one textual token into a typed value for the given parameter type.
///
/// `StringList` parameters are bound by the argument binder, which hands them
/// every remaining token; coercing a single token to one yields a one-element
/// list.
pub fn coerce(token: &str, ty: &ParamType) -> Result<Value, ShellError> {
    let mismatch = || ShellError::Coercion {
        token: token.to_string(),
        expected: ty.to_string(),
    };

    match ty {
        ParamType::Integer => token
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| mismatch()),
        ParamType::Float => token
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| mismatch()),
        ParamType::Bool => {
            if token.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if token.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(mismatch())
            }
        }
        ParamType::String => Ok(Value::Str(token.to_string())),
        ParamType::Bytes => bytes::from_hex_string(token)
            .map(Value::Bytes)
            .map_err(|_| mismatch()),
        ParamType::Enum(variants) => variants
            .iter()
            .find(|variant| variant.eq_ignore_ascii_case(token))
            .map(|variant| Value::Str(variant.clone()))
            .ok_or_else(mismatch),
        ParamType::StringList => Ok(Value::List(vec![token.to_string()])),
    }
}
