//! Semantic validation of parsed queries against a caller-supplied schema.
//!
//! The schema is reached through two resolver traits: [`PropertyResolver`]
//! maps a property path to its [`Type`], and [`FunctionResolver`] maps a
//! function name plus argument types to a result type. [`QueryValidator`]
//! walks the filter tree, infers the type of every node and checks the other
//! options' property references.
//!
//! # Example
//!
//! ```
//! use odata_query::parser::parse_query_parts;
//! use odata_query::semantic::{InMemorySchema, QueryValidator, Type};
//!
//! let schema = InMemorySchema::new()
//!     .with_property("user/id", Type::Number)
//!     .with_standard_functions();
//! let query = parse_query_parts("user/id eq 7", "user/id desc", "", "", "", "").unwrap();
//!
//! let validator = QueryValidator::new(&schema, &schema);
//! assert!(validator.validate(&query).is_ok());
//! ```

pub mod functions;
pub mod schema;
pub mod validator;

use crate::ast::PropertyPath;
use std::fmt;

pub use functions::{FunctionSignature, resolve_standard_signatures, standard_function_names};
pub use schema::InMemorySchema;
pub use validator::{QueryValidator, ValidationConfig};

/// Semantic type of a filter sub-expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Number,
    String,
    /// Result of a logical operator or comparison.
    Boolean,
    /// A boolean literal or a boolean-typed property.
    ///
    /// Kept apart from [`Type::Boolean`] because the two are represented
    /// differently by query backends; they only compare among themselves.
    BooleanLiteral,
    Null,
}

impl Type {
    pub fn name(self) -> &'static str {
        match self {
            Type::Number => "number",
            Type::String => "string",
            Type::Boolean => "boolean",
            Type::BooleanLiteral => "boolean_literal",
            Type::Null => "null",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property path could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyError {
    pub message: String,
}

impl PropertyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The standard error for a path the schema does not know.
    pub fn unknown(path: &PropertyPath) -> Self {
        Self::new(format!("Unknown property '{path}'"))
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PropertyError {}

/// A function call could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionError {
    pub message: String,
}

impl FunctionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The standard error for a function the schema does not know.
    pub fn unknown(name: &str) -> Self {
        Self::new(format!("Unknown function '{name}'"))
    }

    /// The standard error for a known function called with bad arguments.
    pub fn no_overload(name: &str, arg_types: &[Type]) -> Self {
        let args: Vec<_> = arg_types.iter().map(|t| t.name()).collect();
        Self::new(format!(
            "No overload of '{name}' accepts ({})",
            args.join(", ")
        ))
    }
}

impl fmt::Display for FunctionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FunctionError {}

/// Looks up the type of a property path.
///
/// Implementations must report unknown paths as errors rather than fall back
/// to a default type.
pub trait PropertyResolver {
    fn resolve(&self, path: &PropertyPath) -> Result<Type, PropertyError>;

    /// Returns true if `path` refers to a collection-valued property.
    ///
    /// Collection properties may not appear as the right operand of a
    /// comparison. Filter paths never carry a `*` wildcard, so the guard only
    /// fires when a resolver opts in here; what counts as "array-typed" is
    /// still an open product question and this hook is where it is decided.
    fn is_collection(&self, _path: &PropertyPath) -> bool {
        false
    }
}

/// Looks up the result type of a function call.
///
/// Implementations must report unknown names and unsupported argument lists
/// as errors.
pub trait FunctionResolver {
    fn resolve(&self, name: &str, arg_types: &[Type]) -> Result<Type, FunctionError>;
}

impl<T: PropertyResolver + ?Sized> PropertyResolver for &T {
    fn resolve(&self, path: &PropertyPath) -> Result<Type, PropertyError> {
        (**self).resolve(path)
    }

    fn is_collection(&self, path: &PropertyPath) -> bool {
        (**self).is_collection(path)
    }
}

impl<T: FunctionResolver + ?Sized> FunctionResolver for &T {
    fn resolve(&self, name: &str, arg_types: &[Type]) -> Result<Type, FunctionError> {
        (**self).resolve(name, arg_types)
    }
}
