//! In-memory schema usable as both resolvers.

use super::functions::{FunctionSignature, resolve_standard_signatures, standard_function_names};
use super::{FunctionError, FunctionResolver, PropertyError, PropertyResolver, Type};
use crate::ast::PropertyPath;
use smol_str::SmolStr;
use std::collections::{HashMap, HashSet};

/// A schema held in memory: property types, collection markers and function
/// overloads.
///
/// Property paths may be registered in either `a/b` or `a.b` form.
///
/// # Example
///
/// ```
/// use odata_query::semantic::{FunctionResolver, InMemorySchema, PropertyResolver, Type};
/// use odata_query::ast::PropertyPath;
///
/// let schema = InMemorySchema::new()
///     .with_property("user/name", Type::String)
///     .with_standard_functions();
///
/// let path = PropertyPath::parse("user/name").unwrap();
/// assert_eq!(PropertyResolver::resolve(&schema, &path), Ok(Type::String));
/// assert_eq!(
///     FunctionResolver::resolve(&schema, "length", &[Type::String]),
///     Ok(Type::Number)
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySchema {
    properties: HashMap<String, Type>,
    collections: HashSet<String>,
    functions: HashMap<SmolStr, Vec<FunctionSignature>>,
}

impl InMemorySchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property.
    pub fn add_property(&mut self, path: &str, ty: Type) {
        self.properties.insert(normalize(path), ty);
    }

    /// Adds a collection-valued property whose elements have type `ty`.
    pub fn add_collection(&mut self, path: &str, ty: Type) {
        let key = normalize(path);
        self.collections.insert(key.clone());
        self.properties.insert(key, ty);
    }

    /// Adds one overload of a function.
    pub fn add_function(&mut self, name: impl Into<SmolStr>, signature: FunctionSignature) {
        self.functions.entry(name.into()).or_default().push(signature);
    }

    /// Adds every standard OData function.
    pub fn add_standard_functions(&mut self) {
        for name in standard_function_names() {
            if let Some(sigs) = resolve_standard_signatures(&name) {
                self.functions.entry(name).or_default().extend(sigs);
            }
        }
    }

    pub fn with_property(mut self, path: &str, ty: Type) -> Self {
        self.add_property(path, ty);
        self
    }

    pub fn with_collection(mut self, path: &str, ty: Type) -> Self {
        self.add_collection(path, ty);
        self
    }

    pub fn with_function(
        mut self,
        name: impl Into<SmolStr>,
        params: impl Into<Vec<Type>>,
        returns: Type,
    ) -> Self {
        self.add_function(name, FunctionSignature::new(params, returns));
        self
    }

    pub fn with_standard_functions(mut self) -> Self {
        self.add_standard_functions();
        self
    }
}

fn normalize(path: &str) -> String {
    path.replace('/', ".")
}

impl PropertyResolver for InMemorySchema {
    fn resolve(&self, path: &PropertyPath) -> Result<Type, PropertyError> {
        self.properties
            .get(&path.canonical())
            .copied()
            .ok_or_else(|| PropertyError::unknown(path))
    }

    fn is_collection(&self, path: &PropertyPath) -> bool {
        self.collections.contains(&path.canonical())
    }
}

impl FunctionResolver for InMemorySchema {
    fn resolve(&self, name: &str, arg_types: &[Type]) -> Result<Type, FunctionError> {
        let overloads = self
            .functions
            .get(name)
            .ok_or_else(|| FunctionError::unknown(name))?;

        overloads
            .iter()
            .find(|sig| sig.accepts(arg_types))
            .map(|sig| sig.returns)
            .ok_or_else(|| FunctionError::no_overload(name, arg_types))
    }
}
