//! Signatures of the canonical OData filter functions.

use super::Type;
use smol_str::SmolStr;

/// One overload of a function: parameter types and result type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub params: Vec<Type>,
    pub returns: Type,
}

impl FunctionSignature {
    pub fn new(params: impl Into<Vec<Type>>, returns: Type) -> Self {
        Self {
            params: params.into(),
            returns,
        }
    }

    /// Returns true if this overload accepts exactly `arg_types`.
    pub fn accepts(&self, arg_types: &[Type]) -> bool {
        self.params == arg_types
    }
}

/// Resolves the overloads of a standard function by name.
pub fn resolve_standard_signatures(name: &str) -> Option<Vec<FunctionSignature>> {
    use Type::{Boolean, Number, String};

    let sigs = match name {
        // String predicates
        "contains" | "startswith" | "endswith" | "substringof" => {
            vec![FunctionSignature::new([String, String], Boolean)]
        }

        // String functions
        "length" => vec![FunctionSignature::new([String], Number)],
        "indexof" => vec![FunctionSignature::new([String, String], Number)],
        "tolower" | "toupper" | "trim" => vec![FunctionSignature::new([String], String)],
        "concat" => vec![FunctionSignature::new([String, String], String)],
        "substring" => vec![
            FunctionSignature::new([String, Number], String),
            FunctionSignature::new([String, Number, Number], String),
        ],

        // Math functions
        "round" | "floor" | "ceiling" => vec![FunctionSignature::new([Number], Number)],

        _ => return None,
    };

    Some(sigs)
}

/// Names of all standard functions.
pub fn standard_function_names() -> Vec<SmolStr> {
    [
        "contains",
        "startswith",
        "endswith",
        "substringof",
        "length",
        "indexof",
        "tolower",
        "toupper",
        "trim",
        "concat",
        "substring",
        "round",
        "floor",
        "ceiling",
    ]
    .into_iter()
    .map(SmolStr::new_static)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves() {
        for name in standard_function_names() {
            assert!(resolve_standard_signatures(&name).is_some(), "{name}");
        }
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert!(resolve_standard_signatures("frobnicate").is_none());
        assert!(resolve_standard_signatures("StartsWith").is_none());
    }

    #[test]
    fn substring_has_two_overloads() {
        let sigs = resolve_standard_signatures("substring").unwrap();
        assert_eq!(sigs.len(), 2);
        assert!(sigs[1].accepts(&[Type::String, Type::Number, Type::Number]));
        assert!(!sigs[0].accepts(&[Type::String]));
    }
}
