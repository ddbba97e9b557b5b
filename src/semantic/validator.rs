//! Type inference and per-option validation of a [`ParsedQuery`].

use super::{FunctionResolver, PropertyResolver, Type};
use crate::ast::{
    BinaryOperator, Expression, Literal, ParsedQuery, PropertyPath, QueryPart, SelectTerm,
    UnaryOperator,
};
use crate::diag::ValidationError;
use tracing::{debug, trace};

/// Limits enforced during validation in addition to type checking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Largest accepted `$top`, if any.
    pub max_top: Option<u64>,

    /// Largest accepted number of segments in an `$expand` path, if any.
    pub max_expand_depth: Option<usize>,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_top(mut self, max_top: u64) -> Self {
        self.max_top = Some(max_top);
        self
    }

    pub fn with_max_expand_depth(mut self, depth: usize) -> Self {
        self.max_expand_depth = Some(depth);
        self
    }
}

/// Validates parsed queries against a property resolver and a function
/// resolver.
///
/// Validation only reads the query; running it again, or concurrently
/// against other resolvers, gives independent verdicts.
pub struct QueryValidator<'r> {
    properties: &'r dyn PropertyResolver,
    functions: &'r dyn FunctionResolver,
    config: ValidationConfig,
}

/// Failure inside the filter tree; becomes a [`ValidationError`] for `filter`.
type InferResult = Result<Type, String>;

impl<'r> QueryValidator<'r> {
    pub fn new(properties: &'r dyn PropertyResolver, functions: &'r dyn FunctionResolver) -> Self {
        Self {
            properties,
            functions,
            config: ValidationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates every option, in the order filter, orderby, top, skip,
    /// select, expand, stopping at the first failure.
    pub fn validate(&self, query: &ParsedQuery) -> Result<(), ValidationError> {
        let result = self.validate_options(query);

        if let Err(err) = &result {
            debug!(part = %err.part, error = %err.message, "query failed validation");
        }
        result
    }

    fn validate_options(&self, query: &ParsedQuery) -> Result<(), ValidationError> {
        self.validate_filter(query.filter.as_ref())?;
        trace!(part = %QueryPart::Filter, "validated option");
        self.validate_order_by(query)?;
        trace!(part = %QueryPart::OrderBy, "validated option");
        self.validate_top(query.top)?;
        self.validate_skip(query.skip)?;
        trace!("validated top and skip");
        self.validate_select(&query.select)?;
        trace!(part = %QueryPart::Select, "validated option");
        self.validate_expand(&query.expand)?;
        trace!(part = %QueryPart::Expand, "validated option");
        Ok(())
    }

    /// Infers the type of a filter expression.
    pub fn infer_type(&self, expr: &Expression) -> Result<Type, ValidationError> {
        self.infer(expr)
            .map_err(|message| ValidationError::new(QueryPart::Filter, message))
    }

    fn validate_filter(&self, filter: Option<&Expression>) -> Result<(), ValidationError> {
        let Some(filter) = filter else {
            return Ok(());
        };

        let ty = self.infer_type(filter)?;
        trace!(%ty, "inferred filter type");
        if ty != Type::Boolean {
            return Err(ValidationError::new(
                QueryPart::Filter,
                "Expression does not resolve to a boolean",
            ));
        }
        Ok(())
    }

    fn validate_order_by(&self, query: &ParsedQuery) -> Result<(), ValidationError> {
        for term in &query.order_by {
            self.resolve_property(QueryPart::OrderBy, &term.property)?;
        }
        Ok(())
    }

    fn validate_top(&self, top: Option<u64>) -> Result<(), ValidationError> {
        match (top, self.config.max_top) {
            (Some(0), _) => Err(ValidationError::new(
                QueryPart::Top,
                "Top must be a positive integer",
            )),
            (Some(top), Some(max)) if top > max => Err(ValidationError::new(
                QueryPart::Top,
                format!("Top must not exceed {max}"),
            )),
            _ => Ok(()),
        }
    }

    // Any u64 is a valid skip; kept so every option has a validation step.
    fn validate_skip(&self, _skip: Option<u64>) -> Result<(), ValidationError> {
        Ok(())
    }

    fn validate_select(&self, select: &[SelectTerm]) -> Result<(), ValidationError> {
        for term in select {
            if let SelectTerm::Property(path) = term {
                self.resolve_property(QueryPart::Select, path)?;
            }
        }
        Ok(())
    }

    fn validate_expand(&self, expand: &[PropertyPath]) -> Result<(), ValidationError> {
        for path in expand {
            if let Some(max) = self.config.max_expand_depth {
                if path.depth() > max {
                    return Err(ValidationError::new(
                        QueryPart::Expand,
                        format!("Expansion '{path}' exceeds the maximum depth of {max}"),
                    ));
                }
            }
            self.resolve_property(QueryPart::Expand, path)?;
        }
        Ok(())
    }

    fn resolve_property(&self, part: QueryPart, path: &PropertyPath) -> Result<Type, ValidationError> {
        self.properties
            .resolve(path)
            .map_err(|err| ValidationError::new(part, err.message))
    }

    fn infer(&self, expr: &Expression) -> InferResult {
        match expr {
            Expression::Binary { op, left, right } => match op {
                BinaryOperator::And | BinaryOperator::Or => {
                    self.expect_boolean(left)?;
                    self.expect_boolean(right)?;
                    Ok(Type::Boolean)
                }
                BinaryOperator::Eq
                | BinaryOperator::Ne
                | BinaryOperator::Gt
                | BinaryOperator::Ge
                | BinaryOperator::Lt
                | BinaryOperator::Le => self.infer_comparison(*op, left, right),
                BinaryOperator::Add
                | BinaryOperator::Sub
                | BinaryOperator::Mul
                | BinaryOperator::Div
                | BinaryOperator::Mod => Err(arithmetic_unsupported()),
            },
            Expression::Unary { op, child } => match op {
                UnaryOperator::Not => {
                    self.expect_boolean(child)?;
                    Ok(Type::Boolean)
                }
                UnaryOperator::Neg => Err(arithmetic_unsupported()),
            },
            Expression::FunctionCall { name, args } => {
                let arg_types = args
                    .iter()
                    .map(|arg| self.infer(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                self.functions
                    .resolve(name, &arg_types)
                    .map_err(|err| err.message)
            }
            Expression::Property(path) => {
                let ty = self.properties.resolve(path).map_err(|err| err.message)?;
                // A schema boolean only compares against literal booleans.
                Ok(match ty {
                    Type::Boolean => Type::BooleanLiteral,
                    other => other,
                })
            }
            Expression::Literal(literal) => Ok(literal_type(literal)),
        }
    }

    fn expect_boolean(&self, operand: &Expression) -> Result<(), String> {
        if self.infer(operand)? != Type::Boolean {
            return Err("Logical expression operand is not a boolean".to_string());
        }
        Ok(())
    }

    fn infer_comparison(
        &self,
        op: BinaryOperator,
        left: &Expression,
        right: &Expression,
    ) -> InferResult {
        if let Expression::Property(path) = right {
            if self.properties.is_collection(path) {
                return Err(
                    "Cannot have property within array as the right operand of a comparison"
                        .to_string(),
                );
            }
        }

        let left_type = self.infer(left)?;
        let right_type = self.infer(right)?;

        let comparable = if left_type == Type::Null || right_type == Type::Null {
            matches!(op, BinaryOperator::Eq | BinaryOperator::Ne)
        } else {
            left_type == right_type
        };

        if comparable {
            Ok(Type::Boolean)
        } else {
            Err(format!("Cannot compare {left_type} {op} {right_type}"))
        }
    }
}

fn arithmetic_unsupported() -> String {
    "Arithmetic expressions not supported".to_string()
}

fn literal_type(literal: &Literal) -> Type {
    match literal {
        Literal::String(_) => Type::String,
        Literal::Number(_) => Type::Number,
        Literal::Boolean(_) => Type::BooleanLiteral,
        Literal::Null => Type::Null,
    }
}
