//! Expression tree for `$filter`.
//!
//! The tree is a closed set of variants; every node owns its children, so a
//! parsed filter is a plain tree with no sharing.

use super::path::PropertyPath;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::ser::{Serialize, SerializeMap, Serializer};
use smol_str::SmolStr;
use std::fmt;

/// Binary operators, both logical/comparison and arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl BinaryOperator {
    /// The OData keyword for this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Mod => "mod",
            Self::And => "and",
            Self::Or => "or",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
        }
    }

    /// Returns true for `eq`, `ne`, `gt`, `ge`, `lt`, `le`.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Gt | Self::Ge | Self::Lt | Self::Le
        )
    }

    /// Returns true for `and` and `or`.
    pub fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// Returns true for `add`, `sub`, `mul`, `div`, `mod`.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Logical negation (`not`).
    Not,
    /// Arithmetic negation (`-`).
    Neg,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Neg => "neg",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal value appearing in a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    String(String),
    Number(Decimal),
    Boolean(bool),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Null => f.write_str("null"),
        }
    }
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Literal::String(s) => serializer.serialize_str(s),
            Literal::Number(n) => serialize_decimal(n, serializer),
            Literal::Boolean(b) => serializer.serialize_bool(*b),
            Literal::Null => serializer.serialize_unit(),
        }
    }
}

/// Integral values that fit an `i64` serialize as integers, the rest as floats.
fn serialize_decimal<S: Serializer>(n: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if n.fract().is_zero() {
        if let Some(i) = n.to_i64() {
            return serializer.serialize_i64(i);
        }
    }
    match n.to_f64() {
        Some(f) => serializer.serialize_f64(f),
        None => serializer.serialize_str(&n.to_string()),
    }
}

/// A node of the `$filter` expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// `left op right`
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// `op child`
    Unary {
        op: UnaryOperator,
        child: Box<Expression>,
    },
    /// `name(arg, ...)`
    FunctionCall { name: SmolStr, args: Vec<Expression> },
    /// A property reference, already in canonical form.
    Property(PropertyPath),
    Literal(Literal),
}

impl Expression {
    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOperator, child: Expression) -> Self {
        Self::Unary {
            op,
            child: Box::new(child),
        }
    }

    pub fn function(name: impl Into<SmolStr>, args: Vec<Expression>) -> Self {
        Self::FunctionCall {
            name: name.into(),
            args,
        }
    }

    /// Returns the `type` tag used in the serialized form.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Binary { op, .. } => op.as_str(),
            Self::Unary { op, .. } => op.as_str(),
            Self::FunctionCall { .. } => "function",
            Self::Property(_) => "property",
            Self::Literal(_) => "literal",
        }
    }

    /// Maximum nesting depth of this tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
            Self::Unary { child, .. } => 1 + child.depth(),
            Self::FunctionCall { args, .. } => {
                1 + args.iter().map(Expression::depth).max().unwrap_or(0)
            }
            Self::Property(_) | Self::Literal(_) => 1,
        }
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<PropertyPath> for Expression {
    fn from(path: PropertyPath) -> Self {
        Self::Property(path)
    }
}

/// Renders the tree back into OData filter syntax.
///
/// Binary operations are always parenthesised, so the output re-parses to an
/// equal tree regardless of precedence.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Self::Unary {
                op: UnaryOperator::Not,
                child,
            } => write!(f, "not ({child})"),
            Self::Unary {
                op: UnaryOperator::Neg,
                child,
            } => write!(f, "-({child})"),
            Self::FunctionCall { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::Property(path) => f.write_str(&path.to_odata()),
            Self::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Binary { op, left, right } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", op.as_str())?;
                map.serialize_entry("left", left)?;
                map.serialize_entry("right", right)?;
                map.end()
            }
            Self::Unary { op, child } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", op.as_str())?;
                map.serialize_entry("child", child)?;
                map.end()
            }
            Self::FunctionCall { name, args } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "function")?;
                map.serialize_entry("function", name.as_str())?;
                map.serialize_entry("params", args)?;
                map.end()
            }
            Self::Property(path) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "property")?;
                map.serialize_entry("value", path)?;
                map.end()
            }
            Self::Literal(literal) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "literal")?;
                map.serialize_entry("value", literal)?;
                map.end()
            }
        }
    }
}
