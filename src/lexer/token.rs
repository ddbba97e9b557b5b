//! Token types produced by the `$filter` lexer.

use crate::ast::Span;
use rust_decimal::Decimal;
use smol_str::SmolStr;
use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Comparison operators
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,

    // Logical operators
    And,
    Or,
    Not,

    // Arithmetic operators
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// `-` used as a prefix negation.
    Minus,

    /// An identifier or `/`-separated path, kept un-split.
    Path(SmolStr),

    // Literals
    StringLiteral(String),
    NumberLiteral(Decimal),
    BooleanLiteral(bool),
    NullLiteral,

    // Punctuation
    LParen,
    RParen,
    Comma,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns true if this is an operator keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::Ne
                | TokenKind::Gt
                | TokenKind::Ge
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::Add
                | TokenKind::Sub
                | TokenKind::Mul
                | TokenKind::Div
                | TokenKind::Mod
        )
    }

    /// Returns true if this is a literal token.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::StringLiteral(_)
                | TokenKind::NumberLiteral(_)
                | TokenKind::BooleanLiteral(_)
                | TokenKind::NullLiteral
        )
    }

    /// Returns true if an operand can end with this token.
    ///
    /// Used to decide whether a following `-` is a sign or an operator.
    pub fn ends_operand(&self) -> bool {
        self.is_literal() || matches!(self, TokenKind::Path(_) | TokenKind::RParen)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eq => write!(f, "'eq'"),
            TokenKind::Ne => write!(f, "'ne'"),
            TokenKind::Gt => write!(f, "'gt'"),
            TokenKind::Ge => write!(f, "'ge'"),
            TokenKind::Lt => write!(f, "'lt'"),
            TokenKind::Le => write!(f, "'le'"),
            TokenKind::And => write!(f, "'and'"),
            TokenKind::Or => write!(f, "'or'"),
            TokenKind::Not => write!(f, "'not'"),
            TokenKind::Add => write!(f, "'add'"),
            TokenKind::Sub => write!(f, "'sub'"),
            TokenKind::Mul => write!(f, "'mul'"),
            TokenKind::Div => write!(f, "'div'"),
            TokenKind::Mod => write!(f, "'mod'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Path(path) => write!(f, "identifier '{path}'"),
            TokenKind::StringLiteral(_) => write!(f, "string literal"),
            TokenKind::NumberLiteral(_) => write!(f, "number literal"),
            TokenKind::BooleanLiteral(_) => write!(f, "boolean literal"),
            TokenKind::NullLiteral => write!(f, "'null'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its raw source text and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in source text.
    pub span: Span,
    /// The raw text the token was scanned from.
    pub text: SmolStr,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span, text: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }

    /// Byte offset of the first character of this token.
    pub fn offset(&self) -> usize {
        self.span.start
    }
}
