//! Reserved words of the `$filter` language.
//!
//! OData keywords are lowercase and matched case-sensitively, so `Eq` or `NULL`
//! lex as ordinary identifiers.

use super::token::TokenKind;

/// Looks up a reserved word.
pub fn lookup_keyword(word: &str) -> Option<TokenKind> {
    match word {
        "eq" => Some(TokenKind::Eq),
        "ne" => Some(TokenKind::Ne),
        "gt" => Some(TokenKind::Gt),
        "ge" => Some(TokenKind::Ge),
        "lt" => Some(TokenKind::Lt),
        "le" => Some(TokenKind::Le),
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "not" => Some(TokenKind::Not),
        "add" => Some(TokenKind::Add),
        "sub" => Some(TokenKind::Sub),
        "mul" => Some(TokenKind::Mul),
        "div" => Some(TokenKind::Div),
        "mod" => Some(TokenKind::Mod),

        // Literals take precedence over identifiers.
        "true" => Some(TokenKind::BooleanLiteral(true)),
        "false" => Some(TokenKind::BooleanLiteral(false)),
        "null" => Some(TokenKind::NullLiteral),

        _ => None,
    }
}
