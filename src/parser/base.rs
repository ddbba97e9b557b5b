//! Token stream navigation shared by the filter parser.

use crate::diag::SyntaxError;
use crate::lexer::token::{Token, TokenKind};

/// Common result type for parsing operations.
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Cursor over a token slice that always ends with an EOF token.
pub(crate) struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a new token stream from a token slice.
    ///
    /// The slice must be non-empty and end with [`TokenKind::Eof`], as
    /// produced by the lexer.
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| &t.kind),
            Some(TokenKind::Eof)
        ));
        Self { tokens, pos: 0 }
    }

    /// Returns the current token, or the final (EOF) token past the end.
    pub fn current(&self) -> &'a Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    /// Returns the token after the current one without consuming anything.
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos + 1)
    }

    /// Advances to the next token. Does nothing at EOF.
    pub fn advance(&mut self) {
        if self.pos < self.tokens.len().saturating_sub(1) {
            self.pos += 1;
        }
    }

    /// Checks if the current token matches the given kind.
    pub fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    /// Consumes the current token if it matches the given kind.
    pub fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a specific token kind, consuming it.
    pub fn expect(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.consume(&kind) {
            Ok(())
        } else {
            Err(self.error_here(format!(
                "expected {kind}, found {}",
                self.current().kind
            )))
        }
    }

    /// Returns true once only the EOF token remains.
    pub fn at_end(&self) -> bool {
        self.check(&TokenKind::Eof)
    }

    /// Creates an error at the current token position.
    pub fn error_here(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::filter(self.current().offset(), message)
    }
}
