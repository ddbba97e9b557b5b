//! Lexical analysis for `$filter`.
//!
//! The lexer converts filter text into a flat token stream terminated by an
//! EOF token. Whitespace separates tokens and is otherwise ignored. Scanning
//! stops at the first error; filters are short enough that reporting one
//! problem at a time is sufficient.

pub mod keywords;
pub mod token;

use crate::diag::SyntaxError;
use rust_decimal::Decimal;
use std::str::FromStr;
use token::{Token, TokenKind};

/// Result of lexical analysis: the tokens, ending with [`TokenKind::Eof`].
pub type LexerResult = Result<Vec<Token>, SyntaxError>;

/// A lexical analyzer for `$filter` text.
pub struct Lexer<'a> {
    /// The source text being lexed.
    source: &'a str,
    /// Current byte position in source.
    pos: usize,
    /// Accumulated tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenizes the source text.
    pub fn tokenize(mut self) -> LexerResult {
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            self.scan_token()?;
        }

        let eof_pos = self.source.len();
        self.tokens
            .push(Token::new(TokenKind::Eof, eof_pos..eof_pos, ""));
        Ok(self.tokens)
    }

    /// Scans a single token.
    fn scan_token(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        let ch = self.advance();

        match ch {
            '(' => self.add_token(TokenKind::LParen, start),
            ')' => self.add_token(TokenKind::RParen, start),
            ',' => self.add_token(TokenKind::Comma, start),

            // A sign directly attached to a digit is part of the number,
            // unless an operand just ended (then it can only be a stray '-').
            '-' => {
                if self.peek().is_ascii_digit() && !self.after_operand() {
                    self.scan_number(start)?;
                } else {
                    self.add_token(TokenKind::Minus, start);
                }
            }

            '\'' => self.scan_string_literal(start)?,

            '0'..='9' => self.scan_number(start)?,

            'a'..='z' | 'A'..='Z' => self.scan_path_or_keyword(start)?,

            _ => {
                return Err(SyntaxError::filter(
                    start,
                    format!("unexpected character '{ch}'"),
                ));
            }
        }
        Ok(())
    }

    /// Scans an identifier, a `/`-separated path, or a reserved word.
    fn scan_path_or_keyword(&mut self, start: usize) -> Result<(), SyntaxError> {
        self.consume_segment();

        while self.peek() == '/' {
            if !self.peek_next().is_ascii_alphanumeric() {
                return Err(SyntaxError::filter(
                    self.pos,
                    "expected a path segment after '/'",
                ));
            }
            self.advance(); // consume '/'
            self.consume_segment();
        }

        let text = &self.source[start..self.pos];
        let kind = keywords::lookup_keyword(text).unwrap_or_else(|| TokenKind::Path(text.into()));
        self.add_token(kind, start);
        Ok(())
    }

    fn consume_segment(&mut self) {
        while self.peek().is_ascii_alphanumeric() {
            self.advance();
        }
    }

    /// Scans a single-quoted string; `''` inside the quotes is one quote.
    fn scan_string_literal(&mut self, start: usize) -> Result<(), SyntaxError> {
        let mut value = String::new();

        loop {
            if self.is_at_end() {
                return Err(SyntaxError::filter(start, "unterminated string literal"));
            }
            let ch = self.advance();
            if ch == '\'' {
                if self.peek() == '\'' {
                    self.advance();
                    value.push('\'');
                } else {
                    break;
                }
            } else {
                value.push(ch);
            }
        }

        self.add_token(TokenKind::StringLiteral(value), start);
        Ok(())
    }

    /// Scans a decimal number, with an optional sign already consumed.
    ///
    /// A single trailing OData type suffix (`L`, `M`, `D`, `F`) is accepted
    /// and dropped.
    fn scan_number(&mut self, start: usize) -> Result<(), SyntaxError> {
        self.consume_digits();

        if self.peek() == '.' {
            self.advance();
            if !self.peek().is_ascii_digit() {
                return Err(self.malformed_number(start));
            }
            self.consume_digits();
        }

        let digits_end = self.pos;

        if matches!(self.peek(), 'l' | 'L' | 'm' | 'M' | 'd' | 'D' | 'f' | 'F')
            && !self.peek_next().is_ascii_alphanumeric()
        {
            self.advance();
        }

        if self.peek().is_ascii_alphanumeric() || matches!(self.peek(), '.' | '_') {
            self.consume_segment();
            return Err(self.malformed_number(start));
        }

        let value = Decimal::from_str(&self.source[start..digits_end])
            .map_err(|_| self.malformed_number(start))?;
        self.add_token(TokenKind::NumberLiteral(value), start);
        Ok(())
    }

    fn consume_digits(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
    }

    fn malformed_number(&self, start: usize) -> SyntaxError {
        let end = self.pos.max(start + 1).min(self.source.len());
        SyntaxError::filter(
            start,
            format!("malformed number '{}'", &self.source[start..end]),
        )
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    /// Returns true if the last token can end an operand.
    fn after_operand(&self) -> bool {
        self.tokens
            .last()
            .is_some_and(|token| token.kind.ends_operand())
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let text = &self.source[start..self.pos];
        self.tokens.push(Token::new(kind, start..self.pos, text));
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Returns the current character without consuming it, or `'\0'` at end.
    fn peek(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    /// Returns the character after the current one, or `'\0'`.
    fn peek_next(&self) -> char {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next().unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let ch = self.peek();
        self.pos += ch.len_utf8();
        ch
    }
}

/// Tokenizes filter text.
pub fn tokenize(source: &str) -> LexerResult {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn number(text: &str) -> TokenKind {
        TokenKind::NumberLiteral(Decimal::from_str(text).unwrap())
    }

    #[test]
    fn empty_input_yields_only_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   \t\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn simple_comparison() {
        assert_eq!(
            kinds("user/id eq 7"),
            vec![
                TokenKind::Path("user/id".into()),
                TokenKind::Eq,
                number("7"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tokens_carry_raw_text_and_offsets() {
        let tokens = tokenize("  name  ne 'x'").unwrap();
        assert_eq!(tokens[0].text, "name");
        assert_eq!(tokens[0].span, 2..6);
        assert_eq!(tokens[1].offset(), 8);
        assert_eq!(tokens[2].text, "'x'");
        assert_eq!(tokens[3].span, 14..14);
    }

    #[test]
    fn reserved_literals_win_over_identifiers() {
        assert_eq!(
            kinds("true false null"),
            vec![
                TokenKind::BooleanLiteral(true),
                TokenKind::BooleanLiteral(false),
                TokenKind::NullLiteral,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("nullable")[0], TokenKind::Path("nullable".into()));
        assert_eq!(kinds("true/x")[0], TokenKind::Path("true/x".into()));
    }

    #[test]
    fn all_operator_keywords() {
        assert_eq!(
            kinds("eq ne gt ge lt le and or not add sub mul div mod"),
            vec![
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Gt,
                TokenKind::Ge,
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::Add,
                TokenKind::Sub,
                TokenKind::Mul,
                TokenKind::Div,
                TokenKind::Mod,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_literal_unescapes_doubled_quotes() {
        assert_eq!(
            kinds("'O''Brien'")[0],
            TokenKind::StringLiteral("O'Brien".into())
        );
        assert_eq!(kinds("''")[0], TokenKind::StringLiteral(String::new()));
        assert_eq!(kinds("''''")[0], TokenKind::StringLiteral("'".into()));
    }

    #[test]
    fn string_literal_keeps_unicode() {
        assert_eq!(
            kinds("'café ✓'")[0],
            TokenKind::StringLiteral("café ✓".into())
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = tokenize("name eq 'bob").unwrap_err();
        assert_eq!(err.offset, Some(8));
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn decimal_numbers() {
        assert_eq!(kinds("12.50")[0], number("12.50"));
        assert_eq!(kinds("0")[0], number("0"));
    }

    #[test]
    fn type_suffixes_are_dropped() {
        assert_eq!(kinds("10L")[0], number("10"));
        assert_eq!(kinds("2.5m")[0], number("2.5"));
        assert_eq!(tokenize("2.5m").unwrap()[0].text, "2.5m");
    }

    #[test]
    fn malformed_numbers() {
        for source in ["1.", "1.2.3", "7abc", "12_000", "1e5", "99999999999999999999999999999999"] {
            let err = tokenize(source).unwrap_err();
            assert!(err.message.contains("malformed number"), "{source}: {err}");
            assert_eq!(err.offset, Some(0));
        }
    }

    #[test]
    fn minus_before_digit_is_a_sign() {
        assert_eq!(
            kinds("price gt -5"),
            vec![
                TokenKind::Path("price".into()),
                TokenKind::Gt,
                number("-5"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn minus_before_group_is_negation() {
        assert_eq!(
            kinds("-(a)"),
            vec![
                TokenKind::Minus,
                TokenKind::LParen,
                TokenKind::Path("a".into()),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn minus_after_operand_is_not_a_sign() {
        assert_eq!(
            kinds("a -5"),
            vec![
                TokenKind::Path("a".into()),
                TokenKind::Minus,
                number("5"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn function_call_tokens() {
        assert_eq!(
            kinds("startswith(manager/name, 'bob')"),
            vec![
                TokenKind::Path("startswith".into()),
                TokenKind::LParen,
                TokenKind::Path("manager/name".into()),
                TokenKind::Comma,
                TokenKind::StringLiteral("bob".into()),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn path_segments_may_start_with_digits() {
        assert_eq!(kinds("a/1b")[0], TokenKind::Path("a/1b".into()));
    }

    #[test]
    fn dangling_slash_is_an_error() {
        let err = tokenize("user/ eq 1").unwrap_err();
        assert_eq!(err.offset, Some(4));
        assert!(tokenize("user//id").is_err());
    }

    #[test]
    fn unexpected_characters() {
        for (source, offset) in [("a eq $b", 5), ("a = 1", 2), ("_a", 0), ("a eq \"x\"", 5), ("é", 0)] {
            let err = tokenize(source).unwrap_err();
            assert_eq!(err.offset, Some(offset), "{source}");
            assert!(err.message.starts_with("unexpected character"));
        }
    }

    #[test]
    fn tokenizing_is_restartable() {
        let source = "(a/b eq 'x') or not c";
        assert_eq!(tokenize(source), tokenize(source));
    }
}
