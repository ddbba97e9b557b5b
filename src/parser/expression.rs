//! Recursive-descent parser for `$filter` expressions.
//!
//! Precedence, lowest to highest: `or`, `and`, comparisons, `add`/`sub`,
//! `mul`/`div`/`mod`, prefix `not`/`-`. Binary levels are left-associative;
//! comparisons do not chain.
//!
//! Every parenthesis, prefix operator, call and left-associative fold counts
//! against [`ParseConfig::max_depth`] while it is being parsed, so tree depth
//! stays bounded by the limit.

use super::ParseConfig;
use super::base::{ParseResult, TokenStream};
use crate::ast::{BinaryOperator, Expression, Literal, PropertyPath, UnaryOperator};
use crate::diag::SyntaxError;
use crate::lexer::token::{Token, TokenKind};

/// Parser for a complete filter expression.
pub(crate) struct FilterParser<'a> {
    stream: TokenStream<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> FilterParser<'a> {
    /// Creates a parser over lexer output (which ends with EOF).
    pub(crate) fn new(tokens: &'a [Token], config: &ParseConfig) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    /// Parses the whole token stream as one expression.
    ///
    /// Fails if any token is left over after the expression.
    pub fn parse(mut self) -> ParseResult<Expression> {
        let expr = self.parse_expression()?;

        if !self.stream.at_end() {
            return Err(self.stream.error_here(format!(
                "unexpected {} after complete expression",
                self.stream.current().kind
            )));
        }

        Ok(expr)
    }

    /// Parses an expression at the lowest precedence level.
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_or_expression()
    }

    fn parse_or_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_and_expression()?;
        let mut folds = 0;

        while self.stream.check(&TokenKind::Or) {
            self.fold(&mut folds)?;
            let right = self.parse_and_expression()?;
            left = Expression::binary(BinaryOperator::Or, left, right);
        }

        self.unfold(folds);
        Ok(left)
    }

    fn parse_and_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_comparison_expression()?;
        let mut folds = 0;

        while self.stream.check(&TokenKind::And) {
            self.fold(&mut folds)?;
            let right = self.parse_comparison_expression()?;
            left = Expression::binary(BinaryOperator::And, left, right);
        }

        self.unfold(folds);
        Ok(left)
    }

    fn parse_comparison_expression(&mut self) -> ParseResult<Expression> {
        let left = self.parse_additive_expression()?;

        let Some(op) = comparison_operator(&self.stream.current().kind) else {
            return Ok(left);
        };
        self.stream.advance();
        let right = self.parse_additive_expression()?;

        if comparison_operator(&self.stream.current().kind).is_some() {
            return Err(self.stream.error_here(
                "chained comparison operators are not allowed without parentheses",
            ));
        }

        Ok(Expression::binary(op, left, right))
    }

    fn parse_additive_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplicative_expression()?;
        let mut folds = 0;

        loop {
            let op = match self.stream.current().kind {
                TokenKind::Add => BinaryOperator::Add,
                TokenKind::Sub => BinaryOperator::Sub,
                _ => break,
            };
            self.fold(&mut folds)?;
            let right = self.parse_multiplicative_expression()?;
            left = Expression::binary(op, left, right);
        }

        self.unfold(folds);
        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary_expression()?;
        let mut folds = 0;

        loop {
            let op = match self.stream.current().kind {
                TokenKind::Mul => BinaryOperator::Mul,
                TokenKind::Div => BinaryOperator::Div,
                TokenKind::Mod => BinaryOperator::Mod,
                _ => break,
            };
            self.fold(&mut folds)?;
            let right = self.parse_unary_expression()?;
            left = Expression::binary(op, left, right);
        }

        self.unfold(folds);
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Expression> {
        let op = match self.stream.current().kind {
            TokenKind::Not => UnaryOperator::Not,
            TokenKind::Minus => UnaryOperator::Neg,
            _ => return self.parse_primary_expression(),
        };
        self.stream.advance();

        self.enter()?;
        let child = self.parse_unary_expression()?;
        self.exit();

        Ok(Expression::unary(op, child))
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        let token = self.stream.current();

        match &token.kind {
            TokenKind::LParen => {
                self.stream.advance();
                self.enter()?;
                let expr = self.parse_expression()?;
                self.exit();
                self.stream.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Path(text) => {
                if self
                    .stream
                    .peek()
                    .is_some_and(|next| next.kind == TokenKind::LParen)
                {
                    return self.parse_function_call(token);
                }
                self.stream.advance();
                let path = PropertyPath::parse(text).ok_or_else(|| {
                    SyntaxError::filter(token.offset(), format!("invalid property path '{text}'"))
                })?;
                Ok(Expression::Property(path))
            }
            TokenKind::StringLiteral(value) => {
                self.stream.advance();
                Ok(Expression::Literal(Literal::String(value.clone())))
            }
            TokenKind::NumberLiteral(value) => {
                self.stream.advance();
                Ok(Expression::Literal(Literal::Number(*value)))
            }
            TokenKind::BooleanLiteral(value) => {
                self.stream.advance();
                Ok(Expression::Literal(Literal::Boolean(*value)))
            }
            TokenKind::NullLiteral => {
                self.stream.advance();
                Ok(Expression::Literal(Literal::Null))
            }
            TokenKind::Eof => Err(self.stream.error_here("unexpected end of input")),
            other => Err(self
                .stream
                .error_here(format!("expected an operand, found {other}"))),
        }
    }

    /// Parses `name(arg, ...)`; the current token is the name.
    fn parse_function_call(&mut self, name_token: &Token) -> ParseResult<Expression> {
        if name_token.text.contains('/') {
            return Err(SyntaxError::filter(
                name_token.offset(),
                format!("invalid function name '{}'", name_token.text),
            ));
        }
        self.stream.advance(); // name
        self.stream.advance(); // '('

        self.enter()?;
        let mut args = Vec::new();
        if !self.stream.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.stream.consume(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.exit();
        self.stream.expect(TokenKind::RParen)?;

        Ok(Expression::function(name_token.text.clone(), args))
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.stream.error_here("expression nested too deeply"));
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    /// Consumes a left-associative operator; each fold deepens the tree by one.
    fn fold(&mut self, folds: &mut usize) -> ParseResult<()> {
        self.enter()?;
        *folds += 1;
        self.stream.advance();
        Ok(())
    }

    fn unfold(&mut self, folds: usize) {
        self.depth -= folds;
    }
}

fn comparison_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Eq => Some(BinaryOperator::Eq),
        TokenKind::Ne => Some(BinaryOperator::Ne),
        TokenKind::Gt => Some(BinaryOperator::Gt),
        TokenKind::Ge => Some(BinaryOperator::Ge),
        TokenKind::Lt => Some(BinaryOperator::Lt),
        TokenKind::Le => Some(BinaryOperator::Le),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use rust_decimal::Decimal;

    fn parse(source: &str) -> ParseResult<Expression> {
        let tokens = tokenize(source)?;
        FilterParser::new(&tokens, &ParseConfig::default()).parse()
    }

    fn prop(raw: &str) -> Expression {
        Expression::Property(PropertyPath::parse(raw).unwrap())
    }

    fn num(n: i64) -> Expression {
        Expression::Literal(Literal::Number(Decimal::from(n)))
    }

    #[test]
    fn simple_comparison() {
        assert_eq!(
            parse("user/id eq 7").unwrap(),
            Expression::binary(BinaryOperator::Eq, prop("user/id"), num(7))
        );
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(
            parse("a eq 1 or b eq 2 and c eq 3").unwrap(),
            Expression::binary(
                BinaryOperator::Or,
                Expression::binary(BinaryOperator::Eq, prop("a"), num(1)),
                Expression::binary(
                    BinaryOperator::And,
                    Expression::binary(BinaryOperator::Eq, prop("b"), num(2)),
                    Expression::binary(BinaryOperator::Eq, prop("c"), num(3)),
                ),
            )
        );
    }

    #[test]
    fn arithmetic_precedence_and_associativity() {
        assert_eq!(
            parse("a add b mul c sub d").unwrap(),
            Expression::binary(
                BinaryOperator::Sub,
                Expression::binary(
                    BinaryOperator::Add,
                    prop("a"),
                    Expression::binary(BinaryOperator::Mul, prop("b"), prop("c")),
                ),
                prop("d"),
            )
        );
    }

    #[test]
    fn arithmetic_binds_tighter_than_comparison() {
        assert_eq!(
            parse("amount add 1 gt 2").unwrap(),
            Expression::binary(
                BinaryOperator::Gt,
                Expression::binary(BinaryOperator::Add, prop("amount"), num(1)),
                num(2),
            )
        );
    }

    #[test]
    fn unary_operators_nest() {
        assert_eq!(
            parse("not not a").unwrap(),
            Expression::unary(
                UnaryOperator::Not,
                Expression::unary(UnaryOperator::Not, prop("a"))
            )
        );
        assert_eq!(
            parse("-(a eq false)").unwrap(),
            Expression::unary(
                UnaryOperator::Neg,
                Expression::binary(
                    BinaryOperator::Eq,
                    prop("a"),
                    Expression::Literal(Literal::Boolean(false))
                )
            )
        );
    }

    #[test]
    fn function_calls() {
        assert_eq!(
            parse("startswith(manager/name, 'bob') eq true").unwrap(),
            Expression::binary(
                BinaryOperator::Eq,
                Expression::function(
                    "startswith",
                    vec![
                        prop("manager/name"),
                        Expression::Literal(Literal::String("bob".into()))
                    ]
                ),
                Expression::Literal(Literal::Boolean(true)),
            )
        );
        assert_eq!(parse("now()").unwrap(), Expression::function("now", vec![]));
    }

    #[test]
    fn nested_function_arguments() {
        assert_eq!(
            parse("length(trim(name)) gt 0").unwrap(),
            Expression::binary(
                BinaryOperator::Gt,
                Expression::function("length", vec![Expression::function("trim", vec![prop("name")])]),
                num(0),
            )
        );
    }

    #[test]
    fn missing_operator_is_an_error() {
        let err = parse("(a/b 'MD')").unwrap_err();
        assert_eq!(err.offset, Some(5));
        assert_eq!(err.message, "expected ')', found string literal");
    }

    #[test]
    fn chained_comparison_is_an_error() {
        let err = parse("a eq b eq c").unwrap_err();
        assert!(err.message.contains("chained comparison"));
        assert!(parse("(a eq b) eq c").is_ok());
    }

    #[test]
    fn leftover_tokens_are_an_error() {
        let err = parse("a eq 1 b").unwrap_err();
        assert_eq!(err.offset, Some(7));
        assert!(err.message.starts_with("unexpected identifier 'b'"));
    }

    #[test]
    fn incomplete_expressions() {
        for source in ["a eq", "(a eq 1", "f(a,", "not", "a and", "eq 1", "()"] {
            assert!(parse(source).is_err(), "parsed {source:?}");
        }
    }

    #[test]
    fn trailing_comma_in_arguments_is_an_error() {
        assert!(parse("f(a, )").is_err());
    }

    #[test]
    fn function_names_must_be_simple() {
        let err = parse("ns/f(a)").unwrap_err();
        assert!(err.message.contains("invalid function name"));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let config = ParseConfig::default().with_max_depth(8);
        let source = format!("{}a{}", "(".repeat(20), ")".repeat(20));
        let tokens = tokenize(&source).unwrap();
        let err = FilterParser::new(&tokens, &config).parse().unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");
    }

    #[test]
    fn long_flat_chains_respect_tree_depth() {
        let config = ParseConfig::default().with_max_depth(8);
        let source = vec!["a eq 1"; 20].join(" or ");
        let tokens = tokenize(&source).unwrap();
        assert!(FilterParser::new(&tokens, &config).parse().is_err());
        assert!(FilterParser::new(&tokens, &ParseConfig::default()).parse().is_ok());
    }

    #[test]
    fn folds_stop_at_the_operator_that_exceeds_the_limit() {
        let config = ParseConfig::default().with_max_depth(3);
        let tokens = tokenize("a or b or c or d or e").unwrap();
        let err = FilterParser::new(&tokens, &config).parse().unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");
        // the fourth `or`
        assert_eq!(err.offset, Some(17));

        let tokens = tokenize("a or b or c or d").unwrap();
        assert!(FilterParser::new(&tokens, &config).parse().is_ok());
    }

    #[test]
    fn sibling_chains_do_not_accumulate_depth() {
        let config = ParseConfig::default().with_max_depth(4);
        let tokens = tokenize("(a add 1 add 2 eq 3) and (b mul 2 mul 3 eq 4)").unwrap();
        assert!(FilterParser::new(&tokens, &config).parse().is_ok());
    }
}
