//! Recursive-descent parser.
//!
//! Precedence, lowest first:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/') unary)*
//! unary      := ('-' | '+') unary | power
//! power      := postfix ('^' unary)?
//! postfix    := primary '%'*
//! primary    := number | constant | 'x' | function '(' expression ')'
//!             | '(' expression ')'
//! ```
//!
//! `^` is right associative and its exponent may carry a sign, so `2^-1` is
//! one half and `-2^2` is minus four.

use super::ast::{BinaryOp, Expr};
use super::lexer::{Token, TokenKind};
use crate::error::ParseError;

/// Nesting limit for parentheses, signs, exponents and repeated `%`.
/// Runs of `+ -` and `* /` are flat and do not count towards it.
pub const MAX_DEPTH: usize = 256;

pub fn parse(tokens: &[Token]) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };
    let expr = parser.expression()?;

    match parser.peek() {
        None => Ok(expr),
        Some(Token {
            kind: TokenKind::CloseParen,
            position,
        }) => Err(ParseError::UnmatchedClose { position }),
        Some(token) => Err(unexpected(token)),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.cursor).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }

    /// Consume the next token if it has the given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().is_some_and(|t| t.kind == kind) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn expect_close(&mut self) -> Result<(), ParseError> {
        match self.next() {
            Some(Token {
                kind: TokenKind::CloseParen,
                ..
            }) => Ok(()),
            Some(token) => Err(unexpected(token)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        let first = self.term()?;
        let mut rest = Vec::new();
        loop {
            let op = if self.eat(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.eat(TokenKind::Minus) {
                BinaryOp::Subtract
            } else {
                return Ok(Expr::chain(first, rest));
            };
            rest.push((op, self.term()?));
        }
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let first = self.unary()?;
        let mut rest = Vec::new();
        loop {
            let op = if self.eat(TokenKind::Star) {
                BinaryOp::Multiply
            } else if self.eat(TokenKind::Slash) {
                BinaryOp::Divide
            } else {
                return Ok(Expr::chain(first, rest));
            };
            rest.push((op, self.unary()?));
        }
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        let negate = if self.eat(TokenKind::Minus) {
            true
        } else if self.eat(TokenKind::Plus) {
            false
        } else {
            return self.power();
        };

        self.descend()?;
        let operand = self.unary()?;
        self.depth -= 1;

        Ok(if negate {
            Expr::Negate(Box::new(operand))
        } else {
            operand
        })
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.postfix()?;
        if !self.eat(TokenKind::Caret) {
            return Ok(base);
        }

        self.descend()?;
        let exponent = self.unary()?;
        self.depth -= 1;

        Ok(Expr::binary(BinaryOp::Power, base, exponent))
    }

    fn postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        let depth = self.depth;
        while self.eat(TokenKind::Percent) {
            self.descend()?;
            expr = Expr::Percent(Box::new(expr));
        }
        self.depth = depth;
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.next().ok_or(ParseError::UnexpectedEnd)?;

        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::Constant(c) => Ok(Expr::Number(c.value())),
            TokenKind::Variable => Ok(Expr::Variable),
            TokenKind::Function(function) => {
                if !self.eat(TokenKind::OpenParen) {
                    return Err(ParseError::MissingArgument {
                        name: function.name().to_string(),
                        position: token.position,
                    });
                }
                let argument = self.group()?;
                Ok(Expr::Call {
                    function,
                    argument: Box::new(argument),
                })
            }
            TokenKind::OpenParen => self.group(),
            _ => Err(unexpected(token)),
        }
    }

    /// The inside of a parenthesised group, with its closing paren.
    fn group(&mut self) -> Result<Expr, ParseError> {
        self.descend()?;
        let inner = self.expression()?;
        self.expect_close()?;
        self.depth -= 1;
        Ok(inner)
    }
}

fn unexpected(token: Token) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.kind.to_string(),
        position: token.position,
    }
}
