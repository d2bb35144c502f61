//! Tokenizer for expression text.
//!
//! Produces a flat token list and then inserts the implied `*` operators the
//! grammar asks for. Function names are matched as whole tokens, so nothing
//! here can corrupt a neighbouring token the way textual substitution could.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::grammar::{Constant, Function, Grammar};
use crate::error::ParseError;

lazy_static! {
    /// Unsigned decimal literal: `12`, `12.`, `12.5` or `.5`.
    static ref NUMBER: Regex = Regex::new(r"^(?:\d+\.?\d*|\.\d+)").unwrap();

    /// A bare word: function, constant or variable name.
    static ref WORD: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap();
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Constant(Constant),
    /// The plotted variable `x`.
    Variable,
    /// A function name. The lexer always emits the following `(` as its own token.
    Function(Function),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,
    OpenParen,
    CloseParen,
}

impl TokenKind {
    /// Tokens that can begin an operand.
    fn starts_operand(self) -> bool {
        matches!(
            self,
            Self::Number(_)
                | Self::Constant(_)
                | Self::Variable
                | Self::Function(_)
                | Self::OpenParen
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Constant(Constant::Pi) => write!(f, "π"),
            Self::Constant(Constant::E) => write!(f, "e"),
            Self::Variable => write!(f, "x"),
            Self::Function(func) => write!(f, "{}", func.name()),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Caret => write!(f, "^"),
            Self::Percent => write!(f, "%"),
            Self::OpenParen => write!(f, "("),
            Self::CloseParen => write!(f, ")"),
        }
    }
}

/// A token with the character offset it started at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl Token {
    fn new(kind: TokenKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// Split `input` into tokens under `grammar`, then insert implied operators.
pub fn tokenize(input: &str, grammar: Grammar) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    let mut position = 0;

    while let Some(ch) = input[offset..].chars().next() {
        let rest = &input[offset..];

        if ch.is_whitespace() {
            offset += ch.len_utf8();
            position += 1;
            continue;
        }

        if let Some(m) = NUMBER.find(rest) {
            let text = m.as_str();
            let value = text
                .parse::<f64>()
                .map_err(|_| ParseError::MalformedNumber {
                    text: text.to_string(),
                    position,
                })?;
            tokens.push(Token::new(TokenKind::Number(value), position));
            offset += text.len();
            position += text.len();
            continue;
        }

        if let Some(m) = WORD.find(rest) {
            let consumed = lex_word(rest, m.as_str(), position, grammar, &mut tokens)?;
            offset += consumed;
            position += consumed;
            continue;
        }

        let (kind, len) = match ch {
            '+' => (TokenKind::Plus, 1),
            '-' => (TokenKind::Minus, 1),
            '*' if grammar.double_star_power() && rest.starts_with("**") => (TokenKind::Caret, 2),
            '*' => (TokenKind::Star, 1),
            '/' => (TokenKind::Slash, 1),
            '^' => (TokenKind::Caret, 1),
            '%' if grammar.percent() => (TokenKind::Percent, 1),
            '(' => (TokenKind::OpenParen, 1),
            ')' => (TokenKind::CloseParen, 1),
            'π' => (TokenKind::Constant(Constant::Pi), 1),
            _ => return Err(ParseError::UnexpectedChar { ch, position }),
        };
        tokens.push(Token::new(kind, position));
        offset += ch.len_utf8() * len;
        position += len;
    }

    Ok(insert_implied_operators(tokens, grammar))
}

/// Lex a word starting at the beginning of `rest`, returning the bytes consumed.
fn lex_word(
    rest: &str,
    word: &str,
    position: usize,
    grammar: Grammar,
    tokens: &mut Vec<Token>,
) -> Result<usize, ParseError> {
    let unknown = || ParseError::UnknownName {
        name: word.to_string(),
        position,
    };

    match grammar {
        Grammar::Calculator => {
            // Keypad functions only exist as the exact `name(` prefix.
            let function = grammar.function(word).ok_or_else(unknown)?;
            if !rest[word.len()..].starts_with('(') {
                return Err(ParseError::MissingArgument {
                    name: word.to_string(),
                    position,
                });
            }
            tokens.push(Token::new(TokenKind::Function(function), position));
            tokens.push(Token::new(TokenKind::OpenParen, position + word.len()));
            Ok(word.len() + 1)
        }
        Grammar::Function => {
            if let Some(function) = grammar.function(word) {
                let after = &rest[word.len()..];
                let gap = after.len() - after.trim_start().len();
                if !after[gap..].starts_with('(') {
                    return Err(ParseError::MissingArgument {
                        name: word.to_string(),
                        position,
                    });
                }
                let paren_at = position + after[..gap].chars().count() + word.len();
                tokens.push(Token::new(TokenKind::Function(function), position));
                tokens.push(Token::new(TokenKind::OpenParen, paren_at));
                return Ok(word.len() + gap + 1);
            }

            let kind = match word.to_ascii_lowercase().as_str() {
                "pi" => TokenKind::Constant(Constant::Pi),
                "e" => TokenKind::Constant(Constant::E),
                _ if word == "x" && grammar.variable() => TokenKind::Variable,
                _ => return Err(unknown()),
            };
            tokens.push(Token::new(kind, position));
            Ok(word.len())
        }
    }
}

/// Insert the `*` that adjacency implies.
///
/// Percent followed by an operand always multiplies (`50%200` reads
/// `50/100*200`). The remaining rules only apply when the grammar enables
/// implicit multiplication:
/// - a number or `)` followed by a function, `π` or `(`
/// - `)` followed by a number
/// - `π` followed by a number or `(`
fn insert_implied_operators(tokens: Vec<Token>, grammar: Grammar) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        if let Some(prev) = out.last().map(|t| t.kind)
            && implies_multiplication(prev, token.kind, grammar)
        {
            out.push(Token::new(TokenKind::Star, token.position));
        }
        out.push(token);
    }

    out
}

fn implies_multiplication(prev: TokenKind, next: TokenKind, grammar: Grammar) -> bool {
    use TokenKind::*;

    if prev == Percent {
        return next.starts_operand();
    }
    if !grammar.implicit_multiplication() {
        return false;
    }

    matches!(
        (prev, next),
        (Number(_) | CloseParen, Function(_) | Constant(_) | OpenParen)
            | (CloseParen, Number(_))
            | (Constant(_), Number(_) | OpenParen)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str, grammar: Grammar) -> Vec<TokenKind> {
        tokenize(input, grammar)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn rendered(input: &str, grammar: Grammar) -> String {
        kinds(input, grammar).iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("12.5", Grammar::Calculator), vec![TokenKind::Number(12.5)]);
        assert_eq!(kinds("5.", Grammar::Calculator), vec![TokenKind::Number(5.0)]);
        assert_eq!(kinds(".25", Grammar::Calculator), vec![TokenKind::Number(0.25)]);
    }

    #[test]
    fn test_keypad_prefixes() {
        assert_eq!(rendered("sqrt(16)", Grammar::Calculator), "sqrt(16)");
        assert_eq!(rendered("log(ln(1))", Grammar::Calculator), "log(ln(1))");
    }

    #[test]
    fn test_keypad_prefix_requires_paren() {
        assert!(matches!(
            tokenize("sin 1", Grammar::Calculator),
            Err(ParseError::MissingArgument { .. })
        ));
        assert!(matches!(
            tokenize("abs(1)", Grammar::Calculator),
            Err(ParseError::UnknownName { .. })
        ));
    }

    #[test]
    fn test_implicit_multiplication_adjacencies() {
        assert_eq!(rendered("2(3)", Grammar::Calculator), "2*(3)");
        assert_eq!(rendered("2π", Grammar::Calculator), "2*π");
        assert_eq!(rendered("2sin(1)", Grammar::Calculator), "2*sin(1)");
        assert_eq!(rendered("(1)(2)", Grammar::Calculator), "(1)*(2)");
        assert_eq!(rendered("(1)2", Grammar::Calculator), "(1)*2");
        assert_eq!(rendered("π2", Grammar::Calculator), "π*2");
        assert_eq!(rendered("π(2)", Grammar::Calculator), "π*(2)");
    }

    #[test]
    fn test_no_other_adjacency_is_filled() {
        assert_eq!(rendered("ππ", Grammar::Calculator), "ππ");
        assert_eq!(rendered("πsin(1)", Grammar::Calculator), "πsin(1)");
    }

    #[test]
    fn test_percent_followed_by_operand() {
        assert_eq!(rendered("50%200", Grammar::Calculator), "50%*200");
        assert_eq!(rendered("50%-10", Grammar::Calculator), "50%-10");
    }

    #[test]
    fn test_function_grammar_words() {
        assert_eq!(rendered("SIN (x)", Grammar::Function), "sin(x)");
        assert_eq!(rendered("PI*e", Grammar::Function), "π*e");
        assert_eq!(rendered("x**2", Grammar::Function), "x^2");
    }

    #[test]
    fn test_function_grammar_whole_words() {
        assert!(matches!(
            tokenize("sinx", Grammar::Function),
            Err(ParseError::UnknownName { .. })
        ));
        assert!(matches!(
            tokenize("exp(x)", Grammar::Function),
            Err(ParseError::UnknownName { .. })
        ));
    }

    #[test]
    fn test_function_grammar_has_no_implicit_multiplication() {
        assert_eq!(rendered("2x", Grammar::Function), "2x");
    }

    #[test]
    fn test_unexpected_character_position() {
        assert_eq!(
            tokenize("1+π#", Grammar::Calculator),
            Err(ParseError::UnexpectedChar { ch: '#', position: 3 })
        );
        assert!(tokenize("5%2", Grammar::Function).is_err());
    }

    #[test]
    fn test_function_grammar_rejects_remainder_and_exponent_literals() {
        assert_eq!(
            tokenize("x%2", Grammar::Function),
            Err(ParseError::UnexpectedChar { ch: '%', position: 1 })
        );
        assert!(matches!(
            tokenize("1e5*x", Grammar::Function),
            Err(ParseError::UnknownName { ref name, .. }) if name == "e5"
        ));
    }
}
