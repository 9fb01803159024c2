use std::fmt::{self, Display, Formatter};

use crate::error::ParseErrorKind;
use crate::literal::Literal;

/// A single lexical token.
///
/// `value` is set for number and string literals, `identifier` marks bare
/// identifiers. Everything else is punctuation, where `text` is the character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub value: Option<Literal>,
    pub identifier: bool,
    pub(crate) pos: usize,
}

impl Token {
    pub(crate) fn punct(c: char, pos: usize) -> Self {
        Self {
            text: c.to_string(),
            value: None,
            identifier: false,
            pos,
        }
    }

    pub(crate) fn ident(text: &str, pos: usize) -> Self {
        Self {
            text: text.to_string(),
            value: None,
            identifier: true,
            pos,
        }
    }

    pub(crate) fn literal(text: impl Into<String>, value: Literal, pos: usize) -> Self {
        Self {
            text: text.into(),
            value: Some(value),
            identifier: false,
            pos,
        }
    }

    pub fn is_punctuation(&self) -> bool {
        !self.identifier && self.value.is_none()
    }

    /// Byte offset of the token in the source
    pub fn pos(&self) -> usize {
        self.pos
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "{}", self.text),
        }
    }
}

/// Token cursor used by the AST builder.
///
/// Only punctuation is matched by text, so a string literal
/// whose value happens to be `]` is never mistaken for a bracket.
#[derive(Debug)]
pub(crate) struct Tokens {
    inner: Vec<Token>,
    index: usize,
    eof: usize,
}

impl Tokens {
    pub fn new(inner: Vec<Token>, eof: usize) -> Self {
        Self { inner, index: 0, eof }
    }

    /// Look at the next token. With an expected text only
    /// punctuation with that exact text matches.
    pub fn peek(&self, expected: Option<&str>) -> Option<&Token> {
        let token = self.inner.get(self.index)?;
        match expected {
            None => Some(token),
            Some(text) if token.is_punctuation() && token.text == text => Some(token),
            Some(_) => None,
        }
    }

    /// Same as `peek` but removes the token when it matches.
    pub fn expect(&mut self, expected: Option<&str>) -> Option<Token> {
        self.peek(expected)?;
        let token = self.inner[self.index].clone();
        self.index += 1;
        Some(token)
    }

    /// Same as `expect` but a mismatch is an error.
    pub fn consume(&mut self, expected: &'static str) -> Result<Token, ParseErrorKind> {
        match self.expect(Some(expected)) {
            Some(token) => Ok(token),
            None => Err(self.mismatch(expected)),
        }
    }

    pub fn mismatch(&self, expected: &'static str) -> ParseErrorKind {
        match self.peek(None) {
            Some(token) => ParseErrorKind::UnexpectedToken {
                expected,
                found: token.to_string(),
            },
            None => ParseErrorKind::UnexpectedEof { expected },
        }
    }

    /// Offset of the next token, or the end of the source
    pub fn pos(&self) -> usize {
        self.inner.get(self.index).map(|t| t.pos).unwrap_or(self.eof)
    }

    pub fn is_empty(&self) -> bool {
        self.index >= self.inner.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tokens() -> Tokens {
        let inner = vec![
            Token::punct('[', 0),
            Token::literal("]", Literal::from("]"), 1),
            Token::punct(']', 4),
        ];
        Tokens::new(inner, 5)
    }

    #[test]
    fn peek_does_not_consume() {
        let tokens = tokens();
        assert_eq!(tokens.peek(Some("[")).unwrap().text, "[");
        assert_eq!(tokens.peek(None).unwrap().text, "[");
        assert!(tokens.peek(Some("]")).is_none());
    }

    #[test]
    fn string_literal_is_not_punctuation() {
        let mut tokens = tokens();
        tokens.consume("[").unwrap();
        assert!(tokens.expect(Some("]")).is_none());
        assert_eq!(tokens.pos(), 1);
        tokens.expect(None).unwrap();
        tokens.consume("]").unwrap();
        assert!(tokens.is_empty());
        assert_eq!(tokens.pos(), 5);
    }

    #[test]
    fn consume_reports_expected() {
        let mut tokens = tokens();
        let err = tokens.consume("{").unwrap_err();
        assert_eq!(err, ParseErrorKind::UnexpectedToken {
            expected: "{",
            found: "[".into()
        });

        let mut tokens = Tokens::new(vec![], 0);
        let err = tokens.consume(")").unwrap_err();
        assert_eq!(err, ParseErrorKind::UnexpectedEof { expected: ")" });
    }
}
