use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    UnexpectedChar(char),
    InvalidExponent,
    InvalidNumber,
    InvalidUnicodeEscape,
    UnmatchedQuote,
}

impl Display for LexErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedChar(c) => write!(f, "unexpected next character: {c}"),
            LexErrorKind::InvalidExponent => write!(f, "invalid exponent"),
            LexErrorKind::InvalidNumber => write!(f, "invalid number"),
            LexErrorKind::InvalidUnicodeEscape => write!(f, "invalid unicode escape"),
            LexErrorKind::UnmatchedQuote => write!(f, "unmatched quote"),
        }
    }
}
