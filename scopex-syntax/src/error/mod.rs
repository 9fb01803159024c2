pub use self::lex::LexErrorKind;
pub use self::parse::{ParseErrorKind, SyntaxError};

mod lex;
mod parse;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure while turning characters into tokens.
pub type LexError = SyntaxError<LexErrorKind>;

/// Failure while turning tokens into a syntax tree.
pub type ParseError = SyntaxError<ParseErrorKind>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn line(&self) -> usize {
        match self {
            Error::Lex(err) => err.line,
            Error::Parse(err) => err.line,
        }
    }

    pub fn col(&self) -> usize {
        match self {
            Error::Lex(err) => err.col,
            Error::Parse(err) => err.col,
        }
    }
}
