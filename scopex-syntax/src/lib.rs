//! Lexer and syntax tree builder for scopex expressions.
//!
//! ```
//! # use scopex_syntax::build_ast;
//! let ast = build_ast("aKey.anotherKey").unwrap();
//! assert_eq!(ast.to_string(), "aKey.anotherKey");
//! ```
pub use crate::error::{Error, Result};
pub use crate::expressions::parser::parse;
pub use crate::expressions::{AstNode, MemberProperty, Property, PropertyKey};
pub use crate::lexer::{lex, Lexer};
pub use crate::literal::{number_to_string, Literal};
pub use crate::token::Token;

pub mod error;
pub mod expressions;
mod lexer;
mod literal;
mod token;

/// Lex and parse an expression into a syntax tree
pub fn build_ast(src: &str) -> Result<AstNode> {
    let tokens = lex(src)?;
    parse(src, tokens)
}
