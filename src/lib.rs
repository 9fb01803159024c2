//! Compile data binding expressions such as `user.address[field]` or
//! `format(price, $locals.currency)` into evaluators that can be run
//! any number of times against different contexts.
//!
//! ```
//! use scopex::{compile, Value};
//!
//! let evaluator = compile("aKey.anotherKey").unwrap();
//!
//! let context = Value::map([("aKey", Value::map([("anotherKey", 42)]))]);
//! assert_eq!(evaluator.eval(&context, None), Value::from(42));
//!
//! // Missing links short circuit to undefined
//! let context = Value::map([("aKey", Value::Null)]);
//! assert_eq!(evaluator.eval(&context, None), Value::Undefined);
//! ```
pub use {
    scopex_compiler as compiler, // compiler
    scopex_debug as debug,       // debug
    scopex_syntax as syntax,     // syntax
};

pub use crate::compiler::{Evaluator, Function, Program, Scope, Value};
pub use crate::syntax::error::{Error, LexErrorKind, ParseErrorKind};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Lex, parse and compile an expression.
///
/// Nothing is cached: every call produces a new [`Evaluator`].
#[doc(alias = "parse_expression")]
pub fn compile(text: &str) -> Result<Evaluator> {
    let tokens = syntax::lex(text)?;
    let ast = syntax::parse(text, tokens)?;
    let evaluator = compiler::compile(&ast).with_source(text);

    #[cfg(feature = "logging")]
    log::debug!("compiled `{text}` ({} temporaries)", evaluator.program().vars().len());

    Ok(evaluator)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keeps_source_text() {
        let evaluator = compile("  aKey [ 0 ]").unwrap();
        assert_eq!(evaluator.source(), "  aKey [ 0 ]");
    }

    #[test]
    fn errors_are_reported() {
        let inputs = ["42e-", "'abc", "[1, 2", "{a 1}", "a b", ""];
        for src in inputs {
            assert!(compile(src).is_err(), "{src}");
        }
    }
}
