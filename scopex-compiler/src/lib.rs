//! Turns scopex syntax trees into evaluators.
//!
//! Code generation produces a [`Program`]: a flat list of guarded lookups
//! over hoisted temporaries, ending in a single return.
//! ```
//! # use scopex_compiler::{compile, Value};
//! let ast = scopex_syntax::build_ast("aKey.anotherKey").unwrap();
//! let evaluator = compile(&ast);
//!
//! let context = Value::map([("aKey", Value::map([("anotherKey", 42)]))]);
//! assert_eq!(evaluator.eval(&context, None), Value::from(42));
//! assert_eq!(evaluator.eval(&Value::Undefined, None), Value::Undefined);
//! ```
pub use crate::compiler::{compile, generate};
pub use crate::evaluator::Evaluator;
pub use crate::functions::Function;
pub use crate::program::{Operand, Program, Statement, VarId};
pub use crate::scope::Scope;
pub use crate::value::Value;

mod compiler;
mod evaluator;
mod functions;
#[cfg(feature = "serde")]
mod json;
mod program;
mod scope;
mod value;
