use std::sync::Arc;

use scopex_debug::Debug;

use crate::program::Program;
use crate::{Scope, Value};

/// A compiled expression.
///
/// Cheap to clone and safe to share between threads: evaluation only
/// reads the program, every call gets its own temporaries.
#[derive(Debug, Clone)]
pub struct Evaluator {
    program: Arc<Program>,
    source: Arc<str>,
}

impl Evaluator {
    pub fn new(source: impl Into<Arc<str>>, program: Program) -> Self {
        Self {
            program: Arc::new(program),
            source: source.into(),
        }
    }

    /// Replace the source text the evaluator reports.
    pub fn with_source(self, source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            ..self
        }
    }

    /// Evaluate against a context and optional locals.
    /// Missing properties produce [`Value::Undefined`] rather than failing.
    pub fn eval(&self, context: &Value, locals: Option<&Value>) -> Value {
        self.program.run(Scope::new(context, locals))
    }

    /// Evaluate without context or locals
    pub fn eval_constant(&self) -> Value {
        self.program.run(Scope::empty())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_constant(&self) -> bool {
        self.program.is_constant()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// A human readable report of the source and the generated program
    pub fn dump(&self) -> String {
        Debug::new(String::new())
            .heading()
            .section("source", &*self.source)
            .section("program", &*self.program)
            .footer()
            .finish()
    }
}
