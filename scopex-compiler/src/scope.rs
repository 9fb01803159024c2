use std::borrow::Cow;

use crate::Value;

static UNDEFINED: Value = Value::Undefined;

/// The pair of values an expression is evaluated against.
///
/// Locals shadow the context: an identifier that is an own key of the
/// locals resolves there, even when the local value is null or undefined.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    context: &'a Value,
    locals: Option<&'a Value>,
}

impl<'a> Scope<'a> {
    pub fn new(context: &'a Value, locals: Option<&'a Value>) -> Self {
        Self { context, locals }
    }

    pub fn empty() -> Self {
        Self::new(&UNDEFINED, None)
    }

    pub fn context(&self) -> &'a Value {
        self.context
    }

    pub fn locals(&self) -> Cow<'a, Value> {
        match self.locals {
            Some(locals) => Cow::Borrowed(locals),
            None => Cow::Owned(Value::Undefined),
        }
    }

    pub fn is_local(&self, name: &str) -> bool {
        self.locals.is_some_and(|locals| locals.has_own(name))
    }

    pub fn lookup(&self, name: &str) -> Value {
        if let Some(locals) = self.locals.filter(|_| self.is_local(name)) {
            return locals.get(name);
        }

        match self.context.truthiness() {
            true => self.context.get(name),
            false => Value::Undefined,
        }
    }
}
