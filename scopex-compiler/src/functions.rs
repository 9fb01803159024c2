use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::Value;

/// A native function that can be placed in a context and
/// invoked from an expression, e.g. `aFunction(37, n)`.
#[derive(Clone)]
pub struct Function {
    inner: Arc<dyn Fn(&[Value]) -> Value + Send + Sync>,
}

impl Function {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    pub fn invoke(&self, args: &[Value]) -> Value {
        (self.inner)(args)
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fun>")
    }
}

// Functions are equal only to themselves
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> From<T> for Function
where
    T: Fn(&[Value]) -> Value + Send + Sync + 'static,
{
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn add(args: &[Value]) -> Value {
        let values = args.first().and_then(Value::as_number).zip(args.get(1).and_then(Value::as_number));
        match values {
            Some((lhs, rhs)) => Value::Number(lhs + rhs),
            None => Value::Undefined,
        }
    }

    #[test]
    fn invoke() {
        let fun = Function::from(add);
        assert_eq!(fun.invoke(&[1.into(), 2.into()]), Value::Number(3.0));
        assert_eq!(fun.invoke(&[1.into()]), Value::Undefined);
    }

    #[test]
    fn identity() {
        let fun = Function::from(add);
        let other = Function::from(add);
        assert_eq!(fun, fun.clone());
        assert_ne!(fun, other);
    }
}
