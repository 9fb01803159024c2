use std::collections::HashMap;
use std::fmt::{self, Display};

use scopex_syntax::{Literal, number_to_string};

use crate::Function;

/// A runtime value, either supplied by the caller through the
/// context and locals, or produced by evaluating an expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    Function(Function),
}

impl Value {
    pub fn list<T>(values: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Value>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self::Function(Function::new(f))
    }

    pub fn as_number(&self) -> Option<f64> {
        let Value::Number(n) = self else { return None };
        Some(*n)
    }

    pub fn as_bool(&self) -> Option<bool> {
        let Value::Bool(b) = self else { return None };
        Some(*b)
    }

    pub fn as_str(&self) -> Option<&str> {
        let Value::Str(s) = self else { return None };
        Some(s)
    }

    pub fn as_list(&self) -> Option<&[Self]> {
        let Value::List(list) = self else { return None };
        Some(list)
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        let Value::Map(map) = self else { return None };
        Some(map)
    }

    pub fn as_function(&self) -> Option<&Function> {
        let Value::Function(fun) = self else { return None };
        Some(fun)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Used by every guard in a compiled expression.
    /// `undefined`, `null`, `false`, `0`, `NaN` and the empty string are falsy,
    /// everything else (including empty lists and maps) is truthy.
    pub fn truthiness(&self) -> bool {
        match self {
            Value::Undefined | Value::Null | Value::Bool(false) => false,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// True if this is a map that owns the given key,
    /// regardless of what the key maps to.
    pub fn has_own(&self, key: &str) -> bool {
        match self {
            Value::Map(map) => map.contains_key(key),
            _ => false,
        }
    }

    /// Look up a named property.
    ///
    /// * Maps resolve their own keys
    /// * Lists and strings resolve `length` and canonical integer indices
    /// * Everything else resolves to [`Value::Undefined`]
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Map(map) => map.get(key).cloned().unwrap_or_default(),
            Value::List(_) | Value::Str(_) if key == "length" => Value::from(self.len()),
            Value::List(_) | Value::Str(_) => match parse_index(key) {
                Some(index) => self.get_index(index),
                None => Value::Undefined,
            },
            _ => Value::Undefined,
        }
    }

    /// Look up a property by a computed key.
    /// Non-string keys are converted to their string form first,
    /// so `m[1]` and `m['1']` read the same entry of a map.
    pub fn get_property(&self, key: &Value) -> Value {
        match key {
            Value::Str(key) => self.get(key),
            Value::Number(n) => match (self, number_to_index(*n)) {
                (Value::List(_) | Value::Str(_), Some(index)) => self.get_index(index),
                _ => self.get(&number_to_string(*n)),
            },
            key => self.get(&key.to_string()),
        }
    }

    fn get_index(&self, index: usize) -> Value {
        match self {
            Value::List(list) => list.get(index).cloned().unwrap_or_default(),
            Value::Str(s) => s.chars().nth(index).map(Value::from).unwrap_or_default(),
            _ => Value::Undefined,
        }
    }

    fn len(&self) -> usize {
        match self {
            Value::List(list) => list.len(),
            Value::Str(s) => s.chars().count(),
            Value::Map(map) => map.len(),
            _ => 0,
        }
    }

    /// Invoke the value with the given arguments.
    /// Anything that is not a function produces [`Value::Undefined`].
    pub fn call(&self, args: &[Value]) -> Value {
        match self {
            Value::Function(fun) => fun.invoke(args),
            _ => Value::Undefined,
        }
    }
}

fn number_to_index(n: f64) -> Option<usize> {
    match n.fract() == 0.0 && n >= 0.0 && n <= usize::MAX as f64 {
        true => Some(n as usize),
        false => None,
    }
}

// Only canonical indices: "1" is an index, "01" and "+1" are not
fn parse_index(key: &str) -> Option<usize> {
    let index = key.parse::<usize>().ok()?;
    match index.to_string() == key {
        true => Some(index),
        false => None,
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", number_to_string(*n)),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(list) => {
                for (i, val) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    match val {
                        Value::Undefined | Value::Null => {}
                        val => write!(f, "{val}")?,
                    }
                }
                Ok(())
            }
            Value::Map(map) => {
                let mut keys = map.keys().collect::<Vec<_>>();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {}", map[key])?;
                }
                write!(f, "}}")
            }
            Value::Function(_) => write!(f, "<function>"),
        }
    }
}

// -----------------------------------------------------------------------------
//   - From -
// -----------------------------------------------------------------------------
macro_rules! from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Number(value as f64)
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Vec<T>) -> Self {
        Value::list(value)
    }
}

impl<T> From<HashMap<String, T>> for Value
where
    T: Into<Value>,
{
    fn from(value: HashMap<String, T>) -> Self {
        Value::map(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}

impl From<&Literal> for Value {
    fn from(value: &Literal) -> Self {
        match value {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::Str(s) => Value::Str(s.clone()),
        }
    }
}

// -----------------------------------------------------------------------------
//   - Try From -
// -----------------------------------------------------------------------------
macro_rules! try_from_value {
    ($t:ty, $kind:ident) => {
        impl TryFrom<&Value> for $t {
            type Error = ();

            fn try_from(value: &Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$kind(val) => Ok(*val),
                    _ => Err(()),
                }
            }
        }
    };
}

try_from_value!(f64, Number);
try_from_value!(bool, Bool);

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = ();

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Str(val) => Ok(val.as_str()),
            _ => Err(()),
        }
    }
}
