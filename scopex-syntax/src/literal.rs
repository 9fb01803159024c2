use std::fmt::{self, Display};

/// Literal values as they appear in the source.
/// Numbers and strings are produced by the lexer, `null`, `true` and `false`
/// are produced by the AST builder from their keywords.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl Literal {
    /// The key a literal produces when used as an object key.
    pub fn to_key(&self) -> String {
        match self {
            Literal::Null => "null".into(),
            Literal::Bool(b) => b.to_string(),
            Literal::Number(n) => number_to_string(*n),
            Literal::Str(s) => s.clone(),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", number_to_string(*n)),
            Self::Str(s) => {
                write!(f, "'")?;
                for c in s.chars() {
                    match c {
                        '\'' => write!(f, "\\'")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\r' => write!(f, "\\r")?,
                        '\t' => write!(f, "\\t")?,
                        c => write!(f, "{c}")?,
                    }
                }
                write!(f, "'")
            }
        }
    }
}

macro_rules! from_value {
    ($from_type:ty, $variant:ident) => {
        impl From<$from_type> for Literal {
            fn from(value: $from_type) -> Self {
                Self::$variant(value.into())
            }
        }
    };
}

from_value!(f64, Number);
from_value!(i32, Number);
from_value!(bool, Bool);
from_value!(String, Str);
from_value!(&str, Str);

/// Format a number the way a script engine prints it:
/// integral values have no fraction, the infinities are spelled out and
/// very large or very small magnitudes use an exponent (`1e+21`, `1e-7`).
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }

    if n.is_infinite() {
        return match n.is_sign_positive() {
            true => "Infinity".into(),
            false => "-Infinity".into(),
        };
    }

    // -0 prints as 0
    if n == 0.0 {
        return "0".into();
    }

    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
            _ => exp,
        };
    }

    n.to_string()
}
