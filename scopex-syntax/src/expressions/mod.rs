use std::fmt::{self, Display};

use crate::literal::Literal;

pub(crate) mod parser;

/// Syntax tree of an expression.
///
/// Every node is built exactly once during descent and owned by its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// The root, always holding exactly one expression
    Program { body: Box<Self> },

    // Values
    Literal(Literal),
    Array { elements: Vec<Self> },
    Object { properties: Vec<Property> },

    // Lookup
    Identifier { name: String },
    This,
    Locals,
    Member { object: Box<Self>, property: MemberProperty },

    // Function call
    Call { callee: Box<Self>, arguments: Vec<Self> },
}

/// The right hand side of a member expression.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// `object.name`
    Named(String),
    /// `object[expression]`
    Computed(Box<AstNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: AstNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(String),
    Literal(Literal),
}

impl PropertyKey {
    /// The key as it is stored in the resulting map
    pub fn to_key(&self) -> String {
        match self {
            PropertyKey::Identifier(name) => name.clone(),
            PropertyKey::Literal(lit) => lit.to_key(),
        }
    }
}

impl Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, items: impl IntoIterator<Item = impl Display>) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Program { body } => write!(f, "{body}"),
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::Array { elements } => {
                write!(f, "[")?;
                join(f, elements)?;
                write!(f, "]")
            }
            Self::Object { properties } => {
                write!(f, "{{")?;
                join(f, properties.iter().map(|p| format!("{}: {}", p.key, p.value)))?;
                write!(f, "}}")
            }
            Self::Identifier { name } => write!(f, "{name}"),
            Self::This => write!(f, "this"),
            Self::Locals => write!(f, "$locals"),
            Self::Member {
                object,
                property: MemberProperty::Named(name),
            } => write!(f, "{object}.{name}"),
            Self::Member {
                object,
                property: MemberProperty::Computed(key),
            } => write!(f, "{object}[{key}]"),
            Self::Call { callee, arguments } => {
                write!(f, "{callee}(")?;
                join(f, arguments)?;
                write!(f, ")")
            }
        }
    }
}

// -----------------------------------------------------------------------------
//   - Lookups -
// -----------------------------------------------------------------------------
pub fn ident(name: &str) -> AstNode {
    AstNode::Identifier { name: name.into() }
}

pub fn member(object: AstNode, name: &str) -> AstNode {
    AstNode::Member {
        object: object.into(),
        property: MemberProperty::Named(name.into()),
    }
}

pub fn computed(object: AstNode, key: AstNode) -> AstNode {
    AstNode::Member {
        object: object.into(),
        property: MemberProperty::Computed(key.into()),
    }
}

pub fn call(callee: AstNode, arguments: impl IntoIterator<Item = AstNode>) -> AstNode {
    AstNode::Call {
        callee: callee.into(),
        arguments: arguments.into_iter().collect(),
    }
}

pub fn program(body: AstNode) -> AstNode {
    AstNode::Program { body: body.into() }
}

// -----------------------------------------------------------------------------
//   - Values -
// -----------------------------------------------------------------------------
pub fn num(n: f64) -> AstNode {
    AstNode::Literal(Literal::Number(n))
}

pub fn strlit(lit: &str) -> AstNode {
    AstNode::Literal(Literal::Str(lit.into()))
}

pub fn boolean(b: bool) -> AstNode {
    AstNode::Literal(Literal::Bool(b))
}

pub fn null() -> AstNode {
    AstNode::Literal(Literal::Null)
}

pub fn list(elements: impl IntoIterator<Item = AstNode>) -> AstNode {
    AstNode::Array {
        elements: elements.into_iter().collect(),
    }
}

pub fn object<'a>(properties: impl IntoIterator<Item = (&'a str, AstNode)>) -> AstNode {
    let properties = properties
        .into_iter()
        .map(|(key, value)| Property {
            key: PropertyKey::Identifier(key.into()),
            value,
        })
        .collect();
    AstNode::Object { properties }
}
