use std::borrow::Cow;
use std::fmt::{self, Display, Write};

use scopex_debug::DebugWriter;
use scopex_syntax::number_to_string;

use crate::{Scope, Value};

/// A hoisted temporary, rendered as `v0`, `v1`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) usize);

impl Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// An inline expression. Evaluating an operand never looks anything up,
/// lookups are statements that store their result in a [`VarId`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Value),
    Var(VarId),
    Context,
    Locals,
    List(Box<[Operand]>),
    Map(Box<[(String, Operand)]>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Resolve a name from the locals if they own it, otherwise from the context
    LoadIdent { into: VarId, name: String },
    /// `into = object.property` if the object is truthy
    Member { into: VarId, object: Operand, property: String },
    /// `into = object[key]` if the object is truthy
    Computed { into: VarId, object: Operand, key: Operand },
    /// `into = callee(args)` if the callee is truthy
    Call { into: VarId, callee: Operand, args: Box<[Operand]> },
    Return(Operand),
}

/// A compiled expression: a flat list of statements over a
/// table of hoisted temporaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub(crate) body: Vec<Statement>,
    pub(crate) vars: Vec<VarId>,
}

impl Program {
    pub fn body(&self) -> &[Statement] {
        &self.body
    }

    pub fn vars(&self) -> &[VarId] {
        &self.vars
    }

    /// A program without lookups that never returns the context or the
    /// locals evaluates to the same value regardless of either.
    pub fn is_constant(&self) -> bool {
        self.body.iter().all(|statement| match statement {
            Statement::Return(operand) => operand.is_constant(),
            _ => false,
        })
    }

    pub fn run(&self, scope: Scope<'_>) -> Value {
        let mut frame = Frame::new(self.vars.len());

        for statement in &self.body {
            match statement {
                Statement::LoadIdent { into, name } => frame.store(*into, scope.lookup(name)),
                Statement::Member { into, object, property } => {
                    if let Some(value) = frame.guarded(object, scope, |object| object.get(property)) {
                        frame.store(*into, value);
                    }
                }
                Statement::Computed { into, object, key } => {
                    let value = frame.guarded(object, scope, |object| object.get_property(&frame.load(key, scope)));
                    if let Some(value) = value {
                        frame.store(*into, value);
                    }
                }
                Statement::Call { into, callee, args } => {
                    let value = frame.guarded(callee, scope, |callee| {
                        let args = args
                            .iter()
                            .map(|arg| frame.load(arg, scope).into_owned())
                            .collect::<Vec<_>>();
                        callee.call(&args)
                    });
                    if let Some(value) = value {
                        frame.store(*into, value);
                    }
                }
                Statement::Return(operand) => return frame.load(operand, scope).into_owned(),
            }
        }

        Value::Undefined
    }

    fn write_source(&self, output: &mut impl Write) -> fmt::Result {
        if !self.vars.is_empty() {
            write!(output, "var ")?;
            for (i, var) in self.vars.iter().enumerate() {
                if i > 0 {
                    write!(output, ",")?;
                }
                write!(output, "{var}")?;
            }
            write!(output, ";")?;
        }

        for statement in &self.body {
            match statement {
                Statement::LoadIdent { into, name } => {
                    let key = Escaped(name);
                    write!(output, "if(l&&({key} in l)){{{into}=l.{name};}}")?;
                    write!(output, "if(!(l&&({key} in l))&&s){{{into}=s.{name};}}")?;
                }
                Statement::Member { into, object, property } => {
                    write!(output, "if({object}){{{into}=({object}).{property};}}")?
                }
                Statement::Computed { into, object, key } => {
                    write!(output, "if({object}){{{into}=({object})[{key}];}}")?
                }
                Statement::Call { into, callee, args } => {
                    write!(output, "if({callee}){{{into}=({callee})(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(output, ",")?;
                        }
                        write!(output, "{arg}")?;
                    }
                    write!(output, ");}}")?;
                }
                Statement::Return(operand) => write!(output, "return {operand};")?,
            }
        }

        Ok(())
    }
}

/// Renders the program in the form of the classic generated function body:
/// `s` is the context and `l` the locals.
impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_source(f)
    }
}

impl DebugWriter for &Program {
    fn write(&mut self, output: &mut impl Write) -> fmt::Result {
        self.write_source(output)
    }
}

// Temporaries of a single evaluation
struct Frame {
    slots: Vec<Value>,
}

impl Frame {
    fn new(len: usize) -> Self {
        Self {
            slots: vec![Value::Undefined; len],
        }
    }

    fn store(&mut self, id: VarId, value: Value) {
        self.slots[id.0] = value;
    }

    fn load<'a>(&'a self, operand: &'a Operand, scope: Scope<'a>) -> Cow<'a, Value> {
        match operand {
            Operand::Literal(value) => Cow::Borrowed(value),
            Operand::Var(id) => Cow::Borrowed(&self.slots[id.0]),
            Operand::Context => Cow::Borrowed(scope.context()),
            Operand::Locals => scope.locals(),
            Operand::List(elements) => {
                let list = elements.iter().map(|el| self.load(el, scope).into_owned()).collect();
                Cow::Owned(Value::List(list))
            }
            Operand::Map(properties) => {
                let map = properties
                    .iter()
                    .map(|(key, value)| (key.clone(), self.load(value, scope).into_owned()))
                    .collect();
                Cow::Owned(Value::Map(map))
            }
        }
    }

    fn guarded<'a, F>(&'a self, target: &'a Operand, scope: Scope<'a>, f: F) -> Option<Value>
    where
        F: FnOnce(&Value) -> Value,
    {
        let target = self.load(target, scope);
        target.truthiness().then(|| f(&target))
    }
}

impl Operand {
    fn is_constant(&self) -> bool {
        match self {
            Operand::Literal(_) => true,
            Operand::Var(_) | Operand::Context | Operand::Locals => false,
            Operand::List(elements) => elements.iter().all(Operand::is_constant),
            Operand::Map(properties) => properties.iter().all(|(_, value)| value.is_constant()),
        }
    }
}

// -----------------------------------------------------------------------------
//   - Source form -
// -----------------------------------------------------------------------------
impl Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) => write!(f, "{}", SourceValue(value)),
            Operand::Var(id) => write!(f, "{id}"),
            Operand::Context => write!(f, "s"),
            Operand::Locals => write!(f, "l"),
            Operand::List(elements) => {
                write!(f, "[")?;
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{el}")?;
                }
                write!(f, "]")
            }
            Operand::Map(properties) => {
                write!(f, "{{")?;
                for (i, (key, value)) in properties.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    match is_identifier(key) {
                        true => write!(f, "{key}:{value}")?,
                        false => write!(f, "{}:{value}", Escaped(key))?,
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

struct SourceValue<'a>(&'a Value);

impl Display for SourceValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Str(s) => write!(f, "{}", Escaped(s)),
            Value::Number(n) => write!(f, "{}", number_to_string(*n)),
            Value::List(list) => {
                write!(f, "[")?;
                for (i, value) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", SourceValue(value))?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                let mut keys = map.keys().collect::<Vec<_>>();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", Escaped(key), SourceValue(&map[key]))?;
                }
                write!(f, "}}")
            }
            value => write!(f, "{value}"),
        }
    }
}

/// A single quoted string where everything but ascii letters,
/// digits and spaces is written as `\uXXXX` (one escape per UTF-16 unit).
struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\'')?;
        for c in self.0.chars() {
            if c.is_ascii_alphanumeric() || c == ' ' {
                f.write_char(c)?;
                continue;
            }

            let mut units = [0; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(f, "\\u{unit:04x}")?;
            }
        }
        f.write_char('\'')
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else { return false };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
