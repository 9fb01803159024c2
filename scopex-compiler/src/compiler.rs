use scopex_syntax::{AstNode, MemberProperty};

use crate::program::{Operand, Program, Statement, VarId};
use crate::{Evaluator, Value};

/// Compile a syntax tree into an evaluator.
pub fn compile(ast: &AstNode) -> Evaluator {
    Evaluator::new(ast.to_string(), generate(ast))
}

/// Generate the program for a syntax tree.
pub fn generate(ast: &AstNode) -> Program {
    let mut state = CompilerState::default();
    let result = state.recurse(ast);

    // A bare expression gets the return a program root would have emitted
    if !matches!(ast, AstNode::Program { .. }) {
        state.body.push(Statement::Return(result));
    }

    #[cfg(feature = "logging")]
    log::trace!("generated {} statements over {} temporaries", state.body.len(), state.vars.len());

    Program {
        body: state.body,
        vars: state.vars,
    }
}

// Only alive for the duration of a single compilation
#[derive(Debug, Default)]
struct CompilerState {
    body: Vec<Statement>,
    next_id: usize,
    vars: Vec<VarId>,
}

impl CompilerState {
    fn next_id(&mut self) -> VarId {
        let id = VarId(self.next_id);
        self.next_id += 1;
        self.vars.push(id);
        id
    }

    fn recurse(&mut self, node: &AstNode) -> Operand {
        match node {
            AstNode::Program { body } => {
                let body = self.recurse(body);
                self.body.push(Statement::Return(body.clone()));
                body
            }
            AstNode::Literal(lit) => Operand::Literal(Value::from(lit)),
            AstNode::Array { elements } => Operand::List(elements.iter().map(|el| self.recurse(el)).collect()),
            AstNode::Object { properties } => {
                let properties = properties
                    .iter()
                    .map(|prop| (prop.key.to_key(), self.recurse(&prop.value)))
                    .collect();
                Operand::Map(properties)
            }
            AstNode::Identifier { name } => {
                let into = self.next_id();
                self.body.push(Statement::LoadIdent {
                    into,
                    name: name.clone(),
                });
                Operand::Var(into)
            }
            AstNode::This => Operand::Context,
            AstNode::Locals => Operand::Locals,
            AstNode::Member {
                object,
                property: MemberProperty::Named(property),
            } => {
                let object = self.recurse(object);
                let into = self.next_id();
                self.body.push(Statement::Member {
                    into,
                    object,
                    property: property.clone(),
                });
                Operand::Var(into)
            }
            AstNode::Member {
                object,
                property: MemberProperty::Computed(key),
            } => {
                let object = self.recurse(object);
                let key = self.recurse(key);
                let into = self.next_id();
                self.body.push(Statement::Computed { into, object, key });
                Operand::Var(into)
            }
            AstNode::Call { callee, arguments } => {
                let callee = self.recurse(callee);
                let args = arguments.iter().map(|arg| self.recurse(arg)).collect();
                let into = self.next_id();
                self.body.push(Statement::Call { into, callee, args });
                Operand::Var(into)
            }
        }
    }
}
