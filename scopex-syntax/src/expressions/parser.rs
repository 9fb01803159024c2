use super::{AstNode, MemberProperty, Property, PropertyKey};
use crate::error::{ParseError, ParseErrorKind, Result};
use crate::literal::Literal;
use crate::token::{Token, Tokens};

/// Build a syntax tree from a list of tokens.
/// `src` is only used to point at the location of an error.
pub fn parse(src: &str, tokens: Vec<Token>) -> Result<AstNode> {
    let mut builder = AstBuilder {
        tokens: Tokens::new(tokens, src.len()),
        src,
    };
    builder.program()
}

// Keywords that are never free identifiers
fn constant(text: &str) -> Option<AstNode> {
    let node = match text {
        "null" => AstNode::Literal(Literal::Null),
        "true" => AstNode::Literal(Literal::Bool(true)),
        "false" => AstNode::Literal(Literal::Bool(false)),
        "this" => AstNode::This,
        "$locals" => AstNode::Locals,
        _ => return None,
    };
    Some(node)
}

struct AstBuilder<'src> {
    tokens: Tokens,
    src: &'src str,
}

impl AstBuilder<'_> {
    fn error(&self, kind: ParseErrorKind) -> crate::error::Error {
        let pos = self.tokens.pos();
        ParseError::new(pos..pos + 1, self.src, kind).into()
    }

    fn consume(&mut self, expected: &'static str) -> Result<Token> {
        self.tokens.consume(expected).map_err(|kind| self.error(kind))
    }

    fn program(&mut self) -> Result<AstNode> {
        let body = self.primary()?;

        if let Some(token) = self.tokens.peek(None) {
            let kind = ParseErrorKind::TrailingToken(token.to_string());
            return Err(self.error(kind));
        }

        Ok(AstNode::Program { body: body.into() })
    }

    fn primary(&mut self) -> Result<AstNode> {
        let mut primary = if self.tokens.expect(Some("[")).is_some() {
            self.array()?
        } else if self.tokens.expect(Some("{")).is_some() {
            self.object()?
        } else if let Some(node) = self.keyword() {
            node
        } else if self.next_is_identifier() {
            AstNode::Identifier {
                name: self.identifier()?,
            }
        } else {
            AstNode::Literal(self.literal()?)
        };

        // Member access and calls chain left to right
        loop {
            if self.tokens.expect(Some(".")).is_some() {
                let name = self.identifier()?;
                primary = AstNode::Member {
                    object: primary.into(),
                    property: MemberProperty::Named(name),
                };
            } else if self.tokens.expect(Some("[")).is_some() {
                let key = self.primary()?;
                self.consume("]")?;
                primary = AstNode::Member {
                    object: primary.into(),
                    property: MemberProperty::Computed(key.into()),
                };
            } else if self.tokens.expect(Some("(")).is_some() {
                let arguments = self.arguments()?;
                primary = AstNode::Call {
                    callee: primary.into(),
                    arguments,
                };
            } else {
                break;
            }
        }

        Ok(primary)
    }

    fn array(&mut self) -> Result<AstNode> {
        let mut elements = vec![];

        if self.tokens.peek(Some("]")).is_none() {
            loop {
                // Trailing comma
                if self.tokens.peek(Some("]")).is_some() {
                    break;
                }
                elements.push(self.primary()?);
                if self.tokens.expect(Some(",")).is_none() {
                    break;
                }
            }
        }

        self.consume("]")?;
        Ok(AstNode::Array { elements })
    }

    fn object(&mut self) -> Result<AstNode> {
        let mut properties = vec![];

        if self.tokens.peek(Some("}")).is_none() {
            loop {
                let key = self.property_key()?;
                self.consume(":")?;
                let value = self.primary()?;
                properties.push(Property { key, value });
                if self.tokens.expect(Some(",")).is_none() {
                    break;
                }
            }
        }

        self.consume("}")?;
        Ok(AstNode::Object { properties })
    }

    fn property_key(&mut self) -> Result<PropertyKey> {
        if self.next_is_identifier() {
            return Ok(PropertyKey::Identifier(self.identifier()?));
        }

        if self.next_is_literal() {
            return Ok(PropertyKey::Literal(self.literal()?));
        }

        Err(self.error(self.tokens.mismatch("property key")))
    }

    fn arguments(&mut self) -> Result<Vec<AstNode>> {
        let mut arguments = vec![];

        if self.tokens.peek(Some(")")).is_none() {
            loop {
                arguments.push(self.primary()?);
                if self.tokens.expect(Some(",")).is_none() {
                    break;
                }
            }
        }

        self.consume(")")?;
        Ok(arguments)
    }

    fn next_is_identifier(&self) -> bool {
        self.tokens.peek(None).is_some_and(|t| t.identifier)
    }

    fn next_is_literal(&self) -> bool {
        self.tokens.peek(None).is_some_and(|t| t.value.is_some())
    }

    // `null`, `true`, `false`, `this` and `$locals`
    fn keyword(&mut self) -> Option<AstNode> {
        let node = self
            .tokens
            .peek(None)
            .filter(|t| t.identifier)
            .and_then(|t| constant(&t.text))?;
        self.tokens.expect(None);
        Some(node)
    }

    fn identifier(&mut self) -> Result<String> {
        match self.next_is_identifier() {
            true => Ok(self.take()?.text),
            false => Err(self.error(self.tokens.mismatch("identifier"))),
        }
    }

    fn literal(&mut self) -> Result<Literal> {
        if !self.next_is_literal() {
            return Err(self.error(self.tokens.mismatch("expression")));
        }

        match self.take()?.value {
            Some(value) => Ok(value),
            None => Err(self.error(self.tokens.mismatch("expression"))),
        }
    }

    fn take(&mut self) -> Result<Token> {
        match self.tokens.expect(None) {
            Some(token) => Ok(token),
            None => Err(self.error(ParseErrorKind::UnexpectedEof { expected: "expression" })),
        }
    }
}
