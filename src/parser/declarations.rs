//! Declaration parsing implementation
//!
//! This module handles the declaration shapes the parser recognizes:
//!
//! - Declarators: a type keyword, pointer markers, then the declared name
//! - Function definitions and prototypes at top level
//! - Parameter lists
//!
//! # Grammar
//!
//! ```text
//! declarator   ::= type_keyword "*"* identifier
//! function     ::= declarator "(" params ")" ( "{" body "}" )?
//! params       ::= ( declarator ( "," declarator )* )?
//! ```
//!
//! Everything after a top-level variable's name (initializer, `;`) is left to
//! the level walk. Inside a block a declarator is skipped without producing a
//! node; statement parsing does not exist yet.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`DeclarationParser`] struct.

use crate::parser::ast::{AstNode, Function, TypeDescriptor, Variable};
use crate::parser::parse::{DeclarationParser, ParseError, ParseErrorKind, Scope};
use crate::parser::position::Span;
use crate::parser::token::Token;

/// A parsed `type_keyword "*"* identifier` run.
#[derive(Debug, Clone)]
pub(crate) struct Declarator {
    pub(crate) var_type: TypeDescriptor,
    pub(crate) name: String,
    pub(crate) span: Span,
    /// Index of the first token after the name
    pub(crate) next: usize,
}

impl Declarator {
    fn into_variable(self) -> Variable {
        Variable::new(self.name, self.var_type, self.span)
    }
}

impl<'p> DeclarationParser<'p> {
    /// Parse a declarator starting at the type keyword at `cursor`.
    pub(crate) fn parse_declarator(
        &self,
        tokens: &[Token],
        cursor: usize,
    ) -> Result<Declarator, ParseError> {
        let keyword = &tokens[cursor];
        let mut var_type = TypeDescriptor::new(keyword.text.clone());

        let mut idx = cursor + 1;
        while tokens.get(idx).is_some_and(|t| t.is_punct('*')) {
            var_type = var_type.with_pointer();
            idx += 1;
        }

        match tokens.get(idx) {
            Some(name) if name.is_identifier() => Ok(Declarator {
                var_type,
                name: name.text.clone(),
                span: keyword.span.to(name.span),
                next: idx + 1,
            }),
            _ => Err(ParseError::at(ParseErrorKind::MalformedDeclaration, keyword)),
        }
    }

    /// Parse the declaration at `cursor`, pushing whatever it produces for
    /// `scope` onto `nodes`. Returns the cursor to resume the walk from.
    pub(crate) fn parse_declaration(
        &self,
        tokens: &[Token],
        cursor: usize,
        scope: Scope,
        nodes: &mut Vec<AstNode>,
    ) -> Result<usize, ParseError> {
        let declarator = self.parse_declarator(tokens, cursor)?;
        let opens_call = tokens
            .get(declarator.next)
            .is_some_and(|t| t.is_punct('(') && self.is_opening(t));

        if opens_call {
            if scope != Scope::TopLevel {
                return Err(ParseError::at(ParseErrorKind::NestedFunction, &tokens[cursor]));
            }
            let (function, next) = self.parse_function_definition(tokens, declarator)?;
            nodes.push(AstNode::Function(function));
            return Ok(next);
        }

        let next = declarator.next;
        if scope == Scope::TopLevel {
            nodes.push(AstNode::Variable(declarator.into_variable()));
        }
        Ok(next)
    }

    /// Parse function definition: declarator (params) { body }
    ///
    /// The body is optional, so prototypes produce a function with an empty
    /// body spanning up to the closing parenthesis.
    pub(crate) fn parse_function_definition(
        &self,
        tokens: &[Token],
        declarator: Declarator,
    ) -> Result<(Function, usize), ParseError> {
        let (param_tokens, mut next) = self.enclosed(tokens, declarator.next)?;
        let params = self.parse_parameter_list(param_tokens)?;
        let mut end = tokens[next - 1].span;

        let mut body = Vec::new();
        let has_body = tokens
            .get(next)
            .is_some_and(|t| t.is_punct('{') && self.is_opening(t));
        if has_body {
            let (body_tokens, after_body) = self.enclosed(tokens, next)?;
            // functions only exist at top level, so the body is one bracket deep
            let (nodes, _) = self.parse_level(body_tokens, 0, Scope::Block, 1)?;
            body = nodes;
            next = after_body;
            end = tokens[next - 1].span;
        }

        let function = Function {
            name: declarator.name,
            return_type: declarator.var_type,
            params,
            body,
            span: declarator.span.to(end),
        };
        Ok((function, next))
    }

    /// Parse parameter list: type name, type name, ...
    ///
    /// `tokens` is the interior of the parentheses.
    pub(crate) fn parse_parameter_list(&self, tokens: &[Token]) -> Result<Vec<Variable>, ParseError> {
        let mut params = Vec::new();
        let mut cursor = 0;

        while let Some(token) = tokens.get(cursor) {
            if !self.is_type_keyword(token) {
                return Err(ParseError::at(ParseErrorKind::MalformedParameters, token));
            }
            let declarator = self.parse_declarator(tokens, cursor)?;
            cursor = declarator.next;
            params.push(declarator.into_variable());

            match tokens.get(cursor) {
                None => break,
                Some(comma) if comma.is_punct(',') => {
                    cursor += 1;
                    if cursor == tokens.len() {
                        // trailing comma
                        return Err(ParseError::at(ParseErrorKind::MalformedParameters, comma));
                    }
                }
                Some(other) => {
                    return Err(ParseError::at(ParseErrorKind::MalformedParameters, other));
                }
            }
        }

        Ok(params)
    }
}
