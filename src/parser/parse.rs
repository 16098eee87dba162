//! Main parser coordinator
//!
//! This module provides the [`DeclarationParser`] struct and the core parsing
//! infrastructure: error types, scope handling, bracket matching and the
//! level walk that drives the recursive descent.
//!
//! # Parser Architecture
//!
//! - This module: parser struct, [`Scope`], bracket matching, the level walk
//! - `declarations`: keyword + pointer markers + name shapes, functions and
//!   parameter lists
//!
//! # Bracket scoping
//!
//! Whenever the walk meets an opening bracket from the [`LanguageProfile`],
//! it finds the matching close with a stack keyed by bracket kind, parses the
//! interior slice on its own (cursor zero, one level deeper) and resumes the
//! outer walk one past the close. The parser never looks outside the slice it
//! was handed.

use crate::parser::ast::AstNode;
use crate::parser::position::{Diagnostic, Position};
use crate::parser::profile::LanguageProfile;
use crate::parser::token::Token;
use serde::Serialize;
use thiserror::Error;

/// Maximum bracket nesting depth before the parser bails out.
///
/// Each level is one recursive call, so this bounds stack use for inputs
/// such as thousands of nested parentheses.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Why a token sequence could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParseErrorKind {
    UnclosedBracket,
    MismatchedBracket,
    UnexpectedClosingBracket,
    MalformedDeclaration,
    MalformedParameters,
    NestedFunction,
    NestingTooDeep,
}

impl ParseErrorKind {
    /// Message template; each `{}` is replaced by a `line:column`.
    pub fn template(self) -> &'static str {
        match self {
            ParseErrorKind::UnclosedBracket => "Bracket at {} was never closed",
            ParseErrorKind::MismatchedBracket => {
                "Bracket at {} is closed by mismatched bracket at {}"
            }
            ParseErrorKind::UnexpectedClosingBracket => "Unexpected closing bracket at {}",
            ParseErrorKind::MalformedDeclaration => "Malformed declaration at {}",
            ParseErrorKind::MalformedParameters => "Malformed parameter list at {}",
            ParseErrorKind::NestedFunction => {
                "Function definition not allowed in nested scope at {}"
            }
            ParseErrorKind::NestingTooDeep => "Bracket at {} is nested too deeply",
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{diagnostic}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub diagnostic: Diagnostic,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, positions: Vec<Position>) -> Self {
        ParseError {
            kind,
            diagnostic: Diagnostic::new(kind.template(), positions),
        }
    }

    pub(crate) fn at(kind: ParseErrorKind, token: &Token) -> Self {
        ParseError::new(kind, vec![token.span.start])
    }
}

/// What kind of region a token slice is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The whole translation unit: variables and functions are emitted
    TopLevel,
    /// The inside of a function's parentheses
    Parameters,
    /// Any other bracketed region
    Block,
}

/// Recursive, bracket-aware declaration parser
pub struct DeclarationParser<'p> {
    pub(crate) profile: &'p LanguageProfile,
}

impl<'p> DeclarationParser<'p> {
    pub fn new(profile: &'p LanguageProfile) -> Self {
        Self { profile }
    }

    /// Parse a whole comment-free token sequence as a translation unit.
    pub fn parse_program(&self, tokens: &[Token]) -> Result<Vec<AstNode>, ParseError> {
        let (nodes, _) = self.parse(tokens, 0, Scope::TopLevel)?;
        Ok(nodes)
    }

    /// Parse `tokens[cursor..]` as one level of `scope`.
    ///
    /// Returns the nodes found and the cursor where the walk stopped, which is
    /// always the end of the slice.
    pub fn parse(
        &self,
        tokens: &[Token],
        cursor: usize,
        scope: Scope,
    ) -> Result<(Vec<AstNode>, usize), ParseError> {
        self.parse_level(tokens, cursor, scope, 0)
    }

    /// [`parse`](Self::parse) for a slice sitting `depth` brackets deep.
    pub(crate) fn parse_level(
        &self,
        tokens: &[Token],
        cursor: usize,
        scope: Scope,
        depth: usize,
    ) -> Result<(Vec<AstNode>, usize), ParseError> {
        if scope == Scope::Parameters {
            let params = self.parse_parameter_list(&tokens[cursor.min(tokens.len())..])?;
            let nodes = params.into_iter().map(AstNode::Variable).collect();
            return Ok((nodes, tokens.len()));
        }

        let mut nodes = Vec::new();
        let mut cursor = cursor;

        while let Some(token) = tokens.get(cursor) {
            if self.is_opening(token) {
                if depth >= MAX_NESTING_DEPTH {
                    return Err(ParseError::at(ParseErrorKind::NestingTooDeep, token));
                }
                let (inner, next) = self.enclosed(tokens, cursor)?;
                let (nested, _) = self.parse_level(inner, 0, Scope::Block, depth + 1)?;
                nodes.extend(nested);
                cursor = next;
            } else if self.is_closing(token) {
                return Err(ParseError::at(ParseErrorKind::UnexpectedClosingBracket, token));
            } else if self.is_type_keyword(token) {
                cursor = self.parse_declaration(tokens, cursor, scope, &mut nodes)?;
            } else {
                cursor += 1;
            }
        }

        Ok((nodes, cursor))
    }

    /// Find the bracket closing the one at `open`.
    ///
    /// Returns the index of the closing token.
    pub fn matching_close(&self, tokens: &[Token], open: usize) -> Result<usize, ParseError> {
        let mut stack: Vec<(char, &Token)> = Vec::new();

        for (idx, token) in tokens.iter().enumerate().skip(open) {
            let Some(ch) = token.punct() else {
                continue;
            };

            if let Some(close) = self.profile.closing_for(ch) {
                stack.push((close, token));
            } else if self.profile.is_closing(ch) {
                let Some((expected, opener)) = stack.pop() else {
                    return Err(ParseError::at(ParseErrorKind::UnexpectedClosingBracket, token));
                };
                if expected != ch {
                    return Err(ParseError::new(
                        ParseErrorKind::MismatchedBracket,
                        vec![opener.span.start, token.span.start],
                    ));
                }
                if stack.is_empty() {
                    return Ok(idx);
                }
            }
        }

        let unclosed = stack.first().map(|(_, opener)| *opener).unwrap_or(&tokens[open]);
        Err(ParseError::at(ParseErrorKind::UnclosedBracket, unclosed))
    }

    /// The interior of the bracketed region opened at `open`, and the cursor
    /// just past its closing bracket.
    pub(crate) fn enclosed<'t>(
        &self,
        tokens: &'t [Token],
        open: usize,
    ) -> Result<(&'t [Token], usize), ParseError> {
        let close = self.matching_close(tokens, open)?;
        Ok((&tokens[open + 1..close], close + 1))
    }

    // ===== Helper methods =====

    pub(crate) fn is_type_keyword(&self, token: &Token) -> bool {
        token.is_identifier() && self.profile.is_type_keyword(&token.text)
    }

    pub(crate) fn is_opening(&self, token: &Token) -> bool {
        token.punct().is_some_and(|ch| self.profile.is_opening(ch))
    }

    pub(crate) fn is_closing(&self, token: &Token) -> bool {
        token.punct().is_some_and(|ch| self.profile.is_closing(ch))
    }
}

/// Parse a comment-free token sequence with `profile`.
pub fn parse_declarations(
    tokens: &[Token],
    profile: &LanguageProfile,
) -> Result<Vec<AstNode>, ParseError> {
    DeclarationParser::new(profile).parse_program(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source).unwrap()
    }

    fn close_of(source: &str, open: usize) -> Result<usize, ParseError> {
        let profile = LanguageProfile::default();
        DeclarationParser::new(&profile).matching_close(&tokens(source), open)
    }

    #[test]
    fn test_matching_close_nested() {
        // ( a ( b ) c )
        assert_eq!(close_of("(a(b)c)", 0), Ok(6));
        assert_eq!(close_of("(a(b)c)", 2), Ok(4));
    }

    #[test]
    fn test_matching_close_unterminated() {
        let err = close_of("(a(b)c", 0).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedBracket);
        assert_eq!(err.to_string(), "Bracket at 1:1 was never closed");
    }

    #[test]
    fn test_matching_close_mixed_kinds() {
        assert_eq!(close_of("{ f(x[1]) }", 0), Ok(8));
    }

    #[test]
    fn test_matching_close_mismatched() {
        let err = close_of("{ ( }", 0).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedBracket);
        assert_eq!(err.to_string(), "Bracket at 1:3 is closed by mismatched bracket at 1:5");
    }

    #[test]
    fn test_stray_closing_bracket() {
        let profile = LanguageProfile::default();
        let err = parse_declarations(&tokens("int x; }"), &profile).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedClosingBracket);
        assert_eq!(err.to_string(), "Unexpected closing bracket at 1:8");
    }

    #[test]
    fn test_parse_returns_end_cursor() {
        let profile = LanguageProfile::default();
        let parser = DeclarationParser::new(&profile);
        let toks = tokens("x = (1 + 2);");
        let (nodes, cursor) = parser.parse(&toks, 0, Scope::Block).unwrap();
        assert!(nodes.is_empty());
        assert_eq!(cursor, toks.len());
    }

    #[test]
    fn test_parse_from_cursor() {
        let profile = LanguageProfile::default();
        let parser = DeclarationParser::new(&profile);
        let toks = tokens("int a; int b;");
        let (nodes, _) = parser.parse(&toks, 3, Scope::TopLevel).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name(), Some("b"));
    }

    #[test]
    fn test_parameters_scope() {
        let profile = LanguageProfile::default();
        let parser = DeclarationParser::new(&profile);
        let toks = tokens("int a, char *b");
        let (nodes, cursor) = parser.parse(&toks, 0, Scope::Parameters).unwrap();
        let names: Vec<_> = nodes.iter().filter_map(AstNode::name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(cursor, toks.len());
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let depth = 10_000;
        let source = format!("int x = {}1{};", "(".repeat(depth), ")".repeat(depth));
        let profile = LanguageProfile::default();
        let err = parse_declarations(&tokens(&source), &profile).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
        // first `(` is at column 9; the one past the limit follows it
        let column = 9 + MAX_NESTING_DEPTH;
        assert_eq!(err.to_string(), format!("Bracket at 1:{} is nested too deeply", column));
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let depth = MAX_NESTING_DEPTH;
        let source = format!("int x = {}1{}; int y;", "[".repeat(depth), "]".repeat(depth));
        let profile = LanguageProfile::default();
        let nodes = parse_declarations(&tokens(&source), &profile).unwrap();
        let names: Vec<_> = nodes.iter().filter_map(AstNode::name).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_custom_bracket_profile() {
        let profile = LanguageProfile::new(["int"], &[('(', ')')]);
        // braces are plain punctuation under this profile
        let nodes = parse_declarations(&tokens("int f() { int g; }"), &profile).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name(), Some("f"));
        assert_eq!(nodes[1].name(), Some("g"));
    }
}
