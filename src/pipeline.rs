//! Whole-source entry point: lex, drop comments, parse
//!
//! A [`SourceUnit`] is everything the front end knows about one source text.
//! Both stages are all-or-nothing, so a unit either exists completely or the
//! caller gets the single [`FrontendError`] that stopped it.

use crate::parser::{
    parse_declarations, strip_comments, AstNode, Diagnostic, LanguageProfile, LexError, Lexer,
    ParseError, Token,
};
use thiserror::Error;

/// Any fatal condition of the front end
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FrontendError {
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            FrontendError::Lex(err) => err.diagnostic(),
            FrontendError::Parse(err) => Some(&err.diagnostic),
        }
    }

    /// Short stage label used when reporting.
    pub fn stage(&self) -> &'static str {
        match self {
            FrontendError::Lex(_) => "Lexer",
            FrontendError::Parse(_) => "Parser",
        }
    }
}

/// Tokens and declarations of one source text
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUnit {
    /// Every token, comments included
    pub tokens: Vec<Token>,
    pub declarations: Vec<AstNode>,
}

impl SourceUnit {
    /// Tokens without comments, as the parser saw them.
    pub fn code_tokens(&self) -> Vec<Token> {
        strip_comments(&self.tokens)
    }
}

/// Run the lexer and the declaration parser over `source`.
pub fn analyze(source: &str, profile: &LanguageProfile) -> Result<SourceUnit, FrontendError> {
    let tokens = Lexer::new(source).tokenize()?;
    let declarations = parse_declarations(&strip_comments(&tokens), profile)?;
    Ok(SourceUnit {
        tokens,
        declarations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{LexErrorKind, ParseErrorKind};

    #[test]
    fn test_analyze_keeps_comments_in_tokens() {
        let unit = analyze("int x; // trailing\n", &LanguageProfile::default()).unwrap();
        assert_eq!(unit.tokens.len(), 4);
        assert_eq!(unit.code_tokens().len(), 3);
        assert_eq!(unit.declarations.len(), 1);
    }

    #[test]
    fn test_comment_between_declarator_parts() {
        let source = "int /* ret */ *make(int /* n */ n);";
        let unit = analyze(source, &LanguageProfile::default()).unwrap();
        assert_eq!(unit.declarations[0].name(), Some("make"));
    }

    #[test]
    fn test_lex_failure_is_reported_first() {
        let err = analyze("int f( { 0x }", &LanguageProfile::default()).unwrap_err();
        match &err {
            FrontendError::Lex(lex) => assert_eq!(lex.kind(), Some(LexErrorKind::InvalidHex)),
            other => panic!("Expected lex error, found {:?}", other),
        }
        assert_eq!(err.stage(), "Lexer");
        assert_eq!(err.to_string(), "Invelid hex number at 1:10");
    }

    #[test]
    fn test_parse_failure() {
        let err = analyze("int f( {", &LanguageProfile::default()).unwrap_err();
        match &err {
            FrontendError::Parse(parse) => {
                assert_eq!(parse.kind, ParseErrorKind::UnclosedBracket)
            }
            other => panic!("Expected parse error, found {:?}", other),
        }
        assert!(err.diagnostic().is_some());
    }
}
