//! Token definitions shared by the lexer, the parser and the printers

use super::position::Span;
use serde::Serialize;
use std::fmt;

/// Classification of a lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Identifier,
    /// Single-character operators and punctuation
    Operator,
    Comment,
    FloatConst,
    DecIntConst,
    HexIntConst,
    OctIntConst,
    BinIntConst,
    StringConst,
    CharConst,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::Operator => "Operator",
            TokenKind::Comment => "Comment",
            TokenKind::FloatConst => "FloatConst",
            TokenKind::DecIntConst => "DecIntConst",
            TokenKind::HexIntConst => "HexIntConst",
            TokenKind::OctIntConst => "OctIntConst",
            TokenKind::BinIntConst => "BinIntConst",
            TokenKind::StringConst => "StringConst",
            TokenKind::CharConst => "CharConst",
        }
    }

    /// Numeric, string and character constants.
    pub fn is_literal(self) -> bool {
        !matches!(
            self,
            TokenKind::Identifier | TokenKind::Operator | TokenKind::Comment
        )
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TokenKind::FloatConst
                | TokenKind::DecIntConst
                | TokenKind::HexIntConst
                | TokenKind::OctIntConst
                | TokenKind::BinIntConst
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified slice of the source.
///
/// `offset` is the character offset of the first character; `span` holds the
/// resolved positions of the first and last characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub span: Span,
    pub kind: TokenKind,
    pub offset: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, span: Span, kind: TokenKind, offset: usize) -> Self {
        Self {
            text: text.into(),
            span,
            kind,
            offset,
        }
    }

    /// Number of characters covered by the token.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offset one past the last character.
    pub fn end_offset(&self) -> usize {
        self.offset + self.len()
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    /// The character of a single-character operator token.
    pub fn punct(&self) -> Option<char> {
        if self.kind != TokenKind::Operator {
            return None;
        }
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }

    pub fn is_punct(&self, ch: char) -> bool {
        self.punct() == Some(ch)
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token {:?} ({}) at {}", self.text, self.kind, self.span)
    }
}

/// Drop comment tokens, keeping everything else in order.
pub fn strip_comments(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .filter(|token| !token.is_comment())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::position::Position;

    fn token(text: &str, kind: TokenKind) -> Token {
        let span = Span::new(Position::new(1, 1), Position::new(1, text.len()));
        Token::new(text, span, kind, 0)
    }

    #[test]
    fn test_punct() {
        assert_eq!(token("(", TokenKind::Operator).punct(), Some('('));
        assert_eq!(token("x", TokenKind::Identifier).punct(), None);
        assert!(token(";", TokenKind::Operator).is_punct(';'));
        assert!(!token(";", TokenKind::Operator).is_punct(','));
    }

    #[test]
    fn test_display() {
        let t = token("int", TokenKind::Identifier);
        assert_eq!(t.to_string(), "Token \"int\" (Identifier) at (1:1, 1:3)");
    }

    #[test]
    fn test_strip_comments() {
        let tokens = vec![
            token("// hi\n", TokenKind::Comment),
            token("x", TokenKind::Identifier),
            token("/* */", TokenKind::Comment),
        ];
        let kept = strip_comments(&tokens);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "x");
    }

    #[test]
    fn test_kind_predicates() {
        assert!(TokenKind::HexIntConst.is_numeric());
        assert!(TokenKind::StringConst.is_literal());
        assert!(!TokenKind::StringConst.is_numeric());
        assert!(!TokenKind::Comment.is_literal());
    }
}
