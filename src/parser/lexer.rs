//! Lexer (tokenizer) for C source code
//!
//! Converts raw source text into a flat [`Token`] stream. Every token keeps the
//! exact source slice it was cut from, so the stream (plus the skipped
//! whitespace) reproduces the input, and comments are kept as tokens for the
//! caller to filter.
//!
//! # Recognizers
//!
//! At each cursor position the lexer tries a fixed, ordered list of
//! [`Recognizer`]s and takes the first one that matches:
//!
//! ```text
//! comment → number → char literal → string literal → identifier → punctuation
//! ```
//!
//! A recognizer is a pure function of the source and the cursor. It either
//! declines, reports the offset of the last character of its token, or
//! rejects the input with a [`LexErrorKind`]. All lexical errors cite the
//! first character of the offending token.

use super::position::{Diagnostic, OutOfRange, PositionResolver};
use super::token::{Token, TokenKind};
use serde::Serialize;
use thiserror::Error;

/// Why a piece of source could not be tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LexErrorKind {
    /// No recognizer matched a non-whitespace character
    UnknownCharacter,
    UnterminatedComment,
    /// `0b` with no binary digit after it
    InvalidBinary,
    BinarySuffix,
    /// `0x` with no hex digit after it
    InvalidHex,
    HexSuffix,
    OctalSuffix,
    FloatSuffix,
    /// Decimal suffix, or a leading zero followed by something that is
    /// neither an octal run nor a float
    InvalidNumber,
    InvalidChar,
    UnterminatedString,
}

impl LexErrorKind {
    /// Message template; `{}` is replaced by the token's `line:column`.
    ///
    /// The spelling matches what existing tooling expects; keep it verbatim.
    pub fn template(self) -> &'static str {
        match self {
            LexErrorKind::UnknownCharacter => "Syntax error at {} (can't determen token)",
            LexErrorKind::UnterminatedComment => "Multiline comment was never closed {}",
            LexErrorKind::InvalidBinary => "Invelid binary number at {}",
            LexErrorKind::BinarySuffix => "Binary number at {} is followed by invalid symbol",
            LexErrorKind::InvalidHex => "Invelid hex number at {}",
            LexErrorKind::HexSuffix => "Hex number at {} is followed by invalid symbol",
            LexErrorKind::OctalSuffix => "Octal number at {} is followed by invalid symbol",
            LexErrorKind::FloatSuffix => "Float number at {} is followed by invalid symbol",
            LexErrorKind::InvalidNumber => "Invalid number defenition at {}",
            LexErrorKind::InvalidChar => "Invalid char const defenetion at {}",
            LexErrorKind::UnterminatedString => "String at {} wath never closed",
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("{diagnostic}")]
    Syntax {
        kind: LexErrorKind,
        diagnostic: Diagnostic,
    },
    #[error(transparent)]
    Position(#[from] OutOfRange),
}

impl LexError {
    pub fn kind(&self) -> Option<LexErrorKind> {
        match self {
            LexError::Syntax { kind, .. } => Some(*kind),
            LexError::Position(_) => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            LexError::Syntax { diagnostic, .. } => Some(diagnostic),
            LexError::Position(_) => None,
        }
    }
}

/// A successful recognizer match: the token kind and the offset of its last
/// character (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scan {
    pub kind: TokenKind,
    pub end: usize,
}

impl Scan {
    fn new(kind: TokenKind, end: usize) -> Self {
        Self { kind, end }
    }
}

type ScanResult = Result<Option<Scan>, LexErrorKind>;

/// One token-recognition strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recognizer {
    Comment,
    Number,
    CharLiteral,
    StringLiteral,
    Identifier,
    Punctuation,
}

/// Recognizers in priority order; the first match wins.
pub const RECOGNIZERS: [Recognizer; 6] = [
    Recognizer::Comment,
    Recognizer::Number,
    Recognizer::CharLiteral,
    Recognizer::StringLiteral,
    Recognizer::Identifier,
    Recognizer::Punctuation,
];

/// Characters accepted by the punctuation recognizer.
pub const PUNCTUATION: &[char] = &[
    '[', ']', '(', ')', '{', '}', '+', '-', '/', '%', '*', '&', ',', ';', '=', '<', '>', '!', '~',
];

impl Recognizer {
    /// Try to recognize a token starting at `start`.
    pub fn scan(self, input: &[char], start: usize) -> ScanResult {
        match self {
            Recognizer::Comment => scan_comment(input, start),
            Recognizer::Number => scan_number(input, start),
            Recognizer::CharLiteral => scan_char(input, start),
            Recognizer::StringLiteral => scan_string(input, start),
            Recognizer::Identifier => Ok(scan_identifier(input, start)),
            Recognizer::Punctuation => Ok(scan_punctuation(input, start)),
        }
    }
}

/// Lexer for C source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    resolver: PositionResolver,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            resolver: PositionResolver::new(input),
        }
    }

    pub fn resolver(&self) -> &PositionResolver {
        &self.resolver
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        self.position = 0;

        while self.position < self.input.len() {
            match self.next_token()? {
                Some(token) => {
                    self.position = token.end_offset();
                    tokens.push(token);
                }
                None => {
                    if !self.input[self.position].is_whitespace() {
                        return Err(self.error(LexErrorKind::UnknownCharacter, self.position));
                    }
                    self.position += 1;
                }
            }
        }

        Ok(tokens)
    }

    /// Run the recognizers at the current position.
    fn next_token(&self) -> Result<Option<Token>, LexError> {
        let start = self.position;
        for recognizer in RECOGNIZERS {
            match recognizer.scan(&self.input, start) {
                Ok(Some(scan)) => return self.make_token(start, scan).map(Some),
                Ok(None) => continue,
                Err(kind) => return Err(self.error(kind, start)),
            }
        }
        Ok(None)
    }

    fn make_token(&self, start: usize, scan: Scan) -> Result<Token, LexError> {
        let text: String = self.input[start..=scan.end].iter().collect();
        let span = self.resolver.resolve_pair(start, scan.end)?;
        Ok(Token::new(text, span, scan.kind, start))
    }

    fn error(&self, kind: LexErrorKind, offset: usize) -> LexError {
        match self.resolver.format_error(kind.template(), &[offset]) {
            Ok(diagnostic) => LexError::Syntax { kind, diagnostic },
            Err(out_of_range) => LexError::Position(out_of_range),
        }
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

// ===== Recognizers =====

fn at(input: &[char], idx: usize) -> Option<char> {
    input.get(idx).copied()
}

/// Advance from `idx` while `pred` holds; returns the first offset where it
/// does not.
fn skip_while(input: &[char], mut idx: usize, pred: impl Fn(char) -> bool) -> usize {
    while at(input, idx).is_some_and(&pred) {
        idx += 1;
    }
    idx
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// A letter, underscore or dot directly after a numeric literal.
fn is_bad_suffix(ch: Option<char>) -> bool {
    ch.is_some_and(|c| c.is_alphabetic() || c == '_' || c == '.')
}

fn scan_comment(input: &[char], start: usize) -> ScanResult {
    if at(input, start) != Some('/') {
        return Ok(None);
    }

    match at(input, start + 1) {
        Some('/') => {
            // the line feed belongs to the comment; at end of input the last
            // character closes it
            let newline = skip_while(input, start, |c| c != '\n');
            let end = newline.min(input.len() - 1);
            Ok(Some(Scan::new(TokenKind::Comment, end)))
        }
        Some('*') => {
            let mut idx = start + 2;
            while idx + 1 < input.len() && !(input[idx] == '*' && input[idx + 1] == '/') {
                idx += 1;
            }
            if idx + 1 >= input.len() {
                return Err(LexErrorKind::UnterminatedComment);
            }
            Ok(Some(Scan::new(TokenKind::Comment, idx + 1)))
        }
        _ => Ok(None),
    }
}

fn scan_number(input: &[char], start: usize) -> ScanResult {
    match at(input, start) {
        Some('.') => Ok(scan_dot_float(input, start)),
        Some('0') => scan_leading_zero(input, start),
        Some(ch) if is_digit(ch) => scan_decimal(input, start),
        _ => Ok(None),
    }
}

/// `.5`: a float with no integer part.
fn scan_dot_float(input: &[char], start: usize) -> Option<Scan> {
    if !at(input, start + 1).is_some_and(is_digit) {
        return None;
    }
    let end = skip_while(input, start + 1, is_digit);
    Some(Scan::new(TokenKind::FloatConst, end - 1))
}

/// `0`, `0b..`, `0x..`, octal runs and floats with a leading zero.
fn scan_leading_zero(input: &[char], start: usize) -> ScanResult {
    let Some(next) = at(input, start + 1) else {
        return Ok(Some(Scan::new(TokenKind::OctIntConst, start)));
    };

    match next {
        'b' => return scan_prefixed(input, start, RadixPrefix::Binary).map(Some),
        'x' => return scan_prefixed(input, start, RadixPrefix::Hex).map(Some),
        _ => {}
    }

    if is_octal_digit(next) {
        let end = skip_while(input, start + 1, is_octal_digit);
        let after = at(input, end);
        if after.is_some_and(|c| c.is_alphabetic() || c == '_') {
            return Err(LexErrorKind::OctalSuffix);
        }
        if !after.is_some_and(|c| c == '.' || is_digit(c)) {
            return Ok(Some(Scan::new(TokenKind::OctIntConst, end - 1)));
        }
        // 8, 9 or a dot later on: only a float can still make sense of it
    }

    let dot = skip_while(input, start + 1, is_digit);
    if at(input, dot) == Some('.') {
        let end = skip_while(input, dot + 1, is_digit);
        if is_bad_suffix(at(input, end)) {
            return Err(LexErrorKind::FloatSuffix);
        }
        return Ok(Some(Scan::new(TokenKind::FloatConst, end - 1)));
    }

    // digits that were not a valid octal run, or a letter right after the zero
    if dot > start + 1 || at(input, dot).is_some_and(char::is_alphanumeric) {
        return Err(LexErrorKind::InvalidNumber);
    }

    Ok(Some(Scan::new(TokenKind::OctIntConst, start)))
}

#[derive(Debug, Clone, Copy)]
enum RadixPrefix {
    Binary,
    Hex,
}

impl RadixPrefix {
    fn accepts(self, ch: char) -> bool {
        match self {
            RadixPrefix::Binary => is_binary_digit(ch),
            RadixPrefix::Hex => ch.is_ascii_hexdigit(),
        }
    }

    fn kind(self) -> TokenKind {
        match self {
            RadixPrefix::Binary => TokenKind::BinIntConst,
            RadixPrefix::Hex => TokenKind::HexIntConst,
        }
    }

    fn missing_digits(self) -> LexErrorKind {
        match self {
            RadixPrefix::Binary => LexErrorKind::InvalidBinary,
            RadixPrefix::Hex => LexErrorKind::InvalidHex,
        }
    }

    fn bad_suffix(self) -> LexErrorKind {
        match self {
            RadixPrefix::Binary => LexErrorKind::BinarySuffix,
            RadixPrefix::Hex => LexErrorKind::HexSuffix,
        }
    }

    fn rejects_suffix(self, ch: Option<char>) -> bool {
        match self {
            // a stray decimal digit such as `0b012` is also rejected
            RadixPrefix::Binary => ch.is_some_and(|c| is_ident_char(c) || c == '.'),
            RadixPrefix::Hex => is_bad_suffix(ch),
        }
    }
}

fn scan_prefixed(input: &[char], start: usize, prefix: RadixPrefix) -> Result<Scan, LexErrorKind> {
    let digits = start + 2;
    if !at(input, digits).is_some_and(|c| prefix.accepts(c)) {
        return Err(prefix.missing_digits());
    }
    let end = skip_while(input, digits, |c| prefix.accepts(c));
    if prefix.rejects_suffix(at(input, end)) {
        return Err(prefix.bad_suffix());
    }
    Ok(Scan::new(prefix.kind(), end - 1))
}

fn scan_decimal(input: &[char], start: usize) -> ScanResult {
    let end = skip_while(input, start, is_digit);

    if at(input, end) == Some('.') {
        let end = skip_while(input, end + 1, is_digit);
        if is_bad_suffix(at(input, end)) {
            return Err(LexErrorKind::FloatSuffix);
        }
        return Ok(Some(Scan::new(TokenKind::FloatConst, end - 1)));
    }

    if is_bad_suffix(at(input, end)) {
        return Err(LexErrorKind::InvalidNumber);
    }
    Ok(Some(Scan::new(TokenKind::DecIntConst, end - 1)))
}

fn scan_char(input: &[char], start: usize) -> ScanResult {
    if at(input, start) != Some('\'') {
        return Ok(None);
    }
    if at(input, start + 2) != Some('\'') {
        return Err(LexErrorKind::InvalidChar);
    }
    Ok(Some(Scan::new(TokenKind::CharConst, start + 2)))
}

fn scan_string(input: &[char], start: usize) -> ScanResult {
    if at(input, start) != Some('"') {
        return Ok(None);
    }

    let mut idx = start + 1;
    while let Some(ch) = at(input, idx) {
        match ch {
            '"' => return Ok(Some(Scan::new(TokenKind::StringConst, idx))),
            '\\' => idx += 2,
            _ => idx += 1,
        }
    }
    Err(LexErrorKind::UnterminatedString)
}

fn scan_identifier(input: &[char], start: usize) -> Option<Scan> {
    let first = at(input, start)?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }
    let end = skip_while(input, start, is_ident_char);
    Some(Scan::new(TokenKind::Identifier, end - 1))
}

fn scan_punctuation(input: &[char], start: usize) -> Option<Scan> {
    let ch = at(input, start)?;
    PUNCTUATION
        .contains(&ch)
        .then(|| Scan::new(TokenKind::Operator, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::position::Position;

    fn chars(source: &str) -> Vec<char> {
        source.chars().collect()
    }

    fn scan(recognizer: Recognizer, source: &str) -> ScanResult {
        recognizer.scan(&chars(source), 0)
    }

    fn lex_error(source: &str) -> String {
        tokenize(source).unwrap_err().to_string()
    }

    fn single(source: &str) -> Token {
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens.len(), 1, "expected one token in {:?}: {:?}", source, tokens);
        tokens.into_iter().next().unwrap()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("int main() { return 0; }").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["int", "main", "(", ")", "{", "return", "0", ";", "}"]
        );
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].kind, TokenKind::Operator);
        assert_eq!(tokens[6].kind, TokenKind::OctIntConst);
    }

    #[test]
    fn test_single_line_comment() {
        let token = single("// test_comment");
        assert_eq!(token.kind, TokenKind::Comment);
        assert_eq!(token.span.start, Position::new(1, 1));
        assert_eq!(token.span.end, Position::new(1, 15));

        let token = single("// test_comment\n");
        assert_eq!(token.text, "// test_comment\n");
        assert_eq!(token.span.end, Position::new(1, 16));

        assert_eq!(scan(Recognizer::Comment, "/\n"), Ok(None));
    }

    #[test]
    fn test_multiline_comment() {
        assert_eq!(lex_error("/* test_comment"), "Multiline comment was never closed 1:1");
        assert_eq!(lex_error("/* test_comment *"), "Multiline comment was never closed 1:1");
        assert_eq!(lex_error("/*/"), "Multiline comment was never closed 1:1");

        assert_eq!(
            scan(Recognizer::Comment, "/* test_comment */dfdfsaf"),
            Ok(Some(Scan::new(TokenKind::Comment, 17)))
        );

        let token = single("/* test_comment \n test_comment_part_2*/");
        assert_eq!(token.span.start, Position::new(1, 1));
        assert_eq!(token.span.end, Position::new(2, 22));
    }

    #[test]
    fn test_binary_numbers() {
        assert_eq!(lex_error("0b"), "Invelid binary number at 1:1");
        assert_eq!(single("0b01").kind, TokenKind::BinIntConst);
        assert_eq!(single("0b01 ").span.end, Position::new(1, 4));
        assert_eq!(lex_error("0b02"), "Binary number at 1:1 is followed by invalid symbol");
        assert_eq!(lex_error("0b1.0"), "Binary number at 1:1 is followed by invalid symbol");
    }

    #[test]
    fn test_octal_numbers() {
        assert_eq!(single("0").kind, TokenKind::OctIntConst);
        assert_eq!(single("0 ").text, "0");
        assert_eq!(single("00").kind, TokenKind::OctIntConst);
        assert_eq!(single("01234567").span.end, Position::new(1, 8));
        assert_eq!(lex_error("08"), "Invalid number defenition at 1:1");
        assert_eq!(lex_error("0778"), "Invalid number defenition at 1:1");
        assert_eq!(lex_error("08 "), "Invalid number defenition at 1:1");
        assert_eq!(lex_error("017u"), "Octal number at 1:1 is followed by invalid symbol");
        assert_eq!(lex_error("0a"), "Invalid number defenition at 1:1");
    }

    #[test]
    fn test_zero_before_punctuation() {
        let tokens = tokenize("0;").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::OctIntConst);
        assert!(tokens[1].is_punct(';'));
    }

    #[test]
    fn test_hex_numbers() {
        assert_eq!(lex_error("0x"), "Invelid hex number at 1:1");
        assert_eq!(single("0x0").kind, TokenKind::HexIntConst);
        assert_eq!(single("0xABCDEF").span.end, Position::new(1, 8));
        assert_eq!(single("0xabcdef").kind, TokenKind::HexIntConst);
        assert_eq!(lex_error("0x1H"), "Hex number at 1:1 is followed by invalid symbol");
    }

    #[test]
    fn test_float_numbers() {
        assert_eq!(single("0.").kind, TokenKind::FloatConst);
        assert_eq!(single("0.1").kind, TokenKind::FloatConst);
        assert_eq!(single(".1").kind, TokenKind::FloatConst);
        assert_eq!(single("07.5").kind, TokenKind::FloatConst);

        let token = single("0123456789.0123456789");
        assert_eq!(token.kind, TokenKind::FloatConst);
        assert_eq!(token.span.end, Position::new(1, 21));

        assert_eq!(lex_error("0.a"), "Float number at 1:1 is followed by invalid symbol");
        assert_eq!(lex_error("1.a"), "Float number at 1:1 is followed by invalid symbol");
        assert_eq!(lex_error("1.5.3"), "Float number at 1:1 is followed by invalid symbol");

        let token = single("123456789.0123456789");
        assert_eq!(token.span.end, Position::new(1, 20));
    }

    #[test]
    fn test_lone_dot_is_rejected() {
        assert_eq!(lex_error("a . b"), "Syntax error at 1:3 (can't determen token)");
    }

    #[test]
    fn test_digits_are_ascii_only() {
        // ARABIC-INDIC DIGIT ONE is a Unicode digit but not a C digit
        assert_eq!(lex_error("\u{0661}"), "Syntax error at 1:1 (can't determen token)");
        assert_eq!(lex_error("1\u{0661}"), "Syntax error at 1:2 (can't determen token)");
    }

    #[test]
    fn test_decimal_numbers() {
        assert_eq!(lex_error("12l"), "Invalid number defenition at 1:1");
        assert_eq!(lex_error("12_"), "Invalid number defenition at 1:1");
        let token = single("123456789");
        assert_eq!(token.kind, TokenKind::DecIntConst);
        assert_eq!(token.span.end, Position::new(1, 9));
    }

    #[test]
    fn test_char_literal() {
        let token = single("'h'");
        assert_eq!(token.kind, TokenKind::CharConst);
        assert_eq!(token.span.end, Position::new(1, 3));
        assert_eq!(lex_error("'ha"), "Invalid char const defenetion at 1:1");
        assert_eq!(lex_error("'h"), "Invalid char const defenetion at 1:1");
    }

    #[test]
    fn test_string_literal() {
        let token = single("\"ha\"");
        assert_eq!(token.kind, TokenKind::StringConst);
        assert_eq!(token.span.end, Position::new(1, 4));
        assert_eq!(lex_error("\"ha"), "String at 1:1 wath never closed");
    }

    #[test]
    fn test_string_with_escaped_quote() {
        let token = single(r#""say \"hi\"""#);
        assert_eq!(token.text, r#""say \"hi\"""#);
        assert_eq!(lex_error(r#""trailing \""#), "String at 1:1 wath never closed");
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(single("test").span.end, Position::new(1, 4));
        assert_eq!(single("_est").kind, TokenKind::Identifier);
        assert_eq!(scan(Recognizer::Identifier, ".est"), Ok(None));
        assert_eq!(single("t1_3_5").text, "t1_3_5");
    }

    #[test]
    fn test_punctuation() {
        let tokens = tokenize("[](){}+-/%*&,;=<>!~").unwrap();
        assert_eq!(tokens.len(), PUNCTUATION.len());
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Operator));
        assert_eq!(lex_error("a # b"), "Syntax error at 1:3 (can't determen token)");
    }

    #[test]
    fn test_comment_wins_over_slash() {
        let tokens = tokenize("a / b // c").unwrap();
        assert_eq!(tokens.len(), 4);
        assert!(tokens[1].is_punct('/'));
        assert_eq!(tokens[3].kind, TokenKind::Comment);
    }

    #[test]
    fn test_positions_across_lines() {
        let tokens = tokenize("int x;\n  float y;").unwrap();
        let float = &tokens[3];
        assert_eq!(float.text, "float");
        assert_eq!(float.offset, 9);
        assert_eq!(float.span.start, Position::new(2, 3));
        assert_eq!(float.span.end, Position::new(2, 7));
    }

    #[test]
    fn test_error_on_later_line() {
        assert_eq!(lex_error("int x;\nint y = 0x;"), "Invelid hex number at 2:9");
    }

    #[test]
    fn test_error_kind() {
        let err = tokenize("\"open").unwrap_err();
        assert_eq!(err.kind(), Some(LexErrorKind::UnterminatedString));
        assert_eq!(
            err.diagnostic().and_then(Diagnostic::primary_position),
            Some(Position::new(1, 1))
        );
    }
}
