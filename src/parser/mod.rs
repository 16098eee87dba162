//! C source code front end
//!
//! This module transforms C source text into tokens and declaration nodes:
//! - [`position`]: offset → `line:column` resolution and diagnostics
//! - [`token`]: token shapes shared by every stage
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: the declaration parser (tokens → AST), with the declaration
//!   shapes themselves in `declarations`
//! - [`profile`]: type keywords and bracket pairs the parser consults
//! - [`ast`]: AST node definitions
//!
//! # Supported C Subset
//!
//! The lexer accepts identifiers, single-character punctuation, comments,
//! string and character literals and five numeric literal formats. The
//! parser only extracts top-level variable and function declarations; bodies
//! are scanned for structure (brackets, nested functions) but their
//! statements are not modelled yet.
//!
//! # Parser Implementation
//!
//! Hand-written recognizers for the lexer and a recursive, bracket-scoped walk
//! for the parser. No external parser generator dependencies.

pub mod ast;
mod declarations;
pub mod lexer;
pub mod parse;
pub mod position;
pub mod profile;
pub mod token;

pub use ast::{AstNode, Function, TypeDescriptor, Variable};
pub use lexer::{tokenize, LexError, LexErrorKind, Lexer};
pub use parse::{parse_declarations, DeclarationParser, ParseError, ParseErrorKind, Scope};
pub use position::{Diagnostic, OutOfRange, Position, PositionResolver, Span};
pub use profile::LanguageProfile;
pub use token::{strip_comments, Token, TokenKind};
