//! # Introduction
//!
//! cfront is the front end of a C-subset compiler. It turns source text into
//! position-tagged tokens and extracts top-level variable and function
//! declarations, reporting every failure as a `line:column` diagnostic.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → (drop comments) → DeclarationParser → AST
//! ```
//!
//! 1. [`parser`]: position resolution, the lexer, the declaration parser and
//!    the AST.
//! 2. [`pipeline`]: [`pipeline::analyze`] runs both stages over one source.
//! 3. [`printer`]: text and JSON renderings of tokens and declarations.
//! 4. [`ui`]: ratatui-based token and declaration viewer; not part of the
//!    stable library API.
//!
//! ## Supported C subset
//!
//! Tokens: identifiers, single-character punctuation, `//` and `/* */`
//! comments, string and character literals, decimal, octal, hex, binary and
//! float numbers.
//! Declarations: `type *name` variables and `type *name(params) { ... }`
//! functions or prototypes at top level.

pub mod parser;
pub mod pipeline;
pub mod printer;
pub mod ui;
