//! Source position tracking
//!
//! Tokens and diagnostics refer to the source through flat character offsets
//! while the lexer runs. [`PositionResolver`] turns those offsets into the
//! 1-based `line:column` pairs that every token span and error message carries.
//!
//! Lines are counted by splitting strictly on `'\n'`, so a `'\r'` before the
//! line feed counts as an ordinary column.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A resolved source location, 1-based on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start and end positions of a token or node; both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a span running from the start of `self` to the end of `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start, other.end)
    }

    /// Returns true if `position` falls inside this span.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Raised when an offset points past the end of the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("offset {offset} is outside of the source ({total} characters)")]
pub struct OutOfRange {
    pub offset: usize,
    pub total: usize,
}

/// A message template plus the positions substituted into its `{}` slots.
///
/// This is the single rendering path for lexer and parser errors: the
/// template is stored verbatim and positions are rendered as `line:column`
/// only when the diagnostic is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub template: String,
    pub positions: Vec<Position>,
}

impl Diagnostic {
    pub fn new(template: impl Into<String>, positions: Vec<Position>) -> Self {
        Self {
            template: template.into(),
            positions,
        }
    }

    /// The first cited position, if any.
    pub fn primary_position(&self) -> Option<Position> {
        self.positions.first().copied()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, piece) in self.template.split("{}").enumerate() {
            if idx > 0 {
                match self.positions.get(idx - 1) {
                    Some(position) => write!(f, "{}", position)?,
                    None => f.write_str("{}")?,
                }
            }
            f.write_str(piece)?;
        }
        Ok(())
    }
}

/// Converts flat character offsets into [`Position`]s.
#[derive(Debug, Clone)]
pub struct PositionResolver {
    line_lengths: Vec<usize>,
    total: usize,
}

impl PositionResolver {
    pub fn new(source: &str) -> Self {
        // every line accounts for the line feed that ended it, the last one included
        let line_lengths: Vec<usize> = source
            .split('\n')
            .map(|line| line.chars().count() + 1)
            .collect();
        let total = line_lengths.iter().sum();
        Self {
            line_lengths,
            total,
        }
    }

    /// Total length covered by the line table.
    pub fn total_len(&self) -> usize {
        self.total
    }

    pub fn line_count(&self) -> usize {
        self.line_lengths.len()
    }

    /// Resolve a single offset.
    pub fn resolve(&self, offset: usize) -> Result<Position, OutOfRange> {
        if offset > self.total {
            return Err(OutOfRange {
                offset,
                total: self.total,
            });
        }

        let mut remaining = offset;
        let mut line_index = 0;
        for &length in &self.line_lengths {
            if remaining < length {
                break;
            }
            remaining -= length;
            line_index += 1;
        }

        Ok(Position::new(line_index + 1, remaining + 1))
    }

    /// Resolve both ends of an inclusive offset range.
    pub fn resolve_pair(&self, start: usize, end: usize) -> Result<Span, OutOfRange> {
        Ok(Span::new(self.resolve(start)?, self.resolve(end)?))
    }

    /// Build a [`Diagnostic`] citing each offset in `offsets`, in order.
    pub fn format_error(
        &self,
        template: impl Into<String>,
        offsets: &[usize],
    ) -> Result<Diagnostic, OutOfRange> {
        let positions = offsets
            .iter()
            .map(|&offset| self.resolve(offset))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Diagnostic::new(template, positions))
    }
}
