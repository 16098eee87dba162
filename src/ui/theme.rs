use crate::parser::TokenKind;
use ratatui::style::{Color, Style};

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub selection_bg: Color,
    pub function: Color,
    pub type_name: Color, // Cyan for type keywords
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    string: Color::Rgb(250, 179, 135),         // Orange for strings
    number: Color::Rgb(245, 194, 231),         // Pink for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for status bar
    selection_bg: Color::Rgb(69, 71, 90),
    function: Color::Rgb(249, 226, 175), // Yellow for functions
    type_name: Color::Rgb(148, 226, 213),
};

impl Theme {
    /// Foreground style for a token of `kind`.
    pub fn token_style(&self, kind: TokenKind) -> Style {
        let color = match kind {
            TokenKind::Identifier => self.fg,
            TokenKind::Operator => self.primary,
            TokenKind::Comment => self.comment,
            TokenKind::StringConst | TokenKind::CharConst => self.string,
            TokenKind::FloatConst
            | TokenKind::DecIntConst
            | TokenKind::HexIntConst
            | TokenKind::OctIntConst
            | TokenKind::BinIntConst => self.number,
        };
        Style::default().fg(color)
    }
}
