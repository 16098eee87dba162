//! Source pane rendering with token-kind highlighting
//!
//! Every character covered by a token takes the color of the token's kind;
//! type keywords from the active profile get their own color. The selected
//! token is drawn on the selection background and the view scrolls to keep
//! its first line visible.

use crate::parser::{LanguageProfile, Token};
use crate::ui::panes::{follow, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Everything the source pane draws from
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    pub tokens: &'a [Token],
    /// Token index covering each character offset
    pub char_tokens: &'a [Option<usize>],
    pub selected: Option<usize>,
    pub profile: &'a LanguageProfile,
}

impl SourceRenderData<'_> {
    fn style_at(&self, offset: usize) -> Style {
        let Some(idx) = self.char_tokens.get(offset).copied().flatten() else {
            return Style::default().fg(DEFAULT_THEME.fg);
        };
        let token = &self.tokens[idx];

        let style = if token.is_identifier() && self.profile.is_type_keyword(&token.text) {
            Style::default().fg(DEFAULT_THEME.type_name)
        } else {
            DEFAULT_THEME.token_style(token.kind)
        };

        if self.selected == Some(idx) {
            style
                .bg(DEFAULT_THEME.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Styled spans for one line whose first character sits at `offset`.
    fn highlight_line(&self, line: &str, offset: usize) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        let mut run = String::new();
        let mut run_style = Style::default();

        for (i, ch) in line.chars().enumerate() {
            let style = self.style_at(offset + i);
            if style != run_style && !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            run_style = style;
            run.push(ch);
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, run_style));
        }
        spans
    }
}

/// Map every character offset of `source_code` to the token covering it.
pub fn token_map(source_code: &str, tokens: &[Token]) -> Vec<Option<usize>> {
    let mut map = vec![None; source_code.chars().count()];
    for (idx, token) in tokens.iter().enumerate() {
        for offset in token.offset..token.end_offset().min(map.len()) {
            map[offset] = Some(idx);
        }
    }
    map
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: &SourceRenderData<'_>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Source Code ", is_focused);

    let lines: Vec<&str> = data.source_code.split('\n').collect();
    let mut line_offsets = Vec::with_capacity(lines.len());
    let mut offset = 0;
    for line in &lines {
        line_offsets.push(offset);
        offset += line.chars().count() + 1;
    }

    let height = visible_height(area);
    let selected_line = data
        .selected
        .and_then(|idx| data.tokens.get(idx))
        .map(|token| token.span.start.line.saturating_sub(1))
        .unwrap_or(0);
    follow(scroll_offset, selected_line, height, lines.len());

    let visible_lines: Vec<Line> = lines
        .iter()
        .zip(line_offsets)
        .enumerate()
        .skip(*scroll_offset)
        .take(height)
        .map(|(idx, (line, offset))| {
            let line_num = idx + 1;
            let num_style = if line_num == selected_line + 1 && data.selected.is_some() {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(data.highlight_line(line, offset));
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
