//! Token listing pane

use crate::parser::Token;
use crate::ui::panes::{follow, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the token list pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tokens ", is_focused);

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let height = visible_height(area);
    follow(scroll_offset, selected.unwrap_or(0), height, tokens.len());

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(height)
        .map(|(idx, token)| {
            let is_selected = selected == Some(idx);
            let marker = if is_selected { "▶ " } else { "  " };
            let line = Line::from(vec![
                Span::styled(
                    format!("{}{:4} ", marker, idx),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format!("{:?}", token.text), DEFAULT_THEME.token_style(token.kind)),
                Span::styled(
                    format!(" {} {}", token.kind, token.span),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]);

            let item = ListItem::new(line);
            if is_selected {
                item.style(
                    Style::default()
                        .bg(DEFAULT_THEME.selection_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
