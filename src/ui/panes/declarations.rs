//! Declaration outline pane

use crate::parser::AstNode;
use crate::printer::outline;
use crate::ui::panes::{follow, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the declarations pane.
///
/// `enclosing` is the index of the declaration whose span holds the selected
/// token. `error` replaces the list when parsing failed.
pub fn render_declarations_pane(
    frame: &mut Frame,
    area: Rect,
    declarations: &[AstNode],
    enclosing: Option<usize>,
    error: Option<&str>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Declarations ", is_focused);

    if let Some(message) = error {
        let paragraph = Paragraph::new(message.to_string())
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(DEFAULT_THEME.error));
        frame.render_widget(paragraph, area);
        return;
    }

    if declarations.is_empty() {
        let paragraph = Paragraph::new("(no declarations)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let height = visible_height(area);
    follow(scroll_offset, enclosing.unwrap_or(*scroll_offset), height, declarations.len());

    let items: Vec<ListItem> = declarations
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(height)
        .map(|(idx, node)| {
            let color = match node {
                AstNode::Function(_) => DEFAULT_THEME.function,
                _ => DEFAULT_THEME.fg,
            };
            if enclosing == Some(idx) {
                ListItem::new(format!("▶ {}", outline(node))).style(
                    Style::default()
                        .fg(color)
                        .bg(DEFAULT_THEME.selection_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ListItem::new(format!("  {}", outline(node))).style(Style::default().fg(color))
            }
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
