//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text colored by token kind, with the selected token
//!   highlighted
//! - [`tokens`]: Token listing with the selection
//! - [`declarations`]: Declaration outlines, marking the one enclosing the
//!   selected token
//! - [`status`]: Status bar with keybindings and the selection index
//!
//! Each pane module exports a primary `render_*` function. Panes that scroll
//! take their offset by `&mut` and keep the selection in view.

pub mod declarations;
pub mod source;
pub mod status;
pub mod tokens;

pub use declarations::render_declarations_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focused/normal border style.
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane, at least one.
pub(crate) fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Adjust `offset` so that row `selected` is inside a window of `height` rows
/// over `total` rows.
pub(crate) fn follow(offset: &mut usize, selected: usize, height: usize, total: usize) {
    if selected < *offset {
        *offset = selected;
    } else if selected >= *offset + height {
        *offset = selected + 1 - height;
    }

    if total > height {
        *offset = (*offset).min(total - height);
    } else {
        *offset = 0;
    }
}
