//! Main TUI application state and logic

use crate::parser::{parse_declarations, strip_comments, AstNode, LanguageProfile, Lexer, Token};
use crate::pipeline::FrontendError;
use crate::ui::panes::{self, source::SourceRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// How many tokens PgUp/PgDn move the selection
const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Declarations,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> declarations)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Declarations,
            FocusedPane::Declarations => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Declarations,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Declarations => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The source text being inspected
    pub source_code: String,

    pub profile: LanguageProfile,

    /// Every token, comments included; empty when lexing failed
    pub tokens: Vec<Token>,

    /// Token index covering each character offset of the source
    pub char_tokens: Vec<Option<usize>>,

    pub declarations: Vec<AstNode>,

    /// The failure that stopped lexing or parsing
    pub error: Option<FrontendError>,

    /// Index of the selected token
    pub selected: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub declarations_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Lex and parse `source_code` with `profile` and build the viewer state.
    ///
    /// A parse failure keeps the tokens browsable; a lex failure leaves
    /// nothing to browse but the message.
    pub fn new(source_code: String, profile: LanguageProfile) -> Self {
        let (tokens, declarations, error) = match Lexer::new(&source_code).tokenize() {
            Ok(tokens) => match parse_declarations(&strip_comments(&tokens), &profile) {
                Ok(declarations) => (tokens, declarations, None),
                Err(err) => (tokens, Vec::new(), Some(FrontendError::from(err))),
            },
            Err(err) => (Vec::new(), Vec::new(), Some(FrontendError::from(err))),
        };

        let status_message = match &error {
            Some(err) => format!("{} error: {}", err.stage(), err),
            None => format!(
                "{} tokens, {} declarations",
                tokens.len(),
                declarations.len()
            ),
        };
        let char_tokens = panes::source::token_map(&source_code, &tokens);

        App {
            source_code,
            profile,
            tokens,
            char_tokens,
            declarations,
            error,
            selected: 0,
            focused_pane: FocusedPane::Tokens,
            source_scroll: 0,
            tokens_scroll: 0,
            declarations_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// The selected token, if there are any tokens.
    pub fn selected_token(&self) -> Option<&Token> {
        self.tokens.get(self.selected)
    }

    /// Index of the declaration whose span holds the selected token.
    pub fn enclosing_declaration(&self) -> Option<usize> {
        let position = self.selected_token()?.span.start;
        self.declarations
            .iter()
            .position(|node| node.span().contains(position))
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Right column: Tokens (top) | Declarations (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let selected = self.selected_token().map(|_| self.selected);
        let enclosing = self.enclosing_declaration();

        let source = SourceRenderData {
            source_code: &self.source_code,
            tokens: &self.tokens,
            char_tokens: &self.char_tokens,
            selected,
            profile: &self.profile,
        };
        panes::render_source_pane(
            frame,
            columns[0],
            &source,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.tokens,
            selected,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        let error_text = self.error.as_ref().map(|err| err.to_string());
        panes::render_declarations_pane(
            frame,
            right_rows[1],
            &self.declarations,
            enclosing,
            error_text.as_deref(),
            self.focused_pane == FocusedPane::Declarations,
            &mut self.declarations_scroll,
        );

        panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            selected,
            self.tokens.len(),
            self.error.is_some(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(1),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(1),
            KeyCode::PageUp => self.select_prev(PAGE),
            KeyCode::PageDown => self.select_next(PAGE),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(self.tokens.len().saturating_sub(1)),
            _ => {}
        }
    }

    fn select_prev(&mut self, n: usize) {
        self.select(self.selected.saturating_sub(n));
    }

    fn select_next(&mut self, n: usize) {
        self.select(self.selected.saturating_add(n));
    }

    fn select(&mut self, idx: usize) {
        if self.tokens.is_empty() {
            return;
        }
        self.selected = idx.min(self.tokens.len() - 1);
        if self.error.is_none() {
            if let Some(token) = self.selected_token() {
                self.status_message = format!("{} at {}", token.kind, token.span.start);
            }
        }
    }
}
