//! TUI screen components
//!
//! Contains individual screen implementations for the application states.
//! Screens own only presentation state (selection, open pickers); the record
//! and estimate live in the state manager and are passed in for rendering.

pub mod analyzing;
pub mod input;
pub mod results;
pub mod welcome;

pub use analyzing::AnalyzingScreen;
pub use input::{InputAction, InputScreen};
pub use results::{ResultAction, ResultsScreen};
pub use welcome::WelcomeScreen;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Key hint line such as "Enter Select  Esc Back"
pub(crate) fn help_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, label)) in hints.iter().enumerate() {
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        let sep = if i + 1 < hints.len() { "  " } else { "" };
        spans.push(Span::raw(format!(" {}{}", label, sep)));
    }
    Line::from(spans)
}

/// Rectangle of `percent_x` width and fixed `height`, centered in `r`
pub(crate) fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
