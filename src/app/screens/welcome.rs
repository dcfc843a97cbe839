//! Welcome screen implementation
//!
//! Landing page with the product title, the feature overview and a single
//! start action.

use super::help_line;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Feature cards shown on the landing page: (title, description, accent)
const FEATURES: [(&str, &str, Color); 6] = [
    (
        "Director & Cast Analysis",
        "Analyze the impact of directors and star actors on box office performance",
        Color::Yellow,
    ),
    (
        "Budget Optimization",
        "Understand how budget allocation affects revenue potential and ROI",
        Color::Green,
    ),
    (
        "Critical Score Impact",
        "Measure how critical reception translates to commercial success",
        Color::Magenta,
    ),
    (
        "Runtime Optimization",
        "Discover the optimal movie length for maximum audience engagement",
        Color::Blue,
    ),
    (
        "Global Market Analysis",
        "Analyze international market potential and regional preferences",
        Color::LightBlue,
    ),
    (
        "Genre & Rating Intelligence",
        "Leverage genre trends and rating impacts for strategic positioning",
        Color::LightRed,
    ),
];

/// Welcome screen component
#[derive(Debug, Default)]
pub struct WelcomeScreen;

impl WelcomeScreen {
    /// Create a new welcome screen
    pub fn new() -> Self {
        Self
    }

    /// Render the welcome screen
    pub fn render(&self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Min(10),   // Feature grid
                Constraint::Length(3), // Start button
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_features(f, chunks[1]);
        self.render_start_button(f, chunks[2]);
        self.render_help(f, chunks[3]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "NeuroCinema",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(" BETA ", Style::default().fg(Color::White).bg(Color::Red)),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        f.render_widget(title, title_chunks[0]);

        let subtitle = Paragraph::new("Revenue Prediction - predict your movie's box office performance")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    fn render_features(&self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for (row_index, row) in rows.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                ])
                .split(*row);

            for (col_index, cell) in cells.iter().enumerate() {
                let (title, description, accent) = FEATURES[row_index * 3 + col_index];
                let card = Paragraph::new(description)
                    .style(Style::default().fg(Color::Gray))
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(accent))
                            .title(Span::styled(
                                title,
                                Style::default().fg(accent).add_modifier(Modifier::BOLD),
                            )),
                    );
                f.render_widget(card, *cell);
            }
        }
    }

    fn render_start_button(&self, f: &mut Frame, area: Rect) {
        let button_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(32),
                Constraint::Min(0),
            ])
            .split(area)[1];

        let button = Paragraph::new("▶ Start Prediction Analysis")
            .style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        f.render_widget(button, button_area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help = Paragraph::new(help_line(&[("Enter", "Start"), ("Q", "Quit")]))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

        f.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::test_support::render_to_string;

    #[test]
    fn test_welcome_renders_title_and_start() {
        let screen = WelcomeScreen::new();
        let text = render_to_string(120, 30, |f| screen.render(f));

        assert!(text.contains("NeuroCinema"));
        assert!(text.contains("Start Prediction Analysis"));
        assert!(text.contains("Budget Optimization"));
        assert!(text.contains("Genre & Rating Intelligence"));
    }
}
