//! Results screen implementation
//!
//! Displays the predicted gross, the revenue bucket badge and a summary of
//! the submitted movie, with actions to start over or leave.

use super::help_line;
use crate::models::{Estimate, MovieRecord, RecordField, RevenueBucket};
use crate::util::{format_compact_currency, format_currency};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

/// Available actions on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    NewPrediction,
    Exit,
}

impl ResultAction {
    /// Get all available actions
    pub fn all() -> Vec<Self> {
        vec![Self::NewPrediction, Self::Exit]
    }

    /// Get display text for the action
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::NewPrediction => "New Prediction",
            Self::Exit => "Exit",
        }
    }
}

/// Results screen component
#[derive(Debug)]
pub struct ResultsScreen {
    selected_action: ResultAction,
}

impl ResultsScreen {
    /// Create a new results screen
    pub fn new() -> Self {
        Self {
            selected_action: ResultAction::NewPrediction,
        }
    }

    /// Get selected action
    pub fn selected_action(&self) -> ResultAction {
        self.selected_action
    }

    /// Select next action
    pub fn select_next_action(&mut self) {
        let actions = ResultAction::all();
        let current_index = actions
            .iter()
            .position(|a| *a == self.selected_action)
            .unwrap_or(0);
        self.selected_action = actions[(current_index + 1) % actions.len()];
    }

    /// Select previous action
    pub fn select_previous_action(&mut self) {
        let actions = ResultAction::all();
        let current_index = actions
            .iter()
            .position(|a| *a == self.selected_action)
            .unwrap_or(0);
        let prev_index = if current_index == 0 {
            actions.len() - 1
        } else {
            current_index - 1
        };
        self.selected_action = actions[prev_index];
    }

    /// Go back to the default action
    pub fn reset(&mut self) {
        self.selected_action = ResultAction::NewPrediction;
    }

    /// Render the results screen
    pub fn render(&self, f: &mut Frame, record: &MovieRecord, estimate: Option<&Estimate>) {
        let size = f.size();

        let Some(estimate) = estimate else {
            self.render_no_results(f, size);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(7), // Prediction
                Constraint::Min(8),    // Movie summary
                Constraint::Length(3), // Actions
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0], record);
        self.render_prediction(f, chunks[1], estimate);
        self.render_summary(f, chunks[2], record);
        self.render_actions(f, chunks[3]);
        self.render_help(f, chunks[4]);
    }

    fn render_no_results(&self, f: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from("No prediction available"),
            Line::from(""),
            Line::from("Fill in the movie details to generate one."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to start over",
                Style::default().fg(Color::Yellow),
            )),
        ];

        let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .title("Results")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(paragraph, area);
    }

    fn render_title(&self, f: &mut Frame, area: Rect, record: &MovieRecord) {
        let title = Paragraph::new(format!("Prediction Results: {}", record.name))
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        f.render_widget(title, area);
    }

    fn render_prediction(&self, f: &mut Frame, area: Rect, estimate: &Estimate) {
        let accent = bucket_color(estimate.bucket);
        let lines = vec![
            Line::from(Span::styled(
                "Predicted Worldwide Gross",
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format_currency(estimate.gross),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    format!(" {} ", estimate.label()),
                    Style::default()
                        .fg(Color::Black)
                        .bg(accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("≈ {}", format_compact_currency(estimate.gross)),
                    Style::default().fg(accent),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    "Generated {}",
                    estimate.generated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let prediction = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .title("Box Office Prediction")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent)),
        );
        f.render_widget(prediction, area);
    }

    fn render_summary(&self, f: &mut Frame, area: Rect, record: &MovieRecord) {
        let rows: Vec<Row> = RecordField::ALL
            .iter()
            .filter(|field| !record.get(**field).is_empty())
            .map(|field| {
                Row::new(vec![
                    format!("{}:", field.label()),
                    record.get(*field).to_string(),
                ])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(20)])
            .block(
                Block::default()
                    .title("Movie Summary")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .column_spacing(2);
        f.render_widget(table, area);
    }

    fn render_actions(&self, f: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, action) in ResultAction::all().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("    "));
            }
            let style = if *action == self.selected_action {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(format!(" {} ", action.display_text()), style));
        }

        let actions = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(actions, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help = Paragraph::new(help_line(&[
            ("←→", "Choose"),
            ("Enter", "Confirm"),
            ("Esc", "New Prediction"),
            ("Q", "Quit"),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(help, area);
    }
}

impl Default for ResultsScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal color for a bucket's badge
fn bucket_color(bucket: RevenueBucket) -> Color {
    match bucket.tag().color {
        "orange" => Color::Rgb(249, 115, 22),
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "indigo" => Color::Rgb(99, 102, 241),
        "purple" => Color::Magenta,
        "green" => Color::Green,
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::test_support::render_to_string;

    #[test]
    fn test_action_selection_wraps() {
        let mut screen = ResultsScreen::new();
        assert_eq!(screen.selected_action(), ResultAction::NewPrediction);

        screen.select_next_action();
        assert_eq!(screen.selected_action(), ResultAction::Exit);
        screen.select_next_action();
        assert_eq!(screen.selected_action(), ResultAction::NewPrediction);

        screen.select_previous_action();
        assert_eq!(screen.selected_action(), ResultAction::Exit);

        screen.reset();
        assert_eq!(screen.selected_action(), ResultAction::NewPrediction);
    }

    #[test]
    fn test_every_bucket_has_a_color() {
        let buckets = [
            RevenueBucket::Low,
            RevenueBucket::MediumLow,
            RevenueBucket::Medium,
            RevenueBucket::MediumHigh,
            RevenueBucket::High,
            RevenueBucket::UltraHigh,
        ];
        for bucket in buckets {
            assert_ne!(bucket_color(bucket), Color::White, "{:?}", bucket);
        }
    }

    #[test]
    fn test_render_without_estimate() {
        let screen = ResultsScreen::new();
        let text = render_to_string(100, 24, |f| screen.render(f, &MovieRecord::new(), None));
        assert!(text.contains("No prediction available"));
    }

    #[test]
    fn test_render_shows_gross_and_bucket() {
        let screen = ResultsScreen::new();
        let record = MovieRecord::new()
            .with(RecordField::Name, "Heat")
            .with(RecordField::Genre, "Crime Drama");
        let estimate = Estimate::new(24_300_000.0);

        let text = render_to_string(100, 30, |f| screen.render(f, &record, Some(&estimate)));
        assert!(text.contains("Prediction Results: Heat"));
        assert!(text.contains("$24,300,000"));
        assert!(text.contains("Medium-Low Revenue"));
        assert!(text.contains("Crime Drama"));
        assert!(text.contains("New Prediction"));
        assert!(text.contains("Exit"));
    }
}
