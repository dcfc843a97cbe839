//! Analyzing screen implementation
//!
//! Shown over the input screen while a submitted estimate is pending.
//! Progress is derived from elapsed time against the configured delay since
//! the estimate itself arrives in one piece.

use super::help_line;
use crate::util::format_duration;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use std::time::Duration;

/// Status lines revealed as the analysis progresses
const STEPS: [&str; 4] = [
    "Reading movie details",
    "Weighing budget and critical score",
    "Applying genre trends",
    "Projecting box office revenue",
];

/// Analyzing screen component
#[derive(Debug)]
pub struct AnalyzingScreen {
    delay: Duration,
}

impl AnalyzingScreen {
    /// Create a screen that expects the estimate after `delay`
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Render the analyzing screen for a movie titled `title`
    pub fn render(&self, f: &mut Frame, elapsed: Duration, title: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Progress bar
                Constraint::Min(6),    // Steps
                Constraint::Length(3), // Help text
            ])
            .split(f.size());

        let heading = Paragraph::new(format!("Analyzing \"{}\"", title))
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        f.render_widget(heading, chunks[0]);

        let ratio = progress_ratio(elapsed, self.delay);
        self.render_progress(f, chunks[1], ratio, elapsed);
        self.render_steps(f, chunks[2], ratio);

        let help = Paragraph::new(help_line(&[("Esc", "Back to Home"), ("Ctrl+C", "Quit")]))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(help, chunks[3]);
    }

    fn render_progress(&self, f: &mut Frame, area: Rect, ratio: f64, elapsed: Duration) {
        let label = format!(
            "{}% | Elapsed: {}",
            (ratio * 100.0) as u16,
            format_duration(elapsed.min(self.delay))
        );
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title("Analyzing")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .gauge_style(Style::default().fg(Color::Red))
            .ratio(ratio)
            .label(label);
        f.render_widget(gauge, area);
    }

    fn render_steps(&self, f: &mut Frame, area: Rect, ratio: f64) {
        let reached = ((ratio * STEPS.len() as f64) as usize).min(STEPS.len() - 1);
        let lines: Vec<Line> = STEPS
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let (marker, style) = if i < reached {
                    ("✓ ", Style::default().fg(Color::Green))
                } else if i == reached {
                    ("… ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                } else {
                    ("  ", Style::default().fg(Color::DarkGray))
                };
                Line::from(vec![Span::styled(marker, style), Span::styled(*step, style)])
            })
            .collect();

        let steps = Paragraph::new(lines).block(
            Block::default()
                .title("Status")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(steps, area);
    }
}

/// Fraction of `delay` covered by `elapsed`, clamped to 0.0..=1.0
pub fn progress_ratio(elapsed: Duration, delay: Duration) -> f64 {
    if delay.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / delay.as_secs_f64()).clamp(0.0, 1.0)
}
