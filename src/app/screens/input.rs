//! Input screen implementation
//!
//! Form for the movie details. Typing edits the highlighted field, the
//! rating field opens a picker, and the last row is the submit button which
//! stays disabled until every required field has a value.

use super::{centered_rect, help_line};
use crate::models::{MovieRecord, RecordField, RATING_OPTIONS};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

/// Number of selectable rows: every field plus the submit button
const ROW_COUNT: usize = RecordField::ALL.len() + 1;
const SUBMIT_ROW: usize = RecordField::ALL.len();
/// Fields per form column
const COLUMN_LEN: usize = 7;

/// What the user asked for on the input screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// New value for a field
    Edit(RecordField, String),
    /// Generate the prediction
    Submit,
    /// Back to the welcome screen
    Back,
}

/// Input screen component
#[derive(Debug)]
pub struct InputScreen {
    selected_row: usize,
    rating_picker: ListState,
    is_picker_active: bool,
}

impl InputScreen {
    /// Create a new input screen with the first field selected
    pub fn new() -> Self {
        Self {
            selected_row: 0,
            rating_picker: ListState::default(),
            is_picker_active: false,
        }
    }

    /// Return to the initial selection
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Field under the cursor, `None` on the submit row
    pub fn selected_field(&self) -> Option<RecordField> {
        RecordField::ALL.get(self.selected_row).copied()
    }

    /// Whether the rating picker is open
    pub fn is_picker_active(&self) -> bool {
        self.is_picker_active
    }

    /// Handle key events for the input screen
    pub fn handle_key_event(
        &mut self,
        key: KeyEvent,
        record: &MovieRecord,
        submit_enabled: bool,
    ) -> Option<InputAction> {
        if self.is_picker_active {
            return self.handle_picker_events(key);
        }

        match key.code {
            KeyCode::Up | KeyCode::BackTab => self.select_previous_row(),
            KeyCode::Down | KeyCode::Tab => self.select_next_row(),
            KeyCode::Esc => return Some(InputAction::Back),
            KeyCode::Enter => return self.activate_row(record, submit_enabled),
            KeyCode::Backspace => {
                let field = self.selected_field()?;
                if field == RecordField::Rating {
                    return Some(InputAction::Edit(field, String::new()));
                }
                let mut value = record.get(field).to_string();
                value.pop()?;
                return Some(InputAction::Edit(field, value));
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let field = self.selected_field()?;
                return Some(InputAction::Edit(field, String::new()));
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let field = self.selected_field()?;
                if !accepts_char(field, c) {
                    return None;
                }
                let mut value = record.get(field).to_string();
                value.push(c);
                return Some(InputAction::Edit(field, value));
            }
            _ => {}
        }
        None
    }

    fn handle_picker_events(&mut self, key: KeyEvent) -> Option<InputAction> {
        match key.code {
            KeyCode::Up => self.select_previous_option(),
            KeyCode::Down => self.select_next_option(),
            KeyCode::Enter => {
                self.is_picker_active = false;
                let index = self.rating_picker.selected().unwrap_or(0);
                let value = rating_choices()[index].to_string();
                return Some(InputAction::Edit(RecordField::Rating, value));
            }
            KeyCode::Esc => self.is_picker_active = false,
            _ => {}
        }
        None
    }

    fn activate_row(&mut self, record: &MovieRecord, submit_enabled: bool) -> Option<InputAction> {
        match self.selected_field() {
            None => submit_enabled.then_some(InputAction::Submit),
            Some(RecordField::Rating) => {
                let current = rating_choices()
                    .iter()
                    .position(|option| *option == record.rating)
                    .unwrap_or(0);
                self.rating_picker.select(Some(current));
                self.is_picker_active = true;
                None
            }
            Some(_) => {
                self.select_next_row();
                None
            }
        }
    }

    fn select_previous_row(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        } else {
            self.selected_row = ROW_COUNT - 1;
        }
    }

    fn select_next_row(&mut self) {
        if self.selected_row < ROW_COUNT - 1 {
            self.selected_row += 1;
        } else {
            self.selected_row = 0;
        }
    }

    fn select_previous_option(&mut self) {
        let selected = self.rating_picker.selected().unwrap_or(0);
        if selected > 0 {
            self.rating_picker.select(Some(selected - 1));
        }
    }

    fn select_next_option(&mut self) {
        let selected = self.rating_picker.selected().unwrap_or(0);
        if selected < rating_choices().len() - 1 {
            self.rating_picker.select(Some(selected + 1));
        }
    }

    /// Render the input screen
    pub fn render(&mut self, frame: &mut Frame, record: &MovieRecord, submit_enabled: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(9),    // Form columns
                Constraint::Length(3), // Submit button
                Constraint::Length(3), // Help text
            ])
            .split(frame.size());

        self.render_title(frame, chunks[0]);
        self.render_form(frame, chunks[1], record);
        self.render_submit(frame, chunks[2], record, submit_enabled);
        self.render_help(frame, chunks[3]);

        if self.is_picker_active {
            self.render_picker(frame, chunks[1]);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new("Movie Analysis Input")
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, record: &MovieRecord) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for (column, fields) in RecordField::ALL.chunks(COLUMN_LEN).enumerate() {
            let lines: Vec<Line> = fields
                .iter()
                .enumerate()
                .map(|(i, field)| self.field_line(column * COLUMN_LEN + i, *field, record))
                .collect();

            let title = if column == 0 { "Movie Details" } else { "Production Details" };
            let form = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(form, columns[column]);
        }
    }

    fn field_line(&self, row: usize, field: RecordField, record: &MovieRecord) -> Line<'static> {
        let selected = row == self.selected_row;
        let marker = if field.is_required() { " *" } else { "" };
        let label_style = if selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let value = record.get(field);
        let value_span = if value.is_empty() {
            Span::styled(
                field.placeholder().to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::styled(value.to_string(), Style::default().fg(Color::White))
        };

        let mut spans = vec![
            Span::styled(format!("{}{}", field.label(), marker), label_style),
            Span::raw(": "),
            value_span,
        ];
        if selected && field != RecordField::Rating {
            spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
        }
        Line::from(spans)
    }

    fn render_submit(&self, frame: &mut Frame, area: Rect, record: &MovieRecord, submit_enabled: bool) {
        let selected = self.selected_row == SUBMIT_ROW;
        let (text, style) = if submit_enabled {
            (
                "Generate Prediction".to_string(),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                format!(
                    "Complete Required Fields ({} missing)",
                    record.missing_required().len()
                ),
                Style::default().fg(Color::Gray).bg(Color::DarkGray),
            )
        };

        let border = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let button_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(44),
                Constraint::Min(0),
            ])
            .split(area)[1];

        let button = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(button, button_area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let hints = if self.is_picker_active {
            help_line(&[("↑↓", "Choose"), ("Enter", "Confirm"), ("Esc", "Close")])
        } else {
            help_line(&[
                ("↑↓", "Field"),
                ("Type", "Edit"),
                ("Enter", "Next/Select"),
                ("Esc", "Back to Home"),
                ("Ctrl+C", "Quit"),
            ])
        };
        let help = Paragraph::new(hints)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        frame.render_widget(help, area);
    }

    fn render_picker(&mut self, frame: &mut Frame, area: Rect) {
        let choices = rating_choices();
        let items: Vec<ListItem> = choices
            .iter()
            .map(|o| ListItem::new(if o.is_empty() { "Not rated" } else { o }))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Select rating"))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");

        let list_height = (choices.len() + 2) as u16;
        let list_area = centered_rect(40, list_height, area);

        frame.render_widget(Clear, list_area);
        frame.render_stateful_widget(list, list_area, &mut self.rating_picker);
    }
}

impl Default for InputScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Picker entries: blank first, then the fixed ratings
fn rating_choices() -> Vec<&'static str> {
    std::iter::once("").chain(RATING_OPTIONS.iter().copied()).collect()
}

/// Numeric fields take digits, a decimal point and a sign; rating is picker-only
fn accepts_char(field: RecordField, c: char) -> bool {
    if field == RecordField::Rating || c.is_control() {
        return false;
    }
    if field.is_numeric() {
        return c.is_ascii_digit() || c == '.' || c == '-';
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screens::test_support::render_to_string;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn select(screen: &mut InputScreen, field: RecordField) {
        while screen.selected_field() != Some(field) {
            screen.handle_key_event(key(KeyCode::Down), &MovieRecord::new(), false);
        }
    }

    #[test]
    fn test_row_navigation_wraps() {
        let mut screen = InputScreen::new();
        assert_eq!(screen.selected_field(), Some(RecordField::Name));

        screen.handle_key_event(key(KeyCode::Up), &MovieRecord::new(), false);
        assert_eq!(screen.selected_field(), None); // submit row

        screen.handle_key_event(key(KeyCode::Tab), &MovieRecord::new(), false);
        assert_eq!(screen.selected_field(), Some(RecordField::Name));
    }

    #[test]
    fn test_typing_edits_selected_field() {
        let mut screen = InputScreen::new();
        let record = MovieRecord::new().with(RecordField::Name, "Hea");

        let action = screen.handle_key_event(key(KeyCode::Char('t')), &record, false);
        assert_eq!(action, Some(InputAction::Edit(RecordField::Name, "Heat".into())));

        let action = screen.handle_key_event(key(KeyCode::Backspace), &record, false);
        assert_eq!(action, Some(InputAction::Edit(RecordField::Name, "He".into())));

        let clear = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        let action = screen.handle_key_event(clear, &record, false);
        assert_eq!(action, Some(InputAction::Edit(RecordField::Name, String::new())));
    }

    #[test]
    fn test_backspace_on_empty_field_is_inert() {
        let mut screen = InputScreen::new();
        let action = screen.handle_key_event(key(KeyCode::Backspace), &MovieRecord::new(), false);
        assert_eq!(action, None);
    }

    #[test]
    fn test_numeric_fields_filter_characters() {
        let mut screen = InputScreen::new();
        select(&mut screen, RecordField::Budget);
        let record = MovieRecord::new();

        assert_eq!(screen.handle_key_event(key(KeyCode::Char('x')), &record, false), None);
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('5')), &record, false),
            Some(InputAction::Edit(RecordField::Budget, "5".into()))
        );
    }

    #[test]
    fn test_rating_picker_selects_option() {
        let mut screen = InputScreen::new();
        select(&mut screen, RecordField::Rating);
        let record = MovieRecord::new();

        assert_eq!(screen.handle_key_event(key(KeyCode::Char('R')), &record, false), None);
        assert_eq!(screen.handle_key_event(key(KeyCode::Enter), &record, false), None);
        assert!(screen.is_picker_active());

        // "", G, PG, PG-13
        for _ in 0..3 {
            screen.handle_key_event(key(KeyCode::Down), &record, false);
        }
        let action = screen.handle_key_event(key(KeyCode::Enter), &record, false);
        assert_eq!(action, Some(InputAction::Edit(RecordField::Rating, "PG-13".into())));
        assert!(!screen.is_picker_active());
    }

    #[test]
    fn test_picker_esc_closes_without_edit() {
        let mut screen = InputScreen::new();
        select(&mut screen, RecordField::Rating);
        let record = MovieRecord::new().with(RecordField::Rating, "R");

        screen.handle_key_event(key(KeyCode::Enter), &record, false);
        assert_eq!(screen.rating_picker.selected(), Some(4));
        assert_eq!(screen.handle_key_event(key(KeyCode::Esc), &record, false), None);
        assert!(!screen.is_picker_active());
    }

    #[test]
    fn test_submit_row_respects_guard() {
        let mut screen = InputScreen::new();
        screen.handle_key_event(key(KeyCode::Up), &MovieRecord::new(), false);

        assert_eq!(screen.handle_key_event(key(KeyCode::Enter), &MovieRecord::new(), false), None);
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Enter), &MovieRecord::new(), true),
            Some(InputAction::Submit)
        );
    }

    #[test]
    fn test_enter_on_text_field_advances() {
        let mut screen = InputScreen::new();
        screen.handle_key_event(key(KeyCode::Enter), &MovieRecord::new(), false);
        assert_eq!(screen.selected_field(), Some(RecordField::Genre));
    }

    #[test]
    fn test_esc_requests_back() {
        let mut screen = InputScreen::new();
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Esc), &MovieRecord::new(), false),
            Some(InputAction::Back)
        );
    }

    #[test]
    fn test_render_shows_disabled_button() {
        let mut screen = InputScreen::new();
        let record = MovieRecord::new().with(RecordField::Name, "Heat");
        let text = render_to_string(120, 30, |f| screen.render(f, &record, false));

        assert!(text.contains("Movie Analysis Input"));
        assert!(text.contains("Heat"));
        assert!(text.contains("Complete Required Fields (7 missing)"));

        let text = render_to_string(120, 30, |f| screen.render(f, &record, true));
        assert!(text.contains("Generate Prediction"));
    }
}
