//! Application state management
//!
//! Holds the current screen, the record being edited and the finished
//! estimate. Every change goes through [`StateManager::handle`], which
//! returns an [`Effect`] for the caller to carry out. Keyboard events are
//! mapped to navigation actions here as well.

use crate::models::{Estimate, MovieRecord, RecordField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tracing::{debug, info};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Landing screen with a single start action
    #[default]
    Welcome,
    /// Movie detail entry form
    Input,
    /// Prediction display
    Results,
}

/// Actions accepted by the state manager
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerAction {
    /// Leave the welcome screen
    Start,
    /// Replace one record field
    Edit(RecordField, String),
    /// Request a prediction for the current record
    Submit,
    /// A scheduled estimate finished
    EstimateReady { job_id: u64, estimate: Estimate },
    /// Clear everything and go back to the welcome screen
    Reset,
    /// Leave the application
    Quit,
}

/// Work the caller must perform after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start a delayed estimate for this record
    ScheduleEstimate { job_id: u64, record: MovieRecord },
    /// Stop the given job; its result will be ignored either way
    CancelEstimate { job_id: u64 },
}

/// An estimate that has been requested but not delivered yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEstimate {
    pub job_id: u64,
    pub started_at: Instant,
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up)
    Up,
    /// Move selection down (arrow down)
    Down,
    /// Move selection left (arrow left)
    Left,
    /// Move selection right (arrow right)
    Right,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc)
    Back,
    /// Next item (Tab)
    Next,
    /// Previous item (Shift+Tab)
    Previous,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug, Default)]
pub struct StateManager {
    screen: Screen,
    record: MovieRecord,
    estimate: Option<Estimate>,
    pending: Option<PendingEstimate>,
    last_job_id: u64,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager on the welcome screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current screen
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The record being edited
    pub fn record(&self) -> &MovieRecord {
        &self.record
    }

    /// The finished estimate, if any
    pub fn estimate(&self) -> Option<&Estimate> {
        self.estimate.as_ref()
    }

    /// The job currently being waited on
    pub fn pending(&self) -> Option<&PendingEstimate> {
        self.pending.as_ref()
    }

    /// True while a submitted estimate has not arrived
    pub fn is_awaiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the submit action would be accepted right now
    pub fn submit_enabled(&self) -> bool {
        self.screen == Screen::Input && !self.is_awaiting() && self.record.is_complete()
    }

    /// Required fields that still block submission
    pub fn missing_required(&self) -> Vec<RecordField> {
        self.record.missing_required()
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply an action and report the follow-up work
    pub fn handle(&mut self, action: ControllerAction) -> Effect {
        match action {
            ControllerAction::Start => {
                if self.screen == Screen::Welcome {
                    self.transition_to(Screen::Input);
                }
                Effect::None
            }
            ControllerAction::Edit(field, value) => {
                if self.screen == Screen::Input && !self.is_awaiting() {
                    self.record.set(field, value);
                }
                Effect::None
            }
            ControllerAction::Submit => self.submit(),
            ControllerAction::EstimateReady { job_id, estimate } => {
                self.complete(job_id, estimate);
                Effect::None
            }
            ControllerAction::Reset => self.reset(),
            ControllerAction::Quit => {
                self.should_quit = true;
                self.cancel_pending()
            }
        }
    }

    fn submit(&mut self) -> Effect {
        if !self.submit_enabled() {
            debug!(missing = ?self.missing_required(), "submit ignored");
            return Effect::None;
        }

        self.last_job_id += 1;
        let job_id = self.last_job_id;
        self.pending = Some(PendingEstimate {
            job_id,
            started_at: Instant::now(),
        });
        info!(job_id, title = %self.record.name, "estimate requested");

        Effect::ScheduleEstimate {
            job_id,
            record: self.record.clone(),
        }
    }

    fn complete(&mut self, job_id: u64, estimate: Estimate) {
        match self.pending {
            Some(pending) if pending.job_id == job_id => {
                info!(job_id, gross = estimate.gross, bucket = %estimate.bucket, "estimate ready");
                self.pending = None;
                self.estimate = Some(estimate);
                self.transition_to(Screen::Results);
            }
            _ => debug!(job_id, "stale estimate discarded"),
        }
    }

    fn reset(&mut self) -> Effect {
        let effect = self.cancel_pending();
        self.record.clear();
        self.estimate = None;
        self.transition_to(Screen::Welcome);
        effect
    }

    fn cancel_pending(&mut self) -> Effect {
        match self.pending.take() {
            Some(pending) => Effect::CancelEstimate {
                job_id: pending.job_id,
            },
            None => Effect::None,
        }
    }

    fn transition_to(&mut self, screen: Screen) {
        if screen != self.screen {
            debug!(from = ?self.screen, to = ?screen, "screen transition");
            self.screen = screen;
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up => NavigationAction::Up,
            KeyCode::Down => NavigationAction::Down,
            KeyCode::Left => NavigationAction::Left,
            KeyCode::Right => NavigationAction::Right,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc => NavigationAction::Back,

            // Tab navigation
            KeyCode::BackTab => NavigationAction::Previous,
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    NavigationAction::Previous
                } else {
                    NavigationAction::Next
                }
            }

            _ => NavigationAction::None,
        }
    }

    /// Ctrl+C quits from every screen, including while typing
    pub fn is_force_quit(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    }
}
