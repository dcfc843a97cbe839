//! Main application controller
//!
//! Owns the terminal, the state manager and the screen components. Key
//! presses become controller actions, and the effects they return are
//! carried out here by spawning or cancelling estimate jobs.

use crate::{
    app::{
        job::{EstimateJob, EstimateReady},
        screens::{
            AnalyzingScreen, InputAction, InputScreen, ResultAction, ResultsScreen, WelcomeScreen,
        },
        state::{ControllerAction, Effect, NavigationAction, Screen, StateManager},
        tui::Tui,
    },
    config::AppConfig,
    CinemaError, Result,
};
use crossterm::event::KeyEvent;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::io;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Application state manager
    state_manager: StateManager,
    /// Application config
    config: AppConfig,
    /// Seeds each estimate job
    rng: SmallRng,
    /// Screen components
    welcome_screen: WelcomeScreen,
    input_screen: InputScreen,
    analyzing_screen: AnalyzingScreen,
    results_screen: ResultsScreen,
    /// Estimate currently in flight
    job: Option<EstimateJob>,
    estimate_tx: mpsc::Sender<EstimateReady>,
    estimate_rx: mpsc::Receiver<EstimateReady>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let (estimate_tx, estimate_rx) = mpsc::channel(8);

        Ok(Self {
            tui: Tui::new(config.tick_rate)
                .map_err(|e| CinemaError::TuiError(format!("Cannot open terminal: {}", e)))?,
            state_manager: StateManager::new(),
            rng,
            welcome_screen: WelcomeScreen::new(),
            input_screen: InputScreen::new(),
            analyzing_screen: AnalyzingScreen::new(config.estimate_delay),
            results_screen: ResultsScreen::new(),
            job: None,
            estimate_tx,
            estimate_rx,
            config,
        })
    }

    /// Initialize the application and TUI
    pub fn init(&mut self) -> Result<()> {
        self.tui
            .enter()
            .map_err(|e| CinemaError::TuiError(format!("Cannot enter raw mode: {}", e)))?;
        info!(
            delay = ?self.config.estimate_delay,
            seeded = self.config.rng_seed.is_some(),
            "tui started"
        );
        Ok(())
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        while !self.state_manager.should_quit() {
            while let Ok(ready) = self.estimate_rx.try_recv() {
                self.receive_estimate(ready);
            }
            self.draw()?;
            self.handle_events()?;
            // Let estimate jobs make progress between polls
            tokio::task::yield_now().await;
        }

        if let Some(mut job) = self.job.take() {
            job.cancel();
        }
        info!("tui finished");
        Ok(())
    }

    /// Restore the terminal
    pub fn restore(&mut self) -> Result<()> {
        self.tui.exit()?;
        Ok(())
    }

    fn receive_estimate(&mut self, ready: EstimateReady) {
        if self.job.as_ref().map(EstimateJob::job_id) == Some(ready.job_id) {
            self.job = None;
        }
        self.apply(ControllerAction::EstimateReady {
            job_id: ready.job_id,
            estimate: ready.estimate,
        });
    }

    /// Feed an action to the state manager and carry out its effect
    fn apply(&mut self, action: ControllerAction) {
        let resets = matches!(action, ControllerAction::Reset);
        match self.state_manager.handle(action) {
            Effect::None => {}
            Effect::ScheduleEstimate { job_id, record } => {
                if let Some(mut previous) = self.job.take() {
                    previous.cancel();
                }
                let seed = self.rng.gen::<u64>();
                debug!(job_id, seed, "spawning estimate job");
                self.job = Some(EstimateJob::spawn(
                    job_id,
                    record,
                    self.config.estimate_delay,
                    seed,
                    self.estimate_tx.clone(),
                ));
            }
            Effect::CancelEstimate { job_id } => match self.job.take() {
                Some(mut job) if job.job_id() == job_id => job.cancel(),
                Some(other) => {
                    warn!(job_id, running = other.job_id(), "cancel for unknown job");
                    self.job = Some(other);
                }
                None => {}
            },
        }

        if resets {
            self.input_screen.reset();
            self.results_screen.reset();
        }
    }

    /// Draw the current screen
    fn draw(&mut self) -> io::Result<()> {
        let adequate = fits(self.tui.terminal_mut().size()?);
        let Self {
            tui,
            state_manager,
            welcome_screen,
            input_screen,
            analyzing_screen,
            results_screen,
            ..
        } = self;

        tui.terminal_mut().draw(|f| {
            if !adequate {
                render_too_small(f);
                return;
            }
            match state_manager.screen() {
                Screen::Welcome => welcome_screen.render(f),
                Screen::Input => match state_manager.pending() {
                    Some(pending) => analyzing_screen.render(
                        f,
                        pending.started_at.elapsed(),
                        &state_manager.record().name,
                    ),
                    None => input_screen.render(
                        f,
                        state_manager.record(),
                        state_manager.submit_enabled(),
                    ),
                },
                Screen::Results => {
                    results_screen.render(f, state_manager.record(), state_manager.estimate())
                }
            }
        })?;
        Ok(())
    }

    /// Handle keyboard events and update state
    fn handle_events(&mut self) -> Result<()> {
        if let Some(key) = self.tui.next_key()? {
            if StateManager::is_force_quit(&key) {
                self.apply(ControllerAction::Quit);
                return Ok(());
            }

            match self.state_manager.screen() {
                Screen::Welcome => self.handle_welcome_events(key),
                Screen::Input if self.state_manager.is_awaiting() => {
                    if StateManager::key_to_navigation(key) == NavigationAction::Back {
                        self.apply(ControllerAction::Reset);
                    }
                }
                Screen::Input => self.handle_input_events(key),
                Screen::Results => self.handle_results_events(key),
            }
        }
        Ok(())
    }

    fn handle_welcome_events(&mut self, key: KeyEvent) {
        match StateManager::key_to_navigation(key) {
            NavigationAction::Select => self.apply(ControllerAction::Start),
            NavigationAction::Quit | NavigationAction::Back => self.apply(ControllerAction::Quit),
            _ => {}
        }
    }

    fn handle_input_events(&mut self, key: KeyEvent) {
        let action = self.input_screen.handle_key_event(
            key,
            self.state_manager.record(),
            self.state_manager.submit_enabled(),
        );
        match action {
            Some(InputAction::Edit(field, value)) => {
                self.apply(ControllerAction::Edit(field, value))
            }
            Some(InputAction::Submit) => self.apply(ControllerAction::Submit),
            Some(InputAction::Back) => self.apply(ControllerAction::Reset),
            None => {}
        }
    }

    fn handle_results_events(&mut self, key: KeyEvent) {
        match StateManager::key_to_navigation(key) {
            NavigationAction::Left | NavigationAction::Up | NavigationAction::Previous => {
                self.results_screen.select_previous_action()
            }
            NavigationAction::Right | NavigationAction::Down | NavigationAction::Next => {
                self.results_screen.select_next_action()
            }
            NavigationAction::Select => match self.results_screen.selected_action() {
                ResultAction::NewPrediction => self.apply(ControllerAction::Reset),
                ResultAction::Exit => self.apply(ControllerAction::Quit),
            },
            NavigationAction::Back => self.apply(ControllerAction::Reset),
            NavigationAction::Quit => self.apply(ControllerAction::Quit),
            NavigationAction::None => {}
        }
    }
}

/// Smallest terminal the screens are laid out for
const MIN_WIDTH: u16 = 80;
const MIN_HEIGHT: u16 = 24;

fn fits(area: Rect) -> bool {
    area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT
}

fn render_too_small(f: &mut Frame) {
    let notice = Paragraph::new(format!(
        "Terminal too small. Resize to at least {}x{}.",
        MIN_WIDTH, MIN_HEIGHT
    ))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(notice, f.size());
}
