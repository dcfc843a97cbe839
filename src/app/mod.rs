//! TUI application module
//!
//! Contains the terminal user interface components, the screen state
//! machine and the delayed estimate job.

pub mod app;
pub mod job;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::App;
pub use job::{EstimateJob, EstimateReady, JobOutcome};
pub use screens::{AnalyzingScreen, InputScreen, ResultAction, ResultsScreen, WelcomeScreen};
pub use state::{ControllerAction, Effect, NavigationAction, Screen, StateManager};
pub use tui::Tui;
