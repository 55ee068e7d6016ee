//! Replay TUI application state and logic.
//!
//! The binary draws [`ReplayApp`] and forwards key presses to
//! [`ReplayApp::handle_key`]; once per auto-play delay it calls
//! [`ReplayApp::tick`].

use crossterm::event::KeyCode;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{ProblemConfig, SizeLimits, TraceConfig};
use crate::error::{TraceError, TraceResult};
use crate::playback::Autoplay;
use crate::session::Session;
use crate::trace::ProblemKind;

/// Application state for the replay TUI.
#[derive(Debug, Clone)]
pub struct ReplayApp {
    /// The session being replayed.
    pub session: Session,
    /// Auto-play driver.
    pub autoplay: Autoplay,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Number of log lines shown.
    pub display_tail: usize,
    /// Last error reported by a key action, shown in the status bar.
    pub last_error: Option<String>,
    limits: SizeLimits,
}

impl ReplayApp {
    /// Create the app described by `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the configured start-up size is rejected.
    pub fn new(config: &TraceConfig) -> TraceResult<Self> {
        Ok(Self {
            session: Session::from_config(config)?,
            autoplay: Autoplay::from_config(&config.playback),
            should_quit: false,
            display_tail: config.log.display_tail,
            last_error: None,
            limits: config.limits,
        })
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        let result = match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Char('n') | KeyCode::Right => self.step(),
            KeyCode::Char(' ') => {
                self.autoplay.toggle();
                Ok(())
            }
            KeyCode::Char('r') => {
                self.autoplay.stop();
                self.session.reset()
            }
            KeyCode::Char('+' | '=') => self.resize(self.session.size().saturating_add(1)),
            KeyCode::Char('-') => self.resize(self.session.size().saturating_sub(1)),
            KeyCode::Char('t') => self.toggle_problem(),
            KeyCode::Char('e') => {
                self.autoplay.stop();
                self.session.jump_to_end(|_| {}).map(|_| ())
            }
            _ => Ok(()),
        };
        self.record(result);
    }

    /// Advance auto-play by one step if it is running.
    pub fn tick(&mut self) {
        let result = self.autoplay.tick(&mut self.session).map(|_| ());
        self.record(result);
    }

    /// Manual single step. Stops auto-play so the two never interleave.
    fn step(&mut self) -> TraceResult<()> {
        self.autoplay.stop();
        self.session.step_forward().map(|_| ())
    }

    /// Rebuild for `size` clamped into the configured range.
    fn resize(&mut self, size: usize) -> TraceResult<()> {
        let size = self.limits.range(self.session.kind()).clamp(size);
        if size == self.session.size() {
            return Ok(());
        }
        info!(problem = %self.session.kind(), size, "resizing");
        self.session.set_size(size)
    }

    fn toggle_problem(&mut self) -> TraceResult<()> {
        let kind = self.session.kind().toggled();
        let size = self
            .limits
            .range(kind)
            .clamp(ProblemConfig::default_for(kind).size);
        self.autoplay.stop();
        self.session.set_problem(kind, size)
    }

    fn record(&mut self, result: TraceResult<()>) {
        match result {
            Ok(()) => self.last_error = None,
            Err(err) => {
                warn!(error = %err, "key action failed");
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// Check if the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Time between auto-play ticks.
    #[must_use]
    pub const fn tick_rate(&self) -> Duration {
        self.autoplay.delay()
    }

    /// Configured size range for the current problem.
    #[must_use]
    pub const fn size_range(&self) -> (usize, usize) {
        let range = self.limits.range(self.session.kind());
        (range.min, range.max)
    }

    /// Problem kind being replayed.
    #[must_use]
    pub const fn kind(&self) -> ProblemKind {
        self.session.kind()
    }

    /// Latest log lines, at most `display_tail` of them.
    #[must_use]
    pub fn log_tail(&self) -> &[String] {
        self.session.log().tail(self.display_tail)
    }

    /// Whether the last action failed.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.last_error.is_some()
    }
}

impl TryFrom<&TraceConfig> for ReplayApp {
    type Error = TraceError;

    fn try_from(config: &TraceConfig) -> TraceResult<Self> {
        Self::new(config)
    }
}
