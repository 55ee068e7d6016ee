//! Auto-play driver.
//!
//! Auto-play is plain repeated stepping on a timer. The driver checks its
//! `running` flag before every step, so a stop request takes effect at the
//! next step boundary, and every intermediate frame is observable exactly as
//! with manual stepping.
//!
//! Two entry points:
//! - [`Autoplay::tick`] for event loops that own the timer (the TUI);
//! - [`Autoplay::run`], a blocking loop that sleeps `delay` between steps.

use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::PlaybackConfig;
use crate::error::TraceResult;
use crate::session::Session;

/// Timed stepping with a cooperative stop flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autoplay {
    running: bool,
    delay: Duration,
}

impl Default for Autoplay {
    fn default() -> Self {
        Self::from_config(&PlaybackConfig::default())
    }
}

impl Autoplay {
    /// Stopped driver with the given step delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            running: false,
            delay,
        }
    }

    /// Stopped driver using the configured delay.
    #[must_use]
    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self::new(config.delay())
    }

    /// Begin auto-play.
    pub fn start(&mut self) {
        if !self.running {
            info!(delay_ms = self.delay.as_millis(), "autoplay started");
        }
        self.running = true;
    }

    /// Stop before the next step.
    pub fn stop(&mut self) {
        if self.running {
            info!("autoplay stopped");
        }
        self.running = false;
    }

    /// Start if stopped, stop if running.
    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Whether auto-play is on.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Delay between steps.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the delay.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// One auto-play step, if running. Stops itself at the end of the trace.
    ///
    /// Returns whether the session advanced.
    ///
    /// # Errors
    ///
    /// Returns error if the step fails; auto-play is stopped first.
    pub fn tick(&mut self, session: &mut Session) -> TraceResult<bool> {
        if !self.running {
            return Ok(false);
        }
        let advanced = match session.step_forward() {
            Ok(advanced) => advanced,
            Err(err) => {
                self.stop();
                return Err(err);
            }
        };
        if session.is_complete() {
            debug!(steps = session.position(), "autoplay reached end of trace");
            self.stop();
        }
        Ok(advanced)
    }

    /// Run until the trace ends or `should_stop` returns true.
    ///
    /// `should_stop` is checked before every step and `on_frame` is called
    /// after every step. Sleeps `delay` between steps. Returns the number of
    /// steps taken.
    ///
    /// # Errors
    ///
    /// Returns the first step error.
    pub fn run<F, S>(
        &mut self,
        session: &mut Session,
        mut on_frame: F,
        mut should_stop: S,
    ) -> TraceResult<usize>
    where
        F: FnMut(&Session),
        S: FnMut() -> bool,
    {
        self.start();
        let mut steps = 0;
        while self.running {
            if should_stop() {
                self.stop();
                break;
            }
            if !self.tick(session)? {
                break;
            }
            steps += 1;
            on_frame(session);
            if self.running && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }
        self.running = false;
        Ok(steps)
    }
}
