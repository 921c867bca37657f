use derive_more::{Display, Error};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum ConfigError {
    #[display("grid size must be at least 1")]
    EmptyGrid,
    #[display("fps must be at least 1")]
    ZeroFps,
    #[display("{name} must be a finite, non-negative number of seconds (got {value})")]
    BadDelay { name: &'static str, value: f64 },
}

/// Game parameters. Timers derived from these are tick counts, not
/// wall-clock durations.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub grid_size: usize,
    pub fps: u32,
    /// Seconds the computer "thinks" before committing its move.
    pub think_delay_secs: f64,
    /// Seconds the end-of-game banner stays up before a new game starts.
    pub end_delay_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: 5,
            fps: 30,
            think_delay_secs: 0.5,
            end_delay_secs: 2.0,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        for (name, value) in [
            ("think delay", self.think_delay_secs),
            ("end delay", self.end_delay_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::BadDelay { name, value });
            }
        }
        Ok(())
    }

    pub fn think_ticks(&self) -> u32 {
        self.secs_to_ticks(self.think_delay_secs)
    }

    pub fn game_over_ticks(&self) -> u32 {
        self.secs_to_ticks(self.end_delay_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    // A countdown of zero would never fire, so every timer lasts at least one tick.
    fn secs_to_ticks(&self, secs: f64) -> u32 {
        ((secs * self.fps as f64).ceil() as u32).max(1)
    }
}
