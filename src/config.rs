use crate::rain::{CellSize, RainSettings};

use std::{path::PathBuf, time::Duration};

pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1000;
pub const DEFAULT_RESET_CHANCE: f64 = 0.01;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub fps: u32,
    pub reveal_delay: Duration,
    pub reset_chance: f64,
    pub cell: CellSize,
    pub rain: bool,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
            reset_chance: DEFAULT_RESET_CHANCE,
            cell: CellSize::default(),
            rain: true,
            log_path: None,
        }
    }
}

impl Config {
    /// Tick period for the background, e.g. 33 ms at 30 fps.
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    pub fn rain_settings(&self) -> RainSettings {
        RainSettings {
            period: self.frame_period(),
            cell: self.cell,
            reset_chance: self.reset_chance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cadence_is_about_thirty_hertz() {
        let config = Config::default();

        assert_eq!(config.frame_period(), Duration::from_millis(33));
        assert_eq!(config.rain_settings().reset_chance, 0.01);
        assert_eq!(config.rain_settings().cell, CellSize { width: 2, height: 1 });
    }
}
