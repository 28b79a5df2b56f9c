use serde::{Deserialize, Serialize};
use world::GameMode;

use crate::{Error, Result};

/// Scheduler tuning knobs.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Frames per second of the host game loop.
    pub fps: u32,
    /// Shortest random duration of a durated effect.
    pub min_effect_secs: u32,
    /// Longest wait between automatic effect picks.
    pub max_interval_secs: u32,
    /// How long an instantaneous effect stays listed in the overlay.
    pub flash_ticks: u32,
    /// Random picks tried per selection before giving up.
    pub retries: u32,
    /// Add the mode toggle entry and start in manual mode.
    pub debug_menu: bool,
    pub reload_cooldown_secs: u32,
    /// Game modes during which the scheduler doesn't run at all.
    pub excluded_modes: Vec<GameMode>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fps: 60,
            min_effect_secs: 10,
            max_interval_secs: 15,
            flash_ticks: 90,
            retries: 20,
            debug_menu: false,
            reload_cooldown_secs: 60,
            excluded_modes: GameMode::DORMANT.to_vec(),
        }
    }
}

impl Config {
    /// Parse and validate an IDM config.
    pub fn from_idm(text: &str) -> Result<Self> {
        let ret: Config =
            idm::from_str(text).map_err(|e| Error::InvalidConfig {
                reason: e.to_string(),
            })?;
        ret.validate()?;
        Ok(ret)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| {
            Err(Error::InvalidConfig {
                reason: reason.into(),
            })
        };

        if self.fps == 0 {
            return invalid("fps must be positive");
        }
        if self.retries == 0 {
            return invalid("retries must be positive");
        }
        if self.max_interval_secs == 0 {
            return invalid("max-interval-secs must be positive");
        }
        if self.flash_ticks == 0 {
            return invalid("flash-ticks must be positive");
        }
        if self.min_effect_secs == 0 {
            return invalid("min-effect-secs must be positive");
        }

        if i32::try_from(self.flash_ticks).is_err() {
            return invalid("flash-ticks is too large");
        }
        let longest = self
            .min_effect_secs
            .max(self.max_interval_secs)
            .max(self.reload_cooldown_secs);
        if !self.fits_in_ticks(longest) {
            return invalid("durations overflow frame count at this fps");
        }
        Ok(())
    }

    /// Whether a duration of `secs` seconds is representable in frames.
    pub fn fits_in_ticks(&self, secs: u32) -> bool {
        secs.checked_mul(self.fps)
            .is_some_and(|t| i32::try_from(t).is_ok())
    }

    /// Convert seconds to frames, saturating at the largest frame count.
    pub fn secs_to_ticks(&self, secs: u32) -> i32 {
        i32::try_from(secs.saturating_mul(self.fps)).unwrap_or(i32::MAX)
    }

    pub fn is_excluded(&self, mode: GameMode) -> bool {
        self.excluded_modes.contains(&mode)
    }
}
