//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage. Unknown or
//! missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_TICK_MS, COUNTDOWN_FROM};
use crate::persistence::{KeyValueStore, StoreError, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation tick interval at design scale (ms)
    pub tick_ms: u32,
    /// Countdown starts from this value
    pub countdown_from: i32,
    /// Tick faster on larger canvases (interval / scale)
    pub scale_tick_rate: bool,
    /// Show the controls hint under the countdown
    pub show_instructions: bool,
    /// Minimum swipe length before it counts (CSS pixels)
    pub swipe_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: BASE_TICK_MS,
            countdown_from: COUNTDOWN_FROM,
            scale_tick_rate: true,
            show_instructions: true,
            swipe_threshold: 10.0,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "snake_settings";

    /// Clamp values a hand-edited blob could break
    pub fn sanitized(mut self) -> Self {
        self.tick_ms = self.tick_ms.clamp(16, 2000);
        self.countdown_from = self.countdown_from.clamp(0, 10);
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            self.swipe_threshold = 0.0;
        }
        self
    }

    /// Load settings, falling back to defaults
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_json::<Settings, _>(store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
