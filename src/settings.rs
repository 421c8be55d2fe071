//! Player preferences
//!
//! Persisted as JSON separately from the high score.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;
use crate::sim::Difficulty;

/// Audio preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0). The engine plays no music; this is kept and
    /// handed back to the page, which owns any soundtrack.
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.7,
            music_volume: 0.6,
            sfx_volume: 0.8,
            muted: false,
        }
    }
}

impl AudioSettings {
    /// Clamp every volume into range (after deserializing untrusted data)
    pub fn sanitized(mut self) -> Self {
        self.master_volume = clamp_volume(self.master_volume);
        self.music_volume = clamp_volume(self.music_volume);
        self.sfx_volume = clamp_volume(self.sfx_volume);
        self
    }
}

fn clamp_volume(vol: f32) -> f32 {
    if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty selected when the game last changed it
    pub difficulty: Difficulty,
    pub audio: AudioSettings,
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappy_bird_settings";

    /// Load settings; missing or malformed data yields defaults
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        if let Some(json) = storage.get(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.audio = settings.audio.sanitized();
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) {
        match serde_json::to_string(self) {
            Ok(json) => {
                storage.set(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }
}
