//! Game settings and preferences
//!
//! Stored as JSON next to the save file. A missing or unreadable settings
//! file never stops the game: it runs on defaults instead.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{CUSTOM_TIMER_SECONDS, PVP_TIMER_SECONDS};
use crate::error::{QuizError, Result};
use crate::hero::Hero;
use crate::persistence::atomic::write_atomic;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// All audio off
    pub muted: bool,

    // === Gameplay ===
    /// Hero picked when starting a new game without choosing
    pub default_hero: Hero,
    /// Seconds per PvP question
    pub pvp_timer_seconds: f64,
    /// Seconds per custom question
    pub custom_timer_seconds: f64,

    // === Debug ===
    /// Draw collision segments on the map
    pub debug_collision: bool,

    /// Progress and question sets
    pub save_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            music_volume: 0.7,
            sfx_volume: 1.0,
            muted: false,

            default_hero: Hero::Boy,
            pvp_timer_seconds: PVP_TIMER_SECONDS,
            custom_timer_seconds: CUSTOM_TIMER_SECONDS,

            debug_collision: false,

            save_path: PathBuf::from("quiz_quest_save.json"),
        }
    }
}

impl Settings {
    /// Effective music volume (respects mute and master)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective sound effect volume (respects mute and master)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Read settings, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(error) => {
                log::warn!("{error}; using default settings");
                Self::default()
            }
        }
    }

    /// `Ok(None)` when the file doesn't exist
    pub fn try_load(path: &Path) -> Result<Option<Self>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(QuizError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| QuizError::Json {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| QuizError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        write_atomic(path, &json).map_err(|source| QuizError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}
