//! Game settings: scene layout and rule switches
//!
//! Every field defaults to the classic layout, so a settings file only needs
//! to mention what it changes. Persisted in LocalStorage on the web.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{ContactTracking, LossRule};

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("screen size {width}x{height} must be positive")]
    ScreenSize { width: f32, height: f32 },
    #[error("brick grid needs at least one column and one row (got {columns}x{rows})")]
    EmptyGrid { columns: u32, rows: u32 },
    #[error("bricks collapse to width {0} on this screen")]
    BrickWidth(f32),
    #[error("ball radius {0} must be positive")]
    BallRadius(f32),
}

/// Brick grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickLayout {
    pub columns: u32,
    pub rows: u32,
    /// Gap between bricks (px)
    pub padding: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub height: f32,
    /// Row colours (0xRRGGBB), cycled top to bottom
    pub palette: Vec<u32>,
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            columns: BRICK_COLUMNS,
            rows: BRICK_ROWS,
            padding: BRICK_PADDING,
            x_offset: BRICK_X_OFFSET,
            y_offset: BRICK_Y_OFFSET,
            height: BRICK_HEIGHT,
            palette: BRICK_PALETTE.to_vec(),
        }
    }
}

impl BrickLayout {
    /// Individual brick width with padding factored in
    pub fn brick_width(&self, screen_width: f32) -> f32 {
        let columns = self.columns as f32;
        screen_width / columns - self.padding - self.padding / columns
    }

    /// Number of bricks in the grid
    pub fn brick_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Ball ===
    pub ball_start: Vec2,
    pub ball_radius: f32,
    /// Reference velocity (px/s), assigned at serve
    pub ball_speed: Vec2,
    pub serve_delay_secs: f32,

    // === Player ===
    pub player_start_x: f32,
    /// Distance from the bottom edge to the player's centre
    pub player_bottom_offset: f32,
    pub player_size: f32,
    pub player_speed: f32,

    // === Bricks ===
    pub bricks: BrickLayout,

    // === Rules ===
    pub contact_tracking: ContactTracking,
    pub loss_rule: LossRule,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            ball_start: Vec2::new(BALL_START_X, BALL_START_Y),
            ball_radius: BALL_RADIUS,
            ball_speed: Vec2::new(BALL_SPEED_X, BALL_SPEED_Y),
            serve_delay_secs: SERVE_DELAY_SECS,

            player_start_x: PLAYER_START_X,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,

            bricks: BrickLayout::default(),

            contact_tracking: ContactTracking::PerPartner,
            loss_rule: LossRule::Disabled,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject layouts the scene cannot be built from
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(SettingsError::ScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.bricks.columns == 0 || self.bricks.rows == 0 {
            return Err(SettingsError::EmptyGrid {
                columns: self.bricks.columns,
                rows: self.bricks.rows,
            });
        }
        let width = self.bricks.brick_width(self.screen_width);
        if width <= 0.0 {
            return Err(SettingsError::BrickWidth(width));
        }
        if self.ball_radius <= 0.0 {
            return Err(SettingsError::BallRadius(self.ball_radius));
        }
        Ok(())
    }

    /// Serve delay in whole simulation ticks
    pub fn serve_delay_ticks(&self) -> u32 {
        (self.serve_delay_secs.max(0.0) / SIM_DT).round() as u32
    }

    /// Replace these settings with validated `json` and persist them.
    ///
    /// On error the current settings are left untouched.
    pub fn update_from_json(&mut self, json: &str) -> Result<(), SettingsError> {
        *self = Self::from_json(json)?;
        self.save();
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "brick_bounce_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
