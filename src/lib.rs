//! Brick Bounce - a minimal breakout/pong hybrid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collision response, game state)
//! - `settings`: Data-driven scene layout and rule switches
//! - `prep`: Offline sprite trimming via ImageMagick
//! - `web`: Browser bridge (wasm32 only)

pub mod prep;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the frame-paced input of the web host)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the runner (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Screen defaults (the web host fills the window; these apply headless)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_X: f32 = 100.0;
    pub const BALL_START_Y: f32 = 300.0;
    /// Reference velocity in pixels/second, assigned at serve
    pub const BALL_SPEED_X: f32 = 300.0;
    pub const BALL_SPEED_Y: f32 = 300.0;
    /// Delay between scene start and serve
    pub const SERVE_DELAY_SECS: f32 = 1.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 150.0;
    pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 50.0;
    /// 3px per held-key frame at 60 Hz
    pub const PLAYER_SPEED: f32 = 180.0;

    /// Brick grid defaults
    pub const BRICK_COLUMNS: u32 = 5;
    pub const BRICK_ROWS: u32 = 3;
    pub const BRICK_PADDING: f32 = 20.0;
    pub const BRICK_X_OFFSET: f32 = 65.0;
    pub const BRICK_Y_OFFSET: f32 = 20.0;
    pub const BRICK_HEIGHT: f32 = 30.0;

    /// Row colours, top to bottom (0xRRGGBB)
    pub const BRICK_PALETTE: [u32; 3] = [
        0xEE82EE, // Violet
        0xFFA500, // Orange
        0xFFFF00, // Yellow
    ];
}
