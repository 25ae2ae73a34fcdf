//! WASM bridge - connects the simulation to a browser host
//!
//! The page owns the canvas and the animation frame loop. It calls
//! `game_init` once, forwards key events, calls `game_frame` with the frame
//! delta and draws from the JSON returned by `game_snapshot`.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::Runner;

thread_local! {
    static GAME: RefCell<Option<(Runner, Settings)>> = const { RefCell::new(None) };
}

fn with_game<R>(f: impl FnOnce(&mut Runner, &mut Settings) -> R) -> Option<R> {
    GAME.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some((runner, settings)) => Some(f(runner, settings)),
            None => {
                log::warn!("Game not initialized. Call game_init() first.");
                None
            }
        }
    })
}

/// Build the scene for a `width` x `height` drawing surface
#[wasm_bindgen]
pub fn game_init(width: f32, height: f32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut settings = Settings::load();
    if width > 0.0 && height > 0.0 {
        settings.screen_width = width;
        settings.screen_height = height;
    }
    if let Err(e) = settings.validate() {
        log::warn!("{}; falling back to default settings", e);
        settings = Settings::default();
    }

    let runner = Runner::new(&settings);
    GAME.with(|cell| *cell.borrow_mut() = Some((runner, settings)));
    log::info!("brick-bounce: initialized");
}

/// Rebuild the scene with the current settings
#[wasm_bindgen]
pub fn game_restart() {
    with_game(|runner, settings| runner.restart(settings));
}

#[wasm_bindgen]
pub fn game_key_down(key: &str) {
    with_game(|runner, _| runner.input.set_key(key, true));
}

#[wasm_bindgen]
pub fn game_key_up(key: &str) {
    with_game(|runner, _| runner.input.set_key(key, false));
}

#[wasm_bindgen]
pub fn game_set_autopilot(enabled: bool) {
    with_game(|runner, _| runner.input.autopilot = enabled);
}

/// Replace the settings with `json`, store them and rebuild the scene.
///
/// Returns false (keeping the current game) if `json` is rejected.
#[wasm_bindgen]
pub fn game_apply_settings(json: &str) -> bool {
    with_game(|runner, settings| match settings.update_from_json(json) {
        Ok(()) => {
            runner.restart(settings);
            true
        }
        Err(e) => {
            log::warn!("Settings rejected: {}", e);
            false
        }
    })
    .unwrap_or(false)
}

/// Current settings as JSON
#[wasm_bindgen]
pub fn game_settings() -> String {
    with_game(|_, settings| settings.to_json().unwrap_or_else(|_| String::from("{}")))
        .unwrap_or_else(|| String::from("{}"))
}

/// Advance by `dt` seconds; returns the number of ticks run
#[wasm_bindgen]
pub fn game_frame(dt: f32) -> u32 {
    with_game(|runner, _| runner.frame(dt).len() as u32).unwrap_or(0)
}

/// Current state as JSON
#[wasm_bindgen]
pub fn game_snapshot() -> String {
    with_game(|runner, _| match serde_json::to_string(&runner.state) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Snapshot failed: {}", e);
            String::from("{}")
        }
    })
    .unwrap_or_else(|| String::from("{}"))
}
