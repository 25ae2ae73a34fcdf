//! Frame-to-tick driver
//!
//! Hosts call [`Runner::frame`] with wall-clock deltas; the runner feeds the
//! simulation whole `SIM_DT` steps and carries the remainder to the next frame.

use super::state::GameState;
use super::tick::{TickInput, TickReport, tick};
use crate::consts::*;
use crate::settings::Settings;

/// Owns a game and its fixed-step accumulator
#[derive(Debug, Clone)]
pub struct Runner {
    pub state: GameState,
    /// Held keys, updated by the host between frames
    pub input: TickInput,
    accumulator: f32,
}

impl Runner {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: GameState::new(settings),
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    /// Rebuild the scene, keeping held keys
    pub fn restart(&mut self, settings: &Settings) {
        self.state = GameState::new(settings);
        self.accumulator = 0.0;
    }

    /// Run simulation ticks for a frame of `dt` seconds.
    ///
    /// Returns one report per tick run.
    pub fn frame(&mut self, dt: f32) -> Vec<TickReport> {
        // NaN would poison the accumulator for good
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut reports = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            reports.push(tick(&mut self.state, &self.input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        reports
    }
}
