//! Brick Bounce entry point
//!
//! Native builds run a headless autopilot session and log what happened.
//! The web build drives the simulation through `brick_bounce::web` instead.

/// Simulated length of the headless session
#[cfg(not(target_arch = "wasm32"))]
const DEMO_SECONDS: f32 = 30.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    use brick_bounce::Settings;
    use brick_bounce::consts::SIM_DT;
    use brick_bounce::sim::{GamePhase, Runner};

    env_logger::init();
    log::info!("Brick Bounce (native) starting headless session...");

    // Optional settings file as the only argument
    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::from(1);
            }
        },
        None => Settings::load(),
    };

    let mut runner = Runner::new(&settings);
    runner.input.autopilot = true;

    let frames = (DEMO_SECONDS / SIM_DT).round() as u32;
    let mut wall_hits = 0u32;
    let mut rebounds = 0u32;
    for _ in 0..frames {
        for report in runner.frame(SIM_DT) {
            if report.boundary.any() {
                wall_hits += 1;
            }
            rebounds += report.inverted.len() as u32;
        }
        if runner.state.phase == GamePhase::GameOver || runner.state.bricks_remaining() == 0 {
            break;
        }
    }

    let state = &runner.state;
    log::info!(
        "Session over after {} ticks: {} bricks cleared, {} left, {} wall hits, {} rebounds",
        state.time_ticks,
        state.bricks_cleared,
        state.bricks_remaining(),
        wall_hits,
        rebounds
    );
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live in brick_bounce::web
}
