//! Fixed timestep simulation tick
//!
//! Per step, in order: serve countdown, player movement, ball integration,
//! boundary check, collision detection, then every queued collision event.

use glam::Vec2;

use super::body::{Axis, BodyId};
use super::events::CollisionEvent;
use super::policy::{BoundaryHits, boundary_check};
use super::state::{GamePhase, GameState, LossRule, PlayerPose};

/// Input for a single tick (held keys)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Idle/demo mode - the player follows the ball on its own
    pub autopilot: bool,
}

impl TickInput {
    /// Update a held arrow key by its DOM key name. Returns false for other keys.
    pub fn set_key(&mut self, key: &str, held: bool) -> bool {
        let slot = match key {
            "ArrowLeft" => &mut self.left,
            "ArrowRight" => &mut self.right,
            "ArrowUp" => &mut self.up,
            "ArrowDown" => &mut self.down,
            _ => return false,
        };
        *slot = held;
        true
    }

    fn any_held(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// The ball was served this tick
    pub served: bool,
    pub boundary: BoundaryHits,
    /// Bodies removed from play, in event order
    pub removed: Vec<BodyId>,
    /// Velocity axes negated, in event order
    pub inverted: Vec<Axis>,
    /// The run ended this tick
    pub game_over: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickReport {
    let mut report = TickReport::default();

    if state.phase == GamePhase::GameOver {
        return report;
    }
    state.time_ticks += 1;

    // Serve is a one-shot deferred action
    if let GamePhase::Serving { ticks_left } = state.phase {
        if ticks_left <= 1 {
            state.ball.serve();
            state.phase = GamePhase::Playing;
            report.served = true;
            log::info!("Ball served at {} px/s", state.ball.vel);
        } else {
            state.phase = GamePhase::Serving {
                ticks_left: ticks_left - 1,
            };
        }
    }

    move_player(state, input, dt);

    state.ball.integrate(dt);
    report.boundary = boundary_check(&mut state.ball, state.screen);

    state
        .contacts
        .detect(&state.ball, &state.bodies, &mut state.events);
    for event in state.events.drain() {
        match event {
            CollisionEvent::Start { other, mtv } => {
                let Some(body) = state.bodies.get(other) else {
                    log::warn!("Collision start with retired body {:?} ignored", other);
                    continue;
                };
                let eliminable = body.is_eliminable();
                let response = state
                    .policy
                    .on_collision_start(&mut state.ball, other, eliminable, mtv);

                if response.eliminate && state.bodies.retire(other) {
                    state.bricks_cleared += 1;
                    report.removed.push(other);
                    log::debug!("Brick {:?} removed ({} cleared)", other, state.bricks_cleared);
                }
                if let Some(axis) = response.inverted {
                    report.inverted.push(axis);
                }
            }
            CollisionEvent::End { other } => state.policy.on_collision_end(other),
        }
    }

    if state.loss_rule == LossRule::EndRun
        && state.phase == GamePhase::Playing
        && state.ball.top() > state.screen.y
    {
        state.phase = GamePhase::GameOver;
        report.game_over = true;
        log::info!(
            "Ball lost after {} ticks, {} bricks cleared",
            state.time_ticks,
            state.bricks_cleared
        );
    }

    report
}

/// Apply held keys (or the autopilot) to the player body
fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let step = state.player.speed * dt;
    let ball_x = state.ball.pos.x;
    let Some(body) = state.bodies.get_mut(state.player.body) else {
        return;
    };

    let mut delta = Vec2::ZERO;
    if input.autopilot {
        delta.x = (ball_x - body.pos.x).clamp(-step, step);
    } else {
        if input.left {
            delta.x -= step;
        }
        if input.right {
            delta.x += step;
        }
        if input.up {
            delta.y -= step;
        }
        if input.down {
            delta.y += step;
        }
    }
    body.pos += delta;

    let walking = if input.autopilot {
        delta != Vec2::ZERO
    } else {
        input.any_held()
    };
    state.player.pose = if walking {
        PlayerPose::Walking
    } else {
        PlayerPose::Standing
    };
}
