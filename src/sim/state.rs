//! Game state and scene setup
//!
//! Everything a renderer needs to draw a frame lives here and serializes to
//! JSON for the web host.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::body::{BodyId, MovingBody, StaticBody};
use super::collision::ContactTracker;
use super::events::EventQueue;
use super::policy::CollisionPolicy;
use crate::settings::{BrickLayout, Settings};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball at rest, waiting for the serve delay to run out
    Serving { ticks_left: u32 },
    /// Active gameplay
    Playing,
    /// Ball left through the bottom edge (only with `LossRule::EndRun`)
    GameOver,
}

/// What happens when the ball leaves through the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LossRule {
    /// Nothing; the ball keeps travelling
    #[default]
    Disabled,
    /// The run ends
    EndRun,
}

/// Sprite pose for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerPose {
    #[default]
    Standing,
    Walking,
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player's body in the arena
    pub body: BodyId,
    pub pose: PlayerPose,
    /// Movement speed in pixels/second per held direction
    pub speed: f32,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub screen: Vec2,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: MovingBody,
    pub player: Player,
    /// Bricks and the player, tombstoned on removal
    pub bodies: Arena<StaticBody>,
    /// Brick ids in grid order (row-major)
    pub bricks: Vec<BodyId>,
    pub policy: CollisionPolicy,
    pub contacts: ContactTracker,
    /// Collision events waiting for this step's dispatch
    #[serde(skip)]
    pub events: EventQueue,
    pub loss_rule: LossRule,
    /// Bricks destroyed so far
    pub bricks_cleared: u32,
}

impl GameState {
    /// Build the scene: player, ball at rest and the brick grid
    pub fn new(settings: &Settings) -> Self {
        let screen = Vec2::new(settings.screen_width, settings.screen_height);
        let mut bodies = Arena::new();

        let player_pos = Vec2::new(
            settings.player_start_x,
            settings.screen_height - settings.player_bottom_offset,
        );
        let player_body = bodies.insert(StaticBody::player(
            player_pos,
            Vec2::splat(settings.player_size),
        ));

        let bricks = brick_grid(&settings.bricks, settings.screen_width)
            .into_iter()
            .map(|brick| bodies.insert(brick))
            .collect::<Vec<_>>();

        let ball = MovingBody::circle(
            settings.ball_start,
            settings.ball_radius,
            settings.ball_speed,
        );

        log::info!(
            "Scene built: {}x{} screen, {} bricks, serve in {:.2}s",
            screen.x,
            screen.y,
            bricks.len(),
            settings.serve_delay_secs
        );

        Self {
            screen,
            phase: GamePhase::Serving {
                ticks_left: settings.serve_delay_ticks(),
            },
            time_ticks: 0,
            ball,
            player: Player {
                body: player_body,
                pose: PlayerPose::Standing,
                speed: settings.player_speed,
            },
            bodies,
            bricks,
            policy: CollisionPolicy::new(settings.contact_tracking),
            contacts: ContactTracker::new(),
            events: EventQueue::new(),
            loss_rule: settings.loss_rule,
            bricks_cleared: 0,
        }
    }

    /// Live bricks remaining
    pub fn bricks_remaining(&self) -> usize {
        self.bricks.iter().filter(|&&id| self.bodies.is_live(id)).count()
    }

    /// Player's current body
    pub fn player_body(&self) -> Option<&StaticBody> {
        self.bodies.get(self.player.body)
    }
}

/// Lay out one brick per grid cell, positions are cell centres
pub fn brick_grid(layout: &BrickLayout, screen_width: f32) -> Vec<StaticBody> {
    let width = layout.brick_width(screen_width);
    let size = Vec2::new(width, layout.height);
    let mut bricks = Vec::with_capacity(layout.brick_count());

    for row in 0..layout.rows {
        let color = if layout.palette.is_empty() {
            0xFFFFFF
        } else {
            layout.palette[row as usize % layout.palette.len()]
        };
        for col in 0..layout.columns {
            let x = layout.x_offset + col as f32 * (width + layout.padding) + layout.padding;
            let y =
                layout.y_offset + row as f32 * (layout.height + layout.padding) + layout.padding;
            bricks.push(StaticBody::brick(Vec2::new(x, y), size, color));
        }
    }
    bricks
}
