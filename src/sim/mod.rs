//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod arena;
pub mod body;
pub mod collision;
pub mod events;
pub mod policy;
pub mod runner;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use body::{Axis, BodyId, BodyKind, MovingBody, StaticBody};
pub use collision::{CollisionResult, ContactTracker, ball_rect_collision};
pub use events::{CollisionEvent, EventQueue};
pub use policy::{
    BoundaryHits, CollisionPolicy, ContactState, ContactTracking, StartResponse, boundary_check,
};
pub use runner::Runner;
pub use state::{GamePhase, GameState, LossRule, Player, PlayerPose, brick_grid};
pub use tick::{TickInput, TickReport, tick};
