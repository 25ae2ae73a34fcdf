//! Bodies taking part in the simulation
//!
//! One moving body (the ball) and any number of static bodies (bricks and
//! the player). Walls are not bodies: the screen edges are handled by the
//! boundary check instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identity of a static body (index into the body arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Velocity axis picked for inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Dominant axis of a resolution vector.
    ///
    /// X only when its magnitude is strictly greater; ties resolve to Y.
    pub fn dominant(mtv: Vec2) -> Self {
        if mtv.x.abs() > mtv.y.abs() {
            Axis::X
        } else {
            Axis::Y
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingBody {
    pub pos: Vec2,
    /// Signed velocity in pixels/second
    pub vel: Vec2,
    pub half_extents: Vec2,
    /// Nominal speed assigned at serve, reused on boundary crossings
    pub reference_vel: Vec2,
}

impl MovingBody {
    /// A circular body at rest
    pub fn circle(pos: Vec2, radius: f32, reference_vel: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half_extents: Vec2::splat(radius),
            reference_vel,
        }
    }

    /// Collision radius (bodies are round, so either extent works)
    #[inline]
    pub fn radius(&self) -> f32 {
        self.half_extents.x
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.half_extents.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.half_extents.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.half_extents.y
    }

    /// Assign the reference velocity (the serve)
    pub fn serve(&mut self) {
        self.vel = self.reference_vel;
    }

    /// Advance position by velocity
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Negate one velocity component
    pub fn invert(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.vel.x = -self.vel.x,
            Axis::Y => self.vel.y = -self.vel.y,
        }
    }
}

/// What a static body is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Destroyed on contact; colour is 0xRRGGBB
    Brick { color: u32 },
    /// Player-controlled sprite, never destroyed
    Player,
}

/// An axis-aligned rectangular body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticBody {
    pub kind: BodyKind,
    /// Centre position
    pub pos: Vec2,
    pub half_extents: Vec2,
}

impl StaticBody {
    pub fn brick(pos: Vec2, size: Vec2, color: u32) -> Self {
        Self {
            kind: BodyKind::Brick { color },
            pos,
            half_extents: size / 2.0,
        }
    }

    pub fn player(pos: Vec2, size: Vec2) -> Self {
        Self {
            kind: BodyKind::Player,
            pos,
            half_extents: size / 2.0,
        }
    }

    /// Bricks are eliminable, everything else survives contact
    pub fn is_eliminable(&self) -> bool {
        matches!(self.kind, BodyKind::Brick { .. })
    }

    pub fn min(&self) -> Vec2 {
        self.pos - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.half_extents
    }
}
