//! Collision detection for a round ball against rectangular bodies
//!
//! Narrow phase only: with a handful of bricks every live body is tested each
//! step. The [`ContactTracker`] turns per-step overlap results into start/end
//! transitions for the collision policy.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::body::{BodyId, MovingBody, StaticBody};
use super::events::{CollisionEvent, EventQueue};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit direction the ball must move to separate
    pub normal: Vec2,
    /// Penetration depth
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between a circle and an axis-aligned rectangle.
///
/// Touching without overlap is not a hit.
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, body: &StaticBody) -> CollisionResult {
    let min = body.min();
    let max = body.max();
    let closest = ball_pos.clamp(min, max);
    let delta = ball_pos - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > 0.0 {
        // Centre outside the rectangle
        if dist_sq >= ball_radius * ball_radius {
            return CollisionResult::miss();
        }
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            normal: delta / dist,
            penetration: ball_radius - dist,
        };
    }

    // Centre inside (deep overlap): push out through the nearest face
    let faces = [
        (ball_pos.x - min.x, Vec2::NEG_X),
        (max.x - ball_pos.x, Vec2::X),
        (ball_pos.y - min.y, Vec2::NEG_Y),
        (max.y - ball_pos.y, Vec2::Y),
    ];
    let mut nearest = faces[0];
    for face in &faces[1..] {
        if face.0 < nearest.0 {
            nearest = *face;
        }
    }
    let (depth, normal) = nearest;

    CollisionResult {
        hit: true,
        normal,
        penetration: ball_radius + depth,
    }
}

/// Tracks which bodies the ball overlapped on the previous step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactTracker {
    touching: BTreeSet<BodyId>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bodies overlapping the ball as of the last detection pass
    pub fn touching(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.touching.iter().copied()
    }

    /// Test the ball against every live body and queue the transitions.
    ///
    /// Ends (partners no longer overlapping, or retired) are queued before
    /// starts, each group in ascending id order.
    pub fn detect(
        &mut self,
        ball: &MovingBody,
        bodies: &Arena<StaticBody>,
        queue: &mut EventQueue,
    ) {
        let radius = ball.radius();
        let now: BTreeMap<BodyId, Vec2> = bodies
            .iter()
            .filter_map(|(id, body)| {
                let result = ball_rect_collision(ball.pos, radius, body);
                if result.hit && !self.touching.contains(&id) {
                    log::debug!(
                        "Ball overlaps {:?} by {:.2} along {:?}",
                        id,
                        result.penetration,
                        result.normal
                    );
                }
                result.hit.then_some((id, result.normal))
            })
            .collect();

        for &id in &self.touching {
            if !now.contains_key(&id) {
                queue.push(CollisionEvent::End { other: id });
            }
        }
        for (&id, &mtv) in &now {
            if !self.touching.contains(&id) {
                queue.push(CollisionEvent::Start { other: id, mtv });
            }
        }

        self.touching = now.into_keys().collect();
    }
}
