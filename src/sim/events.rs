//! Collision notifications
//!
//! The collision source pushes events here; the tick drains them once per
//! step, after the boundary check, in the order they were pushed.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::BodyId;

/// A collision transition between the ball and a static body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionEvent {
    /// Overlap began. `mtv` is the unit direction the ball must move to separate.
    Start { other: BodyId, mtv: Vec2 },
    /// Overlap ended (or the partner was retired)
    End { other: BodyId },
}

impl CollisionEvent {
    pub fn other(&self) -> BodyId {
        match *self {
            CollisionEvent::Start { other, .. } | CollisionEvent::End { other } => other,
        }
    }
}

/// Ordered FIFO of pending collision events
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<CollisionEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CollisionEvent) {
        self.pending.push_back(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = CollisionEvent> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Extend<CollisionEvent> for EventQueue {
    fn extend<I: IntoIterator<Item = CollisionEvent>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}
