//! Collision response: brick elimination and ball rebound
//!
//! Turns collision notifications into two kinds of decisions:
//! - whether the partner is removed from play (bricks always are)
//! - whether one axis of the ball's velocity is negated
//!
//! An overlap can last several steps, so inversion happens only when the ball
//! goes from touching nothing to touching something. With
//! [`ContactTracking::PerPartner`] each partner's overlap is tracked on its own
//! and an end for one partner leaves the others in contact.
//! [`ContactTracking::SingleFlag`] keeps one shared flag that any end clears,
//! matching the behaviour of the first version of the game.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Axis, BodyId, MovingBody};

/// How overlap episodes are tracked across partners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactTracking {
    /// One flag shared by all partners; any end resets it
    SingleFlag,
    /// A set of currently overlapping partners
    #[default]
    PerPartner,
}

/// Contact state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactState {
    Idle,
    InContact,
}

/// Decision taken for a collision start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartResponse {
    /// Partner must be removed from the scene now
    pub eliminate: bool,
    /// Axis that was negated, if any
    pub inverted: Option<Axis>,
}

/// Screen edges crossed during a boundary check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl BoundaryHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Per-scene collision response state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionPolicy {
    tracking: ContactTracking,
    /// Shared flag (SingleFlag mode)
    colliding: bool,
    /// Overlapping partners (PerPartner mode)
    partners: BTreeSet<BodyId>,
}

impl CollisionPolicy {
    pub fn new(tracking: ContactTracking) -> Self {
        Self {
            tracking,
            colliding: false,
            partners: BTreeSet::new(),
        }
    }

    pub fn tracking(&self) -> ContactTracking {
        self.tracking
    }

    pub fn state(&self) -> ContactState {
        let in_contact = match self.tracking {
            ContactTracking::SingleFlag => self.colliding,
            ContactTracking::PerPartner => !self.partners.is_empty(),
        };
        if in_contact {
            ContactState::InContact
        } else {
            ContactState::Idle
        }
    }

    /// Partners currently overlapping the ball (always empty in SingleFlag mode)
    pub fn partners(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.partners.iter().copied()
    }

    /// Handle the start of an overlap between the ball and `other`.
    ///
    /// Elimination does not depend on contact state. Inversion happens only on
    /// the Idle -> InContact transition.
    pub fn on_collision_start(
        &mut self,
        ball: &mut MovingBody,
        other: BodyId,
        eliminable: bool,
        mtv: Vec2,
    ) -> StartResponse {
        let was_idle = self.state() == ContactState::Idle;
        match self.tracking {
            ContactTracking::SingleFlag => self.colliding = true,
            ContactTracking::PerPartner => {
                self.partners.insert(other);
            }
        }

        let inverted = if was_idle {
            let axis = Axis::dominant(mtv);
            ball.invert(axis);
            log::debug!("Collision with {:?}: inverted {:?}, vel now {}", other, axis, ball.vel);
            Some(axis)
        } else {
            log::debug!("Collision with {:?} during contact: inversion suppressed", other);
            None
        };

        StartResponse {
            eliminate: eliminable,
            inverted,
        }
    }

    /// Handle the end of an overlap
    pub fn on_collision_end(&mut self, other: BodyId) {
        match self.tracking {
            ContactTracking::SingleFlag => self.colliding = false,
            ContactTracking::PerPartner => {
                self.partners.remove(&other);
            }
        }
    }
}

/// Keep the ball inside the left, right and top screen edges.
///
/// Each crossed edge resets the matching velocity component to the reference
/// magnitude pointing back into the screen. The three checks are independent.
/// There is no bottom edge: leaving through the bottom is the loss condition.
pub fn boundary_check(ball: &mut MovingBody, screen: Vec2) -> BoundaryHits {
    let mut hits = BoundaryHits::default();

    if ball.left() < 0.0 {
        ball.vel.x = ball.reference_vel.x;
        hits.left = true;
    }
    if ball.right() > screen.x {
        ball.vel.x = -ball.reference_vel.x;
        hits.right = true;
    }
    if ball.top() < 0.0 {
        ball.vel.y = ball.reference_vel.y;
        hits.top = true;
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);
    const REFERENCE: Vec2 = Vec2::new(300.0, 300.0);

    fn served_ball() -> MovingBody {
        let mut ball = MovingBody::circle(Vec2::new(400.0, 300.0), 10.0, REFERENCE);
        ball.serve();
        ball
    }

    #[test]
    fn test_left_edge_forces_rightward() {
        let mut ball = served_ball();
        ball.pos = Vec2::new(4.0, 300.0);
        ball.vel = Vec2::new(-300.0, 300.0);

        let hits = boundary_check(&mut ball, SCREEN);
        assert!(hits.left && !hits.right && !hits.top);
        assert_eq!(ball.vel, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_left_edge_sets_reference_not_flip() {
        let mut ball = served_ball();
        ball.pos = Vec2::new(2.0, 300.0);
        ball.vel = Vec2::new(-120.0, 50.0);

        boundary_check(&mut ball, SCREEN);
        assert_eq!(ball.vel.x, REFERENCE.x);
        assert_eq!(ball.vel.y, 50.0);
    }

    #[test]
    fn test_right_and_top_edges() {
        let mut ball = served_ball();
        ball.pos = Vec2::new(795.0, 5.0);
        ball.vel = Vec2::new(300.0, -300.0);

        let hits = boundary_check(&mut ball, SCREEN);
        assert!(hits.right && hits.top && !hits.left);
        assert_eq!(ball.vel, Vec2::new(-300.0, 300.0));
    }

    #[test]
    fn test_bottom_edge_is_ignored() {
        let mut ball = served_ball();
        ball.pos = Vec2::new(400.0, 700.0);

        let hits = boundary_check(&mut ball, SCREEN);
        assert!(!hits.any());
        assert_eq!(ball.vel, REFERENCE);
    }

    #[test]
    fn test_touching_edge_is_not_crossing() {
        let mut ball = served_ball();
        ball.pos = Vec2::new(10.0, 10.0);
        ball.vel = Vec2::new(-300.0, -300.0);

        let hits = boundary_check(&mut ball, SCREEN);
        assert!(!hits.any());
        assert_eq!(ball.vel, Vec2::new(-300.0, -300.0));
    }

    #[test]
    fn test_rebound_scenario_single_flag() {
        let mut policy = CollisionPolicy::new(ContactTracking::SingleFlag);
        let mut ball = served_ball();
        let brick = BodyId(1);
        assert_eq!(policy.state(), ContactState::Idle);

        // Vertical-dominant start from Idle
        let r = policy.on_collision_start(&mut ball, brick, true, Vec2::new(0.2, 0.97));
        assert_eq!(r.inverted, Some(Axis::Y));
        assert!(r.eliminate);
        assert_eq!(ball.vel, Vec2::new(300.0, -300.0));
        assert_eq!(policy.state(), ContactState::InContact);

        // Second start while in contact, different partner
        let r = policy.on_collision_start(&mut ball, BodyId(2), true, Vec2::new(0.99, 0.1));
        assert_eq!(r.inverted, None);
        assert!(r.eliminate);
        assert_eq!(ball.vel, Vec2::new(300.0, -300.0));
        assert_eq!(policy.state(), ContactState::InContact);

        // End, then horizontal-dominant start
        policy.on_collision_end(brick);
        assert_eq!(policy.state(), ContactState::Idle);
        let r = policy.on_collision_start(&mut ball, BodyId(3), false, Vec2::new(0.99, 0.1));
        assert_eq!(r.inverted, Some(Axis::X));
        assert!(!r.eliminate);
        assert_eq!(ball.vel, Vec2::new(-300.0, -300.0));
    }

    #[test]
    fn test_single_flag_end_is_unconditional() {
        let mut policy = CollisionPolicy::new(ContactTracking::SingleFlag);
        let mut ball = served_ball();
        policy.on_collision_start(&mut ball, BodyId(1), true, Vec2::Y);
        policy.on_collision_start(&mut ball, BodyId(2), true, Vec2::Y);

        // Ending an unrelated partner still clears the shared flag
        policy.on_collision_end(BodyId(7));
        assert_eq!(policy.state(), ContactState::Idle);

        // End from Idle stays Idle
        policy.on_collision_end(BodyId(1));
        assert_eq!(policy.state(), ContactState::Idle);
        assert_eq!(policy.partners().count(), 0);
    }

    #[test]
    fn test_per_partner_keeps_contact_until_last_end() {
        let mut policy = CollisionPolicy::new(ContactTracking::PerPartner);
        let mut ball = served_ball();

        let r = policy.on_collision_start(&mut ball, BodyId(1), true, Vec2::Y);
        assert_eq!(r.inverted, Some(Axis::Y));
        let r = policy.on_collision_start(&mut ball, BodyId(2), true, Vec2::Y);
        assert_eq!(r.inverted, None);
        assert_eq!(policy.partners().collect::<Vec<_>>(), vec![BodyId(1), BodyId(2)]);

        policy.on_collision_end(BodyId(1));
        assert_eq!(policy.state(), ContactState::InContact);

        // Re-touching a partner while another is still overlapping: no inversion
        let r = policy.on_collision_start(&mut ball, BodyId(3), false, Vec2::X);
        assert_eq!(r.inverted, None);
        assert_eq!(ball.vel, Vec2::new(300.0, -300.0));

        policy.on_collision_end(BodyId(2));
        policy.on_collision_end(BodyId(3));
        assert_eq!(policy.state(), ContactState::Idle);

        let r = policy.on_collision_start(&mut ball, BodyId(4), false, Vec2::new(-0.99, 0.1));
        assert_eq!(r.inverted, Some(Axis::X));
        assert_eq!(ball.vel, Vec2::new(-300.0, -300.0));
    }

    #[test]
    fn test_per_partner_unknown_end_is_noop() {
        let mut policy = CollisionPolicy::new(ContactTracking::PerPartner);
        let mut ball = served_ball();
        policy.on_collision_start(&mut ball, BodyId(1), false, Vec2::Y);
        policy.on_collision_end(BodyId(9));
        assert_eq!(policy.state(), ContactState::InContact);
    }

    #[test]
    fn test_default_is_per_partner() {
        assert_eq!(CollisionPolicy::default().tracking(), ContactTracking::PerPartner);
        assert_eq!(CollisionPolicy::default().state(), ContactState::Idle);
    }

    mod properties {
        use std::collections::BTreeSet;

        use proptest::prelude::*;

        use super::super::*;

        #[derive(Debug, Clone)]
        enum Op {
            Start { other: u32, brick: bool, angle: f32 },
            End { other: u32 },
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u32..4, any::<bool>(), 0.0f32..std::f32::consts::TAU)
                    .prop_map(|(other, brick, angle)| Op::Start { other, brick, angle }),
                (0u32..4).prop_map(|other| Op::End { other }),
            ]
        }

        fn expected_after(vel: Vec2, mtv: Vec2) -> Vec2 {
            if mtv.x.abs() > mtv.y.abs() {
                Vec2::new(-vel.x, vel.y)
            } else {
                Vec2::new(vel.x, -vel.y)
            }
        }

        fn run(tracking: ContactTracking, ops: &[Op]) -> Result<(), TestCaseError> {
            let mut policy = CollisionPolicy::new(tracking);
            let mut ball = MovingBody::circle(Vec2::ZERO, 10.0, Vec2::new(300.0, 300.0));
            ball.serve();
            let mut model: BTreeSet<BodyId> = BTreeSet::new();

            for op in ops {
                match *op {
                    Op::Start { other, brick, angle } => {
                        let mtv = Vec2::new(angle.cos(), angle.sin());
                        let before_state = policy.state();
                        let before_vel = ball.vel;
                        let r = policy.on_collision_start(&mut ball, BodyId(other), brick, mtv);

                        prop_assert_eq!(r.eliminate, brick);
                        prop_assert_eq!(policy.state(), ContactState::InContact);
                        if before_state == ContactState::Idle {
                            prop_assert_eq!(r.inverted, Some(Axis::dominant(mtv)));
                            prop_assert_eq!(ball.vel, expected_after(before_vel, mtv));
                        } else {
                            prop_assert_eq!(r.inverted, None);
                            prop_assert_eq!(ball.vel, before_vel);
                        }
                        if tracking == ContactTracking::PerPartner {
                            prop_assert_eq!(before_state == ContactState::Idle, model.is_empty());
                            model.insert(BodyId(other));
                        }
                    }
                    Op::End { other } => {
                        policy.on_collision_end(BodyId(other));
                        match tracking {
                            ContactTracking::SingleFlag => {
                                prop_assert_eq!(policy.state(), ContactState::Idle);
                            }
                            ContactTracking::PerPartner => {
                                model.remove(&BodyId(other));
                                let expected = if model.is_empty() {
                                    ContactState::Idle
                                } else {
                                    ContactState::InContact
                                };
                                prop_assert_eq!(policy.state(), expected);
                            }
                        }
                    }
                }
                // Speed magnitude never changes, only signs
                prop_assert_eq!(ball.vel.abs(), Vec2::new(300.0, 300.0));
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn prop_single_flag(ops in proptest::collection::vec(op(), 1..64)) {
                run(ContactTracking::SingleFlag, &ops)?;
            }

            #[test]
            fn prop_per_partner(ops in proptest::collection::vec(op(), 1..64)) {
                run(ContactTracking::PerPartner, &ops)?;
            }
        }
    }
}
