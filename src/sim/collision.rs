//! Collision detection against the maze
//!
//! Walls are tested with a padded bounding-box check: the moving circle's
//! extents, displaced by a proposed velocity, against the wall rectangle
//! grown by `HALF_TILE - radius - 1`. The padding keeps agents centered in
//! corridors so corners don't snag them.

use glam::Vec2;
use strum::IntoEnumIterator;

use super::direction::{Direction, DirectionSet};
use super::entity::MovableCircle;
use super::maze::WallSegment;
use crate::consts::HALF_TILE;

/// Grace margin added around walls for a body of the given radius
#[inline]
pub fn wall_padding(radius: f32) -> f32 {
    HALF_TILE - radius - 1.0
}

/// Check whether a circle displaced by `velocity` would overlap a padded wall
pub fn circle_hits_wall(center: Vec2, radius: f32, velocity: Vec2, wall: &WallSegment) -> bool {
    let padding = wall_padding(radius);
    let next = center + velocity;

    next.y - radius <= wall.position.y + wall.height + padding
        && next.x + radius >= wall.position.x - padding
        && next.y + radius >= wall.position.y - padding
        && next.x - radius <= wall.position.x + wall.width + padding
}

/// Whether an agent may move by `proposed` without touching any wall
pub fn can_move<A: MovableCircle + ?Sized>(agent: &A, proposed: Vec2, walls: &[WallSegment]) -> bool {
    let center = agent.position();
    let radius = agent.radius();
    !walls
        .iter()
        .any(|wall| circle_hits_wall(center, radius, proposed, wall))
}

/// Directions in which a step of `speed` would hit a wall
pub fn blocked_directions<A: MovableCircle + ?Sized>(
    agent: &A,
    speed: f32,
    walls: &[WallSegment],
) -> DirectionSet {
    Direction::iter()
        .filter(|dir| !can_move(agent, dir.velocity(speed), walls))
        .collect()
}

/// Strict circle overlap, used for pickups and ghost contact
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}
