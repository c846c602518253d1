//! Moving agents: the player and the ghosts
//!
//! Both are circles with a position and a velocity; collision and motion code
//! works on the shared [`MovableCircle`] capability.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use super::direction::{Direction, DirectionSet};
use crate::consts::*;
use crate::tile_center;

/// Shared shape of every moving agent
pub trait MovableCircle {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn velocity(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// The player-controlled agent
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Sprite rotation (radians), follows the last nonzero velocity
    pub facing: f32,
    /// Current mouth aperture (radians)
    pub mouth_open: f32,
    /// Signed aperture change per tick
    pub mouth_rate: f32,
    /// False while pressed against a wall
    pub moving: bool,
}

impl Player {
    /// Player at the spawn tile heading left
    pub fn spawn(speed: f32, mouth_rate: f32) -> Self {
        Self {
            position: tile_center(PLAYER_SPAWN.0, PLAYER_SPAWN.1),
            velocity: Direction::Left.velocity(speed),
            radius: PLAYER_RADIUS,
            facing: 0.0,
            mouth_open: MOUTH_MAX,
            mouth_rate,
            moving: true,
        }
    }

    /// Put the player back on the spawn tile after being caught
    pub fn respawn(&mut self, speed: f32) {
        self.position = tile_center(PLAYER_SPAWN.0, PLAYER_SPAWN.1);
        self.velocity = Direction::Left.velocity(speed);
        self.moving = true;
    }

    /// Oscillate the mouth between closed and [`MOUTH_MAX`]
    pub fn animate_mouth(&mut self) {
        if self.mouth_open < 0.0 || self.mouth_open > MOUTH_MAX {
            self.mouth_rate = -self.mouth_rate;
        }
        self.mouth_open += self.mouth_rate;
    }

    /// Rotate to match the current velocity; a stopped player keeps its facing
    pub fn update_facing(&mut self) {
        if let Some(dir) = Direction::from_velocity(self.velocity) {
            self.facing = dir.facing_angle();
        }
    }
}

impl MovableCircle for Player {
    fn position(&self) -> Vec2 {
        self.position
    }
    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
    fn velocity(&self) -> Vec2 {
        self.velocity
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// The four ghosts, in release order of the classic game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
pub enum GhostName {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostName {
    /// Spawn tile (column, row)
    pub fn spawn_tile(self) -> (usize, usize) {
        match self {
            GhostName::Blinky => (9, 8),
            GhostName::Pinky => (9, 10),
            GhostName::Inky => (10, 10),
            GhostName::Clyde => (8, 10),
        }
    }

    /// Body color (RGB)
    pub fn color(self) -> [u8; 3] {
        match self {
            GhostName::Blinky => [255, 0, 0],
            GhostName::Pinky => [255, 192, 203],
            GhostName::Inky => [0, 255, 255],
            GhostName::Clyde => [222, 184, 135],
        }
    }

    /// Only Blinky starts outside the house already moving
    pub fn starts_drifting(self) -> bool {
        self == GhostName::Blinky
    }
}

/// Behaviour derived from a ghost's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostMode {
    Wandering,
    Chasing,
    Fleeing,
}

/// An autonomous adversary
#[derive(Debug, Clone)]
pub struct Ghost {
    pub name: GhostName,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Vulnerable during a scared window
    pub scared: bool,
    /// Steers toward the player at junctions
    pub chase: bool,
    pub color: [u8; 3],
    /// Directions that were blocked at the last sensing, reset after each turn
    pub prev_blocked: DirectionSet,
}

impl Ghost {
    /// Ghost at its spawn tile with the given initial velocity
    pub fn new(name: GhostName, speed: f32, velocity: Vec2) -> Self {
        let (col, row) = name.spawn_tile();
        Self {
            name,
            position: tile_center(col, row),
            velocity,
            radius: GHOST_RADIUS,
            speed,
            scared: false,
            chase: false,
            color: name.color(),
            prev_blocked: DirectionSet::empty(),
        }
    }

    pub fn mode(&self) -> GhostMode {
        if self.scared {
            GhostMode::Fleeing
        } else if self.chase {
            GhostMode::Chasing
        } else {
            GhostMode::Wandering
        }
    }

    /// Send an eaten ghost back to the house
    pub fn return_home(&mut self, velocity: Vec2) {
        self.position = tile_center(GHOST_HOME.0, GHOST_HOME.1);
        self.velocity = velocity;
        self.scared = false;
        self.prev_blocked = DirectionSet::empty();
    }
}

impl MovableCircle for Ghost {
    fn position(&self) -> Vec2 {
        self.position
    }
    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
    fn velocity(&self) -> Vec2 {
        self.velocity
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_spawn() {
        let player = Player::spawn(3.0, 0.12);
        assert_eq!(player.position, Vec2::new(285.0, 495.0));
        assert_eq!(player.velocity, Vec2::new(-3.0, 0.0));
        assert!(player.moving);
    }

    #[test]
    fn test_mouth_stays_near_range() {
        let mut player = Player::spawn(3.0, 0.12);
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for _ in 0..200 {
            player.animate_mouth();
            min = min.min(player.mouth_open);
            max = max.max(player.mouth_open);
        }
        // Overshoots by at most one step before reversing
        assert!(min >= -0.12 - 1e-4);
        assert!(max <= MOUTH_MAX + 0.12 + 1e-4);
        assert!(max - min > 0.7);
    }

    #[test]
    fn test_facing_follows_velocity() {
        let mut player = Player::spawn(3.0, 0.12);
        player.update_facing();
        assert_eq!(player.facing, std::f32::consts::PI);

        player.velocity = Vec2::new(0.0, -3.0);
        player.update_facing();
        assert_eq!(player.facing, std::f32::consts::PI * 1.5);

        player.velocity = Vec2::ZERO;
        player.update_facing();
        assert_eq!(player.facing, std::f32::consts::PI * 1.5);
    }

    #[test]
    fn test_ghost_modes() {
        let mut ghost = Ghost::new(GhostName::Inky, 2.0, Vec2::ZERO);
        assert_eq!(ghost.position, Vec2::new(315.0, 315.0));
        assert_eq!(ghost.mode(), GhostMode::Wandering);
        ghost.chase = true;
        assert_eq!(ghost.mode(), GhostMode::Chasing);
        ghost.scared = true;
        assert_eq!(ghost.mode(), GhostMode::Fleeing);
    }

    #[test]
    fn test_return_home_clears_scared() {
        let mut ghost = Ghost::new(GhostName::Blinky, 2.0, Vec2::new(2.0, 0.0));
        ghost.scared = true;
        ghost.chase = true;
        ghost.position = Vec2::new(45.0, 45.0);
        ghost.prev_blocked = DirectionSet::UP;
        ghost.return_home(Vec2::new(-2.0, 0.0));
        assert_eq!(ghost.position, Vec2::new(285.0, 315.0));
        assert!(!ghost.scared);
        assert!(ghost.chase);
        assert!(ghost.prev_blocked.is_empty());
    }
}
