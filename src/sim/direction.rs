//! Axis-aligned directions and small direction sets
//!
//! Screen coordinates: +x is right, +y is down.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector in screen space
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }

    /// Velocity of the given speed along this direction
    #[inline]
    pub fn velocity(self, speed: f32) -> Vec2 {
        self.unit() * speed
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Direction a velocity points along; the horizontal axis wins ties
    pub fn from_velocity(velocity: Vec2) -> Option<Direction> {
        if velocity.x > 0.0 {
            Some(Direction::Right)
        } else if velocity.x < 0.0 {
            Some(Direction::Left)
        } else if velocity.y < 0.0 {
            Some(Direction::Up)
        } else if velocity.y > 0.0 {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// Sprite rotation (radians) when facing this way
    pub fn facing_angle(self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Direction::Right => 0.0,
            Direction::Left => PI,
            Direction::Down => FRAC_PI_2,
            Direction::Up => PI * 1.5,
        }
    }
}

bitflags! {
    /// Set of directions, one bit each
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirectionSet: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl From<Direction> for DirectionSet {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => DirectionSet::UP,
            Direction::Down => DirectionSet::DOWN,
            Direction::Left => DirectionSet::LEFT,
            Direction::Right => DirectionSet::RIGHT,
        }
    }
}

impl DirectionSet {
    #[inline]
    pub fn has(self, dir: Direction) -> bool {
        self.contains(dir.into())
    }

    #[inline]
    pub fn add(&mut self, dir: Direction) {
        self.insert(dir.into());
    }

    pub fn len(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Members in Up, Down, Left, Right order
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::iter().filter(move |d| self.has(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(DirectionSet::empty(), |set, d| set | d.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        for dir in Direction::iter() {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.unit() + dir.opposite().unit(), Vec2::ZERO);
        }
    }

    #[test]
    fn test_from_velocity() {
        assert_eq!(Direction::from_velocity(Vec2::new(2.0, 0.0)), Some(Direction::Right));
        assert_eq!(Direction::from_velocity(Vec2::new(-2.0, 0.0)), Some(Direction::Left));
        assert_eq!(Direction::from_velocity(Vec2::new(0.0, -2.0)), Some(Direction::Up));
        assert_eq!(Direction::from_velocity(Vec2::new(0.0, 2.0)), Some(Direction::Down));
        assert_eq!(Direction::from_velocity(Vec2::ZERO), None);
        for dir in Direction::iter() {
            assert_eq!(Direction::from_velocity(dir.velocity(3.0)), Some(dir));
        }
    }

    #[test]
    fn test_facing_angles() {
        use std::f32::consts::{FRAC_PI_2, PI};
        assert_eq!(Direction::Right.facing_angle(), 0.0);
        assert_eq!(Direction::Left.facing_angle(), PI);
        assert_eq!(Direction::Down.facing_angle(), FRAC_PI_2);
        assert_eq!(Direction::Up.facing_angle(), 1.5 * PI);
    }

    #[test]
    fn test_set_membership() {
        let mut set = DirectionSet::empty();
        assert_eq!(set.len(), 0);
        set.add(Direction::Left);
        set.add(Direction::Up);
        set.add(Direction::Left);
        assert_eq!(set.len(), 2);
        assert!(set.has(Direction::Up));
        assert!(!set.has(Direction::Right));
        assert_eq!(
            set.directions().collect::<Vec<_>>(),
            vec![Direction::Up, Direction::Left]
        );
    }

    #[test]
    fn test_set_difference() {
        let previous: DirectionSet = [Direction::Up, Direction::Down, Direction::Right]
            .into_iter()
            .collect();
        let current: DirectionSet = [Direction::Up, Direction::Right].into_iter().collect();
        assert_eq!(previous - current, DirectionSet::DOWN);
        assert_eq!(previous.difference(current).len(), 1);
    }

    #[test]
    fn test_display_lowercase() {
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Right.to_string(), "right");
    }
}
