//! Ghost decision engine
//!
//! Ghosts only turn at junctions. A junction is noticed when the set of
//! directions blocked around the ghost differs from the set recorded at the
//! previous sensing. The directions that were blocked before but are open now
//! are the available turns.
//!
//! Note the asymmetry: a set that merely *grows* (a wall appearing ahead or
//! to the side) is adopted silently, so ghosts only turn when a previously
//! blocked side opens up.

use glam::Vec2;
use rand::Rng;

use super::collision::blocked_directions;
use super::direction::{Direction, DirectionSet};
use super::entity::{Ghost, GhostMode};
use super::maze::WallSegment;

/// Pick a direction out of `pathways` for a ghost in `mode`.
///
/// Returns `None` only when `pathways` is empty.
pub fn choose_direction<R: Rng>(
    mode: GhostMode,
    pathways: DirectionSet,
    ghost_pos: Vec2,
    player_pos: Vec2,
    rng: &mut R,
) -> Option<Direction> {
    let preferred = match mode {
        GhostMode::Chasing => [
            (player_pos.y < ghost_pos.y, Direction::Up),
            (player_pos.y > ghost_pos.y, Direction::Down),
            (player_pos.x < ghost_pos.x, Direction::Left),
            (player_pos.x > ghost_pos.x, Direction::Right),
        ],
        GhostMode::Fleeing => [
            (player_pos.y > ghost_pos.y, Direction::Up),
            (player_pos.y < ghost_pos.y, Direction::Down),
            (player_pos.x > ghost_pos.x, Direction::Left),
            (player_pos.x < ghost_pos.x, Direction::Right),
        ],
        GhostMode::Wandering => return random_pathway(pathways, rng),
    };

    preferred
        .into_iter()
        .find(|&(wanted, dir)| wanted && pathways.has(dir))
        .map(|(_, dir)| dir)
        .or_else(|| random_pathway(pathways, rng))
}

/// Uniform pick among the members of a set
fn random_pathway<R: Rng>(pathways: DirectionSet, rng: &mut R) -> Option<Direction> {
    let count = pathways.len();
    if count == 0 {
        return None;
    }
    pathways.directions().nth(rng.random_range(0..count))
}

/// Sense walls around a ghost and turn it if it has reached a junction.
///
/// Returns the new heading when a turn was taken.
pub fn steer_ghost<R: Rng>(
    ghost: &mut Ghost,
    player_pos: Vec2,
    walls: &[WallSegment],
    rng: &mut R,
) -> Option<Direction> {
    let current = blocked_directions(ghost, ghost.speed, walls);

    if current.len() > ghost.prev_blocked.len() {
        ghost.prev_blocked = current;
    }
    if current == ghost.prev_blocked {
        return None;
    }

    // Close off the way we came from
    if let Some(heading) = Direction::from_velocity(ghost.velocity) {
        ghost.prev_blocked.add(heading);
    }
    let pathways = ghost.prev_blocked - current;

    let choice = choose_direction(ghost.mode(), pathways, ghost.position, player_pos, rng);
    if let Some(dir) = choice {
        ghost.velocity = dir.velocity(ghost.speed);
        log::trace!("{} turns {} at {:?}", ghost.name, dir, ghost.position);
    }
    ghost.prev_blocked = DirectionSet::empty();
    choice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::GhostName;
    use crate::sim::maze::Maze;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn set(dirs: &[Direction]) -> DirectionSet {
        dirs.iter().copied().collect()
    }

    #[test]
    fn test_chasing_prefers_up_when_player_above() {
        let mut rng = Pcg32::seed_from_u64(1);
        let ghost = Vec2::new(100.0, 100.0);
        let player = Vec2::new(50.0, 40.0);
        let pathways = set(&[Direction::Up, Direction::Left]);
        for _ in 0..20 {
            assert_eq!(
                choose_direction(GhostMode::Chasing, pathways, ghost, player, &mut rng),
                Some(Direction::Up)
            );
        }
    }

    #[test]
    fn test_chasing_falls_back_to_horizontal() {
        let mut rng = Pcg32::seed_from_u64(1);
        let ghost = Vec2::new(100.0, 100.0);
        let player = Vec2::new(300.0, 40.0);
        let pathways = set(&[Direction::Down, Direction::Right]);
        assert_eq!(
            choose_direction(GhostMode::Chasing, pathways, ghost, player, &mut rng),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_fleeing_inverts_preferences() {
        let mut rng = Pcg32::seed_from_u64(1);
        let ghost = Vec2::new(100.0, 100.0);
        let player_above = Vec2::new(100.0, 40.0);
        let pathways = set(&[Direction::Up, Direction::Down]);
        assert_eq!(
            choose_direction(GhostMode::Fleeing, pathways, ghost, player_above, &mut rng),
            Some(Direction::Down)
        );

        let player_right = Vec2::new(200.0, 100.0);
        let pathways = set(&[Direction::Left, Direction::Right]);
        assert_eq!(
            choose_direction(GhostMode::Fleeing, pathways, ghost, player_right, &mut rng),
            Some(Direction::Left)
        );
    }

    #[test]
    fn test_same_position_falls_back_to_random_member() {
        let mut rng = Pcg32::seed_from_u64(7);
        let pos = Vec2::new(100.0, 100.0);
        let pathways = set(&[Direction::Left, Direction::Down]);
        for _ in 0..50 {
            let dir = choose_direction(GhostMode::Chasing, pathways, pos, pos, &mut rng).unwrap();
            assert!(pathways.has(dir));
        }
    }

    #[test]
    fn test_wandering_covers_all_pathways() {
        let mut rng = Pcg32::seed_from_u64(3);
        let pathways = set(&[Direction::Up, Direction::Left, Direction::Right]);
        let mut seen = DirectionSet::empty();
        for _ in 0..200 {
            let dir = choose_direction(
                GhostMode::Wandering,
                pathways,
                Vec2::ZERO,
                Vec2::ONE,
                &mut rng,
            )
            .unwrap();
            seen.add(dir);
        }
        assert_eq!(seen, pathways);
    }

    #[test]
    fn test_empty_pathways_yield_none() {
        let mut rng = Pcg32::seed_from_u64(3);
        for mode in [GhostMode::Wandering, GhostMode::Chasing, GhostMode::Fleeing] {
            assert_eq!(
                choose_direction(mode, DirectionSet::empty(), Vec2::ZERO, Vec2::ONE, &mut rng),
                None
            );
        }
    }

    /// Corridor running right from (1,1) that turns down at column 2
    fn corner_maze() -> Maze {
        Maze::parse(&["#####", "#  ##", "## ##", "## ##", "#####"]).unwrap()
    }

    #[test]
    fn test_turns_down_at_corner() {
        let maze = corner_maze();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut ghost = Ghost::new(GhostName::Blinky, 2.0, Vec2::new(2.0, 0.0));
        ghost.position = Vec2::new(45.0, 45.0);
        let player = Vec2::new(500.0, 500.0);

        let mut turned = None;
        for step in 1..=15 {
            ghost.position += ghost.velocity;
            if let Some(dir) = steer_ghost(&mut ghost, player, &maze.walls, &mut rng) {
                turned = Some((step, dir));
                break;
            }
        }

        assert_eq!(turned, Some((15, Direction::Down)));
        assert_eq!(ghost.position, Vec2::new(75.0, 45.0));
        assert_eq!(ghost.velocity, Vec2::new(0.0, 2.0));
        assert!(ghost.prev_blocked.is_empty());
    }

    #[test]
    fn test_growing_blocked_set_is_adopted_silently() {
        let maze = corner_maze();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut ghost = Ghost::new(GhostName::Blinky, 2.0, Vec2::new(2.0, 0.0));
        ghost.position = Vec2::new(47.0, 45.0);
        ghost.prev_blocked = DirectionSet::UP;

        // {up, down} is larger than {up}: recorded without a turn
        assert_eq!(steer_ghost(&mut ghost, Vec2::ZERO, &maze.walls, &mut rng), None);
        assert_eq!(ghost.prev_blocked, DirectionSet::UP | DirectionSet::DOWN);
        assert_eq!(ghost.velocity, Vec2::new(2.0, 0.0));
    }
}
