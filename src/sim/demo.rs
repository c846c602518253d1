//! Demo autopilot: picks the player's intent when idling
//!
//! Heads for the nearest remaining pellet along open tiles (breadth-first over
//! the tile grid), re-planning each time the player sits on a tile center.
//! With nothing reachable it picks a random open direction.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use strum::IntoEnumIterator;

use super::collision::can_move;
use super::direction::Direction;
use super::maze::Maze;
use super::state::GameState;
use crate::tile_center;

/// Intent the autopilot would press this tick
///
/// Plans only from a tile center. Between centers it holds the current
/// heading, or closes in on a pellet lying in the same tile.
pub fn autopilot(state: &mut GameState) -> Option<Direction> {
    let speed = state.tuning.player_speed;
    let position = state.player.position;
    let heading = Direction::from_velocity(state.player.velocity);
    let Some(tile) = state.maze.tile_at(position) else {
        return heading.or(state.intent);
    };

    let offset = tile_center(tile.0, tile.1) - position;
    if offset.length() > speed * 0.5 {
        let pellet_here = state
            .maze
            .pellets
            .iter()
            .any(|p| state.maze.tile_at(p.position) == Some(tile));
        if pellet_here {
            return Some(toward(offset));
        }
        if heading.is_some() {
            return heading;
        }
    }

    if let Some(dir) = first_step_to_pellet(&state.maze, tile) {
        return Some(dir);
    }

    let open: Vec<Direction> = Direction::iter()
        .filter(|d| can_move(&state.player, d.velocity(speed), &state.maze.walls))
        .collect();
    if open.is_empty() {
        return None;
    }
    Some(open[state.rng.random_range(0..open.len())])
}

/// Axis direction that shrinks `offset` the most
fn toward(offset: Vec2) -> Direction {
    if offset.x.abs() >= offset.y.abs() {
        if offset.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if offset.y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

fn step(maze: &Maze, (col, row): (usize, usize), dir: Direction) -> Option<(usize, usize)> {
    let next = match dir {
        Direction::Up => (col, row.checked_sub(1)?),
        Direction::Down => (col, row + 1),
        Direction::Left => (col.checked_sub(1)?, row),
        Direction::Right => (col + 1, row),
    };
    maze.is_open(next.0, next.1).then_some(next)
}

/// First move on a shortest tile path from `start` to any pellet tile
fn first_step_to_pellet(maze: &Maze, start: (usize, usize)) -> Option<Direction> {
    if maze.pellets.is_empty() {
        return None;
    }
    let index = |(col, row): (usize, usize)| row * maze.cols + col;
    let mut targets = vec![false; maze.cols * maze.rows];
    for tile in maze.pellets.iter().filter_map(|p| maze.tile_at(p.position)) {
        targets[index(tile)] = true;
    }

    let mut visited = vec![false; maze.cols * maze.rows];
    let mut queue = VecDeque::new();
    visited[index(start)] = true;

    for dir in Direction::iter() {
        if let Some(next) = step(maze, start, dir) {
            visited[index(next)] = true;
            queue.push_back((next, dir));
        }
    }

    while let Some((tile, first)) = queue.pop_front() {
        if targets[index(tile)] {
            return Some(first);
        }
        for dir in Direction::iter() {
            if let Some(next) = step(maze, tile, dir) {
                if !visited[index(next)] {
                    visited[index(next)] = true;
                    queue.push_back((next, first));
                }
            }
        }
    }
    None
}
