//! Headless text renderer
//!
//! Draws one character per tile: walls, collectibles still on the floor and
//! agents on top. Reads the state only.

use glam::Vec2;

use crate::sim::{GameState, GhostName, Maze};

fn ghost_glyph(name: GhostName, scared: bool) -> char {
    if scared {
        return 'w';
    }
    match name {
        GhostName::Blinky => 'B',
        GhostName::Pinky => 'P',
        GhostName::Inky => 'I',
        GhostName::Clyde => 'C',
    }
}

fn put(grid: &mut [Vec<char>], maze: &Maze, at: Vec2, glyph: char) {
    if let Some((col, row)) = maze.tile_at(at) {
        grid[row][col] = glyph;
    }
}

/// Render the playfield as text, one line per tile row
pub fn text_frame(state: &GameState) -> String {
    let maze = &state.maze;
    let mut grid = vec![vec![' '; maze.cols]; maze.rows];

    for wall in &maze.walls {
        put(&mut grid, maze, wall.center(), '#');
    }
    for pellet in &maze.pellets {
        put(&mut grid, maze, pellet.position, '.');
    }
    for power_up in &maze.power_ups {
        put(&mut grid, maze, power_up.position, 'o');
    }
    put(&mut grid, maze, state.player.position, '@');
    for ghost in &state.ghosts {
        put(&mut grid, maze, ghost.position, ghost_glyph(ghost.name, ghost.scared));
    }

    let mut out = String::with_capacity((maze.cols + 1) * maze.rows);
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}
