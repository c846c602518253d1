//! Maze Chase - A tile maze chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, collisions, ghost AI, round state)
//! - `audio`: Maps simulation events onto sound cues
//! - `ui`: HUD model (score, hearts, banners)
//! - `render`: Text frame dump for headless runs
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{ConfigError, MazeError};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per display refresh at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per simulated second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Maze tile edge length (pixels)
    pub const TILE_SIZE: f32 = 30.0;
    pub const HALF_TILE: f32 = TILE_SIZE / 2.0;
    pub const MAZE_COLS: usize = 19;
    pub const MAZE_ROWS: usize = 22;

    /// Tunnel row and its two exits (tile centers)
    pub const TUNNEL_ROW: usize = 10;
    pub const TUNNEL_LEFT_X: f32 = HALF_TILE;
    pub const TUNNEL_RIGHT_X: f32 = TILE_SIZE * 18.0 + HALF_TILE;

    /// Agent sizes
    pub const PLAYER_RADIUS: f32 = 12.0;
    pub const GHOST_RADIUS: f32 = 13.0;
    pub const PELLET_RADIUS: f32 = 3.0;
    pub const POWER_UP_RADIUS: f32 = 8.0;

    /// Player mouth aperture (radians)
    pub const MOUTH_MAX: f32 = 0.75;

    /// Spawn tiles (column, row)
    pub const PLAYER_SPAWN: (usize, usize) = (9, 16);
    pub const GHOST_HOME: (usize, usize) = (9, 10);

    pub const MAX_HEARTS: u8 = 3;
}

/// Center of the tile at (column, row)
#[inline]
pub fn tile_center(col: usize, row: usize) -> Vec2 {
    Vec2::new(
        col as f32 * consts::TILE_SIZE + consts::HALF_TILE,
        row as f32 * consts::TILE_SIZE + consts::HALF_TILE,
    )
}

/// Top-left corner of the tile at (column, row)
#[inline]
pub fn tile_origin(col: usize, row: usize) -> Vec2 {
    Vec2::new(col as f32 * consts::TILE_SIZE, row as f32 * consts::TILE_SIZE)
}
