//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (ghosts in release order)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod demo;
pub mod direction;
pub mod entity;
pub mod maze;
pub mod motion;
pub mod state;
pub mod tick;
pub mod timers;

/// Number of ghosts in a round
pub const GHOST_COUNT: usize = 4;

pub use ai::{choose_direction, steer_ghost};
pub use collision::{blocked_directions, can_move, circles_overlap};
pub use direction::{Direction, DirectionSet};
pub use entity::{Ghost, GhostMode, GhostName, MovableCircle, Player};
pub use maze::{CLASSIC_LAYOUT, Collectible, CollectibleKind, Maze, Tile, WallSegment, WallShape};
pub use motion::{advance, advance_player, wrap_tunnel};
pub use state::{GameEvent, GamePhase, GameState, Outcome, PauseCause, RoundState};
pub use tick::{TickInput, tick};
pub use timers::{TimerEvent, TimerGate, TimerQueue};
