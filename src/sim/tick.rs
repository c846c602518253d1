//! Fixed timestep simulation tick
//!
//! One call advances the round by one frame: commands, intent, timers,
//! player steering, contacts, pickups, win check, motion, ghost decisions.

use glam::Vec2;

use super::ai::steer_ghost;
use super::collision::{can_move, circles_overlap};
use super::demo::autopilot;
use super::direction::Direction;
use super::motion::{advance, advance_player};
use super::state::{GameEvent, GameState, Outcome};

/// Input read at the start of a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional intent (arrow keys / swipe)
    pub direction: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Start a new round once the current one has ended
    pub start: bool,
    /// Abandon the current round and start over
    pub restart: bool,
    /// Idle/demo mode - the autopilot steers the player
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    if input.restart || (input.start && state.round.phase.is_ended()) {
        state.new_round();
    }
    if input.pause {
        state.toggle_pause();
    }

    if state.round.phase.accepts_intent() {
        let mut direction = input.direction;
        if direction.is_none() && input.idle_mode {
            direction = autopilot(state);
        }
        if direction.is_some() {
            state.intent = direction;
        }
    }

    state.run_timers();

    if state.round.phase.accepts_intent() {
        steer_player(state);
    }

    if state.round.phase.is_active() {
        check_ghost_contacts(state);
        if !state.round.phase.is_ended() {
            collect_pickups(state);
            if state.maze.is_cleared() {
                state.end_round(Outcome::Won);
            }
        }
    }

    let active = state.round.phase.is_active();
    advance_player(&mut state.player, active);
    for ghost in &mut state.ghosts {
        advance(ghost, active);
    }

    if active {
        let player_pos = state.player.position;
        for ghost in &mut state.ghosts {
            steer_ghost(ghost, player_pos, &state.maze.walls, &mut state.rng);
        }
    }

    state.player.update_facing();
}

/// Apply the latched intent to the player's velocity
fn steer_player(state: &mut GameState) {
    let speed = state.tuning.player_speed;
    let walls = &state.maze.walls;
    let player = &mut state.player;

    if let Some(dir) = state.intent {
        let wanted = dir.velocity(speed);
        if can_move(player, wanted, walls) {
            player.velocity = wanted;
            player.moving = true;
        } else {
            // Keep going along the other axis until the turn opens up
            if dir.is_horizontal() {
                player.velocity.x = 0.0;
            } else {
                player.velocity.y = 0.0;
            }
            player.moving = player.velocity != Vec2::ZERO;
        }
    }

    if !can_move(player, player.velocity, walls) {
        player.velocity = Vec2::ZERO;
        player.moving = false;
    }
}

/// Eat scared ghosts; the first other ghost touching the player is a hit.
/// Ghosts are checked last-released first.
fn check_ghost_contacts(state: &mut GameState) {
    for index in (0..state.ghosts.len()).rev() {
        let ghost = &state.ghosts[index];
        if !circles_overlap(
            state.player.position,
            state.player.radius,
            ghost.position,
            ghost.radius,
        ) {
            continue;
        }
        if ghost.scared {
            state.eat_ghost(index);
        } else {
            state.hit_player();
            return;
        }
    }
}

fn collect_pickups(state: &mut GameState) {
    let center = state.player.position;
    let radius = state.player.radius;

    let mut pellets = Vec::new();
    state.maze.pellets.retain(|p| {
        let hit = circles_overlap(center, radius, p.position, p.radius);
        if hit {
            pellets.push(p.position);
        }
        !hit
    });
    for position in pellets {
        state.events.push(GameEvent::PelletEaten { position });
        state.add_score(state.tuning.pellet_points);
    }

    let mut power_ups = Vec::new();
    state.maze.power_ups.retain(|p| {
        let hit = circles_overlap(center, radius, p.position, p.radius);
        if hit {
            power_ups.push(p.position);
        }
        !hit
    });
    for position in power_ups {
        state.events.push(GameEvent::PowerUpEaten { position });
        state.start_scared_window();
    }
}

/// Run ticks until the ready banner is gone
#[cfg(test)]
pub(crate) fn tick_until_active(state: &mut GameState) {
    let input = TickInput::default();
    for _ in 0..1000 {
        if state.round.phase.is_active() {
            return;
        }
        tick(state, &input);
    }
    panic!("round never became active");
}
