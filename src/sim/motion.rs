//! Position integration and tunnel wraparound

use super::entity::{MovableCircle, Player};
use crate::consts::*;

/// Vertical slack when deciding whether an agent is in the tunnel row
const TUNNEL_ROW_SLACK: f32 = 0.5;

/// Teleport an agent through the side tunnel if it has reached an exit.
///
/// Only agents heading out through an exit are moved, so an agent parked on
/// an exit (e.g. while paused) stays put. Returns true on teleport.
pub fn wrap_tunnel<A: MovableCircle + ?Sized>(agent: &mut A) -> bool {
    let pos = agent.position();
    let tunnel_y = TUNNEL_ROW as f32 * TILE_SIZE + HALF_TILE;
    if (pos.y - tunnel_y).abs() > TUNNEL_ROW_SLACK {
        return false;
    }

    let vx = agent.velocity().x;
    if pos.x <= TUNNEL_LEFT_X && vx < 0.0 {
        agent.set_position(glam::Vec2::new(TUNNEL_RIGHT_X, pos.y));
        true
    } else if pos.x >= TUNNEL_RIGHT_X && vx > 0.0 {
        agent.set_position(glam::Vec2::new(TUNNEL_LEFT_X, pos.y));
        true
    } else {
        false
    }
}

/// Advance an agent by one tick: wraparound always, integration only while active
pub fn advance<A: MovableCircle + ?Sized>(agent: &mut A, active: bool) {
    wrap_tunnel(agent);
    if active {
        let next = agent.position() + agent.velocity();
        agent.set_position(next);
    }
}

/// Player-specific per-tick update: motion plus mouth animation
pub fn advance_player(player: &mut Player, active: bool) {
    advance(player, active);
    if active && player.moving {
        player.animate_mouth();
    }
}
