//! Player vertical physics
//!
//! Gravity applies unconditionally every tick; the floor clamp zeroes the
//! velocity exactly on first contact so `grounded` is true iff the player
//! rests on the ground line.

use super::state::Player;
use crate::consts::*;

/// Advance the player by one tick of gravity and integration
pub fn integrate(player: &mut Player) {
    player.vel_y += GRAVITY;
    player.pos.y += player.vel_y;

    let floor = GROUND_Y - player.size.y;
    if player.pos.y >= floor {
        player.pos.y = floor;
        player.vel_y = 0.0;
        player.grounded = true;
        player.jumping = false;
    } else {
        player.grounded = false;
    }

    if player.grounded {
        player.frame = player.frame.wrapping_add(1);
    }
}

/// Launch a jump. Only effective from the ground; returns whether the
/// impulse was applied (no double-jump).
pub fn jump(player: &mut Player, impulse: f32) -> bool {
    if !player.grounded {
        return false;
    }
    player.vel_y = impulse;
    player.grounded = false;
    player.jumping = true;
    true
}
