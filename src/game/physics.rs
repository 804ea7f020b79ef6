//! Vertical kinematics for the bird.

use super::types::Bird;

/// Single physics step: accumulate gravity, then move.
///
/// No velocity clamp and no position clamp; the collision check that follows
/// sees the raw position even if it is already outside the world.
pub fn apply_gravity(bird: &mut Bird, gravity: f64) {
    bird.velocity += gravity;
    bird.y += bird.velocity;
}

/// Jump impulse. Overwrites velocity regardless of its previous value.
pub fn apply_jump(bird: &mut Bird, jump_velocity: f64) {
    bird.velocity = jump_velocity;
}
