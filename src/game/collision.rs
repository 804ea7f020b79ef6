//! Collision predicate for the bird against the world and the pipes.

use super::types::{Bird, Pipe, Viewport};
use crate::config::GameConfig;

/// Returns true if the bird's box at `bird_y` touches a world bound or a pipe.
///
/// World bounds are inclusive (`<= 0`, `>= height` collide). Horizontal pipe
/// overlap is strict, so a bird exactly flush with a pipe edge is clear.
/// Pure: same inputs always give the same answer.
pub fn is_colliding(bird_y: f64, pipes: &[Pipe], viewport: Viewport, config: &GameConfig) -> bool {
    hits_world_bounds(bird_y, viewport.height, config.bird_size)
        || pipes
            .iter()
            .any(|pipe| hits_pipe(bird_y, pipe, viewport, config))
}

/// Ceiling or floor contact.
pub fn hits_world_bounds(bird_y: f64, world_height: f64, bird_size: f64) -> bool {
    bird_y <= 0.0 || bird_y + bird_size >= world_height
}

/// Contact with one pipe's top or bottom segment.
pub fn hits_pipe(bird_y: f64, pipe: &Pipe, viewport: Viewport, config: &GameConfig) -> bool {
    let (bird_left, bird_right) = Bird::horizontal_span(viewport, config.bird_size);
    let pipe_left = pipe.x;
    let pipe_right = pipe.trailing_edge(config.pipe_width);

    if !(bird_right > pipe_left && bird_left < pipe_right) {
        return false;
    }

    let bird_top = bird_y;
    let bird_bottom = bird_y + config.bird_size;
    bird_top < pipe.gap_top || bird_bottom > pipe.gap_bottom(config.gap_size)
}
