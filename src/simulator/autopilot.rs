//! A simple bot that decides when to tap.

use crate::game::{Bird, Game, GamePhase};

/// Safety buffer kept between the bird's bottom and the gap's lower edge.
const BOTTOM_BUFFER: f64 = 30.0;

/// Returns true if the bot wants to tap this tick.
///
/// Aims for the nearest pipe whose trailing edge is still ahead of the bird's
/// left side. Taps when the bird is falling and has sunk below the safe line
/// of that gap (or below mid-screen when no pipe is ahead).
pub fn should_tap(game: &Game) -> bool {
    if game.phase() != GamePhase::Playing {
        return false;
    }

    let config = game.config();
    let viewport = game.viewport();
    let bird = game.bird();
    let (bird_left, _) = Bird::horizontal_span(viewport, config.bird_size);

    let target_bottom = game
        .pipes()
        .iter()
        .find(|p| p.trailing_edge(config.pipe_width) > bird_left)
        .map(|p| p.gap_bottom(config.gap_size) - BOTTOM_BUFFER)
        .unwrap_or(viewport.height / 2.0 + config.gap_size / 2.0);

    let bird_bottom = bird.y + config.bird_size;
    bird.velocity >= 0.0 && bird_bottom + bird.velocity + config.gravity > target_bottom
}
