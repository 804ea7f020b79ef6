pub mod flappy_scene;
pub mod game_common;

use crate::feedback::Feedback;
use flappy::config::GameConfig;
use flappy::game::{Game, Viewport};
use ratatui::{layout::Rect, Frame};

/// Main UI drawing function.
pub fn draw_ui(frame: &mut Frame, game: &Game, feedback: &Feedback) {
    let area = frame.size();
    flappy_scene::render_flappy(frame, area, game, feedback);
}

/// World size covered by the play field for a terminal of this size.
pub fn viewport_for(terminal_area: Rect, config: &GameConfig) -> Viewport {
    let content = game_common::compute_game_layout(terminal_area).content;
    Viewport::new(
        content.width as f64 * config.cell_width,
        content.height as f64 * config.cell_height,
    )
}
