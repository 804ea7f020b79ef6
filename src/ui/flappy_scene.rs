//! UI rendering for the game scene.

use super::game_common::{
    create_game_layout, render_game_over_banner, render_info_panel_frame, render_status_bar,
};
use crate::feedback::{Feedback, FlashKind};
use flappy::game::{Bird, Game, GamePhase};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

const CONTROLS: &[(&str, &str)] = &[("[Space/Up]", "Flap"), ("[r]", "Reset"), ("[q]", "Quit")];

/// What a single terminal cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Bird,
    Pipe,
    GapEdge,
}

/// Render the full game scene.
pub fn render_flappy(frame: &mut Frame, area: Rect, game: &Game, feedback: &Feedback) {
    let border = match game.phase() {
        GamePhase::GameOver => Color::Red,
        _ => Color::Cyan,
    };
    let layout = create_game_layout(frame, area, " Flappy Bird ", border);

    render_play_area(frame, layout.content, game);
    render_status_bar_content(frame, layout.status_bar, game, feedback);
    render_info_panel(frame, layout.info_panel, game);

    if game.phase() == GamePhase::GameOver {
        let highlight = if game.is_new_high_score() && game.score() > 0 {
            "NEW BEST!"
        } else {
            ""
        };
        render_game_over_banner(
            frame,
            layout.content,
            "CRASH!",
            &format!("You passed {} pipes.", game.score()),
            highlight,
        );
    }
}

/// Classify the cell at (`col`, `row`) by sampling the world at its centre.
fn classify_cell(game: &Game, col: u16, row: u16) -> Cell {
    let config = game.config();
    let wx = (col as f64 + 0.5) * config.cell_width;
    let wy = (row as f64 + 0.5) * config.cell_height;

    let bird = game.bird();
    let (bird_left, bird_right) = Bird::horizontal_span(game.viewport(), config.bird_size);
    if wx >= bird_left && wx < bird_right && wy >= bird.y && wy < bird.y + config.bird_size {
        return Cell::Bird;
    }

    for pipe in game.pipes() {
        if wx < pipe.x || wx >= pipe.trailing_edge(config.pipe_width) {
            continue;
        }
        let gap_bottom = pipe.gap_bottom(config.gap_size);
        if wy < pipe.gap_top || wy > gap_bottom {
            return Cell::Pipe;
        }
        if wy - pipe.gap_top < config.cell_height || gap_bottom - wy < config.cell_height {
            return Cell::GapEdge;
        }
        return Cell::Empty;
    }

    Cell::Empty
}

/// The bird glyph doubles as its tilt: nose up right after a flap, nose
/// down when falling fast.
fn bird_glyph(game: &Game) -> &'static str {
    let bird = game.bird();
    if game.flap_timer() > 0 || bird.velocity < -4.0 {
        "▲"
    } else if bird.velocity > 8.0 {
        "▼"
    } else {
        "►"
    }
}

/// Render the play area with bird and pipes.
fn render_play_area(frame: &mut Frame, area: Rect, game: &Game) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let glyph = bird_glyph(game);
    let bird_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::with_capacity(area.height as usize);
    for row in 0..area.height {
        let mut spans = Vec::with_capacity(area.width as usize);
        for col in 0..area.width {
            let span = match classify_cell(game, col, row) {
                Cell::Bird => Span::styled(glyph, bird_style),
                Cell::Pipe => Span::styled("█", Style::default().fg(Color::Green)),
                Cell::GapEdge => Span::styled("░", Style::default().fg(Color::DarkGray)),
                Cell::Empty => Span::raw(" "),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the status bar at the bottom.
fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &Game, feedback: &Feedback) {
    if let Some(flash) = feedback.active_flash(Instant::now()) {
        let color = match flash.kind {
            FlashKind::Score => Color::Green,
            FlashKind::Crash => Color::Red,
            FlashKind::Start => Color::Cyan,
        };
        render_status_bar(frame, area, &flash.text, color, CONTROLS);
        return;
    }

    match game.phase() {
        GamePhase::Ready => render_status_bar(
            frame,
            area,
            "Press Space to start!",
            Color::Yellow,
            CONTROLS,
        ),
        GamePhase::Playing => render_status_bar(
            frame,
            area,
            &format!("Score: {}", game.score()),
            Color::Green,
            CONTROLS,
        ),
        GamePhase::GameOver => render_status_bar(
            frame,
            area,
            &format!("Final score: {}", game.score()),
            Color::Red,
            CONTROLS,
        ),
    }
}

/// Render the info panel on the right.
fn render_info_panel(frame: &mut Frame, area: Rect, game: &Game) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", game.phase().name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                format!("{}", game.score()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best: ", label),
            Span::styled(
                format!("{}", game.high_score()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Pipes: ", label),
            Span::styled(
                format!("{}", game.pipes().len()),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Games: ", label),
            Span::raw(format!("{}", game.sessions_played())),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
