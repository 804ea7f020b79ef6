//! Pipe scrolling, scoring, pruning, and spawning.

use super::types::{Pipe, Session, Viewport};
use crate::config::GameConfig;
use rand::Rng;

/// Allowed range `(min, max)` for a pipe's `gap_top` in a world this tall.
///
/// Keeps `min_margin` of obstacle above and below the gap. If the world is
/// too short for that, the range collapses to a centred gap (never negative),
/// so the gap can never be placed outside the world.
pub fn gap_top_range(world_height: f64, config: &GameConfig) -> (f64, f64) {
    let min_top = config.min_margin;
    let max_top = world_height - config.gap_size - config.min_margin;
    if max_top >= min_top {
        (min_top, max_top)
    } else {
        let centered = ((world_height - config.gap_size) / 2.0).max(0.0);
        (centered, centered)
    }
}

/// Random gap position for a new pipe.
pub fn random_gap_top<R: Rng>(world_height: f64, config: &GameConfig, rng: &mut R) -> f64 {
    let (min_top, max_top) = gap_top_range(world_height, config);
    if max_top > min_top {
        rng.gen_range(min_top..=max_top)
    } else {
        min_top
    }
}

/// Spawn a new pipe at `x` with a random gap and make it the spawn reference.
pub fn spawn_pipe<R: Rng>(
    session: &mut Session,
    x: f64,
    viewport: Viewport,
    config: &GameConfig,
    rng: &mut R,
) -> Pipe {
    let gap_top = random_gap_top(viewport.height, config, rng);
    let pipe = Pipe::new(session.next_pipe_id, x, gap_top);
    session.next_pipe_id += 1;
    session.pipes.push(pipe);
    session.spawn_reference = x;
    tracing::debug!(id = pipe.id, x, gap_top, "pipe spawned");
    pipe
}

/// Move every pipe left by `speed`.
///
/// Returns how many pipes had their trailing edge cross `center_x` during this
/// move. Each pipe is credited at most once.
pub fn advance_pipes(pipes: &mut [Pipe], speed: f64, pipe_width: f64, center_x: f64) -> u32 {
    let mut crossed = 0;
    for pipe in pipes.iter_mut() {
        let before = pipe.trailing_edge(pipe_width);
        pipe.x -= speed;
        let after = pipe.trailing_edge(pipe_width);

        if !pipe.scored && before > center_x && after <= center_x {
            pipe.scored = true;
            crossed += 1;
        }
    }
    crossed
}

/// Remove pipes whose trailing edge has left the world (`x <= -pipe_width`).
pub fn prune_pipes(pipes: &mut Vec<Pipe>, pipe_width: f64) {
    pipes.retain(|p| p.x > -pipe_width);
}

/// Spacing check, run every tick.
///
/// If the most recent spawn has travelled further than the spacing threshold
/// from the right edge, spawn a new pipe there. Otherwise re-anchor the
/// reference to the rearmost pipe's current position. Returns the new pipe,
/// if any.
pub fn update_spawns<R: Rng>(
    session: &mut Session,
    viewport: Viewport,
    config: &GameConfig,
    rng: &mut R,
) -> Option<Pipe> {
    let travelled = viewport.width - session.spawn_reference;
    if travelled > config.spawn_spacing(viewport.width) {
        return Some(spawn_pipe(session, viewport.width, viewport, config, rng));
    }
    if let Some(rearmost) = session.pipes.last() {
        session.spawn_reference = rearmost.x;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const VIEWPORT: Viewport = Viewport {
        width: 400.0,
        height: 800.0,
    };

    #[test]
    fn test_gap_range_respects_margins() {
        let config = GameConfig::default();
        let (min_top, max_top) = gap_top_range(800.0, &config);
        assert!((min_top - 50.0).abs() < 1e-9);
        assert!((max_top - 550.0).abs() < 1e-9);
    }

    #[test]
    fn test_gap_range_collapses_in_short_world() {
        let config = GameConfig::default();
        // 250 tall: 50 + 200 + 50 does not fit.
        let (min_top, max_top) = gap_top_range(250.0, &config);
        assert!((min_top - 25.0).abs() < 1e-9);
        assert!((max_top - min_top).abs() < 1e-9);

        // Shorter than the gap itself: clamp at the ceiling.
        let (min_top, _) = gap_top_range(150.0, &config);
        assert!(min_top.abs() < 1e-9);
    }

    #[test]
    fn test_random_gap_always_in_range() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for height in [300.0, 450.0, 800.0, 1200.0] {
            let (min_top, max_top) = gap_top_range(height, &config);
            for _ in 0..200 {
                let top = random_gap_top(height, &config, &mut rng);
                assert!(top >= min_top && top <= max_top);
                assert!(top + config.gap_size + config.min_margin <= height);
            }
        }
    }

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut session = Session::new(VIEWPORT);

        let a = spawn_pipe(&mut session, 500.0, VIEWPORT, &config, &mut rng);
        let b = spawn_pipe(&mut session, 600.0, VIEWPORT, &config, &mut rng);

        assert_eq!(a.id, 0);
        assert_eq!(b.id, 1);
        assert_eq!(session.next_pipe_id, 2);
        assert_eq!(session.pipes.len(), 2);
        assert!((session.spawn_reference - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_advance_moves_every_pipe() {
        let mut pipes = vec![Pipe::new(0, 300.0, 100.0), Pipe::new(1, 500.0, 100.0)];
        advance_pipes(&mut pipes, 3.0, 80.0, 200.0);
        assert!((pipes[0].x - 297.0).abs() < 1e-9);
        assert!((pipes[1].x - 497.0).abs() < 1e-9);
    }

    #[test]
    fn test_crossing_scores_once() {
        // Trailing edge at 202 → 199 crosses centre 200.
        let mut pipes = vec![Pipe::new(0, 122.0, 100.0)];
        assert_eq!(advance_pipes(&mut pipes, 3.0, 80.0, 200.0), 1);
        assert!(pipes[0].scored);
        for _ in 0..10 {
            assert_eq!(advance_pipes(&mut pipes, 3.0, 80.0, 200.0), 0);
        }
    }

    #[test]
    fn test_landing_exactly_on_centre_scores() {
        // 203 → 200: "at or behind" counts.
        let mut pipes = vec![Pipe::new(0, 123.0, 100.0)];
        assert_eq!(advance_pipes(&mut pipes, 3.0, 80.0, 200.0), 1);
    }

    #[test]
    fn test_already_behind_does_not_score() {
        let mut pipes = vec![Pipe::new(0, 100.0, 100.0)];
        assert_eq!(advance_pipes(&mut pipes, 3.0, 80.0, 200.0), 0);
        assert!(!pipes[0].scored);
    }

    #[test]
    fn test_prune_boundary() {
        let mut pipes = vec![
            Pipe::new(0, -80.0, 100.0),
            Pipe::new(1, -79.9, 100.0),
            Pipe::new(2, 150.0, 100.0),
        ];
        prune_pipes(&mut pipes, 80.0);
        let ids: Vec<u64> = pipes.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_reanchor_without_spawn() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut session = Session::new(VIEWPORT);
        session.pipes.push(Pipe::new(0, 350.0, 100.0));
        session.spawn_reference = 353.0;

        assert!(update_spawns(&mut session, VIEWPORT, &config, &mut rng).is_none());
        assert!((session.spawn_reference - 350.0).abs() < 1e-9);
        assert_eq!(session.pipes.len(), 1);
    }

    #[test]
    fn test_spawns_at_right_edge_past_threshold() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut session = Session::new(VIEWPORT);
        session.next_pipe_id = 4;
        session.pipes.push(Pipe::new(3, 150.0, 100.0));
        // 400 - 159 = 241 > 240
        session.spawn_reference = 159.0;

        let spawned = update_spawns(&mut session, VIEWPORT, &config, &mut rng).expect("spawn");
        assert_eq!(spawned.id, 4);
        assert!((spawned.x - 400.0).abs() < 1e-9);
        assert!((session.spawn_reference - 400.0).abs() < 1e-9);
        assert_eq!(session.pipes.len(), 2);
        assert_eq!(session.pipes.last().map(|p| p.id), Some(4));
    }

    #[test]
    fn test_threshold_is_strict() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut session = Session::new(VIEWPORT);
        session.pipes.push(Pipe::new(0, 160.0, 100.0));
        session.spawn_reference = 160.0; // travelled exactly 240

        assert!(update_spawns(&mut session, VIEWPORT, &config, &mut rng).is_none());
    }
}
