//! Integration test: full sessions through the public game API
//!
//! Drives `Game` the way the terminal front end does (taps, elapsed time,
//! viewport updates) and checks the scenarios the game must reproduce.

use flappy::config::GameConfig;
use flappy::game::obstacles::gap_top_range;
use flappy::game::{Game, GameEvent, GamePhase, Viewport};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 800.0;

fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn new_game() -> Game {
    Game::new(GameConfig::default(), Viewport::new(WIDTH, HEIGHT))
}

/// Run exactly one tick through the clock.
fn tick(game: &mut Game, rng: &mut ChaCha8Rng) -> Vec<GameEvent> {
    let token = game.clock_token().expect("clock should be running");
    game.tick(token, rng)
}

/// Keep the bird hovering around mid-screen: tap whenever it sinks below
/// `line` while falling.
fn hover(game: &mut Game, rng: &mut ChaCha8Rng, line: f64) {
    if game.bird().y > line && game.bird().velocity > 0.0 {
        game.on_tap(rng);
    }
}

/// Config whose pipe gaps span nearly the whole world, so a hovering bird
/// always fits through.
fn wide_gap_config() -> GameConfig {
    GameConfig {
        gap_size: 600.0,
        min_margin: 100.0,
        ..GameConfig::default()
    }
}

// =============================================================================
// State machine
// =============================================================================

#[test]
fn test_tap_in_ready_starts_with_one_pipe() {
    let mut rng = seeded(1);
    let mut game = new_game();
    assert_eq!(game.phase(), GamePhase::Ready);
    assert!(!game.is_clock_running());

    game.on_tap(&mut rng);

    assert_eq!(game.phase(), GamePhase::Playing);
    assert!(game.is_clock_running());
    assert_eq!(game.score(), 0);
    assert_eq!(game.pipes().len(), 1);
}

#[test]
fn test_clock_runs_only_while_playing() {
    let mut rng = seeded(2);
    let mut game = new_game();
    assert!(!game.is_clock_running());

    game.on_tap(&mut rng);
    assert!(game.is_clock_running());

    // Let it fall to the floor
    for _ in 0..1_000 {
        game.update(16, &mut rng);
        if game.phase() != GamePhase::Playing {
            break;
        }
        assert!(game.is_clock_running());
    }
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(!game.is_clock_running());

    game.reset();
    assert_eq!(game.phase(), GamePhase::Ready);
    assert!(!game.is_clock_running());
}

#[test]
fn test_update_in_ready_does_nothing() {
    let mut rng = seeded(3);
    let mut game = new_game();
    let before = game.bird();
    assert!(game.update(1_000, &mut rng).is_empty());
    assert_eq!(game.bird(), before);
}

// =============================================================================
// Physics scenarios
// =============================================================================

#[test]
fn test_first_tick_scenario() {
    let mut rng = seeded(4);
    let mut game = new_game();
    game.on_tap(&mut rng);
    let initial = game.bird().y;

    tick(&mut game, &mut rng);

    assert!((game.bird().velocity - 0.8).abs() < 1e-9);
    assert!((game.bird().y - (initial + 0.8)).abs() < 1e-9);
}

#[test]
fn test_velocity_increases_by_gravity_each_tick() {
    let mut rng = seeded(5);
    let mut game = new_game();
    game.on_tap(&mut rng);

    for _ in 0..20 {
        let before = game.bird().velocity;
        tick(&mut game, &mut rng);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!((game.bird().velocity - before - 0.8).abs() < 1e-9);
    }
}

#[test]
fn test_jump_overwrites_velocity() {
    let mut rng = seeded(6);
    let mut game = new_game();
    game.on_tap(&mut rng);
    for _ in 0..15 {
        tick(&mut game, &mut rng);
    }
    assert!(game.bird().velocity > 10.0);

    game.on_tap(&mut rng);
    assert!((game.bird().velocity - (-12.0)).abs() < 1e-9);
    game.on_tap(&mut rng);
    assert!((game.bird().velocity - (-12.0)).abs() < 1e-9);
}

#[test]
fn test_ceiling_crash_stops_everything_on_same_tick() {
    let mut rng = seeded(7);
    let mut game = new_game();
    game.on_tap(&mut rng);

    // Tap every tick: the bird climbs until it hits the ceiling.
    let mut crash_tick = None;
    for n in 0..200 {
        game.on_tap(&mut rng);
        let events = tick(&mut game, &mut rng);
        if game.phase() == GamePhase::GameOver {
            assert!(game.bird().y <= 0.0);
            assert!(events
                .iter()
                .any(|e| matches!(e, GameEvent::Collided { .. })));
            crash_tick = Some(n);
            break;
        }
    }
    assert!(crash_tick.is_some());
    assert!(!game.is_clock_running());

    let frozen = game.bird();
    game.update(500, &mut rng);
    assert_eq!(game.bird(), frozen);
}

// =============================================================================
// Obstacles
// =============================================================================

#[test]
fn test_first_pipe_scrolls_at_constant_speed() {
    let mut rng = seeded(8);
    let mut game = Game::new(wide_gap_config(), Viewport::new(WIDTH, HEIGHT));
    game.on_tap(&mut rng);

    let first_id = game.pipes()[0].id;
    let start_x = game.pipes()[0].x;
    assert!((start_x - (WIDTH + 100.0)).abs() < 1e-9);

    for n in 1..=200u32 {
        hover(&mut game, &mut rng, 380.0);
        tick(&mut game, &mut rng);
        assert_eq!(game.phase(), GamePhase::Playing, "crashed at tick {}", n);

        match game.pipes().iter().find(|p| p.id == first_id) {
            Some(pipe) => {
                let expected = WIDTH + 100.0 - 3.0 * n as f64;
                assert!((pipe.x - expected).abs() < 1e-6);
                assert!(pipe.x > -game.config().pipe_width);
            }
            None => {
                // Pruned exactly when it reached -pipe_width
                let expected = WIDTH + 100.0 - 3.0 * n as f64;
                assert!(expected <= -game.config().pipe_width);
                return;
            }
        }
    }
    panic!("first pipe was never pruned");
}

#[test]
fn test_no_pipe_left_of_world_after_any_tick() {
    let mut rng = seeded(9);
    let mut game = Game::new(wide_gap_config(), Viewport::new(WIDTH, HEIGHT));
    game.on_tap(&mut rng);

    for _ in 0..1_500 {
        hover(&mut game, &mut rng, 380.0);
        tick(&mut game, &mut rng);
        if game.phase() != GamePhase::Playing {
            break;
        }
        let width = game.config().pipe_width;
        assert!(game.pipes().iter().all(|p| p.x > -width));
    }
}

#[test]
fn test_pipes_stay_ordered_with_unique_ids() {
    let mut rng = seeded(10);
    let mut game = Game::new(wide_gap_config(), Viewport::new(WIDTH, HEIGHT));
    game.on_tap(&mut rng);

    let mut seen_max_id = 0;
    for _ in 0..1_500 {
        hover(&mut game, &mut rng, 380.0);
        tick(&mut game, &mut rng);
        if game.phase() != GamePhase::Playing {
            break;
        }
        let pipes = game.pipes();
        for pair in pipes.windows(2) {
            assert!(pair[0].x < pair[1].x);
            assert!(pair[0].id < pair[1].id);
        }
        if let Some(last) = pipes.last() {
            assert!(last.id >= seen_max_id);
            seen_max_id = last.id;
        }
    }
    assert!(seen_max_id >= 3, "expected several spawns");
}

#[test]
fn test_spawned_gaps_fit_in_world() {
    let mut rng = seeded(11);
    let config = wide_gap_config();
    let mut game = Game::new(config.clone(), Viewport::new(WIDTH, HEIGHT));
    game.on_tap(&mut rng);
    let (min_top, max_top) = gap_top_range(HEIGHT, &config);

    for _ in 0..1_500 {
        hover(&mut game, &mut rng, 380.0);
        tick(&mut game, &mut rng);
        if game.phase() != GamePhase::Playing {
            break;
        }
        for pipe in game.pipes() {
            assert!(pipe.gap_top >= min_top && pipe.gap_top <= max_top);
            assert!(pipe.bottom_height(HEIGHT, config.gap_size) >= config.min_margin);
        }
    }
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_score_counts_each_pipe_once() {
    let mut rng = seeded(12);
    let mut game = Game::new(wide_gap_config(), Viewport::new(WIDTH, HEIGHT));
    game.on_tap(&mut rng);

    let mut scored_events = 0;
    let mut last_score = 0;
    for _ in 0..2_000 {
        hover(&mut game, &mut rng, 380.0);
        for event in tick(&mut game, &mut rng) {
            if let GameEvent::Scored { score } = event {
                scored_events += 1;
                assert_eq!(score, last_score + 1);
                last_score = score;
            }
        }
        assert!(game.score() >= last_score);
        if game.phase() != GamePhase::Playing {
            break;
        }
    }

    assert!(game.score() >= 3, "hovering bird should pass pipes");
    assert_eq!(game.score(), scored_events);
    // Every pipe still on screen behind the bird has been credited exactly once
    let center = WIDTH / 2.0;
    let width = game.config().pipe_width;
    for pipe in game.pipes() {
        assert_eq!(pipe.scored, pipe.trailing_edge(width) <= center);
    }
}

#[test]
fn test_high_score_is_max_across_sessions() {
    let mut rng = seeded(13);
    let mut game = Game::new(wide_gap_config(), Viewport::new(WIDTH, HEIGHT));
    let mut best = 0;

    for hover_ticks in [900, 200, 1_400] {
        game.on_tap(&mut rng);
        for _ in 0..hover_ticks {
            hover(&mut game, &mut rng, 380.0);
            tick(&mut game, &mut rng);
        }
        // Dive into the floor to end the session
        while game.phase() == GamePhase::Playing {
            tick(&mut game, &mut rng);
        }
        best = best.max(game.score());
        assert_eq!(game.high_score(), best);
        assert_eq!(game.is_new_high_score(), game.score() == best);
    }
}

#[test]
fn test_restart_after_game_over_resets_session() {
    let mut rng = seeded(14);
    let mut game = Game::new(wide_gap_config(), Viewport::new(WIDTH, HEIGHT));
    game.on_tap(&mut rng);
    for _ in 0..900 {
        hover(&mut game, &mut rng, 380.0);
        tick(&mut game, &mut rng);
    }
    while game.phase() == GamePhase::Playing {
        tick(&mut game, &mut rng);
    }
    assert!(game.score() > 0);

    game.on_tap(&mut rng);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.pipes().len(), 1);
    assert_eq!(game.pipes()[0].id, 0);
    assert!((game.bird().y - HEIGHT / 2.0).abs() < 1e-9);
    assert!(game.bird().velocity.abs() < 1e-9);
}

// =============================================================================
// Viewport
// =============================================================================

#[test]
fn test_viewport_change_applies_at_tick_time() {
    let mut rng = seeded(15);
    let mut game = new_game();
    game.on_tap(&mut rng);

    // Shrink the world under the bird: the next tick sees the new floor.
    game.set_viewport(Viewport::new(WIDTH, 420.0));
    tick(&mut game, &mut rng);
    assert_eq!(game.phase(), GamePhase::GameOver);
}

#[test]
fn test_same_seed_same_pipes() {
    let play = |seed| {
        let mut rng = seeded(seed);
        let mut game = new_game();
        game.on_tap(&mut rng);
        for _ in 0..60 {
            hover(&mut game, &mut rng, 380.0);
            tick(&mut game, &mut rng);
        }
        game.pipes().to_vec()
    };
    assert_eq!(play(99), play(99));
}
