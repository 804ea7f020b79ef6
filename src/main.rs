mod feedback;
mod input;
mod ui;

use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use feedback::Feedback;
use flappy::build_info;
use flappy::config::{default_config_path, flappy_dir, load_config, save_config, GameConfig};
use flappy::constants::{INPUT_POLL_MS, LOG_ENV_VAR, LOG_FILE};
use flappy::game::Game;
use input::{map_key, GameInput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "flappy",
    about = "Flappy Bird in the terminal",
    disable_version_flag = true
)]
struct Args {
    /// Seed the pipe generator (same seed, same pipes)
    #[arg(long)]
    seed: Option<u64>,

    /// Config file (default: ~/.flappy/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the default config to the config path and exit
    #[arg(long)]
    write_config: bool,

    /// Show version information
    #[arg(short = 'v', long)]
    version: bool,
}

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> io::Result<()> {
    let args = Args::parse();

    if args.version {
        println!("{}", build_info::version_string());
        return Ok(());
    }

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    if args.write_config {
        save_config(&config_path, &GameConfig::default())?;
        println!("Default config written to {}", config_path.display());
        return Ok(());
    }

    init_logging()?;
    let config = load_config(&config_path)?;
    tracing::info!(path = %config_path.display(), seed = ?args.seed, "starting");

    let rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = run(&mut terminal, config, rng);

    let restored = restore_terminal(&mut terminal);

    if let Err(ref e) = result {
        tracing::error!(error = %e, "game loop failed");
    }
    if let Err(ref e) = restored {
        tracing::error!(error = %e, "terminal restore failed");
    }
    result.and(restored)
}

/// Undo raw mode and the alternate screen. Every step runs even if an
/// earlier one fails; the first failure is returned.
fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    first_error([
        disable_raw_mode(),
        terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .map(|_| ()),
        terminal.show_cursor(),
    ])
}

fn first_error<const N: usize>(steps: [io::Result<()>; N]) -> io::Result<()> {
    steps.into_iter().collect()
}

/// Log to `~/.flappy/flappy.log`; stdout belongs to the terminal UI.
fn init_logging() -> io::Result<()> {
    let path = flappy_dir()?.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Main loop: advance the clock, draw, then handle at most one input.
fn run(terminal: &mut Term, config: GameConfig, mut rng: ChaCha8Rng) -> io::Result<()> {
    let viewport = ui::viewport_for(terminal.size()?, &config);
    let mut game = Game::new(config, viewport);
    let mut feedback = Feedback::new();
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_millis() as u64;
        last_frame = now;

        // Resizes are picked up here, before the next tick reads the viewport
        game.set_viewport(ui::viewport_for(terminal.size()?, game.config()));
        let events = game.update(dt_ms, &mut rng);
        feedback.apply(&events, now);

        terminal.draw(|frame| ui::draw_ui(frame, &game, &feedback))?;

        if feedback.take_bell() {
            let backend = terminal.backend_mut();
            backend.write_all(b"\x07")?;
            backend.flush()?;
        }

        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    GameInput::Tap => {
                        let events = game.on_tap(&mut rng);
                        feedback.apply(&events, Instant::now());
                    }
                    GameInput::Reset => game.reset(),
                    GameInput::Quit => break,
                    GameInput::Other => {}
                }
            }
        }
    }

    tracing::info!(
        high_score = game.high_score(),
        sessions = game.sessions_played(),
        "quit"
    );
    Ok(())
}
