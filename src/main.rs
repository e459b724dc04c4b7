//! One Pixel - Entry Point
//!
//! Initializes logging and the terminal, builds the game session,
//! and runs the main loop.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use onepixel::audio::AudioManager;
use onepixel::data::{export_default_data, DataManager};
use onepixel::game::Game;
use onepixel::ui::{App, KeyboardInput};

/// Target frames per second for the game loop
const TARGET_FPS: u64 = 60;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);

/// Command line options
#[derive(Debug, Default)]
struct Options {
    seed: Option<u64>,
    export_dir: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                options.seed = Some(value.parse().with_context(|| format!("invalid seed: {}", value))?);
            }
            "--export-data" => {
                let dir = args.next().context("--export-data needs a directory")?;
                options.export_dir = Some(PathBuf::from(dir));
            }
            other => bail!("unknown argument: {}", other),
        }
    }
    Ok(options)
}

fn init_logging() {
    // Log to file so output does not interfere with the TUI
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match OpenOptions::new().create(true).write(true).truncate(true).open("onepixel.log") {
        Ok(log_file) => {
            builder.target(env_logger::Target::Pipe(Box::new(log_file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn main() -> Result<()> {
    let options = parse_args(std::env::args().skip(1))?;
    init_logging();

    log::info!("Starting One Pixel v{}", env!("CARGO_PKG_VERSION"));

    if let Some(dir) = options.export_dir {
        export_default_data(&dir)?;
        println!("Default data written to {}", dir.display());
        return Ok(());
    }

    let data = DataManager::new();
    let audio = AudioManager::new();
    if !audio.is_available() {
        log::warn!("No audio device, playing silently");
    }
    let mut game = Game::new(data, Box::new(audio), options.seed);
    let mut app = App::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game_loop(&mut terminal, &mut app, &mut game);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Game exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("One Pixel shut down cleanly");
    result
}

/// Main game loop
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    game: &mut Game,
) -> Result<()> {
    let mut input = KeyboardInput::default();
    let mut last_frame = Instant::now();

    while game.is_running() {
        let frame_start = Instant::now();
        let delta = frame_start.duration_since(last_frame);
        last_frame = frame_start;

        // Drain pending key presses
        while app.accepts_input(game) && game.pump(&mut input)? {}

        app.update(game, delta);

        terminal.draw(|frame| {
            app.render(frame, game);
        })?;

        // Frame rate limiting
        let frame_time = frame_start.elapsed();
        if frame_time < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - frame_time);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(args(&["--seed", "42"])).unwrap();
        assert_eq!(options.seed, Some(42));
        assert!(options.export_dir.is_none());

        let options = parse_args(args(&["--export-data", "out"])).unwrap();
        assert_eq!(options.export_dir, Some(PathBuf::from("out")));

        assert!(parse_args(args(&["--seed"])).is_err());
        assert!(parse_args(args(&["--seed", "abc"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }
}
