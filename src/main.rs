//! # Artifice Main Entry Point
//!
//! Parses the command line, generates a dungeon and runs the frame loop.

use artifice::config::{LIMIT_FPS, SCREEN_HEIGHT, SCREEN_WIDTH};
use artifice::{
    render_frame, utils, ArtificeResult, GameState, GenerationConfig, InputHandler,
    MacroquadConsole, PlayerAction,
};
use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;

/// Command line arguments for Artifice.
#[derive(Parser, Debug)]
#[command(name = "artifice")]
#[command(about = "A small turn-based dungeon crawler drawn in ASCII")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Simulation frames per second
    #[arg(long, default_value_t = LIMIT_FPS)]
    fps: u32,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "ARTIFICE".to_owned(),
        window_width: SCREEN_WIDTH * 12,
        window_height: SCREEN_HEIGHT * 14,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> ArtificeResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Artifice v{}", artifice::VERSION);

    if let Err(e) = run_game(&args).await {
        error!("Game aborted: {}", e);
        return Err(e);
    }
    Ok(())
}

/// Initializes env_logger; `RUST_LOG` takes precedence over the flag.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
}

/// Uses the given seed, or draws a fresh one from the thread RNG.
///
/// The macroquad prelude exports its own `rand` module, so the crate is
/// named by its absolute path here.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(::rand::random)
}

/// Main game loop implementation.
async fn run_game(args: &Args) -> ArtificeResult<()> {
    let seed = resolve_seed(args.seed);
    info!("Generating dungeon with seed {}", seed);

    let config = GenerationConfig::new(seed);
    let mut rng = utils::create_rng(&config);
    let mut state = GameState::generate(&config, &mut rng)?;

    let mut console = MacroquadConsole::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut input = InputHandler::new();
    let frame_period = 1.0 / args.fps.max(1) as f32;
    let mut accumulated = 0.0;
    let mut fullscreen = false;

    console.add_message("Welcome to the dungeon! Arrow keys move, Esc quits.".to_string());

    loop {
        input.capture();
        accumulated += get_frame_time();

        if accumulated >= frame_period {
            accumulated = (accumulated - frame_period).min(frame_period);

            match state.step(&mut input)? {
                PlayerAction::Exit => break,
                PlayerAction::ToggleFullscreen => {
                    fullscreen = !fullscreen;
                    set_fullscreen(fullscreen);
                }
                PlayerAction::TookTurn | PlayerAction::DidntTakeTurn => {}
            }

            for event in state.drain_events() {
                console.add_message(event.to_string());
            }
        }

        if input.take_exit_request() {
            break;
        }

        render_frame(&mut state, &mut console)?;
        next_frame().await;
    }

    info!("Game loop ended after {} frames", state.frame_number);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_seed_is_kept() {
        assert_eq!(resolve_seed(Some(7)), 7);
        assert_eq!(resolve_seed(Some(u64::MAX)), u64::MAX);
    }

    #[test]
    fn test_missing_seed_is_drawn_at_random() {
        let draws: std::collections::HashSet<u64> = (0..8).map(|_| resolve_seed(None)).collect();
        assert!(draws.len() > 1);
    }

    #[test]
    fn test_args_parse_seed_flag() {
        let args = Args::parse_from(["artifice", "--seed", "42"]);
        assert_eq!(resolve_seed(args.seed), 42);
        assert_eq!(args.fps, LIMIT_FPS);

        let args = Args::parse_from(["artifice"]);
        assert!(args.seed.is_none());
    }
}
