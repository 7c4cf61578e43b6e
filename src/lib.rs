//! # Artifice
//!
//! A single-player, turn-based dungeon crawler drawn as ASCII glyphs on a
//! fixed-size grid.
//!
//! ## Architecture Overview
//!
//! The crate is split into a headless simulation core and thin frontend
//! adapters:
//!
//! - **Game State**: the grid, the ordered actor list, the FOV cache and the
//!   frame-driven turn scheduler, all owned by one [`GameState`]
//! - **Generation System**: random non-overlapping rooms joined by L-shaped
//!   tunnels, plus monster placement
//! - **Visibility**: recursive shadowcasting with persistent explored memory
//! - **Combat and AI**: melee resolution, death policies and the basic
//!   chase-and-hit monster
//! - **Rendering / Input**: the `Console` and `InputSource` seams, with
//!   macroquad implementations used by the binary
//!
//! Everything under `game` and `generation` runs without a window, so the
//! whole simulation can be driven from tests with scripted input.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;

/// Core error type for the Artifice game engine.
#[derive(thiserror::Error, Debug)]
pub enum ArtificeError {
    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// An actor id did not resolve to an actor in the world
    #[error("Actor {0} not found")]
    ActorNotFound(ActorId),

    /// An operation needed a capability the actor no longer has
    #[error("Actor {actor} has no {capability} capability")]
    MissingCapability {
        actor: ActorId,
        capability: &'static str,
    },

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Artifice codebase.
pub type ArtificeResult<T> = Result<T, ArtificeError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Screen width in glyph cells
    pub const SCREEN_WIDTH: i32 = 80;

    /// Screen height in glyph cells
    pub const SCREEN_HEIGHT: i32 = 50;

    /// Dungeon width in tiles
    pub const MAP_WIDTH: i32 = 80;

    /// Dungeon height in tiles
    pub const MAP_HEIGHT: i32 = 45;

    /// Largest room side, in tiles, including the wall ring
    pub const ROOM_MAX_SIZE: i32 = 10;

    /// Smallest room side, in tiles, including the wall ring
    pub const ROOM_MIN_SIZE: i32 = 6;

    /// Number of room placement attempts per level
    pub const MAX_ROOMS: u32 = 30;

    /// Upper bound of monsters placed in one room
    pub const MAX_ROOM_MONSTERS: u32 = 3;

    /// Sight radius of the player
    pub const FOV_RADIUS: i32 = 10;

    /// Whether walls bordering lit floor are themselves lit
    pub const FOV_LIGHT_WALLS: bool = true;

    /// Frames per second target for the game loop
    pub const LIMIT_FPS: u32 = 20;

    /// Frames the player waits after moving
    pub const PLAYER_SPEED: i32 = 2;

    /// Frames a monster waits after moving
    pub const DEFAULT_SPEED: i32 = 8;

    /// Frames a monster waits after attacking
    pub const DEFAULT_ATTACK_SPEED: i32 = 20;

    /// Number of narrative events kept in the game state's history
    pub const MAX_EVENT_HISTORY: usize = 1000;
}
