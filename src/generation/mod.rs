//! # Generation Module
//!
//! Procedural dungeon generation.
//!
//! A level is built by rejection sampling: random rectangles are drawn a
//! bounded number of times, overlapping ones are thrown away, and each
//! accepted room is tunnelled to the one accepted before it. Monsters are
//! scattered over the rooms as they are accepted.

pub mod dungeon;

pub use dungeon::*;

use crate::config::{
    MAP_HEIGHT, MAP_WIDTH, MAX_ROOMS, MAX_ROOM_MONSTERS, ROOM_MAX_SIZE, ROOM_MIN_SIZE,
};
use crate::game::{Grid, MonsterSpec, Position};
use crate::{ArtificeError, ArtificeResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map width in tiles
    pub map_width: i32,
    /// Map height in tiles
    pub map_height: i32,
    /// Minimum room side, including the wall ring
    pub room_min_size: i32,
    /// Maximum room side, including the wall ring
    pub room_max_size: i32,
    /// Number of placement attempts; rejected rooms are not retried
    pub max_rooms: u32,
    /// Upper bound of monsters drawn for each room
    pub max_room_monsters: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration for a full-size level.
    ///
    /// # Examples
    ///
    /// ```
    /// use artifice::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!((config.map_width, config.map_height), (80, 45));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            room_min_size: ROOM_MIN_SIZE,
            room_max_size: ROOM_MAX_SIZE,
            max_rooms: MAX_ROOMS,
            max_room_monsters: MAX_ROOM_MONSTERS,
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            map_width: 40,
            map_height: 30,
            room_min_size: 4,
            room_max_size: 8,
            max_rooms: 12,
            max_room_monsters: 2,
        }
    }

    /// Checks that rooms of every allowed size fit on the map.
    pub fn validate(&self) -> ArtificeResult<()> {
        if self.room_min_size < 2 {
            return Err(ArtificeError::GenerationFailed(format!(
                "room_min_size {} leaves no interior",
                self.room_min_size
            )));
        }
        if self.room_min_size > self.room_max_size {
            return Err(ArtificeError::GenerationFailed(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )));
        }
        if self.room_max_size >= self.map_width || self.room_max_size >= self.map_height {
            return Err(ArtificeError::GenerationFailed(format!(
                "rooms up to {} tiles do not fit a {}x{} map",
                self.room_max_size, self.map_width, self.map_height
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// An axis-aligned room rectangle.
///
/// `(x1, y1)` is the top-left corner and `(x2, y2)` is `x1 + w, y1 + h`.
/// The boundary ring stays wall; only the strict interior is carved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use artifice::{Position, Rect};
    ///
    /// let room = Rect::new(20, 15, 10, 15);
    /// assert_eq!((room.x2, room.y2), (30, 30));
    /// assert_eq!(room.center(), Position::new(25, 22));
    /// ```
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + w,
            y2: y + h,
        }
    }

    /// The center tile, rounding toward the top-left.
    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Checks for overlap, counting shared edges as overlapping.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Checks whether a position lies strictly inside the boundary.
    pub fn contains_interior(&self, pos: Position) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }

    /// All tiles strictly inside the boundary, row by row.
    pub fn interior_positions(&self) -> impl Iterator<Item = Position> {
        let (x1, x2) = (self.x1, self.x2);
        ((self.y1 + 1)..self.y2)
            .flat_map(move |y| ((x1 + 1)..x2).map(move |x| Position::new(x, y)))
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> ArtificeResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> ArtificeResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Where things go on a freshly generated map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonLayout {
    /// Center of the first accepted room
    pub player_start: Position,
    /// Accepted rooms in acceptance order
    pub rooms: Vec<Rect>,
    /// Monsters to spawn, in placement order
    pub monsters: Vec<MonsterSpec>,
}

/// A generated map together with its layout.
#[derive(Debug, Clone)]
pub struct Dungeon {
    pub grid: Grid,
    pub layout: DungeonLayout,
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
