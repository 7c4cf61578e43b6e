//! # Game Module
//!
//! Core simulation: the tile grid, actors, visibility, combat, monster AI
//! and the frame-driven turn scheduler.
//!
//! Nothing in here touches a window or a keyboard. The scheduler pulls input
//! through [`crate::InputSource`] and the renderer reads state through
//! [`crate::Console`], so the whole module runs headless under test.

pub mod ai;
pub mod colors;
pub mod combat;
pub mod entities;
pub mod state;
pub mod visibility;
pub mod world;

pub use ai::*;
pub use colors::*;
pub use combat::*;
pub use entities::*;
pub use state::*;
pub use visibility::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a 2D coordinate in the game world.
///
/// # Examples
///
/// ```
/// use artifice::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.cardinal_adjacent_positions();
/// assert!(adjacent.contains(&Position::new(10, 4)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Euclidean distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use artifice::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.euclidean_distance(pos2), 5.0);
    /// ```
    pub fn euclidean_distance(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns only the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::cardinal()
            .into_iter()
            .map(|direction| self + direction.to_delta())
            .collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// The four directions the player can be steered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use artifice::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns the 4 directions in scan order.
    pub fn cardinal() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::West,
            Direction::East,
            Direction::South,
        ]
    }
}

/// Unique identifier for actors.
///
/// Ids stay stable while the draw-order list is reshuffled.
pub type ActorId = Uuid;

/// Creates a new unique actor ID.
pub fn new_actor_id() -> ActorId {
    Uuid::new_v4()
}

/// Upper-cases the first character, the way narrative lines open.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
