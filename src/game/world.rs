//! # World Grid
//!
//! The fixed-size tile store the dungeon is carved into.
//!
//! Coordinates outside the grid are a bug in the caller, not a game event,
//! so every accessor panics on them instead of returning an `Option`.

use crate::game::Position;
use pathfinding::prelude::bfs_reach;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// State of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Whether actors can walk onto this tile
    pub blocked: bool,
    /// Whether this tile stops line of sight
    pub blocks_sight: bool,
    /// Whether the player has ever seen this tile
    pub explored: bool,
}

impl Tile {
    /// Solid rock: impassable and opaque.
    pub fn wall() -> Self {
        Self {
            blocked: true,
            blocks_sight: true,
            explored: false,
        }
    }

    /// Open floor.
    pub fn floor() -> Self {
        Self {
            blocked: false,
            blocks_sight: false,
            explored: false,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::wall()
    }
}

/// Row-major 2D array of tiles with dimensions fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid filled with wall tiles.
    ///
    /// # Examples
    ///
    /// ```
    /// use artifice::{Grid, Position};
    ///
    /// let grid = Grid::new(80, 45);
    /// assert!(grid.is_blocked(Position::new(10, 10)));
    /// assert!(!grid.is_explored(Position::new(10, 10)));
    /// ```
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be positive, got {}x{}",
            width,
            height
        );

        Self {
            width,
            height,
            tiles: vec![Tile::wall(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Checks whether a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.in_bounds(pos),
            "position ({}, {}) is outside the {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        (pos.y * self.width + pos.x) as usize
    }

    /// Gets the tile at a position.
    pub fn tile(&self, pos: Position) -> &Tile {
        &self.tiles[self.index(pos)]
    }

    /// Gets the tile at a position mutably.
    pub fn tile_mut(&mut self, pos: Position) -> &mut Tile {
        let index = self.index(pos);
        &mut self.tiles[index]
    }

    /// Opens a tile for both movement and sight.
    pub fn set_passable(&mut self, pos: Position) {
        let tile = self.tile_mut(pos);
        tile.blocked = false;
        tile.blocks_sight = false;
    }

    /// Checks whether the terrain at a position blocks movement.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.tile(pos).blocked
    }

    /// Checks whether the terrain at a position blocks line of sight.
    pub fn blocks_sight(&self, pos: Position) -> bool {
        self.tile(pos).blocks_sight
    }

    /// Checks whether the player has ever seen a position.
    pub fn is_explored(&self, pos: Position) -> bool {
        self.tile(pos).explored
    }

    /// Remembers a position as seen. Exploration is never undone.
    pub fn mark_explored(&mut self, pos: Position) {
        self.tile_mut(pos).explored = true;
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Iterates over every walkable position.
    pub fn passable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |&pos| !self.is_blocked(pos))
    }

    /// Collects every walkable position connected to `start` by cardinal
    /// steps. Returns an empty set if `start` itself is blocked.
    pub fn reachable_from(&self, start: Position) -> HashSet<Position> {
        if self.is_blocked(start) {
            return HashSet::new();
        }

        bfs_reach(start, |&pos| {
            pos.cardinal_adjacent_positions()
                .into_iter()
                .filter(|&next| self.in_bounds(next) && !self.is_blocked(next))
                .collect::<Vec<_>>()
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_solid_and_unexplored() {
        let grid = Grid::new(12, 7);
        assert_eq!(grid.width(), 12);
        assert_eq!(grid.height(), 7);
        assert_eq!(grid.positions().count(), 84);
        for pos in grid.positions() {
            assert_eq!(*grid.tile(pos), Tile::wall());
        }
        assert_eq!(grid.passable_positions().count(), 0);
    }

    #[test]
    fn test_set_passable_clears_both_flags() {
        let mut grid = Grid::new(10, 10);
        let pos = Position::new(3, 4);
        grid.set_passable(pos);

        assert!(!grid.is_blocked(pos));
        assert!(!grid.blocks_sight(pos));
        assert!(grid.is_blocked(Position::new(4, 4)));
    }

    #[test]
    fn test_blocks_sight_can_be_decoupled() {
        let mut grid = Grid::new(5, 5);
        let pos = Position::new(2, 2);
        grid.set_passable(pos);
        grid.tile_mut(pos).blocks_sight = true;

        assert!(!grid.is_blocked(pos));
        assert!(grid.blocks_sight(pos));
    }

    #[test]
    fn test_bounds() {
        let grid = Grid::new(10, 5);
        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(9, 4)));
        assert!(!grid.in_bounds(Position::new(10, 4)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
    }

    #[test]
    #[should_panic(expected = "outside the 10x5 grid")]
    fn test_out_of_bounds_access_panics() {
        let grid = Grid::new(10, 5);
        grid.is_blocked(Position::new(10, 0));
    }

    #[test]
    fn test_reachable_from_follows_cardinal_steps() {
        let mut grid = Grid::new(10, 10);
        for x in 1..=4 {
            grid.set_passable(Position::new(x, 1));
        }
        // Only diagonally adjacent to the corridor above
        grid.set_passable(Position::new(5, 2));

        let reachable = grid.reachable_from(Position::new(1, 1));
        assert_eq!(reachable.len(), 4);
        assert!(reachable.contains(&Position::new(4, 1)));
        assert!(!reachable.contains(&Position::new(5, 2)));

        assert!(grid.reachable_from(Position::new(0, 0)).is_empty());
    }
}
