//! # Visibility
//!
//! Radius-limited field of view using recursive shadowcasting.
//!
//! Each of the eight octants around the origin is scanned row by row,
//! outward. An opaque cell splits the lit wedge of the current row; the
//! part before it is scanned recursively from the next row, the part after
//! it continues in place. Only cells with `dx² + dy² <= radius²` are lit,
//! and cells outside the grid count as opaque.

use crate::game::{Grid, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Octant transforms: `(xx, xy, yx, yy)` mapping octant-local `(col, row)`
/// offsets onto world `(dx, dy)`.
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

/// The cells visible from one origin, as of one computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOfView {
    origin: Option<Position>,
    visible: HashSet<Position>,
}

impl FieldOfView {
    /// A view that sees nothing. Used before the first computation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Computes what is visible from `origin` within `radius` tiles.
    ///
    /// The origin is always visible. With `light_walls` set, opaque cells
    /// that bound the lit area are visible too; without it only transparent
    /// cells are reported.
    ///
    /// # Examples
    ///
    /// ```
    /// use artifice::{FieldOfView, Grid, Position};
    ///
    /// let mut grid = Grid::new(20, 20);
    /// for x in 1..19 {
    ///     grid.set_passable(Position::new(x, 10));
    /// }
    ///
    /// let fov = FieldOfView::compute(&grid, Position::new(5, 10), 4, true);
    /// assert!(fov.is_visible(Position::new(9, 10)));
    /// assert!(!fov.is_visible(Position::new(10, 10)));
    /// assert!(fov.is_visible(Position::new(5, 9)));  // lit wall
    /// ```
    pub fn compute(grid: &Grid, origin: Position, radius: i32, light_walls: bool) -> Self {
        let mut visible = HashSet::new();
        visible.insert(origin);

        let radius = radius.max(0);
        for &(xx, xy, yx, yy) in OCTANTS.iter() {
            let mut scan = OctantScan {
                grid,
                origin,
                radius,
                transform: (xx, xy, yx, yy),
                visible: &mut visible,
            };
            scan.cast_light(1, 1.0, 0.0);
        }

        if !light_walls {
            visible.retain(|&pos| pos == origin || !grid.blocks_sight(pos));
        }

        Self {
            origin: Some(origin),
            visible,
        }
    }

    /// Checks whether a position was visible in this computation.
    pub fn is_visible(&self, pos: Position) -> bool {
        self.visible.contains(&pos)
    }

    /// Where this view was computed from, if it has been computed at all.
    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    /// Iterates over the visible positions in no particular order.
    pub fn visible_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.visible.iter().copied()
    }

    /// Marks every visible cell as explored on the grid.
    pub fn mark_explored(&self, grid: &mut Grid) {
        for &pos in &self.visible {
            grid.mark_explored(pos);
        }
    }
}

struct OctantScan<'a> {
    grid: &'a Grid,
    origin: Position,
    radius: i32,
    transform: (i32, i32, i32, i32),
    visible: &'a mut HashSet<Position>,
}

impl OctantScan<'_> {
    fn is_opaque(&self, pos: Position) -> bool {
        !self.grid.in_bounds(pos) || self.grid.blocks_sight(pos)
    }

    fn cast_light(&mut self, row: i32, mut start_slope: f64, end_slope: f64) {
        if start_slope < end_slope {
            return;
        }

        let (xx, xy, yx, yy) = self.transform;
        let radius_squared = self.radius * self.radius;
        let mut next_start_slope = start_slope;

        for distance in row..=self.radius {
            let dy = -distance;
            let mut blocked = false;

            for dx in -distance..=0 {
                let pos = Position::new(
                    self.origin.x + dx * xx + dy * xy,
                    self.origin.y + dx * yx + dy * yy,
                );
                let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
                let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

                if start_slope < right_slope {
                    continue;
                }
                if end_slope > left_slope {
                    break;
                }

                if dx * dx + dy * dy <= radius_squared && self.grid.in_bounds(pos) {
                    self.visible.insert(pos);
                }

                let opaque = self.is_opaque(pos);
                if blocked {
                    if opaque {
                        next_start_slope = right_slope;
                    } else {
                        blocked = false;
                        start_slope = next_start_slope;
                    }
                } else if opaque && distance < self.radius {
                    blocked = true;
                    self.cast_light(distance + 1, start_slope, left_slope);
                    next_start_slope = right_slope;
                }
            }

            if blocked {
                break;
            }
        }
    }
}
