//! # Colors
//!
//! Backend-neutral RGB colors and the game palette.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const DARK_RED: Rgb = Rgb::new(127, 0, 0);
pub const DESATURATED_GREEN: Rgb = Rgb::new(63, 127, 63);
pub const DARKER_GREEN: Rgb = Rgb::new(0, 127, 0);

/// Remembered wall outside the field of view.
pub const COLOR_DARK_WALL: Rgb = Rgb::new(0, 0, 100);
/// Wall currently in view.
pub const COLOR_LIGHT_WALL: Rgb = Rgb::new(130, 110, 50);
/// Remembered floor outside the field of view.
pub const COLOR_DARK_GROUND: Rgb = Rgb::new(50, 50, 150);
/// Floor currently in view.
pub const COLOR_LIGHT_GROUND: Rgb = Rgb::new(200, 180, 50);
