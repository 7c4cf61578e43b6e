//! # Rendering Module
//!
//! Draws the game state onto a glyph console.
//!
//! [`render_frame`] holds the whole drawing policy and talks only to the
//! [`Console`] trait, so it runs headless in tests. The window-backed
//! console lives in [`display`].

pub mod display;

pub use display::*;

use crate::game::{
    GameState, Rgb, COLOR_DARK_GROUND, COLOR_DARK_WALL, COLOR_LIGHT_GROUND, COLOR_LIGHT_WALL,
    WHITE,
};
use crate::ArtificeResult;

/// A fixed grid of character cells.
pub trait Console {
    /// Draws a glyph in the foreground of a cell.
    fn put_glyph(&mut self, x: i32, y: i32, glyph: char, color: Rgb);

    /// Fills the background of a cell.
    fn set_background(&mut self, x: i32, y: i32, color: Rgb);

    /// Blanks every cell.
    fn clear(&mut self);

    /// Shows what has been drawn since the last clear.
    fn present(&mut self);

    /// Writes a line of text starting at a cell.
    fn print(&mut self, x: i32, y: i32, text: &str, color: Rgb) {
        for (offset, glyph) in text.chars().enumerate() {
            self.put_glyph(x + offset as i32, y, glyph, color);
        }
    }
}

/// The player's hit point readout.
pub fn status_line(state: &GameState) -> ArtificeResult<String> {
    let player = state.player()?;
    Ok(match &player.fighter {
        Some(fighter) => format!("HP: {}/{}", fighter.hp.max(0), fighter.max_hp),
        None => "HP: -".to_string(),
    })
}

/// Draws one complete frame.
///
/// Tiles in view get the lit palette, explored tiles out of view the dark
/// one, and unexplored tiles stay blank. Actors are drawn in list order
/// when their tile is in view, with the player drawn last so nothing covers
/// it. The status line goes on the row below the map.
pub fn render_frame(state: &mut GameState, console: &mut dyn Console) -> ArtificeResult<()> {
    state.recompute_fov_if_needed()?;
    console.clear();

    for pos in state.grid.positions() {
        let wall = state.grid.blocks_sight(pos);
        let color = if state.is_visible(pos) {
            if wall {
                COLOR_LIGHT_WALL
            } else {
                COLOR_LIGHT_GROUND
            }
        } else if state.grid.is_explored(pos) {
            if wall {
                COLOR_DARK_WALL
            } else {
                COLOR_DARK_GROUND
            }
        } else {
            continue;
        };
        console.set_background(pos.x, pos.y, color);
    }

    for actor in state.actors.iter().filter(|actor| actor.id != state.player_id) {
        if state.is_visible(actor.position) {
            console.put_glyph(actor.position.x, actor.position.y, actor.glyph, actor.color);
        }
    }

    let player = state.player()?;
    console.put_glyph(player.position.x, player.position.y, player.glyph, player.color);

    let status = status_line(state)?;
    console.print(1, state.grid.height() + 1, &status, WHITE);

    console.present();
    Ok(())
}
