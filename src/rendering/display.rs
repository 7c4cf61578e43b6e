//! # Display Management
//!
//! Window-backed console using macroquad.

use crate::game::Rgb;
use crate::rendering::Console;
use macroquad::prelude::*;

/// Rows kept visible at the bottom of the screen for the message log.
const VISIBLE_MESSAGES: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    glyph: Option<(char, Rgb)>,
    background: Option<Rgb>,
}

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}

/// Macroquad console for the game.
///
/// Draw calls are buffered into a cell grid and flushed to the window in
/// [`Console::present`], scaled to the current window size.
pub struct MacroquadConsole {
    /// Width in cells
    pub width: i32,
    /// Height in cells
    pub height: i32,
    cells: Vec<Cell>,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
}

impl MacroquadConsole {
    /// Creates a blank console of `width` by `height` cells.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height).max(0) as usize],
            messages: Vec::new(),
            max_messages: 100,
        }
    }

    /// Adds a message to the message log.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get_mut((y * self.width + x) as usize)
    }

    fn cell_size(&self) -> (f32, f32) {
        (
            screen_width() / self.width as f32,
            screen_height() / self.height as f32,
        )
    }

    fn render_messages(&self, cell_w: f32, cell_h: f32) {
        let first_row = self.height - VISIBLE_MESSAGES as i32;
        let start = self.messages.len().saturating_sub(VISIBLE_MESSAGES);

        for (line, message) in self.messages[start..].iter().enumerate() {
            let y = (first_row + line as i32 + 1) as f32 * cell_h - cell_h * 0.2;
            draw_text(message, cell_w * 20.0, y, cell_h, LIGHTGRAY);
        }
    }
}

impl Console for MacroquadConsole {
    fn put_glyph(&mut self, x: i32, y: i32, glyph: char, color: Rgb) {
        if let Some(cell) = self.cell_mut(x, y) {
            cell.glyph = Some((glyph, color));
        }
    }

    fn set_background(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(cell) = self.cell_mut(x, y) {
            cell.background = Some(color);
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn present(&mut self) {
        clear_background(BLACK);
        let (cell_w, cell_h) = self.cell_size();
        let mut buffer = [0u8; 4];

        for (index, cell) in self.cells.iter().enumerate() {
            let x = (index as i32 % self.width) as f32 * cell_w;
            let y = (index as i32 / self.width) as f32 * cell_h;

            if let Some(background) = cell.background {
                draw_rectangle(x, y, cell_w, cell_h, to_color(background));
            }
            if let Some((glyph, color)) = cell.glyph {
                let text = glyph.encode_utf8(&mut buffer);
                draw_text(text, x + cell_w * 0.1, y + cell_h * 0.8, cell_h, to_color(color));
            }
        }

        self.render_messages(cell_w, cell_h);
    }
}
