//! # Input Module
//!
//! Player input and the sources it comes from.
//!
//! The scheduler pulls at most one [`PlayerInput`] per frame from an
//! [`InputSource`]. The binary uses the keyboard-backed [`InputHandler`];
//! tests feed a [`ScriptedInput`].

use crate::game::Direction;
use macroquad::prelude::*;
use std::collections::VecDeque;

/// Player input types that can be processed by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Nothing pressed this frame
    None,
    /// Quit the game
    Exit,
    /// Switch between windowed and fullscreen
    ToggleFullscreen,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

impl PlayerInput {
    /// The movement direction, if this is a movement key.
    ///
    /// # Examples
    ///
    /// ```
    /// use artifice::{Direction, PlayerInput};
    ///
    /// assert_eq!(PlayerInput::MoveLeft.direction(), Some(Direction::West));
    /// assert_eq!(PlayerInput::Exit.direction(), None);
    /// ```
    pub fn direction(self) -> Option<Direction> {
        match self {
            PlayerInput::MoveUp => Some(Direction::North),
            PlayerInput::MoveDown => Some(Direction::South),
            PlayerInput::MoveLeft => Some(Direction::West),
            PlayerInput::MoveRight => Some(Direction::East),
            PlayerInput::None | PlayerInput::Exit | PlayerInput::ToggleFullscreen => None,
        }
    }
}

/// Something that can be asked for the current frame's input.
pub trait InputSource {
    /// Returns the input for this frame, or [`PlayerInput::None`].
    fn poll_input(&mut self) -> PlayerInput;
}

/// Replays a fixed sequence of inputs, then reports nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<PlayerInput>,
    polls: usize,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = PlayerInput>) -> Self {
        Self {
            queue: inputs.into_iter().collect(),
            polls: 0,
        }
    }

    /// Appends an input to the end of the script.
    pub fn push(&mut self, input: PlayerInput) {
        self.queue.push_back(input);
    }

    /// How many times the script has been polled.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Inputs not yet consumed.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_input(&mut self) -> PlayerInput {
        self.polls += 1;
        self.queue.pop_front().unwrap_or(PlayerInput::None)
    }
}

/// Keyboard input handler backed by macroquad.
///
/// Arrow keys are read as held keys, so keeping one down walks at the
/// player's speed. Escape and Alt+Enter are edge-triggered; call
/// [`InputHandler::capture`] every frame so presses that land while the
/// player is still waiting are not lost.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    pending: Option<PlayerInput>,
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latches this frame's one-shot key presses.
    pub fn capture(&mut self) {
        if is_key_pressed(KeyCode::Escape) {
            self.pending = Some(PlayerInput::Exit);
        } else if is_key_pressed(KeyCode::Enter)
            && (is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt))
        {
            self.pending = Some(PlayerInput::ToggleFullscreen);
        }
    }

    /// Takes a latched Exit request, if any, without consuming anything
    /// else. Lets the frame loop quit even while the player is waiting.
    pub fn take_exit_request(&mut self) -> bool {
        if self.pending == Some(PlayerInput::Exit) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    fn held_direction(&self) -> PlayerInput {
        if is_key_down(KeyCode::Up) {
            PlayerInput::MoveUp
        } else if is_key_down(KeyCode::Down) {
            PlayerInput::MoveDown
        } else if is_key_down(KeyCode::Left) {
            PlayerInput::MoveLeft
        } else if is_key_down(KeyCode::Right) {
            PlayerInput::MoveRight
        } else {
            PlayerInput::None
        }
    }
}

impl InputSource for InputHandler {
    fn poll_input(&mut self) -> PlayerInput {
        match self.pending.take() {
            Some(input) => input,
            None => self.held_direction(),
        }
    }
}
