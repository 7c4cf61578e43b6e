//! # Game State Module
//!
//! Central game state and the frame-driven turn scheduler.
//!
//! [`GameState`] owns everything the simulation mutates: the grid, the
//! actor list (kept in draw order), the cached field of view and the event
//! log. One call to [`GameState::step`] is one frame. Each actor carries a
//! wait counter that is reset to its speed when it moves and counted down
//! once per eligible frame. The player acts on the frame the counter would
//! drop to zero, so speed `n` gives one move every `n` frames. Monsters
//! count all the way down first and act on the frame after, one move every
//! `n + 1` frames.

use crate::config::{FOV_LIGHT_WALLS, FOV_RADIUS, MAX_EVENT_HISTORY};
use crate::game::{
    Actor, ActorId, Ai, AiStrategy, FieldOfView, GameEvent, Grid, Position,
};
use crate::generation::{GenerationConfig, Generator, RoomTunnelGenerator};
use crate::input::{InputSource, PlayerInput};
use crate::{ArtificeError, ArtificeResult};
use log::{debug, info};
use rand::rngs::StdRng;

/// Whether the game is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Turns are processed
    Playing,
    /// The player died; only rendering and exit remain
    Dead,
}

/// What the frame's input amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// The player moved or attacked
    TookTurn,
    /// The player was still waiting, pressed nothing, or is dead
    DidntTakeTurn,
    /// The frontend should flip fullscreen mode
    ToggleFullscreen,
    /// The frontend should close
    Exit,
}

/// Central game state containing all simulation data.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The dungeon map
    pub grid: Grid,
    /// Every actor, in draw order (earlier entries are drawn first)
    pub actors: Vec<Actor>,
    /// The actor controlled by the keyboard
    pub player_id: ActorId,
    /// Playing or dead
    pub mode: GameMode,
    /// Field of view as of the last recomputation
    pub fov: FieldOfView,
    /// Set whenever the player may have moved
    pub fov_recompute: bool,
    /// Player sight radius
    pub fov_radius: i32,
    /// Whether walls bordering the lit area are shown as lit
    pub fov_light_walls: bool,
    /// Number of frames stepped so far
    pub frame_number: u64,
    events: Vec<GameEvent>,
    unread_events: usize,
}

impl GameState {
    /// Creates a game state around an existing map and player.
    ///
    /// # Examples
    ///
    /// ```
    /// use artifice::{Actor, GameMode, GameState, Grid, Position};
    ///
    /// let state = GameState::new(Grid::new(20, 20), Actor::player(Position::new(5, 5)));
    /// assert_eq!(state.mode, GameMode::Playing);
    /// assert_eq!(state.actors.len(), 1);
    /// assert!(state.fov_recompute);
    /// ```
    pub fn new(grid: Grid, player: Actor) -> Self {
        let player_id = player.id;

        Self {
            grid,
            actors: vec![player],
            player_id,
            mode: GameMode::Playing,
            fov: FieldOfView::empty(),
            fov_recompute: true,
            fov_radius: FOV_RADIUS,
            fov_light_walls: FOV_LIGHT_WALLS,
            frame_number: 0,
            events: Vec::new(),
            unread_events: 0,
        }
    }

    /// Generates a fresh dungeon, places the player in the first room and
    /// spawns the generated monsters.
    pub fn generate(config: &GenerationConfig, rng: &mut StdRng) -> ArtificeResult<Self> {
        let generator = RoomTunnelGenerator::new();
        let dungeon = generator.generate(config, rng)?;

        let mut state = Self::new(dungeon.grid, Actor::player(dungeon.layout.player_start));
        for monster in &dungeon.layout.monsters {
            state.add_actor(monster.spawn());
        }

        debug!(
            "Generated {} rooms and {} monsters, player starts at {:?}",
            dungeon.layout.rooms.len(),
            dungeon.layout.monsters.len(),
            dungeon.layout.player_start
        );

        Ok(state)
    }

    /// Sets the sight radius and wall lighting.
    pub fn with_fov(mut self, radius: i32, light_walls: bool) -> Self {
        self.fov_radius = radius;
        self.fov_light_walls = light_walls;
        self.fov_recompute = true;
        self
    }

    /// Adds an actor at the end of the draw order.
    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        let id = actor.id;
        self.actors.push(actor);
        id
    }

    fn actor_index(&self, id: ActorId) -> ArtificeResult<usize> {
        self.actors
            .iter()
            .position(|actor| actor.id == id)
            .ok_or(ArtificeError::ActorNotFound(id))
    }

    /// Gets an actor by id.
    pub fn actor(&self, id: ActorId) -> ArtificeResult<&Actor> {
        let index = self.actor_index(id)?;
        Ok(&self.actors[index])
    }

    /// Gets an actor by id mutably.
    pub fn actor_mut(&mut self, id: ActorId) -> ArtificeResult<&mut Actor> {
        let index = self.actor_index(id)?;
        Ok(&mut self.actors[index])
    }

    /// Gets the player character.
    pub fn player(&self) -> ArtificeResult<&Actor> {
        self.actor(self.player_id)
    }

    /// Gets the player character mutably.
    pub fn player_mut(&mut self) -> ArtificeResult<&mut Actor> {
        self.actor_mut(self.player_id)
    }

    /// Checks whether the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.mode == GameMode::Dead
    }

    /// Checks whether terrain or a movement-blocking actor occupies a
    /// position.
    pub fn is_occupied_or_blocked(&self, pos: Position) -> bool {
        self.grid.is_blocked(pos)
            || self
                .actors
                .iter()
                .any(|actor| actor.blocks_movement && actor.position == pos)
    }

    /// Finds an actor able to fight at a position, other than `except`.
    pub fn fighter_at(&self, pos: Position, except: ActorId) -> Option<ActorId> {
        self.actors
            .iter()
            .find(|actor| actor.id != except && actor.position == pos && actor.fighter.is_some())
            .map(|actor| actor.id)
    }

    /// Moves an actor by a delta if the destination is free.
    ///
    /// The actor's wait counter is reset to its speed whether or not the
    /// move succeeds. Returns whether the actor actually moved.
    pub fn try_move(&mut self, id: ActorId, dx: i32, dy: i32) -> ArtificeResult<bool> {
        let index = self.actor_index(id)?;
        let target = self.actors[index].position + Position::new(dx, dy);
        let free = !self.is_occupied_or_blocked(target);

        let actor = &mut self.actors[index];
        if free {
            actor.position = target;
        }
        actor.wait = actor.speed;

        Ok(free)
    }

    /// Takes one step toward a target, rounding the direction to the
    /// nearest of the eight grid directions.
    pub fn move_towards(&mut self, id: ActorId, target: Position) -> ArtificeResult<bool> {
        let position = self.actor(id)?.position;
        let dx = (target.x - position.x) as f64;
        let dy = (target.y - position.y) as f64;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance == 0.0 {
            return Ok(false);
        }

        let step_x = (dx / distance).round() as i32;
        let step_y = (dy / distance).round() as i32;
        self.try_move(id, step_x, step_y)
    }

    /// Moves an actor to the front of the draw order so everything else is
    /// drawn over it.
    pub fn send_to_back(&mut self, id: ActorId) -> ArtificeResult<()> {
        let index = self.actor_index(id)?;
        let actor = self.actors.remove(index);
        self.actors.insert(0, actor);
        Ok(())
    }

    /// Checks whether a position is in the player's current field of view.
    pub fn is_visible(&self, pos: Position) -> bool {
        self.fov.is_visible(pos)
    }

    /// Recomputes the field of view from the player if it was invalidated,
    /// exploring every tile it reveals. Returns whether it recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`ArtificeError::ActorNotFound`] if the player is no longer
    /// in the actor list.
    pub fn recompute_fov_if_needed(&mut self) -> ArtificeResult<bool> {
        if !self.fov_recompute {
            return Ok(false);
        }

        let origin = self.player()?.position;
        self.fov = FieldOfView::compute(&self.grid, origin, self.fov_radius, self.fov_light_walls);
        self.fov.mark_explored(&mut self.grid);
        self.fov_recompute = false;
        Ok(true)
    }

    /// Records a narrative event, dropping the oldest once the history is
    /// full.
    pub fn push_event(&mut self, event: GameEvent) {
        info!("{}", event);
        self.events.push(event);

        if self.events.len() > MAX_EVENT_HISTORY {
            let overflow = self.events.len() - MAX_EVENT_HISTORY;
            self.events.drain(..overflow);
            self.unread_events = self.unread_events.saturating_sub(overflow);
        }
    }

    /// The most recent events, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Events recorded since the previous call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        let fresh = self.events[self.unread_events..].to_vec();
        self.unread_events = self.events.len();
        fresh
    }

    /// Runs one frame of the simulation.
    ///
    /// While playing: if the player is still waiting the frame ends there.
    /// Otherwise one input is polled and applied, then every monster either
    /// counts down its wait or takes a turn. Once dead, input is only read
    /// for exit and fullscreen requests.
    pub fn step(&mut self, input: &mut dyn InputSource) -> ArtificeResult<PlayerAction> {
        self.recompute_fov_if_needed()?;
        self.frame_number += 1;

        if self.mode == GameMode::Dead {
            return Ok(match input.poll_input() {
                PlayerInput::Exit => PlayerAction::Exit,
                PlayerInput::ToggleFullscreen => PlayerAction::ToggleFullscreen,
                _ => PlayerAction::DidntTakeTurn,
            });
        }

        let player = self.player_mut()?;
        if player.wait > 1 {
            player.wait -= 1;
            return Ok(PlayerAction::DidntTakeTurn);
        }

        let action = self.handle_player_input(input.poll_input())?;
        if action == PlayerAction::Exit {
            return Ok(action);
        }

        self.run_monster_turns()?;
        Ok(action)
    }

    fn handle_player_input(&mut self, input: PlayerInput) -> ArtificeResult<PlayerAction> {
        if let Some(direction) = input.direction() {
            let delta = direction.to_delta();
            return self.player_move_or_attack(delta.x, delta.y);
        }

        Ok(match input {
            PlayerInput::Exit => PlayerAction::Exit,
            PlayerInput::ToggleFullscreen => PlayerAction::ToggleFullscreen,
            _ => PlayerAction::DidntTakeTurn,
        })
    }

    /// Attacks whatever fighter stands in the way, or walks there.
    ///
    /// Attacking leaves the player's wait counter alone; walking (even into
    /// a wall) resets it. The field of view is invalidated either way.
    pub fn player_move_or_attack(&mut self, dx: i32, dy: i32) -> ArtificeResult<PlayerAction> {
        let player_id = self.player_id;
        let target = self.player()?.position + Position::new(dx, dy);

        match self.fighter_at(target, player_id) {
            Some(defender) => self.attack(player_id, defender)?,
            None => {
                self.try_move(player_id, dx, dy)?;
            }
        }

        self.fov_recompute = true;
        Ok(PlayerAction::TookTurn)
    }

    fn run_monster_turns(&mut self) -> ArtificeResult<()> {
        let thinkers: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|actor| actor.ai.is_some())
            .map(|actor| actor.id)
            .collect();

        for id in thinkers {
            if self.mode == GameMode::Dead {
                break;
            }

            let actor = self.actor_mut(id)?;
            let Some(ai): Option<Ai> = actor.ai else {
                continue;
            };
            if actor.wait > 0 {
                actor.wait -= 1;
                continue;
            }

            ai.take_turn(id, self)?;
        }

        Ok(())
    }
}
