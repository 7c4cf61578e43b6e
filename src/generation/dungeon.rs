//! # Dungeon Generation
//!
//! Room-and-tunnel level layout.
//!
//! The generator makes a fixed number of attempts to place a random
//! rectangle. A candidate touching any accepted room is skipped, never
//! retried, so the final room count varies. Each accepted room after the
//! first is joined to the previous one by an L-shaped tunnel between the
//! two centers, which keeps every carved tile connected.

use crate::game::{Grid, MonsterKind, MonsterSpec, Position};
use crate::generation::{utils, Dungeon, DungeonLayout, GenerationConfig, Generator, Rect};
use crate::{ArtificeError, ArtificeResult};
use log::debug;
use rand::{rngs::StdRng, Rng};

/// Percentage of placed monsters that are orcs; the rest are trolls.
pub const ORC_CHANCE: u32 = 80;

/// Carves the interior of a room, leaving its boundary ring as wall.
pub fn create_room(grid: &mut Grid, room: &Rect) {
    for pos in room.interior_positions() {
        grid.set_passable(pos);
    }
}

/// Carves a one-tile horizontal tunnel, both endpoints included.
pub fn create_h_tunnel(grid: &mut Grid, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        grid.set_passable(Position::new(x, y));
    }
}

/// Carves a one-tile vertical tunnel, both endpoints included.
pub fn create_v_tunnel(grid: &mut Grid, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        grid.set_passable(Position::new(x, y));
    }
}

/// Draws a monster race: orcs four times out of five.
pub fn random_monster_kind(rng: &mut StdRng) -> MonsterKind {
    if rng.gen_range(0..100) < ORC_CHANCE {
        MonsterKind::Orc
    } else {
        MonsterKind::Troll
    }
}

/// Room-and-tunnel dungeon generator.
///
/// # Examples
///
/// ```
/// use artifice::{utils, GenerationConfig, Generator, RoomTunnelGenerator};
///
/// let config = GenerationConfig::for_testing(9);
/// let mut rng = utils::create_rng(&config);
/// let dungeon = RoomTunnelGenerator::new().generate(&config, &mut rng).unwrap();
///
/// let start = dungeon.layout.player_start;
/// assert!(!dungeon.grid.is_blocked(start));
/// ```
#[derive(Debug, Clone)]
pub struct RoomTunnelGenerator {
    /// Whether `generate` runs the reachability check before returning
    pub ensure_connectivity: bool,
}

impl RoomTunnelGenerator {
    /// Creates a new dungeon generator with default settings.
    pub fn new() -> Self {
        Self {
            ensure_connectivity: true,
        }
    }

    /// Carves rooms and tunnels into `grid` and picks monster placements.
    ///
    /// `grid` is expected to be solid wall and at least as large as the
    /// configured map.
    pub fn carve(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> ArtificeResult<DungeonLayout> {
        config.validate()?;

        let mut rooms: Vec<Rect> = Vec::new();
        let mut monsters = Vec::new();
        let mut player_start = None;

        for _ in 0..config.max_rooms {
            let w = rng.gen_range(config.room_min_size..=config.room_max_size);
            let h = rng.gen_range(config.room_min_size..=config.room_max_size);
            let x = rng.gen_range(0..=config.map_width - w - 1);
            let y = rng.gen_range(0..=config.map_height - h - 1);
            let candidate = Rect::new(x, y, w, h);

            if rooms.iter().any(|room| candidate.intersects(room)) {
                continue;
            }

            create_room(grid, &candidate);
            let center = candidate.center();

            match rooms.last() {
                None => player_start = Some(center),
                Some(previous) => {
                    let prev = previous.center();
                    if rng.gen_range(0..=1) == 1 {
                        create_h_tunnel(grid, prev.x, center.x, prev.y);
                        create_v_tunnel(grid, prev.y, center.y, center.x);
                    } else {
                        create_v_tunnel(grid, prev.y, center.y, prev.x);
                        create_h_tunnel(grid, prev.x, center.x, center.y);
                    }
                }
            }

            let start = player_start.unwrap_or(center);
            self.place_monsters(grid, &candidate, config, rng, start, &mut monsters);
            rooms.push(candidate);
        }

        let player_start = player_start.ok_or_else(|| {
            ArtificeError::GenerationFailed("no room could be placed".to_string())
        })?;

        Ok(DungeonLayout {
            player_start,
            rooms,
            monsters,
        })
    }

    /// Draws up to `max_room_monsters` placements inside one room.
    ///
    /// A draw landing on a blocked tile, the player start or another
    /// monster is dropped.
    fn place_monsters(
        &self,
        grid: &Grid,
        room: &Rect,
        config: &GenerationConfig,
        rng: &mut StdRng,
        player_start: Position,
        monsters: &mut Vec<MonsterSpec>,
    ) {
        let count = rng.gen_range(0..=config.max_room_monsters);

        for _ in 0..count {
            let x = rng.gen_range(room.x1 + 1..=room.x2 - 1);
            let y = rng.gen_range(room.y1 + 1..=room.y2 - 1);
            let pos = Position::new(x, y);

            let occupied = grid.is_blocked(pos)
                || pos == player_start
                || monsters.iter().any(|monster| monster.position == pos);
            if occupied {
                continue;
            }

            monsters.push(MonsterSpec::new(random_monster_kind(rng), pos));
        }
    }

    /// Validates that every carved tile can be walked to from the start.
    fn validate_connectivity(&self, dungeon: &Dungeon) -> ArtificeResult<()> {
        if !self.ensure_connectivity {
            return Ok(());
        }

        let reachable = dungeon.grid.reachable_from(dungeon.layout.player_start);
        if let Some(stranded) = dungeon
            .grid
            .passable_positions()
            .find(|pos| !reachable.contains(pos))
        {
            return Err(ArtificeError::GenerationFailed(format!(
                "tile {:?} is not reachable from the player start",
                stranded
            )));
        }

        Ok(())
    }
}

impl Generator<Dungeon> for RoomTunnelGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> ArtificeResult<Dungeon> {
        let mut grid = Grid::new(config.map_width, config.map_height);
        let layout = self.carve(&mut grid, config, rng)?;
        let dungeon = Dungeon { grid, layout };

        self.validate(&dungeon, config)?;
        debug!(
            "{} placed {} of {} rooms with seed {}",
            self.generator_type(),
            dungeon.layout.rooms.len(),
            config.max_rooms,
            config.seed
        );

        Ok(dungeon)
    }

    fn validate(&self, dungeon: &Dungeon, config: &GenerationConfig) -> ArtificeResult<()> {
        if dungeon.grid.width() != config.map_width || dungeon.grid.height() != config.map_height {
            return Err(ArtificeError::GenerationFailed(format!(
                "grid is {}x{}, expected {}x{}",
                dungeon.grid.width(),
                dungeon.grid.height(),
                config.map_width,
                config.map_height
            )));
        }

        let rooms = &dungeon.layout.rooms;
        for (i, room) in rooms.iter().enumerate() {
            if rooms[i + 1..].iter().any(|other| room.intersects(other)) {
                return Err(ArtificeError::GenerationFailed(format!(
                    "room {:?} overlaps a later room",
                    room
                )));
            }
        }

        for monster in &dungeon.layout.monsters {
            if dungeon.grid.is_blocked(monster.position) {
                return Err(ArtificeError::GenerationFailed(format!(
                    "monster placed inside a wall at {:?}",
                    monster.position
                )));
            }
        }

        self.validate_connectivity(dungeon)
    }

    fn generator_type(&self) -> &'static str {
        "RoomTunnelGenerator"
    }
}

impl Default for RoomTunnelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a dungeon straight from a config's seed.
pub fn generate_dungeon(config: &GenerationConfig) -> ArtificeResult<Dungeon> {
    let mut rng = utils::create_rng(config);
    RoomTunnelGenerator::new().generate(config, &mut rng)
}
