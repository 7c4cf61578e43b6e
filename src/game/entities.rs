//! # Entities
//!
//! Actors and the optional capabilities they carry.
//!
//! An actor is a positioned glyph. Combat ability ([`Fighter`]) and a brain
//! ([`Ai`]) are plain optional fields: the owning actor is whatever the
//! caller passes in, so capabilities never point back at their owner.

use crate::config::{DEFAULT_ATTACK_SPEED, DEFAULT_SPEED, PLAYER_SPEED};
use crate::game::{
    new_actor_id, ActorId, Ai, BasicMonster, Position, Rgb, DARKER_GREEN, DARK_RED,
    DESATURATED_GREEN, WHITE,
};
use serde::{Deserialize, Serialize};

/// Glyph left behind by anything that dies.
pub const CORPSE_GLYPH: char = '%';

/// Color of the corpse glyph.
pub const CORPSE_COLOR: Rgb = DARK_RED;

/// What happens to an actor when its hit points run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathPolicy {
    /// The game ends; the player's glyph turns into a corpse.
    PlayerDeath,
    /// The actor becomes inert remains and moves to the back of the draw order.
    MonsterDeath,
}

/// Combat capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub max_hp: i32,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    /// Frames a monster waits after landing an attack
    pub attack_speed: i32,
    pub on_death: DeathPolicy,
}

impl Fighter {
    /// Creates a fighter at full health.
    pub fn new(hp: i32, defense: i32, power: i32, on_death: DeathPolicy) -> Self {
        Self {
            max_hp: hp,
            hp,
            defense,
            power,
            attack_speed: DEFAULT_ATTACK_SPEED,
            on_death,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtracts positive damage from hit points.
    ///
    /// Returns the death policy only on the hit that takes `hp` from above
    /// zero to zero or below, so a death fires at most once per fighter.
    ///
    /// # Examples
    ///
    /// ```
    /// use artifice::{DeathPolicy, Fighter};
    ///
    /// let mut fighter = Fighter::new(5, 0, 1, DeathPolicy::MonsterDeath);
    /// assert_eq!(fighter.take_damage(3), None);
    /// assert_eq!(fighter.take_damage(3), Some(DeathPolicy::MonsterDeath));
    /// assert_eq!(fighter.take_damage(3), None);
    /// ```
    pub fn take_damage(&mut self, amount: i32) -> Option<DeathPolicy> {
        if amount <= 0 {
            return None;
        }

        let was_alive = self.is_alive();
        self.hp -= amount;

        if was_alive && !self.is_alive() {
            Some(self.on_death)
        } else {
            None
        }
    }
}

/// Anything positioned on the map: the player, monsters and their remains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub position: Position,
    pub glyph: char,
    pub color: Rgb,
    pub blocks_movement: bool,
    /// Frames to wait after a move
    pub speed: i32,
    /// Frames left before this actor may act again
    pub wait: i32,
    pub fighter: Option<Fighter>,
    pub ai: Option<Ai>,
}

impl Actor {
    /// Creates a capability-free actor.
    pub fn new(
        name: impl Into<String>,
        position: Position,
        glyph: char,
        color: Rgb,
        blocks_movement: bool,
    ) -> Self {
        Self {
            id: new_actor_id(),
            name: name.into(),
            position,
            glyph,
            color,
            blocks_movement,
            speed: DEFAULT_SPEED,
            wait: 0,
            fighter: None,
            ai: None,
        }
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_fighter(mut self, fighter: Fighter) -> Self {
        self.fighter = Some(fighter);
        self
    }

    pub fn with_ai(mut self, ai: Ai) -> Self {
        self.ai = Some(ai);
        self
    }

    /// Creates the player character.
    ///
    /// # Examples
    ///
    /// ```
    /// use artifice::{Actor, Position};
    ///
    /// let player = Actor::player(Position::new(5, 5));
    /// assert_eq!(player.glyph, '@');
    /// assert_eq!(player.fighter.as_ref().map(|f| f.hp), Some(30));
    /// assert!(player.ai.is_none());
    /// ```
    pub fn player(position: Position) -> Self {
        Actor::new("player", position, '@', WHITE, true)
            .with_speed(PLAYER_SPEED)
            .with_fighter(Fighter::new(30, 2, 5, DeathPolicy::PlayerDeath))
    }

    /// Euclidean distance to another actor.
    pub fn distance_to(&self, other: &Actor) -> f64 {
        self.position.euclidean_distance(other.position)
    }

    /// Checks whether this actor still has a fighter with hit points left.
    pub fn is_alive(&self) -> bool {
        self.fighter.as_ref().is_some_and(Fighter::is_alive)
    }

    /// Turns this actor into inert remains.
    ///
    /// The glyph becomes a corpse, movement is no longer blocked, both
    /// capabilities are dropped and the name gets a "remains of" prefix.
    pub fn become_remains(&mut self) {
        self.glyph = CORPSE_GLYPH;
        self.color = CORPSE_COLOR;
        self.blocks_movement = false;
        self.fighter = None;
        self.ai = None;
        self.name = format!("remains of {}", self.name);
    }
}

/// The monster races that can be placed in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Orc,
    Troll,
}

impl MonsterKind {
    pub fn name(self) -> &'static str {
        match self {
            MonsterKind::Orc => "orc",
            MonsterKind::Troll => "troll",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            MonsterKind::Orc => 'o',
            MonsterKind::Troll => 'T',
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            MonsterKind::Orc => DESATURATED_GREEN,
            MonsterKind::Troll => DARKER_GREEN,
        }
    }

    /// Fresh combat stats for this race.
    pub fn fighter(self) -> Fighter {
        match self {
            MonsterKind::Orc => Fighter::new(10, 0, 3, DeathPolicy::MonsterDeath),
            MonsterKind::Troll => Fighter::new(16, 1, 4, DeathPolicy::MonsterDeath),
        }
    }
}

/// A monster chosen by the generator, not yet spawned into the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterSpec {
    pub kind: MonsterKind,
    pub position: Position,
}

impl MonsterSpec {
    pub fn new(kind: MonsterKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Builds the actor for this placement.
    pub fn spawn(&self) -> Actor {
        Actor::new(
            self.kind.name(),
            self.position,
            self.kind.glyph(),
            self.kind.color(),
            true,
        )
        .with_fighter(self.kind.fighter())
        .with_ai(Ai::Basic(BasicMonster))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_damage_ignores_non_positive_amounts() {
        let mut fighter = Fighter::new(10, 0, 3, DeathPolicy::MonsterDeath);
        assert_eq!(fighter.take_damage(0), None);
        assert_eq!(fighter.take_damage(-4), None);
        assert_eq!(fighter.hp, 10);
    }

    #[test]
    fn test_death_fires_once() {
        let mut fighter = Fighter::new(4, 0, 3, DeathPolicy::PlayerDeath);
        assert_eq!(fighter.take_damage(10), Some(DeathPolicy::PlayerDeath));
        assert_eq!(fighter.hp, -6);
        assert_eq!(fighter.take_damage(1), None);
        assert_eq!(fighter.take_damage(100), None);
    }

    #[test]
    fn test_exact_lethal_damage_triggers_death() {
        let mut fighter = Fighter::new(7, 0, 3, DeathPolicy::MonsterDeath);
        assert_eq!(fighter.take_damage(7), Some(DeathPolicy::MonsterDeath));
        assert_eq!(fighter.hp, 0);
        assert!(!fighter.is_alive());
    }

    #[test]
    fn test_monster_templates() {
        let orc = MonsterSpec::new(MonsterKind::Orc, Position::new(3, 3)).spawn();
        assert_eq!(orc.name, "orc");
        assert_eq!(orc.glyph, 'o');
        assert!(orc.blocks_movement);
        assert_eq!(orc.speed, DEFAULT_SPEED);
        let fighter = orc.fighter.as_ref().unwrap();
        assert_eq!((fighter.hp, fighter.defense, fighter.power), (10, 0, 3));
        assert_eq!(orc.ai, Some(Ai::Basic(BasicMonster)));

        let troll = MonsterSpec::new(MonsterKind::Troll, Position::new(4, 4)).spawn();
        assert_eq!(troll.glyph, 'T');
        let fighter = troll.fighter.as_ref().unwrap();
        assert_eq!((fighter.hp, fighter.defense, fighter.power), (16, 1, 4));
        assert_eq!(fighter.on_death, DeathPolicy::MonsterDeath);
    }

    #[test]
    fn test_become_remains() {
        let mut troll = MonsterSpec::new(MonsterKind::Troll, Position::new(1, 1)).spawn();
        troll.become_remains();

        assert_eq!(troll.glyph, CORPSE_GLYPH);
        assert_eq!(troll.color, CORPSE_COLOR);
        assert!(!troll.blocks_movement);
        assert!(troll.fighter.is_none());
        assert!(troll.ai.is_none());
        assert_eq!(troll.name, "remains of troll");
        assert!(!troll.is_alive());
    }

    #[test]
    fn test_distance_to() {
        let a = Actor::player(Position::new(1, 1));
        let b = MonsterSpec::new(MonsterKind::Orc, Position::new(4, 5)).spawn();
        assert_eq!(a.distance_to(&b), 5.0);
    }
}
