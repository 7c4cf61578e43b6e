//! # Combat
//!
//! Melee resolution, damage and the two death policies.
//!
//! Every outcome is recorded as a [`GameEvent`] on the game state. The
//! frontend turns them into message-log lines through `Display`; tests
//! assert on the structured values directly.

use crate::game::{capitalize, ActorId, DeathPolicy, GameMode, GameState, CORPSE_COLOR, CORPSE_GLYPH};
use crate::{ArtificeError, ArtificeResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A narrative event produced by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A blow that dealt damage
    Attacked {
        attacker: String,
        defender: String,
        damage: i32,
    },
    /// A blow absorbed entirely by the defender's defense
    AttackHadNoEffect { attacker: String, defender: String },
    /// Something ran out of hit points
    Died { name: String, was_player: bool },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Attacked {
                attacker,
                defender,
                damage,
            } => write!(
                f,
                "{} attacks {} for {} hit points.",
                capitalize(attacker),
                defender,
                damage
            ),
            GameEvent::AttackHadNoEffect { attacker, defender } => write!(
                f,
                "{} attacks {} but it has no effect!",
                capitalize(attacker),
                defender
            ),
            GameEvent::Died {
                was_player: true, ..
            } => write!(f, "You died!"),
            GameEvent::Died { name, .. } => write!(f, "{} is dead!", capitalize(name)),
        }
    }
}

impl GameState {
    /// Resolves one melee blow.
    ///
    /// Damage is the attacker's power minus the defender's defense. Only a
    /// positive result is applied. The attacker's wait counter is untouched.
    pub fn attack(&mut self, attacker: ActorId, defender: ActorId) -> ArtificeResult<()> {
        let (attacker_name, power) = {
            let actor = self.actor(attacker)?;
            let fighter = actor.fighter.as_ref().ok_or(ArtificeError::MissingCapability {
                actor: attacker,
                capability: "fighter",
            })?;
            (actor.name.clone(), fighter.power)
        };
        let (defender_name, defense) = {
            let actor = self.actor(defender)?;
            let fighter = actor.fighter.as_ref().ok_or(ArtificeError::MissingCapability {
                actor: defender,
                capability: "fighter",
            })?;
            (actor.name.clone(), fighter.defense)
        };

        let damage = power - defense;
        if damage > 0 {
            self.push_event(GameEvent::Attacked {
                attacker: attacker_name,
                defender: defender_name,
                damage,
            });
            self.take_damage(defender, damage)?;
        } else {
            self.push_event(GameEvent::AttackHadNoEffect {
                attacker: attacker_name,
                defender: defender_name,
            });
        }

        Ok(())
    }

    /// Applies damage to an actor's fighter and runs its death policy when
    /// the hit is lethal.
    pub fn take_damage(&mut self, target: ActorId, amount: i32) -> ArtificeResult<()> {
        let actor = self.actor_mut(target)?;
        let fighter = actor.fighter.as_mut().ok_or(ArtificeError::MissingCapability {
            actor: target,
            capability: "fighter",
        })?;

        if let Some(policy) = fighter.take_damage(amount) {
            self.apply_death(target, policy)?;
        }

        Ok(())
    }

    fn apply_death(&mut self, target: ActorId, policy: DeathPolicy) -> ArtificeResult<()> {
        match policy {
            DeathPolicy::PlayerDeath => {
                let actor = self.actor_mut(target)?;
                actor.glyph = CORPSE_GLYPH;
                actor.color = CORPSE_COLOR;
                let name = actor.name.clone();

                self.push_event(GameEvent::Died {
                    name,
                    was_player: true,
                });
                self.mode = GameMode::Dead;
                info!("Player died on frame {}", self.frame_number);
            }
            DeathPolicy::MonsterDeath => {
                let actor = self.actor_mut(target)?;
                let name = actor.name.clone();
                actor.become_remains();

                self.push_event(GameEvent::Died {
                    name,
                    was_player: false,
                });
                self.send_to_back(target)?;
            }
        }

        Ok(())
    }
}
