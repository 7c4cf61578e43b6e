//! # Monster AI
//!
//! Strategies run by the scheduler for every actor that carries an [`Ai`].

use crate::game::{ActorId, GameState};
use crate::ArtificeResult;
use log::trace;
use serde::{Deserialize, Serialize};

/// A monster brain.
///
/// The acting actor is passed in rather than stored, so a strategy is plain
/// data and can be copied out of the actor before it mutates the world.
pub trait AiStrategy {
    /// Takes one turn for `actor`.
    fn take_turn(&self, actor: ActorId, state: &mut GameState) -> ArtificeResult<()>;
}

/// Walks straight at the player while in view and hits when adjacent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasicMonster;

impl AiStrategy for BasicMonster {
    fn take_turn(&self, actor: ActorId, state: &mut GameState) -> ArtificeResult<()> {
        let position = state.actor(actor)?.position;

        // A monster sees the player exactly when the player sees it
        if !state.is_visible(position) {
            return Ok(());
        }

        let player = state.player()?;
        let player_id = player.id;
        let player_position = player.position;
        let player_alive = player.is_alive();

        let distance = position.euclidean_distance(player_position);
        if distance >= 2.0 {
            trace!("{} approaches from {:?}", actor, position);
            state.move_towards(actor, player_position)?;
        } else if player_alive {
            trace!("{} attacks from {:?}", actor, position);
            state.attack(actor, player_id)?;

            let monster = state.actor_mut(actor)?;
            if let Some(attack_speed) = monster.fighter.as_ref().map(|f| f.attack_speed) {
                monster.wait = attack_speed;
            }
        }

        Ok(())
    }
}

/// Every AI strategy an actor can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ai {
    Basic(BasicMonster),
}

impl AiStrategy for Ai {
    fn take_turn(&self, actor: ActorId, state: &mut GameState) -> ArtificeResult<()> {
        match self {
            Ai::Basic(strategy) => strategy.take_turn(actor, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Actor, GameEvent, Grid, MonsterKind, MonsterSpec, Position};

    fn corridor_state(player_x: i32, monster_x: i32) -> (GameState, ActorId) {
        let mut grid = Grid::new(30, 3);
        for x in 1..29 {
            grid.set_passable(Position::new(x, 1));
        }
        let mut state = GameState::new(grid, Actor::player(Position::new(player_x, 1)));
        let monster = state.add_actor(MonsterSpec::new(MonsterKind::Orc, Position::new(monster_x, 1)).spawn());
        state.recompute_fov_if_needed().unwrap();
        (state, monster)
    }

    #[test]
    fn test_visible_monster_steps_toward_player() {
        let (mut state, orc) = corridor_state(2, 8);
        Ai::Basic(BasicMonster).take_turn(orc, &mut state).unwrap();

        let monster = state.actor(orc).unwrap();
        assert_eq!(monster.position, Position::new(7, 1));
        assert_eq!(monster.wait, monster.speed);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_adjacent_monster_attacks_and_waits() {
        let (mut state, orc) = corridor_state(2, 3);
        BasicMonster.take_turn(orc, &mut state).unwrap();

        let monster = state.actor(orc).unwrap();
        assert_eq!(monster.position, Position::new(3, 1));
        assert_eq!(monster.wait, monster.fighter.as_ref().unwrap().attack_speed);
        // Orc power 3 against player defense 2
        assert_eq!(
            state.events(),
            &[GameEvent::Attacked {
                attacker: "orc".to_string(),
                defender: "player".to_string(),
                damage: 1,
            }]
        );
        assert_eq!(state.player().unwrap().fighter.as_ref().unwrap().hp, 29);
    }

    #[test]
    fn test_unseen_monster_idles() {
        // Beyond the sight radius
        let (mut state, orc) = corridor_state(2, 20);
        BasicMonster.take_turn(orc, &mut state).unwrap();

        let monster = state.actor(orc).unwrap();
        assert_eq!(monster.position, Position::new(20, 1));
        assert_eq!(monster.wait, 0);
    }

    #[test]
    fn test_does_not_attack_a_dead_player() {
        let (mut state, orc) = corridor_state(2, 3);
        let player_id = state.player_id;
        state.take_damage(player_id, 1000).unwrap();
        let events_before = state.events().len();

        BasicMonster.take_turn(orc, &mut state).unwrap();
        assert_eq!(state.events().len(), events_before);
    }
}
