//! End-to-end scenarios driven through the scheduler with scripted input.

use artifice::{
    create_h_tunnel, create_room, Actor, ActorId, ArtificeResult, DeathPolicy, Fighter,
    GameEvent, GameMode, GameState, Grid, MonsterKind, MonsterSpec, PlayerAction, PlayerInput,
    Position, Rect, ScriptedInput, CORPSE_GLYPH,
};

fn two_room_grid() -> (Grid, Rect, Rect) {
    let mut grid = Grid::new(80, 45);
    let left = Rect::new(20, 15, 10, 15);
    let right = Rect::new(50, 15, 10, 15);
    create_room(&mut grid, &left);
    create_room(&mut grid, &right);
    create_h_tunnel(&mut grid, 25, 55, 23);
    (grid, left, right)
}

fn corridor(length: i32) -> Grid {
    let mut grid = Grid::new(length, 3);
    create_h_tunnel(&mut grid, 1, length - 2, 1);
    grid
}

fn run_frames(
    state: &mut GameState,
    input: &mut ScriptedInput,
    frames: usize,
) -> ArtificeResult<Vec<PlayerAction>> {
    (0..frames).map(|_| state.step(input)).collect()
}

#[test]
fn test_two_room_layout() {
    let (grid, left, right) = two_room_grid();

    for pos in grid.positions() {
        let in_tunnel = pos.y == 23 && (25..=55).contains(&pos.x);
        let expected = left.contains_interior(pos) || right.contains_interior(pos) || in_tunnel;
        assert_eq!(grid.is_blocked(pos), !expected, "unexpected tile at {:?}", pos);
    }

    let reachable = grid.reachable_from(left.center());
    assert!(reachable.contains(&right.center()));
    assert_eq!(reachable.len(), grid.passable_positions().count());
}

#[test]
fn test_walk_from_room_to_room() -> ArtificeResult<()> {
    let (grid, left, right) = two_room_grid();
    let mut state = GameState::new(grid, Actor::player(left.center()));
    assert_eq!(left.center(), Position::new(25, 22));

    let mut script = vec![PlayerInput::MoveDown];
    script.extend(std::iter::repeat(PlayerInput::MoveRight).take(30));
    let mut input = ScriptedInput::new(script);

    run_frames(&mut state, &mut input, 100)?;
    assert_eq!(input.remaining(), 0);
    assert_eq!(state.player()?.position, Position::new(55, 23));

    state.recompute_fov_if_needed()?;
    assert!(state.is_visible(right.center()));
    assert!(state.grid.is_explored(Position::new(58, 28)));
    // The first room is remembered but out of sight
    assert!(state.grid.is_explored(Position::new(21, 16)));
    assert!(!state.is_visible(Position::new(21, 16)));

    Ok(())
}

#[test]
fn test_player_kills_an_orc() -> ArtificeResult<()> {
    let (grid, left, _) = two_room_grid();
    let mut state = GameState::new(grid, Actor::player(left.center()));
    let orc = state.add_actor(MonsterSpec::new(MonsterKind::Orc, Position::new(26, 22)).spawn());
    let player = state.player_id;

    let mut input = ScriptedInput::new(vec![PlayerInput::MoveRight; 3]);
    let actions = run_frames(&mut state, &mut input, 3)?;
    assert_eq!(actions, vec![PlayerAction::TookTurn; 3]);

    let hit = |attacker: &str, defender: &str, damage| GameEvent::Attacked {
        attacker: attacker.to_string(),
        defender: defender.to_string(),
        damage,
    };
    assert_eq!(
        state.events(),
        &[
            hit("player", "orc", 5),
            hit("orc", "player", 1),
            hit("player", "orc", 5),
            GameEvent::Died {
                name: "orc".to_string(),
                was_player: false,
            },
        ]
    );

    // Remains are drawn first and no longer block the way
    assert_eq!(state.actors[0].id, orc);
    assert_eq!(state.actor(orc)?.glyph, CORPSE_GLYPH);
    assert_eq!(state.actor(player)?.position, Position::new(26, 22));
    assert_eq!(state.player()?.fighter.as_ref().map(|f| f.hp), Some(29));

    let lines: Vec<String> = state.drain_events().iter().map(ToString::to_string).collect();
    assert_eq!(lines[0], "Player attacks orc for 5 hit points.");
    assert_eq!(lines[1], "Orc attacks player for 1 hit points.");
    assert_eq!(lines[3], "Orc is dead!");

    Ok(())
}

#[test]
fn test_player_death_ends_play() -> ArtificeResult<()> {
    let (grid, left, _) = two_room_grid();
    let frail = Actor::player(left.center())
        .with_fighter(Fighter::new(3, 0, 5, DeathPolicy::PlayerDeath));
    let mut state = GameState::new(grid, frail);
    state.add_actor(MonsterSpec::new(MonsterKind::Troll, Position::new(26, 22)).spawn());

    let mut input = ScriptedInput::new(vec![
        PlayerInput::None,
        PlayerInput::MoveLeft,
        PlayerInput::Exit,
    ]);

    assert_eq!(state.step(&mut input)?, PlayerAction::DidntTakeTurn);
    assert_eq!(state.mode, GameMode::Dead);
    assert_eq!(state.events().last().map(ToString::to_string), Some("You died!".to_string()));
    assert_eq!(state.player()?.glyph, CORPSE_GLYPH);

    assert_eq!(state.step(&mut input)?, PlayerAction::DidntTakeTurn);
    assert_eq!(state.player()?.position, left.center());
    assert_eq!(state.step(&mut input)?, PlayerAction::Exit);

    Ok(())
}

#[test]
fn test_player_speed_sets_move_cadence() -> ArtificeResult<()> {
    let player = Actor::player(Position::new(1, 1)).with_speed(8);
    let mut state = GameState::new(corridor(60), player);
    let mut input = ScriptedInput::new(vec![PlayerInput::MoveRight; 10]);

    let actions = run_frames(&mut state, &mut input, 32)?;
    let turns: Vec<usize> = actions
        .iter()
        .enumerate()
        .filter(|(_, action)| **action == PlayerAction::TookTurn)
        .map(|(frame, _)| frame)
        .collect();

    assert_eq!(turns, vec![0, 8, 16, 24]);
    assert_eq!(state.player()?.position, Position::new(5, 1));

    Ok(())
}

#[test]
fn test_monster_moves_after_counting_down_its_speed() -> ArtificeResult<()> {
    let mut state = GameState::new(corridor(30), Actor::player(Position::new(2, 1)));
    let orc = state.add_actor(MonsterSpec::new(MonsterKind::Orc, Position::new(12, 1)).spawn());
    let mut input = ScriptedInput::default();

    let mut moves = Vec::new();
    let mut last = state.actor(orc)?.position;
    for frame in 0..27 {
        state.step(&mut input)?;
        let now = state.actor(orc)?.position;
        if now != last {
            moves.push(frame);
            last = now;
        }
    }

    // Eight frames of countdown, then a move on the ninth
    assert_eq!(moves, vec![0, 9, 18]);
    assert_eq!(last, Position::new(9, 1));

    Ok(())
}

#[test]
fn test_monster_attacks_wait_for_attack_speed() -> ArtificeResult<()> {
    let mut state = GameState::new(corridor(30), Actor::player(Position::new(2, 1)));
    let orc: ActorId =
        state.add_actor(MonsterSpec::new(MonsterKind::Orc, Position::new(3, 1)).spawn());
    let attack_speed = state.actor(orc)?.fighter.as_ref().map(|f| f.attack_speed);
    assert_eq!(attack_speed, Some(20));

    let mut input = ScriptedInput::default();
    run_frames(&mut state, &mut input, 42)?;
    assert_eq!(state.events().len(), 2);

    state.step(&mut input)?;
    assert_eq!(state.events().len(), 3);
    assert_eq!(state.player()?.fighter.as_ref().map(|f| f.hp), Some(27));

    Ok(())
}

#[test]
fn test_events_serialize() {
    let events = vec![
        GameEvent::Attacked {
            attacker: "troll".to_string(),
            defender: "player".to_string(),
            damage: 2,
        },
        GameEvent::Died {
            name: "player".to_string(),
            was_player: true,
        },
    ];

    let json = serde_json::to_string(&events).unwrap();
    assert!(json.contains("\"Attacked\""));
    assert!(json.contains("\"was_player\":true"));

    let decoded: Vec<GameEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, events);
}
