//! Integration test to ensure a game can be generated and stepped from a seed.

use artifice::{
    render_frame, utils, ArtificeResult, Console, GameMode, GameState, GenerationConfig,
    PlayerAction, Rgb, ScriptedInput,
};

#[derive(Default)]
struct CountingConsole {
    glyphs: usize,
    backgrounds: usize,
    presents: usize,
}

impl Console for CountingConsole {
    fn put_glyph(&mut self, _x: i32, _y: i32, _glyph: char, _color: Rgb) {
        self.glyphs += 1;
    }

    fn set_background(&mut self, _x: i32, _y: i32, _color: Rgb) {
        self.backgrounds += 1;
    }

    fn clear(&mut self) {
        self.glyphs = 0;
        self.backgrounds = 0;
    }

    fn present(&mut self) {
        self.presents += 1;
    }
}

#[test]
fn test_basic_startup() -> ArtificeResult<()> {
    let config = GenerationConfig::new(12345);
    let mut rng = utils::create_rng(&config);
    let mut state = GameState::generate(&config, &mut rng)?;

    assert_eq!(state.mode, GameMode::Playing);
    assert_eq!((state.grid.width(), state.grid.height()), (80, 45));
    assert_eq!(state.actors[0].id, state.player_id);

    let start = state.player()?.position;
    assert!(!state.grid.is_blocked(start));

    for monster in state.actors.iter().skip(1) {
        assert!(monster.ai.is_some());
        assert!(monster.fighter.is_some());
        assert!(monster.blocks_movement);
        assert_ne!(monster.position, start);
        assert!(!state.grid.is_blocked(monster.position));
    }

    let mut input = ScriptedInput::default();
    assert_eq!(state.step(&mut input)?, PlayerAction::DidntTakeTurn);
    assert_eq!(state.frame_number, 1);
    assert!(state.is_visible(start));
    assert!(state.grid.is_explored(start));

    Ok(())
}

#[test]
fn test_same_seed_builds_the_same_world() -> ArtificeResult<()> {
    let config = GenerationConfig::new(777);
    let a = GameState::generate(&config, &mut utils::create_rng(&config))?;
    let b = GameState::generate(&config, &mut utils::create_rng(&config))?;

    assert_eq!(a.grid, b.grid);
    let describe = |state: &GameState| -> Vec<(String, i32, i32)> {
        state
            .actors
            .iter()
            .map(|actor| (actor.name.clone(), actor.position.x, actor.position.y))
            .collect()
    };
    assert_eq!(describe(&a), describe(&b));

    Ok(())
}

#[test]
fn test_first_frame_renders() -> ArtificeResult<()> {
    let config = GenerationConfig::for_testing(5);
    let mut state = GameState::generate(&config, &mut utils::create_rng(&config))?;
    let mut console = CountingConsole::default();

    render_frame(&mut state, &mut console)?;

    assert_eq!(console.presents, 1);
    assert_eq!(console.backgrounds, state.fov.visible_positions().count());
    // At least the player and the status line
    assert!(console.glyphs > 1);

    Ok(())
}
