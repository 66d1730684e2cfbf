use snek::sim::{GameOverCause, TickInput, tick};
use snek::{
    Autopilot, Direction, Game, GameConfig, GameEvent, Position, ProgressionMode, StepOutcome,
};

fn positions(cells: &[(u32, u32)]) -> Vec<Position> {
    cells.iter().copied().map(Position::from).collect()
}

fn snake_of(game: &Game) -> Vec<Position> {
    game.snake().iter().copied().collect()
}

#[test]
fn self_collision_leaves_snake_unchanged() {
    let mut game = Game::with_seed(10, 10, GameConfig::default(), 1);
    let body = positions(&[(5, 5), (4, 5), (4, 4), (5, 4)]);
    game.set_snake_position(body.clone()).unwrap();
    game.set_food_position(Position::new(9, 9), None).unwrap();
    game.set_direction(Direction::Up);

    game.step();

    assert!(game.is_game_over());
    assert_eq!(game.game_over_cause(), Some(GameOverCause::SelfCollision));
    assert_eq!(snake_of(&game), body);
}

#[test]
fn food_ahead_grows_snake_and_moves_food() {
    let mut game = Game::with_seed(10, 10, GameConfig::default(), 2);
    let head = game.head();
    assert_eq!(game.direction(), Direction::Right);
    game.set_food_position(Position::new(head.x + 1, head.y), None).unwrap();
    let before = game.snake().len();

    assert_eq!(game.step(), StepOutcome::Ate);

    assert_eq!(game.snake().len(), before + 1);
    assert_ne!(game.food().position, game.head());
    assert!(!game.snake().contains(&game.food().position));
}

#[test]
fn resize_doubles_positions() {
    let mut game = Game::with_seed(10, 10, GameConfig::default(), 3);
    game.set_snake_position(positions(&[(5, 5), (4, 5), (3, 5)])).unwrap();
    game.set_food_position(Position::new(7, 7), None).unwrap();

    game.resize(20, 20);

    assert_eq!(snake_of(&game), positions(&[(10, 10), (8, 10), (6, 10)]));
    assert_eq!(game.food().position, Position::new(14, 14));
}

#[test]
fn game_over_is_terminal() {
    let mut game = Game::with_seed(10, 10, GameConfig::default(), 4);
    game.set_snake_position(positions(&[(5, 5), (4, 5), (4, 4), (5, 4)])).unwrap();
    game.set_direction(Direction::Up);
    game.step();
    assert!(game.is_game_over());

    let before = game.snapshot();
    for direction in Direction::ALL {
        game.turn(direction);
        game.step();
    }
    let after = game.snapshot();
    assert_eq!(after.snake, before.snake);
    assert_eq!(after.food, before.food);
    assert_eq!(after.symbols_consumed, before.symbols_consumed);
    assert_eq!(after.steps, before.steps);
}

#[test]
fn same_seed_same_game() {
    let run = |seed| {
        let mut game = Game::with_seed(15, 12, GameConfig::default(), seed);
        for _ in 0..300 {
            let input = TickInput {
                turn: Autopilot::choose(&game),
                ..Default::default()
            };
            tick(&mut game, &input);
        }
        game.snapshot()
    };

    assert_eq!(run(77), run(77));
}

#[test]
fn growth_invariant_holds_through_a_demo_run() {
    let config = GameConfig::with_progression(ProgressionMode::Level {
        symbols_per_level: 2,
    });
    let mut game = Game::with_seed(12, 10, config, 5);

    for _ in 0..1000 {
        if let Some(direction) = Autopilot::choose(&game) {
            game.turn(direction);
        }
        let before = game.snake().len();
        match game.step() {
            StepOutcome::Ate => assert_eq!(game.snake().len(), before + 1),
            StepOutcome::Moved => assert_eq!(game.snake().len(), before),
            StepOutcome::Died(_) | StepOutcome::Idle => break,
        }
    }

    let level = game.level().unwrap();
    assert_eq!(level, game.symbols_consumed() / 2 + 1);
}

#[test]
fn board_filled_ends_game_instead_of_hanging() {
    let mut game = Game::with_seed(2, 1, GameConfig::default(), 6);
    game.set_snake_position([Position::new(0, 0)]).unwrap();
    game.set_direction(Direction::Right);
    game.set_food_position(Position::new(1, 0), None).unwrap();

    assert_eq!(game.step(), StepOutcome::Died(GameOverCause::BoardFilled));
    assert!(game.drain_events().contains(&GameEvent::GameOver {
        cause: GameOverCause::BoardFilled
    }));
}

#[test]
fn events_arrive_in_step_order() {
    let config = GameConfig::with_progression(ProgressionMode::World {
        symbols_per_world: 1,
    });
    let mut game = Game::with_seed(10, 10, config, 7);
    game.set_food_position(Position::new(6, 5), Some("★")).unwrap();

    game.step();
    let events = game.drain_events();

    assert_eq!(
        events[0],
        GameEvent::FoodEaten {
            glyph: "★".to_string(),
            position: Position::new(6, 5)
        }
    );
    assert_eq!(
        events[1],
        GameEvent::WorldEntered {
            index: 1,
            name: "Ancient Egypt".to_string()
        }
    );
    assert!(matches!(events[2], GameEvent::SpeedChanged { .. }));
}

#[test]
fn wraps_around_the_edges() {
    let mut game = Game::with_seed(10, 10, GameConfig::default(), 8);
    game.set_snake_position([Position::new(9, 0)]).unwrap();
    game.set_food_position(Position::new(5, 5), None).unwrap();

    game.step();
    assert_eq!(game.head(), Position::new(0, 0));

    game.turn(Direction::Up);
    game.step();
    assert_eq!(game.head(), Position::new(0, 9));
}
