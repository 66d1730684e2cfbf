//! Demo-mode steering
//!
//! Greedy bot that heads for the food along the wrapped grid while avoiding
//! its own body. It only chooses a heading; the caller feeds it to `turn()`.

use crate::sim::Game;
use crate::sim::rules::{
    Direction, is_self_collision, is_valid_turn, next_position, wrapped_distance,
};

pub struct Autopilot;

impl Autopilot {
    /// Heading for the next step, or `None` when the game is not running
    pub fn choose(game: &Game) -> Option<Direction> {
        if !game.is_running() {
            return None;
        }

        let head = game.head();
        let food = game.food().position;
        let (width, height) = (game.width(), game.height());

        let best = Self::safe_directions(game).into_iter().min_by_key(|&dir| {
            let next = next_position(head, dir, width, height);
            wrapped_distance(next, food, width, height)
        });

        Some(best.unwrap_or(game.direction()))
    }

    /// Valid headings whose next cell is free of the body
    pub fn safe_directions(game: &Game) -> Vec<Direction> {
        let head = game.head();
        Direction::ALL
            .into_iter()
            .filter(|&dir| is_valid_turn(game.direction(), dir))
            .filter(|&dir| {
                let next = next_position(head, dir, game.width(), game.height());
                !is_self_collision(next, game.snake())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::rules::Position;

    fn game() -> Game {
        Game::with_seed(10, 10, GameConfig::default(), 21)
    }

    #[test]
    fn test_heads_toward_food() {
        let mut game = game();
        game.set_snake_position([Position::new(5, 5)]).unwrap();
        game.set_food_position(Position::new(5, 2), Some("●")).unwrap();

        assert_eq!(Autopilot::choose(&game), Some(Direction::Up));
    }

    #[test]
    fn test_uses_wraparound_shortcut() {
        let mut game = game();
        game.set_snake_position([Position::new(1, 5)]).unwrap();
        game.set_direction(Direction::Up);
        game.set_food_position(Position::new(8, 5), Some("●")).unwrap();

        // Three cells left across the edge beats seven cells right
        assert_eq!(Autopilot::choose(&game), Some(Direction::Left));
    }

    #[test]
    fn test_avoids_body() {
        let mut game = game();
        game.set_snake_position([
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(4, 4),
            Position::new(5, 4),
            Position::new(6, 4),
        ])
        .unwrap();
        game.set_direction(Direction::Right);
        game.set_food_position(Position::new(5, 0), Some("●")).unwrap();

        // Up is closest to the food but blocked by the body
        let safe = Autopilot::safe_directions(&game);
        assert!(!safe.contains(&Direction::Up));
        assert!(!safe.contains(&Direction::Left));
        let choice = Autopilot::choose(&game).unwrap();
        assert!(choice == Direction::Right || choice == Direction::Down);
    }

    #[test]
    fn test_idle_when_not_running() {
        let mut game = game();
        game.pause();
        assert_eq!(Autopilot::choose(&game), None);
    }

    #[test]
    fn test_demo_run_stays_consistent() {
        let mut game = Game::with_seed(12, 12, GameConfig::default(), 4);
        for _ in 0..500 {
            let Some(direction) = Autopilot::choose(&game) else {
                break;
            };
            game.turn(direction);
            let before = game.snake().len();
            let eaten = game.symbols_consumed();
            game.step();

            if game.symbols_consumed() > eaten {
                assert_eq!(game.snake().len(), before + 1);
            } else if !game.is_game_over() {
                assert_eq!(game.snake().len(), before);
            }
        }
        assert!(game.symbols_consumed() > 0);
    }
}
