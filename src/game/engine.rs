use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info};

use super::{
    action::Direction,
    config::{ConfigError, GameConfig},
    state::{Apple, MoveOutcome, Snake},
};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The head landed on the apple this tick
    pub ate_apple: bool,
    /// The snake ran into itself and was reset
    pub collided: bool,
}

/// Owns the snake, the apple and the RNG, and advances them one tick at a time
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    snake: Snake,
    apple: Apple,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing apple positions from `rng`
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        let snake = Snake::new(&config)?;
        let apple = Apple::new(&config, &snake.occupied(), &mut rng)?;

        debug!(
            grid_width = config.grid_width(),
            grid_height = config.grid_height(),
            apple_x = apple.position.x,
            apple_y = apple.position.y,
            "Game engine initialised"
        );

        Ok(Self {
            config,
            snake,
            apple,
            rng,
        })
    }

    /// Queue a turn for the next tick
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.snake.set_pending_direction(direction);
    }

    /// Execute one tick: resolve direction, move, then check the apple
    pub fn tick(&mut self) -> TickOutcome {
        self.snake.update_direction();

        if self.snake.move_snake() == MoveOutcome::Collided {
            info!(
                head_x = self.snake.head().x,
                head_y = self.snake.head().y,
                "Snake ran into itself, resetting"
            );
            // The reset head can land on the apple too
            let ate_apple = self.check_apple();
            return TickOutcome {
                ate_apple,
                collided: true,
            };
        }

        TickOutcome {
            ate_apple: self.check_apple(),
            collided: false,
        }
    }

    fn check_apple(&mut self) -> bool {
        if self.snake.head() != self.apple.position {
            return false;
        }

        self.snake.grow();
        self.apple
            .randomize_position(&self.config, &self.snake.occupied(), &mut self.rng);

        debug!(
            length = self.snake.length,
            apple_x = self.apple.position.x,
            apple_y = self.apple.position.y,
            "Apple eaten"
        );

        true
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    #[cfg(test)]
    pub(crate) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    #[cfg(test)]
    pub(crate) fn apple_mut(&mut self) -> &mut Apple {
        &mut self.apple
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Position;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(config: GameConfig) -> GameEngine<StdRng> {
        GameEngine::with_rng(config, StdRng::seed_from_u64(1234)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = GameEngine::with_rng(GameConfig::new(640, 480, 33), StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(ConfigError::GridMisaligned { .. })));
    }

    #[test]
    fn test_rejects_single_cell_grid() {
        let result = GameEngine::with_rng(GameConfig::new(20, 20, 20), StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(ConfigError::TooFewCells { cells: 1 })));
    }

    #[test]
    fn test_initial_state() {
        let engine = seeded(GameConfig::default());
        assert_eq!(engine.snake().positions, vec![Position::new(320, 240)]);
        assert_ne!(engine.apple().position, engine.snake().head());
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = seeded(GameConfig::default());
        engine.apple_mut().position = Position::new(0, 0);

        let outcome = engine.tick();

        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(engine.snake().head(), Position::new(340, 240));
    }

    #[test]
    fn test_pending_direction_applied_on_tick() {
        let mut engine = seeded(GameConfig::default());
        engine.apple_mut().position = Position::new(0, 0);

        engine.set_pending_direction(Direction::Up);
        engine.tick();

        assert_eq!(engine.snake().direction, Direction::Up);
        assert_eq!(engine.snake().head(), Position::new(320, 220));
    }

    #[test]
    fn test_apple_consumption() {
        let mut engine = seeded(GameConfig::default());
        engine.apple_mut().position = Position::new(340, 240);

        let outcome = engine.tick();

        assert!(outcome.ate_apple);
        assert!(!outcome.collided);
        assert_eq!(engine.snake().length, 2);
        // Growth shows up on the following move
        assert_eq!(engine.snake().len(), 1);
        assert!(!engine.snake().occupied().contains(&engine.apple().position));

        engine.apple_mut().position = Position::new(0, 0);
        engine.tick();
        assert_eq!(engine.snake().len(), 2);
    }

    #[test]
    fn test_self_collision_reports_and_resets() {
        let mut engine = seeded(GameConfig::small());
        engine.apple_mut().position = Position::new(0, 0);
        {
            let snake = engine.snake_mut();
            snake.positions = vec![
                Position::new(20, 20),
                Position::new(30, 20),
                Position::new(30, 30),
                Position::new(20, 30),
            ];
            snake.length = 4;
            snake.direction = Direction::Left;
        }

        engine.set_pending_direction(Direction::Down);
        let outcome = engine.tick();

        assert!(outcome.collided);
        assert_eq!(engine.snake().positions, vec![engine.config().center()]);
        assert_eq!(engine.snake().length, 1);
    }

    #[test]
    fn test_positions_stay_on_torus() {
        let config = GameConfig::new(60, 40, 10);
        let mut engine = seeded(config.clone());
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..2_000 {
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            engine.set_pending_direction(direction);
            engine.tick();

            for p in &engine.snake().positions {
                assert!((0..config.screen_width).contains(&p.x));
                assert!((0..config.screen_height).contains(&p.y));
                assert_eq!(p.x % config.grid_size, 0);
                assert_eq!(p.y % config.grid_size, 0);
            }
            assert!(engine.snake().len() <= engine.snake().length);
            assert_eq!(engine.snake().occupied().len(), engine.snake().len());
            assert!(!engine.snake().occupied().contains(&engine.apple().position));
        }
    }
}
