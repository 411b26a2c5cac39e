use rand::Rng;
use std::collections::HashSet;

use super::action::Direction;
use super::config::{ConfigError, GameConfig};

/// A grid-aligned position on the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step one cell in a direction, wrapping around the screen edges
    pub fn wrapped_step(&self, direction: Direction, config: &GameConfig) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: (self.x + dx * config.grid_size).rem_euclid(config.screen_width),
            y: (self.y + dy * config.grid_size).rem_euclid(config.screen_height),
        }
    }

    /// Cell coordinates (column, row) of this position
    pub fn cell(&self, config: &GameConfig) -> (i32, i32) {
        (self.x / config.grid_size, self.y / config.grid_size)
    }
}

/// What happened to the snake during a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The head advanced one cell
    Moved,
    /// The head would have entered the body; the snake was reset instead
    Collided,
}

/// The player-controlled snake
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub positions: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Turn requested for the next tick
    pub next_direction: Option<Direction>,
    /// Number of segments the body is allowed to reach
    pub length: usize,
    config: GameConfig,
}

impl Snake {
    /// Create a snake in its reset state: one segment at the center heading right
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut snake = Self {
            positions: Vec::new(),
            direction: Direction::Right,
            next_direction: None,
            length: 1,
            config: config.clone(),
        };
        snake.reset();
        Ok(snake)
    }

    pub fn reset(&mut self) {
        self.positions.clear();
        self.positions.push(self.config.center());
        self.direction = Direction::Right;
        self.next_direction = None;
        self.length = 1;
    }

    /// Queue a turn unless it would reverse straight back into the body
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.next_direction = Some(direction);
        }
    }

    /// Apply the queued turn, if any
    pub fn update_direction(&mut self) {
        if let Some(direction) = self.next_direction.take() {
            self.direction = direction;
        }
    }

    /// Advance one cell in the current direction.
    ///
    /// The collision test runs against the body as it is before the move,
    /// tail included, so stepping into the cell the tail is about to leave
    /// also counts as a collision.
    pub fn move_snake(&mut self) -> MoveOutcome {
        let new_head = self.head().wrapped_step(self.direction, &self.config);

        if self.positions.contains(&new_head) {
            self.reset();
            return MoveOutcome::Collided;
        }

        self.positions.insert(0, new_head);
        if self.positions.len() > self.length {
            self.positions.pop();
        }

        MoveOutcome::Moved
    }

    /// Allow one more segment; the body catches up on the next move
    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.positions[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.positions[1..]
    }

    /// Every cell currently covered by the snake
    pub fn occupied(&self) -> HashSet<Position> {
        self.positions.iter().copied().collect()
    }

    /// Number of segments on the grid right now
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// The apple the snake is chasing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apple {
    pub position: Position,
}

impl Apple {
    /// Place a new apple on a random free cell
    pub fn new<R: Rng>(
        config: &GameConfig,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut apple = Self {
            position: config.center(),
        };
        apple.randomize_position(config, occupied, rng);
        Ok(apple)
    }

    /// Resample until the apple lands outside `occupied`.
    ///
    /// Never returns if `occupied` covers every cell of the grid.
    pub fn randomize_position<R: Rng>(
        &mut self,
        config: &GameConfig,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) {
        loop {
            let x = rng.gen_range(0..config.grid_width()) * config.grid_size;
            let y = rng.gen_range(0..config.grid_height()) * config.grid_size;
            let candidate = Position::new(x, y);

            if !occupied.contains(&candidate) {
                self.position = candidate;
                return;
            }
        }
    }
}
