use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, GridSize, POINTS_PER_FOOD};
use crate::error::SnakeError;
use crate::food::spawn_position;
use crate::input::Direction;
use crate::snake::{Position, Snake};
use crate::snapshot::Snapshot;

/// Direction a fresh snake faces.
pub const DEFAULT_DIRECTION: Direction = Direction::Right;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    GameOver,
    /// The snake covers the whole board.
    Victory,
}

/// What ended a game by collision.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

/// Result of a single [`SnakeEngine::step`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    Moved,
    Ate,
    /// Ate the last food the board had room for.
    BoardFull,
    HitWall,
    HitSelf,
    /// The game had already ended; nothing changed.
    AlreadyOver,
}

impl StepOutcome {
    /// True when the snake moved without dying.
    #[must_use]
    pub fn success(self) -> bool {
        matches!(self, Self::Moved | Self::Ate | Self::BoardFull)
    }
}

/// Single-player Snake simulation advanced one step at a time.
#[derive(Debug, Clone)]
pub struct SnakeEngine {
    config: EngineConfig,
    snake: Snake,
    food: Position,
    score: u32,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    rng: StdRng,
}

impl SnakeEngine {
    /// Creates an engine whose food placement draws from OS entropy.
    pub fn new(config: EngineConfig) -> Result<Self, SnakeError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible simulations.
    pub fn new_with_seed(config: EngineConfig, seed: u64) -> Result<Self, SnakeError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, mut rng: StdRng) -> Result<Self, SnakeError> {
        config.validate()?;
        let snake = initial_snake(config);
        let food = spawn_position(&mut rng, config.grid, &snake)?;
        tracing::debug!(
            width = config.grid.width,
            height = config.grid.height,
            head = ?snake.head(),
            ?food,
            "engine initialized"
        );

        Ok(Self {
            config,
            snake,
            food,
            score: 0,
            status: GameStatus::Playing,
            death_reason: None,
            tick_count: 0,
            rng,
        })
    }

    /// Requests a direction for the next step; reversals into the body are
    /// silently ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.snake.buffer_direction(direction) {
            tracing::debug!(
                current = %self.snake.direction(),
                requested = %direction,
                "reversal ignored"
            );
        }
    }

    /// Advances the simulation by exactly one tick.
    pub fn step(&mut self) -> StepOutcome {
        if self.is_game_over() {
            return StepOutcome::AlreadyOver;
        }

        self.tick_count += 1;
        self.snake.commit_direction();
        let next_head = self.snake.next_head_position();

        if !next_head.is_within_bounds(self.config.grid) {
            tracing::debug!(?next_head, "wall collision");
            self.end_game(DeathReason::Wall);
            return StepOutcome::HitWall;
        }

        let grow = next_head == self.food;
        if self.snake.collides_with_body(next_head, grow) {
            tracing::debug!(?next_head, "self collision");
            self.end_game(DeathReason::SelfCollision);
            return StepOutcome::HitSelf;
        }

        self.snake.advance(next_head, grow);
        if !grow {
            return StepOutcome::Moved;
        }

        self.score += POINTS_PER_FOOD;
        match spawn_position(&mut self.rng, self.config.grid, &self.snake) {
            Ok(food) => {
                tracing::debug!(?food, score = self.score, "food eaten");
                self.food = food;
                StepOutcome::Ate
            }
            Err(error) => {
                tracing::debug!(%error, score = self.score, "board full");
                self.status = GameStatus::Victory;
                StepOutcome::BoardFull
            }
        }
    }

    /// Restores the construction-time state with freshly placed food.
    pub fn reset(&mut self) -> Result<(), SnakeError> {
        let snake = initial_snake(self.config);
        self.food = spawn_position(&mut self.rng, self.config.grid, &snake)?;
        self.snake = snake;
        self.score = 0;
        self.status = GameStatus::Playing;
        self.death_reason = None;
        self.tick_count = 0;
        Ok(())
    }

    /// Debug override: moves food to `(x, y)` without any validation.
    pub fn set_food_position(&mut self, x: i32, y: i32) {
        self.food = Position { x, y };
    }

    /// Copies the observable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            length: self.snake.len(),
            direction: self.snake.direction(),
            food: self.food,
            score: self.score,
            game_over: self.is_game_over(),
            status: self.status,
            death_reason: self.death_reason,
            steps: self.tick_count,
            width: self.config.grid.width,
            height: self.config.grid.height,
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.food
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    fn end_game(&mut self, reason: DeathReason) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
    }

    #[cfg(test)]
    pub(crate) fn replace_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }
}

fn initial_snake(config: EngineConfig) -> Snake {
    let (x, y) = config.grid.start_cell();
    Snake::with_length(Position { x, y }, DEFAULT_DIRECTION, config.initial_length)
}
