use crate::error::SnakeError;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Validates caller-supplied dimensions.
    ///
    /// Both sides must be in `1..=MAX_GRID_DIMENSION`.
    pub fn try_new(width: i64, height: i64) -> Result<Self, SnakeError> {
        Ok(Self {
            width: checked_dimension("width", width)?,
            height: checked_dimension("height", height)?,
        })
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the cell the snake head starts on.
    #[must_use]
    pub fn start_cell(self) -> (i32, i32) {
        (i32::from(self.width / 2), i32::from(self.height / 2))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

fn checked_dimension(name: &str, value: i64) -> Result<u16, SnakeError> {
    if value <= 0 {
        return Err(SnakeError::InvalidConfig(format!(
            "{name} must be positive, got {value}"
        )));
    }

    u16::try_from(value)
        .ok()
        .filter(|value| *value <= MAX_GRID_DIMENSION)
        .ok_or_else(|| {
            SnakeError::InvalidConfig(format!(
                "{name} must be at most {MAX_GRID_DIMENSION}, got {value}"
            ))
        })
}

/// Settings fixed for the lifetime of one engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EngineConfig {
    pub grid: GridSize,
    pub initial_length: u16,
}

impl EngineConfig {
    /// Creates a config with the default initial length.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            initial_length: DEFAULT_INITIAL_LENGTH,
        }
    }

    /// Sets how many segments a fresh snake has.
    #[must_use]
    pub fn with_initial_length(mut self, initial_length: u16) -> Self {
        self.initial_length = initial_length;
        self
    }

    /// Checks that the starting snake fits to the left of the start cell.
    pub fn validate(self) -> Result<(), SnakeError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(SnakeError::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }

        if self.initial_length == 0 {
            return Err(SnakeError::InvalidConfig(
                "initial length must be at least 1".to_owned(),
            ));
        }

        let (start_x, _) = self.grid.start_cell();
        if i32::from(self.initial_length) > start_x + 1 {
            return Err(SnakeError::InvalidConfig(format!(
                "initial length {} does not fit a {}-wide grid",
                self.initial_length, self.grid.width
            )));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}

pub const DEFAULT_GRID_WIDTH: u16 = 20;

pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Largest accepted width or height.
pub const MAX_GRID_DIMENSION: u16 = 256;

pub const DEFAULT_INITIAL_LENGTH: u16 = 1;

/// Score granted per food eaten.
pub const POINTS_PER_FOOD: u32 = 1;

pub const GLYPH_SNAKE_HEAD: char = '@';

pub const GLYPH_SNAKE_BODY: char = 'O';

pub const GLYPH_FOOD: char = 'X';

pub const GLYPH_EMPTY: char = '.';
