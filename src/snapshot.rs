use serde::{Deserialize, Serialize};

use crate::config::{GLYPH_EMPTY, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GridSize};
use crate::game::{DeathReason, GameStatus};
use crate::input::Direction;
use crate::snake::Position;

/// Read-only copy of everything an outside observer may see.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Segments from head to tail.
    pub snake: Vec<Position>,
    pub length: usize,
    pub direction: Direction,
    pub food: Position,
    pub score: u32,
    pub game_over: bool,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    /// Steps taken since construction or the last reset.
    pub steps: u64,
    pub width: u16,
    pub height: u16,
}

impl Snapshot {
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    /// Draws the board as text, one newline-terminated line per row.
    ///
    /// Cells outside the grid (a debug food override, say) are skipped. The
    /// snake is drawn over the food.
    #[must_use]
    pub fn render_text(&self) -> String {
        let bounds = self.bounds();
        let width = usize::from(self.width);
        let mut rows = vec![vec![GLYPH_EMPTY; width]; usize::from(self.height)];

        let mut put = |position: Position, glyph: char| {
            if let Some((x, y)) = cell_index(bounds, position) {
                rows[y][x] = glyph;
            }
        };

        put(self.food, GLYPH_FOOD);
        for segment in self.snake.iter().skip(1) {
            put(*segment, GLYPH_SNAKE_BODY);
        }
        if let Some(head) = self.head() {
            put(head, GLYPH_SNAKE_HEAD);
        }

        let mut out = String::with_capacity((width + 1) * rows.len());
        for row in rows {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

fn cell_index(bounds: GridSize, position: Position) -> Option<(usize, usize)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    Some((
        usize::try_from(position.x).ok()?,
        usize::try_from(position.y).ok()?,
    ))
}
