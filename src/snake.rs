use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::{direction_change_is_valid, Direction};

/// Grid position in logical cell coordinates.
///
/// Serialized as a two-element `[x, y]` array.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.unit_vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (i32, i32) {
    fn from(position: Position) -> Self {
        (position.x, position.y)
    }
}

/// Snake body and direction state.
///
/// The body is never empty; every constructor seeds at least one segment.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self::with_length(start, direction, 1)
    }

    /// Creates a straight snake whose head is at `start`, with the remaining
    /// `length - 1` segments trailing behind it.
    #[must_use]
    pub fn with_length(start: Position, direction: Direction, length: u16) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(usize::from(length.max(1)));
        let mut segment = start;
        body.push_back(segment);
        for _ in 1..length {
            segment = segment.step(behind);
            body.push_back(segment);
        }

        Self {
            body,
            direction,
            pending_direction: direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: direction,
        }
    }

    /// Records the direction for the next step.
    ///
    /// Reversing straight into the neck is ignored; a one-cell snake has no
    /// neck and may reverse freely. Returns whether the request was kept.
    pub fn buffer_direction(&mut self, direction: Direction) -> bool {
        if self.body.len() > 1 && !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.pending_direction = direction;
        true
    }

    /// Makes the pending direction the active one.
    pub fn commit_direction(&mut self) -> Direction {
        self.direction = self.pending_direction;
        self.direction
    }

    /// Returns the head position one step along the active direction.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().step(self.direction)
    }

    /// Tail-exclusion collision test for a prospective head cell.
    ///
    /// The tail only counts when `grow` is set, since otherwise it leaves its
    /// cell in the same step.
    #[must_use]
    pub fn collides_with_body(&self, position: Position, grow: bool) -> bool {
        let considered = if grow {
            self.body.len()
        } else {
            self.body.len() - 1
        };

        self.body.iter().take(considered).any(|segment| *segment == position)
    }

    /// Pushes `next_head` and drops the tail unless growing.
    pub fn advance(&mut self, next_head: Position, grow: bool) {
        self.body.push_front(next_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    #[cfg(test)]
    pub(crate) fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
