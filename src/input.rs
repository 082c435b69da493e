use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SnakeError;

/// Canonical movement directions, declared in wire-code order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(dx, dy)` unit step. `y` grows downwards.
    #[must_use]
    pub fn unit_vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Numeric code: Up=0, Right=1, Down=2, Left=3.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// Inverse of [`Direction::code`].
    pub fn from_code(code: u8) -> Result<Self, SnakeError> {
        match code {
            0 => Ok(Self::Up),
            1 => Ok(Self::Right),
            2 => Ok(Self::Down),
            3 => Ok(Self::Left),
            other => Err(SnakeError::InvalidDirection(other.to_string())),
        }
    }

    /// Lowercase wire token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        }
    }
}

impl FromStr for Direction {
    type Err = SnakeError;

    /// Parses `up`, `right`, `down` or `left`, ignoring case and surrounding
    /// whitespace.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "right" => Ok(Self::Right),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            _ => Err(SnakeError::InvalidDirection(token.to_owned())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

#[cfg(test)]
mod tests {
    use super::{direction_change_is_valid, Direction};
    use crate::error::SnakeError;

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reversals_are_invalid() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn codes_follow_declaration_order() {
        let codes: Vec<u8> = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ]
        .into_iter()
        .map(Direction::code)
        .collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);

        assert_eq!(Direction::from_code(2), Ok(Direction::Down));
        assert_eq!(
            Direction::from_code(4),
            Err(SnakeError::InvalidDirection("4".to_owned()))
        );
    }

    #[test]
    fn tokens_parse_case_insensitively() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("LEFT".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" Down\n".parse::<Direction>(), Ok(Direction::Down));
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(SnakeError::InvalidDirection(_))
        ));
    }

    #[test]
    fn serializes_as_lowercase_token() {
        let json = serde_json::to_string(&Direction::Right).expect("serializes");
        assert_eq!(json, "\"right\"");
    }
}
