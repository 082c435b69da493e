use rand::Rng;

use crate::config::GridSize;
use crate::error::SnakeError;
use crate::snake::{Position, Snake};

/// Picks a cell uniformly among those not covered by the snake.
///
/// Returns [`SnakeError::GridFull`] when the snake covers every cell.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Result<Position, SnakeError> {
    let candidates = free_cells(bounds, snake);

    if candidates.is_empty() {
        return Err(SnakeError::GridFull {
            width: bounds.width,
            height: bounds.height,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

/// Lists unoccupied cells in row-major order.
///
/// Runs in one pass over the grid plus one over the body.
#[must_use]
pub fn free_cells(bounds: GridSize, snake: &Snake) -> Vec<Position> {
    let width = usize::from(bounds.width);
    let mut occupied = vec![false; bounds.total_cells()];

    for segment in snake.segments() {
        if segment.is_within_bounds(bounds) {
            // In bounds, so both coordinates are non-negative and fit a u16.
            let (x, y) = (segment.x as usize, segment.y as usize);
            occupied[y * width + x] = true;
        }
    }

    occupied
        .iter()
        .enumerate()
        .filter(|&(_, &taken)| !taken)
        .map(|(index, _)| Position {
            x: (index % width) as i32,
            y: (index / width) as i32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;
    use crate::error::SnakeError;
    use crate::input::Direction;

    use super::{free_cells, spawn_position};
    use crate::snake::{Position, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = GridSize {
            width: 8,
            height: 6,
        };
        let snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 0, y: 0 },
            ],
            Direction::Right,
        );

        for _ in 0..100 {
            let food = spawn_position(&mut rng, bounds, &snake).expect("board has room");
            assert!(!snake.occupies(food));
            assert!(food.is_within_bounds(bounds));
        }
    }

    #[test]
    fn only_free_cell_is_always_chosen() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = GridSize {
            width: 2,
            height: 2,
        };
        let snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 1, y: 1 },
            ],
            Direction::Down,
        );

        for _ in 0..10 {
            assert_eq!(
                spawn_position(&mut rng, bounds, &snake),
                Ok(Position { x: 0, y: 1 })
            );
        }
    }

    #[test]
    fn full_board_reports_grid_full() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = GridSize {
            width: 1,
            height: 1,
        };
        let snake = Snake::new(Position { x: 0, y: 0 }, Direction::Right);

        assert_eq!(
            spawn_position(&mut rng, bounds, &snake),
            Err(SnakeError::GridFull {
                width: 1,
                height: 1
            })
        );
    }

    #[test]
    fn spawn_reaches_every_free_cell() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = GridSize {
            width: 3,
            height: 3,
        };
        let snake = Snake::new(Position { x: 1, y: 1 }, Direction::Right);

        let seen: HashSet<Position> = (0..500)
            .map(|_| spawn_position(&mut rng, bounds, &snake).expect("board has room"))
            .collect();

        assert_eq!(seen.len(), free_cells(bounds, &snake).len());
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn long_snake_on_largest_board() {
        let bounds = GridSize {
            width: 256,
            height: 256,
        };
        // Serpentine over the top half: row 0 left to right, row 1 back, ...
        let segments: Vec<Position> = (0..128)
            .flat_map(|y| {
                (0..256).map(move |i| {
                    let x = if y % 2 == 0 { i } else { 255 - i };
                    Position { x, y }
                })
            })
            .rev()
            .collect();
        let snake = Snake::from_segments(segments, Direction::Down);
        assert_eq!(snake.len(), 32_768);

        let free = free_cells(bounds, &snake);
        assert_eq!(free.len(), bounds.total_cells() - snake.len());
        assert_eq!(free[0], Position { x: 0, y: 128 });
        assert!(free.iter().all(|cell| cell.y >= 128));

        let mut rng = StdRng::seed_from_u64(19);
        for _ in 0..20 {
            let food = spawn_position(&mut rng, bounds, &snake).expect("board has room");
            assert!(!snake.occupies(food));
        }
    }
}
