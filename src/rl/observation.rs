use crate::game::GameState;

/// Cell value for an empty cell
pub const EMPTY: u8 = 0;
/// Cell value for any snake segment
pub const SNAKE: u8 = 1;
/// Cell value for the food
pub const FOOD: u8 = 2;

/// Flatten the board into one value per cell.
///
/// Row-major (`index = y * width + x`), length `width * height`. Food is
/// written first and snake cells after, so a snake cell is never reported as
/// food.
pub fn create_observation(state: &GameState) -> Vec<u8> {
    let width = state.grid_width;
    let mut grid = vec![EMPTY; width * state.grid_height];

    if let Some(idx) = cell_index(state, state.food.x, state.food.y) {
        grid[idx] = FOOD;
    }

    for pos in &state.snake.body {
        if let Some(idx) = cell_index(state, pos.x, pos.y) {
            grid[idx] = SNAKE;
        }
    }

    grid
}

/// Observation as floats, for learners that want `f32` input
pub fn observation_as_f32(observation: &[u8]) -> Vec<f32> {
    observation.iter().map(|&v| f32::from(v)).collect()
}

fn cell_index(state: &GameState, x: i32, y: i32) -> Option<usize> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;
    (x < state.grid_width && y < state.grid_height).then(|| y * state.grid_width + x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameState, Position, Snake};

    #[test]
    fn test_observation_shape() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let state = GameState::new(snake, Position::new(10, 10), 20, 15);

        assert_eq!(create_observation(&state).len(), 20 * 15);
    }

    #[test]
    fn test_cell_encoding() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let state = GameState::new(snake, Position::new(7, 2), 10, 10);

        let obs = create_observation(&state);

        assert_eq!(obs[5 * 10 + 5], SNAKE);
        assert_eq!(obs[5 * 10 + 4], SNAKE);
        assert_eq!(obs[5 * 10 + 3], SNAKE);
        assert_eq!(obs[2 * 10 + 7], FOOD);
        assert_eq!(obs.iter().filter(|&&v| v == SNAKE).count(), 3);
        assert_eq!(obs.iter().filter(|&&v| v == FOOD).count(), 1);
        assert_eq!(obs.iter().filter(|&&v| v == EMPTY).count(), 96);
    }

    #[test]
    fn test_row_major_on_non_square_board() {
        let snake = Snake::new(Position::new(3, 0), Direction::Right, 2);
        let state = GameState::new(snake, Position::new(0, 1), 6, 2);

        let obs = create_observation(&state);

        assert_eq!(obs, vec![0, 0, 1, 1, 0, 0, 2, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_snake_overwrites_stale_food_mark() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let state = GameState::new(snake, Position::new(4, 5), 10, 10);

        let obs = create_observation(&state);

        assert_eq!(obs[5 * 10 + 4], SNAKE);
        assert!(!obs.contains(&FOOD));
    }

    #[test]
    fn test_f32_conversion() {
        assert_eq!(observation_as_f32(&[0, 1, 2]), vec![0.0, 1.0, 2.0]);
    }
}
