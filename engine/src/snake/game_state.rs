use crate::SessionRng;
use super::settings::{EngineSettings, StartDirection};
use super::snake::Snake;
use super::types::{Direction, FieldSize, GameStatus, Point};

const MAX_FOOD_SAMPLING_ATTEMPTS: usize = 128;

#[derive(Clone, Debug)]
pub struct SnakeGameState {
    pub snake: Snake,
    pub direction: Direction,
    pub food: Option<Point>,
    pub score: u32,
    pub status: GameStatus,
    pub tick: u64,
    pub foods_eaten: u64,
}

impl SnakeGameState {
    /// Fresh game for already validated settings.
    pub fn initial(settings: &EngineSettings, rng: &mut SessionRng) -> Self {
        let field_size = settings.field_size();
        let direction = match settings.start_direction {
            StartDirection::Fixed(direction) => direction,
            StartDirection::Random => rng.choose(&Direction::ALL).copied().unwrap_or(Direction::Right),
        };
        let snake = Snake::initial(&field_size, direction)
            .expect("Initial snake should fit validated settings");
        let food = place_food(&field_size, &snake, rng);

        Self {
            snake,
            direction,
            food,
            score: 0,
            status: GameStatus::Running,
            tick: 0,
            foods_eaten: 0,
        }
    }
}

/// Picks a uniformly random free cell, or `None` when the snake covers the field.
///
/// Rejection sampling is tried first; after `MAX_FOOD_SAMPLING_ATTEMPTS`
/// misses the free cells are enumerated so placement always terminates.
pub fn place_food(field_size: &FieldSize, snake: &Snake, rng: &mut SessionRng) -> Option<Point> {
    if snake.len() >= field_size.cell_count() {
        return None;
    }

    for _ in 0..MAX_FOOD_SAMPLING_ATTEMPTS {
        let x = rng.random_range(0..field_size.width);
        let y = rng.random_range(0..field_size.height);
        let candidate = Point::new(x, y);
        if !snake.contains(&candidate) {
            return Some(candidate);
        }
    }

    let free_cells: Vec<Point> = field_size.cells().filter(|c| !snake.contains(c)).collect();
    rng.choose(&free_cells).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_running_with_zero_score() {
        let mut rng = SessionRng::new(42);
        let state = SnakeGameState::initial(&EngineSettings::default(), &mut rng);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick, 0);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_initial_food_is_free_cell() {
        let mut rng = SessionRng::new(42);
        for _ in 0..50 {
            let state = SnakeGameState::initial(&EngineSettings::with_field(4, 1), &mut rng);
            let food = state.food.unwrap();
            assert!(!state.snake.contains(&food));
            assert_eq!(food, Point::new(3, 0));
        }
    }

    #[test]
    fn test_place_food_never_on_snake() {
        let field = FieldSize::new(6, 6);
        let snake = Snake::from_segments(
            (0..6).map(|x| Point::new(x, 0)).chain((0..6).rev().map(|x| Point::new(x, 1))),
            &field,
        )
        .unwrap();
        let mut rng = SessionRng::new(42);
        for _ in 0..200 {
            let food = place_food(&field, &snake, &mut rng).unwrap();
            assert!(field.contains(food));
            assert!(!snake.contains(&food));
        }
    }

    #[test]
    fn test_place_food_finds_last_free_cell() {
        let field = FieldSize::new(5, 5);
        let segments: Vec<Point> = field.cells().filter(|c| *c != Point::new(4, 4)).collect();
        let snake = Snake::from_segments(segments, &field).unwrap();
        let mut rng = SessionRng::new(3);
        assert_eq!(place_food(&field, &snake, &mut rng), Some(Point::new(4, 4)));
    }

    #[test]
    fn test_place_food_on_full_field_is_none() {
        let field = FieldSize::new(2, 2);
        let snake = Snake::from_segments(
            [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1), Point::new(0, 1)],
            &field,
        )
        .unwrap();
        let mut rng = SessionRng::new(42);
        assert_eq!(place_food(&field, &snake, &mut rng), None);
    }

    #[test]
    fn test_random_start_direction_uses_rng() {
        let settings = EngineSettings {
            start_direction: StartDirection::Random,
            ..EngineSettings::with_field(10, 10)
        };
        let mut rng = SessionRng::new(9);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            seen.insert(SnakeGameState::initial(&settings, &mut rng).direction);
        }
        assert!(seen.len() > 1);
    }
}
