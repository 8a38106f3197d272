use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::SessionRng;
use super::snapshot::SnakeSnapshot;
use super::types::{Direction, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotType {
    /// Greedy walk towards the food.
    Efficient,
    Random,
}

/// Picks the next direction for an autopilot-driven snake.
pub struct BotController;

impl BotController {
    pub fn calculate_move(
        bot_type: BotType,
        snapshot: &SnakeSnapshot,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        if snapshot.is_game_over() {
            return None;
        }
        let head = snapshot.head()?;
        let body: HashSet<Point> = snapshot.snake.iter().copied().collect();
        let safe_directions = Self::safe_directions(snapshot, head, &body);

        match bot_type {
            BotType::Efficient => Self::efficient_pathfinding(snapshot, head, &safe_directions)
                .or_else(|| Self::random_valid_move(snapshot, &safe_directions, rng)),
            BotType::Random => Self::random_valid_move(snapshot, &safe_directions, rng),
        }
    }

    fn efficient_pathfinding(
        snapshot: &SnakeSnapshot,
        head: Point,
        safe_directions: &[Direction],
    ) -> Option<Direction> {
        let food = snapshot.food?;

        safe_directions
            .iter()
            .filter_map(|&dir| {
                head.step(dir, &snapshot.field_size)
                    .map(|next| (dir, next.manhattan_distance(food)))
            })
            .min_by_key(|(_, distance)| *distance)
            .map(|(dir, _)| dir)
    }

    fn random_valid_move(
        snapshot: &SnakeSnapshot,
        safe_directions: &[Direction],
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        match rng.choose(safe_directions) {
            Some(direction) => Some(*direction),
            None => Some(snapshot.direction),
        }
    }

    fn safe_directions(snapshot: &SnakeSnapshot, head: Point, body: &HashSet<Point>) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&snapshot.direction))
            .filter(|&d| {
                head.step(d, &snapshot.field_size)
                    .is_some_and(|next| !body.contains(&next))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::{EngineSettings, SnakeEngine};

    fn engine_with(body: &[Point], direction: Direction, food: Point) -> SnakeEngine {
        SnakeEngine::from_parts(
            EngineSettings::with_field(10, 10),
            body.iter().copied(),
            direction,
            food,
            SessionRng::new(42),
        )
        .unwrap()
    }

    #[test]
    fn test_efficient_heads_towards_food() {
        let engine = engine_with(&[Point::new(5, 5), Point::new(4, 5)], Direction::Right, Point::new(5, 1));
        let mut rng = SessionRng::new(1);
        assert_eq!(
            BotController::calculate_move(BotType::Efficient, &engine.snapshot(), &mut rng),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_never_suggests_reverse_or_wall() {
        let engine = engine_with(&[Point::new(0, 0), Point::new(1, 0)], Direction::Left, Point::new(9, 9));
        let snapshot = engine.snapshot();
        let mut rng = SessionRng::new(1);
        for _ in 0..50 {
            let dir = BotController::calculate_move(BotType::Random, &snapshot, &mut rng);
            assert_eq!(dir, Some(Direction::Down));
        }
    }

    #[test]
    fn test_trapped_snake_keeps_direction() {
        // Head in the corner, walled in by its own body.
        let body = [Point::new(0, 0), Point::new(0, 1), Point::new(1, 1), Point::new(1, 0), Point::new(2, 0)];
        let engine = engine_with(&body, Direction::Up, Point::new(9, 9));
        let mut rng = SessionRng::new(1);
        assert_eq!(
            BotController::calculate_move(BotType::Efficient, &engine.snapshot(), &mut rng),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_no_move_after_game_over() {
        let mut engine = engine_with(&[Point::new(0, 0)], Direction::Left, Point::new(9, 9));
        engine.advance();
        let mut rng = SessionRng::new(1);
        assert_eq!(BotController::calculate_move(BotType::Random, &engine.snapshot(), &mut rng), None);
    }

    #[test]
    fn test_efficient_bot_scores_on_open_field() {
        let mut engine = SnakeEngine::new(EngineSettings::with_field(12, 12), SessionRng::new(42)).unwrap();
        let mut rng = SessionRng::new(43);
        for _ in 0..200 {
            if engine.is_game_over() {
                break;
            }
            if let Some(direction) = BotController::calculate_move(BotType::Efficient, &engine.snapshot(), &mut rng) {
                engine.set_direction(direction);
            }
            engine.advance();
        }
        assert!(engine.score() > 0);
    }
}
