use std::collections::HashSet;
use std::fmt;

use snake_engine::{GameStatus, Point, SnakeSnapshot};

const HEAD: char = '#';
const BODY: char = 'o';
const FOOD: char = '*';
const EMPTY: char = '.';

/// Plain-text rendering of a snapshot for terminals and logs.
pub struct BoardView<'a>(pub &'a SnakeSnapshot);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let head = snapshot.head();
        let body: HashSet<Point> = snapshot.snake.iter().copied().collect();

        for y in 0..snapshot.field_size.height {
            for x in 0..snapshot.field_size.width {
                let cell = Point::new(x, y);
                let c = if head == Some(cell) {
                    HEAD
                } else if body.contains(&cell) {
                    BODY
                } else if snapshot.food == Some(cell) {
                    FOOD
                } else {
                    EMPTY
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }

        match snapshot.status {
            GameStatus::Running => write!(f, "tick {} | score {}", snapshot.tick, snapshot.score),
            GameStatus::Over(reason) => write!(
                f,
                "tick {} | score {} | over: {:?}",
                snapshot.tick, snapshot.score, reason
            ),
        }
    }
}
