use std::collections::{HashSet, VecDeque};

use super::error::EngineError;
use super::types::{Direction, FieldSize, Point};

pub const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    /// Builds the starting snake: head at the field centre, body trailing
    /// away from `direction`.
    pub fn initial(field_size: &FieldSize, direction: Direction) -> Result<Self, EngineError> {
        let trail = direction.opposite();
        let mut segments = Vec::with_capacity(INITIAL_SNAKE_LENGTH);
        let mut segment = field_size.center();
        segments.push(segment);

        for _ in 1..INITIAL_SNAKE_LENGTH {
            segment = segment.step(trail, field_size).ok_or_else(|| {
                EngineError::InvalidConfiguration(format!(
                    "{}x{} field is too small for a snake of length {} heading {:?}",
                    field_size.width, field_size.height, INITIAL_SNAKE_LENGTH, direction
                ))
            })?;
            segments.push(segment);
        }

        Self::from_segments(segments, field_size)
    }

    /// Head-first segments; all must be unique and inside the field.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Point>,
        field_size: &FieldSize,
    ) -> Result<Self, EngineError> {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();

        for segment in segments {
            if !field_size.contains(segment) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "segment ({}, {}) is outside the {}x{} field",
                    segment.x, segment.y, field_size.width, field_size.height
                )));
            }
            if !body_set.insert(segment) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "segment ({}, {}) appears more than once",
                    segment.x, segment.y
                )));
            }
            body.push_back(segment);
        }

        if body.is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "snake must have at least one segment".to_string(),
            ));
        }

        Ok(Self { body, body_set })
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Point> {
        self.body.iter()
    }

    pub(super) fn push_head(&mut self, head: Point) {
        self.body.push_front(head);
        self.body_set.insert(head);
    }

    pub(super) fn pop_tail(&mut self) {
        // Never shrink below one segment.
        if self.body.len() > 1
            && let Some(tail) = self.body.pop_back()
        {
            self.body_set.remove(&tail);
        }
    }
}
