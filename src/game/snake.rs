use std::collections::VecDeque;

use super::direction::Direction;
use super::grid::{Grid, Position};

/// A snake on the grid, human or AI controlled
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    pub body: VecDeque<Position>,
    /// Direction used by the last move
    pub direction: Direction,
    /// Direction the next move will use
    pub next_direction: Direction,
    pub alive: bool,
    pub is_ai: bool,
    /// Segments still to be added, one per move
    pub grow_count: u32,
}

impl Snake {
    /// Create a snake whose body extends backward from `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize, is_ai: bool) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self {
            body,
            direction,
            next_direction: direction,
            alive: true,
            is_ai,
            grow_count: 0,
        }
    }

    /// Queue a turn for the next move. Reversals are dropped silently.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction.is_opposite(direction) {
            return;
        }
        self.next_direction = direction;
    }

    /// Move one cell, committing the queued direction
    pub fn advance(&mut self) {
        if !self.alive {
            return;
        }
        self.direction = self.next_direction;

        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);

        if self.grow_count > 0 {
            self.grow_count -= 1;
        } else {
            self.body.pop_back();
        }
    }

    /// Schedule `amount` extra segments, added one per subsequent move
    pub fn grow(&mut self, amount: u32) {
        self.grow_count += amount;
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a constructed snake)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn hits_wall(&self, grid: &Grid) -> bool {
        !grid.contains(self.head())
    }

    pub fn hits_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&seg| seg == head)
    }

    /// Head lands on any segment of `other`, its head included
    pub fn hits_other(&self, other: &Snake) -> bool {
        other.occupies(self.head())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(x: i32, y: i32, dir: Direction) -> Snake {
        Snake::new(Position::new(x, y), dir, 3, false)
    }

    #[test]
    fn test_snake_creation() {
        let snake = snake_at(5, 5, Direction::Right);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.body[2], Position::new(3, 5));
        assert!(snake.alive);
        assert_eq!(snake.next_direction, Direction::Right);
    }

    #[test]
    fn test_zero_length_still_has_head() {
        let snake = Snake::new(Position::new(1, 1), Direction::Up, 0, false);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_reverse_direction_is_ignored() {
        let mut snake = snake_at(5, 5, Direction::Right);
        snake.set_direction(Direction::Left);
        assert_eq!(snake.next_direction, Direction::Right);

        snake.set_direction(Direction::Up);
        assert_eq!(snake.next_direction, Direction::Up);
    }

    #[test]
    fn test_only_last_turn_per_tick_counts() {
        // Up then Left within one tick: reversal is judged against the
        // committed direction, so Left is rejected while still heading Right.
        let mut snake = snake_at(5, 5, Direction::Right);
        snake.set_direction(Direction::Up);
        snake.set_direction(Direction::Left);
        assert_eq!(snake.next_direction, Direction::Up);

        snake.advance();
        assert_eq!(snake.direction, Direction::Up);
        assert_eq!(snake.head(), Position::new(5, 4));
    }

    #[test]
    fn test_advance_keeps_length() {
        let mut snake = snake_at(5, 5, Direction::Right);
        snake.advance();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(*snake.body.back().unwrap(), Position::new(4, 5));
    }

    #[test]
    fn test_growth_is_gradual() {
        let mut snake = snake_at(5, 5, Direction::Right);
        snake.grow(3);
        assert_eq!(snake.len(), 3);

        for expected in 4..=6 {
            snake.advance();
            assert_eq!(snake.len(), expected);
        }
        snake.advance();
        assert_eq!(snake.len(), 6);
        assert_eq!(snake.grow_count, 0);
    }

    #[test]
    fn test_dead_snake_does_not_move() {
        let mut snake = snake_at(5, 5, Direction::Right);
        snake.alive = false;
        snake.advance();
        assert_eq!(snake.head(), Position::new(5, 5));
    }

    #[test]
    fn test_wall_collision() {
        let grid = Grid::new(10, 10);
        let mut snake = snake_at(9, 5, Direction::Right);
        assert!(!snake.hits_wall(&grid));
        snake.advance();
        assert!(snake.hits_wall(&grid));

        let mut snake = snake_at(3, 0, Direction::Right);
        snake.set_direction(Direction::Up);
        snake.advance();
        assert!(snake.hits_wall(&grid));
    }

    #[test]
    fn test_self_collision() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 5, false);
        assert!(!snake.hits_self());
        snake.set_direction(Direction::Down);
        snake.advance();
        snake.set_direction(Direction::Left);
        snake.advance();
        snake.set_direction(Direction::Up);
        snake.advance();
        assert_eq!(snake.head(), Position::new(4, 5));
        assert!(snake.hits_self());
    }

    #[test]
    fn test_collision_with_other_includes_head() {
        let a = snake_at(5, 5, Direction::Right);
        let b = snake_at(5, 7, Direction::Right);
        assert!(!a.hits_other(&b));

        let c = Snake::new(Position::new(5, 5), Direction::Left, 3, false);
        assert!(a.hits_other(&c));

        // Body (4,6) (4,5) (4,4); a head on its tail collides, not the reverse
        let d = Snake::new(Position::new(4, 6), Direction::Down, 3, false);
        let e = Snake::new(Position::new(4, 4), Direction::Right, 3, false);
        assert!(e.hits_other(&d));
        assert!(!d.hits_other(&e));
    }
}
