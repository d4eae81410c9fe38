use super::direction::Direction;
use rand::Rng;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Manhattan (taxicab) distance to another cell
    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Fixed-size playing field, cells `[0, cols) x [0, rows)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
}

impl Grid {
    /// Sizes beyond `i32::MAX` saturate; `GameConfig::validate` keeps real
    /// grids far below that
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: i32::try_from(cols).unwrap_or(i32::MAX),
            rows: i32::try_from(rows).unwrap_or(i32::MAX),
        }
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }

    pub fn center(&self) -> Position {
        Position::new(self.cols / 2, self.rows / 2)
    }

    /// Distance to the closest edge cell; 0 on the border.
    pub fn wall_distance(&self, pos: Position) -> i32 {
        pos.x
            .min(pos.y)
            .min(self.cols - 1 - pos.x)
            .min(self.rows - 1 - pos.y)
    }

    /// Uniformly sampled cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.gen_range(0..self.cols), rng.gen_range(0..self.rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
    }

    #[test]
    fn test_oversized_grid_saturates() {
        let grid = Grid::new(1usize << 31, 30);
        assert_eq!(grid.cols, i32::MAX);
        assert_eq!(grid.rows, 30);
        assert!(grid.cols > 0);
    }

    #[test]
    fn test_manhattan() {
        let a = Position::new(2, 3);
        assert_eq!(a.manhattan(Position::new(2, 3)), 0);
        assert_eq!(a.manhattan(Position::new(5, 1)), 5);
        assert_eq!(Position::new(5, 1).manhattan(a), 5);
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(30, 30);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(29, 29)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(30, 0)));
        assert!(!grid.contains(Position::new(0, 30)));
    }

    #[test]
    fn test_wall_distance() {
        let grid = Grid::new(30, 30);
        assert_eq!(grid.wall_distance(Position::new(0, 15)), 0);
        assert_eq!(grid.wall_distance(Position::new(29, 15)), 0);
        assert_eq!(grid.wall_distance(Position::new(3, 10)), 3);
        assert_eq!(grid.wall_distance(Position::new(15, 27)), 2);
        assert_eq!(grid.wall_distance(grid.center()), 14);
    }

    #[test]
    fn test_random_cell_in_bounds() {
        let grid = Grid::new(7, 4);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            assert!(grid.contains(grid.random_cell(&mut rng)));
        }
    }
}
