//! Heuristic opponent
//!
//! Each tick the AI looks one cell ahead in every direction except straight
//! back, throws away moves that crash immediately, and scores the rest:
//!
//! ```text
//! score = -food_distance * dist_to_nearest_food
//!         + wall_distance * dist_to_nearest_wall
//!         + open_space * free_cells_in_neighbourhood
//!         + uniform(0, jitter)
//! ```
//!
//! The neighbourhood is a square of side `2 * open_space_radius + 1`
//! around the candidate cell, counting in-bounds cells the AI's own body
//! does not cover.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::food::Food;
use super::grid::{Grid, Position};
use super::snake::Snake;

/// Coefficients of the AI move score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiWeights {
    /// Penalty per cell of Manhattan distance to the nearest food
    pub food_distance: f64,
    /// Reward per cell of distance to the nearest wall
    pub wall_distance: f64,
    /// Reward per free cell around the candidate
    pub open_space: f64,
    /// Half-width of the open-space square (2 gives 5x5)
    pub open_space_radius: i32,
    /// Upper bound of the random tie-breaker
    pub jitter: f64,
}

impl Default for AiWeights {
    fn default() -> Self {
        Self {
            food_distance: 1.0,
            wall_distance: 0.5,
            open_space: 0.3,
            open_space_radius: 2,
            jitter: 2.0,
        }
    }
}

impl AiWeights {
    pub fn validate(&self) -> Result<(), String> {
        if self.open_space_radius < 0 {
            return Err(format!(
                "ai.open_space_radius must be non-negative, got {}",
                self.open_space_radius
            ));
        }

        if self.jitter < 0.0 {
            return Err(format!("ai.jitter must be non-negative, got {}", self.jitter));
        }

        Ok(())
    }
}

/// Pick a direction for `snake`, or `None` when every move crashes.
pub fn decide<R: Rng + ?Sized>(
    snake: &Snake,
    opponent: Option<&Snake>,
    foods: &[Food],
    grid: &Grid,
    weights: &AiWeights,
    rng: &mut R,
) -> Option<Direction> {
    let mut best: Option<(Direction, f64)> = None;

    for direction in Direction::ALL {
        if direction.is_opposite(snake.direction) {
            continue;
        }

        let target = snake.head().moved_in_direction(direction);
        let Some(mut score) = score_cell(target, snake, opponent, foods, grid, weights) else {
            continue;
        };

        if weights.jitter > 0.0 {
            score += rng.gen_range(0.0..weights.jitter);
        }

        // Strict comparison: the earliest direction wins ties
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((direction, score));
        }
    }

    best.map(|(direction, _)| direction)
}

/// Deterministic part of the move score; `None` if `target` is a crash.
pub fn score_cell(
    target: Position,
    snake: &Snake,
    opponent: Option<&Snake>,
    foods: &[Food],
    grid: &Grid,
    weights: &AiWeights,
) -> Option<f64> {
    if !grid.contains(target) || snake.occupies(target) {
        return None;
    }
    if opponent.is_some_and(|other| other.occupies(target)) {
        return None;
    }

    let mut score = 0.0;

    // With nothing to eat the food term is left out, so the AI still
    // steers by walls and space instead of holding its heading
    if let Some(nearest) = foods.iter().map(|food| food.position.manhattan(target)).min() {
        score -= weights.food_distance * nearest as f64;
    }

    score += weights.wall_distance * grid.wall_distance(target) as f64;
    score += weights.open_space * open_cells_around(target, snake, grid, weights.open_space_radius) as f64;

    Some(score)
}

/// In-bounds cells within `radius` (Chebyshev) of `center` not covered by `snake`
pub fn open_cells_around(center: Position, snake: &Snake, grid: &Grid, radius: i32) -> usize {
    (-radius..=radius)
        .flat_map(|dx| (-radius..=radius).map(move |dy| center.moved_by(dx, dy)))
        .filter(|&cell| grid.contains(cell) && !snake.occupies(cell))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::food::FoodKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn no_jitter() -> AiWeights {
        AiWeights {
            jitter: 0.0,
            ..Default::default()
        }
    }

    fn food_at(x: i32, y: i32) -> Food {
        Food::new(Position::new(x, y), FoodKind::Normal)
    }

    #[test]
    fn test_open_cells_in_open_field() {
        let grid = Grid::new(30, 30);
        let snake = Snake::new(Position::new(20, 20), Direction::Right, 3, true);
        assert_eq!(open_cells_around(Position::new(10, 10), &snake, &grid, 2), 25);
    }

    #[test]
    fn test_open_cells_clipped_by_walls_and_body() {
        let grid = Grid::new(30, 30);
        // Corner: only the 3x3 in-bounds quarter remains
        let far = Snake::new(Position::new(20, 20), Direction::Right, 3, true);
        assert_eq!(open_cells_around(Position::new(0, 0), &far, &grid, 2), 9);

        // Body (10,10) (9,10) (8,10) all inside the square around (10,11)
        let near = Snake::new(Position::new(10, 10), Direction::Right, 3, true);
        assert_eq!(open_cells_around(Position::new(10, 11), &near, &grid, 2), 22);
    }

    #[test]
    fn test_crash_cells_are_rejected() {
        let grid = Grid::new(30, 30);
        let snake = Snake::new(Position::new(0, 5), Direction::Up, 3, true);
        let weights = no_jitter();

        assert!(score_cell(Position::new(-1, 5), &snake, None, &[], &grid, &weights).is_none());
        assert!(score_cell(Position::new(0, 6), &snake, None, &[], &grid, &weights).is_none());

        let other = Snake::new(Position::new(1, 5), Direction::Down, 3, false);
        assert!(
            score_cell(Position::new(1, 5), &snake, Some(&other), &[], &grid, &weights).is_none()
        );
        assert!(score_cell(Position::new(1, 5), &snake, None, &[], &grid, &weights).is_some());
    }

    #[test]
    fn test_score_terms() {
        let grid = Grid::new(30, 30);
        let snake = Snake::new(Position::new(20, 20), Direction::Right, 3, true);
        let foods = vec![food_at(10, 14), food_at(2, 2)];

        // food 4 away, wall 10 away, 25 open cells
        let score = score_cell(Position::new(10, 10), &snake, None, &foods, &grid, &no_jitter());
        let expected = -4.0 + 0.5 * 10.0 + 0.3 * 25.0;
        assert!((score.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_moves_toward_food() {
        let grid = Grid::new(30, 30);
        let snake = Snake::new(Position::new(15, 15), Direction::Right, 3, true);
        let foods = vec![food_at(15, 8)];
        let mut rng = StdRng::seed_from_u64(0);

        let choice = decide(&snake, None, &foods, &grid, &no_jitter(), &mut rng);
        assert_eq!(choice, Some(Direction::Up));
    }

    #[test]
    fn test_never_reverses() {
        let grid = Grid::new(30, 30);
        // Food directly behind the head
        let snake = Snake::new(Position::new(15, 15), Direction::Right, 1, true);
        let foods = vec![food_at(10, 15)];
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..20 {
            let choice = decide(&snake, None, &foods, &grid, &AiWeights::default(), &mut rng);
            assert_ne!(choice, Some(Direction::Left));
        }
    }

    #[test]
    fn test_avoids_wall() {
        let grid = Grid::new(30, 30);
        let snake = Snake::new(Position::new(29, 10), Direction::Right, 3, true);
        let foods = vec![food_at(29, 20)];
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..20 {
            let choice = decide(&snake, None, &foods, &grid, &AiWeights::default(), &mut rng);
            assert!(matches!(choice, Some(Direction::Up) | Some(Direction::Down)));
        }
    }

    #[test]
    fn test_steers_without_food() {
        // Head (1,15) heading Up next to the left wall; with nothing to eat
        // the widest, most central cell wins: Right scores 1.0 + 0.3*22,
        // Up scores 0.5 + 0.3*18, Left sits on the wall
        let grid = Grid::new(30, 30);
        let snake = Snake::new(Position::new(1, 15), Direction::Up, 3, true);
        let mut rng = StdRng::seed_from_u64(0);

        let choice = decide(&snake, None, &[], &grid, &no_jitter(), &mut rng);
        assert_eq!(choice, Some(Direction::Right));
    }

    #[test]
    fn test_trapped_returns_none() {
        let grid = Grid::new(30, 30);
        // Heading Up in the top-left corner with its own body to the right
        let mut snake = Snake::new(Position::new(0, 0), Direction::Up, 1, true);
        snake.body.push_back(Position::new(0, 1));
        snake.body.push_back(Position::new(1, 1));
        snake.body.push_back(Position::new(1, 0));
        let mut rng = StdRng::seed_from_u64(0);

        let choice = decide(&snake, None, &[food_at(5, 5)], &grid, &AiWeights::default(), &mut rng);
        assert_eq!(choice, None);
    }

    #[test]
    fn test_invalid_weights() {
        let weights = AiWeights {
            open_space_radius: -1,
            ..Default::default()
        };
        assert!(weights.validate().is_err());
        assert!(AiWeights::default().validate().is_ok());
    }
}
