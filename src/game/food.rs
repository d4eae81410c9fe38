use log::warn;
use rand::Rng;
use std::collections::HashSet;
use std::time::Instant;

use super::config::GameConfig;
use super::grid::{Grid, Position};
use super::snake::Snake;

/// Food variants; value and growth follow from the variant alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Normal,
    Super,
    Speed,
}

impl FoodKind {
    /// Points awarded to the eater
    pub fn value(&self) -> u32 {
        match self {
            FoodKind::Super => 3,
            FoodKind::Normal | FoodKind::Speed => 1,
        }
    }

    /// Segments the eater grows by
    pub fn grow_amount(&self) -> u32 {
        match self {
            FoodKind::Super => 3,
            FoodKind::Normal | FoodKind::Speed => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
    /// Only drives the pulse animation
    pub spawned_at: Instant,
}

impl Food {
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self {
            position,
            kind,
            spawned_at: Instant::now(),
        }
    }

    pub fn value(&self) -> u32 {
        self.kind.value()
    }

    pub fn grow_amount(&self) -> u32 {
        self.kind.grow_amount()
    }
}

/// Places new food on free cells
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    grid: Grid,
    attempts: u32,
    super_threshold: f64,
    speed_threshold: f64,
}

impl FoodSpawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            grid: Grid::new(config.grid_width, config.grid_height),
            attempts: config.spawn_attempts,
            super_threshold: config.super_food_threshold,
            speed_threshold: config.speed_food_threshold,
        }
    }

    /// Random cell free of snakes and food.
    ///
    /// Gives up after the configured number of attempts and returns the grid
    /// center, even if that cell is taken.
    pub fn pick_empty_cell<R: Rng + ?Sized>(
        &self,
        snakes: &[Snake],
        foods: &[Food],
        rng: &mut R,
    ) -> Position {
        let occupied: HashSet<Position> = snakes
            .iter()
            .flat_map(|snake| snake.body.iter().copied())
            .chain(foods.iter().map(|food| food.position))
            .collect();

        for _ in 0..self.attempts {
            let pos = self.grid.random_cell(rng);
            if !occupied.contains(&pos) {
                return pos;
            }
        }

        warn!(
            "no free cell found after {} attempts, placing food at grid center",
            self.attempts
        );
        self.grid.center()
    }

    /// Map a uniform draw in [0, 1) to a variant
    pub fn kind_for_roll(&self, roll: f64) -> FoodKind {
        if roll > self.super_threshold {
            FoodKind::Super
        } else if roll > self.speed_threshold {
            FoodKind::Speed
        } else {
            FoodKind::Normal
        }
    }

    pub fn spawn<R: Rng + ?Sized>(&self, snakes: &[Snake], foods: &[Food], rng: &mut R) -> Food {
        let position = self.pick_empty_cell(snakes, foods, rng);
        let kind = self.kind_for_roll(rng.gen_range(0.0..1.0));
        Food::new(position, kind)
    }
}
