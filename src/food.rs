use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::Config;
use crate::maze;
use crate::snake::Snake;
use crate::Coords;

/// Random draws before falling back to scanning the whole grid.
const SPAWN_ATTEMPTS: usize = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub pos: Coords,
    pub is_bonus: bool,
}

impl Food {
    pub fn symbol(&self) -> char {
        if self.is_bonus { '$' } else { '*' }
    }
}

/// Places food on a free cell: not a wall on the current level and not under
/// the snake.
pub struct FoodSpawner {
    rng: StdRng,
    planned: VecDeque<Coords>,
}

impl FoodSpawner {
    pub fn new() -> Self {
        FoodSpawner { rng: StdRng::from_entropy(), planned: VecDeque::new() }
    }

    pub fn with_seed(seed: u64) -> Self {
        FoodSpawner { rng: StdRng::seed_from_u64(seed), planned: VecDeque::new() }
    }

    /// Cells to use, in order, before drawing at random. A planned cell that
    /// is not free when its turn comes is skipped.
    pub fn with_plan<I: IntoIterator<Item = Coords>>(mut self, cells: I) -> Self {
        self.planned.extend(cells);
        self
    }

    /// `fruits_eaten` is the number eaten so far this level; the item after
    /// every `bonus_every`-th one is a bonus. Returns `None` only when no free
    /// cell is left on the board.
    pub fn spawn(&mut self, config: &Config, level: u32, snake: &Snake, fruits_eaten: u32) -> Option<Food> {
        let is_free = |pos: Coords| !maze::is_wall(config, level, pos) && !snake.occupies(pos);
        let is_bonus = (fruits_eaten + 1) % config.bonus_every == 0;

        while let Some(pos) = self.planned.pop_front() {
            if is_free(pos) {
                debug!(?pos, is_bonus, "food placed from plan");
                return Some(Food { pos, is_bonus });
            }
            debug!(?pos, "planned food cell taken, skipping");
        }

        for _ in 0..SPAWN_ATTEMPTS {
            let pos = (
                self.rng.gen_range(1..config.width - 1),
                self.rng.gen_range(1..config.height - 1),
            );
            if is_free(pos) {
                debug!(?pos, is_bonus, "food spawned");
                return Some(Food { pos, is_bonus });
            }
        }

        let choices: Vec<Coords> = maze::open_cells(config, level).filter(|&pos| is_free(pos)).collect();
        let res = choices.choose(&mut self.rng).copied();
        match res {
            Some(pos) => debug!(?pos, is_bonus, free = choices.len(), "food spawned by scan"),
            None => debug!("no free cell left for food"),
        }

        res.map(|pos| Food { pos, is_bonus })
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        FoodSpawner::new()
    }
}
