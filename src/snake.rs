use std::collections::VecDeque;

use crate::config::Config;
use crate::maze;
use crate::Coords;
use Direction::*;
use MoveResult::*;

const INITIAL_SNAKE_LENGTH: usize = 3;
/// Row the snake starts on from level 4 on, clear of every maze pattern.
const CORNER_ROW: i16 = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left))
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }

    fn delta(self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    SelfCollision,
    Border,
    Maze,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { old_tail: Coords, ate_food: bool },
    Crashed(Crash),
}

impl MoveResult {
    pub fn is_alive(&self) -> bool {
        matches!(self, Moved { .. })
    }

    pub fn ate_food(&self) -> bool {
        matches!(self, Moved { ate_food: true, .. })
    }
}

/// The player's snake. `body[0]` is the head; the rest is the trail of cells
/// the head occupied on previous ticks.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
    max_length: usize,
}

impl Snake {
    /// A straight snake of `size` cells with its head at `pos`, body trailing
    /// away from `direction`.
    pub fn new(pos: Coords, size: usize, direction: Direction, max_length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let size = size.clamp(1, max_length.max(1));

        let body = (0..size as i16)
            .map(|i| (pos.0 - dx * i, pos.1 - dy * i))
            .collect();
        Snake { body, direction, max_length }
    }

    /// The snake a fresh session on `level` starts with: one cell longer per
    /// level past the first, facing right.
    pub fn for_level(config: &Config, level: u32) -> Self {
        let size = (INITIAL_SNAKE_LENGTH + level.saturating_sub(1) as usize).min(config.max_length);

        let head = if level >= 4 {
            // Central walls from level 4 on; start in the top-left corner with
            // the whole body on the board.
            ((size as i16).max(3), CORNER_ROW)
        } else {
            (config.width / 2, config.height / 2)
        };

        Snake::new(head, size, Right, config.max_length)
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn tail(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// Advance one cell. Every segment takes the place of the one ahead of it,
    /// then the new head is checked against the body, the border and the
    /// level's maze, in that order. Eating duplicates the last segment, so the
    /// tail stays put for one tick.
    pub fn move_step(&mut self, food: Option<Coords>, level: u32, config: &Config) -> MoveResult {
        let (dx, dy) = self.direction.delta();
        let old_head = self.head();
        let new_head = (old_head.0 + dx, old_head.1 + dy);

        let old_tail = match self.body.pop_back() {
            Some(tail) => tail,
            None => old_head,
        };
        self.body.push_front(new_head);

        if self.body.iter().skip(1).any(|&seg| seg == new_head) {
            return Crashed(Crash::SelfCollision);
        }

        if !maze::is_inside(config, new_head) {
            return Crashed(Crash::Border);
        }

        if maze::is_wall(config, level, new_head) {
            return Crashed(Crash::Maze);
        }

        let ate_food = food == Some(new_head);
        if ate_food && self.body.len() < self.max_length {
            let last = self.tail();
            self.body.push_back(last);
        }

        Moved { old_tail, ate_food }
    }

    /// Turning straight back onto the body is ignored.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if !new_direction.is_opposite(self.direction) {
            self.direction = new_direction;
        }
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
