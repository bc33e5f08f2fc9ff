//! What the game needs from the outside world. The terminal implementation
//! lives in `term`, the file-backed store in `store`.

use std::time::Duration;

use anyhow::Result;

use crate::snake::Direction;
use crate::Coords;

/// A key press, already normalized. Anything else is dropped by the adapter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Quit,
}

/// Semantic colours; the adapter decides what they look like.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Paint {
    /// Walls change colour with the level.
    Wall(u32),
    SnakeHead,
    SnakeBody,
    DeadSnake,
    Food,
    BonusFood,
    Status,
    Good,
    Bad,
    Default,
}

pub trait Keys {
    /// Next pending key, if any. Never blocks.
    fn poll_key(&mut self) -> Result<Option<Command>>;
}

pub trait Screen {
    /// Draw one grid cell.
    fn put(&mut self, pos: Coords, ch: char, paint: Paint) -> Result<()>;

    /// Write a line of the side panel, right of the grid.
    fn panel_line(&mut self, row: u16, text: &str) -> Result<()>;

    /// Write the line under the grid.
    fn banner(&mut self, text: &str, paint: Paint) -> Result<()>;

    /// Box of centred lines over the grid, until `hide_message`.
    fn show_message(&mut self, lines: &[&str], paint: Paint) -> Result<()>;

    fn hide_message(&mut self) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    fn bell(&mut self) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

pub trait Clock {
    /// Monotonic time since the process started.
    fn now(&self) -> Duration;

    fn sleep(&mut self, duration: Duration);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StoreKey {
    HighScore,
    StartingLevel,
}

pub trait Store {
    /// `None` when the value is missing or unreadable.
    fn load_int(&self, key: StoreKey) -> Option<i64>;

    fn save_int(&mut self, key: StoreKey, value: i64) -> Result<()>;
}
