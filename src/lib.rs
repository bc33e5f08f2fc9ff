pub mod config;
pub mod food;
pub mod maze;
pub mod platform;
pub mod render;
pub mod run;
pub mod session;
pub mod snake;
pub mod store;
pub mod term;

#[cfg(test)]
mod fakes;

/// Terminal column/row, as crossterm wants them.
pub type TermInt = u16;

/// A grid cell. Signed so a head stepping off the board is still representable.
pub type Coords = (i16, i16);
