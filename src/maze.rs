//! Level geometry. Every wall check in the game (movement, food placement
//! and drawing) goes through [`is_wall`].

use crate::config::Config;
use crate::Coords;

/// Rows kept free above and below the level 2/3 vertical walls.
const BAND_MARGIN: i16 = 3;
/// Half-size of the open square in the middle of the level 4 cross.
const CROSS_GAP: i16 = 5;
const DASH_INTERVAL: i16 = 5;
/// Half-size of the opening in the level 6 barrier.
const BARRIER_OPENING: i16 = 8;

/// Whether `pos` is strictly inside the outer border.
pub fn is_inside(config: &Config, pos: Coords) -> bool {
    let (x, y) = pos;
    x >= 1 && x <= config.width - 2 && y >= 1 && y <= config.height - 2
}

/// The maze predicate: the outer border (and anything beyond it) plus the
/// level's interior walls. Levels accumulate, level 6 has every pattern.
pub fn is_wall(config: &Config, level: u32, pos: Coords) -> bool {
    if !is_inside(config, pos) {
        return true;
    }

    let (x, y) = pos;
    let (w, h) = (config.width, config.height);
    let (cx, cy) = (w / 2, h / 2);
    let in_band = y >= BAND_MARGIN && y < h - BAND_MARGIN;

    if level >= 2 && x == w / 3 && in_band {
        return true;
    }

    if level >= 3 && x == 2 * w / 3 && in_band {
        return true;
    }

    if level >= 4 {
        let vertical = x == cx && (y < cy - CROSS_GAP || y > cy + CROSS_GAP);
        let horizontal = y == cy && (x < cx - CROSS_GAP || x > cx + CROSS_GAP);
        if vertical || horizontal {
            return true;
        }
    }

    if level >= 5 {
        let on_diagonal = x == y || x + y == w - 1;
        let dashed = x % DASH_INTERVAL == 0 || x % DASH_INTERVAL == 1;
        if on_diagonal && dashed {
            return true;
        }
    }

    if level >= 6 && x == cx && (y < cy - BARRIER_OPENING || y > cy + BARRIER_OPENING) {
        return true;
    }

    false
}

/// Every wall cell on the screen for `level`, border included, row by row.
pub fn wall_cells(config: &Config, level: u32) -> impl Iterator<Item = Coords> + '_ {
    all_cells(config).filter(move |&pos| is_wall(config, level, pos))
}

/// Every cell the snake could occupy on `level`.
pub fn open_cells(config: &Config, level: u32) -> impl Iterator<Item = Coords> + '_ {
    all_cells(config).filter(move |&pos| !is_wall(config, level, pos))
}

fn all_cells(config: &Config) -> impl Iterator<Item = Coords> {
    let (w, h) = (config.width, config.height);
    (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
}
