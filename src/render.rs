use std::time::Duration;

use anyhow::Result;

use crate::config::Config;
use crate::maze;
use crate::platform::{Paint, Screen};
use crate::session::GameSession;

const WALL_CHAR: char = '#';
const SNAKE_BODY_CHAR: char = '█';
const DEAD_SNAKE_CHAR: char = 'X';

/// Side panel contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub level: u32,
    pub score: u32,
    pub fruits: u32,
    pub fruits_to_clear: u32,
    pub money: u32,
    pub high_score: u32,
    pub elapsed: Duration,
}

/// Full redraw at the start of a level.
pub fn draw_level<S: Screen>(screen: &mut S, config: &Config, session: &GameSession) -> Result<()> {
    screen.clear()?;

    let paint = Paint::Wall(session.level());
    for pos in maze::wall_cells(config, session.level()) {
        screen.put(pos, WALL_CHAR, paint)?;
    }

    draw_snake(screen, session)?;
    draw_food(screen, session)?;
    screen.flush()
}

/// Redraw only what moved during the last tick.
pub fn draw_tick<S: Screen>(screen: &mut S, session: &GameSession) -> Result<()> {
    let snake = session.snake();

    if let Some(vacated) = session.last_tick().vacated {
        // A freshly grown tail sits on two segments; keep it.
        if !snake.occupies(vacated) {
            screen.put(vacated, ' ', Paint::Default)?;
        }
    }

    if let Some(&neck) = snake.body().get(1) {
        screen.put(neck, SNAKE_BODY_CHAR, Paint::SnakeBody)?;
    }
    screen.put(snake.head(), snake.head_char(), Paint::SnakeHead)?;

    draw_food(screen, session)?;
    screen.flush()
}

pub fn draw_dead_snake<S: Screen>(screen: &mut S, session: &GameSession) -> Result<()> {
    for &pos in session.snake().body() {
        screen.put(pos, DEAD_SNAKE_CHAR, Paint::DeadSnake)?;
    }
    screen.flush()
}

pub fn draw_status<S: Screen>(screen: &mut S, status: &Status) -> Result<()> {
    let lines = [
        format!("Level: {}", status.level),
        format!("Score: {}", status.score),
        format!("Fruits: {}/{}", status.fruits, status.fruits_to_clear),
        format!("Money: ${}", status.money),
        format!("High Score: {}", status.high_score),
        format!("Time: {}s", status.elapsed.as_secs()),
    ];

    for (i, line) in lines.iter().enumerate() {
        screen.panel_line(2 + i as u16, line)?;
    }
    screen.flush()
}

fn draw_snake<S: Screen>(screen: &mut S, session: &GameSession) -> Result<()> {
    let snake = session.snake();

    for (i, &pos) in snake.body().iter().enumerate() {
        if i == 0 {
            screen.put(pos, snake.head_char(), Paint::SnakeHead)?;
        } else {
            screen.put(pos, SNAKE_BODY_CHAR, Paint::SnakeBody)?;
        }
    }
    Ok(())
}

fn draw_food<S: Screen>(screen: &mut S, session: &GameSession) -> Result<()> {
    if let Some(food) = session.food() {
        let paint = if food.is_bonus { Paint::BonusFood } else { Paint::Food };
        screen.put(food.pos, food.symbol(), paint)?;
    }
    Ok(())
}
