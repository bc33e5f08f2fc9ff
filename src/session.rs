use std::time::Duration;

use tracing::{debug, info};

use crate::config::Config;
use crate::food::{Food, FoodSpawner};
use crate::snake::{Crash, Direction, MoveResult, Snake};
use crate::Coords;

const FOOD_POINTS: u32 = 1;
const BONUS_POINTS: u32 = 3;
const BONUS_MONEY: u32 = 100;

/// Result of one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    GameOver(Crash),
    LevelCleared,
    /// The snake covers every open cell, so no food can be placed.
    BoardFull,
}

/// What changed on the board during the last tick, for incremental drawing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub vacated: Option<Coords>,
    pub eaten: Option<Food>,
}

/// One attempt at one level.
pub struct GameSession {
    config: Config,
    level: u32,
    snake: Snake,
    food: Option<Food>,
    spawner: FoodSpawner,
    score: u32,
    fruits_eaten: u32,
    money: u32,
    last_tick: TickReport,
}

impl GameSession {
    /// `money` is what the run has collected on earlier levels.
    pub fn with_spawner(config: &Config, level: u32, money: u32, mut spawner: FoodSpawner) -> Self {
        let snake = Snake::for_level(config, level);
        let food = spawner.spawn(config, level, &snake, 0);
        info!(level, length = snake.len(), "level started");

        GameSession {
            config: config.clone(),
            level,
            snake,
            food,
            spawner,
            score: 0,
            fruits_eaten: 0,
            money,
            last_tick: TickReport::default(),
        }
    }

    /// Advance the game one tick. Must not be called while paused.
    pub fn update(&mut self, input: Option<Direction>) -> Outcome {
        self.last_tick = TickReport::default();

        if let Some(dir) = input {
            self.snake.set_direction(dir);
        }

        let food = match self.food {
            Some(food) => food,
            None => return Outcome::BoardFull,
        };

        match self.snake.move_step(Some(food.pos), self.level, &self.config) {
            MoveResult::Crashed(crash) => {
                info!(level = self.level, ?crash, score = self.score, "snake crashed");
                return Outcome::GameOver(crash);
            }
            MoveResult::Moved { old_tail, ate_food } => {
                self.last_tick.vacated = Some(old_tail);
                if ate_food {
                    self.eat(food);
                }
            }
        }

        if self.fruits_eaten >= self.config.fruits_to_clear {
            info!(level = self.level, score = self.score, money = self.money, "level cleared");
            return Outcome::LevelCleared;
        }

        if self.food.is_none() {
            info!(level = self.level, length = self.snake.len(), "board full");
            return Outcome::BoardFull;
        }

        Outcome::Continue
    }

    fn eat(&mut self, food: Food) {
        self.fruits_eaten += 1;
        if food.is_bonus {
            self.score += BONUS_POINTS;
            self.money += BONUS_MONEY;
        } else {
            self.score += FOOD_POINTS;
        }
        debug!(?food, fruits = self.fruits_eaten, score = self.score, "food eaten");

        self.last_tick.eaten = Some(food);
        self.food = self.spawner.spawn(&self.config, self.level, &self.snake, self.fruits_eaten);
    }

    /// Put the food somewhere specific, replacing whatever was spawned.
    pub fn set_food(&mut self, food: Food) {
        self.food = Some(food);
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Food> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn fruits_eaten(&self) -> u32 {
        self.fruits_eaten
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn last_tick(&self) -> TickReport {
        self.last_tick
    }
}

/// How long to wait before the next tick. A left/right key press this tick
/// halves the wait, down to `min_tick`.
pub fn tick_interval(config: &Config, input: Option<Direction>) -> Duration {
    match input {
        Some(dir) if dir.is_horizontal() => (config.base_tick / 2).max(config.min_tick),
        _ => config.base_tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(level: u32) -> GameSession {
        GameSession::with_spawner(&Config::default(), level, 0, FoodSpawner::with_seed(11))
    }

    fn feed_ahead(session: &mut GameSession, is_bonus: bool) {
        let (x, y) = session.snake().head();
        session.set_food(Food { pos: (x + 1, y), is_bonus });
    }

    #[test]
    fn fresh_session_has_food_off_the_snake() {
        for level in 1..=6 {
            let session = session(level);
            let food = session.food().unwrap();
            assert!(!session.snake().occupies(food.pos));
            assert_eq!(session.fruits_eaten(), 0);
        }
    }

    #[test]
    fn normal_food_scores_one() {
        let mut session = session(1);
        feed_ahead(&mut session, false);
        assert_eq!(session.update(None), Outcome::Continue);
        assert_eq!(session.score(), 1);
        assert_eq!(session.money(), 0);
        assert_eq!(session.snake().len(), 4);
        assert!(session.last_tick().eaten.is_some());
    }

    #[test]
    fn bonus_food_scores_three_and_pays() {
        let mut session = session(1);
        feed_ahead(&mut session, true);
        session.update(None);
        assert_eq!(session.score(), 3);
        assert_eq!(session.money(), 100);
    }

    #[test]
    fn respawned_food_follows_bonus_cadence() {
        let mut session = session(1);
        for eaten in 1..=10 {
            feed_ahead(&mut session, false);
            session.update(None);
            assert_eq!(session.food().unwrap().is_bonus, (eaten + 1) % 5 == 0);
        }
    }

    #[test]
    fn crash_is_game_over() {
        let mut session = session(1);
        session.update(Some(Direction::Up));
        let mut outcome = Outcome::Continue;
        for _ in 0..20 {
            outcome = session.update(None);
            if outcome != Outcome::Continue {
                break;
            }
        }
        assert_eq!(outcome, Outcome::GameOver(Crash::Border));
    }

    /// 6x4 board: a 4x2 interior, level 1 snake on (3, 2), (2, 2), (1, 2).
    /// Six fruits, each placed where the head will land, curl the snake over
    /// every cell. Eating leaves the old tail cell empty, so the board only
    /// fills on the sixth.
    fn tiny_board(fruits_to_clear: u32) -> (GameSession, Vec<Option<Direction>>) {
        let config = Config { width: 6, height: 4, fruits_to_clear, ..Config::default() };
        let plan = vec![(4, 2), (4, 1), (3, 1), (2, 1), (1, 1), (1, 2)];
        let spawner = FoodSpawner::with_seed(4).with_plan(plan);
        let session = GameSession::with_spawner(&config, 1, 0, spawner);
        let moves = vec![
            None,
            Some(Direction::Up),
            Some(Direction::Left),
            None,
            None,
            Some(Direction::Down),
        ];
        (session, moves)
    }

    #[test]
    fn filling_the_board_ends_the_level() {
        let (mut session, moves) = tiny_board(15);
        assert_eq!(session.snake().body().iter().copied().collect::<Vec<_>>(), vec![(3, 2), (2, 2), (1, 2)]);

        let (last, rest) = moves.split_last().unwrap();
        for &dir in rest {
            assert_eq!(session.update(dir), Outcome::Continue);
        }
        assert_eq!(session.food().unwrap().pos, (1, 2));

        assert_eq!(session.update(*last), Outcome::BoardFull);
        assert_eq!(session.food(), None);
        assert_eq!(session.fruits_eaten(), 6);
        assert_eq!(session.snake().len(), 9);
    }

    #[test]
    fn clearing_beats_full_board_on_the_same_tick() {
        let (mut session, moves) = tiny_board(6);
        let outcomes: Vec<Outcome> = moves.into_iter().map(|dir| session.update(dir)).collect();
        assert_eq!(outcomes[..5], [Outcome::Continue; 5]);
        assert_eq!(outcomes[5], Outcome::LevelCleared);
        assert_eq!(session.food(), None);
    }

    #[test]
    fn turning_sideways_speeds_up_the_next_tick() {
        let config = Config::default();
        assert_eq!(tick_interval(&config, None), Duration::from_millis(250));
        assert_eq!(tick_interval(&config, Some(Direction::Up)), Duration::from_millis(250));
        assert_eq!(tick_interval(&config, Some(Direction::Left)), Duration::from_millis(125));

        let fast = Config { base_tick: Duration::from_millis(80), ..Config::default() };
        assert_eq!(tick_interval(&fast, Some(Direction::Right)), Duration::from_millis(50));
    }
}
