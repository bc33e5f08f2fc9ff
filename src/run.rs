use std::time::Duration;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::food::FoodSpawner;
use crate::platform::{Clock, Command, Keys, Paint, Screen, Store, StoreKey};
use crate::render::{self, Status};
use crate::session::{tick_interval, GameSession, Outcome};
use crate::snake::Direction;

const GAME_OVER_PAUSE: Duration = Duration::from_millis(3000);
const LEVEL_CLEARED_PAUSE: Duration = Duration::from_millis(1500);
const RUN_COMPLETE_PAUSE: Duration = Duration::from_millis(4000);

/// What carries over between sessions of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunState {
    pub level: u32,
    pub money: u32,
    pub high_score: u32,
    /// Clock reading when the current attempt began.
    pub started: Duration,
}

/// What the run does once a session has ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Restart,
    Advance(u32),
    Complete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunEnd {
    Completed,
    Quit,
}

impl RunState {
    pub fn load<S: Store>(config: &Config, store: &S, now: Duration) -> Self {
        let level = match store.load_int(StoreKey::StartingLevel) {
            Some(level) if config.valid_level(level) => level as u32,
            Some(level) => {
                warn!(level, "saved starting level out of range, using 1");
                1
            }
            None => 1,
        };

        let high_score = match store.load_int(StoreKey::HighScore) {
            Some(score) if score >= 0 && score <= u32::MAX as i64 => score as u32,
            Some(score) => {
                warn!(score, "saved high score out of range, using 0");
                0
            }
            None => 0,
        };

        RunState { level, money: 0, high_score, started: now }
    }

    /// Apply a session's terminal outcome. `money` is the session's running
    /// total. A full board counts as clearing the level.
    pub fn settle(&mut self, config: &Config, outcome: Outcome, money: u32, now: Duration) -> Option<Transition> {
        match outcome {
            Outcome::Continue => None,
            Outcome::GameOver(_) => {
                self.level = 1;
                self.money = 0;
                self.started = now;
                Some(Transition::Restart)
            }
            Outcome::LevelCleared | Outcome::BoardFull => {
                self.money = money;
                if self.level >= config.last_level {
                    Some(Transition::Complete)
                } else {
                    self.level += 1;
                    Some(Transition::Advance(self.level))
                }
            }
        }
    }

    /// Persist the run's money as the new high score if it beats the old one.
    pub fn record_high_score<S: Store>(&mut self, store: &mut S) -> bool {
        if self.money <= self.high_score {
            return false;
        }

        info!(old = self.high_score, new = self.money, "new high score");
        self.high_score = self.money;
        if let Err(e) = store.save_int(StoreKey::HighScore, self.high_score as i64) {
            error!("{:#}", e);
        }
        true
    }
}

/// Drives levels one after another until the last one is cleared or the
/// player quits.
pub struct Run<'a, T, C, S> {
    config: &'a Config,
    term: &'a mut T,
    clock: C,
    store: S,
    state: RunState,
    paused: bool,
    spawners: Option<Box<dyn FnMut(u32) -> FoodSpawner + 'a>>,
}

impl<'a, T: Keys + Screen, C: Clock, S: Store> Run<'a, T, C, S> {
    pub fn new(config: &'a Config, term: &'a mut T, clock: C, store: S) -> Self {
        let state = RunState::load(config, &store, clock.now());
        info!(level = state.level, high_score = state.high_score, "run started");
        Run { config, term, clock, store, state, paused: false, spawners: None }
    }

    /// Build each level's food spawner with `make(level)` instead of a
    /// randomly seeded one.
    pub fn with_spawners<F: FnMut(u32) -> FoodSpawner + 'a>(mut self, make: F) -> Self {
        self.spawners = Some(Box::new(make));
        self
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn play(&mut self) -> Result<RunEnd> {
        loop {
            let spawner = match self.spawners.as_mut() {
                Some(make) => make(self.state.level),
                None => FoodSpawner::new(),
            };
            let mut session = GameSession::with_spawner(self.config, self.state.level, self.state.money, spawner);
            render::draw_level(&mut *self.term, self.config, &session)?;
            self.draw_status(&session)?;

            let outcome = match self.play_session(&mut session)? {
                Some(outcome) => outcome,
                None => return Ok(RunEnd::Quit),
            };

            let level = self.state.level;
            let money = session.money();
            match self.state.settle(self.config, outcome, money, self.clock.now()) {
                Some(Transition::Restart) => {
                    render::draw_dead_snake(&mut *self.term, &session)?;
                    let money_line = format!("Total Money Earned: ${}", money);
                    self.pause_on(&["GAME OVER!", money_line.as_str(), "Restarting from Level 1..."], Paint::Bad, GAME_OVER_PAUSE)?;
                }
                Some(Transition::Advance(_)) => {
                    let cleared = cleared_line(outcome, level);
                    self.pause_on(&[cleared.as_str()], Paint::Good, LEVEL_CLEARED_PAUSE)?;
                }
                Some(Transition::Complete) => {
                    let cleared = cleared_line(outcome, level);
                    self.pause_on(&[cleared.as_str()], Paint::Good, LEVEL_CLEARED_PAUSE)?;

                    info!(money, "all levels complete");
                    self.term.clear()?;
                    let money_line = format!("Total Money Earned: ${}", money);
                    self.pause_on(&["CONGRATULATIONS! All levels complete.", money_line.as_str()], Paint::Status, RUN_COMPLETE_PAUSE)?;
                    self.state.record_high_score(&mut self.store);
                    return Ok(RunEnd::Completed);
                }
                None => {}
            }
        }
    }

    /// Tick loop for one level. `None` means the player quit.
    fn play_session(&mut self, session: &mut GameSession) -> Result<Option<Outcome>> {
        loop {
            let mut turn: Option<Direction> = None;
            match self.term.poll_key()? {
                Some(Command::Quit) => return Ok(None),
                Some(Command::TogglePause) => self.toggle_pause()?,
                Some(Command::Turn(dir)) if !self.paused => turn = Some(dir),
                _ => {}
            }

            if self.paused {
                self.clock.sleep(self.config.paused_idle);
                continue;
            }

            let outcome = session.update(turn);
            if let Outcome::GameOver(_) = outcome {
                return Ok(Some(outcome));
            }

            if let Some(food) = session.last_tick().eaten {
                self.term.bell()?;
                if food.is_bonus {
                    self.term.banner("Bonus Collected! +$100", Paint::BonusFood)?;
                }
            }
            render::draw_tick(&mut *self.term, session)?;
            self.draw_status(session)?;

            if outcome != Outcome::Continue {
                return Ok(Some(outcome));
            }

            self.clock.sleep(tick_interval(self.config, turn));
        }
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["PAUSED", "Press P to resume", "or Ctrl+C to quit"], Paint::Status)?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }

    fn pause_on(&mut self, lines: &[&str], paint: Paint, duration: Duration) -> Result<()> {
        self.term.show_message(lines, paint)?;
        self.clock.sleep(duration);
        self.term.hide_message()
    }

    fn draw_status(&mut self, session: &GameSession) -> Result<()> {
        let status = Status {
            level: session.level(),
            score: session.score(),
            fruits: session.fruits_eaten(),
            fruits_to_clear: self.config.fruits_to_clear,
            money: session.money(),
            high_score: self.state.high_score,
            elapsed: self.clock.now().saturating_sub(self.state.started),
        };
        render::draw_status(&mut *self.term, &status)
    }
}

fn cleared_line(outcome: Outcome, level: u32) -> String {
    match outcome {
        Outcome::BoardFull => format!("BOARD FULL! LEVEL {} CLEARED!", level),
        _ => format!("LEVEL {} CLEARED!", level),
    }
}
