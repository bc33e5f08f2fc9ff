//! In-memory platform doubles for unit tests.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use anyhow::Result;

use crate::platform::{Clock, Command, Keys, Paint, Screen, Store, StoreKey};
use crate::Coords;

#[derive(Default)]
pub struct FakeScreen {
    pub cells: HashMap<Coords, (char, Paint)>,
    pub panel: HashMap<u16, String>,
    pub banners: Vec<String>,
    pub messages: Vec<Vec<String>>,
    pub bells: usize,
}

impl Screen for FakeScreen {
    fn put(&mut self, pos: Coords, ch: char, paint: Paint) -> Result<()> {
        self.cells.insert(pos, (ch, paint));
        Ok(())
    }

    fn panel_line(&mut self, row: u16, text: &str) -> Result<()> {
        self.panel.insert(row, text.to_string());
        Ok(())
    }

    fn banner(&mut self, text: &str, _paint: Paint) -> Result<()> {
        self.banners.push(text.to_string());
        Ok(())
    }

    fn show_message(&mut self, lines: &[&str], _paint: Paint) -> Result<()> {
        self.messages.push(lines.iter().map(|l| l.to_string()).collect());
        Ok(())
    }

    fn hide_message(&mut self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.cells.clear();
        Ok(())
    }

    fn bell(&mut self) -> Result<()> {
        self.bells += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Hands out one scripted key per poll, then nothing but `Quit`.
pub struct ScriptedKeys(pub VecDeque<Option<Command>>);

impl ScriptedKeys {
    pub fn new(script: Vec<Option<Command>>) -> Self {
        ScriptedKeys(script.into())
    }
}

impl Keys for ScriptedKeys {
    fn poll_key(&mut self) -> Result<Option<Command>> {
        Ok(self.0.pop_front().unwrap_or(Some(Command::Quit)))
    }
}

/// A clock that only moves when slept on.
#[derive(Default)]
pub struct FakeClock {
    pub now: Duration,
    pub sleeps: Vec<Duration>,
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
        self.sleeps.push(duration);
    }
}

#[derive(Default)]
pub struct MemoryStore(pub HashMap<StoreKey, i64>);

impl Store for MemoryStore {
    fn load_int(&self, key: StoreKey) -> Option<i64> {
        self.0.get(&key).copied()
    }

    fn save_int(&mut self, key: StoreKey, value: i64) -> Result<()> {
        self.0.insert(key, value);
        Ok(())
    }
}
