use std::{env, path::PathBuf, time::Duration};

const DATA_DIR_VAR: &str = "SNAKE_DATA_DIR";

/// Game constants. Built once at startup and handed to everything by reference.
#[derive(Clone, Debug)]
pub struct Config {
    pub width: i16,
    pub height: i16,
    pub fruits_to_clear: u32,
    pub max_length: usize,
    pub last_level: u32,
    pub bonus_every: u32,
    pub base_tick: Duration,
    pub min_tick: Duration,
    pub paused_idle: Duration,
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 70,
            height: 30,
            fruits_to_clear: 15,
            max_length: 1000,
            last_level: 6,
            bonus_every: 5,
            base_tick: Duration::from_millis(250),
            min_tick: Duration::from_millis(50),
            paused_idle: Duration::from_millis(100),
            data_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Some(dir) = env::var_os(DATA_DIR_VAR).filter(|d| !d.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn valid_level(&self, level: i64) -> bool {
        level >= 1 && level <= self.last_level as i64
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("mazesnake.log")
    }

    /// The starting level typed at the prompt; anything unusable is level 1.
    pub fn parse_level(&self, input: &str) -> u32 {
        match input.trim().parse::<i64>() {
            Ok(level) if self.valid_level(level) => level as u32,
            _ => 1,
        }
    }
}
