use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mazesnake::config::Config;
use mazesnake::platform::{Paint, Screen, Store, StoreKey};
use mazesnake::run::{Run, RunEnd};
use mazesnake::store::FileStore;
use mazesnake::term::{SystemClock, TermManager};

const LOG_FILTER_VAR: &str = "SNAKE_LOG";

fn main() -> Result<()> {
    let config = Config::from_env();
    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", config.data_dir))?;
    init_logging(&config)?;

    let mut store = FileStore::new(&config.data_dir);
    let level = prompt_starting_level(&config)?;
    if let Err(e) = store.save_int(StoreKey::StartingLevel, level as i64) {
        error!("{:#}", e);
    }

    let mut term = TermManager::new(&config)?;
    term.setup()?;
    let res = play(&config, &mut term, store);
    term.restore()?;

    match res? {
        RunEnd::Completed => info!("run completed"),
        RunEnd::Quit => info!("player quit"),
    }
    Ok(())
}

fn play(config: &Config, term: &mut TermManager, store: FileStore) -> Result<RunEnd> {
    term.show_message(&["Press any key to start...", "", "CTRL+C to quit"], Paint::Status)?;
    if term.read_key_blocking()?.is_none() {
        return Ok(RunEnd::Quit);
    }
    term.hide_message()?;

    let mut run = Run::new(config, term, SystemClock::new(), store);
    run.play()
}

fn prompt_starting_level(config: &Config) -> Result<u32> {
    let lines = [
        "=============== Snake Game ===============",
        "Use W A S D or Arrow Keys to move the snake.",
        "Tap LEFT/RIGHT or 'A'/'D' for a burst of speed!",
        "* = Normal fruit, $ = Money fruit (+$100)",
    ];
    for line in lines.iter() {
        println!("{}", line);
    }
    println!("Eat {} fruits to complete a level.", config.fruits_to_clear);
    println!("Walls appear from level 2 onwards.");
    println!("Press 'P' to pause/resume, CTRL+C to quit.");
    println!("==========================================");
    print!("Enter Starting Level (1-{}): ", config.last_level);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).context("Failed to read starting level")?;
    Ok(config.parse_level(&input))
}

fn init_logging(config: &Config) -> Result<()> {
    let path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
