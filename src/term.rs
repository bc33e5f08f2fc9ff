use std::io::{stdout, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::{self, Color};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::config::Config;
use crate::platform::{Clock, Command, Keys, Paint, Screen};
use crate::snake::Direction::*;
use crate::{Coords, TermInt};

/// Columns needed right of the grid for the status panel.
const PANEL_WIDTH: TermInt = 24;
const BANNER_COLUMN: TermInt = 10;

const WALL_COLORS: [Color; 10] = [
    Color::DarkBlue,
    Color::DarkGreen,
    Color::DarkCyan,
    Color::DarkRed,
    Color::DarkMagenta,
    Color::DarkYellow,
    Color::Blue,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
];

type Glyph = (char, Paint);

/// Owns the terminal while the game runs: raw mode, alternate screen and a
/// copy of what is on screen so message boxes can be taken down again.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    grid: (TermInt, TermInt),
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: (TermInt, TermInt),
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new(config: &Config) -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        let grid = (config.width as TermInt, config.height as TermInt);

        let needed = (grid.0 + 2 + PANEL_WIDTH, grid.1 + 1);
        if width < needed.0 || height < needed.1 {
            bail!(
                "Terminal is {}x{}, the game needs at least {}x{}",
                width, height, needed.0, needed.1
            );
        }

        let screen = vec![(' ', Paint::Default); width as usize * height as usize];
        Ok(TermManager { width, height, grid, stdout: stdout(), screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking)?;
        execute!(self.stdout, LeaveAlternateScreen).context("Error leaving alt screen")?;
        Ok(())
    }

    /// Waits for any key. `None` if it was Ctrl+C.
    pub fn read_key_blocking(&self) -> Result<Option<KeyEvent>> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(if is_ctrl_c(&ev) { None } else { Some(ev) });
            }
        }
    }

    fn index(&self, pos: (TermInt, TermInt)) -> usize {
        self.width as usize * pos.1 as usize + pos.0 as usize
    }

    fn on_screen(&self, pos: Coords) -> Option<(TermInt, TermInt)> {
        let (x, y) = pos;
        if x < 0 || y < 0 || x as TermInt >= self.width || y as TermInt >= self.height {
            return None;
        }
        Some((x as TermInt, y as TermInt))
    }

    fn print_at(&mut self, pos: (TermInt, TermInt), glyph: Glyph) -> Result<()> {
        let i = self.index(pos);
        self.screen[i] = glyph;
        self.print_at_no_save(pos, glyph)
    }

    fn print_at_no_save(&mut self, pos: (TermInt, TermInt), glyph: Glyph) -> Result<()> {
        // Message boxes draw through here so the buffer keeps the grid under them.
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(color_for(glyph.1)),
            style::Print(glyph.0)
        )?;
        Ok(())
    }

    fn print_str(&mut self, pos: (TermInt, TermInt), text: &str, paint: Paint) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            let x = pos.0 + i as TermInt;
            if x >= self.width {
                break;
            }
            self.print_at((x, pos.1), (ch, paint))?;
        }
        Ok(())
    }
}

impl Screen for TermManager {
    fn put(&mut self, pos: Coords, ch: char, paint: Paint) -> Result<()> {
        match self.on_screen(pos) {
            Some(pos) => self.print_at(pos, (ch, paint)),
            None => Ok(()),
        }
    }

    fn panel_line(&mut self, row: u16, text: &str) -> Result<()> {
        let padded = format!("{:<width$}", text, width = PANEL_WIDTH as usize - 1);
        self.print_str((self.grid.0 + 2, row), &padded, Paint::Status)
    }

    fn banner(&mut self, text: &str, paint: Paint) -> Result<()> {
        let width = (self.grid.0 - BANNER_COLUMN) as usize;
        let padded = format!("{:<width$}", text, width = width);
        self.print_str((BANNER_COLUMN, self.grid.1), &padded, paint)
    }

    fn show_message(&mut self, lines: &[&str], paint: Paint) -> Result<()> {
        if self.current_msg.is_some() {
            self.hide_message()?;
        }

        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (longest + 2).min(self.width as usize) as TermInt;
        let center = (self.grid.0 / 2, self.grid.1 / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // One blank row above and below the text.
        let rows = std::iter::once("")
            .chain(lines.iter().copied())
            .chain(std::iter::once(""));
        for (y_diff, line) in rows.enumerate() {
            let row = format!("{: ^width$}", line, width = msg_width as usize);
            let y = top_left.1 + y_diff as TermInt;
            for (x_diff, ch) in row.chars().take(msg_width as usize).enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), (ch, paint))?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        let Message { top_left: (left, top), width, height } = msg;
        for y in top..top + height {
            for x in left..left + width {
                let glyph = self.screen[self.index((x, y))];
                self.print_at_no_save((x, y), glyph)?;
            }
        }

        self.flush()
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen = vec![(' ', Paint::Default); self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    fn bell(&mut self) -> Result<()> {
        queue!(self.stdout, style::Print('\x07'))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}

impl Keys for TermManager {
    fn poll_key(&mut self) -> Result<Option<Command>> {
        // One event per call; the rest stay queued for later ticks.
        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                return Ok(command_for(&ev));
            }
        }
        Ok(None)
    }
}

/// Arrow keys and WASD steer, P or Esc pauses, Ctrl+C quits.
pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Turn(Right)),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(Command::TogglePause),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

fn color_for(paint: Paint) -> Color {
    match paint {
        Paint::Wall(level) => WALL_COLORS[(level.saturating_sub(1) as usize) % WALL_COLORS.len()],
        Paint::SnakeHead | Paint::Food | Paint::Good => Color::Green,
        Paint::SnakeBody | Paint::DeadSnake | Paint::Bad => Color::Red,
        Paint::BonusFood => Color::Yellow,
        Paint::Status => Color::Cyan,
        Paint::Default => Color::Reset,
    }
}

pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
