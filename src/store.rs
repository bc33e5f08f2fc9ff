use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::platform::{Store, StoreKey};

/// One decimal integer per file in the data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path) -> Self {
        FileStore { dir: dir.to_path_buf() }
    }

    fn path(&self, key: StoreKey) -> PathBuf {
        let name = match key {
            StoreKey::HighScore => "highscore.txt",
            StoreKey::StartingLevel => "level.txt",
        };
        self.dir.join(name)
    }
}

impl Store for FileStore {
    fn load_int(&self, key: StoreKey) -> Option<i64> {
        let path = self.path(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(?path, "no saved value");
                return None;
            }
            Err(e) => {
                warn!(?path, error = %e, "could not read saved value");
                return None;
            }
        };

        match text.trim().parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(?path, error = %e, "ignoring malformed saved value");
                None
            }
        }
    }

    fn save_int(&mut self, key: StoreKey, value: i64) -> Result<()> {
        let path = self.path(key);
        fs::write(&path, value.to_string())
            .with_context(|| format!("Failed to write {:?}", path))
    }
}
