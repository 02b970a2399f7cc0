//! Key-value persistence backends.
//!
//! All persisted data is JSON-shaped text under one record per logical key,
//! mirroring a browser's local storage. [`MemoryStore`] backs tests and
//! defaults; [`FileStore`] keeps one UTF-8 file per key in a directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rustc_hash::FxHashMap;

/// Storage keys, one per logical record.
pub mod keys {
    pub const GAME_STATE: &str = "2048-game-state";
    pub const LEADERBOARD: &str = "2048-leaderboard";
    pub const STATS: &str = "2048-stats";
    pub const BEST_SCORE: &str = "2048-best-score";

    /// Every key the crate persists, for wholesale clearing.
    pub const ALL: [&str; 4] = [GAME_STATE, LEADERBOARD, STATS, BEST_SCORE];
}

/// A local key-value store holding one text record per key.
///
/// Reads are infallible by contract: a missing or unreadable record is
/// simply absent, and callers fall back to defaults. Writes can fail (disk
/// full, permissions) and surface that.
pub trait KvStore {
    /// Read the record for a key, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Write the record for a key, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Delete the record for a key. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one `<key>.json` file per record under a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating store directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open a store in the platform data directory (`…/twenty48`).
    pub fn in_data_dir() -> anyhow::Result<Self> {
        let base = dirs::data_dir().context("no platform data directory available")?;
        Self::new(base.join("twenty48"))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("writing {}", path.display()))
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("removing {}", path.display())),
        }
    }
}
