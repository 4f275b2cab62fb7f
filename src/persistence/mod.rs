//! Save/load persistence
//!
//! Features:
//! - High score as a bare decimal integer in a text file
//! - Settings as JSON
//! - Writes go through a `.tmp` sibling and a rename, so a crash mid-write
//!   leaves the previous file intact
//!
//! Callers decide what to do with errors; the game loop only ever logs them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the high score inside the data directory
pub const HIGH_SCORE_FILE: &str = "highscore.txt";
/// File name of the settings inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";
/// File name of the log inside the data directory
pub const LOG_FILE: &str = "speed-hunter.log";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed high score {0:?}")]
    Malformed(String),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a stored high score (surrounding whitespace allowed)
pub fn parse_high_score(text: &str) -> Result<u64, PersistenceError> {
    let trimmed = text.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| PersistenceError::Malformed(trimmed.chars().take(32).collect()))
}

/// Read the high score file
pub fn load_high_score(path: &Path) -> Result<u64, PersistenceError> {
    let text = fs::read_to_string(path)?;
    parse_high_score(&text)
}

/// Write the high score file atomically
pub fn save_high_score(path: &Path, value: u64) -> Result<(), PersistenceError> {
    write_atomic(path, value.to_string().as_bytes())?;
    Ok(())
}

/// Read and deserialize a JSON file
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, PersistenceError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Serialize and write a JSON file atomically
pub fn save_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, json.as_bytes())?;
    Ok(())
}

/// Write to `<path>.tmp`, then rename over `path`
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
