//! Host configuration and file locations

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::persistence::{HIGH_SCORE_FILE, LOG_FILE, SETTINGS_FILE};

/// Where the host keeps its files and how it seeds the game
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub data_dir: PathBuf,
    pub tuning_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            tuning_path: None,
            seed: None,
        }
    }
}

impl HostConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (lets tests avoid touching the real environment)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let data_dir = non_empty("SPEED_HUNTER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let tuning_path = non_empty("SPEED_HUNTER_TUNING").map(PathBuf::from);
        let seed = non_empty("SPEED_HUNTER_SEED").and_then(|s| s.parse().ok());

        Self {
            data_dir,
            tuning_path,
            seed,
        }
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.data_dir.join(HIGH_SCORE_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    /// Configured seed, or one derived from the clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = HostConfig::from_lookup(lookup(&[]));
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.high_score_path(), PathBuf::from("./highscore.txt"));
    }

    #[test]
    fn test_values_from_env() {
        let config = HostConfig::from_lookup(lookup(&[
            ("SPEED_HUNTER_DATA_DIR", "/tmp/hunter"),
            ("SPEED_HUNTER_TUNING", "easy.json"),
            ("SPEED_HUNTER_SEED", "1234"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/hunter"));
        assert_eq!(config.tuning_path, Some(PathBuf::from("easy.json")));
        assert_eq!(config.resolve_seed(), 1234);
        assert_eq!(
            config.settings_path(),
            PathBuf::from("/tmp/hunter/settings.json")
        );
    }

    #[test]
    fn test_blank_and_bad_values_ignored() {
        let config = HostConfig::from_lookup(lookup(&[
            ("SPEED_HUNTER_DATA_DIR", "   "),
            ("SPEED_HUNTER_SEED", "not-a-number"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.seed, None);
    }
}
