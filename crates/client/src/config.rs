//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use runtime::RuntimeConfig;

#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub data_dir: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_DATA_DIR` - Content directory (default: built-in content)
    /// - `DUNGEON_SEED` - Seed for the random source (default: random)
    /// - `DUNGEON_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `GAME_SESSION_ID` - Session identifier for the log file (default: timestamp)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            data_dir: lookup("DUNGEON_DATA_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            seed: read(&lookup, "DUNGEON_SEED"),
            log_dir: lookup("DUNGEON_LOG_DIR").map(PathBuf::from),
            session_id: lookup("GAME_SESSION_ID").filter(|id| !id.trim().is_empty()),
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            data_dir: self.data_dir.clone(),
            seed: self.seed,
            ..RuntimeConfig::default()
        }
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert!(config.data_dir.is_none());
        assert!(config.seed.is_none());
        assert!(config.session_id.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = config(&[
            ("DUNGEON_DATA_DIR", "/srv/dungeon"),
            ("DUNGEON_SEED", " 1234 "),
            ("DUNGEON_LOG_DIR", "/tmp/logs"),
            ("GAME_SESSION_ID", "night-run"),
        ]);
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/dungeon")));
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.session_id.as_deref(), Some("night-run"));

        let runtime = config.runtime_config();
        assert_eq!(runtime.seed, Some(1234));
        assert_eq!(runtime.prompt, "> ");
    }

    #[test]
    fn malformed_seed_is_ignored() {
        assert!(config(&[("DUNGEON_SEED", "lots")]).seed.is_none());
        assert!(config(&[("DUNGEON_DATA_DIR", "  ")]).data_dir.is_none());
    }
}
