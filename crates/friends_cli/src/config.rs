//! Invocation configuration.
//!
//! # Responsibility
//! - Merge command-line flags, environment and defaults into one config.
//!
//! # Invariants
//! - Flags win over environment; environment wins over defaults.
//! - Log level is validated with the same rules logging init applies.
//! - Logging stays off unless a log directory is configured.

use friends_core::{default_log_level, normalize_level};
use std::path::PathBuf;

pub const DEFAULT_FILENAME: &str = "./friends.md";
pub const FILE_ENV: &str = "FRIENDS_FILE";
pub const LOG_LEVEL_ENV: &str = "FRIENDS_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "FRIENDS_LOG_DIR";

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub document_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Resolves config from flags and the process environment.
    pub fn from_env(filename: Option<PathBuf>, log_level: Option<String>) -> Result<Self, String> {
        Self::resolve(filename, log_level, |key| std::env::var(key).ok())
    }

    /// Resolves config from flags and an environment lookup.
    pub fn resolve(
        filename: Option<PathBuf>,
        log_level: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let non_blank = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let document_path = filename
            .or_else(|| non_blank(FILE_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILENAME));
        let log_level = match log_level.or_else(|| non_blank(LOG_LEVEL_ENV)) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };
        let log_dir = non_blank(LOG_DIR_ENV).map(PathBuf::from);

        Ok(Self {
            document_path,
            log_level,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, DEFAULT_FILENAME, FILE_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let config = CliConfig::resolve(None, None, env_of(&[])).unwrap();
        assert_eq!(config.document_path, PathBuf::from(DEFAULT_FILENAME));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn flag_beats_environment() {
        let env = env_of(&[(FILE_ENV, "/tmp/env.md"), (LOG_LEVEL_ENV, "error")]);
        let config = CliConfig::resolve(
            Some(PathBuf::from("flag.md")),
            Some("Warning".to_string()),
            env,
        )
        .unwrap();
        assert_eq!(config.document_path, PathBuf::from("flag.md"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn environment_fills_missing_flags() {
        let env = env_of(&[
            (FILE_ENV, "/tmp/env.md"),
            (LOG_LEVEL_ENV, "trace"),
            (LOG_DIR_ENV, "/tmp/friends-logs"),
        ]);
        let config = CliConfig::resolve(None, None, env).unwrap();
        assert_eq!(config.document_path, PathBuf::from("/tmp/env.md"));
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/friends-logs")));
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let env = env_of(&[(FILE_ENV, "  "), (LOG_DIR_ENV, "")]);
        let config = CliConfig::resolve(None, None, env).unwrap();
        assert_eq!(config.document_path, PathBuf::from(DEFAULT_FILENAME));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = CliConfig::resolve(None, Some("loud".to_string()), env_of(&[])).unwrap_err();
        assert!(err.contains("unsupported log level"));
    }
}
