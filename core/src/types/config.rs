use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;


#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Editor command. Falls back to `$VISUAL`, `$EDITOR`, then `vi`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    /// tmux executable. Default: `tmux`.
    #[serde(default = "default_tmux_bin")]
    pub tmux_bin: String,
    /// Run `move-window -r` after each kill so indexes stay dense. Default: true.
    #[serde(default = "default_renumber_after_kill")]
    pub renumber_after_kill: bool,
    /// Suffix of the scratch listing file. Default: `.tmux`.
    #[serde(default = "default_listing_suffix")]
    pub listing_suffix: String,
}

fn default_tmux_bin() -> String {
    "tmux".into()
}

fn default_renumber_after_kill() -> bool {
    true
}

fn default_listing_suffix() -> String {
    ".tmux".into()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            editor: None,
            tmux_bin: default_tmux_bin(),
            renumber_after_kill: default_renumber_after_kill(),
            listing_suffix: default_listing_suffix(),
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "config.yaml";

    /// Load `config.yaml` from `config_dir`. A missing file yields defaults.
    pub fn load(config_dir: &Path) -> Result<Settings, ConfigError> {
        let path = config_dir.join(Self::FILE_NAME);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        if raw.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Editor command line: configured, else `$VISUAL`, else `$EDITOR`, else `vi`.
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| non_empty_env("VISUAL"))
            .or_else(|| non_empty_env("EDITOR"))
            .unwrap_or_else(|| "vi".into())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.tmux_bin, "tmux");
        assert!(settings.renumber_after_kill);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "editor: nano\n").unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.editor.as_deref(), Some("nano"));
        assert_eq!(settings.listing_suffix, ".tmux");
        assert_eq!(settings.editor_command(), "nano");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "renumber_after_kill: [1, 2\n").unwrap();
        let err = Settings::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }
}
