// ABOUTME: User configuration loaded from ~/.config/tmass/config.toml
// Every field is optional; command-line flags override whatever is set here

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::session::SplitAnchor;
use crate::tmux::env::DEFAULT_PLACEHOLDER;

/// Directory under the user config dir that holds tmass settings.
pub const APP_DIR: &str = "tmass";
pub const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or parsing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Effective settings after the config file and command line flags are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// tmux binary, looked up on PATH unless absolute.
    pub tmux: String,
    /// Arguments placed before every tmux subcommand, e.g. `-L work`.
    pub tmux_args: Vec<String>,
    /// Where layout files are read from and written to.
    pub layout_dir: PathBuf,
    /// Recorded for panes that only run a shell when saving.
    pub placeholder_command: String,
    pub split_anchor: SplitAnchor,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmux: "tmux".to_string(),
            tmux_args: Vec::new(),
            layout_dir: default_layout_dir(),
            placeholder_command: DEFAULT_PLACEHOLDER.to_string(),
            split_anchor: SplitAnchor::default(),
        }
    }
}

impl Config {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `<config dir>/tmass/config.toml`, falling back to the working directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// `~/.config/tmass` on every platform, matching where layouts have always lived.
pub fn default_layout_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Splits a `--tmux-args` value the way a shell would for plain words.
pub fn split_args(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}
