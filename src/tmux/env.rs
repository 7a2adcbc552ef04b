// ABOUTME: Environment checks for the tmux integration
// Detects a surrounding tmux client, checks live session names and filters
// uninteresting foreground commands out of captured panes

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::tmux::command::TmuxCommand;
use crate::tmux::executor::TmuxExecutor;

/// Set by tmux for every process running inside one of its panes.
pub const TMUX_ENV: &str = "TMUX";
pub const SHELL_ENV: &str = "SHELL";
/// Written into saved layouts for panes that only run a shell.
pub const DEFAULT_PLACEHOLDER: &str = r#"echo "Default CMD""#;

lazy_static! {
    static ref SESSION_NAME_RE: Regex = Regex::new(r"(?m)^([^: \t\n]*):").expect("valid regex");
}

/// Snapshot of the process environment the tmux integration cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TmuxEnvironment {
    tmux: Option<String>,
    shell: Option<String>,
    program: Option<String>,
}

impl TmuxEnvironment {
    pub const fn new(tmux: Option<String>, shell: Option<String>, program: Option<String>) -> Self {
        Self {
            tmux,
            shell,
            program,
        }
    }

    /// Snapshot of `TMUX`, `SHELL` and the program name from the environment.
    pub fn from_process() -> Self {
        Self {
            tmux: std::env::var(TMUX_ENV).ok(),
            shell: std::env::var(SHELL_ENV).ok(),
            program: std::env::args().next(),
        }
    }

    pub fn is_inside_tmux(&self) -> bool {
        self.tmux.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Commands that only show a bare shell or this tool itself: the program
    /// name as invoked and its base name, `$SHELL` and its base name.
    pub fn ignored_commands(&self) -> Vec<String> {
        let mut ignored = Vec::new();
        for value in [&self.program, &self.shell].into_iter().flatten() {
            if value.is_empty() {
                continue;
            }
            ignored.push(value.clone());
            if let Some(base) = Path::new(value).file_name().and_then(|b| b.to_str()) {
                if base != value {
                    ignored.push(base.to_string());
                }
            }
        }
        ignored
    }

    pub fn command_filter(&self, placeholder: impl Into<String>) -> CommandFilter {
        CommandFilter::new(self.ignored_commands(), placeholder)
    }
}

/// Replaces uninteresting observed commands with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFilter {
    ignored: Vec<String>,
    placeholder: String,
}

impl CommandFilter {
    pub fn new(ignored: Vec<String>, placeholder: impl Into<String>) -> Self {
        Self {
            ignored,
            placeholder: placeholder.into(),
        }
    }

    pub fn is_ignored(&self, command: &str) -> bool {
        self.ignored.iter().any(|c| c == command)
    }

    /// Maps an observed foreground command to what gets saved.
    pub fn apply(&self, observed: &str) -> String {
        if self.is_ignored(observed) {
            self.placeholder.clone()
        } else {
            observed.to_string()
        }
    }
}

impl Default for CommandFilter {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_PLACEHOLDER)
    }
}

/// Session names from `tmux ls` output, one per `name: ...` line.
pub fn parse_session_names(output: &str) -> Vec<String> {
    SESSION_NAME_RE
        .captures_iter(output)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A failing query (usually no server running) counts as "does not exist".
pub fn session_exists<E: TmuxExecutor + ?Sized>(executor: &E, name: &str) -> bool {
    match TmuxCommand::list_sessions().execute(executor) {
        Ok(output) => parse_session_names(&output).iter().any(|s| s == name),
        Err(e) => {
            debug!("Session listing failed, assuming {} does not exist: {}", name, e);
            false
        }
    }
}
